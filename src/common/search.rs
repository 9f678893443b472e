// src/common/search.rs

/// Termo de busca já normalizado (trim + minúsculas).
/// `None` significa "sem filtro".
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// OU lógico: basta um dos campos conter o termo, sem diferenciar maiúsculas.
pub fn matches_any(needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|field| field.to_lowercase().contains(needle))
}
