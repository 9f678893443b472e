// src/common/serde_utils.rs

use serde::{Deserialize, Deserializer};

/// Distingue "campo ausente" (None) de "campo = null" (Some(None)) em updates parciais.
/// Usar junto com `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Strings opcionais vindas de formulário: "" e espaços viram None.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
