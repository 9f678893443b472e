// src/common/error.rs

use std::{collections::HashMap, fmt};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;
use crate::models::contribution::ContributionStatus;

/// Registros que podem não existir (ou não pertencer ao clube atual).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Club,
    Member,
    ContributionType,
    Contribution,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Club => "club",
            Resource::Member => "member",
            Resource::ContributionType => "contribution_type",
            Resource::Contribution => "contribution",
        };
        f.write_str(name)
    }
}

/// Violações de unicidade por clube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    MemberEmail,
    ContributionTypeName,
    ClubAlreadyExists,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Conflict::MemberEmail => "member_email_taken",
            Conflict::ContributionTypeName => "contribution_type_name_taken",
            Conflict::ClubAlreadyExists => "club_already_exists",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Conflito de unicidade: {0}")]
    Conflict(Conflict),

    #[error("Registro não encontrado: {0}")]
    NotFound(Resource),

    #[error("Registro pertence a outro clube")]
    Forbidden,

    #[error("Transição inválida: {from} -> {to}")]
    InvalidTransition {
        from: ContributionStatus,
        to: ContributionStatus,
    },

    #[error("Token inválido")]
    InvalidToken,

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Erro de validação de um único campo, com o código que o frontend traduz.
    pub fn field(field: &'static str, code: &'static str) -> Self {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, validator::ValidationError::new(code));
        AppError::ValidationError(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) | AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status();
        let english = locale.is_english();

        let error = match self {
            AppError::ValidationError(_) => pick(
                english,
                "Ein oder mehrere Felder sind ungültig.",
                "One or more fields are invalid.",
            ),
            AppError::Conflict(Conflict::MemberEmail) => pick(
                english,
                "Ein Mitglied mit dieser E-Mail-Adresse existiert bereits.",
                "A member with this email address already exists.",
            ),
            AppError::Conflict(Conflict::ContributionTypeName) => pick(
                english,
                "Eine Beitragsart mit diesem Namen existiert bereits.",
                "A contribution type with this name already exists.",
            ),
            AppError::Conflict(Conflict::ClubAlreadyExists) => pick(
                english,
                "Für dieses Konto existiert bereits ein Verein.",
                "A club already exists for this account.",
            ),
            AppError::NotFound(resource) => not_found_message(*resource, english),
            AppError::Forbidden => pick(
                english,
                "Dieser Datensatz gehört zu einem anderen Verein.",
                "This record belongs to another club.",
            ),
            AppError::InvalidTransition { from, to } => {
                if english {
                    format!("A contribution with status '{from}' cannot change to '{to}'.")
                } else {
                    format!("Ein Beitrag mit Status '{from}' kann nicht zu '{to}' wechseln.")
                }
            }
            AppError::InvalidToken => pick(
                english,
                "Authentifizierungstoken ungültig oder fehlend.",
                "Authentication token is invalid or missing.",
            ),
            // O detalhe fica no log; o cliente recebe só a mensagem genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                pick(
                    english,
                    "Ein unerwarteter Fehler ist aufgetreten.",
                    "An unexpected error occurred.",
                )
            }
        };

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError {
            status,
            error,
            details,
        }
    }
}

fn pick(english: bool, de: &str, en: &str) -> String {
    if english { en.to_string() } else { de.to_string() }
}

fn not_found_message(resource: Resource, english: bool) -> String {
    let (de, en) = match resource {
        Resource::Club => ("Verein nicht gefunden.", "Club not found."),
        Resource::Member => ("Mitglied nicht gefunden.", "Member not found."),
        Resource::ContributionType => ("Beitragsart nicht gefunden.", "Contribution type not found."),
        Resource::Contribution => ("Beitrag nicht gefunden.", "Contribution not found."),
    };
    pick(english, de, en)
}

// Campo -> lista de códigos ("required", "invalid_email", ...)
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let codes = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), codes);
    }
    json!(details)
}

/// A resposta de erro que sai da API.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
