// src/middleware/club.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError, Resource},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::CurrentUser,
};

// O clube da requisição. Sempre resolvido pelo dono autenticado,
// nunca informado pelo cliente.
#[derive(Debug, Clone, Copy)]
pub struct ClubContext(pub Uuid);

// Roda depois do auth_guard
pub async fn club_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = request
        .extensions()
        .get::<CurrentUser>()
        .map(|user| user.id)
        .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale))?;

    let club = app_state
        .club_service
        .find_for_user(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?
        .ok_or_else(|| AppError::NotFound(Resource::Club).to_api_error(&locale))?;

    request.extensions_mut().insert(ClubContext(club.id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for ClubContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClubContext>()
            .copied()
            .ok_or(AppError::NotFound(Resource::Club))
    }
}
