// src/handlers/club.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::club::{Club, ClubExport, ClubProfileInput},
};

// Rotas do clube usam só o auth_guard: é aqui que o clube nasce.

// POST /api/club
#[utoipa::path(
    post,
    path = "/api/club",
    tag = "Club",
    request_body = ClubProfileInput,
    responses(
        (status = 201, description = "Verein angelegt", body = Club),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Usuário já tem um clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_club(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<ClubProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let club = app_state
        .club_service
        .create(user.0.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(club)))
}

// GET /api/club
#[utoipa::path(
    get,
    path = "/api/club",
    tag = "Club",
    responses(
        (status = 200, description = "Perfil do clube", body = Club),
        (status = 404, description = "Usuário ainda não tem clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_club(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let club = app_state
        .club_service
        .get(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(club)))
}

// PUT /api/club
#[utoipa::path(
    put,
    path = "/api/club",
    tag = "Club",
    request_body = ClubProfileInput,
    responses(
        (status = 200, description = "Perfil atualizado", body = Club),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Usuário ainda não tem clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_club(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<ClubProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let club = app_state
        .club_service
        .update(user.0.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(club)))
}

// GET /api/club/export
#[utoipa::path(
    get,
    path = "/api/club/export",
    tag = "Club",
    responses(
        (status = 200, description = "Exportação completa (DSGVO Art. 15/20)", body = ClubExport),
        (status = 404, description = "Usuário ainda não tem clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_club(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let export = app_state
        .club_service
        .export(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(export)))
}

// DELETE /api/club
#[utoipa::path(
    delete,
    path = "/api/club",
    tag = "Club",
    responses(
        (status = 204, description = "Clube e todos os dados apagados"),
        (status = 404, description = "Usuário ainda não tem clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_club(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .club_service
        .delete(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
