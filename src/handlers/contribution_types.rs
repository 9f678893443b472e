// src/handlers/contribution_types.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{club::ClubContext, i18n::Locale},
    models::contribution::{ContributionType, ContributionTypeInput},
};

// GET /api/contribution-types
#[utoipa::path(
    get,
    path = "/api/contribution-types",
    tag = "Contribution Types",
    responses(
        (status = 200, description = "Catálogo de tipos do clube", body = Vec<ContributionType>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_contribution_types(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
) -> Result<impl IntoResponse, ApiError> {
    let types = app_state
        .contribution_type_service
        .list(club.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(types)))
}

// POST /api/contribution-types
#[utoipa::path(
    post,
    path = "/api/contribution-types",
    tag = "Contribution Types",
    request_body = ContributionTypeInput,
    responses(
        (status = 201, description = "Tipo criado", body = ContributionType),
        (status = 400, description = "Valor, intervalo ou dia de vencimento inválido"),
        (status = 409, description = "Nome já usado no clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contribution_type(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Json(payload): Json<ContributionTypeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = app_state
        .contribution_type_service
        .create(club.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/contribution-types/{id}
#[utoipa::path(
    get,
    path = "/api/contribution-types/{id}",
    tag = "Contribution Types",
    params(("id" = Uuid, Path, description = "ID do Tipo")),
    responses(
        (status = 200, description = "Tipo", body = ContributionType),
        (status = 404, description = "Tipo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contribution_type(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let found = app_state
        .contribution_type_service
        .get(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(found)))
}

// PUT /api/contribution-types/{id}
#[utoipa::path(
    put,
    path = "/api/contribution-types/{id}",
    tag = "Contribution Types",
    request_body = ContributionTypeInput,
    params(("id" = Uuid, Path, description = "ID do Tipo")),
    responses(
        (status = 200, description = "Tipo atualizado (lançamentos existentes não mudam)", body = ContributionType),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Tipo não encontrado"),
        (status = 409, description = "Nome já usado no clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contribution_type(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContributionTypeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .contribution_type_service
        .update(club.0, id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/contribution-types/{id}
#[utoipa::path(
    delete,
    path = "/api/contribution-types/{id}",
    tag = "Contribution Types",
    params(("id" = Uuid, Path, description = "ID do Tipo")),
    responses(
        (status = 204, description = "Tipo apagado; lançamentos ficam"),
        (status = 404, description = "Tipo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contribution_type(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .contribution_type_service
        .delete(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
