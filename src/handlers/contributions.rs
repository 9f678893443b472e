// src/handlers/contributions.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::SearchQuery,
    middleware::{club::ClubContext, i18n::Locale},
    models::contribution::{AssignContributionPayload, Contribution, ContributionRow, LedgerSummary},
};

// GET /api/contributions
#[utoipa::path(
    get,
    path = "/api/contributions",
    tag = "Contributions",
    params(SearchQuery),
    responses(
        (status = 200, description = "Lançamentos do clube, vencimento mais recente primeiro", body = Vec<ContributionRow>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_contributions(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .ledger_service
        .list_for_club(club.0, query.search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/contributions/summary
#[utoipa::path(
    get,
    path = "/api/contributions/summary",
    tag = "Contributions",
    responses(
        (status = 200, description = "Contagens por status, valores e taxa de pagamento", body = LedgerSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contribution_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .ledger_service
        .summary(club.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}

// POST /api/contributions
#[utoipa::path(
    post,
    path = "/api/contributions",
    tag = "Contributions",
    request_body = AssignContributionPayload,
    responses(
        (status = 201, description = "Lançamento atribuído (valor copiado do tipo)", body = Contribution),
        (status = 403, description = "Membro ou tipo de outro clube"),
        (status = 404, description = "Membro ou tipo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_contribution(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Json(payload): Json<AssignContributionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .ledger_service
        .assign(club.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// POST /api/contributions/{id}/pay
#[utoipa::path(
    post,
    path = "/api/contributions/{id}/pay",
    tag = "Contributions",
    params(("id" = Uuid, Path, description = "ID do Lançamento")),
    responses(
        (status = 200, description = "Lançamento pago (repetir não altera nada)", body = Contribution),
        (status = 404, description = "Lançamento não encontrado"),
        (status = 409, description = "Lançamento perdoado não pode ser pago")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_contribution(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .ledger_service
        .mark_paid(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(entry)))
}

// POST /api/contributions/{id}/waive
#[utoipa::path(
    post,
    path = "/api/contributions/{id}/waive",
    tag = "Contributions",
    params(("id" = Uuid, Path, description = "ID do Lançamento")),
    responses(
        (status = 200, description = "Lançamento perdoado", body = Contribution),
        (status = 404, description = "Lançamento não encontrado"),
        (status = 409, description = "Lançamento pago não pode ser perdoado")
    ),
    security(("api_jwt" = []))
)]
pub async fn waive_contribution(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .ledger_service
        .waive(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(entry)))
}
