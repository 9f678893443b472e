// src/handlers/members.rs

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
    models::member::{Member, MemberChanges, NewMember, SetStatusPayload},
};

// GET /api/members
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    params(SearchQuery),
    responses(
        (status = 200, description = "Membros do clube (filtro por nome ou e-mail)", body = Vec<Member>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let members = app_state
        .member_service
        .list(club.0, query.search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(members)))
}

// POST /api/members
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "Members",
    request_body = NewMember,
    responses(
        (status = 201, description = "Membro criado", body = Member),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já usado no clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Json(payload): Json<NewMember>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .member_service
        .create(club.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(member)))
}

// GET /api/members/{id}
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID do Membro")),
    responses(
        (status = 200, description = "Membro", body = Member),
        (status = 403, description = "Membro de outro clube"),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_member(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .member_service
        .get(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(member)))
}

// PUT /api/members/{id}
#[utoipa::path(
    put,
    path = "/api/members/{id}",
    tag = "Members",
    request_body = MemberChanges,
    params(("id" = Uuid, Path, description = "ID do Membro")),
    responses(
        (status = 200, description = "Membro atualizado", body = Member),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Membro não encontrado"),
        (status = 409, description = "E-mail já usado no clube")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberChanges>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .member_service
        .update(club.0, id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(member)))
}

// PUT /api/members/{id}/status
#[utoipa::path(
    put,
    path = "/api/members/{id}/status",
    tag = "Members",
    request_body = SetStatusPayload,
    params(("id" = Uuid, Path, description = "ID do Membro")),
    responses(
        (status = 200, description = "Status alterado", body = Member),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_member_status(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .member_service
        .set_status(club.0, id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(member)))
}

// DELETE /api/members/{id}
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID do Membro")),
    responses(
        (status = 204, description = "Membro e seus lançamentos apagados"),
        (status = 403, description = "Membro de outro clube"),
        (status = 404, description = "Membro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_member(
    State(app_state): State<AppState>,
    locale: Locale,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .member_service
        .delete(club.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
