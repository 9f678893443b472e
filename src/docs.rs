// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Club ---
        handlers::club::create_club,
        handlers::club::get_club,
        handlers::club::update_club,
        handlers::club::export_club,
        handlers::club::delete_club,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::create_member,
        handlers::members::get_member,
        handlers::members::update_member,
        handlers::members::set_member_status,
        handlers::members::delete_member,

        // --- Contribution Types ---
        handlers::contribution_types::list_contribution_types,
        handlers::contribution_types::create_contribution_type,
        handlers::contribution_types::get_contribution_type,
        handlers::contribution_types::update_contribution_type,
        handlers::contribution_types::delete_contribution_type,

        // --- Contributions ---
        handlers::contributions::list_contributions,
        handlers::contributions::assign_contribution,
        handlers::contributions::get_contribution_summary,
        handlers::contributions::pay_contribution,
        handlers::contributions::waive_contribution,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Club ---
            models::club::Club,
            models::club::ClubProfileInput,
            models::club::ClubExport,
            models::club::ExportInfo,

            // --- Members ---
            models::member::MemberRole,
            models::member::MemberStatus,
            models::member::Member,
            models::member::NewMember,
            models::member::MemberChanges,
            models::member::SetStatusPayload,

            // --- Contributions ---
            models::contribution::ContributionInterval,
            models::contribution::ContributionType,
            models::contribution::ContributionTypeInput,
            models::contribution::ContributionStatus,
            models::contribution::Contribution,
            models::contribution::ContributionRow,
            models::contribution::AssignContributionPayload,
            models::contribution::LedgerSummary,

            // --- Dashboard ---
            models::activity::ActivityType,
            models::activity::Activity,
            models::dashboard::DashboardStats,
        )
    ),
    tags(
        (name = "Club", description = "Perfil do Verein, exportação e exclusão"),
        (name = "Members", description = "Cadastro de Membros"),
        (name = "Contribution Types", description = "Catálogo de Tipos de Contribuição"),
        (name = "Contributions", description = "Livro de Lançamentos"),
        (name = "Dashboard", description = "Indicadores do Clube")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/club",
            "/api/club/export",
            "/api/members",
            "/api/members/{id}",
            "/api/members/{id}/status",
            "/api/contribution-types",
            "/api/contribution-types/{id}",
            "/api/contributions",
            "/api/contributions/summary",
            "/api/contributions/{id}/pay",
            "/api/contributions/{id}/waive",
            "/api/dashboard",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} sem documentação");
        }
    }
}
