//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, club::club_guard};
use crate::services::ledger_service::LedgerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    spawn_overdue_sweep(app_state.ledger_service.clone(), config.overdue_sweep_interval);

    // Perfil do clube: só exige token (é aqui que o clube nasce)
    let club_routes = Router::new()
        .route(
            "/",
            post(handlers::club::create_club)
                .get(handlers::club::get_club)
                .put(handlers::club::update_club)
                .delete(handlers::club::delete_club),
        )
        .route("/export", get(handlers::club::export_club))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Tudo que vive dentro de um clube: token + clube resolvido.
    // As layers rodam de baixo para cima: auth_guard primeiro.
    let club_scoped_routes = Router::new()
        .route(
            "/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/members/{id}",
            get(handlers::members::get_member)
                .put(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
        .route("/members/{id}/status", put(handlers::members::set_member_status))
        .route(
            "/contribution-types",
            get(handlers::contribution_types::list_contribution_types)
                .post(handlers::contribution_types::create_contribution_type),
        )
        .route(
            "/contribution-types/{id}",
            get(handlers::contribution_types::get_contribution_type)
                .put(handlers::contribution_types::update_contribution_type)
                .delete(handlers::contribution_types::delete_contribution_type),
        )
        .route(
            "/contributions",
            get(handlers::contributions::list_contributions)
                .post(handlers::contributions::assign_contribution),
        )
        .route("/contributions/summary", get(handlers::contributions::get_contribution_summary))
        .route("/contributions/{id}/pay", post(handlers::contributions::pay_contribution))
        .route("/contributions/{id}/waive", post(handlers::contributions::waive_contribution))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            club_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/club", club_routes)
        .nest("/api", club_scoped_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// Job de atraso: roda no boot e depois a cada intervalo
fn spawn_overdue_sweep(ledger: LedgerService, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            if let Err(e) = ledger.mark_overdue(Utc::now().date_naive()).await {
                tracing::error!("🔥 Falha no job de lançamentos atrasados: {}", e);
            }
        }
    });
}
