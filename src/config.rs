// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::error::AppError,
    db::Repositories,
    services::{
        activity_log::ActivityLog, auth::AuthService, club_service::ClubService,
        contribution_type_service::ContributionTypeService, dashboard_service::DashboardService,
        ledger_service::LedgerService, member_service::MemberService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_OVERDUE_SWEEP_INTERVAL_SECS: u64 = 3600;

// Tudo que vem do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub overdue_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} deve ser definida")))
        };

        let sweep_secs: u64 = parse_or(&lookup, "OVERDUE_SWEEP_INTERVAL_SECS", DEFAULT_OVERDUE_SWEEP_INTERVAL_SECS)?;
        if sweep_secs == 0 {
            return Err(AppError::Config("OVERDUE_SWEEP_INTERVAL_SECS deve ser maior que zero".into()));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            overdue_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} inválida: '{raw}'"))),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub club_service: ClubService,
    pub member_service: MemberService,
    pub contribution_type_service: ContributionTypeService,
    pub ledger_service: LedgerService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let repos = Repositories::postgres(db_pool.clone());
        Ok(Self::from_repositories(db_pool, repos, config.jwt_secret.clone()))
    }

    // --- Monta o gráfico de dependências ---
    fn from_repositories(db_pool: PgPool, repos: Repositories, jwt_secret: String) -> Self {
        let activity_log = ActivityLog::new(repos.activities.clone());

        Self {
            db_pool,
            auth_service: AuthService::new(jwt_secret),
            club_service: ClubService::new(
                repos.clubs,
                repos.members.clone(),
                repos.contribution_types.clone(),
                repos.contributions.clone(),
            ),
            member_service: MemberService::new(repos.members.clone(), activity_log.clone()),
            contribution_type_service: ContributionTypeService::new(repos.contribution_types.clone()),
            ledger_service: LedgerService::new(
                repos.contributions.clone(),
                repos.members.clone(),
                repos.contribution_types,
                activity_log,
            ),
            dashboard_service: DashboardService::new(repos.members, repos.contributions, repos.activities),
        }
    }
}
