// src/db.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict},
    models::{
        activity::Activity,
        club::Club,
        contribution::{Contribution, ContributionRow, ContributionStatus, ContributionType},
        member::Member,
    },
};

pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod club_repo;
pub use club_repo::ClubRepository;
pub mod contribution_repo;
pub use contribution_repo::ContributionRepository;
pub mod contribution_type_repo;
pub use contribution_type_repo::ContributionTypeRepository;
pub mod member_repo;
pub use member_repo::MemberRepository;

#[cfg(test)]
pub mod memory;

// =========================================================================
//  CONTRATOS DOS REPOSITÓRIOS
//  Os serviços só conhecem estas traits; Postgres em produção,
//  `memory::MemoryStore` nos testes.
// =========================================================================

#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Club>, AppError>;
    async fn insert(&self, club: &Club) -> Result<Club, AppError>;
    async fn update(&self, club: &Club) -> Result<Club, AppError>;
    /// Apaga lançamentos, membros, tipos, atividades e o clube. Tudo ou nada.
    async fn delete_cascade(&self, club_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError>;
    async fn find_by_email(&self, club_id: Uuid, email: &str) -> Result<Option<Member>, AppError>;
    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<Member>, AppError>;
    async fn insert(&self, member: &Member) -> Result<Member, AppError>;
    async fn update(&self, member: &Member) -> Result<Member, AppError>;
    /// Remove o membro e os lançamentos dele na mesma transação.
    async fn delete_with_contributions(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ContributionTypeStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContributionType>, AppError>;
    async fn find_by_name(&self, club_id: Uuid, name: &str) -> Result<Option<ContributionType>, AppError>;
    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<ContributionType>, AppError>;
    async fn insert(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError>;
    async fn update(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError>;
    /// Não toca nos lançamentos que referenciam o tipo.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ContributionStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contribution>, AppError>;
    async fn insert(&self, contribution: &Contribution) -> Result<Contribution, AppError>;
    /// Só aplica se o status atual ainda for `expected`; senão retorna `None`.
    async fn update_status(
        &self,
        id: Uuid,
        expected: ContributionStatus,
        status: ContributionStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Contribution>, AppError>;
    async fn list_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError>;
    async fn list_rows_for_club(&self, club_id: Uuid) -> Result<Vec<ContributionRow>, AppError>;
    async fn list_outstanding_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError>;
    /// open + due_date < today -> overdue. Retorna quantos mudaram.
    async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, AppError>;
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append(&self, activity: &Activity) -> Result<(), AppError>;
    async fn recent(&self, club_id: Uuid, limit: i64) -> Result<Vec<Activity>, AppError>;
}

/// O conjunto de repositórios que os serviços recebem.
#[derive(Clone)]
pub struct Repositories {
    pub clubs: Arc<dyn ClubStore>,
    pub members: Arc<dyn MemberStore>,
    pub contribution_types: Arc<dyn ContributionTypeStore>,
    pub contributions: Arc<dyn ContributionStore>,
    pub activities: Arc<dyn ActivityStore>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clubs: Arc::new(ClubRepository::new(pool.clone())),
            members: Arc::new(MemberRepository::new(pool.clone())),
            contribution_types: Arc::new(ContributionTypeRepository::new(pool.clone())),
            contributions: Arc::new(ContributionRepository::new(pool.clone())),
            activities: Arc::new(ActivityRepository::new(pool)),
        }
    }
}

// Converte erro de violação de chave única em um erro mais amigável
pub(crate) fn map_unique_violation(e: sqlx::Error, conflict: Conflict) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict);
        }
    }
    e.into()
}
