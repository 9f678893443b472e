// src/db/contribution_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ContributionStore,
    models::contribution::{Contribution, ContributionRow, ContributionStatus},
};

#[derive(Clone)]
pub struct ContributionRepository {
    pool: PgPool,
}

impl ContributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributionStore for ContributionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contribution>, AppError> {
        let entry = sqlx::query_as::<_, Contribution>("SELECT * FROM contributions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn insert(&self, contribution: &Contribution) -> Result<Contribution, AppError> {
        let entry = sqlx::query_as::<_, Contribution>(
            r#"
            INSERT INTO contributions (
                id, member_id, contribution_type_id, description, amount,
                due_date, paid_date, status, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(contribution.id)
        .bind(contribution.member_id)
        .bind(contribution.contribution_type_id)
        .bind(&contribution.description)
        .bind(contribution.amount)
        .bind(contribution.due_date)
        .bind(contribution.paid_date)
        .bind(contribution.status)
        .bind(&contribution.notes)
        .bind(contribution.created_at)
        .bind(contribution.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: ContributionStatus,
        status: ContributionStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Contribution>, AppError> {
        let entry = sqlx::query_as::<_, Contribution>(
            r#"
            UPDATE contributions
            SET status = $2, paid_date = $3, updated_at = NOW()
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(paid_date)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError> {
        let entries = sqlx::query_as::<_, Contribution>(
            r#"
            SELECT c.*
            FROM contributions c
            JOIN members m ON m.id = c.member_id
            WHERE m.club_id = $1
            ORDER BY c.due_date DESC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn list_rows_for_club(&self, club_id: Uuid) -> Result<Vec<ContributionRow>, AppError> {
        // LEFT JOIN: o tipo pode ter sido excluído
        let rows = sqlx::query_as::<_, ContributionRow>(
            r#"
            SELECT
                c.*,
                m.first_name AS member_first_name,
                m.last_name AS member_last_name,
                t.name AS contribution_type_name
            FROM contributions c
            JOIN members m ON m.id = c.member_id
            LEFT JOIN contribution_types t ON t.id = c.contribution_type_id
            WHERE m.club_id = $1
            ORDER BY c.due_date DESC, m.last_name ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_outstanding_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError> {
        let entries = sqlx::query_as::<_, Contribution>(
            r#"
            SELECT c.*
            FROM contributions c
            JOIN members m ON m.id = c.member_id
            WHERE m.club_id = $1
              AND c.status IN ('open', 'overdue')
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE contributions
            SET status = 'overdue', updated_at = NOW()
            WHERE status = 'open' AND due_date < $1
            "#,
        )
        .bind(today)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
