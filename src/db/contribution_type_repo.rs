// src/db/contribution_type_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::{map_unique_violation, ContributionTypeStore},
    models::contribution::ContributionType,
};

#[derive(Clone)]
pub struct ContributionTypeRepository {
    pool: PgPool,
}

impl ContributionTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributionTypeStore for ContributionTypeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContributionType>, AppError> {
        let found = sqlx::query_as::<_, ContributionType>("SELECT * FROM contribution_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found)
    }

    async fn find_by_name(&self, club_id: Uuid, name: &str) -> Result<Option<ContributionType>, AppError> {
        let found = sqlx::query_as::<_, ContributionType>(
            "SELECT * FROM contribution_types WHERE club_id = $1 AND name = $2",
        )
        .bind(club_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }

    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<ContributionType>, AppError> {
        let types = sqlx::query_as::<_, ContributionType>(
            "SELECT * FROM contribution_types WHERE club_id = $1 ORDER BY name ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    async fn insert(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError> {
        sqlx::query_as::<_, ContributionType>(
            r#"
            INSERT INTO contribution_types (
                id, club_id, name, description, amount, "interval", due_day, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(contribution_type.id)
        .bind(contribution_type.club_id)
        .bind(&contribution_type.name)
        .bind(&contribution_type.description)
        .bind(contribution_type.amount)
        .bind(contribution_type.interval)
        .bind(contribution_type.due_day)
        .bind(contribution_type.created_at)
        .bind(contribution_type.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Conflict::ContributionTypeName))
    }

    async fn update(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError> {
        sqlx::query_as::<_, ContributionType>(
            r#"
            UPDATE contribution_types SET
                name = $2, description = $3, amount = $4,
                "interval" = $5, due_day = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(contribution_type.id)
        .bind(&contribution_type.name)
        .bind(&contribution_type.description)
        .bind(contribution_type.amount)
        .bind(contribution_type.interval)
        .bind(contribution_type.due_day)
        .bind(contribution_type.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Conflict::ContributionTypeName))?
        .ok_or(AppError::NotFound(Resource::ContributionType))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contribution_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
