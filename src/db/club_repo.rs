// src/db/club_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::{map_unique_violation, ClubStore},
    models::club::Club,
};

#[derive(Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubStore for ClubRepository {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(club)
    }

    async fn insert(&self, club: &Club) -> Result<Club, AppError> {
        sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (
                id, user_id, name, description, address, phone, website, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(club.id)
        .bind(club.user_id)
        .bind(&club.name)
        .bind(&club.description)
        .bind(&club.address)
        .bind(&club.phone)
        .bind(&club.website)
        .bind(club.created_at)
        .bind(club.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Conflict::ClubAlreadyExists))
    }

    async fn update(&self, club: &Club) -> Result<Club, AppError> {
        sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs SET
                name = $2, description = $3, address = $4,
                phone = $5, website = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(club.id)
        .bind(&club.name)
        .bind(&club.description)
        .bind(&club.address)
        .bind(&club.phone)
        .bind(&club.website)
        .bind(club.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(Resource::Club))
    }

    async fn delete_cascade(&self, club_id: Uuid) -> Result<(), AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // Falhou no meio? O drop do tx desfaz tudo: nada de registros órfãos.
        let mut tx = self.pool.begin().await?;

        let contributions = sqlx::query(
            r#"
            DELETE FROM contributions
            WHERE member_id IN (SELECT id FROM members WHERE club_id = $1)
            "#,
        )
        .bind(club_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let members = sqlx::query("DELETE FROM members WHERE club_id = $1")
            .bind(club_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM contribution_types WHERE club_id = $1")
            .bind(club_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM activities WHERE club_id = $1")
            .bind(club_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(club_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(Resource::Club));
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "🗑️ Clube {} excluído ({} membros, {} lançamentos).",
            club_id,
            members,
            contributions
        );

        Ok(())
    }
}
