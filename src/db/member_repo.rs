// src/db/member_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::{map_unique_violation, MemberStore},
    models::member::Member,
};

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    async fn find_by_email(&self, club_id: Uuid, email: &str) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE club_id = $1 AND email = $2",
        )
        .bind(club_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE club_id = $1
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn insert(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (
                id, club_id, first_name, last_name, email,
                phone, address, birth_date, join_date,
                role, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(member.club_id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(member.birth_date)
        .bind(member.join_date)
        .bind(member.role)
        .bind(member.status)
        .bind(member.created_at)
        .bind(member.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Conflict::MemberEmail))
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members SET
                first_name = $2, last_name = $3, email = $4,
                phone = $5, address = $6, birth_date = $7, join_date = $8,
                role = $9, status = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(member.birth_date)
        .bind(member.join_date)
        .bind(member.role)
        .bind(member.status)
        .bind(member.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, Conflict::MemberEmail))?
        .ok_or(AppError::NotFound(Resource::Member))
    }

    async fn delete_with_contributions(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM contributions WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // Se algo falhar acima, o drop do tx faz rollback
        tx.commit().await?;

        if deleted > 0 {
            tracing::info!("🗑️ Membro {} removido com {} lançamentos.", id, removed);
        }

        Ok(deleted > 0)
    }
}
