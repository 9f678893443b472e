// src/services/member_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Conflict, Resource},
        search::normalize_search,
    },
    db::MemberStore,
    models::{
        activity::Activity,
        member::{Member, MemberChanges, MemberStatus, NewMember},
    },
    services::{activity_log::ActivityLog, ensure_same_club},
};

#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStore>,
    activities: ActivityLog,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStore>, activities: ActivityLog) -> Self {
        Self { members, activities }
    }

    /// Busca o membro e garante que ele é do clube que está agindo.
    pub async fn get(&self, club_id: Uuid, member_id: Uuid) -> Result<Member, AppError> {
        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Member))?;

        ensure_same_club(club_id, member.club_id)?;
        Ok(member)
    }

    pub async fn list(&self, club_id: Uuid, search: Option<&str>) -> Result<Vec<Member>, AppError> {
        let members = self.members.list_by_club(club_id).await?;

        Ok(match normalize_search(search) {
            Some(needle) => members.into_iter().filter(|m| m.matches(&needle)).collect(),
            None => members,
        })
    }

    pub async fn create(&self, club_id: Uuid, input: NewMember) -> Result<Member, AppError> {
        let input = input.normalized();
        input.validate()?;

        // Checagem explícita; a constraint UNIQUE do banco cobre a corrida
        if self.members.find_by_email(club_id, &input.email).await?.is_some() {
            return Err(AppError::Conflict(Conflict::MemberEmail));
        }

        let member = input.into_member(club_id, Utc::now().date_naive());
        let member = self.members.insert(&member).await?;

        self.activities.record(Activity::member_added(&member)).await;
        tracing::info!("👤 Membro {} criado no clube {}.", member.id, club_id);

        Ok(member)
    }

    pub async fn update(&self, club_id: Uuid, member_id: Uuid, changes: MemberChanges) -> Result<Member, AppError> {
        let changes = changes.normalized();
        changes.validate()?;

        let mut member = self.get(club_id, member_id).await?;

        if let Some(email) = changes.email.as_deref() {
            if email != member.email {
                if let Some(other) = self.members.find_by_email(club_id, email).await? {
                    if other.id != member.id {
                        return Err(AppError::Conflict(Conflict::MemberEmail));
                    }
                }
            }
        }

        changes.apply_to(&mut member);
        let member = self.members.update(&member).await?;

        self.activities.record(Activity::member_updated(&member)).await;

        Ok(member)
    }

    /// Qualquer status pode ir para qualquer status.
    pub async fn set_status(&self, club_id: Uuid, member_id: Uuid, status: MemberStatus) -> Result<Member, AppError> {
        let mut member = self.get(club_id, member_id).await?;
        if member.status == status {
            return Ok(member);
        }

        member.status = status;
        member.updated_at = Utc::now();
        self.members.update(&member).await
    }

    /// Irreversível: leva junto os lançamentos do membro.
    pub async fn delete(&self, club_id: Uuid, member_id: Uuid) -> Result<(), AppError> {
        self.get(club_id, member_id).await?;

        if !self.members.delete_with_contributions(member_id).await? {
            return Err(AppError::NotFound(Resource::Member));
        }
        Ok(())
    }
}
