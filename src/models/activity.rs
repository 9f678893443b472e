// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{contribution::Contribution, member::Member};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    MemberAdded,
    MemberUpdated,
    ContributionPaid,
    ContributionAdded,
}

// Feed do dashboard. Só recebe INSERT.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,

    #[schema(ignore)]
    pub club_id: Uuid,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: ActivityType,

    #[schema(example = "Neues Mitglied hinzugefügt: Max Mustermann")]
    pub description: String,

    pub member_id: Option<Uuid>,
    pub member_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Activity {
    fn about_member(club_id: Uuid, kind: ActivityType, description: String, member: &Member) -> Self {
        Self {
            id: Uuid::new_v4(),
            club_id,
            kind,
            description,
            member_id: Some(member.id),
            member_name: Some(member.full_name()),
            created_at: Utc::now(),
        }
    }

    pub fn member_added(member: &Member) -> Self {
        let description = format!("Neues Mitglied hinzugefügt: {}", member.full_name());
        Self::about_member(member.club_id, ActivityType::MemberAdded, description, member)
    }

    pub fn member_updated(member: &Member) -> Self {
        let description = format!("Mitglied aktualisiert: {}", member.full_name());
        Self::about_member(member.club_id, ActivityType::MemberUpdated, description, member)
    }

    pub fn contribution_added(member: &Member, entry: &Contribution) -> Self {
        let description = format!(
            "Beitrag zugewiesen: {} ({} €) an {}",
            entry.description,
            entry.amount,
            member.full_name()
        );
        Self::about_member(member.club_id, ActivityType::ContributionAdded, description, member)
    }

    pub fn contribution_paid(member: &Member, entry: &Contribution) -> Self {
        let description = format!(
            "Beitrag bezahlt: {} ({} €) von {}",
            entry.description,
            entry.amount,
            member.full_name()
        );
        Self::about_member(member.club_id, ActivityType::ContributionPaid, description, member)
    }
}
