// src/models/club.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::blank_to_none;
use crate::models::{
    contribution::{Contribution, ContributionType},
    member::Member,
};

// ---
// Club (o "Verein", o tenant)
// ---
// Um clube por usuário dono.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "TSV Musterstadt e.V.")]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "https://tsv-musterstadt.de")]
    pub website: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfileInput {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "TSV Musterstadt e.V.")]
    pub name: String,

    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,

    #[validate(url(message = "invalid_url"))]
    pub website: Option<String>,
}

impl ClubProfileInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: blank_to_none(self.description),
            address: blank_to_none(self.address),
            phone: blank_to_none(self.phone),
            website: blank_to_none(self.website),
        }
    }

    pub fn into_club(self, user_id: Uuid) -> Club {
        let now = Utc::now();
        Club {
            id: Uuid::new_v4(),
            user_id,
            name: self.name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            website: self.website,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_to(self, club: &mut Club) {
        club.name = self.name;
        club.description = self.description;
        club.address = self.address;
        club.phone = self.phone;
        club.website = self.website;
        club.updated_at = Utc::now();
    }
}

// ---
// Exportação completa (Art. 15 e 20 DSGVO)
// ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub note: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubExport {
    pub export_info: ExportInfo,
    pub club: Club,
    pub members: Vec<Member>,
    pub contribution_types: Vec<ContributionType>,
    pub contributions: Vec<Contribution>,
}
