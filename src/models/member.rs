// src/models/member.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    search::matches_any,
    serde_utils::{blank_to_none, double_option},
};

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[default]
    Member,    // Mitglied
    Board,     // Vorstand
    Treasurer, // Kassier
    Secretary, // Schriftführer
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Withdrawn, // ausgetreten
}

// --- MEMBRO ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,

    #[schema(ignore)]
    pub club_id: Uuid,

    #[schema(example = "Max")]
    pub first_name: String,
    #[schema(example = "Mustermann")]
    pub last_name: String,

    // Sempre gravado em minúsculas: a unicidade é por clube
    #[schema(example = "max@example.de")]
    pub email: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1985-04-12")]
    pub birth_date: Option<NaiveDate>,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub join_date: NaiveDate,

    pub role: MemberRole,
    pub status: MemberStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `needle` já deve vir normalizado (ver `common::search::normalize_search`).
    pub fn matches(&self, needle: &str) -> bool {
        matches_any(needle, &[&self.first_name, &self.last_name, &self.email])
    }
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Max")]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mustermann")]
    pub last_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "max@example.de")]
    pub email: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1985-04-12")]
    pub birth_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-01")]
    pub join_date: Option<NaiveDate>,

    pub role: Option<MemberRole>,
}

impl NewMember {
    /// Trim em tudo, e-mail em minúsculas, opcionais vazios viram None.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: blank_to_none(self.phone),
            address: blank_to_none(self.address),
            ..self
        }
    }

    pub fn into_member(self, club_id: Uuid, today: NaiveDate) -> Member {
        let now = Utc::now();
        Member {
            id: Uuid::new_v4(),
            club_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            birth_date: self.birth_date,
            join_date: self.join_date.unwrap_or(today),
            role: self.role.unwrap_or_default(),
            status: MemberStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update parcial: campo ausente = mantém; `null` nos opcionais = apaga.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberChanges {
    #[validate(length(min = 1, message = "required"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Option<NaiveDate>>,

    #[schema(value_type = Option<String>, format = Date)]
    pub join_date: Option<NaiveDate>,

    pub role: Option<MemberRole>,
    pub status: Option<MemberStatus>,
}

impl MemberChanges {
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.map(|v| v.trim().to_string()),
            last_name: self.last_name.map(|v| v.trim().to_string()),
            email: self.email.map(|v| v.trim().to_lowercase()),
            phone: self.phone.map(blank_to_none),
            address: self.address.map(blank_to_none),
            ..self
        }
    }

    pub fn apply_to(self, member: &mut Member) {
        if let Some(first_name) = self.first_name {
            member.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            member.last_name = last_name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(phone) = self.phone {
            member.phone = phone;
        }
        if let Some(address) = self.address {
            member.address = address;
        }
        if let Some(birth_date) = self.birth_date {
            member.birth_date = birth_date;
        }
        if let Some(join_date) = self.join_date {
            member.join_date = join_date;
        }
        if let Some(role) = self.role {
            member.role = role;
        }
        if let Some(status) = self.status {
            member.status = status;
        }
        member.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
    pub status: MemberStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_member() -> NewMember {
        NewMember {
            first_name: "  Max ".into(),
            last_name: "Mustermann".into(),
            email: " Max@X.de ".into(),
            phone: Some("   ".into()),
            address: None,
            birth_date: None,
            join_date: None,
            role: None,
        }
    }

    #[test]
    fn new_member_defaults_role_status_and_join_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let member = new_member().normalized().into_member(Uuid::new_v4(), today);

        assert_eq!(member.first_name, "Max");
        assert_eq!(member.email, "max@x.de");
        assert_eq!(member.phone, None);
        assert_eq!(member.role, MemberRole::Member);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.join_date, today);
    }

    #[test]
    fn normalized_blank_names_fail_validation() {
        let mut payload = new_member();
        payload.first_name = "   ".into();
        let errors = payload.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn malformed_email_fails_validation() {
        let mut payload = new_member();
        payload.email = "kein-email".into();
        assert!(payload.normalized().validate().is_err());
    }

    #[test]
    fn changes_keep_absent_fields_and_clear_nulls() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut member = new_member().normalized().into_member(Uuid::new_v4(), today);
        member.phone = Some("030 1234".into());
        member.address = Some("Hauptstr. 1".into());

        let changes: MemberChanges =
            serde_json::from_str(r#"{"lastName": " Musterfrau ", "phone": null}"#).unwrap();
        changes.normalized().apply_to(&mut member);

        assert_eq!(member.first_name, "Max");
        assert_eq!(member.last_name, "Musterfrau");
        assert_eq!(member.phone, None);
        assert_eq!(member.address.as_deref(), Some("Hauptstr. 1"));
    }

    #[test]
    fn matches_first_last_or_email() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let member = new_member().normalized().into_member(Uuid::new_v4(), today);

        assert!(member.matches("mus"));
        assert!(member.matches("max@"));
        assert!(!member.matches("schmidt"));
    }
}
