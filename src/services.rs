pub mod activity_log;
pub mod auth;
pub mod club_service;
pub mod contribution_type_service;
pub mod dashboard_service;
pub mod ledger_service;
pub mod member_service;

use uuid::Uuid;

use crate::common::error::AppError;

/// Registro de outro clube: existe, mas não é seu.
pub(crate) fn ensure_same_club(acting_club: Uuid, owner_club: Uuid) -> Result<(), AppError> {
    if acting_club == owner_club {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        db::{memory::MemoryStore, Repositories},
        models::{
            contribution::{ContributionInterval, ContributionTypeInput},
            member::NewMember,
        },
    };

    pub fn store() -> (Arc<MemoryStore>, Repositories) {
        MemoryStore::repositories()
    }

    pub fn new_member(first: &str, last: &str, email: &str) -> NewMember {
        NewMember {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone: None,
            address: None,
            birth_date: None,
            join_date: None,
            role: None,
        }
    }

    pub fn type_input(name: &str, amount_cents: i64, interval: ContributionInterval, due_day: Option<i32>) -> ContributionTypeInput {
        ContributionTypeInput {
            name: name.into(),
            description: None,
            amount: Decimal::new(amount_cents, 2),
            interval,
            due_day,
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn club_id() -> Uuid {
        Uuid::new_v4()
    }
}
