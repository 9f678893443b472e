// src/services/dashboard_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityStore, ContributionStore, MemberStore},
    models::dashboard::{DashboardStats, RECENT_ACTIVITY_LIMIT},
};

#[derive(Clone)]
pub struct DashboardService {
    members: Arc<dyn MemberStore>,
    contributions: Arc<dyn ContributionStore>,
    activities: Arc<dyn ActivityStore>,
}

impl DashboardService {
    pub fn new(
        members: Arc<dyn MemberStore>,
        contributions: Arc<dyn ContributionStore>,
        activities: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            members,
            contributions,
            activities,
        }
    }

    // Sem cache: as três leituras são independentes, então rodam juntas
    pub async fn get_stats(&self, club_id: Uuid) -> Result<DashboardStats, AppError> {
        let (members, outstanding, activities) = tokio::try_join!(
            self.members.list_by_club(club_id),
            self.contributions.list_outstanding_for_club(club_id),
            self.activities.recent(club_id, RECENT_ACTIVITY_LIMIT as i64),
        )?;

        Ok(DashboardStats::compute(&members, &outstanding, activities))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        models::{
            contribution::{AssignContributionPayload, ContributionInterval},
            member::MemberStatus,
        },
        services::{
            activity_log::ActivityLog,
            contribution_type_service::ContributionTypeService,
            ledger_service::LedgerService,
            member_service::MemberService,
            test_support::{club_id, date, new_member, store, type_input},
        },
    };

    #[tokio::test]
    async fn empty_club_has_zeroed_stats() {
        let (_, repos) = store();
        let dashboard = DashboardService::new(repos.members, repos.contributions, repos.activities);

        let stats = dashboard.get_stats(club_id()).await.unwrap();

        assert_eq!(stats.total_members, 0);
        assert_eq!(stats.outstanding_contributions, 0);
        assert_eq!(stats.total_outstanding_amount, Decimal::ZERO);
        assert!(stats.recent_activities.is_empty());
    }

    #[tokio::test]
    async fn stats_reflect_members_ledger_and_feed() {
        let (_, repos) = store();
        let log = ActivityLog::new(repos.activities.clone());
        let members = MemberService::new(repos.members.clone(), log.clone());
        let types = ContributionTypeService::new(repos.contribution_types.clone());
        let ledger = LedgerService::new(
            repos.contributions.clone(),
            repos.members.clone(),
            repos.contribution_types.clone(),
            log,
        );
        let dashboard = DashboardService::new(repos.members, repos.contributions, repos.activities);

        let club = club_id();
        let alice = members.create(club, new_member("Alice", "A", "alice@x.de")).await.unwrap();
        let bob = members.create(club, new_member("Bob", "B", "bob@x.de")).await.unwrap();
        members.set_status(club, bob.id, MemberStatus::Inactive).await.unwrap();

        let mut entries = Vec::new();
        for (name, cents) in [("Zehn", 1000), ("Zwanzig", 2000), ("Fünf", 500)] {
            let kind = types
                .create(club, type_input(name, cents, ContributionInterval::OneTime, None))
                .await
                .unwrap();
            let entry = ledger
                .assign(
                    club,
                    AssignContributionPayload {
                        member_id: alice.id,
                        contribution_type_id: kind.id,
                        due_date: date(2024, 1, 1),
                        notes: None,
                    },
                )
                .await
                .unwrap();
            entries.push(entry);
        }
        ledger.mark_paid(club, entries[1].id).await.unwrap();
        ledger.mark_overdue(date(2024, 2, 1)).await.unwrap();

        // Outro clube não entra na conta
        members.create(club_id(), new_member("Eve", "E", "eve@x.de")).await.unwrap();

        let stats = dashboard.get_stats(club).await.unwrap();

        assert_eq!(stats.total_members, 2);
        assert_eq!(stats.active_members, 1);
        assert_eq!(stats.inactive_members, 1);
        assert_eq!(stats.withdrawn_members, 0);
        assert_eq!(stats.outstanding_contributions, 2);
        assert_eq!(stats.total_outstanding_amount, Decimal::new(1500, 2));
        assert_eq!(stats.recent_activities.len(), RECENT_ACTIVITY_LIMIT);
        assert!(stats.recent_activities.iter().all(|a| a.club_id == club));
    }
}
