// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    activity::Activity,
    contribution::Contribution,
    member::{Member, MemberStatus},
};

/// Quantas atividades aparecem no feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

// Os cards do topo + feed de atividades
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub inactive_members: usize,
    pub withdrawn_members: usize,

    // Lançamentos "open" + "overdue"
    pub outstanding_contributions: usize,
    #[schema(value_type = f64, example = 15.0)]
    pub total_outstanding_amount: Decimal,

    pub recent_activities: Vec<Activity>,
}

impl DashboardStats {
    /// Projeção pura: recalculada inteira a cada requisição.
    pub fn compute(members: &[Member], contributions: &[Contribution], mut activities: Vec<Activity>) -> Self {
        let count = |status: MemberStatus| members.iter().filter(|m| m.status == status).count();

        let outstanding: Vec<&Contribution> = contributions
            .iter()
            .filter(|c| c.status.is_outstanding())
            .collect();

        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        activities.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total_members: members.len(),
            active_members: count(MemberStatus::Active),
            inactive_members: count(MemberStatus::Inactive),
            withdrawn_members: count(MemberStatus::Withdrawn),
            outstanding_contributions: outstanding.len(),
            total_outstanding_amount: outstanding.iter().map(|c| c.amount).sum(),
            recent_activities: activities,
        }
    }
}
