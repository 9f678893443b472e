// src/services/ledger_service.rs

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{
        error::{AppError, Resource},
        search::normalize_search,
        serde_utils::blank_to_none,
    },
    db::{ContributionStore, ContributionTypeStore, MemberStore},
    models::{
        activity::Activity,
        contribution::{AssignContributionPayload, Contribution, ContributionRow, ContributionStatus, LedgerSummary},
        member::Member,
    },
    services::{activity_log::ActivityLog, ensure_same_club},
};

// O livro de lançamentos: atribuição, pagamento, perdão e o job de atraso.
#[derive(Clone)]
pub struct LedgerService {
    contributions: Arc<dyn ContributionStore>,
    members: Arc<dyn MemberStore>,
    types: Arc<dyn ContributionTypeStore>,
    activities: ActivityLog,
}

impl LedgerService {
    pub fn new(
        contributions: Arc<dyn ContributionStore>,
        members: Arc<dyn MemberStore>,
        types: Arc<dyn ContributionTypeStore>,
        activities: ActivityLog,
    ) -> Self {
        Self {
            contributions,
            members,
            types,
            activities,
        }
    }

    async fn member_in_club(&self, club_id: Uuid, member_id: Uuid) -> Result<Member, AppError> {
        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Member))?;

        ensure_same_club(club_id, member.club_id)?;
        Ok(member)
    }

    /// O lançamento é do clube do membro dono dele.
    async fn entry_in_club(&self, club_id: Uuid, entry_id: Uuid) -> Result<(Contribution, Member), AppError> {
        let entry = self
            .contributions
            .find_by_id(entry_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Contribution))?;

        let member = self.member_in_club(club_id, entry.member_id).await?;
        Ok((entry, member))
    }

    pub async fn assign(&self, club_id: Uuid, payload: AssignContributionPayload) -> Result<Contribution, AppError> {
        let member = self.member_in_club(club_id, payload.member_id).await?;

        let contribution_type = self
            .types
            .find_by_id(payload.contribution_type_id)
            .await?
            .ok_or(AppError::NotFound(Resource::ContributionType))?;
        ensure_same_club(club_id, contribution_type.club_id)?;

        let notes = blank_to_none(payload.notes);
        let entry = Contribution::assign(member.id, &contribution_type, payload.due_date, notes);
        let entry = self.contributions.insert(&entry).await?;

        self.activities
            .record(Activity::contribution_added(&member, &entry))
            .await;
        tracing::info!(
            "🧾 Lançamento {} ({} €) atribuído ao membro {}.",
            entry.id,
            entry.amount,
            member.id
        );

        Ok(entry)
    }

    /// Aplica a transição com o status lido como condição do UPDATE.
    /// Se outra requisição (ou o job de atraso) mudou o lançamento no meio,
    /// relê e reavalia a partir do status novo. O `bool` diz se houve mudança.
    async fn move_entry(
        &self,
        mut entry: Contribution,
        target: ContributionStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<(Contribution, bool), AppError> {
        loop {
            let Some(status) = entry.status.transition(target)? else {
                return Ok((entry, false));
            };

            if let Some(updated) = self
                .contributions
                .update_status(entry.id, entry.status, status, paid_date)
                .await?
            {
                return Ok((updated, true));
            }

            tracing::debug!("🔁 Lançamento {} mudou durante a transição, relendo.", entry.id);
            entry = self
                .contributions
                .find_by_id(entry.id)
                .await?
                .ok_or(AppError::NotFound(Resource::Contribution))?;
        }
    }

    /// Repetir o pagamento devolve o lançamento como está (data original preservada).
    pub async fn mark_paid(&self, club_id: Uuid, entry_id: Uuid) -> Result<Contribution, AppError> {
        let (entry, member) = self.entry_in_club(club_id, entry_id).await?;

        let (paid, changed) = self
            .move_entry(entry, ContributionStatus::Paid, Some(Utc::now().date_naive()))
            .await?;

        if changed {
            self.activities
                .record(Activity::contribution_paid(&member, &paid))
                .await;
        }

        Ok(paid)
    }

    pub async fn waive(&self, club_id: Uuid, entry_id: Uuid) -> Result<Contribution, AppError> {
        let (entry, _) = self.entry_in_club(club_id, entry_id).await?;

        let (waived, _) = self.move_entry(entry, ContributionStatus::Waived, None).await?;
        Ok(waived)
    }

    /// Totais do livro do clube, calculados na hora.
    pub async fn summary(&self, club_id: Uuid) -> Result<LedgerSummary, AppError> {
        let entries = self.contributions.list_for_club(club_id).await?;
        Ok(LedgerSummary::compute(&entries))
    }

    pub async fn list_for_club(&self, club_id: Uuid, search: Option<&str>) -> Result<Vec<ContributionRow>, AppError> {
        let rows = self.contributions.list_rows_for_club(club_id).await?;

        Ok(match normalize_search(search) {
            Some(needle) => rows.into_iter().filter(|r| r.matches(&needle)).collect(),
            None => rows,
        })
    }

    /// Job periódico: open com vencimento passado vira overdue.
    pub async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, AppError> {
        let changed = self.contributions.mark_overdue(today).await?;
        if changed > 0 {
            tracing::info!("⏰ {} lançamento(s) marcados como atrasados.", changed);
        }
        Ok(changed)
    }
}
