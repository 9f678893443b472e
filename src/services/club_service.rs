// src/services/club_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::{ClubStore, ContributionStore, ContributionTypeStore, MemberStore},
    models::{
        auth::CurrentUser,
        club::{Club, ClubExport, ClubProfileInput, ExportInfo},
    },
};

const EXPORT_NOTE: &str = "Vollständiger Datenexport gemäß Art. 15 und 20 DSGVO.";

#[derive(Clone)]
pub struct ClubService {
    clubs: Arc<dyn ClubStore>,
    members: Arc<dyn MemberStore>,
    types: Arc<dyn ContributionTypeStore>,
    contributions: Arc<dyn ContributionStore>,
}

impl ClubService {
    pub fn new(
        clubs: Arc<dyn ClubStore>,
        members: Arc<dyn MemberStore>,
        types: Arc<dyn ContributionTypeStore>,
        contributions: Arc<dyn ContributionStore>,
    ) -> Self {
        Self {
            clubs,
            members,
            types,
            contributions,
        }
    }

    /// Usado pelo middleware para resolver o clube da requisição.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Option<Club>, AppError> {
        self.clubs.find_by_owner(user_id).await
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Club, AppError> {
        self.find_for_user(user_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Club))
    }

    pub async fn create(&self, user_id: Uuid, input: ClubProfileInput) -> Result<Club, AppError> {
        let input = input.normalized();
        input.validate()?;

        if self.clubs.find_by_owner(user_id).await?.is_some() {
            return Err(AppError::Conflict(Conflict::ClubAlreadyExists));
        }

        let club = self.clubs.insert(&input.into_club(user_id)).await?;
        tracing::info!("🏟️ Clube '{}' criado para o usuário {}.", club.name, user_id);

        Ok(club)
    }

    pub async fn update(&self, user_id: Uuid, input: ClubProfileInput) -> Result<Club, AppError> {
        let input = input.normalized();
        input.validate()?;

        let mut club = self.get(user_id).await?;
        input.apply_to(&mut club);
        self.clubs.update(&club).await
    }

    pub async fn export(&self, user: &CurrentUser) -> Result<ClubExport, AppError> {
        let club = self.get(user.id).await?;

        let (members, contribution_types, contributions) = tokio::try_join!(
            self.members.list_by_club(club.id),
            self.types.list_by_club(club.id),
            self.contributions.list_for_club(club.id),
        )?;

        tracing::info!("📦 Exportação de dados do clube {} gerada.", club.id);

        Ok(ClubExport {
            export_info: ExportInfo {
                timestamp: Utc::now(),
                user_id: user.id,
                email: user.email.clone(),
                note: EXPORT_NOTE.to_string(),
            },
            club,
            members,
            contribution_types,
            contributions,
        })
    }

    /// Apaga o clube com tudo que é dele. Irreversível.
    pub async fn delete(&self, user_id: Uuid) -> Result<(), AppError> {
        let club = self.get(user_id).await?;
        self.clubs.delete_cascade(club.id).await?;

        tracing::warn!("🗑️ Clube {} do usuário {} foi apagado.", club.id, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::contribution::{AssignContributionPayload, ContributionInterval},
        services::{
            activity_log::ActivityLog,
            contribution_type_service::ContributionTypeService,
            ledger_service::LedgerService,
            member_service::MemberService,
            test_support::{date, new_member, store, type_input},
        },
    };

    fn profile(name: &str) -> ClubProfileInput {
        ClubProfileInput {
            name: name.into(),
            description: Some("  ".into()),
            address: None,
            phone: None,
            website: Some("https://tsv-musterstadt.de".into()),
        }
    }

    fn user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: Some("vorstand@tsv.de".into()),
        }
    }

    #[tokio::test]
    async fn one_club_per_user() {
        let (_, repos) = store();
        let service = ClubService::new(repos.clubs, repos.members, repos.contribution_types, repos.contributions);
        let owner = user();

        let club = service.create(owner.id, profile(" TSV Musterstadt ")).await.unwrap();
        assert_eq!(club.name, "TSV Musterstadt");
        assert_eq!(club.description, None);

        let err = service.create(owner.id, profile("Zweiter Verein")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Conflict::ClubAlreadyExists)));
    }

    #[tokio::test]
    async fn invalid_profile_is_rejected() {
        let (_, repos) = store();
        let service = ClubService::new(repos.clubs, repos.members, repos.contribution_types, repos.contributions);
        let owner = user();

        let mut input = profile("TSV");
        input.website = Some("kein link".into());
        assert!(matches!(service.create(owner.id, input).await, Err(AppError::ValidationError(_))));
        assert!(matches!(service.create(owner.id, profile("  ")).await, Err(AppError::ValidationError(_))));
        assert!(matches!(service.get(owner.id).await, Err(AppError::NotFound(Resource::Club))));
    }

    #[tokio::test]
    async fn update_replaces_profile() {
        let (_, repos) = store();
        let service = ClubService::new(repos.clubs, repos.members, repos.contribution_types, repos.contributions);
        let owner = user();
        let created = service.create(owner.id, profile("TSV")).await.unwrap();

        let mut input = profile("TSV Musterstadt e.V.");
        input.phone = Some("030 1234".into());
        let updated = service.update(owner.id, input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "TSV Musterstadt e.V.");
        assert_eq!(updated.phone.as_deref(), Some("030 1234"));
    }

    #[tokio::test]
    async fn export_and_delete_cover_everything_of_the_club() {
        let (store, repos) = store();
        let log = ActivityLog::new(repos.activities.clone());
        let members = MemberService::new(repos.members.clone(), log.clone());
        let types = ContributionTypeService::new(repos.contribution_types.clone());
        let ledger = LedgerService::new(
            repos.contributions.clone(),
            repos.members.clone(),
            repos.contribution_types.clone(),
            log,
        );
        let service = ClubService::new(repos.clubs, repos.members, repos.contribution_types, repos.contributions);

        let owner = user();
        let club = service.create(owner.id, profile("TSV")).await.unwrap();
        let max = members.create(club.id, new_member("Max", "Mustermann", "max@x.de")).await.unwrap();
        let kind = types
            .create(club.id, type_input("Jahresbeitrag", 6000, ContributionInterval::Annual, Some(1)))
            .await
            .unwrap();
        ledger
            .assign(
                club.id,
                AssignContributionPayload {
                    member_id: max.id,
                    contribution_type_id: kind.id,
                    due_date: date(2024, 1, 1),
                    notes: None,
                },
            )
            .await
            .unwrap();

        let export = service.export(&owner).await.unwrap();
        assert_eq!(export.club.id, club.id);
        assert_eq!(export.export_info.email.as_deref(), Some("vorstand@tsv.de"));
        assert_eq!(export.members.len(), 1);
        assert_eq!(export.contribution_types.len(), 1);
        assert_eq!(export.contributions.len(), 1);

        service.delete(owner.id).await.unwrap();

        assert_eq!(store.contribution_count(), 0);
        assert_eq!(store.activity_count(), 0);
        assert!(members.list(club.id, None).await.unwrap().is_empty());
        assert!(matches!(service.get(owner.id).await, Err(AppError::NotFound(Resource::Club))));

        // Depois de apagar, o usuário pode começar de novo
        service.create(owner.id, profile("TSV Neu")).await.unwrap();
    }
}
