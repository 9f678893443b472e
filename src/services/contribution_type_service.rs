// src/services/contribution_type_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::ContributionTypeStore,
    models::contribution::{ContributionType, ContributionTypeInput},
    services::ensure_same_club,
};

#[derive(Clone)]
pub struct ContributionTypeService {
    types: Arc<dyn ContributionTypeStore>,
}

impl ContributionTypeService {
    pub fn new(types: Arc<dyn ContributionTypeStore>) -> Self {
        Self { types }
    }

    pub async fn get(&self, club_id: Uuid, type_id: Uuid) -> Result<ContributionType, AppError> {
        let found = self
            .types
            .find_by_id(type_id)
            .await?
            .ok_or(AppError::NotFound(Resource::ContributionType))?;

        ensure_same_club(club_id, found.club_id)?;
        Ok(found)
    }

    pub async fn list(&self, club_id: Uuid) -> Result<Vec<ContributionType>, AppError> {
        self.types.list_by_club(club_id).await
    }

    pub async fn create(&self, club_id: Uuid, input: ContributionTypeInput) -> Result<ContributionType, AppError> {
        let input = input.validated()?;

        if self.types.find_by_name(club_id, &input.name).await?.is_some() {
            return Err(AppError::Conflict(Conflict::ContributionTypeName));
        }

        let created = self.types.insert(&input.into_type(club_id)).await?;
        tracing::info!("💶 Tipo de contribuição '{}' criado no clube {}.", created.name, club_id);

        Ok(created)
    }

    /// Não mexe nos lançamentos já atribuídos: eles guardam o valor da época.
    pub async fn update(
        &self,
        club_id: Uuid,
        type_id: Uuid,
        input: ContributionTypeInput,
    ) -> Result<ContributionType, AppError> {
        let input = input.validated()?;
        let mut existing = self.get(club_id, type_id).await?;

        if input.name != existing.name {
            if let Some(other) = self.types.find_by_name(club_id, &input.name).await? {
                if other.id != existing.id {
                    return Err(AppError::Conflict(Conflict::ContributionTypeName));
                }
            }
        }

        input.apply_to(&mut existing);
        self.types.update(&existing).await
    }

    pub async fn delete(&self, club_id: Uuid, type_id: Uuid) -> Result<(), AppError> {
        self.get(club_id, type_id).await?;

        if !self.types.delete(type_id).await? {
            return Err(AppError::NotFound(Resource::ContributionType));
        }
        tracing::info!("🗑️ Tipo de contribuição {} removido.", type_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        models::contribution::ContributionInterval,
        services::test_support::{club_id, store, type_input},
    };

    fn service() -> ContributionTypeService {
        let (_, repos) = store();
        ContributionTypeService::new(repos.contribution_types)
    }

    #[tokio::test]
    async fn create_stores_validated_type() {
        let service = service();
        let club = club_id();

        let created = service
            .create(club, type_input(" Jahresbeitrag ", 6000, ContributionInterval::Annual, Some(1)))
            .await
            .unwrap();

        assert_eq!(created.name, "Jahresbeitrag");
        assert_eq!(created.amount, Decimal::new(6000, 2));
        assert_eq!(service.list(club).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn one_time_type_never_keeps_due_day() {
        let service = service();
        let created = service
            .create(club_id(), type_input("Aufnahmegebühr", 2500, ContributionInterval::OneTime, Some(15)))
            .await
            .unwrap();

        assert_eq!(created.due_day, None);
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_and_nothing_stored() {
        let service = service();
        let club = club_id();

        let err = service
            .create(club, type_input("Gratis", 0, ContributionInterval::Monthly, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(service.list(club).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_in_club_conflicts() {
        let service = service();
        let club = club_id();

        service
            .create(club, type_input("Jahresbeitrag", 6000, ContributionInterval::Annual, None))
            .await
            .unwrap();
        let err = service
            .create(club, type_input("Jahresbeitrag", 3000, ContributionInterval::Annual, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(Conflict::ContributionTypeName)));

        // Outro clube pode usar o mesmo nome
        service
            .create(club_id(), type_input("Jahresbeitrag", 3000, ContributionInterval::Annual, None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identity() {
        let service = service();
        let club = club_id();
        let created = service
            .create(club, type_input("Monatsbeitrag", 1000, ContributionInterval::Monthly, Some(1)))
            .await
            .unwrap();

        let updated = service
            .update(club, created.id, type_input("Monatsbeitrag", 1250, ContributionInterval::Monthly, Some(15)))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, Decimal::new(1250, 2));
        assert_eq!(updated.due_day, Some(15));
    }

    #[tokio::test]
    async fn update_to_existing_name_conflicts() {
        let service = service();
        let club = club_id();
        service
            .create(club, type_input("A", 1000, ContributionInterval::Monthly, None))
            .await
            .unwrap();
        let b = service
            .create(club, type_input("B", 1000, ContributionInterval::Monthly, None))
            .await
            .unwrap();

        let err = service
            .update(club, b.id, type_input("A", 1000, ContributionInterval::Monthly, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(Conflict::ContributionTypeName)));
    }

    #[tokio::test]
    async fn foreign_or_missing_types_are_refused() {
        let service = service();
        let created = service
            .create(club_id(), type_input("A", 1000, ContributionInterval::Monthly, None))
            .await
            .unwrap();

        assert!(matches!(service.delete(club_id(), created.id).await, Err(AppError::Forbidden)));
        assert!(matches!(
            service.delete(club_id(), Uuid::new_v4()).await,
            Err(AppError::NotFound(Resource::ContributionType))
        ));
    }
}
