// src/db/memory.rs
//
// Implementação em memória dos repositórios, para os testes dos serviços.
// Reproduz as mesmas restrições do schema (unicidade por clube, cascatas).

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Conflict, Resource},
    db::{ActivityStore, ClubStore, ContributionStore, ContributionTypeStore, MemberStore, Repositories},
    models::{
        activity::Activity,
        club::Club,
        contribution::{Contribution, ContributionRow, ContributionStatus, ContributionType},
        member::Member,
    },
};

#[derive(Default)]
struct Tables {
    clubs: Vec<Club>,
    members: Vec<Member>,
    contribution_types: Vec<ContributionType>,
    contributions: Vec<Contribution>,
    activities: Vec<Activity>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn repositories() -> (Arc<MemoryStore>, Repositories) {
        let store = Arc::new(MemoryStore::default());
        let repos = Repositories {
            clubs: store.clone(),
            members: store.clone(),
            contribution_types: store.clone(),
            contributions: store.clone(),
            activities: store.clone(),
        };
        (store, repos)
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn contribution_count(&self) -> usize {
        self.lock().contributions.len()
    }

    pub fn activity_count(&self) -> usize {
        self.lock().activities.len()
    }
}

impl Tables {
    fn club_of_member(&self, member_id: Uuid) -> Option<Uuid> {
        self.members.iter().find(|m| m.id == member_id).map(|m| m.club_id)
    }
}

#[async_trait]
impl ClubStore for MemoryStore {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Club>, AppError> {
        Ok(self.lock().clubs.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn insert(&self, club: &Club) -> Result<Club, AppError> {
        let mut tables = self.lock();
        if tables.clubs.iter().any(|c| c.user_id == club.user_id) {
            return Err(AppError::Conflict(Conflict::ClubAlreadyExists));
        }
        tables.clubs.push(club.clone());
        Ok(club.clone())
    }

    async fn update(&self, club: &Club) -> Result<Club, AppError> {
        let mut tables = self.lock();
        let slot = tables
            .clubs
            .iter_mut()
            .find(|c| c.id == club.id)
            .ok_or(AppError::NotFound(Resource::Club))?;
        *slot = club.clone();
        Ok(club.clone())
    }

    async fn delete_cascade(&self, club_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.lock();
        if !tables.clubs.iter().any(|c| c.id == club_id) {
            return Err(AppError::NotFound(Resource::Club));
        }
        let member_ids: Vec<Uuid> = tables
            .members
            .iter()
            .filter(|m| m.club_id == club_id)
            .map(|m| m.id)
            .collect();
        tables.contributions.retain(|c| !member_ids.contains(&c.member_id));
        tables.members.retain(|m| m.club_id != club_id);
        tables.contribution_types.retain(|t| t.club_id != club_id);
        tables.activities.retain(|a| a.club_id != club_id);
        tables.clubs.retain(|c| c.id != club_id);
        Ok(())
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError> {
        Ok(self.lock().members.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_email(&self, club_id: Uuid, email: &str) -> Result<Option<Member>, AppError> {
        Ok(self
            .lock()
            .members
            .iter()
            .find(|m| m.club_id == club_id && m.email == email)
            .cloned())
    }

    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<Member>, AppError> {
        let mut members: Vec<Member> = self
            .lock()
            .members
            .iter()
            .filter(|m| m.club_id == club_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(members)
    }

    async fn insert(&self, member: &Member) -> Result<Member, AppError> {
        let mut tables = self.lock();
        if tables
            .members
            .iter()
            .any(|m| m.club_id == member.club_id && m.email == member.email)
        {
            return Err(AppError::Conflict(Conflict::MemberEmail));
        }
        tables.members.push(member.clone());
        Ok(member.clone())
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        let mut tables = self.lock();
        if tables
            .members
            .iter()
            .any(|m| m.id != member.id && m.club_id == member.club_id && m.email == member.email)
        {
            return Err(AppError::Conflict(Conflict::MemberEmail));
        }
        let slot = tables
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(AppError::NotFound(Resource::Member))?;
        *slot = member.clone();
        Ok(member.clone())
    }

    async fn delete_with_contributions(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.members.len();
        tables.members.retain(|m| m.id != id);
        if tables.members.len() == before {
            return Ok(false);
        }
        tables.contributions.retain(|c| c.member_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ContributionTypeStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContributionType>, AppError> {
        Ok(self.lock().contribution_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, club_id: Uuid, name: &str) -> Result<Option<ContributionType>, AppError> {
        Ok(self
            .lock()
            .contribution_types
            .iter()
            .find(|t| t.club_id == club_id && t.name == name)
            .cloned())
    }

    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<ContributionType>, AppError> {
        let mut types: Vec<ContributionType> = self
            .lock()
            .contribution_types
            .iter()
            .filter(|t| t.club_id == club_id)
            .cloned()
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn insert(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError> {
        let mut tables = self.lock();
        if tables
            .contribution_types
            .iter()
            .any(|t| t.club_id == contribution_type.club_id && t.name == contribution_type.name)
        {
            return Err(AppError::Conflict(Conflict::ContributionTypeName));
        }
        tables.contribution_types.push(contribution_type.clone());
        Ok(contribution_type.clone())
    }

    async fn update(&self, contribution_type: &ContributionType) -> Result<ContributionType, AppError> {
        let mut tables = self.lock();
        if tables.contribution_types.iter().any(|t| {
            t.id != contribution_type.id
                && t.club_id == contribution_type.club_id
                && t.name == contribution_type.name
        }) {
            return Err(AppError::Conflict(Conflict::ContributionTypeName));
        }
        let slot = tables
            .contribution_types
            .iter_mut()
            .find(|t| t.id == contribution_type.id)
            .ok_or(AppError::NotFound(Resource::ContributionType))?;
        *slot = contribution_type.clone();
        Ok(contribution_type.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.contribution_types.len();
        tables.contribution_types.retain(|t| t.id != id);
        Ok(tables.contribution_types.len() < before)
    }
}

#[async_trait]
impl ContributionStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contribution>, AppError> {
        Ok(self.lock().contributions.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, contribution: &Contribution) -> Result<Contribution, AppError> {
        self.lock().contributions.push(contribution.clone());
        Ok(contribution.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: ContributionStatus,
        status: ContributionStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Contribution>, AppError> {
        let mut tables = self.lock();
        let found = tables.contributions.iter_mut().find(|c| c.id == id && c.status == expected);
        Ok(found.map(|c| {
            c.status = status;
            c.paid_date = paid_date;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn list_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError> {
        let tables = self.lock();
        Ok(tables
            .contributions
            .iter()
            .filter(|c| tables.club_of_member(c.member_id) == Some(club_id))
            .cloned()
            .collect())
    }

    async fn list_rows_for_club(&self, club_id: Uuid) -> Result<Vec<ContributionRow>, AppError> {
        let tables = self.lock();
        let mut rows: Vec<ContributionRow> = tables
            .contributions
            .iter()
            .filter_map(|c| {
                let member = tables
                    .members
                    .iter()
                    .find(|m| m.id == c.member_id && m.club_id == club_id)?;
                let type_name = tables
                    .contribution_types
                    .iter()
                    .find(|t| t.id == c.contribution_type_id)
                    .map(|t| t.name.clone());
                Some(ContributionRow {
                    entry: c.clone(),
                    member_first_name: member.first_name.clone(),
                    member_last_name: member.last_name.clone(),
                    contribution_type_name: type_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.entry.due_date.cmp(&a.entry.due_date));
        Ok(rows)
    }

    async fn list_outstanding_for_club(&self, club_id: Uuid) -> Result<Vec<Contribution>, AppError> {
        let tables = self.lock();
        Ok(tables
            .contributions
            .iter()
            .filter(|c| c.status.is_outstanding() && tables.club_of_member(c.member_id) == Some(club_id))
            .cloned()
            .collect())
    }

    async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, AppError> {
        let mut tables = self.lock();
        let mut changed = 0;
        for entry in tables
            .contributions
            .iter_mut()
            .filter(|c| c.status == ContributionStatus::Open && c.due_date < today)
        {
            entry.status = ContributionStatus::Overdue;
            entry.updated_at = Utc::now();
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn append(&self, activity: &Activity) -> Result<(), AppError> {
        self.lock().activities.push(activity.clone());
        Ok(())
    }

    async fn recent(&self, club_id: Uuid, limit: i64) -> Result<Vec<Activity>, AppError> {
        let mut activities: Vec<Activity> = self
            .lock()
            .activities
            .iter()
            .filter(|a| a.club_id == club_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        activities.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(activities)
    }
}
