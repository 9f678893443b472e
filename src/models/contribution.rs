// src/models/contribution.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, search::matches_any, serde_utils::blank_to_none};

// =========================================================================
//  TIPOS DE CONTRIBUIÇÃO (O Molde)
// =========================================================================

/// Maior valor que cabe em NUMERIC(12, 2).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contribution_interval", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContributionInterval {
    OneTime,    // einmalig
    Monthly,    // monatlich
    Quarterly,  // quartalsweise
    SemiAnnual, // halbjährlich
    Annual,     // jährlich
}

impl ContributionInterval {
    pub fn is_recurring(self) -> bool {
        self != ContributionInterval::OneTime
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionType {
    pub id: Uuid,

    #[schema(ignore)]
    pub club_id: Uuid,

    #[schema(example = "Mitgliedsbeitrag")]
    pub name: String,
    pub description: Option<String>,

    #[schema(value_type = f64, example = 12.5)]
    pub amount: Decimal,

    pub interval: ContributionInterval,

    // Dia do mês do vencimento (só para recorrentes)
    #[schema(example = 15)]
    pub due_day: Option<i32>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionTypeInput {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mitgliedsbeitrag")]
    pub name: String,

    pub description: Option<String>,

    #[schema(value_type = f64, example = 12.5)]
    pub amount: Decimal,

    pub interval: ContributionInterval,

    #[schema(example = 15)]
    pub due_day: Option<i32>,
}

impl ContributionTypeInput {
    /// Normaliza e aplica as regras do catálogo:
    /// - valor > 0, no máximo 2 casas decimais, até `MAX_AMOUNT`
    /// - "one_time" nunca tem dia de vencimento (é descartado, não rejeitado)
    /// - recorrente com dia informado: 1..=31
    pub fn validated(self) -> Result<Self, AppError> {
        let input = Self {
            name: self.name.trim().to_string(),
            description: blank_to_none(self.description),
            ..self
        };
        input.validate()?;

        if input.amount <= Decimal::ZERO {
            return Err(AppError::field("amount", "amount_not_positive"));
        }
        if input.amount.normalize().scale() > 2 {
            return Err(AppError::field("amount", "amount_precision"));
        }
        if input.amount > MAX_AMOUNT {
            return Err(AppError::field("amount", "amount_too_large"));
        }

        let due_day = if input.interval.is_recurring() {
            match input.due_day {
                Some(day) if !(1..=31).contains(&day) => {
                    return Err(AppError::field("due_day", "due_day_out_of_range"));
                }
                other => other,
            }
        } else {
            None
        };

        Ok(Self { due_day, ..input })
    }

    pub fn into_type(self, club_id: Uuid) -> ContributionType {
        let now = Utc::now();
        ContributionType {
            id: Uuid::new_v4(),
            club_id,
            name: self.name,
            description: self.description,
            amount: self.amount,
            interval: self.interval,
            due_day: self.due_day,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_to(self, existing: &mut ContributionType) {
        existing.name = self.name;
        existing.description = self.description;
        existing.amount = self.amount;
        existing.interval = self.interval;
        existing.due_day = self.due_day;
        existing.updated_at = Utc::now();
    }
}

// =========================================================================
//  LANÇAMENTOS (O Livro-Caixa)
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contribution_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Open,    // offen
    Paid,    // bezahlt
    Overdue, // überfällig
    Waived,  // erlassen
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContributionStatus::Open => "open",
            ContributionStatus::Paid => "paid",
            ContributionStatus::Overdue => "overdue",
            ContributionStatus::Waived => "waived",
        };
        f.write_str(name)
    }
}

impl ContributionStatus {
    /// Ainda conta como "a receber" no dashboard.
    pub fn is_outstanding(self) -> bool {
        matches!(self, ContributionStatus::Open | ContributionStatus::Overdue)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ContributionStatus::Paid | ContributionStatus::Waived)
    }

    /// Máquina de estados do lançamento.
    /// `Ok(None)` = nada muda (repetir uma transição já feita não é erro).
    pub fn transition(self, to: ContributionStatus) -> Result<Option<ContributionStatus>, AppError> {
        use ContributionStatus::*;

        match (self, to) {
            (from, to) if from == to => Ok(None),
            (from, to) if from.is_terminal() => Err(AppError::InvalidTransition { from, to }),
            (Open, Paid | Waived | Overdue) => Ok(Some(to)),
            (Overdue, Paid | Waived) => Ok(Some(to)),
            (from, to) => Err(AppError::InvalidTransition { from, to }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: Uuid,
    pub member_id: Uuid,

    // Sem FK: o lançamento sobrevive à exclusão do tipo
    pub contribution_type_id: Uuid,

    // Snapshot do nome do tipo no momento da atribuição
    #[schema(example = "Mitgliedsbeitrag")]
    pub description: String,

    // Snapshot do valor do tipo no momento da atribuição
    #[schema(value_type = f64, example = 12.5)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub due_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-10")]
    pub paid_date: Option<NaiveDate>,

    pub status: ContributionStatus,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    pub fn assign(
        member_id: Uuid,
        contribution_type: &ContributionType,
        due_date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            member_id,
            contribution_type_id: contribution_type.id,
            description: contribution_type.name.clone(),
            amount: contribution_type.amount,
            due_date,
            paid_date: None,
            status: ContributionStatus::Open,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lançamento com os dados do membro e do tipo (JOIN).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entry: Contribution,

    pub member_first_name: String,
    pub member_last_name: String,

    // None quando o tipo já foi excluído
    pub contribution_type_name: Option<String>,
}

impl ContributionRow {
    pub fn type_name(&self) -> &str {
        self.contribution_type_name
            .as_deref()
            .unwrap_or(&self.entry.description)
    }

    pub fn matches(&self, needle: &str) -> bool {
        matches_any(
            needle,
            &[&self.member_first_name, &self.member_last_name, self.type_name()],
        )
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignContributionPayload {
    pub member_id: Uuid,
    pub contribution_type_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

// Cards do topo da tela de lançamentos
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total: usize,
    pub open: usize,
    pub paid: usize,
    pub overdue: usize,
    pub waived: usize,

    #[schema(value_type = f64, example = 120.0)]
    pub total_amount: Decimal,
    // Só "open"; atrasados ficam na contagem de overdue
    #[schema(value_type = f64, example = 40.0)]
    pub open_amount: Decimal,
    /// Pagos / total em %, uma casa decimal. 0 com livro vazio.
    #[schema(value_type = f64, example = 66.7)]
    pub payment_rate: Decimal,
}

impl LedgerSummary {
    pub fn compute(entries: &[Contribution]) -> Self {
        let count = |status: ContributionStatus| entries.iter().filter(|c| c.status == status).count();
        let total = entries.len();
        let paid = count(ContributionStatus::Paid);

        let payment_rate = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(paid) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(1)
        };

        Self {
            total,
            open: count(ContributionStatus::Open),
            paid,
            overdue: count(ContributionStatus::Overdue),
            waived: count(ContributionStatus::Waived),
            total_amount: entries.iter().map(|c| c.amount).sum(),
            open_amount: entries
                .iter()
                .filter(|c| c.status == ContributionStatus::Open)
                .map(|c| c.amount)
                .sum(),
            payment_rate,
        }
    }
}
