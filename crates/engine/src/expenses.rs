//! Expense records.
//!
//! An [`Expense`] is an immutable historical fact: someone paid `amount` for
//! a group of participants. Balances and settlements are always derived from
//! the full set of expenses, nothing else is stored.
//!
//! Participants live in their own table (see
//! [`expense_participants`](crate::expense_participants)); `position` keeps
//! the order they were given in.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, PersonId, ResultEngine, expense_participants, util::parse_uuid,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: MoneyCents,
    pub description: String,
    pub payer: PersonId,
    /// Never empty and always contains `payer`.
    pub participants: Vec<PersonId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Build a new expense, enforcing the record invariants.
    ///
    /// Participants are de-duplicated keeping the first occurrence and the
    /// payer is appended when missing.
    pub fn new(
        amount: MoneyCents,
        description: &str,
        payer: PersonId,
        participants: Vec<PersonId>,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let mut expense = Self {
            id: Uuid::new_v4(),
            amount: MoneyCents::ZERO,
            description: String::new(),
            payer,
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        expense.set_amount(amount)?;
        expense.set_description(description)?;
        expense.set_participants(participants);
        Ok(expense)
    }

    pub(crate) fn set_amount(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        self.amount = amount;
        Ok(())
    }

    pub(crate) fn set_description(&mut self, description: &str) -> ResultEngine<()> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidName(
                "description must not be empty".to_string(),
            ));
        }
        self.description = trimmed.to_string();
        Ok(())
    }

    pub(crate) fn set_participants(&mut self, participants: Vec<PersonId>) {
        let mut unique: Vec<PersonId> = Vec::with_capacity(participants.len() + 1);
        for person in participants {
            if !unique.contains(&person) {
                unique.push(person);
            }
        }
        if !unique.contains(&self.payer) {
            unique.push(self.payer.clone());
        }
        self.participants = unique;
    }

    /// Rebuild an expense from its row and its participant rows.
    pub(crate) fn from_models(
        model: Model,
        mut participants: Vec<expense_participants::Model>,
    ) -> ResultEngine<Self> {
        participants.sort_by_key(|p| p.position);
        let participants = participants
            .iter()
            .map(|p| PersonId::parse(&p.person))
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            amount: MoneyCents::new(model.amount_minor),
            description: model.description,
            payer: PersonId::parse(&model.payer)?,
            participants,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    pub(crate) fn participant_models(&self) -> Vec<expense_participants::ActiveModel> {
        self.participants
            .iter()
            .zip(0_i64..)
            .map(|(person, position)| expense_participants::ActiveModel {
                expense_id: ActiveValue::Set(self.id.to_string()),
                person: ActiveValue::Set(person.to_string()),
                position: ActiveValue::Set(position),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub description: String,
    pub payer: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_participants::Entity")]
    Participants,
}

impl Related<super::expense_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            description: ActiveValue::Set(expense.description.clone()),
            payer: ActiveValue::Set(expense.payer.to_string()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
        }
    }
}
