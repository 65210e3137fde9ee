//! Command structs for engine write operations.
//!
//! Raw names are accepted here and normalized by the engine, so callers do
//! not need to build [`PersonId`](crate::PersonId)s themselves.

use crate::MoneyCents;

/// Record a new expense.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub amount: MoneyCents,
    pub description: String,
    pub paid_by: String,
    /// `None` lets the configured participant policy decide.
    pub participants: Option<Vec<String>>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        amount: MoneyCents,
        description: impl Into<String>,
        paid_by: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            paid_by: paid_by.into(),
            participants: None,
        }
    }

    #[must_use]
    pub fn participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = Some(participants.into_iter().map(Into::into).collect());
        self
    }
}

/// Change an existing expense. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct ExpenseUpdateCmd {
    pub amount: Option<MoneyCents>,
    pub description: Option<String>,
    pub paid_by: Option<String>,
    pub participants: Option<Vec<String>>,
}

impl ExpenseUpdateCmd {
    #[must_use]
    pub fn amount(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn paid_by(mut self, paid_by: impl Into<String>) -> Self {
        self.paid_by = Some(paid_by.into());
        self
    }

    #[must_use]
    pub fn participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = Some(participants.into_iter().map(Into::into).collect());
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.paid_by.is_none()
            && self.participants.is_none()
    }
}
