//! Balance aggregation.
//!
//! Reduces a snapshot of expenses to one net balance per person:
//! positive means the group owes that person money, negative means the person
//! owes the group.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{Expense, PersonId};

/// Net balance per person, ordered by person id.
pub type Balances = BTreeMap<PersonId, Decimal>;

/// A single person's net position, as returned to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonBalance {
    pub person: PersonId,
    pub balance: Decimal,
}

/// Compute the net balance of every person referenced by `expenses`.
///
/// The payer is credited the full amount and every participant (payer
/// included) is debited `amount / participants.len()`. Shares are exact
/// decimals and are not rounded here, so the balances of any snapshot sum to
/// zero up to the 28-digit precision of [`Decimal`].
///
/// People whose balance nets to zero are still listed. Expenses must satisfy
/// the [`Expense`] invariants; one without participants is skipped.
#[must_use]
pub fn compute_balances(expenses: &[Expense]) -> Balances {
    let mut balances = Balances::new();

    for expense in expenses {
        debug_assert!(
            !expense.participants.is_empty(),
            "expense {} has no participants",
            expense.id
        );
        if expense.participants.is_empty() {
            continue;
        }

        let amount = expense.amount.to_decimal();
        *balances.entry(expense.payer.clone()).or_default() += amount;

        let share = amount / Decimal::from(expense.participants.len());
        for person in &expense.participants {
            *balances.entry(person.clone()).or_default() -= share;
        }
    }

    balances
}

/// Flatten [`Balances`] into a list ordered by person id.
#[must_use]
pub fn person_balances(balances: &Balances) -> Vec<PersonBalance> {
    balances
        .iter()
        .map(|(person, balance)| PersonBalance {
            person: person.clone(),
            balance: *balance,
        })
        .collect()
}
