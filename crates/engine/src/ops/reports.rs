use crate::{
    PersonBalance, PersonId, ResultEngine, Settlement, compute_balances, compute_settlements,
    person_balances,
};

use super::Engine;

impl Engine {
    /// Net balance of every person referenced by an expense, ordered by
    /// person id.
    pub async fn balances(&self) -> ResultEngine<Vec<PersonBalance>> {
        let expenses = self.list_expenses().await?;
        Ok(person_balances(&compute_balances(&expenses)))
    }

    /// The transfers that would clear every current balance.
    pub async fn settlements(&self) -> ResultEngine<Vec<Settlement>> {
        let expenses = self.list_expenses().await?;
        Ok(compute_settlements(&compute_balances(&expenses)))
    }

    /// Everyone who has paid for or shared an expense, sorted.
    pub async fn people(&self) -> ResultEngine<Vec<PersonId>> {
        let expenses = self.list_expenses().await?;
        Ok(compute_balances(&expenses).into_keys().collect())
    }
}
