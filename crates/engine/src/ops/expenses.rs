use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, ExpenseCmd, ExpenseUpdateCmd, PersonId, ResultEngine,
    expense_participants, expenses,
    util::{parse_people, parse_uuid},
};

use super::{Engine, with_tx};

impl Engine {
    /// Record a new expense.
    ///
    /// An omitted or empty participant list is resolved through the
    /// configured [`ParticipantPolicy`](crate::ParticipantPolicy).
    pub async fn create_expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let payer = PersonId::parse(&cmd.paid_by)?;
        let participants = self.resolve_participants(&payer, &cmd.description, cmd.participants)?;
        let expense = Expense::new(cmd.amount, &cmd.description, payer, participants, Utc::now())?;

        let expense_model: expenses::ActiveModel = (&expense).into();
        let participant_models = expense.participant_models();
        with_tx!(self, |db_tx| {
            expense_model.insert(&db_tx).await?;
            expense_participants::Entity::insert_many(participant_models)
                .exec_without_returning(&db_tx)
                .await?;
            Ok::<_, EngineError>(())
        })?;

        tracing::info!(
            expense_id = %expense.id,
            payer = %expense.payer,
            amount = %expense.amount,
            participants = expense.participants.len(),
            "expense recorded"
        );
        Ok(expense)
    }

    /// Return a single expense.
    pub async fn expense(&self, expense_id: &str) -> ResultEngine<Expense> {
        let id = parse_uuid(expense_id, "expense")?;
        self.load_expense(&self.database, id).await
    }

    /// Return every expense, oldest first.
    ///
    /// Expenses created in the same instant are ordered by id so the
    /// snapshot is stable across calls.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;

        let mut participants: HashMap<String, Vec<expense_participants::Model>> = HashMap::new();
        for row in expense_participants::Entity::find()
            .all(&self.database)
            .await?
        {
            participants
                .entry(row.expense_id.clone())
                .or_default()
                .push(row);
        }

        models
            .into_iter()
            .map(|model| {
                let rows = participants.remove(&model.id).unwrap_or_default();
                Expense::from_models(model, rows)
            })
            .collect()
    }

    /// Change an existing expense.
    ///
    /// Fields left as `None` keep their value. Changing the payer keeps the
    /// participant list and adds the new payer to it when missing; an empty
    /// participant list is resolved through the policy against the
    /// (possibly new) description.
    pub async fn update_expense(
        &self,
        expense_id: &str,
        cmd: ExpenseUpdateCmd,
    ) -> ResultEngine<Expense> {
        let id = parse_uuid(expense_id, "expense")?;

        let expense = with_tx!(self, |db_tx| {
            let mut expense = self.load_expense(&db_tx, id).await?;
            if cmd.is_empty() {
                return Ok(expense);
            }

            if let Some(paid_by) = cmd.paid_by.as_deref() {
                expense.payer = PersonId::parse(paid_by)?;
            }
            if let Some(description) = cmd.description.as_deref() {
                expense.set_description(description)?;
            }
            if let Some(amount) = cmd.amount {
                expense.set_amount(amount)?;
            }
            let participants = match cmd.participants {
                Some(names) => {
                    self.resolve_participants(&expense.payer, &expense.description, Some(names))?
                }
                None => expense.participants.clone(),
            };
            expense.set_participants(participants);
            expense.updated_at = Utc::now();

            let expense_model: expenses::ActiveModel = (&expense).into();
            expense_model.update(&db_tx).await?;

            expense_participants::Entity::delete_many()
                .filter(expense_participants::Column::ExpenseId.eq(id.to_string()))
                .exec(&db_tx)
                .await?;
            expense_participants::Entity::insert_many(expense.participant_models())
                .exec_without_returning(&db_tx)
                .await?;

            Ok::<_, EngineError>(expense)
        })?;

        tracing::info!(expense_id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense and its participant rows, returning the parsed id.
    pub async fn delete_expense(&self, expense_id: &str) -> ResultEngine<Uuid> {
        let id = parse_uuid(expense_id, "expense")?;

        with_tx!(self, |db_tx| {
            expense_participants::Entity::delete_many()
                .filter(expense_participants::Column::ExpenseId.eq(id.to_string()))
                .exec(&db_tx)
                .await?;
            let deleted = expenses::Entity::delete_by_id(id.to_string()).exec(&db_tx).await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(format!("expense {id}")));
            }
            Ok::<_, EngineError>(())
        })?;

        tracing::info!(expense_id = %id, "expense deleted");
        Ok(id)
    }

    async fn load_expense<C>(&self, db: &C, id: Uuid) -> ResultEngine<Expense>
    where
        C: ConnectionTrait,
    {
        let model = expenses::Entity::find_by_id(id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {id}")))?;
        let rows = expense_participants::Entity::find()
            .filter(expense_participants::Column::ExpenseId.eq(id.to_string()))
            .all(db)
            .await?;
        Expense::from_models(model, rows)
    }

    fn resolve_participants(
        &self,
        payer: &PersonId,
        description: &str,
        names: Option<Vec<String>>,
    ) -> ResultEngine<Vec<PersonId>> {
        match names {
            Some(names) if !names.is_empty() => parse_people(&names),
            _ => self.participant_policy.resolve(payer, description),
        }
    }
}
