//! Expense ledger and settlement engine.
//!
//! The engine stores expenses and derives everything else from them:
//! [`compute_balances`] reduces a snapshot to one net balance per person and
//! [`compute_settlements`] turns those balances into a short list of
//! transfers. Both are pure functions; [`Engine`] wires them to storage.

pub use balances::{Balances, PersonBalance, compute_balances, person_balances};
pub use commands::{ExpenseCmd, ExpenseUpdateCmd};
pub use error::EngineError;
pub use expenses::Expense;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use participants::ParticipantPolicy;
pub use person::PersonId;
pub use settlements::{SETTLEMENT_EPSILON, Settlement, compute_settlements};

mod balances;
mod commands;
mod error;
mod expense_participants;
mod expenses;
mod money;
mod ops;
mod participants;
mod person;
mod settlements;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
