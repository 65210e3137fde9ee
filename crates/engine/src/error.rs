//! The module contains the errors the engine can return.
//!
//! The balance aggregator and the settlement planner never fail; every error
//! here comes from validating writes or from the storage layer:
//!
//! - [`KeyNotFound`] returned when an expense does not exist.
//! - [`InvalidAmount`] returned when an amount is zero, negative or not
//!   representable in cents.
//! - [`MissingParticipants`] returned when participants are omitted and the
//!   configured policy refuses to default them.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`MissingParticipants`]: EngineError::MissingParticipants
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Missing participants: {0}")]
    MissingParticipants(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::MissingParticipants(a), Self::MissingParticipants(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
