use sea_orm::DatabaseConnection;

use crate::{ParticipantPolicy, ResultEngine};

mod expenses;
mod reports;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every expense and report operation.
///
/// Reports never cache: each call reads the full expense snapshot and derives
/// balances and settlements from it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    participant_policy: ParticipantPolicy,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    participant_policy: ParticipantPolicy,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the default [`ParticipantPolicy::PayerOnly`].
    pub fn participant_policy(mut self, policy: ParticipantPolicy) -> EngineBuilder {
        self.participant_policy = policy;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            participant_policy: self.participant_policy,
        })
    }
}
