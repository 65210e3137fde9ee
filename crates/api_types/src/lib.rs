use serde::{Deserialize, Serialize};

/// Envelope wrapping every JSON response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub mod expense {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Major units, at most 2 decimals (e.g. `12.5`).
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        /// Omit to let the server's participant policy decide.
        #[serde(default)]
        pub participants: Option<Vec<String>>,
    }

    /// Partial update. At least one field must be present.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(default)]
        pub amount: Option<f64>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub paid_by: Option<String>,
        #[serde(default)]
        pub participants: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        pub participants: Vec<String>,
        #[serde(rename = "date_created")]
        pub created_at: DateTime<Utc>,
        #[serde(rename = "date_updated")]
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub id: Uuid,
    }
}

pub mod balance {
    use super::*;

    /// Positive: the group owes `person`. Negative: `person` owes the group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub person: String,
        /// Rounded to 2 decimals.
        pub balance: f64,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from_person: String,
        pub to_person: String,
        pub amount: f64,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub name: String,
        pub version: String,
    }
}
