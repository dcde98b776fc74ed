use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub name: String,
    pub broker: String,
    pub currency: String,
    pub initial_balance: f64,
    pub current_balance: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub broker: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub initial_balance: f64,
    /// Defaults to the initial balance when omitted.
    #[serde(default)]
    pub current_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: String,
    pub broker: String,
    pub currency: String,
    pub current_balance: f64,
}

/// One row of the deposit/withdrawal ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTransaction {
    pub transaction_id: i64,
    pub account_id: i64,
    pub transaction_type: String,
    pub amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}
