use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A dividend or other income event, optionally tied to a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub income_id: i64,
    pub account_id: i64,
    pub symbol: Option<String>,
    pub income_type: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDraft {
    pub account_id: i64,
    #[serde(default)]
    pub symbol: Option<String>,
    pub income_type: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}
