use crate::domain::error::DomainError;
use crate::domain::values::close_method::CloseMethod;
use crate::domain::values::trade_status::TradeStatus;
use crate::domain::values::trade_type::TradeType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An options trade. `trade_id` is `None` until the trade has been
/// persisted; the id is assigned by the store on commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default)]
    pub trade_id: Option<i64>,
    pub account_id: i64,
    pub symbol: String,
    pub trade_type: TradeType,
    pub contracts: i64,
    pub strike_price: f64,
    pub premium_per_share: f64,
    pub open_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    #[serde(default)]
    pub close_method: Option<CloseMethod>,
    #[serde(default)]
    pub close_price: Option<f64>,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub status: TradeStatus,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub wheel_id: Option<i64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Input payload for creating a trade. `account_id` may be omitted, in
/// which case the caller layer resolves the currently active account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDraft {
    #[serde(default)]
    pub account_id: Option<i64>,
    pub symbol: String,
    pub trade_type: TradeType,
    pub contracts: i64,
    pub strike_price: f64,
    pub premium_per_share: f64,
    pub open_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeUpdate {
    pub symbol: String,
    pub trade_type: TradeType,
    pub contracts: i64,
    pub strike_price: f64,
    pub premium_per_share: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTrade {
    pub close_date: NaiveDate,
    pub close_method: CloseMethod,
    #[serde(default)]
    pub close_price: Option<f64>,
}

impl Trade {
    pub fn from_draft(draft: TradeDraft, account_id: i64) -> Self {
        let now = Utc::now();
        Self {
            trade_id: None,
            account_id,
            symbol: draft.symbol,
            trade_type: draft.trade_type,
            contracts: draft.contracts,
            strike_price: draft.strike_price,
            premium_per_share: draft.premium_per_share,
            open_date: draft.open_date,
            expiration_date: draft.expiration_date,
            close_date: None,
            close_method: None,
            close_price: None,
            fees: draft.fees,
            status: TradeStatus::Open,
            tags: draft.tags,
            notes: draft.notes,
            wheel_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Business-rule validation. The active-account check is not here:
    /// it is re-verified per row inside the batch transaction, where it
    /// can still change between upload and commit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.symbol.is_empty() {
            return Err(DomainError::InvalidInput(
                "Symbol is required and must be non-empty".into(),
            ));
        }
        if !self.symbol.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::InvalidInput(
                "Symbol must contain only uppercase letters (A-Z)".into(),
            ));
        }
        if self.account_id <= 0 {
            return Err(DomainError::InvalidInput(
                "account_id is required and must be positive".into(),
            ));
        }
        if self.contracts <= 0 {
            return Err(DomainError::InvalidInput(
                "Contracts must be a positive integer".into(),
            ));
        }
        if self.strike_price < 0.0 {
            return Err(DomainError::InvalidInput(
                "strike_price cannot be negative".into(),
            ));
        }
        if self.premium_per_share < 0.0 {
            return Err(DomainError::InvalidInput(
                "premium_per_share cannot be negative".into(),
            ));
        }
        if self.expiration_date < self.open_date {
            return Err(DomainError::InvalidInput(
                "Expiration date must be equal or after open date".into(),
            ));
        }
        Ok(())
    }

    /// Derive the effective status and close method as of `today`.
    ///
    /// A trade is EXPIRED only when it carries no closing data at all
    /// and its expiration is strictly in the past. A close price without
    /// a close date leaves the status OPEN; only the explicit close
    /// operation moves a trade to CLOSED.
    pub fn derive_status(&mut self, today: NaiveDate) {
        if self.close_date.is_none() && self.close_price.is_none() {
            self.status = if self.expiration_date < today {
                TradeStatus::Expired
            } else {
                TradeStatus::Open
            };
        }
        if self.close_price.is_some() && self.close_method.is_none() {
            self.close_method = Some(CloseMethod::BuyToClose);
        }
    }

    /// Estimated P/L when a close price is known. PUT/CALL scale by
    /// contract count; CSP/CC report the per-share premium delta.
    pub fn estimated_profit_loss(&self) -> Option<f64> {
        let close_price = self.close_price?;
        let per_share = self.premium_per_share - close_price;
        Some(match self.trade_type {
            TradeType::Put | TradeType::Call => per_share * self.contracts as f64,
            TradeType::Csp | TradeType::Cc => per_share,
        })
    }

    /// Close fields a fully-documented trade is expected to carry.
    pub fn missing_close_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.close_date.is_none() {
            missing.push("close_date".to_string());
        }
        if self.close_price.is_none() {
            missing.push("close_price".to_string());
        }
        if self.close_method.is_none() {
            missing.push("close_method".to_string());
        }
        missing
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_trade() -> Trade {
        Trade::from_draft(
            TradeDraft {
                account_id: Some(1),
                symbol: "AAPL".into(),
                trade_type: TradeType::Csp,
                contracts: 1,
                strike_price: 150.0,
                premium_per_share: 2.5,
                open_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                expiration_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                fees: 0.0,
                tags: None,
                notes: None,
            },
            1,
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_when_not_expired_and_no_close_data() {
        let mut t = base_trade();
        t.derive_status(day(2024, 1, 15));
        assert_eq!(t.status, TradeStatus::Open);
    }

    #[test]
    fn expired_when_past_expiration_without_close_data() {
        let mut t = base_trade();
        t.derive_status(day(2024, 2, 2));
        assert_eq!(t.status, TradeStatus::Expired);
    }

    #[test]
    fn expiration_day_itself_is_still_open() {
        let mut t = base_trade();
        t.derive_status(day(2024, 2, 1));
        assert_eq!(t.status, TradeStatus::Open);
    }

    #[test]
    fn close_price_without_close_date_stays_open() {
        let mut t = base_trade();
        t.close_price = Some(1.0);
        t.derive_status(day(2024, 3, 1));
        assert_eq!(t.status, TradeStatus::Open);
        assert_eq!(t.close_method, Some(CloseMethod::BuyToClose));
        assert_eq!(t.close_price, Some(1.0));
    }

    #[test]
    fn close_date_without_price_stays_open() {
        let mut t = base_trade();
        t.close_date = Some(day(2024, 1, 20));
        t.derive_status(day(2024, 3, 1));
        assert_eq!(t.status, TradeStatus::Open);
        assert_eq!(t.close_method, None);
    }

    #[test]
    fn explicit_close_method_is_not_overwritten() {
        let mut t = base_trade();
        t.close_price = Some(0.5);
        t.close_method = Some(CloseMethod::Assignment);
        t.derive_status(day(2024, 1, 15));
        assert_eq!(t.close_method, Some(CloseMethod::Assignment));
    }

    #[test]
    fn rejects_lowercase_symbol() {
        let mut t = base_trade();
        t.symbol = "aapl".into();
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("uppercase"));
    }

    #[test]
    fn rejects_expiration_before_open() {
        let mut t = base_trade();
        t.expiration_date = day(2023, 12, 31);
        assert!(t.validate().is_err());
    }

    #[test]
    fn profit_loss_scales_contracts_for_long_options() {
        let mut t = base_trade();
        t.trade_type = TradeType::Put;
        t.contracts = 3;
        t.close_price = Some(1.0);
        assert_eq!(t.estimated_profit_loss(), Some(4.5));

        t.trade_type = TradeType::Csp;
        assert_eq!(t.estimated_profit_loss(), Some(1.5));
    }

    #[test]
    fn missing_close_fields_lists_all_absent() {
        let mut t = base_trade();
        assert_eq!(
            t.missing_close_fields(),
            vec!["close_date", "close_price", "close_method"]
        );
        t.close_price = Some(1.0);
        t.derive_status(day(2024, 1, 15));
        assert_eq!(t.missing_close_fields(), vec!["close_date"]);
    }
}
