use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a trade. Derived from close fields and the
/// expiration date, never taken directly from input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    #[default]
    Open,
    Closed,
    Expired,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "OPEN"),
            TradeStatus::Closed => write!(f, "CLOSED"),
            TradeStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(TradeStatus::Open),
            "CLOSED" => Ok(TradeStatus::Closed),
            "EXPIRED" => Ok(TradeStatus::Expired),
            _ => Err(format!("Unknown trade status: {s}")),
        }
    }
}
