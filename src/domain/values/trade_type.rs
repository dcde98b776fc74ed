use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contract type of an options trade. CSP/CC are the wheel legs,
/// PUT/CALL cover long positions bought back later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(rename = "CSP")]
    Csp,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "CALL")]
    Call,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Csp => write!(f, "CSP"),
            TradeType::Cc => write!(f, "CC"),
            TradeType::Put => write!(f, "PUT"),
            TradeType::Call => write!(f, "CALL"),
        }
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CSP" => Ok(TradeType::Csp),
            "CC" => Ok(TradeType::Cc),
            "PUT" => Ok(TradeType::Put),
            "CALL" => Ok(TradeType::Call),
            _ => Err(format!("Unknown trade type: {s}")),
        }
    }
}
