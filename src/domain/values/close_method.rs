use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a trade was closed. BTC (buy-to-close) is assumed when a close
/// price is present without an explicit method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseMethod {
    #[serde(rename = "BTC")]
    BuyToClose,
    #[serde(rename = "EXPIRATION")]
    Expiration,
    #[serde(rename = "ASSIGNMENT")]
    Assignment,
}

impl fmt::Display for CloseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseMethod::BuyToClose => write!(f, "BTC"),
            CloseMethod::Expiration => write!(f, "EXPIRATION"),
            CloseMethod::Assignment => write!(f, "ASSIGNMENT"),
        }
    }
}

impl FromStr for CloseMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BTC" => Ok(CloseMethod::BuyToClose),
            "EXPIRATION" => Ok(CloseMethod::Expiration),
            "ASSIGNMENT" => Ok(CloseMethod::Assignment),
            _ => Err(format!("Unknown close method: {s}")),
        }
    }
}
