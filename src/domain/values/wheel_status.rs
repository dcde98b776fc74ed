use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WheelStatus {
    #[default]
    Active,
    Completed,
}

impl fmt::Display for WheelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelStatus::Active => write!(f, "ACTIVE"),
            WheelStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for WheelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(WheelStatus::Active),
            "COMPLETED" => Ok(WheelStatus::Completed),
            _ => Err(format!("Unknown wheel status: {s}")),
        }
    }
}
