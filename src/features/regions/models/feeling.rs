use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;

/// Perceived temperature a voter reports for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Hot,
    Normal,
    Cold,
}

impl Feeling {
    #[cfg(test)]
    pub const ALL: [Feeling; 3] = [Feeling::Hot, Feeling::Normal, Feeling::Cold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feeling::Hot => "hot",
            Feeling::Normal => "normal",
            Feeling::Cold => "cold",
        }
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feeling {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Feeling::Hot),
            "normal" => Ok(Feeling::Normal),
            "cold" => Ok(Feeling::Cold),
            other => Err(AppError::Validation(format!(
                "Unknown feeling '{}', expected hot, normal or cold",
                other
            ))),
        }
    }
}

/// Vote totals per feeling (slot 0 of each counter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeelingTotals {
    pub hot: i64,
    pub normal: i64,
    pub cold: i64,
}

impl FeelingTotals {
    pub fn max(&self) -> i64 {
        self.hot.max(self.normal).max(self.cold)
    }

    pub fn sum(&self) -> i64 {
        self.hot + self.normal + self.cold
    }

    pub fn accumulate(&mut self, other: &FeelingTotals) {
        self.hot += other.hot;
        self.normal += other.normal;
        self.cold += other.cold;
    }

    /// Feeling holding the maximum. Ties resolve hot, then cold, then normal.
    pub fn dominant(&self) -> Feeling {
        let max = self.max();
        if self.hot == max {
            Feeling::Hot
        } else if self.cold == max {
            Feeling::Cold
        } else {
            Feeling::Normal
        }
    }
}
