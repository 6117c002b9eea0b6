use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Updating,
    Completed,
}

impl RefreshStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStatus::Updating => "updating",
            RefreshStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefreshStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updating" => Ok(RefreshStatus::Updating),
            "completed" => Ok(RefreshStatus::Completed),
            other => Err(AppError::Internal(format!(
                "Unknown refresh status '{}'",
                other
            ))),
        }
    }
}

/// Singleton record of the last temperature refresh attempt, shared by all
/// processes through the store
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshMarker {
    pub updated_at: DateTime<Utc>,
    pub status: RefreshStatus,
}

impl RefreshMarker {
    pub fn updating(at: DateTime<Utc>) -> Self {
        Self {
            updated_at: at,
            status: RefreshStatus::Updating,
        }
    }

    pub fn completed(at: DateTime<Utc>) -> Self {
        Self {
            updated_at: at,
            status: RefreshStatus::Completed,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.updated_at
    }
}
