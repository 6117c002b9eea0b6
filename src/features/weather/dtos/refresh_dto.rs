use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::weather::models::{RefreshOutcome, RefreshReport};

/// Response DTO of a full refresh request
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseDto {
    /// False when the cached readings were recent enough
    pub refreshed: bool,
    pub updated_count: usize,
    /// Present when a refresh pass ran
    pub report: Option<RefreshReport>,
}

impl From<RefreshOutcome> for RefreshResponseDto {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::Skipped => Self {
                refreshed: false,
                updated_count: 0,
                report: None,
            },
            RefreshOutcome::Completed(report) => Self {
                refreshed: true,
                updated_count: report.updated,
                report: Some(report),
            },
        }
    }
}

/// Request DTO for refreshing one province or one region of it
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionRefreshRequestDto {
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,

    /// Whole province when omitted
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionRefreshResponseDto {
    pub updated_count: usize,
}
