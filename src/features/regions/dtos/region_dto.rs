use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::regions::models::{Feeling, FeelingTotals};
use crate::features::regions::services::aggregation::{Ranking, RankingEntry, WeatherView};
use crate::features::regions::services::{MapLevel, RegionInfo, VoteOutcome};

/// Query parameters selecting a province
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProvinceQuery {
    /// Province collection name
    #[param(example = "경기도")]
    pub province: String,
}

/// Query parameters selecting one region of a province
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionQuery {
    #[param(example = "경기도")]
    pub province: String,
    #[param(example = "가평군")]
    pub region: String,
}

/// Query parameters for looking up a region's province
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionLookupQuery {
    #[param(example = "춘천시")]
    pub region: String,
}

/// Query parameters of the map view
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct WeatherQuery {
    /// `provinces` (default) or `municipalities`
    pub level: Option<String>,
    /// Restricts the municipality view to one province
    pub province: Option<String>,
}

impl FromStr for MapLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provinces" => Ok(MapLevel::Provinces),
            "municipalities" => Ok(MapLevel::Municipalities),
            other => Err(AppError::Validation(format!(
                "Unknown level '{}', expected provinces or municipalities",
                other
            ))),
        }
    }
}

impl WeatherQuery {
    pub fn map_level(&self) -> Result<MapLevel, AppError> {
        self.level
            .as_deref()
            .map(MapLevel::from_str)
            .unwrap_or(Ok(MapLevel::Provinces))
    }
}

/// Request DTO for submitting a vote
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequestDto {
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,

    pub feeling: Feeling,

    /// Detail bucket 1-5
    #[validate(range(min = 1, max = 5, message = "Detail must be between 1 and 5"))]
    pub detail: u8,
}

/// Response DTO after a vote was recorded
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResultDto {
    pub region: String,
    pub temperature: Option<f64>,
    pub feeling: Feeling,
    pub detail_array: Vec<i64>,
}

impl From<VoteOutcome> for VoteResultDto {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            region: outcome.region,
            temperature: outcome.temperature,
            feeling: outcome.analysis.dominant_feeling,
            detail_array: outcome.analysis.dominant_array.to_vec(),
        }
    }
}

/// Response DTO for a single region
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfoDto {
    pub feeling: Feeling,
    pub detail_array: Vec<i64>,
    pub totals: FeelingTotals,
    pub temperature: Option<f64>,
}

impl From<RegionInfo> for RegionInfoDto {
    fn from(info: RegionInfo) -> Self {
        Self {
            feeling: info.analysis.dominant_feeling,
            detail_array: info.analysis.dominant_array.to_vec(),
            totals: info.analysis.totals,
            temperature: info.temperature,
        }
    }
}

/// Response DTO for the map view
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDataDto {
    pub weather_stats: BTreeMap<String, Feeling>,
    pub detail_arrays: BTreeMap<String, Vec<i64>>,
}

impl From<WeatherView> for WeatherDataDto {
    fn from(view: WeatherView) -> Self {
        Self {
            weather_stats: view.stats,
            detail_arrays: view.details,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProvinceLookupDto {
    pub province: String,
}

/// Response DTO for the global ranking
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingDto {
    pub most_voted_feeling: Feeling,
    pub vote_top_regions: Vec<RankingEntry>,
    pub temp_top_regions: Vec<RankingEntry>,
    pub total_votes: FeelingTotals,
}

impl From<Ranking> for RankingDto {
    fn from(ranking: Ranking) -> Self {
        Self {
            most_voted_feeling: ranking.most_voted_feeling,
            vote_top_regions: ranking.vote_top_regions,
            temp_top_regions: ranking.temp_top_regions,
            total_votes: ranking.total_votes,
        }
    }
}
