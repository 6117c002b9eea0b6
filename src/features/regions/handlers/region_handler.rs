use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::regions::dtos::{
    ProvinceLookupDto, ProvinceQuery, RankingDto, RegionInfoDto, RegionLookupQuery, RegionQuery,
    VoteRequestDto, VoteResultDto, WeatherDataDto, WeatherQuery,
};
use crate::features::regions::models::FeelingTotals;
use crate::features::regions::services::RegionService;
use crate::shared::types::ApiResponse;

// ==================== Region Handlers ====================

/// List region names of a province
#[utoipa::path(
    get,
    path = "/api/regions",
    params(ProvinceQuery),
    responses(
        (status = 200, description = "Sorted region names", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn list_regions(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<ProvinceQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let names = service.list_region_names(&query.province).await?;
    Ok(Json(ApiResponse::success(Some(names), None, None)))
}

/// Get dominant feeling, detail array and temperature of one region
#[utoipa::path(
    get,
    path = "/api/regions/info",
    params(RegionQuery),
    responses(
        (status = 200, description = "Region details", body = ApiResponse<RegionInfoDto>),
        (status = 404, description = "Region not found")
    ),
    tag = "regions"
)]
pub async fn get_region_info(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<ApiResponse<RegionInfoDto>>> {
    let info = service
        .get_region_info(&query.province, &query.region)
        .await?;
    Ok(Json(ApiResponse::success(Some(info.into()), None, None)))
}

/// Get raw vote totals of a province
#[utoipa::path(
    get,
    path = "/api/regions/stats",
    params(ProvinceQuery),
    responses(
        (status = 200, description = "Province totals", body = ApiResponse<FeelingTotals>),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn get_raw_stats(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<ProvinceQuery>,
) -> Result<Json<ApiResponse<FeelingTotals>>> {
    let totals = service.get_raw_stats(&query.province).await?;
    Ok(Json(ApiResponse::success(Some(totals), None, None)))
}

/// Find the province a region belongs to
#[utoipa::path(
    get,
    path = "/api/regions/lookup",
    params(RegionLookupQuery),
    responses(
        (status = 200, description = "Province of the region", body = ApiResponse<ProvinceLookupDto>),
        (status = 404, description = "Region not found")
    ),
    tag = "regions"
)]
pub async fn find_province_by_region(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionLookupQuery>,
) -> Result<Json<ApiResponse<ProvinceLookupDto>>> {
    let province = service.find_province_by_region(&query.region).await?;
    Ok(Json(ApiResponse::success(
        Some(ProvinceLookupDto { province }),
        None,
        None,
    )))
}

/// Get the cached temperature of a region (temperature quiz)
#[utoipa::path(
    get,
    path = "/api/regions/temperature",
    params(RegionQuery),
    responses(
        (status = 200, description = "Cached temperature, null when unknown", body = ApiResponse<f64>)
    ),
    tag = "regions"
)]
pub async fn get_region_temperature(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<ApiResponse<f64>>> {
    let temperature = service
        .get_temperature(&query.province, &query.region)
        .await?;
    Ok(Json(ApiResponse::success(temperature, None, None)))
}

// ==================== Vote Handlers ====================

/// Submit a perceived temperature vote
#[utoipa::path(
    post,
    path = "/api/votes",
    request_body = VoteRequestDto,
    responses(
        (status = 200, description = "Vote recorded", body = ApiResponse<VoteResultDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Region not found")
    ),
    tag = "votes"
)]
pub async fn submit_vote(
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<VoteRequestDto>,
) -> Result<Json<ApiResponse<VoteResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = service
        .record_vote(&dto.province, &dto.region, dto.feeling, dto.detail)
        .await?;
    Ok(Json(ApiResponse::success(Some(outcome.into()), None, None)))
}

/// Get the map view at province or municipality level
#[utoipa::path(
    get,
    path = "/api/weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Feeling and detail array per area", body = ApiResponse<WeatherDataDto>),
        (status = 400, description = "Unknown level")
    ),
    tag = "votes"
)]
pub async fn get_weather_data(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<WeatherDataDto>>> {
    let level = query.map_level()?;
    let view = service
        .get_weather_data(level, query.province.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(view.into()), None, None)))
}

/// Get the global vote and temperature ranking
#[utoipa::path(
    get,
    path = "/api/ranking",
    responses(
        (status = 200, description = "Ranking", body = ApiResponse<RankingDto>)
    ),
    tag = "votes"
)]
pub async fn get_ranking(
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<RankingDto>>> {
    let ranking = service.get_ranking().await?;
    Ok(Json(ApiResponse::success(Some(ranking.into()), None, None)))
}
