use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::weather::dtos::{
    RefreshResponseDto, RegionRefreshRequestDto, RegionRefreshResponseDto,
};
use crate::features::weather::services::TemperatureRefreshService;
use crate::shared::types::ApiResponse;

/// Refresh every region's temperature unless it was refreshed recently
#[utoipa::path(
    post,
    path = "/api/temperature/refresh",
    responses(
        (status = 200, description = "Refresh ran or was skipped", body = ApiResponse<RefreshResponseDto>),
        (status = 503, description = "Refresh aborted")
    ),
    tag = "temperature"
)]
pub async fn refresh_temperatures(
    State(service): State<Arc<TemperatureRefreshService>>,
) -> Result<Json<ApiResponse<RefreshResponseDto>>> {
    let outcome = service.smart_refresh().await?;
    Ok(Json(ApiResponse::success(Some(outcome.into()), None, None)))
}

/// Refresh one province, or one region of it, bypassing the debounce
#[utoipa::path(
    post,
    path = "/api/temperature/refresh/region",
    request_body = RegionRefreshRequestDto,
    responses(
        (status = 200, description = "Regions updated", body = ApiResponse<RegionRefreshResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Province or region not found")
    ),
    tag = "temperature"
)]
pub async fn refresh_region_temperature(
    State(service): State<Arc<TemperatureRefreshService>>,
    AppJson(dto): AppJson<RegionRefreshRequestDto>,
) -> Result<Json<ApiResponse<RegionRefreshResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated_count = service
        .refresh_region(&dto.province, dto.region.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(RegionRefreshResponseDto { updated_count }),
        None,
        None,
    )))
}
