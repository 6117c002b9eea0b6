use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::location::clients::GeolocationClient;
use crate::features::location::dtos::{LocationDto, LocationQuery};
use crate::shared::types::ApiResponse;

/// Resolve the province and city of the caller's IP address
#[utoipa::path(
    get,
    path = "/api/location",
    params(LocationQuery),
    responses(
        (status = 200, description = "Resolved location", body = ApiResponse<LocationDto>),
        (status = 400, description = "Invalid IP address"),
        (status = 404, description = "No location for this address"),
        (status = 502, description = "Geolocation service unavailable")
    ),
    tag = "location"
)]
pub async fn get_location(
    State(client): State<Arc<GeolocationClient>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<LocationDto>>> {
    let ip = match query.ip {
        Some(ip) => ip
            .parse::<IpAddr>()
            .map_err(|_| AppError::BadRequest(format!("Invalid IP address '{}'", ip)))?,
        None => addr.ip(),
    };
    tracing::debug!("Resolving location of {}", ip);

    let location = client.locate(&ip.to_string()).await?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}
