use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions and voting feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        // Region routes (fixed segments only, no path params)
        .route("/api/regions", get(handlers::list_regions))
        .route("/api/regions/info", get(handlers::get_region_info))
        .route("/api/regions/stats", get(handlers::get_raw_stats))
        .route(
            "/api/regions/lookup",
            get(handlers::find_province_by_region),
        )
        .route(
            "/api/regions/temperature",
            get(handlers::get_region_temperature),
        )
        // Vote and aggregate routes
        .route("/api/votes", post(handlers::submit_vote))
        .route("/api/weather", get(handlers::get_weather_data))
        .route("/api/ranking", get(handlers::get_ranking))
        .with_state(service)
}
