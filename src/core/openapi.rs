use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::location::{dtos as location_dtos, handlers as location_handlers};
use crate::features::recommendations::{
    dtos as recommendations_dtos, handlers as recommendations_handlers,
    models as recommendations_models,
};
use crate::features::regions::services::aggregation::RankingEntry;
use crate::features::regions::{
    dtos as regions_dtos, handlers as regions_handlers, models as regions_models,
};
use crate::features::weather::{
    dtos as weather_dtos, handlers as weather_handlers, models as weather_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Regions
        regions_handlers::list_regions,
        regions_handlers::get_region_info,
        regions_handlers::get_raw_stats,
        regions_handlers::find_province_by_region,
        regions_handlers::get_region_temperature,
        // Votes
        regions_handlers::submit_vote,
        regions_handlers::get_weather_data,
        regions_handlers::get_ranking,
        // Temperature
        weather_handlers::refresh_temperatures,
        weather_handlers::refresh_region_temperature,
        // Recommendations
        recommendations_handlers::get_recommendations,
        recommendations_handlers::next_recommendation,
        recommendations_handlers::reset_round,
        recommendations_handlers::like_recommendation,
        // Location
        location_handlers::get_location,
        // Admin
        admin_handlers::generate_test_data,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Regions and votes
            regions_models::Feeling,
            regions_models::FeelingTotals,
            regions_dtos::VoteRequestDto,
            regions_dtos::VoteResultDto,
            regions_dtos::RegionInfoDto,
            regions_dtos::WeatherDataDto,
            regions_dtos::ProvinceLookupDto,
            regions_dtos::RankingDto,
            RankingEntry,
            ApiResponse<regions_dtos::VoteResultDto>,
            ApiResponse<regions_dtos::RegionInfoDto>,
            ApiResponse<regions_dtos::WeatherDataDto>,
            ApiResponse<regions_dtos::RankingDto>,
            // Temperature
            weather_models::RefreshReport,
            weather_dtos::RefreshResponseDto,
            weather_dtos::RegionRefreshRequestDto,
            weather_dtos::RegionRefreshResponseDto,
            ApiResponse<weather_dtos::RefreshResponseDto>,
            // Recommendations
            recommendations_models::Category,
            recommendations_models::RecommendationItem,
            recommendations_models::RecommendationDocument,
            recommendations_dtos::LikeRequestDto,
            recommendations_dtos::RoundResetDto,
            ApiResponse<recommendations_models::RecommendationDocument>,
            ApiResponse<recommendations_models::RecommendationItem>,
            // Location
            location_dtos::LocationDto,
            ApiResponse<location_dtos::LocationDto>,
            // Admin
            admin_dtos::TestDataResultDto,
        )
    ),
    tags(
        (name = "regions", description = "Administrative regions, their votes and cached temperatures"),
        (name = "votes", description = "Perceived temperature votes, map views and ranking"),
        (name = "temperature", description = "Station temperature refreshes"),
        (name = "recommendations", description = "Clothing and food recommendations per feeling"),
        (name = "location", description = "IP geolocation"),
        (name = "admin", description = "Operator tooling"),
    ),
    info(
        title = "Chegam API",
        version = "0.1.0",
        description = "API documentation for Chegam",
    )
)]
pub struct ApiDoc;

/// Applies the configured title, version and description to the document
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let openapi = ApiDoc::openapi();

        for path in [
            "/api/regions",
            "/api/votes",
            "/api/weather",
            "/api/ranking",
            "/api/temperature/refresh",
            "/api/recommendations/{feeling}/next",
            "/api/recommendations/like",
            "/api/location",
            "/api/admin/test-data",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Test".to_string(),
            version: "9.9.9".to_string(),
            description: "Desc".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "Test");
        assert_eq!(openapi.info.version, "9.9.9");
    }
}
