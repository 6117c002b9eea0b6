use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::weather::handlers;
use crate::features::weather::services::TemperatureRefreshService;

/// Create routes for on-demand temperature refreshes
pub fn routes(service: Arc<TemperatureRefreshService>) -> Router {
    Router::new()
        .route(
            "/api/temperature/refresh",
            post(handlers::refresh_temperatures),
        )
        .route(
            "/api/temperature/refresh/region",
            post(handlers::refresh_region_temperature),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::core::config::WeatherApiConfig;
    use crate::features::regions::models::RegionRecord;
    use crate::shared::test_helpers::{
        InMemoryMarkerRepository, InMemoryRegionRepository, StubWeatherSource,
    };

    fn router() -> Router {
        let regions = Arc::new(InMemoryRegionRepository::with_records(vec![
            RegionRecord::new("부산광역시", "해운대구", 937),
            RegionRecord::new("부산광역시", "기장군", 0),
        ]));
        let source = StubWeatherSource::default().with_body(
            937,
            "202410191200 937 0 0 0 0 0 0 19.0 0\n".to_string(),
        );
        let config = WeatherApiConfig {
            base_url: "http://unused.test".to_string(),
            auth_key: "test".to_string(),
            request_timeout: Duration::from_secs(1),
            request_delay: Duration::ZERO,
            stale_after: Duration::from_secs(1800),
        };
        let service = Arc::new(TemperatureRefreshService::new(
            regions,
            Arc::new(InMemoryMarkerRepository::default()),
            Arc::new(source),
            &config,
        ));
        routes(service)
    }

    #[tokio::test]
    async fn test_refresh_then_debounced() {
        let server = TestServer::new(router()).unwrap();

        let first: Value = server.post("/api/temperature/refresh").await.json();
        assert_eq!(first["data"]["refreshed"], true);
        assert_eq!(first["data"]["updatedCount"], 1);
        assert_eq!(first["data"]["report"]["skipped"], 1);

        let second: Value = server.post("/api/temperature/refresh").await.json();
        assert_eq!(second["data"]["refreshed"], false);
        assert_eq!(second["data"]["updatedCount"], 0);
    }

    #[tokio::test]
    async fn test_refresh_single_region() {
        let server = TestServer::new(router()).unwrap();

        let response = server
            .post("/api/temperature/refresh/region")
            .json(&json!({ "province": "부산광역시", "region": "해운대구" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["updatedCount"], 1);
    }

    #[tokio::test]
    async fn test_refresh_unknown_province() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/temperature/refresh/region")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"province":"화성"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
