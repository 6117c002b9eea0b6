use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::recommendations::handlers;
use crate::features::recommendations::services::RecommendationService;

/// Create routes for the recommendation feature
pub fn routes(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route(
            "/api/recommendations/like",
            post(handlers::like_recommendation),
        )
        .route(
            "/api/recommendations/rounds/{round}",
            delete(handlers::reset_round),
        )
        .route(
            "/api/recommendations/{feeling}",
            get(handlers::get_recommendations),
        )
        .route(
            "/api/recommendations/{feeling}/next",
            get(handlers::next_recommendation),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum_test::TestServer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    use crate::features::recommendations::models::{Category, RecommendationItem};
    use crate::shared::test_helpers::InMemoryRecommendationRepository;

    fn server() -> TestServer {
        let repository = Arc::new(InMemoryRecommendationRepository::default());
        repository.insert(
            "cold_추천",
            Category::Food,
            vec![
                RecommendationItem::new("어묵탕", 4, 0),
                RecommendationItem::new("붕어빵", 1, 0),
            ],
        );
        let service = Arc::new(RecommendationService::new(
            repository,
            Duration::from_secs(3600),
            StdRng::seed_from_u64(5),
        ));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_list_recommendations() {
        let server = server();

        let body: Value = server.get("/api/recommendations/cold").await.json();

        assert_eq!(body["data"]["clothes"], json!([]));
        assert_eq!(body["data"]["food"][0]["name"], "어묵탕");
        assert_eq!(body["data"]["food"][0]["shownCount"], 0);

        server
            .get("/api/recommendations/hot")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_next_until_exhausted_then_reset() {
        let server = server();
        let next = || {
            server
                .get("/api/recommendations/cold/next")
                .add_query_param("category", "food")
                .add_query_param("round", "tab-1")
        };

        let first: Value = next().await.json();
        let second: Value = next().await.json();
        let third: Value = next().await.json();

        assert_ne!(first["data"]["name"], second["data"]["name"]);
        assert_eq!(third["data"], Value::Null);
        assert_eq!(third["success"], true);

        let reset: Value = server
            .delete("/api/recommendations/rounds/tab-1")
            .await
            .json();
        assert_eq!(reset["data"]["reset"], true);

        let again: Value = next().await.json();
        assert!(again["data"]["name"].is_string());
    }

    #[tokio::test]
    async fn test_next_with_unknown_category() {
        server()
            .get("/api/recommendations/cold/next")
            .add_query_param("category", "drinks")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_like() {
        let server = server();

        server
            .post("/api/recommendations/like")
            .json(&json!({ "feeling": "cold", "category": "food", "name": "붕어빵" }))
            .await
            .assert_status_ok();

        server
            .post("/api/recommendations/like")
            .json(&json!({ "feeling": "cold", "category": "food", "name": "빙수" }))
            .await
            .assert_status_not_found();

        server
            .post("/api/recommendations/like")
            .json(&json!({ "feeling": "cold", "category": "shoes", "name": "붕어빵" }))
            .await
            .assert_status_bad_request();
    }
}
