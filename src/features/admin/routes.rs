use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/test-data", post(handlers::generate_test_data))
        .with_state(admin_service)
}
