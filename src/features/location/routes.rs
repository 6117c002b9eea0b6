use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::location::clients::GeolocationClient;
use crate::features::location::handlers;

/// Create routes for IP geolocation. Requires connect info on the server.
pub fn routes(client: Arc<GeolocationClient>) -> Router {
    Router::new()
        .route("/api/location", get(handlers::get_location))
        .with_state(client)
}
