mod refresh_marker_repository;

pub use refresh_marker_repository::{PgRefreshMarkerRepository, RefreshMarkerRepository};
