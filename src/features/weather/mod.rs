//! Cached station temperatures and their refresh controller.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/temperature/refresh` | Debounced refresh of every region |
//! | POST | `/api/temperature/refresh/region` | Refresh one province or region |
//!
//! A [`workers::TemperatureScheduler`] also refreshes periodically.

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod workers;

pub use clients::{KmaWeatherClient, WeatherSource};
pub use repositories::{PgRefreshMarkerRepository, RefreshMarkerRepository};
pub use services::TemperatureRefreshService;
