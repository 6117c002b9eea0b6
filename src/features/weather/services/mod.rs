pub mod observation_parser;
mod temperature_refresh_service;

pub use temperature_refresh_service::TemperatureRefreshService;
