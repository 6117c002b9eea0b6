mod kma_client;

pub use kma_client::{KmaWeatherClient, WeatherSource};
