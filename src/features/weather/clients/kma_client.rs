use async_trait::async_trait;

use crate::core::config::WeatherApiConfig;
use crate::core::error::{AppError, Result};

/// Source of raw station observations
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Latest observation table for a station, as returned by the upstream
    async fn fetch_observation(&self, station_code: i32) -> Result<String>;
}

/// Client for the KMA AWS minute-observation endpoint
pub struct KmaWeatherClient {
    client: reqwest::Client,
    base_url: String,
    auth_key: String,
}

impl KmaWeatherClient {
    pub fn new(config: &WeatherApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ChegamCore/1.0 (temperature-refresh)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_key: config.auth_key.clone(),
        })
    }

    fn observation_url(&self, station_code: i32) -> String {
        let params = [
            ("tm2", "0".to_string()),
            ("stn", station_code.to_string()),
            ("disp", "0".to_string()),
            ("authKey", self.auth_key.clone()),
            ("inf", "AWS".to_string()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.base_url, query_string)
    }
}

#[async_trait]
impl WeatherSource for KmaWeatherClient {
    async fn fetch_observation(&self, station_code: i32) -> Result<String> {
        let url = self.observation_url(station_code);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::ExternalServiceError(format!(
                    "Weather request for station {} timed out",
                    station_code
                ))
            } else {
                AppError::ExternalServiceError(format!(
                    "Weather request for station {} failed: {}",
                    station_code, e
                ))
            }
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Weather API returned {} for station {}",
                response.status(),
                station_code
            )));
        }

        response.text().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "Failed to read weather response for station {}: {}",
                station_code, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_observation_url() {
        let config = WeatherApiConfig {
            base_url: "https://example.test/nph-aws2_min".to_string(),
            auth_key: "k&y".to_string(),
            request_timeout: Duration::from_secs(5),
            request_delay: Duration::ZERO,
            stale_after: Duration::from_secs(1800),
        };
        let client = KmaWeatherClient::new(&config).unwrap();

        assert_eq!(
            client.observation_url(108),
            "https://example.test/nph-aws2_min?tm2=0&stn=108&disp=0&authKey=k%26y&inf=AWS"
        );
    }
}
