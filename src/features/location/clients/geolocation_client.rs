use base64::prelude::*;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::core::config::GeolocationConfig;
use crate::core::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

const GEOLOCATION_PATH: &str = "/geolocation/v2/geoLocation";

/// Province and city resolved from an IP address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub province: String,
    pub city: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeolocationResponse {
    geo_location: Option<GeoLocation>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    /// Province
    r1: String,
    /// City and district, space separated
    r2: String,
}

/// Client for the NCP geolocation API (signature v2)
pub struct GeolocationClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl GeolocationClient {
    pub fn new(config: &GeolocationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        if config.credentials().is_none() {
            tracing::warn!("NAVER_ACCESS_KEY/NAVER_SECRET_KEY not set, geolocation disabled");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config
                .credentials()
                .map(|(access, secret)| (access.to_string(), secret.to_string())),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Resolve the province and city of an IP address
    pub async fn locate(&self, ip: &str) -> Result<Location> {
        let (access_key, secret_key) = self.credentials.as_ref().ok_or_else(|| {
            AppError::ExternalServiceError("Geolocation is not configured".to_string())
        })?;

        let path_and_query = format!("{}?{}", GEOLOCATION_PATH, Self::query_string(ip));
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let signature = make_signature("GET", &path_and_query, &timestamp, access_key, secret_key)?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path_and_query))
            .header("x-ncp-apigw-timestamp", &timestamp)
            .header("x-ncp-iam-access-key", access_key)
            .header("x-ncp-apigw-signature-v2", signature)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Geolocation request failed: {}", e);
                AppError::ExternalServiceError(format!("Geolocation request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Geolocation API returned {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Geolocation API returned {}",
                status
            )));
        }

        let body: GeolocationResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse geolocation response: {}", e))
        })?;

        Self::to_location(body, ip)
    }

    fn query_string(ip: &str) -> String {
        [
            ("ip", ip),
            ("ext", "t"),
            ("enc", "utf-8"),
            ("responseFormatType", "json"),
        ]
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }

    fn to_location(body: GeolocationResponse, ip: &str) -> Result<Location> {
        let geo = body
            .geo_location
            .ok_or_else(|| AppError::NotFound(format!("No location found for {}", ip)))?;

        let city = geo.r2.split_whitespace().next().unwrap_or_default().to_string();

        Ok(Location {
            province: geo.r1,
            city,
        })
    }
}

/// base64(HMAC-SHA256(secret, "<method> <path?query>\n<timestamp>\n<access key>"))
pub fn make_signature(
    method: &str,
    path_and_query: &str,
    timestamp: &str,
    access_key: &str,
    secret_key: &str,
) -> Result<String> {
    let message = format!(
        "{} {}\n{}\n{}",
        method, path_and_query, timestamp, access_key
    );

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AppError::Internal(format!("HMAC error: {}", e)))?;
    mac.update(message.as_bytes());

    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        assert_eq!(
            GeolocationClient::query_string("203.0.113.7"),
            "ip=203.0.113.7&ext=t&enc=utf-8&responseFormatType=json"
        );
    }

    #[test]
    fn test_make_signature() {
        let path = format!(
            "{}?{}",
            GEOLOCATION_PATH,
            GeolocationClient::query_string("203.0.113.7")
        );

        let signature = make_signature("GET", &path, "1700000000000", "AK", "SK").unwrap();

        assert_eq!(signature, "U0SuUjB+WwZGZwOjOwuQiwR7WFk2WQx5s4ipASr9clE=");
    }

    #[test]
    fn test_to_location_takes_first_city_token() {
        let body: GeolocationResponse = serde_json::from_str(
            r#"{"returnCode":0,"geoLocation":{"country":"KR","code":"4113510900","r1":"경기도","r2":"성남시 분당구","r3":"정자동"}}"#,
        )
        .unwrap();

        let location = GeolocationClient::to_location(body, "203.0.113.7").unwrap();

        assert_eq!(
            location,
            Location {
                province: "경기도".to_string(),
                city: "성남시".to_string()
            }
        );
    }

    #[test]
    fn test_to_location_missing() {
        let body: GeolocationResponse = serde_json::from_str(r#"{"returnCode":0}"#).unwrap();

        assert!(matches!(
            GeolocationClient::to_location(body, "10.0.0.1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_locate_without_credentials() {
        let client = GeolocationClient::new(&GeolocationConfig {
            base_url: "http://unused.test".to_string(),
            access_key: None,
            secret_key: Some("SK".to_string()),
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();

        assert!(!client.is_enabled());
        assert!(matches!(
            client.locate("203.0.113.7").await,
            Err(AppError::ExternalServiceError(_))
        ));
    }
}
