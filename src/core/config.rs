use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub weather: WeatherApiConfig,
    pub scheduler: SchedulerConfig,
    pub geolocation: GeolocationConfig,
    pub recommendations: RecommendationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Allows the randomised counter seeding endpoint
    pub enable_test_data: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// KMA (Korea Meteorological Administration) AWS observation API settings
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    pub base_url: String,
    pub auth_key: String,
    /// Per-request timeout; requests are never retried within a pass
    pub request_timeout: Duration,
    /// Pause between consecutive station requests
    pub request_delay: Duration,
    /// Cached temperatures older than this are eligible for a smart refresh
    pub stale_after: Duration,
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub refresh_interval: Duration,
    pub first_run_delay: Duration,
}

/// NCP geolocation API settings. Keys are optional; the feature is
/// disabled when either is missing.
#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    pub base_url: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Rounds untouched for longer than this are discarded
    pub round_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            weather: WeatherApiConfig::from_env()?,
            scheduler: SchedulerConfig::from_env()?,
            geolocation: GeolocationConfig::from_env()?,
            recommendations: RecommendationConfig::from_env()?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String>
where
    T: ToString,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", name))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let enable_test_data = env::var("ENABLE_TEST_DATA")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            enable_test_data,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_env(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Chegam API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Perceived temperature votes, rankings and recommendations".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl WeatherApiConfig {
    const DEFAULT_BASE_URL: &'static str =
        "https://apihub.kma.go.kr/api/typ01/cgi-bin/url/nph-aws2_min";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_REQUEST_DELAY_MS: u64 = 100;
    const DEFAULT_STALE_AFTER_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let auth_key = env::var("WEATHER_API_KEY")
            .map_err(|_| "WEATHER_API_KEY environment variable is required".to_string())?;

        let base_url =
            env::var("WEATHER_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = parse_env(
            "WEATHER_REQUEST_TIMEOUT_SECS",
            Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let request_delay_ms =
            parse_env("WEATHER_REQUEST_DELAY_MS", Self::DEFAULT_REQUEST_DELAY_MS)?;
        let stale_after_secs =
            parse_env("WEATHER_STALE_AFTER_SECS", Self::DEFAULT_STALE_AFTER_SECS)?;

        Ok(Self {
            base_url,
            auth_key,
            request_timeout: Duration::from_secs(request_timeout_secs),
            request_delay: Duration::from_millis(request_delay_ms),
            stale_after: Duration::from_secs(stale_after_secs),
        })
    }
}

impl SchedulerConfig {
    const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 1800; // 30 minutes
    const DEFAULT_FIRST_RUN_DELAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let refresh_interval_secs = parse_env(
            "TEMP_REFRESH_INTERVAL_SECS",
            Self::DEFAULT_REFRESH_INTERVAL_SECS,
        )?;
        let first_run_delay_secs = parse_env(
            "TEMP_FIRST_RUN_DELAY_SECS",
            Self::DEFAULT_FIRST_RUN_DELAY_SECS,
        )?;

        if refresh_interval_secs == 0 {
            return Err("TEMP_REFRESH_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            first_run_delay: Duration::from_secs(first_run_delay_secs),
        })
    }
}

impl GeolocationConfig {
    const DEFAULT_BASE_URL: &'static str = "https://geolocation.apigw.ntruss.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("GEOLOCATION_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let access_key = env::var("NAVER_ACCESS_KEY").ok().filter(|s| !s.is_empty());
        let secret_key = env::var("NAVER_SECRET_KEY").ok().filter(|s| !s.is_empty());
        let timeout_secs = parse_env("GEOLOCATION_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            access_key,
            secret_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Returns (access_key, secret_key) when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl RecommendationConfig {
    const DEFAULT_ROUND_TTL_SECS: u64 = 3600; // 1 hour

    pub fn from_env() -> Result<Self, String> {
        let round_ttl_secs = parse_env("RECOMMEND_ROUND_TTL_SECS", Self::DEFAULT_ROUND_TTL_SECS)?;

        Ok(Self {
            round_ttl: Duration::from_secs(round_ttl_secs),
        })
    }
}
