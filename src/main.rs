mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::location::{routes as location_routes, GeolocationClient};
use crate::features::recommendations::{
    routes as recommendations_routes, PgRecommendationRepository, RecommendationService,
};
use crate::features::regions::{routes as regions_routes, PgRegionRepository, RegionService};
use crate::features::weather::workers::TemperatureScheduler;
use crate::features::weather::{
    routes as weather_routes, KmaWeatherClient, PgRefreshMarkerRepository,
    TemperatureRefreshService,
};
use axum::{extract::State, middleware::from_fn, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Stores
    let region_repository = Arc::new(PgRegionRepository::new(pool.clone()));
    let marker_repository = Arc::new(PgRefreshMarkerRepository::new(pool.clone()));
    let recommendation_repository = Arc::new(PgRecommendationRepository::new(pool.clone()));

    // Votes and aggregation
    let region_service = Arc::new(RegionService::new(region_repository.clone()));
    let admin_service = Arc::new(AdminService::new(
        Arc::clone(&region_service),
        config.app.enable_test_data,
    ));
    if config.app.enable_test_data {
        tracing::warn!("Test data generation endpoint enabled");
    }

    // Temperature refresh
    let weather_client = Arc::new(
        KmaWeatherClient::new(&config.weather).map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );
    let refresh_service = Arc::new(TemperatureRefreshService::new(
        region_repository,
        marker_repository,
        weather_client,
        &config.weather,
    ));
    tracing::info!("Temperature refresh service initialized");

    let scheduler = TemperatureScheduler::new(Arc::clone(&refresh_service), &config.scheduler);
    tokio::spawn(async move {
        scheduler.run().await;
    });
    tracing::info!("Temperature scheduler worker spawned");

    // Recommendations
    let recommendation_service = Arc::new(RecommendationService::new(
        recommendation_repository,
        config.recommendations.round_ttl,
        StdRng::from_entropy(),
    ));

    // Geolocation
    let geolocation_client = Arc::new(
        GeolocationClient::new(&config.geolocation).map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );
    tracing::info!(
        "Geolocation client initialized (enabled: {})",
        geolocation_client.is_enabled()
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Health check endpoint, unhealthy while the database is unreachable
    async fn health_check(State(pool): State<PgPool>) -> axum::http::StatusCode {
        match database::ping(&pool).await {
            Ok(()) => axum::http::StatusCode::OK,
            Err(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    let health_route = Router::new()
        .route("/health", axum::routing::get(health_check))
        .with_state(pool.clone());

    let api_routes = Router::new()
        .merge(regions_routes::routes(region_service))
        .merge(weather_routes::routes(refresh_service))
        .merge(recommendations_routes::routes(recommendation_service))
        .merge(location_routes::routes(geolocation_client))
        .merge(admin_routes::routes(admin_service));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    // Connect info feeds the caller address to the geolocation endpoint
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
