mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::hotspots::{
    routes as hotspots_routes, HotspotService, HotspotStore, PgHotspotStore,
};
use crate::features::seed::{load_fixture, SeedOptions, SeedService};
use crate::features::stats::{routes as stats_routes, StatsService};
use crate::shared::constants::DEFAULT_FIXTURE_PATH;
use axum::{middleware::from_fn, Router};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Parser)]
#[command(author, version, about = "CarbonLens emission hotspot API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Replace every stored hotspot with the records of a JSON fixture
    Seed {
        /// Path to the fixture file
        #[arg(long, env = "SEED_FIXTURE_PATH", default_value = DEFAULT_FIXTURE_PATH)]
        fixture: PathBuf,
        /// Fill empty preventive measures with rule-based recommendations
        #[arg(long)]
        fill_measures: bool,
    },
}

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

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool).await?;

    let store: Arc<dyn HotspotStore> = Arc::new(PgHotspotStore::new(pool));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, store, worker_threads).await,
        Command::Seed {
            fixture,
            fill_measures,
        } => seed(store, fixture, fill_measures).await,
    }
}

async fn seed(
    store: Arc<dyn HotspotStore>,
    fixture: PathBuf,
    fill_measures: bool,
) -> anyhow::Result<()> {
    tracing::info!("Loading fixture from {}", fixture.display());
    let records = load_fixture(&fixture).await?;

    let summary = SeedService::new(store)
        .seed(
            records,
            SeedOptions {
                fill_missing_measures: fill_measures,
            },
        )
        .await?;

    if !summary.risk_mismatches.is_empty() {
        tracing::warn!(
            "{} fixture records declare a risk level that disagrees with their readings: {}",
            summary.risk_mismatches.len(),
            summary.risk_mismatches.join(", ")
        );
    }

    let stats = &summary.stats;
    tracing::info!(
        "Database seeded successfully: inserted={}, total={}, high={}, medium={}, low={}, avg_pm25={}, avg_co2={}",
        summary.inserted,
        stats.total_hotspots,
        stats.risk_levels.high,
        stats.risk_levels.medium,
        stats.risk_levels.low,
        stats.averages.pm25,
        stats.averages.co2
    );

    Ok(())
}

// Simple health check endpoint
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Builds the full application router: API routes, Swagger UI, health check
/// and the CORS / request-id / tracing layers.
fn build_router(config: &Config, store: Arc<dyn HotspotStore>) -> Router {
    let hotspot_service = Arc::new(HotspotService::new(Arc::clone(&store)));
    let stats_service = Arc::new(StatsService::new(store));
    tracing::info!("Hotspot and stats services initialized");

    // Build OpenAPI document with dynamic swagger config
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

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(swagger)
        .merge(hotspots_routes::routes(hotspot_service))
        .merge(stats_routes::routes(stats_service))
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
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

async fn serve(
    config: &Config,
    store: Arc<dyn HotspotStore>,
    worker_threads: usize,
) -> anyhow::Result<()> {
    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    let app = build_router(config, store);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
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
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
