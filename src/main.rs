use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{create_router, AppState};
use casebook_core::config::{
    default_variant_from_env_value, max_sessions_from_env_value, resolve_asset_dir,
};
use casebook_core::{AssetCatalog, ContentRegistry, CoreConfig, SessionStore};

/// Main entry point for the Casebook server
///
/// Serves the HTML dashboard, the JSON API and its Swagger UI on one address.
///
/// # Environment Variables
/// - `CASEBOOK_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CASEBOOK_VARIANT`: Default content variant (default: "textbot-v1")
/// - `CASEBOOK_ASSET_DIR`: Image directory (default: search for `assets/`)
/// - `CASEBOOK_CONTENT_DIR`: Directory of extra YAML content variants (optional)
/// - `CASEBOOK_MAX_SESSIONS`: Session cap (default: 10000)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is invalid,
/// - any content variant fails validation,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casebook=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("CASEBOOK_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let asset_override = std::env::var("CASEBOOK_ASSET_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let content_dir = std::env::var("CASEBOOK_CONTENT_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    let cfg = CoreConfig::new(
        default_variant_from_env_value(std::env::var("CASEBOOK_VARIANT").ok()),
        resolve_asset_dir(asset_override)?,
        content_dir,
        max_sessions_from_env_value(std::env::var("CASEBOOK_MAX_SESSIONS").ok())?,
    )?;

    let registry = ContentRegistry::from_config(&cfg)?;
    tracing::info!(
        "-- Loaded content variants {:?}, default {}",
        registry.variant_ids(),
        registry.default_navigator().variant_id()
    );
    let assets = AssetCatalog::scan(cfg.asset_dir());
    let sessions = SessionStore::new(cfg.max_sessions());

    let app = create_router(AppState::new(registry, sessions, assets));

    tracing::info!("-- Starting Casebook on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("-- Shutting down");
}
