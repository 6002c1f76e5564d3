use std::{future::Future, net::SocketAddr, path::Path};

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
    } else {
        warn!(%path, "config file not found, falling back to environment");
        AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
    }
}

/// Connect the pool, optionally create the schema, and wire the router.
pub async fn build_app(db_cfg: &DatabaseConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(db_cfg).await?;
    if db_cfg.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Runtime(format!("migration failed: {e}")))?;
        info!("schema ready");
    }
    Ok(routes::build_router(AppState::from_db(db), build_cors()))
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg.database).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {addr}: {e}")))?;
    info!(%addr, "listening");

    serve(listener, app, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    })
    .await
}
