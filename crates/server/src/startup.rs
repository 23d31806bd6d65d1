use std::net::SocketAddr;

use axum::Router;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::photo_store::PhotoStore;

use crate::routes::{self, AppState};

fn init_logging() {
    common::utils::logging::init_logging_default();
}

/// The original service sits behind `CORS(app)` with no restrictions.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load config, open the store, and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let store = PhotoStore::new(&cfg.storage.upload_dir).await?;
    info!(upload_dir = %cfg.storage.upload_dir, "upload directory ready");

    let state = AppState { store };
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting photo store service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
