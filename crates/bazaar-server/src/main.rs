use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use bazaar_app::state::AppStateInner;
use bazaar_gateway::{BackendConfig, SupabaseGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar=debug,tower_http=debug".into()),
        )
        .init();

    // Config: the backend endpoint and key are required and fail fast
    let backend = BackendConfig::from_env()?;
    let host = std::env::var("BAZAAR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("BAZAAR_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let static_dir = std::env::var("BAZAAR_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("static"));

    // Shared state: the HTTP gateway behind the injectable boundary
    let image_origin = Some(backend.image_origin().to_string());
    let gateway = Arc::new(SupabaseGateway::new(backend));
    let state = AppStateInner::new(gateway, image_origin);

    let app = bazaar_app::app(state)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Bazaar listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
