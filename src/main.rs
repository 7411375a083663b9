use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use courrier::config::Settings;
use courrier::repository::postgres::PgApiKeyRepository;
use courrier::{create_app, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::load()?;

    let pool = db::create_pool(&settings).await?;
    let repository = Arc::new(PgApiKeyRepository::new(pool));

    let port = settings.port;
    let state = AppState::new(settings, repository)?;
    let app = create_app(state).await;

    let addr: std::net::SocketAddr = format!("[::]:{}", port).parse()?;
    tracing::info!("listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
