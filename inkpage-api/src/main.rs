use anyhow::Context;
use clap::Parser;
use inkpage_api::{app, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpage_api=debug,inkpage=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    for (style, path) in config.missing_fonts() {
        warn!(style, path = %path.display(), "font file not found; requests using it will fail");
    }

    let app = app(config.renderer());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!("inkpage API listening on http://{}", config.bind);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
