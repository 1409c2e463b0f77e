use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use iclboard_core::{BoardConfig, ListingService};

/// Main entry point for the ICL board server
///
/// Resolves configuration once, then serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `ICL_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CATHLIST`: scheduling feed base URL (required)
/// - `ICL_FEED_TIMEOUT_SECS`: feed request timeout in seconds (default: 30)
/// - `ICL_FEED_ACCEPT_INVALID_CERTS`: disable TLS verification against the feed (default: false)
/// - `ICL_FEED_STATUS_CODE`: optional `sts` value sent to the feed
/// - `ICL_DATABASE_PATH`: SQLite procedure store (default: "iclms.sqlite")
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding, or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("iclboard=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let rest_addr = std::env::var("ICL_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = BoardConfig::from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!(
        feed = %cfg.feed().base_url(),
        database = %cfg.database_path().display(),
        "configuration resolved"
    );

    let listing_service = ListingService::new(&cfg)?;
    let app = api_rest::router(AppState::new(listing_service));

    tracing::info!("++ Starting ICL board REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("-- Shutting down ICL board REST");
}
