use std::sync::Arc;

use anyhow::Context;
use picupload_core::Uploader;
use picupload_http::config::Config;
use picupload_http::{router, AppState};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,picupload_http=debug,picupload_core=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let upload_dir = config.upload_dir();
    std::fs::create_dir_all(&upload_dir)
        .with_context(|| format!("cannot create upload directory {}", upload_dir.display()))?;
    info!("Storing uploads in {}", upload_dir.display());

    let uploader = Uploader::with_sink(config.sink());
    let state = Arc::new(AppState::new(
        Arc::new(uploader),
        config.upload_location.clone(),
    ));
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}
