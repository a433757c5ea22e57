use std::{future, sync::Arc};

use anyhow::Context;
use log::{info, warn};
use model::LinearModel;
use tokio::{net::TcpListener, signal};

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let model = LinearModel::load(&config.model_path).with_context(|| {
        format!("failed to load model from {}", config.model_path.display())
    })?;
    info!("loaded model from {}", config.model_path.display());

    let app = server::router(Arc::new(model));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("wrapping up, bye");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c, shutting down"),
        Err(e) => {
            warn!("unable to listen for shutdown signals: {e}");
            future::pending::<()>().await;
        }
    }
}
