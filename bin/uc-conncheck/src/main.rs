//! UserClouds AuthZ Connectivity Checker
//!
//! Authenticates with client credentials, then loops forever enumerating
//! all AuthZ objects and edges and resolving their type metadata. Any
//! downstream failure terminates the process with a non-zero exit; a
//! ctrl-c or SIGTERM stops the loop cleanly.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use uc_authz::{Client, ClientCredentialsTokenSource, TokenSource};
use uc_conncheck::ConncheckConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ConncheckConfig::from_env()?;
    info!(endpoint_url = %config.endpoint_url, region = %config.region, "using AuthZ endpoint");

    let token_source = Arc::new(
        ClientCredentialsTokenSource::new(
            &config.tenant_url,
            &config.client_id,
            &config.client_secret,
        )
        .context("building token source")?,
    );

    // Fetch a token up front so bad credentials fail at startup, not on
    // the first API call.
    token_source
        .access_token()
        .await
        .context("getting token, check values of provided client id, client secret and tenant url")?;

    let client = Client::new(config.client_config(), token_source)
        .context("creating authz client")?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    info!("starting connectivity loop");
    let loop_task = uc_conncheck::run(&client, shutdown_rx);
    tokio::pin!(loop_task);

    tokio::select! {
        result = &mut loop_task => {
            if let Err(ref e) = result {
                error!(error = %e, "connectivity check failed");
            }
            result.map_err(Into::into)
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(());
            loop_task.await.map_err(Into::into)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
