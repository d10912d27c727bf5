//! statusmsg-redirect console
//!
//! Runs the redirect hook against server lines read from stdin, the way a
//! bouncer would for one downstream client, and accepts module commands.

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{error, info};

use statusmsg_redirect::config::{env::get_config_path, load_and_validate};
use statusmsg_redirect::console::{self, Console, MODULE_NICK};
use statusmsg_redirect::redirect::{ClientSession, RedirectState, StatusMsgRedirect};
use statusmsg_redirect::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout carries console output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("statusmsg-redirect v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let session = ClientSession::new(config.client_identifier(), config.status_prefixes())
        .with_channel_types(config.channel_types());
    info!("Configuration loaded successfully");
    info!("  Redirected kinds: {:?}", config.redirect_kinds());
    info!("  Client identifier: '{}'", session.client_identifier);
    info!("  STATUSMSG: '{}'", session.status_prefixes);
    info!("  CHANTYPES: '{}'", session.channel_types);

    // Restore persisted module state
    let store = JsonFileStore::open(&config.store.path)?;
    info!("  Store: {}", store.path().display());
    let state = Arc::new(RedirectState::restore(Box::new(store))?);
    let redirect = StatusMsgRedirect::new(state.clone(), config.redirect_kinds());
    let mut console = Console::new(redirect, session);

    info!("Ready. Send '{} help' for module commands", MODULE_NICK);

    tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
        result = console::run(&mut console, tokio::io::stdin(), tokio::io::stdout()) => {
            if let Err(e) = result {
                error!("Console error: {}", e);
            }
        }
    }

    // Persist on the way out
    if let Err(e) = state.save() {
        error!("Failed to save state: {}", e);
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
