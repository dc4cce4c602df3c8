//! Admin site server.
//!
//! Loads the configuration named by `ADMIN_CONFIG` (default `admin.toml`)
//! and serves the admin routes until ctrl-c.
//!
//! ```bash
//! export ADMIN_CONFIG=/etc/daisy/admin.toml
//! export JWT_SECRET=your_jwt_secret
//! daisy-admin
//! ```

use std::sync::Arc;

use daisy_admin::{
    config::AdminConfig,
    prelude::*,
    web::{AdminState, api::router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AdminConfig::from_env()?);
    let state = AdminState::from_config(config.clone())?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        "Admin site listening on {} under {}",
        listener.local_addr()?,
        config.server.admin_root
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
