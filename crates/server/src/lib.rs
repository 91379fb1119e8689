pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod rpc;
pub mod state;
pub mod stdio;

use crate::{router::create_router, state::AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Configures and runs the web server.
///
/// Builds the router from the prepared application state and serves until
/// the process is terminated.
pub async fn run(listener: TcpListener, app_state: AppState) -> anyhow::Result<()> {
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
