//! # twinrag-server
//!
//! The entry point for the portfolio question-answering server. Runs either
//! the HTTP adapters (`serve`, the default) or the newline-delimited
//! JSON-RPC transport (`stdio`) over the same pipeline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use twinrag_server::{config::get_config, state::build_app_state, stdio};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.yml).
    #[arg(long)]
    config: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (chat + JSON-RPC endpoints)
    Serve,
    /// Run the newline-delimited JSON-RPC transport over stdin/stdout
    Stdio,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr unconditionally: in stdio mode stdout must carry
    // nothing but JSON-RPC responses.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = get_config(cli.config.as_deref())?;
    let app_state = build_app_state(config).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let addr = SocketAddr::from(([0, 0, 0, 0], app_state.config.port));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Server listening on {addr}");
            twinrag_server::run(listener, app_state).await
        }
        Commands::Stdio => stdio::run_stdio(app_state).await,
    }
}
