use clap::{Parser, Subcommand};
use database::connection::{connect, run_migrations};
use std::net::SocketAddr;

/// The main entry point for the Tradeflow analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    // Structured logging; verbosity is controlled through RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Migrate => handle_migrate().await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An analytics service over the intraday trade-execution table.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analytics web server.
    Serve(ServeArgs),
    /// Apply the database migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the interface from config.toml (e.g., "127.0.0.1").
    #[arg(long)]
    host: Option<String>,

    /// Override the port from config.toml.
    #[arg(long)]
    port: Option<u16>,
}

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    web_server::run_server(addr, config).await
}

async fn handle_migrate() -> anyhow::Result<()> {
    let db_pool = connect().await?;
    run_migrations(&db_pool).await?;
    tracing::info!("Migrations applied.");
    Ok(())
}
