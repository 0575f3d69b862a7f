use clap::Parser;
use linkdrop::{Cli, Commands, LinkdropConfig, init_database, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, in_memory } => {
            let config = LinkdropConfig::load(config.as_deref())?;
            info!(mode = %config.environment(), "Starting linkdrop");
            serve(config, in_memory).await?;
        }
        Commands::InitDb { config } => {
            let config = LinkdropConfig::load(config.as_deref())?;
            init_database(&config).await?;
            info!("Database initialized");
        }
    }

    Ok(())
}
