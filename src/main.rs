//! Flair CLI binary entry point.

use clap::Parser;
use flair_client::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> flair_client::error::Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Token => commands::handle_token(&config).await,
        Commands::Validate => {
            if !commands::handle_validate(&config).await? {
                std::process::exit(2);
            }
            Ok(())
        }
        Commands::Structures => commands::handle_structures(&config).await,
        Commands::Rooms => commands::handle_rooms(&config).await,
        Commands::SetPoint(args) => {
            commands::handle_set_point(&config, &args.room, args.celsius).await
        }
    }
}
