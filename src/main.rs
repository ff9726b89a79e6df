use clap::{Parser, Subcommand};
use configuration::Config;
use database::SeedOutcome;
use std::path::PathBuf;

/// The main entry point for the asthma treatment comparison application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (e.g. DATABASE_URL) from a .env file if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())?;
    let _log_guard = configuration::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration.");

    // Execute the appropriate command
    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            args.apply(&mut config);
            config.validate()?;
            web_server::run_server(&config).await?;
        }
        Commands::Seed => handle_seed(&config).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Patient-education server for comparing asthma treatment options.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store if needed, then serve the pages (the default).
    Serve(ServeArgs),
    /// Create the schema and seed the store, then exit.
    Seed,
}

#[derive(Parser, Default)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

// ==============================================================================
// Seed Command Logic
// ==============================================================================

async fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let db_pool = database::connect(&config.database).await?;
    let outcome = database::initialize(&db_pool).await?;
    db_pool.close().await;

    let counts = outcome.counts();
    let verb = match outcome {
        SeedOutcome::Seeded(_) => "Seeded",
        SeedOutcome::AlreadySeeded(_) => "Already seeded",
    };
    println!(
        "{verb} {}: {} treatments, {} attributes, {} details, {} questions, {} choices",
        config.database.url,
        counts.treatments,
        counts.attributes,
        counts.details,
        counts.questions,
        counts.choices
    );

    Ok(())
}
