//! Favorites CLI
//!
//! Drives a single favorites coordinator per invocation against the
//! configured store and catalog. Configuration comes from `FAVORITES_*`
//! environment variables (a `.env` file is honored) and command-line flags.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use favorites_core::{
    CategoryOutcome, FavoritesConfig, FavoritesCoordinator, FavoritesEvent, HydrationPolicy,
    StoreBackend,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage favorite characters")]
struct Cli {
    /// Store backend (memory, sqlite, remote); overrides FAVORITES_STORE
    #[arg(long, global = true, value_parser = parse_backend)]
    store: Option<StoreBackend>,
    /// Catalog base URL; overrides FAVORITES_CATALOG_URL
    #[arg(long, global = true)]
    catalog_url: Option<String>,
    /// Apply categories that loaded even when others fail
    #[arg(long, global = true)]
    best_effort: bool,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Mark a character as favorite
    Add {
        /// Character id
        id: i64,
    },
    /// Remove a character from favorites
    Remove {
        /// Character id
        id: i64,
    },
    /// List favorite character ids
    List,
    /// Check whether a character is a favorite
    Check {
        /// Character id
        id: i64,
    },
    /// Resolve favorites into full character records
    Hydrate,
}

fn parse_backend(value: &str) -> Result<StoreBackend, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<FavoritesConfig> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// Environment overrides from `lookup`, then command-line flags on top
fn build_config_with<F>(cli: &Cli, lookup: F) -> anyhow::Result<FavoritesConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config =
        FavoritesConfig::from_lookup(lookup).context("Failed to load configuration")?;
    if let Some(backend) = cli.store {
        config.store.backend = backend;
    }
    if let Some(url) = &cli.catalog_url {
        config.catalog.base_url = url.clone();
    }
    if cli.best_effort {
        config.hydration_policy = HydrationPolicy::BestEffort;
    }
    Ok(config)
}

/// Forward coordinator events to the log
fn spawn_event_logger() -> (mpsc::Sender<FavoritesEvent>, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<FavoritesEvent>(64);
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            tracing::debug!(kind = ?event.kind, data = ?event.data, "favorites event");
        }
    });
    (tx, handle)
}

fn print_ids(coordinator: &FavoritesCoordinator) {
    if coordinator.favorite_ids().is_empty() {
        println!("No favorites yet");
        return;
    }
    for favorite in coordinator.favorite_ids() {
        println!("{}", favorite.character_id);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let (event_tx, event_logger) = spawn_event_logger();
    let mut coordinator = FavoritesCoordinator::from_config(&config)?.with_event_channel(event_tx);

    match cli.command {
        Command::Add { id } => {
            coordinator.refresh_favorite_ids().await;
            coordinator.add_to_favorite(id).await;
            print_ids(&coordinator);
        }
        Command::Remove { id } => {
            coordinator.refresh_favorite_ids().await;
            if coordinator.remove_from_favorites(id).await {
                println!("Removed {}", id);
            }
        }
        Command::List => {
            coordinator.refresh_favorite_ids().await;
            print_ids(&coordinator);
        }
        Command::Check { id } => {
            coordinator.refresh_favorite_ids().await;
            println!("{}", coordinator.is_favorite(id));
        }
        Command::Hydrate => {
            coordinator.refresh_favorite_ids().await;
            let report = coordinator.refresh_hydrated_characters().await;
            for outcome in &report.outcomes {
                match outcome {
                    CategoryOutcome::Loaded { category, count } => {
                        eprintln!("  {:<14} {} records", category, count)
                    }
                    CategoryOutcome::Failed { category, error } => {
                        eprintln!("  {:<14} failed: {}", category, error)
                    }
                }
            }
            println!(
                "{}",
                serde_json::to_string_pretty(coordinator.hydrated_characters())?
            );
            if let Some(warning) = coordinator.hydration_warning() {
                eprintln!("Warning: {}", warning);
            }
        }
    }

    let has_error = coordinator.has_error();
    let message = coordinator.error_message().to_string();

    // Closing the channel lets the logger drain and exit
    drop(coordinator);
    let _ = event_logger.await;

    if has_error {
        bail!(message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await
}
