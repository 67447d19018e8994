mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfpick-cli")]
#[command(about = "Product picker and discount list editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one page of catalog search results and print it as JSON
    Search {
        /// Search term; empty lists the whole catalog
        #[arg(long, default_value = "")]
        term: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Pick products from the catalog into a fresh list and print the list
    Pick {
        #[arg(long, default_value = "")]
        term: String,
        /// Number of result pages to load before selecting
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Product ID to select with all its variants (repeatable)
        #[arg(long = "product")]
        products: Vec<String>,
    },
    /// Apply a JSON script of list operations to a fresh list (offline)
    Apply {
        #[arg(long)]
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search { term, page }) => {
            let config = load_config_and_init_tracing()?;
            commands::run_search(&config, &term, page).await?;
        }
        Some(Commands::Pick {
            term,
            pages,
            products,
        }) => {
            let config = load_config_and_init_tracing()?;
            commands::run_pick(&config, &term, pages, &products).await?;
        }
        Some(Commands::Apply { script }) => {
            init_tracing("info")?;
            commands::run_apply(&script)?;
        }
        None => println!("shelfpick-cli: run with --help for commands"),
    }

    Ok(())
}

fn load_config_and_init_tracing() -> anyhow::Result<shelfpick_core::AppConfig> {
    let config = shelfpick_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(env = %config.env, base_url = %config.catalog_base_url, "config loaded");
    Ok(config)
}

fn init_tracing(fallback_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
