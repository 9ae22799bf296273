//! Menu gateway CLI.
//!
//! Stands in for the HTTP edge: each subcommand drives the library the
//! way a route handler would and prints JSON on stdout. Diagnostics
//! (stale-cache metadata, failure bodies) go to stderr so stdout stays
//! machine-readable.
//!
//! **Subcommands**
//! - `catalog`: fetch the joined catalog through the TTL cache
//! - `item <id>`: look one catalog item up by id
//! - `resolve <name> [--category ...]`: map a display name to an asset path
//! - `check-config`: validate the environment without touching upstream
use anyhow::Result;
use clap::{Parser, Subcommand};

use menu_assets::resolve_asset;
use menu_gateway::{body_json, error_json, stale_meta, Config, MenuService};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the aggregated catalog as a JSON array.
    Catalog,
    /// Print one catalog item looked up by its id.
    Item {
        /// Item id; numeric and string ids compare as strings.
        id: String,
    },
    /// Resolve a menu item display name to a static asset path.
    Resolve {
        /// Display name, e.g. "Капучино".
        name: String,
        /// Category name used to try composite keys first.
        #[arg(long)]
        category: Option<String>,
    },
    /// Verify all required environment variables are set.
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Catalog => {
            let service = MenuService::new();
            match service.catalog().await {
                Ok(reply) => {
                    if let Some(meta) = stale_meta(&reply) {
                        eprintln!("{meta}");
                    }
                    println!("{}", serde_json::to_string_pretty(&body_json(&reply))?);
                }
                Err(err) => {
                    eprintln!("{}", error_json(&err));
                    std::process::exit(1);
                }
            }
        }
        Command::Item { id } => {
            let service = MenuService::new();
            match service.find_item(&id).await {
                Ok(Some(item)) => {
                    println!("{}", serde_json::to_string_pretty(&item)?);
                }
                Ok(None) => {
                    eprintln!("no item with id {id}");
                    std::process::exit(1);
                }
                Err(err) => {
                    eprintln!("{}", error_json(&err));
                    std::process::exit(1);
                }
            }
        }
        Command::Resolve { name, category } => match resolve_asset(&name, category.as_deref()) {
            Some(path) => println!("{path}"),
            None => {
                eprintln!("no asset for {name}");
                std::process::exit(1);
            }
        },
        Command::CheckConfig => match Config::from_env() {
            Ok(_) => println!("ok"),
            Err(err) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": "missing configuration",
                        "missing": err.missing,
                    })
                );
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
