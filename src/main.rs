//! route-guard CLI.
//!
//! Validates binding configuration and inspects the resulting registry.
//!
//! ```text
//! route-guard check  guard.toml               → protection table, non-zero exit on errors
//! route-guard query  guard.toml GET /admin    → "protected" | "open"
//! route-guard watch  guard.toml               → rebuild + swap registry on every file change
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use route_guard::config::{load_config, watcher::ConfigWatcher};
use route_guard::lifecycle::{reload::run_reloader, signals::shutdown_on_ctrl_c, start, Shutdown};
use route_guard::observability::logging;
use route_guard::{HandlerKey, RegistryBuilder, SecurityRegistry};

#[derive(Parser)]
#[command(name = "route-guard")]
#[command(about = "Inspect and validate handler security bindings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and print the protection table
    Check { config: PathBuf },
    /// Report whether a single handler is protected
    Query {
        config: PathBuf,
        method: String,
        route: String,
    },
    /// Keep the registry live and reload it whenever the file changes
    Watch { config: PathBuf },
}

impl Commands {
    fn config_path(&self) -> &Path {
        match self {
            Commands::Check { config } | Commands::Query { config, .. } | Commands::Watch { config } => {
                config
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Errors from this first read are reported by `start` below.
    let level = load_config(cli.command.config_path())
        .map(|c| c.observability.log_level)
        .unwrap_or_else(|_| "info".to_string());
    logging::init(&level);

    let (_, handle) = start(cli.command.config_path(), RegistryBuilder::new())?;

    match cli.command {
        Commands::Check { .. } => {
            print_table(&handle.load());
        }
        Commands::Query { method, route, .. } => {
            let key = HandlerKey::parse(&method, route.as_str())
                .ok_or_else(|| format!("invalid HTTP method '{method}'"))?;
            println!("{key}: {}", verdict(&handle.load(), &key));
        }
        Commands::Watch { config } => {
            let shutdown = Shutdown::new();
            let (watcher, updates) = ConfigWatcher::new(&config);
            let _watcher = watcher.run()?;

            let reloader = tokio::spawn(run_reloader(
                handle.clone(),
                updates,
                RegistryBuilder::new,
                shutdown.subscribe(),
            ));

            print_table(&handle.load());
            shutdown_on_ctrl_c(&shutdown).await;
            reloader.await?;
        }
    }

    Ok(())
}

/// `protected`, `open`, or `open (not registered)` for handlers the file never mentions.
fn verdict(registry: &SecurityRegistry, key: &HandlerKey) -> &'static str {
    if registry.is_protected_route(key.method(), key.route()) {
        "protected"
    } else if registry.contains(key) {
        "open"
    } else {
        "open (not registered)"
    }
}

fn print_table(registry: &SecurityRegistry) {
    let width = registry
        .entries()
        .iter()
        .map(|(key, _)| key.to_string().len())
        .max()
        .unwrap_or(0);

    for (key, protected) in registry.entries() {
        let status = if protected { "protected" } else { "open" };
        println!("{:<width$}  {status}", key.to_string());
    }
    println!(
        "{} handlers, {} protected",
        registry.len(),
        registry.protected_count()
    );
}
