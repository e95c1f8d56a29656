//! ordersys - host shell for the food-ordering client core
//!
//! Wires together:
//! - Route table loading (file or built-in)
//! - Durable key-value storage for the login
//! - The navigator, user state and cart
//!
//! Each stdin line is one JSON command such as `{"type": "go", "path": "/menu"}`
//! and each reply is written to stdout as one JSON object. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use ordersys::Shell;
use ordersys_config::{RouteTable, default_route_table, load_config};
use ordersys_store::{KeyValueStorage, SqliteStorage};
use ordersys_util::{DATABASE_FILENAME, default_config_path, default_data_dir};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// ordersys - food-ordering client core driven from the command line
#[derive(Parser, Debug)]
#[command(name = "ordersys")]
#[command(about = "Route guard, login state and cart for the food-ordering client", long_about = None)]
struct Args {
    /// Route table file (default: ~/.config/ordersys/routes.toml, falling
    /// back to the built-in table when that file does not exist)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory override (or set ORDERSYS_DATA_DIR env var)
    #[arg(short, long, env = "ORDERSYS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path entered at startup
    #[arg(long, default_value = "/")]
    start: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn load_routes(args: &Args) -> Result<RouteTable> {
    if let Some(path) = &args.config {
        let table = load_config(path)
            .with_context(|| format!("Failed to load routes from {:?}", path))?;
        info!(config_path = %path.display(), route_count = table.len(), "Routes loaded");
        return Ok(table);
    }

    let path = default_config_path();
    if path.exists() {
        let table = load_config(&path)
            .with_context(|| format!("Failed to load routes from {:?}", path))?;
        info!(config_path = %path.display(), route_count = table.len(), "Routes loaded");
        Ok(table)
    } else {
        let table = default_route_table().context("Built-in route table is invalid")?;
        info!(route_count = table.len(), "Using built-in routes");
        Ok(table)
    }
}

fn run(args: Args) -> Result<()> {
    let routes = load_routes(&args)?;

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| routes.app.data_dir.clone())
        .unwrap_or_else(default_data_dir);

    let db_path = data_dir.join(DATABASE_FILENAME);
    let storage: Arc<dyn KeyValueStorage> = Arc::new(
        SqliteStorage::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );

    info!(db_path = %db_path.display(), "Storage initialized");

    let mut shell = Shell::new(Arc::new(routes), storage);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let reply = shell.start(&args.start);
    writeln!(out, "{}", serde_json::to_string(&reply)?)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = shell.handle_line(&line);
        writeln!(out, "{}", serde_json::to_string(&reply)?)?;
        out.flush()?;

        if reply.is_bye() {
            break;
        }
    }

    if !shell.cart().is_empty() {
        warn!(lines = shell.cart().len(), "Exiting with a non-empty cart");
    }

    info!("Shutdown complete");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "ordersys starting"
    );

    run(args)
}
