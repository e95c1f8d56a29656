//! Route table validation CLI tool
//!
//! Validates an ordersys route file and reports any errors.

use ordersys_config::{Access, RouteTarget};
use ordersys_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-routes [routes-file]");
            eprintln!();
            eprintln!("Validates an ordersys route table.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Route file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match ordersys_config::load_config(&config_path) {
        Ok(table) => {
            println!("✓ Route table is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", ordersys_config::CURRENT_CONFIG_VERSION);
            println!("  Login path: {}", table.app.login_path);
            println!("  Home path: {}", table.app.home_path);
            println!("  Routes: {}", table.len());
            println!();
            println!("Routes:");
            for entry in table.entries() {
                let target = match &entry.target {
                    RouteTarget::View(view) => format!("view {}", view),
                    RouteTarget::Redirect(to) => format!("-> {}", to),
                };
                println!(
                    "  - {} {} [{}]: {}",
                    entry.name,
                    entry.pattern,
                    access_label(entry.access),
                    target
                );
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Route table validation failed");
            eprintln!();
            match &e {
                ordersys_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                ordersys_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                ordersys_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                ordersys_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        ordersys_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}

fn access_label(access: Access) -> &'static str {
    if access.contains(Access::REQUIRES_ADMIN) {
        "admin"
    } else if access.contains(Access::REQUIRES_AUTH) {
        "auth"
    } else if access.contains(Access::REQUIRES_GUEST) {
        "guest"
    } else {
        "public"
    }
}
