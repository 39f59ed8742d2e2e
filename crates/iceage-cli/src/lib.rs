//! # iceage-cli
//!
//! Command-line front end for the ICE-AGE dashboard.
//!
//! - `iceage serve`: run the HTTP dashboard
//! - `iceage config {path|get|set|init|export}`: manage the config file
//! - `iceage render {distribution|correlogram|quartiles}`: export figures

pub mod cli;
pub mod config_handlers;
pub mod render_handlers;

use anyhow::Context;

use iceage_api::Server;
use iceage_core::{ConfigManager, IceageConfig};

pub use cli::{Cli, Command, ConfigAction, RenderCommand, ServeArgs};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,iceage=debug";

/// Install the tracing subscriber. `log` records from the library crates are
/// forwarded to it.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_LOG_FILTER };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()),
        )
        .init();
}

/// Configuration with `serve` flags applied over file and environment.
pub fn serve_config(config_path: Option<&str>, args: &ServeArgs) -> iceage_core::Result<IceageConfig> {
    let mut config = IceageConfig::load(config_path)?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(catalog) = &args.catalog {
        config.catalog.root = catalog.clone();
    }
    Ok(config)
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Serve(args) => {
            let config = serve_config(config_path, &args).context("Failed to load configuration")?;
            if !config.catalog.root.is_dir() {
                tracing::warn!(
                    root = %config.catalog.root.display(),
                    "Catalog root does not exist; pages will show missing-data messages"
                );
            }
            Server::new(config).run().await?;
        }
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
        }
        Command::Render { figure } => {
            let config = IceageConfig::load(config_path).context("Failed to load configuration")?;
            let out = tokio::task::spawn_blocking(move || render_handlers::handle_render_command(config, figure))
                .await??;
            println!("{}", out.display());
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_serve_flags_override_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 9000\n").unwrap();

        let args = ServeArgs {
            host: None,
            port: Some(9100),
            catalog: Some(PathBuf::from("/data/catalog")),
        };
        let config = serve_config(path.to_str(), &args).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.catalog.root, PathBuf::from("/data/catalog"));
    }

    #[test]
    fn test_serve_config_missing_explicit_file() {
        assert!(serve_config(Some("/nonexistent/iceage.toml"), &ServeArgs::default()).is_err());
    }
}
