//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ICE-AGE - Greenland iceberg catalog dashboard
#[derive(Parser, Debug)]
#[command(name = "iceage")]
#[command(author, version, about = "ICE-AGE Greenland iceberg catalog dashboard", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard over HTTP
    Serve(ServeArgs),

    /// Inspect or edit the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Write a figure to an SVG or PNG file
    Render {
        /// Figure to render
        #[command(subcommand)]
        figure: RenderCommand,
    },
}

/// Overrides for the `[server]` and `[catalog]` sections.
#[derive(clap::Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Catalog root directory
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the config file path in use
    Path,

    /// Print a value by dotted key (e.g. `server.port`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target file instead of the platform default
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=value` for docker
        #[arg(long)]
        docker_env: bool,
    },
}

/// Figures that can be exported.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Iceberg counts per study site
    Distribution {
        /// Output file (`.svg` or `.png`)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Correlogram of one melt-rate table
    Correlogram {
        /// Site code
        #[arg(long)]
        site: String,
        /// Early date, YYYYMMDD
        #[arg(long)]
        early: String,
        /// Later date, YYYYMMDD
        #[arg(long)]
        later: String,
        /// Output file (`.svg` or `.png`)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Quartile comparison of one date range's outlines
    Quartiles {
        /// Site code
        #[arg(long)]
        site: String,
        /// Date-range folder, `<early>-<later>`
        #[arg(long)]
        range: String,
        /// Output file (`.svg` or `.png`)
        #[arg(short, long)]
        out: PathBuf,
    },
}

impl RenderCommand {
    /// Output path of the figure.
    pub fn out(&self) -> &PathBuf {
        match self {
            RenderCommand::Distribution { out }
            | RenderCommand::Correlogram { out, .. }
            | RenderCommand::Quartiles { out, .. } => out,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["iceage", "serve", "--port", "9000", "--catalog", "/data"]).unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.catalog, Some(PathBuf::from("/data")));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_render_quartiles() {
        let cli = Cli::try_parse_from([
            "iceage", "--config", "c.toml", "render", "quartiles", "--site", "KOG", "--range",
            "20170515-20170611", "--out", "q.png",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("c.toml"));
        let Command::Render { figure } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(figure.out(), &PathBuf::from("q.png"));
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["iceage", "config", "set", "server.port", "8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config { action: ConfigAction::Set { ref key, ref value } } if key == "server.port" && value == "8080"
        ));
    }
}
