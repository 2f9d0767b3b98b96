//! Command-line arguments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mapsquare_nav::{NavConfig, NavError};

#[derive(Parser, Debug)]
#[command(
    name = "mapsquare-path",
    version,
    about = "Query tile collision and long-distance paths in a world snapshot"
)]
pub struct Cli {
    /// World snapshot (JSON with tiles, zones and doors arrays)
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Navigation settings (TOML); defaults are used for missing keys
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find a path and the doors along it
    Path {
        level: u8,
        src_x: i32,
        src_z: i32,
        dest_x: i32,
        dest_z: i32,
    },
    /// Show what the store knows about one tile
    Tile { level: u8, x: i32, z: i32 },
    /// Show store statistics
    Stats,
}

/// Read and validate a TOML [`NavConfig`].
pub fn load_config(path: &Path) -> Result<NavConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&text).with_context(|| format!("in config {}", path.display()))?;
    Ok(config)
}

/// Parse and validate a TOML [`NavConfig`].
pub fn parse_config(text: &str) -> Result<NavConfig, NavError> {
    let config: NavConfig = toml::from_str(text).map_err(|e| NavError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_path_query() {
        let cli = Cli::try_parse_from([
            "mapsquare-path",
            "--snapshot",
            "world.json",
            "path",
            "0",
            "3222",
            "3218",
            "2964",
            "3378",
        ])
        .unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("world.json"));
        assert_eq!(cli.log_level, "info");
        assert!(!cli.json_logs);
        assert_eq!(
            cli.command,
            Command::Path {
                level: 0,
                src_x: 3222,
                src_z: 3218,
                dest_x: 2964,
                dest_z: 3378
            }
        );
    }

    #[test]
    fn snapshot_is_required() {
        assert!(Cli::try_parse_from(["mapsquare-path", "stats"]).is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config("land_radius = 3\ncorridor_margins = [4, 16]\n").unwrap();
        assert_eq!(config.land_radius, 3);
        assert_eq!(config.corridor_margins, vec![4, 16]);
        assert_eq!(config.max_path_length, NavConfig::default().max_path_length);
    }

    #[test]
    fn bad_config_is_a_config_error() {
        assert!(matches!(parse_config("land_radius = \"far\""), Err(NavError::Config(_))));
        assert!(matches!(parse_config("max_path_length = 0"), Err(NavError::Config(_))));
    }
}
