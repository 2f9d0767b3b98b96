//! `mapsquare-path`: load a world snapshot and answer collision and path
//! queries as JSON on stdout.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use mapsquare_nav::{CollisionFlags, DoorRecord, NavConfig, Navigator, Point, init_pathfinding_with};

use cli::{Cli, Command};

#[derive(Debug, Serialize)]
struct PathReport {
    waypoints: Vec<Point>,
    reached: bool,
    doors: Vec<DoorRecord>,
}

#[derive(Debug, Serialize)]
struct TileReport {
    level: u8,
    x: i32,
    z: i32,
    allocated: bool,
    flags: Option<u32>,
    flag_names: Option<String>,
    walkable: bool,
    likely_land: bool,
    doors: Vec<DoorRecord>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level, cli.json_logs)?;

    let config = match &cli.config {
        Some(path) => cli::load_config(path)?,
        None => NavConfig::default(),
    };
    let nav = init_pathfinding_with(&cli.snapshot, config)
        .with_context(|| format!("failed to initialize from {}", cli.snapshot.display()))?;

    let out = match cli.command {
        Command::Path {
            level,
            src_x,
            src_z,
            dest_x,
            dest_z,
        } => serde_json::to_string_pretty(&path_report(&nav, level, src_x, src_z, dest_x, dest_z))?,
        Command::Tile { level, x, z } => serde_json::to_string_pretty(&tile_report(&nav, level, x, z))?,
        Command::Stats => serde_json::to_string_pretty(&nav.stats())?,
    };
    println!("{out}");
    Ok(())
}

fn path_report(nav: &Navigator, level: u8, src_x: i32, src_z: i32, dest_x: i32, dest_z: i32) -> PathReport {
    let waypoints = nav.find_long_path(level, src_x, src_z, dest_x, dest_z);
    let reached = waypoints.last() == Some(&Point::new(dest_x, dest_z));
    // doors on the source tile count too
    let mut walked = Vec::with_capacity(waypoints.len() + 1);
    walked.push(Point::new(src_x, src_z));
    walked.extend(waypoints.iter().copied().filter(|&p| p != Point::new(src_x, src_z)));
    let doors = nav.find_doors_along_path(level, &walked);
    info!(
        "{} waypoints, reached={reached}, {} doors",
        waypoints.len(),
        doors.len()
    );
    PathReport {
        waypoints,
        reached,
        doors,
    }
}

fn tile_report(nav: &Navigator, level: u8, x: i32, z: i32) -> TileReport {
    let flags = nav.store().flags(level, Point::new(x, z));
    TileReport {
        level,
        x,
        z,
        allocated: nav.is_zone_allocated(level, x, z),
        flags: flags.map(CollisionFlags::bits),
        flag_names: flags.map(|f| f.to_string()),
        walkable: nav.is_tile_walkable(level, x, z),
        likely_land: nav.is_zone_likely_land(level, x, z),
        doors: nav.find_doors_along_path(level, &[Point::new(x, z)]),
    }
}
