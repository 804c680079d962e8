//! Pico Raycaster - map tools
//!
//! # Usage
//!
//! ```bash
//! # Create a 32x24 map with the spawn at its centre
//! raymap-tools new --width 32 --height 24
//!
//! # Show header, spawn and an ASCII drawing
//! raymap-tools inspect assets/mapdata.xip --legend
//!
//! # Check a container before shipping it
//! raymap-tools validate assets/mapdata.xip
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use raymap_core::assets::with_container_extension;
use raymap_core::catalog::TextureCatalog;
use raymap_core::document::MapDocument;
use raymap_tools::edit::{self, NewMapRequest};
use raymap_tools::inspect::{render_legend, Inspection};
use raymap_tools::validate::validate_file;
use raymap_tools::{ToolsConfig, ToolsResult};

#[derive(Parser)]
#[command(name = "raymap-tools")]
#[command(about = "Map tools for the pico raycaster")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// RON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured assets directory
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and save a blank map
    New {
        /// Width in tiles
        #[arg(long)]
        width: Option<u32>,
        /// Height in tiles
        #[arg(long)]
        height: Option<u32>,
        /// Spawn position in tiles, as X,Y
        #[arg(long, value_parser = parse_point)]
        spawn: Option<(f64, f64)>,
        /// Spawn heading in degrees
        #[arg(long, default_value_t = 0.0)]
        angle: f64,
        /// Output file
        path: Option<PathBuf>,
    },

    /// Print a container's header, spawn and layout
    Inspect {
        /// Container file
        path: Option<PathBuf>,
        /// Print a JSON summary instead
        #[arg(long)]
        json: bool,
        /// Append tile names from the catalog
        #[arg(long)]
        legend: bool,
    },

    /// Check that a container decodes and could be saved
    Validate {
        /// Container file
        path: Option<PathBuf>,
    },

    /// Paint one tile
    Paint {
        /// Column
        x: i32,
        /// Row
        y: i32,
        /// Tile index, 0 for empty
        tile: u8,
        /// Container file
        path: Option<PathBuf>,
    },

    /// Move the player spawn
    Spawn {
        /// X position in tiles
        x: f64,
        /// Y position in tiles
        y: f64,
        /// New heading in degrees
        #[arg(long)]
        angle: Option<f64>,
        /// Container file
        path: Option<PathBuf>,
    },

    /// List the tile catalog
    Tiles {
        /// Include shaded variants
        #[arg(long)]
        all: bool,
    },
}

fn parse_point(text: &str) -> Result<(f64, f64), String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("'{part}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// `RUST_LOG`-style directives on top of a default level picked by `--verbose`.
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

fn main() {
    let cli = Cli::parse();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, &directives))
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

/// Run one subcommand. `Ok(false)` means it ran but found problems.
fn run(cli: Cli) -> ToolsResult<bool> {
    let mut config = ToolsConfig::load_or_default(cli.config.as_deref())?;
    if let Some(assets) = cli.assets {
        config.assets_dir = assets;
    }
    let map_path =
        |path: Option<PathBuf>| path.unwrap_or_else(|| config.asset_paths().map_path());

    match cli.command {
        Commands::New {
            width,
            height,
            spawn,
            angle,
            path,
        } => {
            let defaults = NewMapRequest::from_config(&config);
            let request = NewMapRequest {
                width: width.unwrap_or(defaults.width),
                height: height.unwrap_or(defaults.height),
                spawn,
                heading: angle,
            };
            let path = with_container_extension(map_path(path));
            let mut document = edit::create_map(&config, &request)?;
            document.save_to_path(&path)?;
            tracing::info!("Wrote {}", path.display());
        }
        Commands::Inspect { path, json, legend } => {
            let inspection = Inspection::from_path(map_path(path))?;
            if json {
                println!("{}", inspection.to_json()?);
            } else {
                print!("{}", inspection.render_text());
                if legend {
                    let catalog = TextureCatalog::load(config.asset_paths().catalog_path())?;
                    println!();
                    print!("{}", render_legend(&inspection.document, &catalog));
                }
            }
        }
        Commands::Validate { path } => {
            let path = map_path(path);
            let issues = validate_file(&path)?;
            if !issues.is_empty() {
                for issue in &issues {
                    tracing::error!("{issue}");
                }
                return Ok(false);
            }
            tracing::info!("{} is valid", path.display());
        }
        Commands::Paint { x, y, tile, path } => {
            let path = map_path(path);
            let mut document = MapDocument::open(&path)?;
            if edit::paint(&mut document, x, y, tile)? {
                document.save_to_path(&path)?;
                tracing::info!("Painted ({x}, {y}) with tile {tile}");
            } else {
                tracing::info!("Tile ({x}, {y}) already holds {tile}");
            }
        }
        Commands::Spawn { x, y, angle, path } => {
            let path = map_path(path);
            let mut document = MapDocument::open(&path)?;
            edit::place_spawn(&mut document, x, y, angle)?;
            document.save_to_path(&path)?;
            tracing::info!("Spawn moved to ({x}, {y})");
        }
        Commands::Tiles { all } => {
            let catalog = TextureCatalog::load(config.asset_paths().catalog_path())?;
            for (tile, info) in catalog.tiles(!all) {
                println!("{tile:>3} {} {}", info.color, info.name);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3.5, 4"), Ok((3.5, 4.0)));
        assert!(parse_point("3.5").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(false, "").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, "").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(false, "raymap_core=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
