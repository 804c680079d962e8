//! End-to-end tool workflow on a scratch assets directory.
//!
//! Mirrors what the CLI does: create a map from config, edit it on disk,
//! then inspect and validate the result.

use std::path::Path;

use raymap_core::document::MapDocument;
use raymap_core::error::MapError;
use raymap_tools::edit::{self, NewMapRequest};
use raymap_tools::inspect::Inspection;
use raymap_tools::validate::validate_file;
use raymap_tools::{ToolsConfig, ToolsError};

fn config_for(dir: &Path) -> ToolsConfig {
    let ron = format!(
        "(assets_dir: {:?}, map_file: \"level\", default_width: 20, default_height: 18)",
        dir
    );
    ToolsConfig::from_ron_str(&ron).expect("test config parses")
}

#[test]
fn test_create_edit_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = config.asset_paths().map_path();
    assert_eq!(path.file_name().unwrap(), "level.xip");

    let mut document = edit::create_map(&config, &NewMapRequest::from_config(&config)).unwrap();
    document.save_to_path(&path).unwrap();

    // Paint a wall, move the spawn, save again.
    let mut document = MapDocument::open(&path).unwrap();
    assert!(edit::paint(&mut document, 0, 0, 3).unwrap());
    edit::place_spawn(&mut document, 4.5, 5.5, Some(270.0)).unwrap();
    document.save_to_path(&path).unwrap();

    let inspection = Inspection::from_path(&path).unwrap();
    let summary = inspection.summary();
    assert_eq!((summary.width, summary.height), (Some(20), Some(18)));
    assert_eq!(summary.non_empty_tiles, 1);
    assert_eq!(summary.spawn_tile, Some((4, 5)));
    assert_eq!(summary.facing_degrees, Some(270));
    assert!(inspection.render_text().starts_with("container  version 100000"));

    assert!(validate_file(&path).unwrap().is_empty());
}

#[test]
fn test_painting_under_spawn_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = config.asset_paths().map_path();

    let mut document = edit::create_map(&config, &NewMapRequest::from_config(&config)).unwrap();
    document.save_to_path(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut document = MapDocument::open(&path).unwrap();
    let (x, y) = document.spawn().tile_position().unwrap();
    let err = edit::paint(&mut document, x, y, 1).unwrap_err();
    assert!(matches!(err, ToolsError::SpawnTile { .. }));
    assert!(!document.is_dirty());

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_inspect_missing_map() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let err = Inspection::from_path(config.asset_paths().map_path()).unwrap_err();
    assert!(matches!(err, ToolsError::Map(MapError::Io { .. })));
}
