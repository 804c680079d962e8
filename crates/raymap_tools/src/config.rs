//! Tool configuration, loaded from an optional RON file.
//!
//! ```ron
//! (
//!     assets_dir: "assets",
//!     map_file: "mapdata.xip",
//!     default_width: 32,
//! )
//! ```
//!
//! Missing fields take their defaults.

use std::path::{Path, PathBuf};

use raymap_core::assets::{AssetPaths, CATALOG_RESOURCE_NAME, MAP_RESOURCE_NAME};
use raymap_core::grid::MAX_MAP_SIZE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ToolsError, ToolsResult};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Directory holding the map and catalog.
    pub assets_dir: PathBuf,
    /// Map container file name inside `assets_dir`.
    pub map_file: String,
    /// Tile catalog file name inside `assets_dir`.
    pub catalog_file: String,
    /// Width used by `new` when none is given.
    pub default_width: u32,
    /// Height used by `new` when none is given.
    pub default_height: u32,
    /// Smallest side `new` accepts.
    pub min_map_size: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            map_file: MAP_RESOURCE_NAME.to_owned(),
            catalog_file: CATALOG_RESOURCE_NAME.to_owned(),
            default_width: 16,
            default_height: 16,
            min_map_size: 16,
        }
    }
}

impl ToolsConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(ron: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(ron)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> ToolsResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ToolsError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_ron_str(&contents).map_err(|e| ToolsError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "loaded tools config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ToolsResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Asset locations this config points at.
    #[must_use]
    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths::new(&self.assets_dir)
            .with_map_file(&self.map_file)
            .with_catalog_file(&self.catalog_file)
    }

    /// Check a requested map size against `min_map_size..=255`.
    pub fn check_size(&self, width: u32, height: u32) -> ToolsResult<()> {
        let allowed = self.min_map_size..=MAX_MAP_SIZE;
        if allowed.contains(&width) && allowed.contains(&height) {
            Ok(())
        } else {
            Err(ToolsError::InvalidSize {
                width,
                height,
                min: self.min_map_size,
                max: MAX_MAP_SIZE,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let config = ToolsConfig::from_ron_str("(default_width: 32)").unwrap();
        assert_eq!(config.default_width, 32);
        assert_eq!(config.default_height, 16);
        assert_eq!(config.map_file, "mapdata.xip");
    }

    #[test]
    fn test_empty_struct_is_default() {
        assert_eq!(
            ToolsConfig::from_ron_str("()").unwrap(),
            ToolsConfig::default()
        );
    }

    #[test]
    fn test_asset_paths_follow_config() {
        let config = ToolsConfig {
            assets_dir: PathBuf::from("data"),
            map_file: "level1".to_owned(),
            ..ToolsConfig::default()
        };
        let paths = config.asset_paths();
        assert_eq!(paths.map_path(), Path::new("data/level1.xip"));
        assert_eq!(paths.catalog_path(), Path::new("data/textures.json"));
    }

    #[test]
    fn test_size_range() {
        let config = ToolsConfig::default();
        assert!(config.check_size(16, 255).is_ok());
        assert!(matches!(
            config.check_size(15, 16),
            Err(ToolsError::InvalidSize { min: 16, max: 255, .. })
        ));
        assert!(config.check_size(16, 256).is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.ron");
        std::fs::write(&path, "(default_width: \"wide\")").unwrap();

        let err = ToolsConfig::load(&path).unwrap_err();
        assert!(matches!(err, ToolsError::ConfigParse { .. }));
        assert!(err.to_string().contains("tools.ron"));

        let missing = ToolsConfig::load(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(missing, ToolsError::ConfigIo { .. }));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        assert_eq!(
            ToolsConfig::load_or_default(None).unwrap(),
            ToolsConfig::default()
        );
    }
}
