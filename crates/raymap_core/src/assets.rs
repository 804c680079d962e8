//! Where the engine's assets live.
//!
//! The engine embeds exactly one map resource, `mapdata.xip`, next to
//! `textures.json` in its assets directory.

use std::path::{Path, PathBuf};

use tracing::warn;

/// File name the engine loads the map from.
pub const MAP_RESOURCE_NAME: &str = "mapdata.xip";

/// Texture metadata written by the texture generator.
pub const CATALOG_RESOURCE_NAME: &str = "textures.json";

/// Extension the engine's resource embedding requires.
pub const CONTAINER_EXTENSION: &str = "xip";

/// Resolves asset file locations under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
    map_file: String,
    catalog_file: String,
}

impl AssetPaths {
    /// Assets rooted at `root` with the default file names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            map_file: MAP_RESOURCE_NAME.to_owned(),
            catalog_file: CATALOG_RESOURCE_NAME.to_owned(),
        }
    }

    /// Override the map file name.
    #[must_use]
    pub fn with_map_file(mut self, name: impl Into<String>) -> Self {
        self.map_file = name.into();
        self
    }

    /// Override the catalog file name.
    #[must_use]
    pub fn with_catalog_file(mut self, name: impl Into<String>) -> Self {
        self.catalog_file = name.into();
        self
    }

    /// The assets directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the map container, always with the `.xip` extension.
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        with_container_extension(self.root.join(&self.map_file))
    }

    /// Path of the tile catalog.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.catalog_file)
    }
}

/// Force the `.xip` extension the engine expects.
#[must_use]
pub fn with_container_extension(path: PathBuf) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXTENSION));
    if has_extension {
        return path;
    }
    warn!(
        path = %path.display(),
        "map file lacks the .{CONTAINER_EXTENSION} extension, adding it"
    );
    path.with_extension(CONTAINER_EXTENSION)
}
