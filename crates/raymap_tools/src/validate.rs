//! Container validation.
//!
//! A container is valid when it decodes and the decoded document passes the
//! same checks the editor runs before saving.

use std::path::Path;

use raymap_core::container;
use raymap_core::document::ValidationIssue;
use raymap_core::error::MapError;
use tracing::debug;

use crate::error::ToolsResult;

/// Decode `bytes` and list every save rule the map breaks.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable container.
pub fn validate_bytes(bytes: &[u8]) -> ToolsResult<Vec<ValidationIssue>> {
    let document = container::decode(bytes).map_err(MapError::from)?;
    let issues = document.validate_for_save();
    debug!(issues = issues.len(), "validated container");
    Ok(issues)
}

/// Validate the container file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn validate_file(path: &Path) -> ToolsResult<Vec<ValidationIssue>> {
    let bytes = std::fs::read(path).map_err(|e| MapError::io(path, e))?;
    validate_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolsError;
    use raymap_core::container::FormatError;
    use raymap_core::document::MapDocument;
    use raymap_core::grid::MapGrid;
    use raymap_core::spawn::PlayerSpawn;
    use raymap_test_utils::fixtures::default_room;

    #[test]
    fn test_saved_room_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapdata.xip");
        default_room().save_to_path(&path).unwrap();

        assert!(validate_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_decodable_but_unsaveable() {
        let document = MapDocument::from_parts(MapGrid::new(0, 4), PlayerSpawn::unset());
        let issues = validate_bytes(&document.encode()).unwrap();

        assert!(issues.contains(&ValidationIssue::MissingDimensions));
        assert!(issues.contains(&ValidationIssue::NoTileData));
        assert!(issues.contains(&ValidationIssue::SpawnPositionUnset));
        assert!(issues.contains(&ValidationIssue::SpawnAngleUnset));
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let mut bytes = default_room().encode();
        bytes.truncate(bytes.len() - 1);

        let err = validate_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ToolsError::Map(MapError::Format(FormatError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_missing_file_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_file(&dir.path().join("gone.xip")).unwrap_err();
        assert!(err.to_string().contains("gone.xip"));
    }
}
