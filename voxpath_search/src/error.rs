// Error types for the search engine and config loading.
//
// `PathError` covers every way a search can end without a path, including
// terrain failures passed through from the adapter. `ConfigError` covers
// reading and validating a `FinderConfig`.
//
// See also: `finder.rs` for where each `PathError` is raised, `config.rs`
// for `ConfigError`, `terrain.rs` for `TerrainError`.

use crate::terrain::TerrainError;
use crate::types::VoxelCoord;
use thiserror::Error;

/// Why a search produced no path.
///
/// Everything except `Terrain(TerrainError::Unresolvable)` is an ordinary
/// "no path" outcome; see [`PathError::is_defect`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no surface found below start {0}")]
    StartSurfaceMissing(VoxelCoord),

    #[error("no surface found below end {0}")]
    EndSurfaceMissing(VoxelCoord),

    #[error("end {end} lies outside the search radius {radius}")]
    GoalOutOfRange { end: VoxelCoord, radius: u32 },

    #[error("end {0} is not traversable")]
    GoalBlocked(VoxelCoord),

    #[error("no path found after expanding {expanded} nodes")]
    Unreachable { expanded: usize },

    #[error("expansion limit of {limit} nodes reached")]
    ExpansionLimit { limit: usize },

    #[error("terrain lookup failed: {0}")]
    Terrain(#[from] TerrainError),
}

impl PathError {
    /// True when the failure indicates broken terrain data rather than an
    /// unreachable destination.
    pub fn is_defect(&self) -> bool {
        matches!(self, PathError::Terrain(TerrainError::Unresolvable(_)))
    }
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unresolvable_terrain_is_a_defect() {
        let at = VoxelCoord::new(1, 2, 3);
        assert!(PathError::Terrain(TerrainError::Unresolvable(at)).is_defect());
        assert!(!PathError::Terrain(TerrainError::Unloaded(at)).is_defect());
        assert!(!PathError::GoalBlocked(at).is_defect());
        assert!(!PathError::Unreachable { expanded: 7 }.is_defect());
    }

    #[test]
    fn messages_name_the_endpoint() {
        let err = PathError::EndSurfaceMissing(VoxelCoord::new(4, 9, 4));
        assert_eq!(err.to_string(), "no surface found below end (4, 9, 4)");
    }
}
