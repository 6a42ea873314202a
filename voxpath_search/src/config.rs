// Data-driven finder configuration.
//
// All tunable search parameters live in `FinderConfig`, which can be built
// in code (`Default` plus the `with_*` builders) or loaded from JSON. Every
// field carries a serde default, so a config file only names what it
// changes. Loading always validates: the search bounds are what guarantee
// termination, so a zero radius or zero expansion cap is rejected.
//
// See also: `finder.rs` which reads the config on every search,
// `neighbors.rs` for the `Connectivity` step sets.

use crate::error::ConfigError;
use crate::neighbors::Connectivity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a mover relates to the terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Occupy transparent voxels that rest on a surface.
    #[default]
    Walk,
    /// Occupy any transparent voxel.
    Fly,
}

/// How endpoints are preprocessed before searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Search between the coordinates exactly as given.
    #[default]
    None,
    /// Snap each endpoint down to the standing position on the nearest
    /// surface below it.
    FindSurface,
}

mod defaults {
    pub fn max_search_radius() -> u32 {
        64
    }

    pub fn max_expansions() -> usize {
        50_000
    }
}

/// A* path finder settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Neighbor step set (and matching heuristic).
    #[serde(default)]
    pub connectivity: Connectivity,

    /// Which voxels count as traversable.
    #[serde(default)]
    pub locomotion: Locomotion,

    /// Allow multi-axis moves to clip past non-transparent voxels.
    #[serde(default)]
    pub allow_corner_cutting: bool,

    /// Nodes farther than this (Chebyshev distance) from the start are never
    /// generated.
    #[serde(default = "defaults::max_search_radius")]
    pub max_search_radius: u32,

    /// Maximum nodes to expand before giving up.
    #[serde(default = "defaults::max_expansions")]
    pub max_expansions: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::default(),
            locomotion: Locomotion::default(),
            allow_corner_cutting: false,
            max_search_radius: defaults::max_search_radius(),
            max_expansions: defaults::max_expansions(),
        }
    }
}

impl FinderConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FinderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_search_radius == 0 {
            return Err(ConfigError::Invalid(
                "max_search_radius must be at least 1".into(),
            ));
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::Invalid(
                "max_expansions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_locomotion(mut self, locomotion: Locomotion) -> Self {
        self.locomotion = locomotion;
        self
    }

    pub fn with_corner_cutting(mut self, allow: bool) -> Self {
        self.allow_corner_cutting = allow;
        self
    }

    pub fn with_max_search_radius(mut self, radius: u32) -> Self {
        self.max_search_radius = radius;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = FinderConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: FinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = FinderConfig::from_json("{}").unwrap();
        assert_eq!(config, FinderConfig::default());
        assert_eq!(config.connectivity, Connectivity::Vertex26);
        assert_eq!(config.locomotion, Locomotion::Walk);
        assert!(!config.allow_corner_cutting);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "connectivity": "Face6",
            "locomotion": "Fly",
            "allow_corner_cutting": true,
            "max_search_radius": 16,
            "max_expansions": 500
        }"#;
        let config = FinderConfig::from_json(json).unwrap();
        assert_eq!(config.connectivity, Connectivity::Face6);
        assert_eq!(config.locomotion, Locomotion::Fly);
        assert!(config.allow_corner_cutting);
        assert_eq!(config.max_search_radius, 16);
        assert_eq!(config.max_expansions, 500);
    }

    #[test]
    fn zero_bounds_are_rejected() {
        let err = FinderConfig::from_json(r#"{ "max_search_radius": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = FinderConfig::from_json(r#"{ "max_expansions": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_connectivity_is_a_parse_error() {
        let err = FinderConfig::from_json(r#"{ "connectivity": "Hex" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn builders_override_fields() {
        let config = FinderConfig::default()
            .with_connectivity(Connectivity::Edge18)
            .with_locomotion(Locomotion::Fly)
            .with_corner_cutting(true)
            .with_max_search_radius(8)
            .with_max_expansions(99);
        assert_eq!(config.connectivity, Connectivity::Edge18);
        assert_eq!(config.locomotion, Locomotion::Fly);
        assert!(config.allow_corner_cutting);
        assert_eq!(config.max_search_radius, 8);
        assert_eq!(config.max_expansions, 99);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FinderConfig::load("/nonexistent/voxpath/finder.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
