// JSON scene files for the `voxpath` binary.
//
// A scene describes a small `VoxelWorld` (its size plus a list of boxes to
// fill), the two endpoints, the endpoint adjustment and optionally the finder
// configuration. Fills are applied in order, so later boxes overwrite earlier
// ones; that is how gaps are carved out of walls.
//
// See also: `main.rs` for how a loaded scene is searched and printed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use voxpath_search::{Adjustment, ConfigError, FinderConfig, VoxelCoord, VoxelType, VoxelWorld};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid finder config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// An inclusive box of voxels set to one type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
    pub voxel: VoxelType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: [u32; 3],
    #[serde(default)]
    pub fill: Vec<Fill>,
    pub start: VoxelCoord,
    pub end: VoxelCoord,
    #[serde(default)]
    pub adjustment: Adjustment,
    #[serde(default)]
    pub finder: FinderConfig,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), SceneError> {
        if self.size.contains(&0) {
            return Err(SceneError::Invalid(format!(
                "size {:?} has a zero dimension",
                self.size
            )));
        }
        let world = VoxelWorld::new(self.size[0], self.size[1], self.size[2]);
        for (i, fill) in self.fill.iter().enumerate() {
            if !world.in_bounds(fill.min) || !world.in_bounds(fill.max) {
                return Err(SceneError::Invalid(format!(
                    "fill {i} ({} to {}) extends outside the world",
                    fill.min, fill.max
                )));
            }
        }
        self.finder.validate()?;
        Ok(())
    }

    /// Build the world described by `size` and `fill`.
    pub fn world(&self) -> VoxelWorld {
        let mut world = VoxelWorld::new(self.size[0], self.size[1], self.size[2]);
        for fill in &self.fill {
            world.fill_box(fill.min, fill.max, fill.voxel);
        }
        world
    }
}
