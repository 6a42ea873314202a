// Terrain adapter: the only view of the world the search engine has.
//
// The host implements `Terrain` to classify coordinates into materials and
// to answer the two material predicates the search needs (can a mover occupy
// it, can a mover stand on it). `find_surface_below` backs the
// `Adjustment::FindSurface` endpoint snapping.
//
// Lookups are synchronous. A host whose world data may not be resident
// reports `TerrainError::Unloaded`; the finder treats that cell as blocked
// and keeps searching. `TerrainError::Unresolvable` means the adapter cannot
// classify a coordinate at all and aborts the search.
//
// See also: `world.rs` for the in-memory reference implementation,
// `node.rs` for the per-node caching of these lookups.

use crate::types::VoxelCoord;
use std::fmt;
use thiserror::Error;

/// Failure of a single terrain lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TerrainError {
    /// The region holding this coordinate is not available right now.
    #[error("terrain at {0} is not loaded")]
    Unloaded(VoxelCoord),
    /// The adapter has no material for this coordinate.
    #[error("no material resolvable at {0}")]
    Unresolvable(VoxelCoord),
}

/// Read-only terrain queries consumed by the path finder.
pub trait Terrain {
    type Material: Copy + fmt::Debug;

    /// Classify the voxel at `coord`.
    fn resolve(&self, coord: VoxelCoord) -> Result<Self::Material, TerrainError>;

    /// Whether a mover can occupy a voxel of this material.
    fn is_transparent(&self, material: Self::Material) -> bool;

    /// Whether a mover can stand on top of a voxel of this material.
    fn is_surface(&self, material: Self::Material) -> bool;

    /// Nearest standing position at or below `coord`, i.e. the transparent
    /// voxel directly above the first surface beneath it.
    fn find_surface_below(&self, coord: VoxelCoord) -> Option<VoxelCoord>;

    /// Convenience: resolve and test transparency in one call.
    fn is_transparent_at(&self, coord: VoxelCoord) -> Result<bool, TerrainError> {
        self.resolve(coord).map(|m| self.is_transparent(m))
    }

    /// Convenience: resolve and test surface-ness in one call.
    fn is_surface_at(&self, coord: VoxelCoord) -> Result<bool, TerrainError> {
        self.resolve(coord).map(|m| self.is_surface(m))
    }
}

impl<T: Terrain + ?Sized> Terrain for &T {
    type Material = T::Material;

    fn resolve(&self, coord: VoxelCoord) -> Result<Self::Material, TerrainError> {
        (**self).resolve(coord)
    }

    fn is_transparent(&self, material: Self::Material) -> bool {
        (**self).is_transparent(material)
    }

    fn is_surface(&self, material: Self::Material) -> bool {
        (**self).is_surface(material)
    }

    fn find_surface_below(&self, coord: VoxelCoord) -> Option<VoxelCoord> {
        (**self).find_surface_below(coord)
    }
}
