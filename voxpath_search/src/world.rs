// Dense 3D voxel grid, the reference `Terrain` implementation.
//
// The world is stored as a flat `Vec<VoxelType>` indexed by
// `x + z * size_x + y * size_x * size_z`, giving O(1) read/write access.
// Coordinates run from 0 to `size - 1` on every axis. Out-of-bounds reads via
// `get()` return `Air` and out-of-bounds writes are no-ops; through the
// `Terrain` trait, out-of-bounds coordinates report `TerrainError::Unloaded`
// so searches never wander off the edge of the grid.
//
// Hosts with their own world representation implement `Terrain` directly;
// this type backs the tests, benchmarks and the CLI scenes.
//
// See also: `terrain.rs` for the trait, `types.rs` for the `VoxelType`
// transparency/surface classification.

use crate::terrain::{Terrain, TerrainError};
use crate::types::{VoxelCoord, VoxelType};

/// Dense 3D voxel grid.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    voxels: Vec<VoxelType>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
}

impl VoxelWorld {
    /// Create a new world filled with `Air`.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            voxels: vec![VoxelType::Air; total],
            size_x,
            size_y,
            size_z,
        }
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.size_x
            && (coord.y as u32) < self.size_y
            && (coord.z as u32) < self.size_z
    }

    /// Flat index of `coord`, or `None` outside the grid.
    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        let (sx, sz) = (self.size_x as usize, self.size_z as usize);
        Some(coord.x as usize + coord.z as usize * sx + coord.y as usize * sx * sz)
    }

    /// Voxel at `coord`; `Air` outside the grid.
    pub fn get(&self, coord: VoxelCoord) -> VoxelType {
        self.resolve(coord).unwrap_or_default()
    }

    /// Write a voxel. No-op for out-of-bounds coordinates.
    pub fn set(&mut self, coord: VoxelCoord, voxel: VoxelType) {
        if let Some(i) = self.index(coord) {
            self.voxels[i] = voxel;
        }
    }

    /// Fill the inclusive box spanned by `a` and `b` (corners in any order).
    /// Voxels outside the world are skipped.
    pub fn fill_box(&mut self, a: VoxelCoord, b: VoxelCoord, voxel: VoxelType) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.set(VoxelCoord::new(x, y, z), voxel);
                }
            }
        }
    }

    /// Lay a one-voxel-thick floor of `voxel` across the whole world at
    /// height `y`.
    pub fn fill_layer(&mut self, y: i32, voxel: VoxelType) {
        let max_x = self.size_x as i32 - 1;
        let max_z = self.size_z as i32 - 1;
        self.fill_box(VoxelCoord::new(0, y, 0), VoxelCoord::new(max_x, y, max_z), voxel);
    }
}

impl Terrain for VoxelWorld {
    type Material = VoxelType;

    fn resolve(&self, coord: VoxelCoord) -> Result<VoxelType, TerrainError> {
        self.index(coord)
            .map(|i| self.voxels[i])
            .ok_or(TerrainError::Unloaded(coord))
    }

    fn is_transparent(&self, material: VoxelType) -> bool {
        material.is_transparent()
    }

    fn is_surface(&self, material: VoxelType) -> bool {
        material.is_surface()
    }

    /// Scan down from `coord` through transparent voxels until one sits on a
    /// surface. Buried or out-of-bounds coordinates have no surface.
    fn find_surface_below(&self, coord: VoxelCoord) -> Option<VoxelCoord> {
        if !self.in_bounds(coord) {
            return None;
        }
        let mut current = coord;
        while current.y > 0 {
            if !self.get(current).is_transparent() {
                return None;
            }
            if self.get(current.below()).is_surface() {
                return Some(current);
            }
            current = current.below();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_land_on_one_voxel() {
        let mut world = VoxelWorld::new(10, 8, 6);
        let coord = VoxelCoord::new(5, 3, 4);
        world.set(coord, VoxelType::Dirt);
        assert_eq!(world.get(coord), VoxelType::Dirt);
        for neighbor in [
            VoxelCoord::new(4, 3, 4),
            VoxelCoord::new(5, 2, 4),
            VoxelCoord::new(5, 3, 3),
        ] {
            assert_eq!(world.get(neighbor), VoxelType::Air);
        }
        assert_eq!(world.voxels.iter().filter(|v| **v == VoxelType::Dirt).count(), 1);
    }

    #[test]
    fn edges_of_the_grid() {
        let mut world = VoxelWorld::new(3, 2, 5);
        world.set(VoxelCoord::new(-1, 0, 0), VoxelType::Stone);
        world.set(VoxelCoord::new(0, 2, 0), VoxelType::Stone);
        assert!(world.voxels.iter().all(|v| *v == VoxelType::Air));

        assert!(world.in_bounds(VoxelCoord::new(2, 1, 4)));
        assert!(!world.in_bounds(VoxelCoord::new(3, 1, 4)));
        assert!(!world.in_bounds(VoxelCoord::new(2, 1, -1)));
        assert_eq!(world.get(VoxelCoord::new(0, -1, 0)), VoxelType::Air);
    }

    #[test]
    fn out_of_bounds_resolve_is_unloaded() {
        let world = VoxelWorld::new(4, 4, 4);
        let outside = VoxelCoord::new(4, 0, 0);
        assert_eq!(world.resolve(outside), Err(TerrainError::Unloaded(outside)));
        assert_eq!(world.resolve(VoxelCoord::new(3, 0, 0)), Ok(VoxelType::Air));
    }

    #[test]
    fn fill_layer_covers_the_footprint() {
        let mut world = VoxelWorld::new(3, 4, 2);
        world.fill_layer(1, VoxelType::Stone);
        assert_eq!(world.is_surface_at(VoxelCoord::new(0, 1, 0)), Ok(true));
        assert_eq!(world.is_surface_at(VoxelCoord::new(2, 1, 1)), Ok(true));
        assert_eq!(world.is_transparent_at(VoxelCoord::new(2, 2, 1)), Ok(true));
        assert_eq!(world.voxels.iter().filter(|v| **v == VoxelType::Stone).count(), 6);
    }

    #[test]
    fn fill_box_accepts_corners_in_any_order() {
        let mut world = VoxelWorld::new(6, 6, 6);
        world.fill_box(VoxelCoord::new(3, 2, 4), VoxelCoord::new(1, 2, 2), VoxelType::Planks);
        assert_eq!(world.get(VoxelCoord::new(1, 2, 2)), VoxelType::Planks);
        assert_eq!(world.get(VoxelCoord::new(3, 2, 4)), VoxelType::Planks);
        assert_eq!(world.get(VoxelCoord::new(2, 2, 3)), VoxelType::Planks);
        assert_eq!(world.get(VoxelCoord::new(2, 3, 3)), VoxelType::Air);
        assert_eq!(world.get(VoxelCoord::new(0, 2, 3)), VoxelType::Air);
    }

    #[test]
    fn surface_below_floating_point() {
        let mut world = VoxelWorld::new(8, 10, 8);
        world.set(VoxelCoord::new(4, 2, 4), VoxelType::Stone);
        assert_eq!(
            world.find_surface_below(VoxelCoord::new(4, 8, 4)),
            Some(VoxelCoord::new(4, 3, 4))
        );
        // Already standing on the block.
        assert_eq!(
            world.find_surface_below(VoxelCoord::new(4, 3, 4)),
            Some(VoxelCoord::new(4, 3, 4))
        );
    }

    #[test]
    fn surface_below_skips_water() {
        let mut world = VoxelWorld::new(4, 8, 4);
        world.fill_layer(0, VoxelType::Dirt);
        world.fill_box(VoxelCoord::new(0, 1, 0), VoxelCoord::new(3, 2, 3), VoxelType::Water);
        assert_eq!(
            world.find_surface_below(VoxelCoord::new(2, 6, 2)),
            Some(VoxelCoord::new(2, 1, 2))
        );
    }

    #[test]
    fn no_surface_over_void_or_when_buried() {
        let mut world = VoxelWorld::new(4, 8, 4);
        assert_eq!(world.find_surface_below(VoxelCoord::new(1, 6, 1)), None);

        world.set(VoxelCoord::new(1, 6, 1), VoxelType::Stone);
        world.set(VoxelCoord::new(1, 0, 1), VoxelType::Stone);
        assert_eq!(world.find_surface_below(VoxelCoord::new(1, 6, 1)), None);
        assert_eq!(world.find_surface_below(VoxelCoord::new(9, 6, 1)), None);
    }
}
