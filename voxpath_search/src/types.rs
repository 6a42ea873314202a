// Core types shared across the search engine.
//
// Defines spatial coordinates (`VoxelCoord`), relative offsets (`Offset`),
// the arena index used for search nodes (`NodeId`), and the voxel material
// enum understood by the reference `VoxelWorld`. All plain-data types derive
// `Serialize` and `Deserialize` so scenes and configs can be loaded from JSON.
//
// See also: `node.rs` for how offsets form node identity, `world.rs` for the
// `VoxelType` transparency/surface classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D voxel grid. Each component is in voxel units.
///
/// The coordinate system uses right-handed conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Per-axis absolute distances to `other`. Exact for any pair of
    /// coordinates, including ones at opposite ends of the `i32` range.
    pub fn axis_distances(self, other: Self) -> [u32; 3] {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
    }

    /// Manhattan distance between two coordinates, saturating at `u32::MAX`.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        let [dx, dy, dz] = self.axis_distances(other);
        dx.saturating_add(dy).saturating_add(dz)
    }

    /// Chebyshev (king-move) distance between two coordinates.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let [dx, dy, dz] = self.axis_distances(other);
        dx.max(dy).max(dz)
    }

    /// The coordinate directly below this one. Only for coordinates known to
    /// have `y > i32::MIN`; see `checked_below`.
    pub const fn below(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    /// The coordinate directly below this one, or `None` at the bottom of the
    /// coordinate space.
    pub fn checked_below(self) -> Option<Self> {
        Some(Self::new(self.x, self.y.checked_sub(1)?, self.z))
    }

    /// `self + offset`, or `None` if any component leaves the `i32` range.
    pub fn checked_add(self, offset: Offset) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(offset.dx)?,
            self.y.checked_add(offset.dy)?,
            self.z.checked_add(offset.dz)?,
        ))
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add<Offset> for VoxelCoord {
    type Output = VoxelCoord;

    fn add(self, rhs: Offset) -> VoxelCoord {
        VoxelCoord::new(self.x + rhs.dx, self.y + rhs.dy, self.z + rhs.dz)
    }
}

/// A displacement between two voxel coordinates.
///
/// Search nodes are identified by their offset from the search start, and
/// neighbor steps are offsets with every component in `-1..=1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0, 0, 0);

    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }

    pub fn chebyshev_norm(self) -> u32 {
        self.dx
            .unsigned_abs()
            .max(self.dy.unsigned_abs())
            .max(self.dz.unsigned_abs())
    }

    /// Number of axes along which this offset is non-zero (0 to 3).
    pub fn axis_count(self) -> u32 {
        (self.dx != 0) as u32 + (self.dy != 0) as u32 + (self.dz != 0) as u32
    }

    /// The horizontal (x/z) part of this offset.
    pub const fn horizontal(self) -> Self {
        Self::new(self.dx, 0, self.dz)
    }

    pub fn checked_add(self, rhs: Offset) -> Option<Self> {
        Some(Self::new(
            self.dx.checked_add(rhs.dx)?,
            self.dy.checked_add(rhs.dy)?,
            self.dz.checked_add(rhs.dz)?,
        ))
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy, self.dz + rhs.dz)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.dx - rhs.dx, self.dy - rhs.dy, self.dz - rhs.dz)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.dx, self.dy, self.dz)
    }
}

// ---------------------------------------------------------------------------
// Search arena IDs: plain integers, reset on every search.
// ---------------------------------------------------------------------------

/// Index of a `PathNode` within its owning `NodeArena`.
///
/// Ids are only meaningful for the arena (or returned path) that produced
/// them; a finder's arena is cleared at the start of every search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ---------------------------------------------------------------------------
// Voxel types
// ---------------------------------------------------------------------------

/// The material of a single voxel in the reference world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoxelType {
    #[default]
    Air,
    Stone,
    Dirt,
    Planks,
    /// Solid to walk on, but blocks movement through it.
    Glass,
    /// Can be moved through but never stood on.
    Water,
}

impl VoxelType {
    /// Whether a mover can occupy this voxel.
    pub fn is_transparent(self) -> bool {
        matches!(self, VoxelType::Air | VoxelType::Water)
    }

    /// Whether a mover can stand on top of this voxel.
    pub fn is_surface(self) -> bool {
        matches!(
            self,
            VoxelType::Stone | VoxelType::Dirt | VoxelType::Planks | VoxelType::Glass
        )
    }
}
