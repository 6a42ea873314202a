// voxpath_search: grid A* path search over 3D voxel terrain.
//
// The engine answers "how do I get from here to there" over a voxel world it
// only sees through the `Terrain` adapter. It knows nothing about rendering,
// entities or world storage; hosts plug in their own terrain and get back an
// ordered list of nodes or a hop count.
//
// Module overview:
// - `types.rs`:           VoxelCoord, Offset, NodeId, the reference VoxelType.
// - `terrain.rs`:         `Terrain` adapter trait + TerrainError.
// - `world.rs`:           Dense VoxelWorld grid implementing `Terrain`.
// - `neighbors.rs`:       Connectivity step sets, heuristics, corner sweeps.
// - `config.rs`:          FinderConfig (JSON-loadable), Locomotion, Adjustment.
// - `node.rs`:            PathNode + the NodeArena that owns a search's nodes.
// - `node_collection.rs`: Open/closed sets (priority, membership, coordinate index).
// - `finder.rs`:          AStarPathFinder, the search loop and public queries.
// - `batch.rs`:           Parallel distance queries with rayon.
// - `error.rs`:           PathError / ConfigError.
//
// Searches are deterministic: the same terrain, config and endpoints always
// produce the same path, since step order and open-set tie-breaking are both
// fixed.

pub mod batch;
pub mod config;
pub mod error;
pub mod finder;
pub mod neighbors;
pub mod node;
pub mod node_collection;
pub mod terrain;
pub mod types;
pub mod world;

pub use config::{Adjustment, FinderConfig, Locomotion};
pub use error::{ConfigError, PathError};
pub use finder::{AStarPathFinder, SearchStats};
pub use neighbors::Connectivity;
pub use node::PathNode;
pub use terrain::{Terrain, TerrainError};
pub use types::{NodeId, Offset, VoxelCoord, VoxelType};
pub use world::VoxelWorld;
