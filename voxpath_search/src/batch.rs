// Parallel distance queries.
//
// A finder is not `Sync`, so parallel work gives each rayon worker its own
// finder via `map_init` and shares only the terrain. Results come back in
// input order.
//
// See also: `finder.rs` for the single-query API.

use crate::config::{Adjustment, FinderConfig};
use crate::finder::AStarPathFinder;
use crate::terrain::Terrain;
use crate::types::VoxelCoord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One start/end pair to measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    pub start: VoxelCoord,
    pub end: VoxelCoord,
    #[serde(default)]
    pub adjustment: Adjustment,
}

impl PathQuery {
    pub fn new(start: VoxelCoord, end: VoxelCoord) -> Self {
        Self {
            start,
            end,
            adjustment: Adjustment::None,
        }
    }

    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = adjustment;
        self
    }
}

/// `path_distance` for every query, `-1` where no path exists.
pub fn path_distances<T>(terrain: &T, config: &FinderConfig, queries: &[PathQuery]) -> Vec<i64>
where
    T: Terrain + Sync,
{
    queries
        .par_iter()
        .map_init(
            || AStarPathFinder::new(terrain, config.clone()),
            |finder, query| finder.path_distance(query.start, query.end, query.adjustment),
        )
        .collect()
}
