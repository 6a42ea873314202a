// A* path search over voxel terrain.
//
// `AStarPathFinder` owns a terrain handle, a `FinderConfig`, and the
// per-search state (node arena, open and closed collections, endpoints),
// which is cleared rather than reallocated between calls. Search state is
// interior-mutable (`Cell` caches in `PathNode`), so a finder is `Send` but
// not `Sync`; run concurrent searches with one finder per thread (see
// `batch.rs`).
//
// Two API flavours share one search routine:
// - `path` / `path_distance` return sentinels (`[]` / `-1`) for every
//   failure and never panic;
// - `try_path` / `try_path_distance` return `PathError` naming why.
//
// Every move costs 1, so a node's g-score equals its hop count and the
// distance query simply counts parent links. Heuristics are the exact
// open-grid hop distance of the configured connectivity (see
// `neighbors.rs`), which keeps A* optimal and means closed nodes never need
// reopening.
//
// See also: `node.rs` for node scoring and caching, `node_collection.rs`
// for the open/closed sets, `terrain.rs` for the adapter contract.

use crate::config::{Adjustment, FinderConfig, Locomotion};
use crate::error::{PathError, Result};
use crate::neighbors::swept_cells;
use crate::node::{NodeArena, PathNode};
use crate::node_collection::NodeCollection;
use crate::terrain::{Terrain, TerrainError};
use crate::types::{NodeId, Offset, VoxelCoord};
use log::{debug, error, trace};
use smallvec::SmallVec;

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the open set.
    pub expanded: usize,
    /// Nodes moved to the closed set.
    pub closed: usize,
    /// Open nodes given a cheaper parent.
    pub reparented: usize,
    /// Candidates skipped because their terrain was not loaded.
    pub unloaded: usize,
    /// Nodes created in the arena.
    pub nodes: usize,
}

/// A* path finder over a `Terrain`.
pub struct AStarPathFinder<T: Terrain> {
    terrain: T,
    config: FinderConfig,
    steps: SmallVec<[Offset; 26]>,
    arena: NodeArena<T::Material>,
    open: NodeCollection,
    closed: NodeCollection,
    start: Option<VoxelCoord>,
    end: Option<VoxelCoord>,
    stats: SearchStats,
}

impl<T: Terrain> AStarPathFinder<T> {
    pub fn new(terrain: T, config: FinderConfig) -> Self {
        Self {
            steps: config.connectivity.steps(),
            arena: NodeArena::new(config.connectivity),
            terrain,
            config,
            open: NodeCollection::new(),
            closed: NodeCollection::new(),
            start: None,
            end: None,
            stats: SearchStats::default(),
        }
    }

    /// Create with default configuration.
    pub fn with_defaults(terrain: T) -> Self {
        Self::new(terrain, FinderConfig::default())
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Replace the configuration used by subsequent searches.
    pub fn set_config(&mut self, config: FinderConfig) {
        self.steps = config.connectivity.steps();
        self.config = config;
    }

    /// Start coordinate (after adjustment) of the most recent search.
    pub fn start_location(&self) -> Option<VoxelCoord> {
        self.start
    }

    /// End coordinate (after adjustment) of the most recent search.
    pub fn end_location(&self) -> Option<VoxelCoord> {
        self.end
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Ordered path from `start` to `end` inclusive, or empty if there is
    /// none. Each returned node's parent is the index of the previous one.
    pub fn path(
        &mut self,
        start: VoxelCoord,
        end: VoxelCoord,
        adjustment: Adjustment,
    ) -> Vec<PathNode<T::Material>> {
        match self.try_path(start, end, adjustment) {
            Ok(path) => path,
            Err(e) => {
                report_sentinel(&e);
                Vec::new()
            }
        }
    }

    /// Number of moves on the shortest path, or `-1` if there is none.
    pub fn path_distance(&mut self, start: VoxelCoord, end: VoxelCoord, adjustment: Adjustment) -> i64 {
        match self.try_path_distance(start, end, adjustment) {
            Ok(hops) => i64::from(hops),
            Err(e) => {
                report_sentinel(&e);
                -1
            }
        }
    }

    pub fn try_path(
        &mut self,
        start: VoxelCoord,
        end: VoxelCoord,
        adjustment: Adjustment,
    ) -> Result<Vec<PathNode<T::Material>>> {
        let dest = self.search(start, end, adjustment)?;
        Ok(self.arena.path_to(dest))
    }

    pub fn try_path_distance(
        &mut self,
        start: VoxelCoord,
        end: VoxelCoord,
        adjustment: Adjustment,
    ) -> Result<u32> {
        let dest = self.search(start, end, adjustment)?;
        Ok(self.arena.hops(dest))
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Run one search and return the arena id of the destination node.
    fn search(&mut self, start: VoxelCoord, end: VoxelCoord, adjustment: Adjustment) -> Result<NodeId> {
        self.reset();
        let (start, end) = self.adjust_endpoints(start, end, adjustment)?;
        debug!(
            "path search {start} -> {end} ({:?}, {:?})",
            self.config.connectivity, self.config.locomotion
        );

        let root = self.arena.insert(PathNode::root(start, end));
        self.stats.nodes = 1;
        if start == end {
            self.stats.expanded = 1;
            return Ok(root);
        }

        let radius = self.config.max_search_radius;
        if start.chebyshev_distance(end) > radius {
            debug!("path search failed: {end} is beyond radius {radius}");
            return Err(PathError::GoalOutOfRange { end, radius });
        }
        self.check_goal(end)?;

        self.open.add(&self.arena, root);
        while let Some(current) = self.open.remove_best() {
            self.stats.expanded += 1;
            debug_assert!(!self.closed.contains(&self.arena[current]));

            if self.arena[current].location() == end {
                debug!(
                    "path found: {} moves, {} nodes expanded",
                    self.arena.g_score(current),
                    self.stats.expanded
                );
                return Ok(current);
            }

            if self.stats.expanded > self.config.max_expansions {
                debug!("path search gave up after {} expansions", self.config.max_expansions);
                return Err(PathError::ExpansionLimit {
                    limit: self.config.max_expansions,
                });
            }

            self.closed.add(&self.arena, current);
            self.stats.closed += 1;
            self.expand(current)?;
        }

        debug!("no path: open set exhausted after {} expansions", self.stats.expanded);
        Err(PathError::Unreachable {
            expanded: self.stats.expanded,
        })
    }

    fn reset(&mut self) {
        self.arena.reset(self.config.connectivity);
        self.open.clear();
        self.closed.clear();
        self.start = None;
        self.end = None;
        self.stats = SearchStats::default();
    }

    fn adjust_endpoints(
        &mut self,
        start: VoxelCoord,
        end: VoxelCoord,
        adjustment: Adjustment,
    ) -> Result<(VoxelCoord, VoxelCoord)> {
        let (start, end) = match adjustment {
            Adjustment::None => (start, end),
            Adjustment::FindSurface => {
                let adjusted_start = self.terrain.find_surface_below(start);
                let adjusted_end = self.terrain.find_surface_below(end);
                self.start = adjusted_start;
                self.end = adjusted_end;
                let start = adjusted_start.ok_or(PathError::StartSurfaceMissing(start))?;
                let end = adjusted_end.ok_or(PathError::EndSurfaceMissing(end))?;
                (start, end)
            }
        };
        self.start = Some(start);
        self.end = Some(end);
        Ok((start, end))
    }

    /// Fail fast when the destination can never be entered.
    fn check_goal(&self, end: VoxelCoord) -> Result<()> {
        match is_standable(&self.terrain, end, self.config.locomotion) {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!("path search failed: end {end} is not traversable");
                Err(PathError::GoalBlocked(end))
            }
            // Still unknown; the search itself will skip it if it stays unloaded.
            Err(TerrainError::Unloaded(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Generate, filter and enqueue the neighbors of `current`.
    fn expand(&mut self, current: NodeId) -> Result<()> {
        let tentative_g = self.arena.g_score(current) + crate::node::STEP_COST;
        let from = self.arena[current].location();

        for &step in &self.steps {
            let Some(candidate) = PathNode::child(&self.arena[current], current, step) else {
                trace!("skipping step {step} from {from}: outside coordinate space");
                continue;
            };
            if candidate.offsets().chebyshev_norm() > self.config.max_search_radius {
                continue;
            }
            let location = candidate.location();
            if self.closed.contains_location(location) {
                continue;
            }

            // An open node keeps its resolved terrain; only test it again if
            // this route would be cheaper.
            let existing = self.open.get(location);
            if existing.is_some_and(|id| self.arena.g_score(id) <= tentative_g) {
                continue;
            }
            let node = match existing {
                Some(id) => &self.arena[id],
                None => &candidate,
            };

            match self.can_move(node, from, step) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(TerrainError::Unloaded(at)) => {
                    trace!("skipping {location}: terrain at {at} not loaded");
                    self.stats.unloaded += 1;
                    continue;
                }
                Err(e) => {
                    error!("aborting path search at {location}: {e}");
                    return Err(e.into());
                }
            }

            match existing {
                Some(id) => {
                    trace!("cheaper route to {location} via {from}");
                    self.arena.set_parent(id, current);
                    self.open.reposition(&self.arena, id);
                    self.stats.reparented += 1;
                }
                None => {
                    let id = self.arena.insert(candidate);
                    self.stats.nodes += 1;
                    self.open.add(&self.arena, id);
                }
            }
        }
        Ok(())
    }

    /// Whether a mover may step from `from` into `candidate`.
    fn can_move(
        &self,
        candidate: &PathNode<T::Material>,
        from: VoxelCoord,
        step: Offset,
    ) -> std::result::Result<bool, TerrainError> {
        if !candidate.is_traversable(&self.terrain, self.config.locomotion)? {
            return Ok(false);
        }
        if self.config.allow_corner_cutting {
            return Ok(true);
        }
        for cell in swept_cells(from, step) {
            if !self.terrain.is_transparent_at(cell)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Log a failure the sentinel API is about to swallow.
fn report_sentinel(e: &PathError) {
    if e.is_defect() {
        error!("path search aborted: {e}");
    } else {
        debug!("no path: {e}");
    }
}

impl<T: Terrain> std::fmt::Debug for AStarPathFinder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AStarPathFinder")
            .field("config", &self.config)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Whether `locomotion` lets a mover stand at `coord`. Exposed for hosts that
/// want to validate endpoints before searching.
pub fn is_standable<T: Terrain + ?Sized>(
    terrain: &T,
    coord: VoxelCoord,
    locomotion: Locomotion,
) -> std::result::Result<bool, TerrainError> {
    if !terrain.is_transparent_at(coord)? {
        return Ok(false);
    }
    match locomotion {
        Locomotion::Fly => Ok(true),
        Locomotion::Walk => match coord.checked_below() {
            Some(below) => terrain.is_surface_at(below),
            None => Ok(false),
        },
    }
}
