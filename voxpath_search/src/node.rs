// Search-graph vertices and the arena that owns them.
//
// A `PathNode` is identified purely by its offset from the search start:
// two nodes with the same offsets are equal and hash identically no matter
// which parent or scores they carry. That identity is what the open/closed
// collections dedup on.
//
// Nodes never hold references to each other. The `NodeArena` owns every node
// created during one search and parents are `NodeId` indices into it, so a
// parent chain is just a walk over a `Vec`. Scores and terrain properties are
// cached inside the node behind `Cell`/`OnceCell`, which lets them be filled
// in lazily through shared references while the collections hold ids.
//
// Re-parenting only ever happens to nodes still on the open set. Those have
// not been expanded, so they have no children whose cached g-scores could go
// stale; invalidating the node's own g/h/f is sufficient.
//
// See also: `node_collection.rs` for the open/closed sets keyed on node
// identity, `finder.rs` for the search loop that grows the arena.

use crate::config::Locomotion;
use crate::neighbors::Connectivity;
use crate::terrain::{Terrain, TerrainError};
use crate::types::{NodeId, Offset, VoxelCoord};
use smallvec::SmallVec;
use std::cell::{Cell, OnceCell};
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// Cost of a single move in any direction.
pub const STEP_COST: u32 = 1;

/// One vertex of the search graph.
#[derive(Clone, Debug)]
pub struct PathNode<M> {
    offsets: Offset,
    parent: Option<NodeId>,
    /// Move taken from the parent to reach this node.
    step: Offset,
    start: VoxelCoord,
    end: VoxelCoord,

    location: OnceCell<VoxelCoord>,
    g: Cell<Option<u32>>,
    h: Cell<Option<u32>>,
    f: Cell<Option<u32>>,

    material: OnceCell<M>,
    transparent: OnceCell<bool>,
    surface: OnceCell<bool>,
    footing: OnceCell<bool>,
}

impl<M> PathNode<M> {
    fn with_offsets(offsets: Offset, parent: Option<NodeId>, step: Offset, start: VoxelCoord, end: VoxelCoord) -> Self {
        Self {
            offsets,
            parent,
            step,
            start,
            end,
            location: OnceCell::new(),
            g: Cell::new(None),
            h: Cell::new(None),
            f: Cell::new(None),
            material: OnceCell::new(),
            transparent: OnceCell::new(),
            surface: OnceCell::new(),
            footing: OnceCell::new(),
        }
    }

    /// The root node of a search from `start` to `end`.
    pub fn root(start: VoxelCoord, end: VoxelCoord) -> Self {
        Self::with_offsets(Offset::ZERO, None, Offset::ZERO, start, end)
    }

    /// A node reached from `parent` (stored at `parent_id`) by `step`, or
    /// `None` if its offsets or location would leave the `i32` range.
    pub fn child(parent: &PathNode<M>, parent_id: NodeId, step: Offset) -> Option<Self> {
        let offsets = parent.offsets.checked_add(step)?;
        let location = parent.start.checked_add(offsets)?;
        let node = Self::with_offsets(offsets, Some(parent_id), step, parent.start, parent.end);
        node.location.get_or_init(|| location);
        Some(node)
    }

    pub fn offsets(&self) -> Offset {
        self.offsets
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn step(&self) -> Offset {
        self.step
    }

    pub fn start(&self) -> VoxelCoord {
        self.start
    }

    pub fn end(&self) -> VoxelCoord {
        self.end
    }

    /// World coordinate of this node.
    pub fn location(&self) -> VoxelCoord {
        *self.location.get_or_init(|| self.start + self.offsets)
    }

    /// Cached g-score, `None` until the owning arena computes it.
    pub fn g_score(&self) -> Option<u32> {
        self.g.get()
    }

    /// Cached h-score, `None` until the owning arena computes it.
    pub fn h_score(&self) -> Option<u32> {
        self.h.get()
    }

    /// Cached f-score, `None` until the owning arena computes it.
    pub fn f_score(&self) -> Option<u32> {
        self.f.get()
    }

    /// Point this node at a new parent and drop the cached scores.
    pub fn set_parent(&mut self, parent_id: NodeId, parent_offsets: Offset) {
        self.parent = Some(parent_id);
        self.step = self.offsets - parent_offsets;
        self.invalidate_scores();
    }

    fn invalidate_scores(&self) {
        self.g.set(None);
        self.h.set(None);
        self.f.set(None);
    }
}

impl<M: Copy> PathNode<M> {
    /// Material at this node's location, resolved once.
    pub fn material<T>(&self, terrain: &T) -> Result<M, TerrainError>
    where
        T: Terrain<Material = M> + ?Sized,
    {
        if let Some(material) = self.material.get() {
            return Ok(*material);
        }
        let material = terrain.resolve(self.location())?;
        Ok(*self.material.get_or_init(|| material))
    }

    pub fn is_transparent<T>(&self, terrain: &T) -> Result<bool, TerrainError>
    where
        T: Terrain<Material = M> + ?Sized,
    {
        if let Some(transparent) = self.transparent.get() {
            return Ok(*transparent);
        }
        let transparent = terrain.is_transparent(self.material(terrain)?);
        Ok(*self.transparent.get_or_init(|| transparent))
    }

    pub fn is_surface<T>(&self, terrain: &T) -> Result<bool, TerrainError>
    where
        T: Terrain<Material = M> + ?Sized,
    {
        if let Some(surface) = self.surface.get() {
            return Ok(*surface);
        }
        let surface = terrain.is_surface(self.material(terrain)?);
        Ok(*self.surface.get_or_init(|| surface))
    }

    /// Whether the voxel directly below this node can be stood on.
    pub fn has_footing<T>(&self, terrain: &T) -> Result<bool, TerrainError>
    where
        T: Terrain<Material = M> + ?Sized,
    {
        if let Some(footing) = self.footing.get() {
            return Ok(*footing);
        }
        let footing = match self.location().checked_below() {
            Some(below) => terrain.is_surface_at(below)?,
            None => false,
        };
        Ok(*self.footing.get_or_init(|| footing))
    }

    /// Whether a mover using `locomotion` may occupy this node.
    pub fn is_traversable<T>(&self, terrain: &T, locomotion: Locomotion) -> Result<bool, TerrainError>
    where
        T: Terrain<Material = M> + ?Sized,
    {
        if !self.is_transparent(terrain)? {
            return Ok(false);
        }
        match locomotion {
            Locomotion::Fly => Ok(true),
            Locomotion::Walk => self.has_footing(terrain),
        }
    }
}

impl<M> PartialEq for PathNode<M> {
    fn eq(&self, other: &Self) -> bool {
        self.offsets == other.offsets
    }
}

impl<M> Eq for PathNode<M> {}

impl<M> Hash for PathNode<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offsets.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

/// Owns every node created during one search.
#[derive(Debug)]
pub struct NodeArena<M> {
    nodes: Vec<PathNode<M>>,
    connectivity: Connectivity,
}

impl<M> NodeArena<M> {
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            nodes: Vec::new(),
            connectivity,
        }
    }

    /// Drop all nodes, keeping the allocation for the next search.
    pub fn reset(&mut self, connectivity: Connectivity) {
        self.nodes.clear();
        self.connectivity = connectivity;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, node: PathNode<M>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&PathNode<M>> {
        self.nodes.get(id.index())
    }

    /// Re-parent `id` onto `parent`, invalidating its cached scores.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(
            !self.ancestors(parent).any(|a| a == id),
            "re-parenting {id:?} onto {parent:?} would create a cycle"
        );
        let parent_offsets = self[parent].offsets;
        self.nodes[id.index()].set_parent(parent, parent_offsets);
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&cursor| self[cursor].parent)
    }

    /// Number of parent hops from `id` back to the root.
    pub fn hops(&self, id: NodeId) -> u32 {
        self.ancestors(id).count() as u32 - 1
    }

    /// Cost of the cheapest known route from the root to `id`.
    pub fn g_score(&self, id: NodeId) -> u32 {
        // Walk up to the nearest cached ancestor, then fill caches back down.
        let mut pending: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut cursor = id;
        let mut g = loop {
            let node = &self[cursor];
            if let Some(g) = node.g.get() {
                break g;
            }
            match node.parent {
                None => {
                    node.g.set(Some(0));
                    break 0;
                }
                Some(parent) => {
                    pending.push(cursor);
                    cursor = parent;
                }
            }
        };
        for &pending_id in pending.iter().rev() {
            g += STEP_COST;
            self[pending_id].g.set(Some(g));
        }
        g
    }

    /// Heuristic estimate of the remaining cost from `id` to the end.
    pub fn h_score(&self, id: NodeId) -> u32 {
        let node = &self[id];
        if let Some(h) = node.h.get() {
            return h;
        }
        let h = self.connectivity.heuristic(node.location(), node.end);
        node.h.set(Some(h));
        h
    }

    pub fn f_score(&self, id: NodeId) -> u32 {
        if let Some(f) = self[id].f.get() {
            return f;
        }
        let f = self.g_score(id).saturating_add(self.h_score(id));
        self[id].f.set(Some(f));
        f
    }
}

impl<M: Clone> NodeArena<M> {
    /// Copy the chain ending at `dest` out of the arena in root-to-`dest`
    /// order. Scores are computed before copying and each returned node's
    /// parent is re-pointed at its index in the returned vector.
    pub fn path_to(&self, dest: NodeId) -> Vec<PathNode<M>> {
        let mut ids: Vec<NodeId> = self.ancestors(dest).collect();
        ids.reverse();
        ids.iter()
            .enumerate()
            .map(|(i, &id)| {
                self.f_score(id);
                let mut node = self[id].clone();
                node.parent = i.checked_sub(1).map(|p| NodeId(p as u32));
                node
            })
            .collect()
    }
}

impl<M> Index<NodeId> for NodeArena<M> {
    type Output = PathNode<M>;

    fn index(&self, id: NodeId) -> &PathNode<M> {
        &self.nodes[id.index()]
    }
}
