// Open/closed set storage for the A* search.
//
// A `NodeCollection` keeps three views over the same nodes:
// - a priority queue of locations ordered by `Rank` (lowest first),
// - a membership set of node offsets (node identity, see `node.rs`),
// - a coordinate index from location to the node's arena id.
// Every public method updates all three before returning, so callers never
// see them disagree.
//
// `PriorityQueue` is a max-heap with O(log n) priority changes and removals
// by key; ranks are wrapped in `Reverse` to pop the smallest first, the same
// trick `BinaryHeap`-based queues use.
//
// See also: `node.rs` for the arena the ids point into, `finder.rs` which
// owns one collection for the open set and one for the closed set.

use crate::node::{NodeArena, PathNode};
use crate::types::{NodeId, Offset, VoxelCoord};
use priority_queue::PriorityQueue;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::fmt;

/// Ordering key for the open set: lowest f first, then lowest h (closest to
/// the goal), then first inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank {
    pub f: u32,
    pub h: u32,
    pub sequence: u64,
}

/// Node set with priority, membership and coordinate views.
pub struct NodeCollection {
    queue: PriorityQueue<VoxelCoord, Reverse<Rank>, FxBuildHasher>,
    members: FxHashSet<Offset>,
    index: FxHashMap<VoxelCoord, (NodeId, Offset)>,
    /// Monotonic counter for FIFO tie-breaking.
    next_sequence: u64,
}

impl fmt::Debug for NodeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCollection")
            .field("len", &self.len())
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl Default for NodeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeCollection {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::with_default_hasher(),
            members: FxHashSet::default(),
            index: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    /// Insert `id`, replacing any node with the same identity. The node's
    /// rank is recomputed from the arena, so re-adding refreshes its
    /// position.
    pub fn add<M>(&mut self, arena: &NodeArena<M>, id: NodeId) {
        let node = &arena[id];
        let location = node.location();
        let offsets = node.offsets();
        self.remove(location);

        let rank = Rank {
            f: arena.f_score(id),
            h: arena.h_score(id),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        self.queue.push(location, Reverse(rank));
        self.members.insert(offsets);
        self.index.insert(location, (id, offsets));
    }

    /// Refresh the rank of a node already in the collection after its scores
    /// changed. Returns `false` if no node is held at its location.
    pub fn reposition<M>(&mut self, arena: &NodeArena<M>, id: NodeId) -> bool {
        if !self.contains_location(arena[id].location()) {
            return false;
        }
        self.add(arena, id);
        true
    }

    /// Pop the lowest-ranked node.
    pub fn remove_best(&mut self) -> Option<NodeId> {
        let (location, _) = self.queue.pop()?;
        let (id, offsets) = self.index.remove(&location)?;
        self.members.remove(&offsets);
        Some(id)
    }

    /// Remove whatever node sits at `location`.
    pub fn remove(&mut self, location: VoxelCoord) -> Option<NodeId> {
        let (id, offsets) = self.index.remove(&location)?;
        self.queue.remove(&location);
        self.members.remove(&offsets);
        Some(id)
    }

    pub fn get(&self, location: VoxelCoord) -> Option<NodeId> {
        self.index.get(&location).map(|&(id, _)| id)
    }

    /// Whether a node with the same identity as `node` is present.
    pub fn contains<M>(&self, node: &PathNode<M>) -> bool {
        self.members.contains(&node.offsets())
    }

    pub fn contains_location(&self, location: VoxelCoord) -> bool {
        self.index.contains_key(&location)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.members.clear();
        self.index.clear();
        self.next_sequence = 0;
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ids currently held, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().map(|&(id, _)| id)
    }

    #[cfg(test)]
    fn views_agree(&self) -> bool {
        self.queue.len() == self.index.len()
            && self.members.len() == self.index.len()
            && self.index.iter().all(|(location, (_, offsets))| {
                self.queue.get(location).is_some() && self.members.contains(offsets)
            })
    }
}
