// Neighbor connectivity, heuristics and corner-cutting rules.
//
// Every move costs 1 regardless of direction, so a node's g-score is its hop
// count from the start. Each connectivity pairs its step set with the exact
// hop distance on an unobstructed grid, which is the tightest admissible
// (and consistent) heuristic for that step set:
//
// - `Face6`:    ±1 along one axis            -> Manhattan distance
// - `Edge18`:   ±1 along one or two axes     -> max(Chebyshev, ceil(Manhattan / 2))
// - `Vertex26`: ±1 along any number of axes  -> Chebyshev distance
//
// Corner cutting: when disallowed, `swept_cells()` lists the voxels a
// multi-axis move passes through besides its destination. Moves up rise
// first and then move horizontally; moves down move horizontally first and
// then fall.
//
// See also: `finder.rs` which expands nodes with these steps and checks the
// swept cells for transparency.

use crate::types::{Offset, VoxelCoord};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which neighbor offsets a node expands to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Face-adjacent neighbors only.
    Face6,
    /// Face- and edge-adjacent neighbors.
    Edge18,
    /// Face-, edge- and corner-adjacent neighbors.
    #[default]
    Vertex26,
}

impl Connectivity {
    /// Maximum number of axes a single step may change.
    fn max_axes(self) -> u32 {
        match self {
            Connectivity::Face6 => 1,
            Connectivity::Edge18 => 2,
            Connectivity::Vertex26 => 3,
        }
    }

    /// All step offsets, ordered by axis count and then lexicographically so
    /// expansion order is deterministic.
    pub fn steps(self) -> SmallVec<[Offset; 26]> {
        let mut steps: SmallVec<[Offset; 26]> = SmallVec::new();
        for dy in -1..=1 {
            for dz in -1..=1 {
                for dx in -1..=1 {
                    let step = Offset::new(dx, dy, dz);
                    let axes = step.axis_count();
                    if axes > 0 && axes <= self.max_axes() {
                        steps.push(step);
                    }
                }
            }
        }
        steps.sort_by_key(|s| s.axis_count());
        steps
    }

    /// Exact hop count between `from` and `to` on an open grid.
    pub fn heuristic(self, from: VoxelCoord, to: VoxelCoord) -> u32 {
        match self {
            Connectivity::Face6 => from.manhattan_distance(to),
            Connectivity::Edge18 => from
                .chebyshev_distance(to)
                .max(from.manhattan_distance(to).div_ceil(2)),
            Connectivity::Vertex26 => from.chebyshev_distance(to),
        }
    }
}

/// Voxels a move of `step` from `from` sweeps through, excluding the
/// destination itself. Single-axis moves sweep nothing extra.
pub fn swept_cells(from: VoxelCoord, step: Offset) -> SmallVec<[VoxelCoord; 4]> {
    let mut cells: SmallVec<[VoxelCoord; 4]> = SmallVec::new();
    if step.axis_count() < 2 {
        return cells;
    }

    let horizontal = step.horizontal();
    let base = if step.dy > 0 {
        // Rise first: the voxel overhead must be free.
        let raised = from + Offset::new(0, step.dy, 0);
        cells.push(raised);
        raised
    } else {
        if step.dy < 0 {
            // Step off the ledge before falling.
            cells.push(from + horizontal);
        }
        from
    };

    if horizontal.dx != 0 && horizontal.dz != 0 {
        cells.push(base + Offset::new(horizontal.dx, 0, 0));
        cells.push(base + Offset::new(0, 0, horizontal.dz));
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_counts() {
        assert_eq!(Connectivity::Face6.steps().len(), 6);
        assert_eq!(Connectivity::Edge18.steps().len(), 18);
        assert_eq!(Connectivity::Vertex26.steps().len(), 26);
    }

    #[test]
    fn face_steps_come_first() {
        let steps = Connectivity::Vertex26.steps();
        assert!(steps[..6].iter().all(|s| s.axis_count() == 1));
        assert!(steps[6..18].iter().all(|s| s.axis_count() == 2));
        assert!(steps[18..].iter().all(|s| s.axis_count() == 3));
    }

    #[test]
    fn heuristics_match_open_grid_distance() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(4, 0, 4);
        assert_eq!(Connectivity::Face6.heuristic(a, b), 8);
        assert_eq!(Connectivity::Edge18.heuristic(a, b), 4);
        assert_eq!(Connectivity::Vertex26.heuristic(a, b), 4);

        let c = VoxelCoord::new(3, 3, 3);
        assert_eq!(Connectivity::Face6.heuristic(a, c), 9);
        assert_eq!(Connectivity::Edge18.heuristic(a, c), 5);
        assert_eq!(Connectivity::Vertex26.heuristic(a, c), 3);
    }

    #[test]
    fn heuristics_span_the_whole_coordinate_range() {
        let low = VoxelCoord::new(i32::MIN, 0, 0);
        let high = VoxelCoord::new(i32::MAX, 0, 0);
        for conn in [Connectivity::Face6, Connectivity::Edge18, Connectivity::Vertex26] {
            assert_eq!(conn.heuristic(low, high), u32::MAX, "{conn:?}");
            assert_eq!(conn.heuristic(high, high + Offset::new(-3, 0, 0)), 3, "{conn:?}");
        }
    }

    #[test]
    fn heuristic_is_consistent_across_steps() {
        // h(n) <= 1 + h(n') for every neighbor n'.
        let goal = VoxelCoord::new(5, -2, 7);
        for conn in [Connectivity::Face6, Connectivity::Edge18, Connectivity::Vertex26] {
            for x in -3..=3 {
                for y in -3..=3 {
                    for z in -3..=3 {
                        let node = VoxelCoord::new(x, y, z);
                        for step in conn.steps() {
                            let h = conn.heuristic(node, goal);
                            let h_next = conn.heuristic(node + step, goal);
                            assert!(h <= h_next + 1, "{conn:?} inconsistent at {node} {step}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn straight_moves_sweep_nothing() {
        let from = VoxelCoord::new(2, 2, 2);
        assert!(swept_cells(from, Offset::new(1, 0, 0)).is_empty());
        assert!(swept_cells(from, Offset::new(0, -1, 0)).is_empty());
    }

    #[test]
    fn horizontal_diagonal_sweeps_both_sides() {
        let from = VoxelCoord::new(2, 2, 2);
        let cells = swept_cells(from, Offset::new(1, 0, -1));
        assert_eq!(
            cells.as_slice(),
            &[VoxelCoord::new(3, 2, 2), VoxelCoord::new(2, 2, 1)]
        );
    }

    #[test]
    fn climbing_needs_headroom() {
        let from = VoxelCoord::new(2, 2, 2);
        let cells = swept_cells(from, Offset::new(1, 1, 0));
        assert_eq!(cells.as_slice(), &[VoxelCoord::new(2, 3, 2)]);

        let cells = swept_cells(from, Offset::new(1, 1, 1));
        assert_eq!(
            cells.as_slice(),
            &[
                VoxelCoord::new(2, 3, 2),
                VoxelCoord::new(3, 3, 2),
                VoxelCoord::new(2, 3, 3)
            ]
        );
    }

    #[test]
    fn dropping_steps_off_the_ledge_first() {
        let from = VoxelCoord::new(2, 2, 2);
        let cells = swept_cells(from, Offset::new(0, -1, 1));
        assert_eq!(cells.as_slice(), &[VoxelCoord::new(2, 2, 3)]);

        let cells = swept_cells(from, Offset::new(-1, -1, 1));
        assert_eq!(
            cells.as_slice(),
            &[
                VoxelCoord::new(1, 2, 3),
                VoxelCoord::new(1, 2, 2),
                VoxelCoord::new(2, 2, 3)
            ]
        );
    }
}
