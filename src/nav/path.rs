//! Greedy best-first pathfinding over the navigation graph
//!
//! Priority is squared Euclidean distance to the destination; edge costs
//! gate jump feasibility but are not accumulated. Search stops expanding at
//! the depth cap and falls back to the closest node it visited when the
//! destination is out of reach, so callers always get the best partial
//! route available.

use bevy::log::warn;
use bevy::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::nav::{EdgeKind, NavGraph, TileKind};
use crate::occupancy::{ActorKind, OccupancyIndex};

/// The traversal capabilities of the actor asking for a route
#[derive(Debug, Clone, Copy)]
pub struct PathActor {
    pub entity: Entity,
    pub kind: ActorKind,
    /// Maximum jump-edge cost this actor can take
    pub jump_force: f32,
}

/// Open-list entry ordered so the heap pops the smallest remaining distance
struct SearchNode {
    pos: IVec2,
    dist_sq: f32,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.dist_sq == other.dist_sq
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the closest node first
        other
            .dist_sq
            .partial_cmp(&self.dist_sq)
            .unwrap_or(Ordering::Equal)
    }
}

fn dist_sq(a: IVec2, b: IVec2) -> f32 {
    (b - a).length_squared() as f32
}

/// Find a route from `start` toward `dest`, at most `max_depth` steps long.
///
/// Returns the cell sequence including both endpoints. When `dest` is not a
/// known graph node the result is empty; when it cannot be reached within
/// the depth cap the route ends at the closest cell the search visited.
/// A single-cell result means no usable route was found.
pub fn find_path(
    graph: &NavGraph,
    occupancy: &OccupancyIndex,
    actor: PathActor,
    start: IVec2,
    dest: IVec2,
    max_depth: u32,
) -> Vec<IVec2> {
    if !graph.contains(dest) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut best_dist: HashMap<IVec2, f32> = HashMap::new();
    let mut depth: HashMap<IVec2, u32> = HashMap::new();
    let mut parent: HashMap<IVec2, IVec2> = HashMap::new();

    let start_dist = dist_sq(start, dest);
    best_dist.insert(start, start_dist);
    depth.insert(start, 0);
    open.push(SearchNode {
        pos: start,
        dist_sq: start_dist,
    });

    let mut closest = start;
    let mut closest_dist = start_dist;

    while let Some(node) = open.pop() {
        if node.pos == dest {
            return reconstruct(&parent, start, dest);
        }
        if node.dist_sq < closest_dist {
            closest = node.pos;
            closest_dist = node.dist_sq;
        }

        let node_depth = depth.get(&node.pos).copied().unwrap_or(0);
        if node_depth >= max_depth {
            continue;
        }

        for edge in graph.edges_from(node.pos) {
            match edge.kind {
                EdgeKind::Jump => {
                    let jumpable = graph
                        .node_at(node.pos)
                        .is_some_and(|n| n.kind == TileKind::Jumpable);
                    if !jumpable || edge.cost > actor.jump_force {
                        continue;
                    }
                }
                EdgeKind::Horizontal => {
                    if !occupancy.can_occupy(Some(actor.kind), edge.to) {
                        continue;
                    }
                }
            }

            let next_dist = dist_sq(edge.to, dest);
            let known = best_dist.get(&edge.to).copied().unwrap_or(f32::INFINITY);
            if next_dist >= known {
                continue;
            }
            best_dist.insert(edge.to, next_dist);
            depth.insert(edge.to, node_depth + 1);
            parent.insert(edge.to, node.pos);
            open.push(SearchNode {
                pos: edge.to,
                dist_sq: next_dist,
            });
        }
    }

    reconstruct(&parent, start, closest)
}

/// Walk parent links back from `terminal` to `start`. A repeated cell means
/// the links are corrupt; the walk stops there rather than looping forever.
fn reconstruct(parent: &HashMap<IVec2, IVec2>, start: IVec2, terminal: IVec2) -> Vec<IVec2> {
    let mut path = vec![terminal];
    let mut seen = HashSet::from([terminal]);
    let mut current = terminal;
    while current != start {
        let Some(&prev) = parent.get(&current) else {
            break;
        };
        if !seen.insert(prev) {
            warn!("cycle in path parent links at {:?}", prev);
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
