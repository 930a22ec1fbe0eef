//! Navigation graph built from authored tile hints
//!
//! Level tiles carry movement hints: `Jumpable` tiles can anchor jump arcs,
//! `HorizontalOnly` tiles support walking but block jump lines passing
//! through them, `DeadEnd` tiles are never entered. The builder turns a hint
//! list into a bidirectional graph of `Horizontal` and `Jump` edges, then
//! caches per-position lookups for the pathfinder.

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_JUMP_RADIUS;

/// Movement classification of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TileKind {
    /// Walkable, blocks jump lines crossing it
    HorizontalOnly,
    /// Walkable and a legal jump endpoint
    Jumpable,
    /// Never entered, never an edge endpoint
    DeadEnd,
}

impl TryFrom<u8> for TileKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TileKind::HorizontalOnly),
            1 => Ok(TileKind::Jumpable),
            2 => Ok(TileKind::DeadEnd),
            other => Err(format!("unknown tile_type code {other}")),
        }
    }
}

impl From<TileKind> for u8 {
    fn from(kind: TileKind) -> u8 {
        match kind {
            TileKind::HorizontalOnly => 0,
            TileKind::Jumpable => 1,
            TileKind::DeadEnd => 2,
        }
    }
}

/// One authored tile record, as persisted in the tile hint asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileHint {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "tile_type")]
    pub kind: TileKind,
    /// Maximum jump-edge length originating from this tile (cells)
    #[serde(default)]
    pub required_jump_power: f32,
}

impl TileHint {
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

/// On-disk tile hint list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileHintList {
    pub tiles: Vec<TileHint>,
}

impl TileHintList {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load from file, or return an empty list if missing or malformed
    pub fn load_from_file(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No tile hint file at {}, starting with an empty map", path);
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(list) => {
                    info!("Loaded {} tile hints from {}", list.tiles.len(), path);
                    list
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using empty map", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using empty map", path, e);
                Self::default()
            }
        }
    }
}

/// Edge traversal classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Walk to an adjacent cell
    Horizontal,
    /// Jump arc between two Jumpable tiles
    Jump,
}

/// One node of the navigation graph
#[derive(Debug, Clone)]
pub struct NavNode {
    pub pos: IVec2,
    pub kind: TileKind,
    pub required_jump_power: f32,
}

/// Directed connection between two known cells
#[derive(Debug, Clone)]
pub struct NavEdge {
    pub from: IVec2,
    pub to: IVec2,
    pub kind: EdgeKind,
    /// Euclidean cell distance; for jump edges this is the power needed
    pub cost: f32,
}

/// Static navigation graph for the current level
#[derive(Resource, Debug, Default)]
pub struct NavGraph {
    pub nodes: Vec<NavNode>,
    pub edges: Vec<NavEdge>,
    node_map: HashMap<IVec2, usize>,
    edge_map: HashMap<IVec2, Vec<usize>>,
}

impl NavGraph {
    /// Rebuild the per-position lookup maps after nodes/edges change
    pub fn build_cache(&mut self) {
        self.node_map.clear();
        self.edge_map.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.node_map.insert(node.pos, i);
        }
        for (i, edge) in self.edges.iter().enumerate() {
            self.edge_map.entry(edge.from).or_default().push(i);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        self.node_map.contains_key(&pos)
    }

    pub fn node_at(&self, pos: IVec2) -> Option<&NavNode> {
        self.node_map.get(&pos).map(|&i| &self.nodes[i])
    }

    /// Outgoing edges from a cell
    pub fn edges_from(&self, pos: IVec2) -> impl Iterator<Item = &NavEdge> + '_ {
        self.edge_map
            .get(&pos)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    /// The directed edge from one cell to another, if connected
    pub fn edge_between(&self, from: IVec2, to: IVec2) -> Option<&NavEdge> {
        self.edges_from(from).find(|e| e.to == to)
    }

    /// Min/max cell coordinates covered by the graph, if any nodes exist
    pub fn extents(&self) -> Option<(IVec2, IVec2)> {
        let mut nodes = self.nodes.iter();
        let first = nodes.next()?.pos;
        let mut min = first;
        let mut max = first;
        for node in nodes {
            min = min.min(node.pos);
            max = max.max(node.pos);
        }
        Some((min, max))
    }
}

/// Builds a `NavGraph` from tile hints.
///
/// Jump-edge reach defaults to each source tile's `required_jump_power`;
/// `with_global_radius` switches every tile to one shared radius instead.
#[derive(Default)]
pub struct NavGraphBuilder {
    global_radius: Option<f32>,
}

impl NavGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_radius(radius: f32) -> Self {
        Self {
            global_radius: Some(radius),
        }
    }

    pub fn with_default_radius() -> Self {
        Self::with_global_radius(DEFAULT_JUMP_RADIUS)
    }

    pub fn build(&self, hints: &[TileHint]) -> NavGraph {
        let mut graph = NavGraph::default();
        let mut by_pos: HashMap<IVec2, &TileHint> = HashMap::new();
        for hint in hints {
            by_pos.insert(hint.pos(), hint);
        }
        for hint in hints {
            graph.nodes.push(NavNode {
                pos: hint.pos(),
                kind: hint.kind,
                required_jump_power: hint.required_jump_power,
            });
        }

        let mut seen: HashSet<(IVec2, IVec2, EdgeKind)> = HashSet::new();
        for hint in hints {
            let from = hint.pos();
            if hint.kind == TileKind::DeadEnd {
                continue;
            }

            // Jump edges: any Jumpable pair within the source's reach,
            // with a clear line between them.
            if hint.kind == TileKind::Jumpable {
                let radius = self.global_radius.unwrap_or(hint.required_jump_power);
                let radius_sq = radius * radius;
                for other in hints {
                    let to = other.pos();
                    if to == from || other.kind != TileKind::Jumpable {
                        continue;
                    }
                    let dist_sq = (to - from).length_squared() as f32;
                    if dist_sq > radius_sq {
                        continue;
                    }
                    if has_blocked_between(&by_pos, from, to) {
                        continue;
                    }
                    add_bidirectional(&mut graph, &mut seen, from, to, EdgeKind::Jump);
                }
            }

            // Horizontal edges to immediate left/right neighbors
            for dir in [IVec2::NEG_X, IVec2::X] {
                let to = from + dir;
                let Some(neighbor) = by_pos.get(&to) else {
                    continue;
                };
                if neighbor.kind == TileKind::DeadEnd {
                    continue;
                }
                // A jump-only gap between two Jumpable tiles is not walkable
                if hint.kind == TileKind::Jumpable
                    && neighbor.kind == TileKind::Jumpable
                    && has_blocked_between(&by_pos, from, to)
                {
                    continue;
                }
                add_bidirectional(&mut graph, &mut seen, from, to, EdgeKind::Horizontal);
            }
        }

        graph.build_cache();
        info!(
            "Built nav graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        for edge in &graph.edges {
            debug!(
                "  edge {:?} -> {:?} ({:?}, cost {:.2})",
                edge.from, edge.to, edge.kind, edge.cost
            );
        }
        graph
    }
}

fn add_bidirectional(
    graph: &mut NavGraph,
    seen: &mut HashSet<(IVec2, IVec2, EdgeKind)>,
    a: IVec2,
    b: IVec2,
    kind: EdgeKind,
) {
    let cost = ((b - a).length_squared() as f32).sqrt();
    for (from, to) in [(a, b), (b, a)] {
        if seen.insert((from, to, kind)) {
            graph.edges.push(NavEdge {
                from,
                to,
                kind,
                cost,
            });
        }
    }
}

/// Walks the sampled line between two cells, stepping one cell per axis sign
/// per iteration, and reports whether any intermediate tile blocks jumps.
fn has_blocked_between(by_pos: &HashMap<IVec2, &TileHint>, from: IVec2, to: IVec2) -> bool {
    let delta = to - from;
    let step = delta.signum();
    let steps = delta.x.abs().max(delta.y.abs());
    for i in 1..steps {
        let probe = from + step * i;
        if let Some(tile) = by_pos.get(&probe)
            && tile.kind == TileKind::HorizontalOnly
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(x: i32, y: i32, kind: TileKind, power: f32) -> TileHint {
        TileHint {
            x,
            y,
            kind,
            required_jump_power: power,
        }
    }

    #[test]
    fn every_edge_has_a_reverse_with_equal_cost() {
        let hints = vec![
            hint(0, 0, TileKind::Jumpable, 4.0),
            hint(1, 0, TileKind::HorizontalOnly, 0.0),
            hint(3, 2, TileKind::Jumpable, 4.0),
        ];
        let graph = NavGraphBuilder::new().build(&hints);
        assert!(!graph.edges.is_empty());
        for edge in &graph.edges {
            let reverse = graph
                .edge_between(edge.to, edge.from)
                .filter(|r| r.kind == edge.kind)
                .unwrap_or_else(|| panic!("missing reverse of {:?} -> {:?}", edge.from, edge.to));
            assert!((reverse.cost - edge.cost).abs() < 1e-6);
        }
    }

    #[test]
    fn jump_blocked_by_intervening_horizontal_only_tile() {
        let blocked = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::Jumpable, 3.0),
            hint(1, 0, TileKind::HorizontalOnly, 0.0),
            hint(2, 0, TileKind::Jumpable, 3.0),
        ]);
        assert!(
            blocked
                .edge_between(IVec2::new(0, 0), IVec2::new(2, 0))
                .is_none()
        );

        let clear = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::Jumpable, 3.0),
            hint(2, 0, TileKind::Jumpable, 3.0),
        ]);
        let edge = clear
            .edge_between(IVec2::new(0, 0), IVec2::new(2, 0))
            .unwrap();
        assert_eq!(edge.kind, EdgeKind::Jump);
        assert!((edge.cost - 2.0).abs() < 1e-6);
    }

    #[test]
    fn horizontal_edges_skip_dead_ends() {
        let graph = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::HorizontalOnly, 0.0),
            hint(1, 0, TileKind::DeadEnd, 0.0),
            hint(2, 0, TileKind::HorizontalOnly, 0.0),
        ]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn adjacent_walkable_tiles_connect_both_ways() {
        let graph = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::Jumpable, 2.0),
            hint(1, 0, TileKind::HorizontalOnly, 0.0),
        ]);
        let forward = graph
            .edge_between(IVec2::new(0, 0), IVec2::new(1, 0))
            .unwrap();
        assert_eq!(forward.kind, EdgeKind::Horizontal);
        assert!((forward.cost - 1.0).abs() < 1e-6);
        assert!(
            graph
                .edge_between(IVec2::new(1, 0), IVec2::new(0, 0))
                .is_some()
        );
    }

    #[test]
    fn per_tile_power_limits_reach_but_either_side_connects() {
        // Only the far tile can reach across, the pair still connects
        let graph = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::Jumpable, 1.0),
            hint(3, 0, TileKind::Jumpable, 5.0),
        ]);
        assert!(
            graph
                .edge_between(IVec2::new(0, 0), IVec2::new(3, 0))
                .is_some()
        );

        let neither = NavGraphBuilder::new().build(&[
            hint(0, 0, TileKind::Jumpable, 1.0),
            hint(3, 0, TileKind::Jumpable, 1.0),
        ]);
        assert!(
            neither
                .edge_between(IVec2::new(0, 0), IVec2::new(3, 0))
                .is_none()
        );
    }

    #[test]
    fn global_radius_overrides_per_tile_power() {
        let graph = NavGraphBuilder::with_global_radius(4.0).build(&[
            hint(0, 0, TileKind::Jumpable, 0.0),
            hint(3, 0, TileKind::Jumpable, 0.0),
        ]);
        assert!(
            graph
                .edge_between(IVec2::new(0, 0), IVec2::new(3, 0))
                .is_some()
        );
    }

    #[test]
    fn empty_hint_list_builds_empty_graph() {
        let graph = NavGraphBuilder::new().build(&[]);
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.extents().is_none());
    }

    #[test]
    fn extents_cover_all_nodes() {
        let graph = NavGraphBuilder::new().build(&[
            hint(-2, 1, TileKind::HorizontalOnly, 0.0),
            hint(4, -3, TileKind::Jumpable, 2.0),
        ]);
        assert_eq!(
            graph.extents(),
            Some((IVec2::new(-2, -3), IVec2::new(4, 1)))
        );
    }

    #[test]
    fn parses_persisted_tile_list() {
        let text = r#"{ "tiles": [
            { "x": 0, "y": 0, "tile_type": 1, "required_jump_power": 3.0 },
            { "x": 1, "y": 0, "tile_type": 0 }
        ] }"#;
        let list = TileHintList::from_json(text).unwrap();
        assert_eq!(list.tiles.len(), 2);
        assert_eq!(list.tiles[0].kind, TileKind::Jumpable);
        assert_eq!(list.tiles[1].kind, TileKind::HorizontalOnly);
        assert_eq!(list.tiles[1].required_jump_power, 0.0);
    }

    #[test]
    fn rejects_unknown_tile_type_code() {
        let text = r#"{ "tiles": [ { "x": 0, "y": 0, "tile_type": 9 } ] }"#;
        assert!(TileHintList::from_json(text).is_err());
    }
}
