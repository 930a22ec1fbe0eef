//! Spatial occupancy index
//!
//! One player and one creature may hold a given cell at the same time, never
//! two of the same category. Cell records are created lazily on first claim.
//! `move_to` is the only compound mutator; everything else is claim/release
//! bookkeeping with stale-release protection.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::nav::NavGraph;

/// Occupancy category. Exactly one occupant per category fits in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Creature,
}

/// Logical grid position of an actor, kept in sync by the occupancy index
#[derive(Component, Debug, Clone)]
pub struct CellPos {
    pub cell: IVec2,
    /// Presentation has finished easing to the cell center
    pub lerp_completed: bool,
    /// Presentation should snap to the cell center this tick
    pub snap_requested: bool,
}

impl Default for CellPos {
    fn default() -> Self {
        Self {
            cell: IVec2::ZERO,
            lerp_completed: true,
            snap_requested: false,
        }
    }
}

/// Per-cell occupancy record
#[derive(Debug, Default)]
pub struct Cell {
    player: Option<Entity>,
    creature: Option<Entity>,
    occupants: HashSet<Entity>,
}

impl Cell {
    fn slot(&self, kind: ActorKind) -> Option<Entity> {
        match kind {
            ActorKind::Player => self.player,
            ActorKind::Creature => self.creature,
        }
    }

    fn slot_mut(&mut self, kind: ActorKind) -> &mut Option<Entity> {
        match kind {
            ActorKind::Player => &mut self.player,
            ActorKind::Creature => &mut self.creature,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn occupants(&self) -> impl Iterator<Item = Entity> + '_ {
        self.occupants.iter().copied()
    }
}

/// Runtime index of which actor holds which cell
#[derive(Resource, Debug, Default)]
pub struct OccupancyIndex {
    cells: HashMap<IVec2, Cell>,
    claimed: HashMap<Entity, (ActorKind, IVec2)>,
    bounds: Option<(IVec2, IVec2)>,
}

impl OccupancyIndex {
    /// Adopt the nav graph's extents as the enterable region
    pub fn set_bounds_from_graph(&mut self, graph: &NavGraph) {
        self.bounds = graph.extents();
    }

    pub fn cell(&self, pos: IVec2) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// The cell currently recorded for an actor, if it holds one
    pub fn recorded_cell(&self, entity: Entity) -> Option<IVec2> {
        self.claimed.get(&entity).map(|&(_, pos)| pos)
    }

    /// Whether `pos` can be entered. With an actor given, only that actor's
    /// category slot must be free; anonymous queries need a fully empty cell.
    /// Out-of-bounds cells (or any cell while no graph is loaded) are never
    /// enterable.
    pub fn can_occupy(&self, who: Option<ActorKind>, pos: IVec2) -> bool {
        let Some((min, max)) = self.bounds else {
            return false;
        };
        if pos.x < min.x || pos.x > max.x || pos.y < min.y || pos.y > max.y {
            return false;
        }
        match self.cells.get(&pos) {
            None => true,
            Some(cell) => match who {
                Some(kind) => cell.slot(kind).is_none(),
                None => cell.is_empty(),
            },
        }
    }

    /// Claim `pos` for an actor. Fails without mutating if the cell is out
    /// of bounds or the category slot is taken.
    pub fn claim(&mut self, entity: Entity, kind: ActorKind, pos: IVec2) -> bool {
        if !self.can_occupy(Some(kind), pos) {
            return false;
        }
        let cell = self.cells.entry(pos).or_default();
        *cell.slot_mut(kind) = Some(entity);
        cell.occupants.insert(entity);
        self.claimed.insert(entity, (kind, pos));
        true
    }

    /// Release whatever cell the actor holds. A stale record (the slot now
    /// belongs to someone else) is dropped without touching the cell.
    pub fn release(&mut self, entity: Entity) -> bool {
        let Some((kind, pos)) = self.claimed.remove(&entity) else {
            return false;
        };
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        if cell.slot(kind) != Some(entity) {
            return false;
        }
        *cell.slot_mut(kind) = None;
        cell.occupants.remove(&entity);
        true
    }

    /// Move an actor to a new cell and update its `CellPos`. On success the
    /// old claim is released; on failure nothing changes. `force_move`
    /// requests a presentation snap instead of an ease.
    pub fn move_to(
        &mut self,
        entity: Entity,
        kind: ActorKind,
        pos: IVec2,
        force_move: bool,
        cell_pos: &mut CellPos,
    ) -> bool {
        if !self.can_occupy(Some(kind), pos) {
            return false;
        }
        self.release(entity);
        if !self.claim(entity, kind, pos) {
            return false;
        }
        cell_pos.cell = pos;
        cell_pos.lerp_completed = false;
        cell_pos.snap_requested = force_move;
        true
    }
}

/// Frees slots held by entities whose `CellPos` was removed or despawned
pub fn release_despawned(
    mut index: ResMut<OccupancyIndex>,
    mut removed: RemovedComponents<CellPos>,
) {
    for entity in removed.read() {
        index.release(entity);
    }
}
