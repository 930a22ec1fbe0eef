//! Enemy path following
//!
//! Enemies chase a target entity along nav-graph routes. The route is
//! recomputed on an interval, advanced by matching the ground-probed cell
//! against the committed step, and steered with binary horizontal intent.
//! Jump edges along the route arm a one-shot reservation that fires when
//! the committed next cell rises above the current one.

use bevy::prelude::*;

use crate::constants::{DEFAULT_PATH_DEPTH, GROUND_PROBE_DISTANCE, VELOCITY_EPSILON};
use crate::grid::GridConfig;
use crate::movement::{
    ActorRole, AnimationCue, CreatureState, MoveIntent, MovementStats, Velocity,
    do_jump_path_follower, transition,
};
use crate::nav::{EdgeKind, NavGraph, PathActor, find_path};
use crate::occupancy::{ActorKind, CellPos, OccupancyIndex};
use crate::services::{CollisionLayer, RayCastService};

/// A pending jump along the route: direction toward the landing cell and
/// the power the edge demands
#[derive(Debug, Clone, Copy)]
pub struct JumpReservation {
    pub dir: Vec2,
    pub power: f32,
}

/// Route-following state for an enemy
#[derive(Component, Debug, Default)]
pub struct PathFollower {
    /// Entity being chased; no target means no movement
    pub target: Option<Entity>,
    pub path: Vec<IVec2>,
    pub path_index: usize,
    pub update_timer: f32,
    pub reservation: Option<JumpReservation>,
}

/// Match the stepped cell against the route, commit the next cell to the
/// occupancy index, refresh intent, and arm a jump reservation when the
/// current step pair is connected by a jump edge within reach.
#[allow(clippy::too_many_arguments)]
pub fn advance_along_path(
    follower: &mut PathFollower,
    entity: Entity,
    step_cell: IVec2,
    pos: Vec2,
    grid: &GridConfig,
    graph: &NavGraph,
    occupancy: &mut OccupancyIndex,
    cell_pos: &mut CellPos,
    intent: &mut MoveIntent,
    stats: &MovementStats,
) {
    if follower.path_index >= follower.path.len() {
        follower.path.clear();
        follower.reservation = None;
        intent.clear();
        return;
    }

    if step_cell == follower.path[follower.path_index] {
        follower.path_index += 1;
        if follower.path_index >= follower.path.len() {
            follower.path.clear();
            follower.reservation = None;
            intent.clear();
            return;
        }
        let next = follower.path[follower.path_index];
        occupancy.move_to(entity, ActorKind::Creature, next, false, cell_pos);
    }

    let target_cell = follower.path[follower.path_index];
    if let Some(edge) = graph.edge_between(step_cell, target_cell)
        && edge.kind == EdgeKind::Jump
        && stats.jump_force >= edge.cost
    {
        follower.reservation = Some(JumpReservation {
            dir: (grid.cell_to_world(target_cell) - pos).normalize_or_zero(),
            power: edge.cost,
        });
    }

    // Steer toward the committed cell with binary horizontal intent
    let to_committed = grid.cell_to_world(cell_pos.cell) - pos;
    if to_committed.x.abs() <= VELOCITY_EPSILON {
        intent.clear();
    } else {
        intent.set(Vec2::new(to_committed.x.signum(), 0.0));
    }
}

/// Recompute routes on the per-template interval and walk them
pub fn follow_path(
    time: Res<Time>,
    grid: Res<GridConfig>,
    graph: Res<NavGraph>,
    mut occupancy: ResMut<OccupancyIndex>,
    service: Res<RayCastService>,
    transforms: Query<&Transform>,
    mut enemies: Query<(
        Entity,
        &ActorRole,
        &mut PathFollower,
        &mut MoveIntent,
        &mut CellPos,
        &mut Velocity,
        &mut CreatureState,
        &mut AnimationCue,
        &MovementStats,
    )>,
) {
    let dt = time.delta_secs();
    for (
        entity,
        role,
        mut follower,
        mut intent,
        mut cell_pos,
        mut velocity,
        mut state,
        mut cue,
        stats,
    ) in &mut enemies
    {
        if *role != ActorRole::Enemy {
            continue;
        }
        let Ok(transform) = transforms.get(entity) else {
            continue;
        };
        let pos = transform.translation.truncate();

        follower.update_timer += dt;
        if follower.update_timer >= stats.path_update_interval {
            follower.update_timer = 0.0;
            if let Some(target) = follower.target
                && let Ok(target_transform) = transforms.get(target)
            {
                let start = grid.world_to_cell(pos);
                let dest = grid.world_to_cell(target_transform.translation.truncate());
                let actor = PathActor {
                    entity,
                    kind: ActorKind::Creature,
                    jump_force: stats.jump_force,
                };
                follower.path = find_path(&graph, &occupancy, actor, start, dest, DEFAULT_PATH_DEPTH);
                follower.path_index = 0;
                follower.reservation = None;
                if let Some(&first) = follower.path.first() {
                    occupancy.move_to(entity, ActorKind::Creature, first, false, &mut cell_pos);
                }
            }
        }

        if follower.path.len() < 2 {
            intent.clear();
            continue;
        }

        let step_pos = service
            .cast(pos, Vec2::NEG_Y, GROUND_PROBE_DISTANCE, CollisionLayer::Ground)
            .map(|hit| hit.point)
            .unwrap_or(pos);
        let step_cell = grid.world_to_cell(step_pos);

        advance_along_path(
            &mut follower,
            entity,
            step_cell,
            pos,
            &grid,
            &graph,
            &mut occupancy,
            &mut cell_pos,
            &mut intent,
            stats,
        );

        // Fire the reserved jump once the route turns upward
        if let Some(reservation) = follower.reservation
            && follower.path_index < follower.path.len()
            && follower.path[follower.path_index].y > step_cell.y
        {
            follower.reservation = None;
            if do_jump_path_follower(reservation.dir, reservation.power, &mut velocity) {
                transition(&mut state, CreatureState::Jump, &mut velocity, &mut cue, stats);
            }
        }
    }
}
