//! Kinematic state machine and the fixed-tick movement pipeline
//!
//! States: Idle, Move, Jump, Fall, Wall, Dash. Each fixed tick the pipeline
//! probes contacts, refreshes the coyote stamp, dispatches per-state
//! transitions, then shapes velocity (horizontal smoothing, better-jump
//! gravity corrections, wall-slide cap). The host physics applies base
//! gravity and integrates positions from `Velocity`.

use bevy::prelude::*;

use crate::constants::{
    GRAVITY_MAGNITUDE, GROUND_PROBE_DISTANCE, PATH_FOLLOWER_JUMP_X_BIAS, VELOCITY_EPSILON,
    WALL_PROBE_DISTANCE,
};
use crate::grid::GridConfig;
use crate::helpers::{approx_zero, smooth_damp};
use crate::movement::{
    ActorRole, AnimationCue, CreatureState, DampState, DashState, Facing, Grounded, JumpHeld,
    LastGrounded, MoveIntent, MovementStats, MovementTuning, Velocity, WallContact,
};
use crate::occupancy::{ActorKind, CellPos, OccupancyIndex};
use crate::services::{CollisionLayer, RayCastService};

/// Grounded either directly or within the coyote grace window
pub fn grounded_with_coyote(grounded: bool, now: f32, last_grounded: f32, coyote: f32) -> bool {
    grounded || now - last_grounded <= coyote
}

/// Gravity scale for the current airborne phase. Above 1.0 the caller
/// applies the excess as a downward correction.
pub fn better_jump_multiplier(vy: f32, jump_held: bool, tuning: &MovementTuning) -> f32 {
    if vy < 0.0 {
        tuning.fall_multiplier
    } else if vy > 0.0 && !jump_held {
        tuning.low_jump_multiplier
    } else {
        1.0
    }
}

/// Cap downward speed while grabbing a wall
pub fn clamp_wall_slide(vy: f32, max_slide_speed: f32) -> f32 {
    vy.max(-max_slide_speed)
}

/// Player jump: impulse added along the jump direction. Rejected when the
/// force is zero or the direction has no usable vertical component.
pub fn do_jump_player(dir: Vec2, force: f32, velocity: &mut Velocity) -> bool {
    if force <= 0.0 || dir.y.abs() <= VELOCITY_EPSILON {
        return false;
    }
    velocity.0 += dir.normalize() * force;
    true
}

/// Path-follower jump: replace velocity with a takeoff that crests `force`
/// cells up, direction biased near-vertical.
pub fn do_jump_path_follower(dir: Vec2, force: f32, velocity: &mut Velocity) -> bool {
    if force <= 0.0 || dir == Vec2::ZERO {
        return false;
    }
    let takeoff_speed = (2.0 * GRAVITY_MAGNITUDE * force).sqrt();
    let takeoff_dir = Vec2::new(dir.x * PATH_FOLLOWER_JUMP_X_BIAS, 1.0).normalize();
    velocity.0 = takeoff_dir * takeoff_speed;
    true
}

/// Animation clip for a state; Jump splits into rise/mid by vertical speed
pub fn select_clip(state: CreatureState, vy: f32, stats: &MovementStats) -> &'static str {
    match state {
        CreatureState::Idle => "Idle",
        CreatureState::Move => "Run",
        CreatureState::Jump => {
            if vy > stats.jump_to_mid_speed_threshold {
                "JumpRise"
            } else {
                "JumpMid"
            }
        }
        CreatureState::Fall => "JumpFall",
        CreatureState::Wall => "WallGrab",
        CreatureState::Dash => "DashLoop",
    }
}

fn on_state_change(after: CreatureState, velocity: &mut Velocity) {
    // Entering a resting contact kills any residual vertical motion
    if matches!(after, CreatureState::Idle | CreatureState::Wall) {
        velocity.0.y = 0.0;
    }
}

/// Switch state, run the change hook, and refresh the animation cue.
/// Re-entering the current state is a no-op.
pub fn transition(
    state: &mut CreatureState,
    next: CreatureState,
    velocity: &mut Velocity,
    cue: &mut AnimationCue,
    stats: &MovementStats,
) {
    if *state == next {
        return;
    }
    *state = next;
    on_state_change(next, velocity);
    cue.clip = select_clip(next, velocity.0.y, stats);
}

/// Ray-probe ground below and walls beside every actor
pub fn probe_contacts(
    service: Res<RayCastService>,
    mut actors: Query<(&Transform, &MovementTuning, &mut Grounded, &mut WallContact)>,
) {
    for (transform, tuning, mut grounded, mut walls) in &mut actors {
        let origin = transform.translation.truncate();
        grounded.0 = service
            .cast(
                origin,
                Vec2::NEG_Y,
                GROUND_PROBE_DISTANCE,
                CollisionLayer::Ground,
            )
            .is_some();
        walls.left = service
            .cast(
                origin + tuning.left_offset(),
                Vec2::NEG_X,
                WALL_PROBE_DISTANCE,
                CollisionLayer::Ground,
            )
            .is_some();
        walls.right = service
            .cast(
                origin + tuning.right_offset(),
                Vec2::X,
                WALL_PROBE_DISTANCE,
                CollisionLayer::Ground,
            )
            .is_some();
    }
}

/// Stamp the time of the last grounded tick, feeding the coyote window
pub fn refresh_last_grounded(
    time: Res<Time>,
    mut actors: Query<(&Grounded, &mut LastGrounded)>,
) {
    let now = time.elapsed_secs();
    for (grounded, mut last) in &mut actors {
        if grounded.0 {
            last.0 = now;
        }
    }
}

/// Per-state transition dispatch, role-specialized where the roles differ
pub fn dispatch_states(
    time: Res<Time>,
    mut actors: Query<(
        &ActorRole,
        &mut CreatureState,
        &mut Velocity,
        &Grounded,
        &WallContact,
        &MoveIntent,
        &mut DashState,
        &MovementStats,
        &mut AnimationCue,
    )>,
) {
    let dt = time.delta_secs();
    for (role, mut state, mut velocity, grounded, walls, intent, mut dash, stats, mut cue) in
        &mut actors
    {
        match *state {
            CreatureState::Idle => update_idle(
                *role, &mut state, &mut velocity, intent, stats, &mut cue,
            ),
            CreatureState::Move => {
                if intent.dir == Vec2::ZERO {
                    transition(&mut state, CreatureState::Idle, &mut velocity, &mut cue, stats);
                }
            }
            CreatureState::Jump => update_jump(
                *role, &mut state, &mut velocity, grounded, walls, intent, stats, &mut cue,
            ),
            CreatureState::Fall => update_fall(
                *role, &mut state, &mut velocity, grounded, walls, intent, stats, &mut cue,
            ),
            CreatureState::Wall => update_wall(
                *role, &mut state, &mut velocity, grounded, walls, intent, stats, &mut cue,
            ),
            CreatureState::Dash => update_dash(
                dt, &mut state, &mut velocity, walls, &mut dash, stats, &mut cue,
            ),
        }
    }
}

fn update_idle(
    role: ActorRole,
    state: &mut CreatureState,
    velocity: &mut Velocity,
    intent: &MoveIntent,
    stats: &MovementStats,
    cue: &mut AnimationCue,
) {
    if intent.dir.x.abs() > VELOCITY_EPSILON {
        transition(state, CreatureState::Move, velocity, cue, stats);
    } else if role == ActorRole::Enemy && velocity.0.y < stats.mid_to_fall_speed_threshold {
        // Path followers notice walking off a ledge; players only fall
        // out of an explicit jump
        transition(state, CreatureState::Fall, velocity, cue, stats);
    }
}

#[allow(clippy::too_many_arguments)]
fn update_jump(
    role: ActorRole,
    state: &mut CreatureState,
    velocity: &mut Velocity,
    grounded: &Grounded,
    walls: &WallContact,
    intent: &MoveIntent,
    stats: &MovementStats,
    cue: &mut AnimationCue,
) {
    if velocity.0.y < stats.mid_to_fall_speed_threshold {
        transition(state, CreatureState::Fall, velocity, cue, stats);
        return;
    }
    if role == ActorRole::Player {
        if walls.left && intent.raw.x > 0.0 {
            // rising away from the wall, keep the arc
        } else if walls.right && intent.raw.x < 0.0 {
        } else if walls.any() && intent.raw.x != 0.0 {
            transition(state, CreatureState::Wall, velocity, cue, stats);
            return;
        } else if grounded.0 && approx_zero(velocity.0.y, VELOCITY_EPSILON) {
            transition(state, CreatureState::Idle, velocity, cue, stats);
            return;
        }
    } else if grounded.0 && approx_zero(velocity.0.y, VELOCITY_EPSILON) {
        transition(state, CreatureState::Idle, velocity, cue, stats);
        return;
    }
    // refresh the rise/mid split while the arc continues
    cue.clip = select_clip(CreatureState::Jump, velocity.0.y, stats);
}

#[allow(clippy::too_many_arguments)]
fn update_fall(
    role: ActorRole,
    state: &mut CreatureState,
    velocity: &mut Velocity,
    grounded: &Grounded,
    walls: &WallContact,
    intent: &MoveIntent,
    stats: &MovementStats,
    cue: &mut AnimationCue,
) {
    if role == ActorRole::Player {
        if walls.left && intent.raw.x > 0.0 {
            // falling away from the wall
        } else if walls.right && intent.raw.x < 0.0 {
        } else if walls.any() && intent.raw.x != 0.0 {
            transition(state, CreatureState::Wall, velocity, cue, stats);
            return;
        }
    }
    if grounded.0 {
        transition(state, CreatureState::Idle, velocity, cue, stats);
    }
}

#[allow(clippy::too_many_arguments)]
fn update_wall(
    role: ActorRole,
    state: &mut CreatureState,
    velocity: &mut Velocity,
    grounded: &Grounded,
    walls: &WallContact,
    intent: &MoveIntent,
    stats: &MovementStats,
    cue: &mut AnimationCue,
) {
    if role != ActorRole::Player || !walls.any() {
        transition(state, CreatureState::Fall, velocity, cue, stats);
        return;
    }
    if !grounded.0 {
        // pressing away from the wall drops the grab
        if (walls.left && intent.raw.x > 0.0) || (walls.right && intent.raw.x < 0.0) {
            transition(state, CreatureState::Fall, velocity, cue, stats);
        }
    } else if intent.raw.x == 0.0
        || (walls.left && intent.raw.x > 0.0)
        || (walls.right && intent.raw.x < 0.0)
    {
        transition(state, CreatureState::Idle, velocity, cue, stats);
    }
}

fn update_dash(
    dt: f32,
    state: &mut CreatureState,
    velocity: &mut Velocity,
    walls: &WallContact,
    dash: &mut DashState,
    stats: &MovementStats,
    cue: &mut AnimationCue,
) {
    dash.time_left -= dt;
    if walls.any() {
        dash.stop();
        transition(state, CreatureState::Wall, velocity, cue, stats);
    } else if dash.time_left <= 0.0 {
        dash.stop();
        transition(state, CreatureState::Move, velocity, cue, stats);
    } else {
        velocity.0 = Vec2::new(velocity.0.x.signum() * stats.dash_speed, 0.0);
    }
}

/// Horizontal smoothing, better-jump gravity corrections, wall-slide cap,
/// and facing. Runs after state dispatch; suspended entirely during a dash.
pub fn shape_velocity(
    time: Res<Time>,
    mut actors: Query<(
        &ActorRole,
        &CreatureState,
        &mut Velocity,
        &mut DampState,
        &Grounded,
        &MoveIntent,
        &JumpHeld,
        &MovementStats,
        &MovementTuning,
        &mut Facing,
    )>,
) {
    let dt = time.delta_secs();
    for (role, state, mut velocity, mut damp, grounded, intent, jump_held, stats, tuning, mut facing) in
        &mut actors
    {
        if *state == CreatureState::Dash {
            continue;
        }

        if intent.dir.x.abs() <= VELOCITY_EPSILON {
            if grounded.0 {
                velocity.0.x *= tuning.ground_friction;
            }
            damp.0 = 0.0;
        } else {
            let accel_time = if grounded.0 {
                tuning.ground_accel_time
            } else {
                tuning.air_accel_time
            };
            velocity.0.x = smooth_damp(
                velocity.0.x,
                intent.dir.x * stats.max_speed,
                &mut damp.0,
                accel_time,
                dt,
            );
        }

        // Path followers ride the analytic takeoff arc untouched
        if *role == ActorRole::Player && !grounded.0 {
            let mult = better_jump_multiplier(velocity.0.y, jump_held.0, tuning);
            if mult > 1.0 {
                velocity.0.y -= GRAVITY_MAGNITUDE * (mult - 1.0) * dt;
            }
        }

        if *state == CreatureState::Wall {
            velocity.0.y = clamp_wall_slide(velocity.0.y, tuning.wall_slide_max_speed);
        }

        if velocity.0.x > VELOCITY_EPSILON {
            facing.0 = 1.0;
        } else if velocity.0.x < -VELOCITY_EPSILON {
            facing.0 = -1.0;
        }
    }
}

/// Snap transforms to the cell center when a forced move requested it
pub fn apply_cell_snap(
    grid: Res<GridConfig>,
    mut actors: Query<(&mut Transform, &mut CellPos)>,
) {
    for (mut transform, mut cell_pos) in &mut actors {
        if !cell_pos.snap_requested {
            continue;
        }
        let center = grid.cell_to_world(cell_pos.cell);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        cell_pos.snap_requested = false;
        cell_pos.lerp_completed = true;
    }
}

/// Re-derive the player's occupancy cell from its world position. The
/// transform is authoritative for players, so the index follows it.
pub fn reconcile_player_cell(
    grid: Res<GridConfig>,
    mut index: ResMut<OccupancyIndex>,
    mut players: Query<(Entity, &ActorRole, &Transform, &mut CellPos)>,
) {
    for (entity, role, transform, mut cell_pos) in &mut players {
        if *role != ActorRole::Player {
            continue;
        }
        let cell = grid.world_to_cell(transform.translation.truncate());
        if index.recorded_cell(entity) == Some(cell) {
            continue;
        }
        if index.move_to(entity, ActorKind::Player, cell, false, &mut cell_pos) {
            cell_pos.lerp_completed = true;
        }
    }
}

/// Wind down dash cooldowns; runs in the variable pass so the timer keeps
/// counting regardless of fixed-tick cadence
pub fn tick_dash_cooldown(time: Res<Time>, mut dashes: Query<&mut DashState>) {
    let dt = time.delta_secs();
    for mut dash in &mut dashes {
        if dash.cooldown_left > 0.0 {
            dash.cooldown_left = (dash.cooldown_left - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::SolidCells;
    use std::collections::HashSet;

    #[test]
    fn probes_report_ground_and_adjacent_walls() {
        let mut app = App::new();
        app.insert_resource(RayCastService::new(SolidCells {
            cells: HashSet::from([IVec2::new(0, -1), IVec2::new(-1, 1)]),
        }));
        app.add_systems(Update, probe_contacts);

        let actor = app
            .world_mut()
            .spawn((
                Transform::from_translation(Vec3::new(0.5, 0.5, 0.0)),
                MovementTuning::default(),
                Grounded::default(),
                WallContact::default(),
            ))
            .id();
        app.update();

        let grounded = app.world().get::<Grounded>(actor).unwrap();
        let walls = app.world().get::<WallContact>(actor).unwrap();
        assert!(grounded.0);
        assert!(walls.left);
        assert!(!walls.right);
    }

    #[test]
    fn coyote_window_is_inclusive_at_the_boundary() {
        let coyote = 0.1;
        let left_ground_at = 2.0;
        assert!(grounded_with_coyote(false, 2.0999, left_ground_at, coyote));
        assert!(grounded_with_coyote(false, 2.1, left_ground_at, coyote));
        assert!(!grounded_with_coyote(false, 2.1001, left_ground_at, coyote));
        assert!(grounded_with_coyote(true, 99.0, left_ground_at, coyote));
    }

    #[test]
    fn better_jump_multiplier_selects_by_phase() {
        let tuning = MovementTuning::default();
        assert_eq!(
            better_jump_multiplier(-1.0, true, &tuning),
            tuning.fall_multiplier
        );
        assert_eq!(
            better_jump_multiplier(1.0, false, &tuning),
            tuning.low_jump_multiplier
        );
        assert_eq!(better_jump_multiplier(1.0, true, &tuning), 1.0);
        assert_eq!(better_jump_multiplier(0.0, false, &tuning), 1.0);
    }

    #[test]
    fn wall_slide_caps_only_downward_speed() {
        assert_eq!(clamp_wall_slide(-5.0, 2.0), -2.0);
        assert_eq!(clamp_wall_slide(-1.0, 2.0), -1.0);
        assert_eq!(clamp_wall_slide(3.0, 2.0), 3.0);
    }

    #[test]
    fn player_jump_adds_impulse_along_direction() {
        let mut velocity = Velocity(Vec2::new(2.0, 0.0));
        assert!(do_jump_player(Vec2::Y, 5.0, &mut velocity));
        assert_eq!(velocity.0, Vec2::new(2.0, 5.0));

        let mut wall = Velocity(Vec2::ZERO);
        assert!(do_jump_player(Vec2::new(1.0, 2.0), 7.5, &mut wall));
        let expected = Vec2::new(1.0, 2.0).normalize() * 7.5;
        assert!((wall.0 - expected).length() < 1e-5);
    }

    #[test]
    fn player_jump_rejects_degenerate_input() {
        let mut velocity = Velocity(Vec2::ZERO);
        assert!(!do_jump_player(Vec2::Y, 0.0, &mut velocity));
        assert!(!do_jump_player(Vec2::X, 5.0, &mut velocity));
        assert!(!do_jump_player(Vec2::ZERO, 5.0, &mut velocity));
        assert_eq!(velocity.0, Vec2::ZERO);
    }

    #[test]
    fn path_follower_jump_replaces_velocity_with_takeoff() {
        let mut velocity = Velocity(Vec2::new(9.0, -9.0));
        assert!(do_jump_path_follower(Vec2::new(1.0, 0.5), 2.0, &mut velocity));
        let speed = (2.0 * GRAVITY_MAGNITUDE * 2.0).sqrt();
        assert!((velocity.0.length() - speed).abs() < 1e-4);
        assert!(velocity.0.y > 0.0);
        // biased near-vertical
        assert!(velocity.0.y > velocity.0.x.abs());
    }

    #[test]
    fn path_follower_jump_rejects_zero_inputs() {
        let mut velocity = Velocity(Vec2::ZERO);
        assert!(!do_jump_path_follower(Vec2::ZERO, 2.0, &mut velocity));
        assert!(!do_jump_path_follower(Vec2::Y, 0.0, &mut velocity));
    }

    #[test]
    fn entering_idle_or_wall_zeroes_vertical_velocity() {
        let stats = MovementStats::default();
        let mut cue = AnimationCue::default();

        let mut state = CreatureState::Fall;
        let mut velocity = Velocity(Vec2::new(1.0, -4.0));
        transition(&mut state, CreatureState::Idle, &mut velocity, &mut cue, &stats);
        assert_eq!(state, CreatureState::Idle);
        assert_eq!(velocity.0.y, 0.0);
        assert_eq!(cue.clip, "Idle");

        let mut state = CreatureState::Jump;
        let mut velocity = Velocity(Vec2::new(1.0, 3.0));
        transition(&mut state, CreatureState::Wall, &mut velocity, &mut cue, &stats);
        assert_eq!(velocity.0.y, 0.0);
        assert_eq!(cue.clip, "WallGrab");
    }

    #[test]
    fn transition_to_same_state_is_a_no_op() {
        let stats = MovementStats::default();
        let mut cue = AnimationCue { clip: "Run" };
        let mut state = CreatureState::Move;
        let mut velocity = Velocity(Vec2::new(0.0, -3.0));
        transition(&mut state, CreatureState::Move, &mut velocity, &mut cue, &stats);
        assert_eq!(velocity.0.y, -3.0);
        assert_eq!(cue.clip, "Run");
    }

    #[test]
    fn jump_clip_splits_on_rise_threshold() {
        let stats = MovementStats::default();
        let fast = stats.jump_to_mid_speed_threshold + 1.0;
        let slow = stats.jump_to_mid_speed_threshold - 1.0;
        assert_eq!(select_clip(CreatureState::Jump, fast, &stats), "JumpRise");
        assert_eq!(select_clip(CreatureState::Jump, slow, &stats), "JumpMid");
        assert_eq!(select_clip(CreatureState::Fall, slow, &stats), "JumpFall");
    }

    #[test]
    fn jump_falls_once_below_threshold() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Jump;
        let mut velocity = Velocity(Vec2::new(0.0, stats.mid_to_fall_speed_threshold - 0.5));
        let mut cue = AnimationCue::default();
        update_jump(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(false),
            &WallContact::default(),
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Fall);
    }

    #[test]
    fn airborne_jump_grabs_wall_when_pressing_into_it() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Jump;
        let mut velocity = Velocity(Vec2::new(-1.0, 1.0));
        let mut cue = AnimationCue::default();
        let mut intent = MoveIntent::default();
        intent.set(Vec2::NEG_X);
        update_jump(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(false),
            &WallContact {
                left: true,
                right: false,
            },
            &intent,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Wall);
        assert_eq!(velocity.0.y, 0.0);
    }

    #[test]
    fn jump_ignores_wall_when_pressing_away_from_it() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Jump;
        let mut velocity = Velocity(Vec2::new(1.0, 1.0));
        let mut cue = AnimationCue::default();
        let mut intent = MoveIntent::default();
        intent.set(Vec2::X);
        update_jump(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(false),
            &WallContact {
                left: true,
                right: false,
            },
            &intent,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Jump);
    }

    #[test]
    fn fall_lands_to_idle_when_grounded() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Fall;
        let mut velocity = Velocity(Vec2::new(0.5, -2.0));
        let mut cue = AnimationCue::default();
        update_fall(
            ActorRole::Enemy,
            &mut state,
            &mut velocity,
            &Grounded(true),
            &WallContact::default(),
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Idle);
        assert_eq!(velocity.0.y, 0.0);
    }

    #[test]
    fn grounded_wall_grab_releases_to_idle_without_intent() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Wall;
        let mut velocity = Velocity(Vec2::ZERO);
        let mut cue = AnimationCue::default();
        update_wall(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(true),
            &WallContact {
                left: true,
                right: false,
            },
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Idle);
    }

    #[test]
    fn airborne_wall_grab_drops_when_pressing_away() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Wall;
        let mut velocity = Velocity(Vec2::ZERO);
        let mut cue = AnimationCue::default();
        let mut intent = MoveIntent::default();
        intent.set(Vec2::X);
        update_wall(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(false),
            &WallContact {
                left: true,
                right: false,
            },
            &intent,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Fall);
    }

    #[test]
    fn losing_the_wall_drops_to_fall() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Wall;
        let mut velocity = Velocity(Vec2::ZERO);
        let mut cue = AnimationCue::default();
        update_wall(
            ActorRole::Player,
            &mut state,
            &mut velocity,
            &Grounded(false),
            &WallContact::default(),
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Fall);
    }

    #[test]
    fn dash_holds_speed_then_expires_to_move() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Dash;
        let mut velocity = Velocity(Vec2::new(1.0, -3.0));
        let mut cue = AnimationCue::default();
        let mut dash = DashState {
            dashing: true,
            time_left: 0.1,
            cooldown_left: stats.dash_cool_time,
        };
        update_dash(
            0.05,
            &mut state,
            &mut velocity,
            &WallContact::default(),
            &mut dash,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Dash);
        assert_eq!(velocity.0, Vec2::new(stats.dash_speed, 0.0));

        update_dash(
            0.1,
            &mut state,
            &mut velocity,
            &WallContact::default(),
            &mut dash,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Move);
        assert!(!dash.dashing);
        // cooldown keeps running after the dash ends
        assert!(dash.cooldown_left > 0.0);
    }

    #[test]
    fn dash_into_wall_ends_in_wall_grab() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Dash;
        let mut velocity = Velocity(Vec2::new(stats.dash_speed, 0.0));
        let mut cue = AnimationCue::default();
        let mut dash = DashState {
            dashing: true,
            time_left: 0.2,
            cooldown_left: stats.dash_cool_time,
        };
        update_dash(
            0.016,
            &mut state,
            &mut velocity,
            &WallContact {
                left: false,
                right: true,
            },
            &mut dash,
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Wall);
        assert!(!dash.dashing);
    }

    #[test]
    fn enemy_idle_notices_falling_off_a_ledge() {
        let stats = MovementStats::default();
        let mut state = CreatureState::Idle;
        let mut velocity = Velocity(Vec2::new(0.0, stats.mid_to_fall_speed_threshold - 1.0));
        let mut cue = AnimationCue::default();
        update_idle(
            ActorRole::Enemy,
            &mut state,
            &mut velocity,
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(state, CreatureState::Fall);

        let mut player_state = CreatureState::Idle;
        update_idle(
            ActorRole::Player,
            &mut player_state,
            &mut velocity,
            &MoveIntent::default(),
            &stats,
            &mut cue,
        );
        assert_eq!(player_state, CreatureState::Idle);
    }
}
