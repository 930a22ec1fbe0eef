//! Player control
//!
//! The host translates its input devices into a `ControlInput` resource:
//! a horizontal axis plus discrete key events. The apply system drains the
//! events each frame, resolving jumps (wall jump first, then coyote jump)
//! and dash starts.

use bevy::prelude::*;

use crate::constants::WALL_JUMP_FORCE_MULTIPLIER;
use crate::movement::{
    ActorRole, AnimationCue, CreatureState, DashState, Facing, Grounded, JumpHeld, LastGrounded,
    MoveIntent, MovementStats, Velocity, WallContact, do_jump_player, grounded_with_coyote,
    transition,
};

/// Abstract keys the movement core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Jump,
    Dash,
}

/// Edge/phase of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
    Hold,
    DoubleTap,
}

/// Input surface written by the host each frame
#[derive(Resource, Debug, Default)]
pub struct ControlInput {
    /// Horizontal axis, -1.0 to 1.0
    pub move_axis: f32,
    pub events: Vec<(ControlKey, KeyPhase)>,
}

impl ControlInput {
    pub fn press(&mut self, key: ControlKey) {
        self.events.push((key, KeyPhase::Down));
    }

    pub fn release(&mut self, key: ControlKey) {
        self.events.push((key, KeyPhase::Up));
    }
}

/// Pick the jump to perform, if any: wall jumps take priority while
/// airborne against a wall, otherwise a plain coyote-checked jump. The
/// plain jump is suppressed mid-air-state so Space can't double-fire
/// inside the coyote window.
pub fn resolve_jump(
    state: CreatureState,
    grounded: bool,
    walls: WallContact,
    raw_x: f32,
    now: f32,
    last_grounded: f32,
    stats: &MovementStats,
) -> Option<(Vec2, f32)> {
    if !grounded && walls.left && raw_x >= 0.0 {
        return Some((
            Vec2::new(1.0, 2.0).normalize(),
            stats.jump_force * WALL_JUMP_FORCE_MULTIPLIER,
        ));
    }
    if !grounded && walls.right && raw_x <= 0.0 {
        return Some((
            Vec2::new(-1.0, 2.0).normalize(),
            stats.jump_force * WALL_JUMP_FORCE_MULTIPLIER,
        ));
    }
    if grounded_with_coyote(grounded, now, last_grounded, stats.coyote_time_duration) {
        if matches!(
            state,
            CreatureState::Jump | CreatureState::Fall | CreatureState::Wall
        ) {
            return None;
        }
        return Some((Vec2::Y, stats.jump_force));
    }
    None
}

/// Drain `ControlInput` into the player actor: axis becomes move intent,
/// key events become jumps, dash starts, and the held-jump flag
pub fn apply_player_input(
    time: Res<Time>,
    mut input: ResMut<ControlInput>,
    mut players: Query<(
        &ActorRole,
        &mut CreatureState,
        &mut Velocity,
        &Grounded,
        &WallContact,
        &mut MoveIntent,
        &mut JumpHeld,
        &mut DashState,
        &MovementStats,
        &LastGrounded,
        &mut AnimationCue,
        &Facing,
    )>,
) {
    let now = time.elapsed_secs();
    for (
        role,
        mut state,
        mut velocity,
        grounded,
        walls,
        mut intent,
        mut jump_held,
        mut dash,
        stats,
        last_grounded,
        mut cue,
        facing,
    ) in &mut players
    {
        if *role != ActorRole::Player {
            continue;
        }

        intent.set(Vec2::new(input.move_axis, 0.0));

        for (key, phase) in input.events.drain(..) {
            match (key, phase) {
                (ControlKey::Jump, KeyPhase::Down) => {
                    jump_held.0 = true;
                    if let Some((dir, force)) = resolve_jump(
                        *state,
                        grounded.0,
                        *walls,
                        intent.raw.x,
                        now,
                        last_grounded.0,
                        stats,
                    ) && do_jump_player(dir, force, &mut velocity)
                    {
                        transition(
                            &mut state,
                            CreatureState::Jump,
                            &mut velocity,
                            &mut cue,
                            stats,
                        );
                    }
                }
                (ControlKey::Jump, KeyPhase::Up) => {
                    jump_held.0 = false;
                }
                (ControlKey::Dash, KeyPhase::Down) => {
                    if dash.can_start() {
                        dash.start(stats.dash_duration, stats.dash_cool_time);
                        let dir_x = if intent.raw.x != 0.0 {
                            intent.raw.x
                        } else {
                            facing.0
                        };
                        velocity.0 = Vec2::new(dir_x.signum() * stats.dash_speed, 0.0);
                        transition(
                            &mut state,
                            CreatureState::Dash,
                            &mut velocity,
                            &mut cue,
                            stats,
                        );
                    }
                }
                // Hold and double-tap phases are consumed but unbound
                _ => {}
            }
        }
    }
}
