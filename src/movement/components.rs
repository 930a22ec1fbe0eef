//! Movement components shared by all actor roles

use bevy::prelude::*;

use crate::movement::{MovementStats, MovementTuning};
use crate::occupancy::CellPos;

/// Which control scheme drives an actor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    /// Driven by discrete control input
    Player,
    /// Driven by path following toward a target
    Enemy,
}

/// Kinematic state of an actor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatureState {
    #[default]
    Idle,
    Move,
    Jump,
    Fall,
    Wall,
    Dash,
}

/// Velocity in world units/sec. The host physics integrates positions and
/// applies base gravity; the core reads and writes this component.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Whether the actor's ground probe hit this tick
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Grounded(pub bool);

/// Results of the left/right wall probes
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Desired movement direction. `raw` keeps the unnormalized input.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    pub dir: Vec2,
    pub raw: Vec2,
}

impl MoveIntent {
    pub fn set(&mut self, raw: Vec2) {
        self.raw = raw;
        self.dir = raw.normalize_or_zero();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Timestamp (seconds since startup) of the last grounded tick
#[derive(Component, Debug, Clone, Copy)]
pub struct LastGrounded(pub f32);

impl Default for LastGrounded {
    fn default() -> Self {
        Self(f32::NEG_INFINITY)
    }
}

/// Whether the jump key is currently held (shortens jumps when released)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct JumpHeld(pub bool);

/// Dash lifetime and its independent cooldown timer
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DashState {
    pub dashing: bool,
    pub time_left: f32,
    pub cooldown_left: f32,
}

impl DashState {
    pub fn can_start(&self) -> bool {
        !self.dashing && self.cooldown_left <= 0.0
    }

    /// Arm the dash and start the cooldown from the same instant
    pub fn start(&mut self, duration: f32, cool_time: f32) {
        self.dashing = true;
        self.time_left = duration;
        self.cooldown_left = cool_time;
    }

    pub fn stop(&mut self) {
        self.dashing = false;
        self.time_left = 0.0;
    }
}

/// Smooth-damp rate memory for horizontal velocity shaping
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DampState(pub f32);

/// Facing sign: 1.0 right, -1.0 left
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub f32);

impl Default for Facing {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Animation clip the presentation layer should play
#[derive(Component, Debug, Clone, Copy)]
pub struct AnimationCue {
    pub clip: &'static str,
}

impl Default for AnimationCue {
    fn default() -> Self {
        Self { clip: "Idle" }
    }
}

/// Hit points, clamped to [0, max]
#[derive(Component, Debug, Clone, Copy)]
pub struct Hp {
    current: f32,
    max: f32,
}

impl Hp {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Everything an actor needs to run through the movement pipeline
#[derive(Bundle)]
pub struct ActorBundle {
    pub role: ActorRole,
    pub state: CreatureState,
    pub velocity: Velocity,
    pub grounded: Grounded,
    pub walls: WallContact,
    pub intent: MoveIntent,
    pub last_grounded: LastGrounded,
    pub jump_held: JumpHeld,
    pub dash: DashState,
    pub damp: DampState,
    pub facing: Facing,
    pub cue: AnimationCue,
    pub hp: Hp,
    pub cell_pos: CellPos,
    pub stats: MovementStats,
    pub tuning: MovementTuning,
    pub transform: Transform,
}

impl ActorBundle {
    pub fn new(role: ActorRole, stats: MovementStats, tuning: MovementTuning, spawn: Vec2) -> Self {
        Self {
            role,
            state: CreatureState::default(),
            velocity: Velocity::default(),
            grounded: Grounded::default(),
            walls: WallContact::default(),
            intent: MoveIntent::default(),
            last_grounded: LastGrounded::default(),
            jump_held: JumpHeld::default(),
            dash: DashState::default(),
            damp: DampState::default(),
            facing: Facing::default(),
            cue: AnimationCue::default(),
            hp: Hp::new(stats.max_hp),
            cell_pos: CellPos::default(),
            stats,
            tuning,
            transform: Transform::from_translation(spawn.extend(0.0)),
        }
    }
}
