//! Tunable constants for movement and navigation.
//!
//! World units equal grid cells (cell size 1.0), so jump powers and edge
//! costs share a scale. Per-template values in the movement data table
//! override the movement defaults below.

// ============================================================
// GRID / WORLD
// ============================================================

/// Side length of one grid cell in world units
pub const CELL_SIZE: f32 = 1.0;

/// Downward gravity magnitude applied by the host physics (units/s^2)
pub const GRAVITY_MAGNITUDE: f32 = 9.81;

// ============================================================
// MOVEMENT DEFAULTS (per-template records override these)
// ============================================================

pub const MAX_HP: f32 = 100.0;
pub const MAX_SPEED: f32 = 5.0;

/// Player jump impulse (units/s, added along the jump direction)
pub const JUMP_FORCE: f32 = 5.0;

/// Path-follower jump power budget (max jump-edge cost, in cells)
pub const PATH_FOLLOWER_JUMP_FORCE: f32 = 3.0;

/// Wall jumps scale the base jump force by this factor
pub const WALL_JUMP_FORCE_MULTIPLIER: f32 = 1.5;

/// Rising faster than this shows the jump-rise clip; slower shows jump-mid
pub const JUMP_TO_MID_SPEED_THRESHOLD: f32 = 1.5;

/// Falling below this vertical speed leaves Jump for Fall
pub const MID_TO_FALL_SPEED_THRESHOLD: f32 = -0.1;

/// Grace window after leaving the ground during which a jump still fires
pub const COYOTE_TIME_DURATION: f32 = 0.1;

pub const DASH_SPEED: f32 = 20.0;
pub const DASH_DURATION: f32 = 0.2;
pub const DASH_COOL_TIME: f32 = 0.6;

/// Seconds between path recomputations for path followers
pub const PATH_UPDATE_INTERVAL: f32 = 0.5;

// ============================================================
// MOVEMENT TUNING DEFAULTS (shared shaping parameters)
// ============================================================

/// Smooth-damp time toward target horizontal speed while grounded
pub const GROUND_ACCEL_TIME: f32 = 0.1;

/// Smooth-damp time toward target horizontal speed while airborne
pub const AIR_ACCEL_TIME: f32 = 0.2;

/// Per-tick horizontal velocity factor when grounded with no intent
pub const GROUND_FRICTION: f32 = 1.0;

/// Extra gravity factor while falling
pub const FALL_MULTIPLIER: f32 = 2.5;

/// Extra gravity factor while rising without the jump key held
pub const LOW_JUMP_MULTIPLIER: f32 = 2.0;

/// Wall-slide downward speed cap (units/s)
pub const WALL_SLIDE_MAX_SPEED: f32 = 2.0;

// ============================================================
// PROBES
// ============================================================

/// Ground ray length from the actor origin
pub const GROUND_PROBE_DISTANCE: f32 = 0.6;

/// Wall ray length from the side-line offsets
pub const WALL_PROBE_DISTANCE: f32 = 0.15;

/// Speeds below this are treated as zero (landing checks, facing)
pub const VELOCITY_EPSILON: f32 = 1e-3;

// ============================================================
// NAVIGATION
// ============================================================

/// Global jump-edge radius used when per-tile powers are disabled (cells)
pub const DEFAULT_JUMP_RADIUS: f32 = 4.0;

/// Default search depth cap for path-follower routes
pub const DEFAULT_PATH_DEPTH: u32 = 20;

/// Horizontal bias applied to path-follower takeoff direction
pub const PATH_FOLLOWER_JUMP_X_BIAS: f32 = 0.4;

// ============================================================
// ASSET PATHS
// ============================================================

pub const TILE_HINTS_FILE: &str = "assets/tile_hint_map.json";
pub const MOVEMENT_DATA_FILE: &str = "assets/movement_data.json";
pub const MOVEMENT_TUNING_FILE: &str = "assets/movement_tuning.toml";
