//! gridrunner - movement and navigation core for a tile-based 2D platformer
//!
//! The crate owns the movement state machine, the tile-hint navigation
//! graph, greedy best-first pathfinding, and a single-occupant-per-cell
//! occupancy index. It deliberately does not integrate positions, apply
//! base gravity, or render anything: the host supplies a `RayCastService`
//! for contact probes, moves transforms from `Velocity`, and plays the
//! `AnimationCue` clips the core selects.

// Core modules
pub mod actor;
pub mod constants;
pub mod grid;
pub mod helpers;
pub mod movement;
pub mod nav;
pub mod occupancy;
pub mod plugin;
pub mod services;

// Common re-exports for convenience
pub use actor::{
    ControlInput, ControlKey, JumpReservation, KeyPhase, PathFollower, apply_player_input,
    follow_path, resolve_jump,
};
pub use grid::GridConfig;
pub use movement::{
    ActorBundle, ActorRole, AnimationCue, CreatureState, DampState, DashState, Facing, Grounded,
    Hp, JumpHeld, LastGrounded, MoveIntent, MovementDatabase, MovementStats, MovementTuning,
    MovementTuningSet, Velocity, WallContact,
};
pub use nav::{
    EdgeKind, NavEdge, NavGraph, NavGraphBuilder, NavNode, PathActor, TileHint, TileHintList,
    TileKind, find_path,
};
pub use occupancy::{ActorKind, Cell, CellPos, OccupancyIndex};
pub use plugin::MovementCorePlugin;
pub use services::{CollisionLayer, NullRayCaster, RayCastService, RayCaster, RayHit};
