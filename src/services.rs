//! Host-provided services
//!
//! The core never integrates positions or owns colliders. Grounded and wall
//! checks go through an injected ray-cast service; the host physics engine
//! implements it against its own collision world.

use bevy::prelude::*;

/// Collision layers the movement core probes against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionLayer {
    /// Static level geometry (floors and walls)
    Ground,
    /// Other creatures
    Creature,
}

/// Result of a ray probe
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
}

/// Synchronous ray query against the host's collision world
pub trait RayCaster: Send + Sync {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<RayHit>;
}

/// Boxed ray-cast service resource. Hosts insert their own implementation
/// before adding the plugin; the default reports no hits.
#[derive(Resource)]
pub struct RayCastService(Box<dyn RayCaster>);

impl RayCastService {
    pub fn new(caster: impl RayCaster + 'static) -> Self {
        Self(Box::new(caster))
    }

    pub fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<RayHit> {
        self.0.cast(origin, direction, max_distance, layer)
    }
}

/// Placeholder caster: every probe misses. Actors stay airborne until the
/// host installs a real implementation.
#[derive(Default)]
pub struct NullRayCaster;

impl RayCaster for NullRayCaster {
    fn cast(
        &self,
        _origin: Vec2,
        _direction: Vec2,
        _max_distance: f32,
        _layer: CollisionLayer,
    ) -> Option<RayHit> {
        None
    }
}
