//! Plugin wiring the movement pipeline into an app

use bevy::prelude::*;

use crate::actor::{ControlInput, apply_player_input, follow_path};
use crate::grid::GridConfig;
use crate::movement::{
    MovementTuningSet, apply_cell_snap, dispatch_states, probe_contacts, reconcile_player_cell,
    refresh_last_grounded, shape_velocity, tick_dash_cooldown,
};
use crate::nav::NavGraph;
use crate::occupancy::{OccupancyIndex, release_despawned};
use crate::services::{NullRayCaster, RayCastService};

/// Registers resources and the movement pipeline.
///
/// Discrete input and cooldown bookkeeping run in the variable pass; the
/// contact probes, state machine, velocity shaping, and occupancy
/// reconciliation run chained in the fixed pass. The host is expected to
/// insert its own `RayCastService`, build a `NavGraph`, and seed
/// `OccupancyIndex` bounds; missing pieces fall back to inert defaults.
pub struct MovementCorePlugin;

impl Plugin for MovementCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridConfig>()
            .init_resource::<NavGraph>()
            .init_resource::<OccupancyIndex>()
            .init_resource::<ControlInput>()
            .init_resource::<MovementTuningSet>();

        if !app.world().contains_resource::<RayCastService>() {
            app.insert_resource(RayCastService::new(NullRayCaster));
        }

        app.add_systems(Update, (apply_player_input, tick_dash_cooldown));
        app.add_systems(
            FixedUpdate,
            (
                probe_contacts,
                refresh_last_grounded,
                follow_path,
                dispatch_states,
                shape_velocity,
                apply_cell_snap,
                reconcile_player_cell,
                release_despawned,
            )
                .chain(),
        );
    }
}
