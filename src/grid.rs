//! Grid/world coordinate mapping

use bevy::prelude::*;

use crate::constants::CELL_SIZE;

/// Shared grid geometry. World positions map to cells by flooring,
/// cells map back to world space at their center.
#[derive(Resource, Clone, Debug)]
pub struct GridConfig {
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
        }
    }
}

impl GridConfig {
    pub fn world_to_cell(&self, world: Vec2) -> IVec2 {
        (world / self.cell_size).floor().as_ivec2()
    }

    pub fn cell_to_world(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }
}
