//! Actor roles - player control and enemy path following

mod enemy;
mod player;

pub use enemy::*;
pub use player::*;
