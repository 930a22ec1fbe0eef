//! Navigation - tile-hint graph and pathfinding

mod graph;
mod path;

pub use graph::*;
pub use path::*;
