//! Kinematic movement - components, data tables, and the state machine

mod components;
mod machine;
mod tuning;

pub use components::*;
pub use machine::*;
pub use tuning::*;
