//! # Dialogue Rules
//!
//! The authored side of branching dialogue: nodes, choices, effects, the
//! graph that holds them, and the runtime state they are interpreted against.
//! This crate holds data only; interpretation lives in `dialogue_core`.

pub mod attributes;
pub mod dialogue_state;
pub mod graph;
pub mod nodes;

pub use attributes::*;
pub use dialogue_state::*;
pub use graph::*;
pub use nodes::*;
