//! # Dialogue Core
//!
//! The interpretation engine for branching dialogue. It reads the authored
//! graph and state types from `dialogue_rules` and decides what is said,
//! what may be chosen, and what choosing does.
//!
//! ## Core Components
//!
//! - **expression**: Parses and evaluates condition strings
//! - **resolver**: Resolves a node's line and its unlocked choices
//! - **effects**: Applies a choice's effects to the state
//! - **session**: Runs a conversation turn by turn and publishes events
//! - **events**: Notifications for the presentation layer
//!
//! ## Design Philosophy
//!
//! - **Never fails at runtime**: Bad data degrades to false / 0 / no-op
//! - **Turn-based**: Every call runs to completion; nothing blocks
//! - **Shared graphs**: Sessions borrow one immutable graph and own their state

pub mod effects;
pub mod events;
pub mod expression;
pub mod resolver;
pub mod session;

pub use effects::apply;
pub use events::*;
pub use expression::*;
pub use resolver::*;
pub use session::*;
