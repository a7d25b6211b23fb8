//! Core state types for the powertrain.
//!
//! This module contains the pure pieces of the state machine:
//! - Discrete states via the `State` trait (engine lifecycle, gear)
//! - Guards implementing the engine precondition protocol
//! - Immutable transition history
//!
//! Nothing in here mutates an engine or transmission; those types live in
//! their own modules and call into this one.

mod guard;
mod history;
mod state;

pub use guard::{check_all, Guard, RpmZone, COMMAND_GUARDS, START_GUARDS};
pub use history::{StateHistory, StateTransition};
pub use state::{EngineLifecycle, Gear, State};
