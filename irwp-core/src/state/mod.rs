//! System state machine
//!
//! Defines when patterns may run. The state machine is explicit, finite,
//! and deterministic; guards are evaluated by the caller and passed in.

pub mod events;
pub mod machine;

pub use events::{Event, TransitionGuard};
pub use machine::SystemState;
