//! Safety interlock
//!
//! Samples the physical enable switch and the emergency latch. The latch is
//! the only state shared with interrupt context.

pub mod interlock;

pub use interlock::{EmergencyLatch, SafetyInterlock, SafetyStatus};
