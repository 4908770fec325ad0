//! Board-agnostic core logic for the wearable sequencer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (outputs, interlock switch, storage)
//! - System state machine (Idle / Armed / Cycling / Emergency)
//! - Pattern catalog and the phase-sequencing engine
//! - Safety interlock and the interrupt-shared emergency latch
//! - Controller context driven once per main-loop iteration
//! - Configuration and persisted-record decoding

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod pattern;
#[cfg(feature = "serde")]
pub mod persist;
pub mod safety;
pub mod state;
pub mod traits;

pub use controller::{Controller, Poll};
