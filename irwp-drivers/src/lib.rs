//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in irwp-core on top of `embedded-hal` 1.0:
//!
//! - PWM output bank with a shared power relay
//! - Active-low interlock switch
//! - Status indicator LED

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod output;
pub mod switch;

pub use indicator::StatusLed;
pub use output::PwmOutputBank;
pub use switch::ActiveLowSwitch;
