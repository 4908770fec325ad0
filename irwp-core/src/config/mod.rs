//! Controller configuration
//!
//! Timing parameters for the control loop, the flicker burst and the
//! emergency alert. Built-in defaults are used unless a board overrides them.

pub mod types;

pub use types::{ConfigError, ControllerConfig, FlickerConfig, MAX_FLICKER_FRAMES};
