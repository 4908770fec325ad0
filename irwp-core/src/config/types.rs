//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on flicker frames per burst
pub const MAX_FLICKER_FRAMES: u8 = 64;

/// Longest frame period accepted for the flicker burst
pub const MAX_FLICKER_PERIOD_US: u16 = 1000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Control loop interval must be non-zero
    ZeroTickInterval,
    /// Flicker burst frame count out of range
    FlickerFrames,
    /// Flicker burst frame period out of range
    FlickerPeriod,
    /// Alert blink interval must be non-zero
    ZeroBlinkInterval,
}

/// Alternating burst parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlickerConfig {
    /// Number of frames in one burst
    pub frames: u8,
    /// Time each frame is held (µs)
    pub period_us: u16,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            frames: 50,
            period_us: 500,
        }
    }
}

/// Top-level controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Main loop period (ms)
    pub tick_interval_ms: u32,
    /// Flicker burst
    pub flicker: FlickerConfig,
    /// Status indicator toggle period while in emergency (ms)
    pub alert_blink_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1,
            flicker: FlickerConfig::default(),
            alert_blink_ms: 100,
        }
    }
}

impl ControllerConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.flicker.frames == 0 || self.flicker.frames > MAX_FLICKER_FRAMES {
            return Err(ConfigError::FlickerFrames);
        }
        if self.flicker.period_us == 0 || self.flicker.period_us > MAX_FLICKER_PERIOD_US {
            return Err(ConfigError::FlickerPeriod);
        }
        if self.alert_blink_ms == 0 {
            return Err(ConfigError::ZeroBlinkInterval);
        }
        Ok(())
    }

    /// Validate and hand the config back for use
    pub fn checked(self) -> Result<Self, ConfigError> {
        self.validate().map(|()| self)
    }
}
