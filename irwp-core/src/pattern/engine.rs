//! Phase sequencing engine
//!
//! The engine owns the loaded pattern and a cursor into it. Each tick checks
//! whether the current phase's duration has elapsed since the cursor last
//! moved; if so it applies that phase, advances, and restarts the phase
//! timer. Timestamps are wrapping `u32` milliseconds.

use crate::config::FlickerConfig;
use crate::safety::{EmergencyLatch, SafetyStatus};
use crate::state::SystemState;
use crate::traits::OutputDriver;

use super::flicker::{apply_group, ApplyOutcome};
use super::phase::{AttackPattern, PatternError};

/// Position within the loaded pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternCursor {
    /// Phase whose duration is being timed
    pub index: usize,
    /// When the current phase started (ms)
    pub phase_start_ms: u32,
    /// Full passes through the phase sequence
    pub completed_cycles: u32,
}

impl PatternCursor {
    fn at(now_ms: u32) -> Self {
        Self {
            index: 0,
            phase_start_ms: now_ms,
            completed_cycles: 0,
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not cycling, interlock open, latch set, or nothing loaded
    Gated,
    /// Current phase still running
    Waiting,
    /// A phase was applied and the cursor moved
    Advanced,
    /// A phase was applied and the sequence wrapped
    CycleCompleted(u32),
    /// The sequence wrapped and reached the pattern's repeat target
    TargetReached(u32),
    /// A flicker burst was cut short by the emergency latch
    BurstAborted,
}

/// Owns the current pattern and its cursor
#[derive(Debug, Clone)]
pub struct PatternEngine {
    pattern: Option<AttackPattern>,
    cursor: PatternCursor,
    flicker: FlickerConfig,
}

impl PatternEngine {
    /// Create an engine with nothing loaded
    pub fn new(flicker: FlickerConfig) -> Self {
        Self {
            pattern: None,
            cursor: PatternCursor::default(),
            flicker,
        }
    }

    /// Replace the current pattern and reset the cursor
    ///
    /// An invalid pattern is rejected and the previous one stays current.
    pub fn load(&mut self, pattern: AttackPattern, now_ms: u32) -> Result<(), PatternError> {
        pattern.validate()?;
        self.pattern = Some(pattern);
        self.cursor = PatternCursor::at(now_ms);
        Ok(())
    }

    /// Rewind to the first phase with a fresh cycle count
    pub fn restart(&mut self, now_ms: u32) {
        self.cursor = PatternCursor::at(now_ms);
    }

    pub fn pattern(&self) -> Option<&AttackPattern> {
        self.pattern.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn cursor(&self) -> PatternCursor {
        self.cursor
    }

    pub fn completed_cycles(&self) -> u32 {
        self.cursor.completed_cycles
    }

    /// Advance playback by one step
    ///
    /// A no-op unless `state` is cycling and `safety` is clear.
    pub fn tick<O: OutputDriver>(
        &mut self,
        now_ms: u32,
        state: SystemState,
        safety: SafetyStatus,
        out: &mut O,
        latch: &EmergencyLatch,
    ) -> TickOutcome {
        if !state.playback_allowed() || !safety.is_clear() {
            return TickOutcome::Gated;
        }
        let Some(pattern) = self.pattern.as_ref() else {
            return TickOutcome::Gated;
        };
        let Some(phase) = pattern.phase(self.cursor.index).copied() else {
            return TickOutcome::Gated;
        };

        let elapsed = now_ms.wrapping_sub(self.cursor.phase_start_ms);
        if elapsed < u32::from(phase.duration_ms) {
            return TickOutcome::Waiting;
        }

        if apply_group(out, phase.group, phase.intensity, &self.flicker, latch)
            == ApplyOutcome::Aborted
        {
            return TickOutcome::BurstAborted;
        }

        self.cursor.phase_start_ms = now_ms;
        self.cursor.index += 1;
        if self.cursor.index < pattern.len() {
            return TickOutcome::Advanced;
        }

        self.cursor.index = 0;
        self.cursor.completed_cycles = self.cursor.completed_cycles.saturating_add(1);
        let cycles = self.cursor.completed_cycles;
        let target = u32::from(pattern.repeat_count());
        if target != 0 && cycles == target {
            TickOutcome::TargetReached(cycles)
        } else {
            TickOutcome::CycleCompleted(cycles)
        }
    }
}
