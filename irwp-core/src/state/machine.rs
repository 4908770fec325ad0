//! State machine definition
//!
//! Pattern playback and manual outputs are a function of the current state,
//! an event, and the guard conditions at the moment the event arrives.

use super::events::{Event, TransitionGuard};

/// System states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    /// Powered, outputs off
    #[default]
    Idle,
    /// Interlock confirmed, ready to cycle
    Armed,
    /// Pattern playing
    Cycling,
    /// Stopped for good; only a reset leaves this state
    Emergency,
}

impl SystemState {
    /// Numeric code used on the status line
    pub fn code(&self) -> u8 {
        match self {
            SystemState::Idle => 0,
            SystemState::Armed => 1,
            SystemState::Cycling => 2,
            SystemState::Emergency => 99,
        }
    }

    /// Check if the pattern engine may advance in this state
    pub fn playback_allowed(&self) -> bool {
        matches!(self, SystemState::Cycling)
    }

    /// Check if the system has left idle
    pub fn is_armed(&self) -> bool {
        !matches!(self, SystemState::Idle)
    }

    /// Check if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, SystemState::Emergency)
    }

    /// Process an event and return the next state
    ///
    /// Returns `None` when the event is not accepted from this state or its
    /// guard does not hold; the caller keeps the current state.
    pub fn transition(self, event: Event, guard: TransitionGuard) -> Option<Self> {
        use SystemState::{Armed, Cycling, Idle};

        match (self, event) {
            // Emergency wins from anywhere, including itself
            (_, Event::Emergency) => Some(SystemState::Emergency),

            // Nothing else leaves the terminal state
            (SystemState::Emergency, _) => None,

            (Idle, Event::Arm) if guard.interlock_engaged => Some(Armed),

            (Idle | Armed | Cycling, Event::Disarm) => Some(Idle),

            (Armed, Event::StartCycle) if guard.pattern_loaded => Some(Cycling),

            (Cycling, Event::StopCycle) => Some(Armed),

            _ => None,
        }
    }
}
