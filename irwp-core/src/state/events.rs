//! Events that trigger state transitions

use irwp_protocol::Command;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Host asked to arm
    Arm,
    /// Host asked to disarm
    Disarm,
    /// Host asked to start cycling the loaded pattern
    StartCycle,
    /// Host asked to stop cycling
    StopCycle,
    /// Emergency command received or the latch was observed
    Emergency,
}

impl Event {
    /// Map a host command onto a state event, if it is one
    pub fn from_command(command: &Command) -> Option<Self> {
        match command {
            Command::Arm => Some(Event::Arm),
            Command::Disarm => Some(Event::Disarm),
            Command::StartCycle => Some(Event::StartCycle),
            Command::StopCycle => Some(Event::StopCycle),
            Command::Emergency => Some(Event::Emergency),
            _ => None,
        }
    }

    /// Returns true if taking this event must force outputs off
    pub fn forces_outputs_off(&self) -> bool {
        matches!(self, Event::Disarm | Event::StopCycle | Event::Emergency)
    }
}

/// Conditions sampled just before a transition is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionGuard {
    /// Interlock switch closed
    pub interlock_engaged: bool,
    /// A valid pattern is loaded
    pub pattern_loaded: bool,
}
