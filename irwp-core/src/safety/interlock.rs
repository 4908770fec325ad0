//! Interlock switch sampling and the emergency latch

use portable_atomic::{AtomicBool, Ordering};

use crate::traits::InterlockSwitch;

/// Write-once emergency flag shared between interrupt and thread context
///
/// Lives in a `static` so the emergency handler needs nothing but a shared
/// reference. Only a reset clears it.
#[derive(Debug)]
pub struct EmergencyLatch {
    latched: AtomicBool,
}

impl Default for EmergencyLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EmergencyLatch {
    /// Create an unlatched flag
    pub const fn new() -> Self {
        Self {
            latched: AtomicBool::new(false),
        }
    }

    /// Latch the emergency. Safe to call from any context, any number of times.
    pub fn mark(&self) {
        self.latched.store(true, Ordering::Release);
    }

    /// Check whether the emergency has been latched
    pub fn is_latched(&self) -> bool {
        self.latched.load(Ordering::Acquire)
    }
}

/// One sample of the safety inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyStatus {
    /// Interlock circuit closed
    pub interlock_engaged: bool,
    /// Emergency latch set
    pub emergency_latched: bool,
}

impl SafetyStatus {
    /// Outputs may be driven autonomously
    pub fn is_clear(&self) -> bool {
        self.interlock_engaged && !self.emergency_latched
    }
}

/// Combines the interlock switch with the emergency latch
pub struct SafetyInterlock<'l, S> {
    switch: S,
    latch: &'l EmergencyLatch,
}

impl<'l, S: InterlockSwitch> SafetyInterlock<'l, S> {
    /// Create an interlock over a switch and a shared latch
    pub fn new(switch: S, latch: &'l EmergencyLatch) -> Self {
        Self { switch, latch }
    }

    /// Sample the switch and the latch
    ///
    /// The latch is read after the switch so a mark racing with the read is
    /// seen by this sample or the next one, never dropped.
    pub fn read(&mut self) -> SafetyStatus {
        let interlock_engaged = self.switch.is_closed();
        SafetyStatus {
            interlock_engaged,
            emergency_latched: self.latch.is_latched(),
        }
    }

    /// Latch the emergency from thread context
    pub fn mark_emergency(&self) {
        self.latch.mark();
    }

    /// The shared latch
    pub fn latch(&self) -> &'l EmergencyLatch {
        self.latch
    }
}
