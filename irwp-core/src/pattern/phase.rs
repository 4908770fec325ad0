//! Phase and pattern types

use heapless::{String, Vec};
use irwp_protocol::{ChannelGroup, PATTERN_NAME_LEN};

/// Maximum phases in one pattern
pub const MAX_PHASES: usize = 20;

/// Reasons a pattern cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// Pattern has no phases
    NoPhases,
    /// More than [`MAX_PHASES`] phases
    TooManyPhases,
    /// Phase at this index has a zero duration
    ZeroDuration(usize),
    /// Phase at this index names an unknown channel group
    InvalidGroup(usize),
    /// Name longer than the protocol can carry
    NameTooLong,
}

/// One step of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttackPhase {
    /// Channels driven by this phase
    pub group: ChannelGroup,
    /// How long the phase lasts (ms)
    pub duration_ms: u16,
    /// Intensity applied to the group
    pub intensity: u8,
}

impl AttackPhase {
    pub const fn new(group: ChannelGroup, duration_ms: u16, intensity: u8) -> Self {
        Self {
            group,
            duration_ms,
            intensity,
        }
    }

    /// Build a phase from its raw wire selector
    pub fn from_raw(
        index: usize,
        group: u8,
        duration_ms: u16,
        intensity: u8,
    ) -> Result<Self, PatternError> {
        let group = ChannelGroup::from_byte(group).ok_or(PatternError::InvalidGroup(index))?;
        Ok(Self::new(group, duration_ms, intensity))
    }
}

/// A named phase sequence
///
/// Construction only checks capacity. [`AttackPattern::validate`] decides
/// whether the engine will accept it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttackPattern {
    name: String<PATTERN_NAME_LEN>,
    phases: Vec<AttackPhase, MAX_PHASES>,
    repeat_count: u8,
}

impl AttackPattern {
    pub fn new(name: &str, phases: &[AttackPhase], repeat_count: u8) -> Result<Self, PatternError> {
        let mut stored_name = String::new();
        stored_name
            .push_str(name)
            .map_err(|_| PatternError::NameTooLong)?;

        let phases = Vec::from_slice(phases).map_err(|_| PatternError::TooManyPhases)?;

        Ok(Self {
            name: stored_name,
            phases,
            repeat_count,
        })
    }

    /// Check the pattern can be played
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.phases.is_empty() {
            return Err(PatternError::NoPhases);
        }
        match self.phases.iter().position(|p| p.duration_ms == 0) {
            Some(index) => Err(PatternError::ZeroDuration(index)),
            None => Ok(()),
        }
    }

    pub fn name(&self) -> &String<PATTERN_NAME_LEN> {
        &self.name
    }

    pub fn phases(&self) -> &[AttackPhase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&AttackPhase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Cycle target; 0 means none
    pub fn repeat_count(&self) -> u8 {
        self.repeat_count
    }

    /// Sum of all phase durations (ms)
    pub fn cycle_duration_ms(&self) -> u32 {
        self.phases.iter().map(|p| u32::from(p.duration_ms)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: AttackPhase = AttackPhase::new(ChannelGroup::All, 50, 255);
    const OFF: AttackPhase = AttackPhase::new(ChannelGroup::All, 50, 0);

    #[test]
    fn test_valid_pattern() {
        let pattern = AttackPattern::new("blink", &[ON, OFF], 2).unwrap();
        assert_eq!(pattern.validate(), Ok(()));
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.name().as_str(), "blink");
        assert_eq!(pattern.repeat_count(), 2);
        assert_eq!(pattern.cycle_duration_ms(), 100);
    }

    #[test]
    fn test_empty_pattern_invalid() {
        let pattern = AttackPattern::new("none", &[], 1).unwrap();
        assert_eq!(pattern.validate(), Err(PatternError::NoPhases));
    }

    #[test]
    fn test_zero_duration_reports_index() {
        let zero = AttackPhase::new(ChannelGroup::Hat, 0, 10);
        let pattern = AttackPattern::new("bad", &[ON, OFF, zero], 1).unwrap();
        assert_eq!(pattern.validate(), Err(PatternError::ZeroDuration(2)));
    }

    #[test]
    fn test_capacity_limits() {
        let phases = [ON; MAX_PHASES + 1];
        assert_eq!(
            AttackPattern::new("long", &phases, 1),
            Err(PatternError::TooManyPhases)
        );

        let name = [b'n'; PATTERN_NAME_LEN + 1];
        let name = core::str::from_utf8(&name).unwrap();
        assert_eq!(
            AttackPattern::new(name, &[ON], 1),
            Err(PatternError::NameTooLong)
        );
    }

    #[test]
    fn test_from_raw_group() {
        assert_eq!(
            AttackPhase::from_raw(0, 3, 10, 1),
            Ok(AttackPhase::new(ChannelGroup::Shoes, 10, 1))
        );
        assert_eq!(
            AttackPhase::from_raw(4, 9, 10, 1),
            Err(PatternError::InvalidGroup(4))
        );
    }
}
