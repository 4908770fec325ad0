//! Built-in pattern catalog
//!
//! Patterns are addressed by index from `LOAD_PATTERN:<index>`.

use irwp_protocol::ChannelGroup;

use super::phase::{AttackPattern, AttackPhase, PatternError};

/// A pattern stored in flash as plain constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub phases: &'static [AttackPhase],
    pub repeat_count: u8,
}

impl CatalogEntry {
    /// Copy into an owned, loadable pattern
    pub fn to_pattern(&self) -> Result<AttackPattern, PatternError> {
        AttackPattern::new(self.name, self.phases, self.repeat_count)
    }
}

const ALL_ON: AttackPhase = AttackPhase::new(ChannelGroup::All, 50, 255);
const ALL_OFF: AttackPhase = AttackPhase::new(ChannelGroup::All, 50, 0);

/// Four 50 ms strobes, then a 5 s hold at full intensity
const AGC_LOCK: [AttackPhase; 9] = [
    ALL_ON,
    ALL_OFF,
    ALL_ON,
    ALL_OFF,
    ALL_ON,
    ALL_OFF,
    ALL_ON,
    ALL_OFF,
    AttackPhase::new(ChannelGroup::All, 5000, 255),
];

const SATURATION_BLAST: [AttackPhase; 1] = [AttackPhase::new(ChannelGroup::All, 5000, 255)];

const ROLLING_SHUTTER: [AttackPhase; 1] = [AttackPhase::new(ChannelGroup::Flicker, 100, 200)];

/// The closed set of loadable patterns
pub static CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        name: "AGC_Lock_5_Second",
        phases: &AGC_LOCK,
        repeat_count: 1,
    },
    CatalogEntry {
        name: "Sensor_Saturation_Blast",
        phases: &SATURATION_BLAST,
        repeat_count: 1,
    },
    CatalogEntry {
        name: "Rolling_Shutter_Flicker",
        phases: &ROLLING_SHUTTER,
        repeat_count: 3,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_is_loadable() {
        for entry in CATALOG.iter() {
            let pattern = entry.to_pattern().unwrap();
            assert_eq!(pattern.validate(), Ok(()), "{}", entry.name);
            assert_eq!(pattern.name().as_str(), entry.name);
        }
    }

    #[test]
    fn test_agc_lock_shape() {
        let pattern = CATALOG[0].to_pattern().unwrap();
        assert_eq!(pattern.len(), 9);
        assert_eq!(pattern.cycle_duration_ms(), 8 * 50 + 5000);
        assert_eq!(pattern.phase(8).unwrap().duration_ms, 5000);
    }

    #[test]
    fn test_flicker_entry() {
        let pattern = CATALOG[2].to_pattern().unwrap();
        assert!(pattern.phase(0).unwrap().group.is_flicker());
        assert_eq!(pattern.repeat_count(), 3);
    }
}
