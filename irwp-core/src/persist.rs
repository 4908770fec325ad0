//! Persisted record decoding
//!
//! The persisted image is a fixed 512-byte block read once at startup.
//! It holds two slots at fixed offsets:
//!
//! ```text
//! 0x000  target slot   (128 bytes)  version byte + postcard(TargetProfile)
//! 0x080  pattern slot  (384 bytes)  version byte + postcard(PatternRecord)
//! ```
//!
//! A slot whose first byte is `0xFF` has never been written. The core only
//! reads; [`encode_image`] exists for provisioning tools and tests.

use heapless::{String, Vec};
use irwp_protocol::PATTERN_NAME_LEN;
use serde::{Deserialize, Serialize};

use crate::pattern::{AttackPattern, AttackPhase, PatternError, MAX_PHASES};
use crate::traits::{NvStore, StorageError};

/// Total persisted image size
pub const NV_IMAGE_SIZE: usize = 512;

/// Layout version written as the first byte of each slot
pub const SLOT_VERSION: u8 = 1;

/// Erased-flash marker
const ERASED: u8 = 0xFF;

/// Maximum target name length
pub const TARGET_NAME_LEN: usize = 32;

/// Maximum camera model ids per target
pub const MAX_CAMERA_MODELS: usize = 15;

/// A fixed region of the persisted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub offset: u32,
    pub len: usize,
}

/// Target profile slot
pub const TARGET_SLOT: Slot = Slot {
    offset: 0,
    len: 128,
};

/// Persisted pattern slot
pub const PATTERN_SLOT: Slot = Slot {
    offset: 128,
    len: 384,
};

/// Largest slot, sizes the read buffer
const MAX_SLOT_LEN: usize = 384;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Storage read failed
    Storage(StorageError),
    /// Slot has never been written
    Empty,
    /// Slot written with an unknown layout version
    VersionMismatch,
    /// Slot body did not decode
    Deserialize,
    /// Value does not fit in its slot
    Serialize,
    /// Decoded pattern cannot be played
    InvalidPattern(PatternError),
}

impl From<StorageError> for PersistError {
    fn from(e: StorageError) -> Self {
        PersistError::Storage(e)
    }
}

impl From<PatternError> for PersistError {
    fn from(e: PatternError) -> Self {
        PersistError::InvalidPattern(e)
    }
}

/// Description of the equipment the active pattern was chosen for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetProfile {
    pub name: String<TARGET_NAME_LEN>,
    /// Camera model identifiers
    pub camera_models: Vec<u8, MAX_CAMERA_MODELS>,
    /// Licence-plate recognition present
    pub has_alpr: bool,
    pub has_analytics: bool,
    pub is_wireless: bool,
}

/// On-flash form of a phase: the group is a raw selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PhaseRecord {
    group: u8,
    duration_ms: u16,
    intensity: u8,
}

/// On-flash form of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PatternRecord {
    name: String<PATTERN_NAME_LEN>,
    phases: Vec<PhaseRecord, MAX_PHASES>,
    repeat_count: u8,
}

impl PatternRecord {
    fn from_pattern(pattern: &AttackPattern) -> Self {
        let phases = pattern
            .phases()
            .iter()
            .map(|p| PhaseRecord {
                group: p.group.to_byte(),
                duration_ms: p.duration_ms,
                intensity: p.intensity,
            })
            .collect();

        Self {
            name: pattern.name().clone(),
            phases,
            repeat_count: pattern.repeat_count(),
        }
    }

    fn into_pattern(self) -> Result<AttackPattern, PatternError> {
        let mut phases: Vec<AttackPhase, MAX_PHASES> = Vec::new();
        for (index, raw) in self.phases.iter().enumerate() {
            let phase = AttackPhase::from_raw(index, raw.group, raw.duration_ms, raw.intensity)?;
            // Same capacity on both sides
            let _ = phases.push(phase);
        }

        let pattern = AttackPattern::new(&self.name, &phases, self.repeat_count)?;
        pattern.validate()?;
        Ok(pattern)
    }
}

/// Everything read from the persisted image at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub target: Option<TargetProfile>,
    pub pattern: Option<AttackPattern>,
}

/// Read and decode the target profile slot
pub fn read_target<S: NvStore>(store: &mut S) -> Result<TargetProfile, PersistError> {
    let mut buffer = [0u8; MAX_SLOT_LEN];
    let body = read_slot(store, TARGET_SLOT, &mut buffer)?;
    postcard::from_bytes(body).map_err(|_| PersistError::Deserialize)
}

/// Read, decode, and validate the persisted pattern slot
pub fn read_pattern<S: NvStore>(store: &mut S) -> Result<AttackPattern, PersistError> {
    let mut buffer = [0u8; MAX_SLOT_LEN];
    let body = read_slot(store, PATTERN_SLOT, &mut buffer)?;
    let record: PatternRecord = postcard::from_bytes(body).map_err(|_| PersistError::Deserialize)?;
    Ok(record.into_pattern()?)
}

/// Read a slot and return its body after the version byte
fn read_slot<'b, S: NvStore>(
    store: &mut S,
    slot: Slot,
    buffer: &'b mut [u8; MAX_SLOT_LEN],
) -> Result<&'b [u8], PersistError> {
    let raw = &mut buffer[..slot.len];
    store.read(slot.offset, raw)?;

    match raw[0] {
        ERASED => Err(PersistError::Empty),
        SLOT_VERSION => Ok(&raw[1..]),
        _ => Err(PersistError::VersionMismatch),
    }
}

/// Build a complete image; unused slots are left erased
pub fn encode_image(
    target: Option<&TargetProfile>,
    pattern: Option<&AttackPattern>,
) -> Result<[u8; NV_IMAGE_SIZE], PersistError> {
    let mut image = [ERASED; NV_IMAGE_SIZE];

    if let Some(target) = target {
        write_slot(&mut image, TARGET_SLOT, target)?;
    }
    if let Some(pattern) = pattern {
        write_slot(&mut image, PATTERN_SLOT, &PatternRecord::from_pattern(pattern))?;
    }

    Ok(image)
}

fn write_slot<T: Serialize>(
    image: &mut [u8; NV_IMAGE_SIZE],
    slot: Slot,
    value: &T,
) -> Result<(), PersistError> {
    let start = slot.offset as usize;
    let region = &mut image[start..start + slot.len];
    region[0] = SLOT_VERSION;
    postcard::to_slice(value, &mut region[1..]).map_err(|_| PersistError::Serialize)?;
    Ok(())
}
