//! Persisted state loading
//!
//! The 512-byte persisted image lives at the start of the last 1 KiB flash
//! page. It is read once at boot; an empty or invalid slot falls back to
//! nothing loaded.

use defmt::*;
use embassy_stm32::flash::{Blocking, Flash};

use irwp_core::persist::{self, PersistError, PersistedState, NV_IMAGE_SIZE};
use irwp_core::traits::{NvStore, StorageError};

/// Offset of the persisted image from the flash base (last page of 64 KiB)
pub const IMAGE_OFFSET: u32 = 0xFC00;

/// Read-only view of the persisted image in internal flash
pub struct FlashStore<'d> {
    flash: Flash<'d, Blocking>,
}

impl<'d> FlashStore<'d> {
    pub fn new(flash: Flash<'d, Blocking>) -> Self {
        Self { flash }
    }
}

impl NvStore for FlashStore<'_> {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StorageError> {
        if offset as usize + buf.len() > NV_IMAGE_SIZE {
            return Err(StorageError::OutOfBounds);
        }
        self.flash
            .blocking_read(IMAGE_OFFSET + offset, buf)
            .map_err(|e| {
                warn!("Flash read failed: {:?}", e);
                StorageError::Read
            })
    }
}

/// Load both slots, logging why a slot was skipped
pub fn load_persisted<S: NvStore>(store: &mut S) -> PersistedState {
    info!("Loading persisted state from flash...");

    let target = match persist::read_target(store) {
        Ok(target) => {
            info!(
                "Target: {} ({} camera models, alpr={}, analytics={}, wireless={})",
                target.name.as_str(),
                target.camera_models.len(),
                target.has_alpr,
                target.has_analytics,
                target.is_wireless
            );
            Some(target)
        }
        Err(PersistError::Empty) => {
            debug!("No target profile stored");
            None
        }
        Err(e) => {
            warn!("Ignoring stored target profile: {:?}", e);
            None
        }
    };

    let pattern = match persist::read_pattern(store) {
        Ok(pattern) => {
            info!(
                "Stored pattern: {} ({} phases, repeat {})",
                pattern.name().as_str(),
                pattern.len(),
                pattern.repeat_count()
            );
            Some(pattern)
        }
        Err(PersistError::Empty) => {
            debug!("No pattern stored");
            None
        }
        Err(e) => {
            warn!("Ignoring stored pattern: {:?}", e);
            None
        }
    };

    PersistedState { target, pattern }
}
