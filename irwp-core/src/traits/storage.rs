//! Non-volatile storage trait

/// Errors that can occur reading non-volatile storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying read failed
    Read,
    /// Requested range is outside the persisted image
    OutOfBounds,
}

/// Read-only view of the persisted image
///
/// Offsets are relative to the start of the image, not the flash base.
pub trait NvStore {
    /// Fill `buf` with bytes starting at `offset`
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StorageError>;
}
