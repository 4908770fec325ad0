//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod output;
pub mod storage;
pub mod switch;

pub use output::{Channel, OutputDriver, CHANNEL_COUNT};
pub use storage::{NvStore, StorageError};
pub use switch::InterlockSwitch;
