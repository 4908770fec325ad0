//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels. The
//! emergency task runs on the interrupt-priority executor.

pub mod control;
pub mod emergency;
pub mod serial_rx;
pub mod serial_tx;

pub use control::control_task;
pub use emergency::emergency_task;
pub use serial_rx::serial_rx_task;
pub use serial_tx::serial_tx_task;
