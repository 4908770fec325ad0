//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! The emergency latch is not here: it is a plain atomic shared with the
//! interrupt-priority executor.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use irwp_protocol::{Command, Response};

/// Channel capacity for decoded host commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound replies
const RESPONSE_CHANNEL_SIZE: usize = 8;

/// Decoded commands from the serial RX task to the control loop
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Replies and reports from the control loop to the serial TX task
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, Response, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
