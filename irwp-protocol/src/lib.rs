//! IRWP Serial Command Protocol
//!
//! This crate defines the text protocol spoken between a host (flasher tool
//! or terminal) and the wearable sequencer over a 115200 baud UART.
//!
//! # Protocol Overview
//!
//! Every message is one ASCII line terminated by `\n` (a preceding `\r` is
//! ignored):
//! ```text
//! host  -> ARM
//! host  -> LOAD_PATTERN:0
//! host  -> SET_GROUP:{"group":4,"intensity":255}
//! device <- ACK_ARMED
//! device <- PATTERN_LOADED:AGC_Lock_5_Second
//! device <- {"state":1,"safety":1,"armed":1,"cycle":0,"platform":"STM32"}
//! ```
//!
//! Decoding never allocates and never reads past [`MAX_LINE_LEN`] bytes.
//! Lines that fail to decode are dropped by the device without a reply.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod group;
pub mod line;
pub mod payload;
pub mod response;

pub use command::{Command, CommandKind, ParseError};
pub use group::{ChannelGroup, GROUP_COUNT};
pub use line::{Line, LineAssembler, LineError, MAX_LINE_LEN};
pub use payload::GroupPayload;
pub use response::{
    Response, ResponseError, ResponseLine, StatusRecord, IDENTITY, MAX_RESPONSE_LEN,
    PATTERN_NAME_LEN, PLATFORM,
};
