//! Host commands.
//!
//! One command per line. Commands without arguments must match exactly;
//! `LOAD_PATTERN` and `SET_GROUP` take their argument after a `:`.

use crate::payload::GroupPayload;

const CMD_ARM: &str = "ARM";
const CMD_DISARM: &str = "DISARM";
const CMD_START_CYCLE: &str = "START_CYCLE";
const CMD_STOP_CYCLE: &str = "STOP_CYCLE";
const CMD_LOAD_PATTERN: &str = "LOAD_PATTERN";
const CMD_SET_GROUP: &str = "SET_GROUP";
const CMD_EMERGENCY: &str = "EMERGENCY";
const CMD_GET_STATUS: &str = "GET_STATUS";
const CMD_IDENTIFY: &str = "IDENTIFY";
const CMD_ALL_OFF: &str = "ALL_OFF";

const MAX_INDEX_DIGITS: usize = 3;

/// Errors that can occur while decoding a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line was blank after trimming
    Empty,
    /// Command name not recognized
    UnknownCommand,
    /// Command requires an argument after `:`
    MissingArgument,
    /// Numeric field was not 1-3 decimal digits or out of range
    InvalidNumber,
    /// Payload did not match the expected shape
    MalformedPayload,
    /// Required payload key absent
    MissingKey,
    /// Payload key given more than once
    DuplicateKey,
    /// Payload has more pairs than the decoder reads
    TooManyPairs,
    /// Group selector outside the known groups
    InvalidGroup,
}

/// Commands sent from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Idle -> Armed (requires interlock engaged)
    Arm,
    /// Back to Idle, outputs off
    Disarm,
    /// Armed -> Cycling (requires a loaded pattern)
    StartCycle,
    /// Cycling -> Armed, outputs off
    StopCycle,
    /// Load a catalog pattern by index
    LoadPattern(u16),
    /// Drive a channel group directly
    SetGroup(GroupPayload),
    /// Force the emergency state
    Emergency,
    /// Request the status line
    GetStatus,
    /// Request the identity string
    Identify,
    /// Turn every output off without changing state
    AllOff,
}

/// Command names, used for rejection replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    Arm,
    Disarm,
    StartCycle,
    StopCycle,
    LoadPattern,
    SetGroup,
    Emergency,
    GetStatus,
    Identify,
    AllOff,
}

impl CommandKind {
    /// Wire name of the command
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Arm => CMD_ARM,
            CommandKind::Disarm => CMD_DISARM,
            CommandKind::StartCycle => CMD_START_CYCLE,
            CommandKind::StopCycle => CMD_STOP_CYCLE,
            CommandKind::LoadPattern => CMD_LOAD_PATTERN,
            CommandKind::SetGroup => CMD_SET_GROUP,
            CommandKind::Emergency => CMD_EMERGENCY,
            CommandKind::GetStatus => CMD_GET_STATUS,
            CommandKind::Identify => CMD_IDENTIFY,
            CommandKind::AllOff => CMD_ALL_OFF,
        }
    }
}

impl Command {
    /// Decode one line (terminator already stripped)
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (name, argument) = match line.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (line, None),
        };

        match (name, argument) {
            (CMD_ARM, None) => Ok(Command::Arm),
            (CMD_DISARM, None) => Ok(Command::Disarm),
            (CMD_START_CYCLE, None) => Ok(Command::StartCycle),
            (CMD_STOP_CYCLE, None) => Ok(Command::StopCycle),
            (CMD_EMERGENCY, None) => Ok(Command::Emergency),
            (CMD_GET_STATUS, None) => Ok(Command::GetStatus),
            (CMD_IDENTIFY, None) => Ok(Command::Identify),
            (CMD_ALL_OFF, None) => Ok(Command::AllOff),
            (CMD_LOAD_PATTERN, Some(arg)) => {
                parse_decimal(arg.trim(), MAX_INDEX_DIGITS).map(Command::LoadPattern)
            }
            (CMD_SET_GROUP, Some(arg)) => GroupPayload::parse(arg).map(Command::SetGroup),
            (CMD_LOAD_PATTERN | CMD_SET_GROUP, None) => Err(ParseError::MissingArgument),
            _ => Err(ParseError::UnknownCommand),
        }
    }

    /// The command's name without arguments
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Arm => CommandKind::Arm,
            Command::Disarm => CommandKind::Disarm,
            Command::StartCycle => CommandKind::StartCycle,
            Command::StopCycle => CommandKind::StopCycle,
            Command::LoadPattern(_) => CommandKind::LoadPattern,
            Command::SetGroup(_) => CommandKind::SetGroup,
            Command::Emergency => CommandKind::Emergency,
            Command::GetStatus => CommandKind::GetStatus,
            Command::Identify => CommandKind::Identify,
            Command::AllOff => CommandKind::AllOff,
        }
    }
}

/// Parse 1..=`max_digits` ASCII decimal digits
pub(crate) fn parse_decimal(text: &str, max_digits: usize) -> Result<u16, ParseError> {
    if text.is_empty() || text.len() > max_digits {
        return Err(ParseError::InvalidNumber);
    }

    text.bytes().try_fold(0u16, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u16::from(b - b'0'))
        } else {
            Err(ParseError::InvalidNumber)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ChannelGroup;

    #[test]
    fn test_plain_commands() {
        let cases = [
            ("ARM", Command::Arm),
            ("DISARM", Command::Disarm),
            ("START_CYCLE", Command::StartCycle),
            ("STOP_CYCLE", Command::StopCycle),
            ("EMERGENCY", Command::Emergency),
            ("GET_STATUS", Command::GetStatus),
            ("IDENTIFY", Command::Identify),
            ("ALL_OFF", Command::AllOff),
        ];
        for (text, expected) in cases {
            assert_eq!(Command::parse(text), Ok(expected));
        }
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(Command::parse("  ARM \t"), Ok(Command::Arm));
    }

    #[test]
    fn test_load_pattern() {
        assert_eq!(Command::parse("LOAD_PATTERN:2"), Ok(Command::LoadPattern(2)));
        assert_eq!(Command::parse("LOAD_PATTERN:99"), Ok(Command::LoadPattern(99)));
        assert_eq!(
            Command::parse("LOAD_PATTERN:"),
            Err(ParseError::InvalidNumber)
        );
        assert_eq!(
            Command::parse("LOAD_PATTERN:1000"),
            Err(ParseError::InvalidNumber)
        );
        assert_eq!(
            Command::parse("LOAD_PATTERN:x"),
            Err(ParseError::InvalidNumber)
        );
        assert_eq!(
            Command::parse("LOAD_PATTERN"),
            Err(ParseError::MissingArgument)
        );
    }

    #[test]
    fn test_set_group() {
        let cmd = Command::parse(r#"SET_GROUP:{"group":3,"intensity":128}"#).unwrap();
        assert_eq!(
            cmd,
            Command::SetGroup(GroupPayload {
                group: ChannelGroup::Shoes,
                intensity: 128,
            })
        );
        assert_eq!(cmd.kind(), CommandKind::SetGroup);
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(Command::parse(""), Err(ParseError::Empty));
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(Command::parse("arm"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse("ARM:1"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse("FIRE"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(CommandKind::StartCycle.as_str(), "START_CYCLE");
        assert_eq!(Command::LoadPattern(1).kind().as_str(), "LOAD_PATTERN");
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_never_panics(text in "\\PC{0,160}") {
                let _ = Command::parse(&text);
            }

            #[test]
            fn set_group_accepts_every_valid_pair(group in 0u8..6, intensity in any::<u8>()) {
                let mut line = heapless::String::<64>::new();
                core::fmt::write(
                    &mut line,
                    format_args!("SET_GROUP:{{\"group\":{},\"intensity\":{}}}", group, intensity),
                ).unwrap();
                let cmd = Command::parse(&line).unwrap();
                match cmd {
                    Command::SetGroup(p) => {
                        prop_assert_eq!(p.group.to_byte(), group);
                        prop_assert_eq!(p.intensity, intensity);
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }
    }
}
