//! Device replies and reports.

use core::fmt::Write;

use heapless::String;

use crate::command::CommandKind;

/// Identity string returned for `IDENTIFY`
pub const IDENTITY: &str = "IRWP_STM32_v2.5";

/// Platform tag embedded in the status line
pub const PLATFORM: &str = "STM32";

/// Longest pattern name carried in a reply
pub const PATTERN_NAME_LEN: usize = 48;

/// Longest encoded reply, excluding the terminator
pub const MAX_RESPONSE_LEN: usize = 96;

/// An encoded reply line
pub type ResponseLine = String<MAX_RESPONSE_LEN>;

/// Errors that can occur while encoding a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Encoded reply does not fit in [`MAX_RESPONSE_LEN`]
    BufferTooSmall,
}

impl From<core::fmt::Error> for ResponseError {
    fn from(_: core::fmt::Error) -> Self {
        ResponseError::BufferTooSmall
    }
}

/// Snapshot reported by `GET_STATUS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    /// Numeric system state code
    pub state_code: u8,
    /// Interlock switch closed
    pub interlock_engaged: bool,
    /// Any state other than idle
    pub armed: bool,
    /// Completed pattern cycles since the last load or start
    pub cycle: u32,
}

/// Messages sent from the device to the host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Armed,
    Disarmed,
    CycleStarted,
    CycleStopped,
    PatternLoaded(String<PATTERN_NAME_LEN>),
    GroupSet,
    EmergencyStopped,
    Status(StatusRecord),
    Identity,
    /// A recognized command whose precondition did not hold
    Rejected(CommandKind),
    /// The running pattern wrapped; carries the completed cycle count
    CycleComplete(u32),
    /// The running pattern reached its repeat target
    PatternComplete(u32),
}

impl Response {
    /// Encode to a single line without terminator
    pub fn encode(&self) -> Result<ResponseLine, ResponseError> {
        let mut line = ResponseLine::new();
        self.write_to(&mut line)?;
        Ok(line)
    }

    /// Write the reply text into any formatter
    pub fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        match self {
            Response::Armed => out.write_str("ACK_ARMED"),
            Response::Disarmed => out.write_str("ACK_DISARMED"),
            Response::CycleStarted => out.write_str("CYCLE_STARTED"),
            Response::CycleStopped => out.write_str("CYCLE_STOPPED"),
            Response::PatternLoaded(name) => write!(out, "PATTERN_LOADED:{}", name),
            Response::GroupSet => out.write_str("GROUP_SET"),
            Response::EmergencyStopped => out.write_str("EMERGENCY_STOPPED"),
            Response::Status(status) => write!(
                out,
                "{{\"state\":{},\"safety\":{},\"armed\":{},\"cycle\":{},\"platform\":\"{}\"}}",
                status.state_code,
                u8::from(status.interlock_engaged),
                u8::from(status.armed),
                status.cycle,
                PLATFORM
            ),
            Response::Identity => out.write_str(IDENTITY),
            Response::Rejected(kind) => write!(out, "REJECTED:{}", kind.as_str()),
            Response::CycleComplete(n) => write!(out, "CYCLE_COMPLETE:{}", n),
            Response::PatternComplete(n) => write!(out, "PATTERN_COMPLETE:{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(response: Response) -> ResponseLine {
        response.encode().unwrap()
    }

    #[test]
    fn test_fixed_tokens() {
        assert_eq!(encoded(Response::Armed).as_str(), "ACK_ARMED");
        assert_eq!(encoded(Response::Disarmed).as_str(), "ACK_DISARMED");
        assert_eq!(encoded(Response::CycleStarted).as_str(), "CYCLE_STARTED");
        assert_eq!(encoded(Response::CycleStopped).as_str(), "CYCLE_STOPPED");
        assert_eq!(encoded(Response::GroupSet).as_str(), "GROUP_SET");
        assert_eq!(
            encoded(Response::EmergencyStopped).as_str(),
            "EMERGENCY_STOPPED"
        );
        assert_eq!(encoded(Response::Identity).as_str(), "IRWP_STM32_v2.5");
    }

    #[test]
    fn test_pattern_loaded() {
        let name = String::try_from("Sensor_Saturation_Blast").unwrap();
        assert_eq!(
            encoded(Response::PatternLoaded(name)).as_str(),
            "PATTERN_LOADED:Sensor_Saturation_Blast"
        );
    }

    #[test]
    fn test_status_line() {
        let status = StatusRecord {
            state_code: 2,
            interlock_engaged: true,
            armed: true,
            cycle: 17,
        };
        assert_eq!(
            encoded(Response::Status(status)).as_str(),
            r#"{"state":2,"safety":1,"armed":1,"cycle":17,"platform":"STM32"}"#
        );
    }

    #[test]
    fn test_widest_status_fits() {
        let status = StatusRecord {
            state_code: 99,
            interlock_engaged: true,
            armed: true,
            cycle: u32::MAX,
        };
        assert!(Response::Status(status).encode().is_ok());
    }

    #[test]
    fn test_longest_name_fits() {
        let mut name = String::<PATTERN_NAME_LEN>::new();
        for _ in 0..PATTERN_NAME_LEN {
            name.push('N').unwrap();
        }
        assert!(Response::PatternLoaded(name).encode().is_ok());
    }

    #[test]
    fn test_reports() {
        assert_eq!(
            encoded(Response::Rejected(CommandKind::StartCycle)).as_str(),
            "REJECTED:START_CYCLE"
        );
        assert_eq!(
            encoded(Response::CycleComplete(3)).as_str(),
            "CYCLE_COMPLETE:3"
        );
        assert_eq!(
            encoded(Response::PatternComplete(4)).as_str(),
            "PATTERN_COMPLETE:4"
        );
    }
}
