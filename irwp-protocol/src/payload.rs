//! Fixed-schema decoder for the `SET_GROUP` payload.
//!
//! Accepted shape, whitespace allowed around every token:
//! ```text
//! {"group":4,"intensity":255}
//! {intensity:10, group:0}
//! ```
//! Keys may be quoted or bare. Values are 1-3 decimal digits. `group` and
//! `intensity` must each appear exactly once; other keys are skipped. At
//! most [`MAX_PAIRS`] pairs are read.

use crate::command::{parse_decimal, ParseError};
use crate::group::ChannelGroup;

/// Maximum key/value pairs in one payload
pub const MAX_PAIRS: usize = 4;

const MAX_VALUE_DIGITS: usize = 3;

/// Decoded `SET_GROUP` arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupPayload {
    /// Channels to drive
    pub group: ChannelGroup,
    /// Intensity applied to every channel in the group
    pub intensity: u8,
}

impl GroupPayload {
    /// Decode a payload of the form `{"group":N,"intensity":N}`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let inner = text
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or(ParseError::MalformedPayload)?;

        if inner.trim().is_empty() {
            return Err(ParseError::MissingKey);
        }

        let mut group: Option<u16> = None;
        let mut intensity: Option<u16> = None;

        for (count, pair) in inner.split(',').enumerate() {
            if count >= MAX_PAIRS {
                return Err(ParseError::TooManyPairs);
            }

            let (key, value) = pair.split_once(':').ok_or(ParseError::MalformedPayload)?;
            let key = unquote(key.trim())?;
            let value = parse_decimal(value.trim(), MAX_VALUE_DIGITS)?;

            let slot = match key {
                "group" => &mut group,
                "intensity" => &mut intensity,
                _ => continue,
            };
            if slot.replace(value).is_some() {
                return Err(ParseError::DuplicateKey);
            }
        }

        let group = group.ok_or(ParseError::MissingKey)?;
        let intensity = intensity.ok_or(ParseError::MissingKey)?;

        let intensity = u8::try_from(intensity).map_err(|_| ParseError::InvalidNumber)?;
        let group = u8::try_from(group)
            .ok()
            .and_then(ChannelGroup::from_byte)
            .ok_or(ParseError::InvalidGroup)?;

        Ok(Self { group, intensity })
    }
}

/// Strip optional surrounding double quotes from a key
fn unquote(key: &str) -> Result<&str, ParseError> {
    let key = match (key.strip_prefix('"'), key.ends_with('"')) {
        (Some(rest), true) => rest.strip_suffix('"').ok_or(ParseError::MalformedPayload)?,
        (None, false) => key,
        _ => return Err(ParseError::MalformedPayload),
    };

    if key.is_empty() {
        return Err(ParseError::MalformedPayload);
    }
    Ok(key)
}
