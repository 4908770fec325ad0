//! Output channel trait

use irwp_protocol::ChannelGroup;

/// Number of physical output channels
pub const CHANNEL_COUNT: usize = 4;

/// A single physical output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Hat,
    Hoodie,
    Pants,
    Shoes,
}

impl Channel {
    /// All channels in index order
    pub const ALL: [Channel; CHANNEL_COUNT] =
        [Channel::Hat, Channel::Hoodie, Channel::Pants, Channel::Shoes];

    /// Position of this channel in [`Channel::ALL`]
    pub fn index(self) -> usize {
        match self {
            Channel::Hat => 0,
            Channel::Hoodie => 1,
            Channel::Pants => 2,
            Channel::Shoes => 3,
        }
    }

    /// The channel a single-channel group selects
    ///
    /// Returns `None` for `All` and `Flicker`.
    pub fn from_group(group: ChannelGroup) -> Option<Self> {
        match group {
            ChannelGroup::Hat => Some(Channel::Hat),
            ChannelGroup::Hoodie => Some(Channel::Hoodie),
            ChannelGroup::Pants => Some(Channel::Pants),
            ChannelGroup::Shoes => Some(Channel::Shoes),
            ChannelGroup::All | ChannelGroup::Flicker => None,
        }
    }
}

/// Trait for the intensity-controlled output bank
///
/// Implementations drive PWM channels and whatever power switching the board
/// needs. All methods are infallible; drivers swallow bus errors.
pub trait OutputDriver {
    /// Set one channel's intensity (0 = off, 255 = full)
    fn set_channel(&mut self, channel: Channel, intensity: u8);

    /// Force every channel off and cut output power
    fn all_off(&mut self);

    /// Busy-wait for a bounded number of microseconds
    ///
    /// Used only inside the flicker burst.
    fn hold_us(&mut self, us: u32);

    /// Set every channel to the same intensity
    fn set_all(&mut self, intensity: u8) {
        for channel in Channel::ALL {
            self.set_channel(channel, intensity);
        }
    }
}
