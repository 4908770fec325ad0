//! Channel group selectors as they appear on the wire

/// Number of valid group selectors (0..=5)
pub const GROUP_COUNT: u8 = 6;

/// A set of output channels addressed by a single selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelGroup {
    /// Hat channel only
    Hat,
    /// Hoodie channel only
    Hoodie,
    /// Pants channel only
    Pants,
    /// Shoes channel only
    Shoes,
    /// Every channel at once
    All,
    /// Alternating burst across all channels
    Flicker,
}

// Wire format values
const GROUP_HAT: u8 = 0;
const GROUP_HOODIE: u8 = 1;
const GROUP_PANTS: u8 = 2;
const GROUP_SHOES: u8 = 3;
const GROUP_ALL: u8 = 4;
const GROUP_FLICKER: u8 = 5;

impl ChannelGroup {
    /// Parse a group from its wire selector
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            GROUP_HAT => Some(ChannelGroup::Hat),
            GROUP_HOODIE => Some(ChannelGroup::Hoodie),
            GROUP_PANTS => Some(ChannelGroup::Pants),
            GROUP_SHOES => Some(ChannelGroup::Shoes),
            GROUP_ALL => Some(ChannelGroup::All),
            GROUP_FLICKER => Some(ChannelGroup::Flicker),
            _ => None,
        }
    }

    /// Convert to wire selector
    pub fn to_byte(self) -> u8 {
        match self {
            ChannelGroup::Hat => GROUP_HAT,
            ChannelGroup::Hoodie => GROUP_HOODIE,
            ChannelGroup::Pants => GROUP_PANTS,
            ChannelGroup::Shoes => GROUP_SHOES,
            ChannelGroup::All => GROUP_ALL,
            ChannelGroup::Flicker => GROUP_FLICKER,
        }
    }

    /// Returns true if this selects exactly one channel
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            ChannelGroup::Hat | ChannelGroup::Hoodie | ChannelGroup::Pants | ChannelGroup::Shoes
        )
    }

    /// Returns true if this is the flicker burst selector
    pub fn is_flicker(&self) -> bool {
        matches!(self, ChannelGroup::Flicker)
    }
}
