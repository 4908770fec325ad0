//! Group application and the flicker burst
//!
//! The flicker group is not a steady level: it is a short alternating burst
//! run to completion inside one call. Frame `i` drives Hat and Pants when `i`
//! is odd and Hoodie and Shoes when `i` is even. The emergency latch is
//! checked before every frame.

use irwp_protocol::ChannelGroup;

use crate::config::FlickerConfig;
use crate::safety::EmergencyLatch;
use crate::traits::{Channel, OutputDriver, CHANNEL_COUNT};

/// Result of applying a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplyOutcome {
    /// Outputs set as requested
    Applied,
    /// Burst stopped early because the emergency latch was set; outputs off
    Aborted,
}

/// A fixed-count alternating burst at one intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlickerBurst {
    frames: u8,
    period_us: u32,
    intensity: u8,
}

impl FlickerBurst {
    pub fn new(config: &FlickerConfig, intensity: u8) -> Self {
        Self {
            frames: config.frames,
            period_us: u32::from(config.period_us),
            intensity,
        }
    }

    /// Channel levels for frame `i`
    pub fn frame(&self, i: u8) -> [u8; CHANNEL_COUNT] {
        let mut levels = [0u8; CHANNEL_COUNT];
        for (offset, level) in levels.iter_mut().enumerate() {
            let lit = (usize::from(i) + offset) % 2 == 1;
            *level = if lit { self.intensity } else { 0 };
        }
        levels
    }

    /// Run the burst to completion unless the latch is set
    ///
    /// The last frame stays applied after a completed burst.
    pub fn run<O: OutputDriver>(&self, out: &mut O, latch: &EmergencyLatch) -> ApplyOutcome {
        for i in 0..self.frames {
            if latch.is_latched() {
                out.all_off();
                return ApplyOutcome::Aborted;
            }
            let levels = self.frame(i);
            for channel in Channel::ALL {
                out.set_channel(channel, levels[channel.index()]);
            }
            out.hold_us(self.period_us);
        }
        ApplyOutcome::Applied
    }
}

/// Drive a channel group at one intensity
pub fn apply_group<O: OutputDriver>(
    out: &mut O,
    group: ChannelGroup,
    intensity: u8,
    flicker: &FlickerConfig,
    latch: &EmergencyLatch,
) -> ApplyOutcome {
    match group {
        ChannelGroup::All => out.set_all(intensity),
        ChannelGroup::Flicker => return FlickerBurst::new(flicker, intensity).run(out, latch),
        single => {
            if let Some(channel) = Channel::from_group(single) {
                out.set_channel(channel, intensity);
            }
        }
    }
    ApplyOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        levels: [u8; CHANNEL_COUNT],
        frames: usize,
        held_us: u32,
        offs: usize,
        trip_after: Option<(usize, &'static EmergencyLatch)>,
    }

    impl OutputDriver for Recorder {
        fn set_channel(&mut self, channel: Channel, intensity: u8) {
            self.levels[channel.index()] = intensity;
        }

        fn all_off(&mut self) {
            self.levels = [0; CHANNEL_COUNT];
            self.offs += 1;
        }

        fn hold_us(&mut self, us: u32) {
            self.frames += 1;
            self.held_us += us;
            if let Some((after, latch)) = self.trip_after {
                if self.frames == after {
                    latch.mark();
                }
            }
        }
    }

    #[test]
    fn test_frames_alternate_pairs() {
        let burst = FlickerBurst::new(&FlickerConfig::default(), 200);
        assert_eq!(burst.frame(0), [0, 200, 0, 200]);
        assert_eq!(burst.frame(1), [200, 0, 200, 0]);
        assert_eq!(burst.frame(2), [0, 200, 0, 200]);
    }

    #[test]
    fn test_full_burst() {
        let latch = EmergencyLatch::new();
        let mut out = Recorder::default();
        let burst = FlickerBurst::new(&FlickerConfig::default(), 200);

        assert_eq!(burst.run(&mut out, &latch), ApplyOutcome::Applied);
        assert_eq!(out.frames, 50);
        assert_eq!(out.held_us, 50 * 500);
        // Frame 49 is odd: Hat and Pants lit
        assert_eq!(out.levels, [200, 0, 200, 0]);
    }

    #[test]
    fn test_burst_aborts_on_latch() {
        static LATCH: EmergencyLatch = EmergencyLatch::new();
        let mut out = Recorder {
            trip_after: Some((3, &LATCH)),
            ..Default::default()
        };
        let burst = FlickerBurst::new(&FlickerConfig::default(), 200);

        assert_eq!(burst.run(&mut out, &LATCH), ApplyOutcome::Aborted);
        assert_eq!(out.frames, 3);
        assert_eq!(out.offs, 1);
        assert_eq!(out.levels, [0; CHANNEL_COUNT]);
    }

    #[test]
    fn test_apply_single_and_all() {
        let latch = EmergencyLatch::new();
        let config = FlickerConfig::default();
        let mut out = Recorder::default();

        apply_group(&mut out, ChannelGroup::Pants, 40, &config, &latch);
        assert_eq!(out.levels, [0, 0, 40, 0]);

        apply_group(&mut out, ChannelGroup::All, 7, &config, &latch);
        assert_eq!(out.levels, [7; CHANNEL_COUNT]);
        assert_eq!(out.frames, 0);
    }

    #[test]
    fn test_apply_flicker_runs_burst() {
        let latch = EmergencyLatch::new();
        let config = FlickerConfig {
            frames: 4,
            period_us: 100,
        };
        let mut out = Recorder::default();

        let outcome = apply_group(&mut out, ChannelGroup::Flicker, 9, &config, &latch);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(out.frames, 4);
        assert_eq!(out.held_us, 400);
    }
}
