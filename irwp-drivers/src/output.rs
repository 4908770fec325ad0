//! PWM output bank
//!
//! Four PWM channels share one power relay. Any channel write closes the
//! relay; `all_off` zeroes every duty cycle and then opens it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use irwp_core::traits::{Channel, OutputDriver, CHANNEL_COUNT};

/// Output bank driving one PWM channel per garment zone
pub struct PwmOutputBank<P, R, D> {
    channels: [P; CHANNEL_COUNT],
    relay: R,
    delay: D,
    levels: [u8; CHANNEL_COUNT],
    powered: bool,
}

impl<P, R, D> PwmOutputBank<P, R, D>
where
    P: SetDutyCycle,
    R: OutputPin,
    D: DelayNs,
{
    /// Create a bank with channels in [`Channel::ALL`] order; starts off
    pub fn new(channels: [P; CHANNEL_COUNT], relay: R, delay: D) -> Self {
        let mut bank = Self {
            channels,
            relay,
            delay,
            levels: [0; CHANNEL_COUNT],
            powered: true,
        };
        bank.all_off();
        bank
    }

    /// Last intensity written to each channel
    pub fn levels(&self) -> [u8; CHANNEL_COUNT] {
        self.levels
    }

    /// Whether the power relay is closed
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    fn power(&mut self, on: bool) {
        if self.powered == on {
            return;
        }
        let _ = if on {
            self.relay.set_high()
        } else {
            self.relay.set_low()
        };
        self.powered = on;
    }
}

impl<P, R, D> OutputDriver for PwmOutputBank<P, R, D>
where
    P: SetDutyCycle,
    R: OutputPin,
    D: DelayNs,
{
    fn set_channel(&mut self, channel: Channel, intensity: u8) {
        self.power(true);
        let index = channel.index();
        let _ = self.channels[index].set_duty_cycle_fraction(u16::from(intensity), 255);
        self.levels[index] = intensity;
    }

    fn all_off(&mut self) {
        for pwm in self.channels.iter_mut() {
            let _ = pwm.set_duty_cycle_fully_off();
        }
        self.levels = [0; CHANNEL_COUNT];
        self.power(false);
    }

    fn hold_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock PWM channel with an 8-bit timer
    #[derive(Default)]
    struct MockPwm {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    /// Mock relay pin
    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn bank() -> PwmOutputBank<MockPwm, MockPin, MockDelay> {
        PwmOutputBank::new(
            Default::default(),
            MockPin::default(),
            MockDelay::default(),
        )
    }

    #[test]
    fn test_starts_off() {
        let bank = bank();
        assert!(!bank.is_powered());
        assert!(!bank.relay.high);
        assert_eq!(bank.levels(), [0; CHANNEL_COUNT]);
    }

    #[test]
    fn test_write_scales_duty_and_powers_relay() {
        let mut bank = bank();
        bank.set_channel(Channel::Pants, 255);
        assert!(bank.relay.high);
        assert_eq!(bank.channels[2].duty, 1000);

        bank.set_channel(Channel::Hat, 51);
        assert_eq!(bank.channels[0].duty, 200);
        assert_eq!(bank.levels(), [51, 0, 255, 0]);
    }

    #[test]
    fn test_zero_intensity_keeps_relay_closed() {
        let mut bank = bank();
        bank.set_channel(Channel::Shoes, 0);
        assert!(bank.is_powered());
        assert_eq!(bank.channels[3].duty, 0);
    }

    #[test]
    fn test_all_off_opens_relay() {
        let mut bank = bank();
        bank.set_all(128);
        bank.all_off();
        assert!(!bank.relay.high);
        for pwm in &bank.channels {
            assert_eq!(pwm.duty, 0);
        }
        assert_eq!(bank.levels(), [0; CHANNEL_COUNT]);
    }

    #[test]
    fn test_relay_toggled_only_on_change() {
        let mut bank = bank();
        let writes = bank.relay.writes;
        bank.set_channel(Channel::Hat, 1);
        bank.set_channel(Channel::Hoodie, 2);
        assert_eq!(bank.relay.writes, writes + 1);
    }

    #[test]
    fn test_hold_uses_delay() {
        let mut bank = bank();
        bank.hold_us(500);
        assert_eq!(bank.delay.total_ns, 500_000);
    }
}
