//! Interlock switch input
//!
//! The interlock is wired between the pin and ground with the internal
//! pull-up enabled, so a closed circuit reads low.

use embedded_hal::digital::InputPin;
use irwp_core::traits::InterlockSwitch;

/// Switch that reads closed when its pin is low
pub struct ActiveLowSwitch<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> InterlockSwitch for ActiveLowSwitch<P> {
    fn is_closed(&mut self) -> bool {
        // A read error counts as open
        self.pin.is_low().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ReadFault;

    impl embedded_hal::digital::Error for ReadFault {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    /// Mock input pin
    struct MockPin {
        level: Result<bool, ReadFault>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = ReadFault;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.level
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.level.map(|high| !high)
        }
    }

    #[test]
    fn test_low_is_closed() {
        let mut switch = ActiveLowSwitch::new(MockPin { level: Ok(false) });
        assert!(switch.is_closed());
    }

    #[test]
    fn test_high_is_open() {
        let mut switch = ActiveLowSwitch::new(MockPin { level: Ok(true) });
        assert!(!switch.is_closed());
    }

    #[test]
    fn test_read_error_is_open() {
        let mut switch = ActiveLowSwitch::new(MockPin {
            level: Err(ReadFault),
        });
        assert!(!switch.is_closed());
    }
}
