//! Status indicator LED

use embedded_hal::digital::OutputPin;

/// Single status LED
///
/// The Blue Pill's PC13 LED is wired to 3V3, so it lights when the pin is low.
pub struct StatusLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create an LED driver; starts dark
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            lit: true,
        };
        led.set(false);
        led
    }

    /// Create an LED that lights when the pin is low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn set(&mut self, lit: bool) {
        if lit == self.lit {
            return;
        }
        self.lit = lit;
        let _ = if lit != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }

    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_low_led() {
        let mut led = StatusLed::new_active_low(MockPin { high: false });

        // Initially dark (pin high)
        assert!(!led.is_lit());
        assert!(led.pin.high);

        led.set(true);
        assert!(led.is_lit());
        assert!(!led.pin.high);
    }

    #[test]
    fn test_toggle() {
        let mut led = StatusLed::new(MockPin { high: true }, false);
        assert!(!led.pin.high);

        led.toggle();
        assert!(led.pin.high);
        led.toggle();
        assert!(!led.pin.high);
    }
}
