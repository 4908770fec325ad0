//! Blue Pill board definition
//!
//! Pin table:
//!
//! | Function        | Pin  | Notes                              |
//! |-----------------|------|------------------------------------|
//! | Hat output      | PA0  | TIM2 CH1                           |
//! | Hoodie output   | PA1  | TIM2 CH2                           |
//! | Pants output    | PA2  | TIM2 CH3                           |
//! | Shoes output    | PA3  | TIM2 CH4                           |
//! | Interlock       | PB12 | input, pull-up, engaged when low   |
//! | Emergency stop  | PB13 | EXTI13, falling edge               |
//! | Power relay     | PB14 | push-pull, high = outputs powered  |
//! | Status LED      | PC13 | on-board, active low               |
//! | Host UART TX/RX | PA9 / PA10 | USART1, 115200 8N1           |

use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_time::Delay;

use irwp_core::config::{ControllerConfig, FlickerConfig};
use irwp_core::Controller;
use irwp_drivers::{ActiveLowSwitch, PwmOutputBank};

/// Host link baud rate
pub const UART_BAUD: u32 = 115_200;

/// PWM carrier frequency (kHz)
pub const PWM_FREQ_KHZ: u32 = 1;

/// Control loop period (ms)
const TICK_INTERVAL_MS: u32 = 1;

/// Flicker burst frames and frame period (µs)
const FLICKER_FRAMES: u8 = 50;
const FLICKER_PERIOD_US: u16 = 500;

/// Status LED toggle period in emergency (ms)
const ALERT_BLINK_MS: u32 = 100;

/// Output bank as wired on this board
pub type BoardOutputs = PwmOutputBank<SimplePwmChannel<'static, TIM2>, Output<'static>, Delay>;

/// Interlock switch as wired on this board
pub type BoardSwitch = ActiveLowSwitch<Input<'static>>;

/// Controller over this board's hardware
pub type BoardController = Controller<'static, BoardOutputs, BoardSwitch>;

/// Controller timing for this board
pub fn controller_config() -> ControllerConfig {
    ControllerConfig {
        tick_interval_ms: TICK_INTERVAL_MS,
        flicker: FlickerConfig {
            frames: FLICKER_FRAMES,
            period_us: FLICKER_PERIOD_US,
        },
        alert_blink_ms: ALERT_BLINK_MS,
    }
}
