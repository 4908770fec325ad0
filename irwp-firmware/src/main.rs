//! IRWP wearable sequencer firmware
//!
//! Main entry point for the STM32F103 (Blue Pill) firmware.

#![no_std]
#![no_main]

mod board;
mod channels;
mod storage;
mod tasks;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::time::khz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, Uart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use irwp_core::config::ControllerConfig;
use irwp_core::pattern::CATALOG;
use irwp_core::safety::{EmergencyLatch, SafetyInterlock};
use irwp_core::Controller;
use irwp_drivers::{ActiveLowSwitch, PwmOutputBank, StatusLed};
use irwp_protocol::IDENTITY;

use crate::storage::FlashStore;
use crate::tasks::{control_task, emergency_task, serial_rx_task, serial_tx_task};

bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<peripherals::USART1>;
    EXTI15_10 => exti::InterruptHandler<interrupt::typelevel::EXTI15_10>;
});

/// Set from the emergency task, read by the control loop
static LATCH: EmergencyLatch = EmergencyLatch::new();

/// Runs the emergency task above the thread-mode executor
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART3() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("{} starting...", IDENTITY);

    let p = embassy_stm32::init(Default::default());

    // Emergency input first, so a press during the rest of boot is latched
    let emergency_input = ExtiInput::new(p.PB13, p.EXTI13, Pull::Up, Irqs);
    interrupt::USART3.set_priority(Priority::P6);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::USART3);
    high_spawner
        .spawn(emergency_task(emergency_input, &LATCH))
        .unwrap();

    let config = match board::controller_config().checked() {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid board timing ({:?}), using defaults", e);
            ControllerConfig::default()
        }
    };

    // Outputs: four PWM channels behind one power relay
    let pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new(p.PA0, OutputType::PushPull)),
        Some(PwmPin::new(p.PA1, OutputType::PushPull)),
        Some(PwmPin::new(p.PA2, OutputType::PushPull)),
        Some(PwmPin::new(p.PA3, OutputType::PushPull)),
        khz(board::PWM_FREQ_KHZ),
        CountingMode::EdgeAlignedUp,
    );
    let mut channels = pwm.split();
    channels.ch1.enable();
    channels.ch2.enable();
    channels.ch3.enable();
    channels.ch4.enable();
    let relay = Output::new(p.PB14, Level::Low, Speed::Low);
    let outputs = PwmOutputBank::new(
        [channels.ch1, channels.ch2, channels.ch3, channels.ch4],
        relay,
        Delay,
    );

    let switch = ActiveLowSwitch::new(Input::new(p.PB12, Pull::Up));
    let interlock = SafetyInterlock::new(switch, &LATCH);

    let mut led = StatusLed::new_active_low(Output::new(p.PC13, Level::High, Speed::Low));
    led.set(false);

    let mut controller = Controller::new(config, outputs, interlock, &CATALOG);
    info!("Outputs off, state Idle");

    let mut store = FlashStore::new(Flash::new_blocking(p.FLASH));
    let persisted = storage::load_persisted(&mut store);
    if let Some(pattern) = persisted.pattern {
        let now_ms = Instant::now().as_millis() as u32;
        match controller.restore_pattern(pattern, now_ms) {
            Ok(()) => info!("Stored pattern loaded"),
            Err(e) => warn!("Stored pattern rejected: {:?}", e),
        }
    }

    // Host link
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = board::UART_BAUD;
    let uart = Uart::new(
        p.USART1,
        p.PA10,
        p.PA9,
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        uart_config,
    )
    .unwrap();
    let (tx, rx) = uart.split();

    spawner.spawn(serial_rx_task(rx)).unwrap();
    spawner.spawn(serial_tx_task(tx)).unwrap();
    spawner.spawn(control_task(controller, led)).unwrap();

    info!("All tasks spawned, ready");
}
