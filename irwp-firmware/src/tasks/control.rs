//! Control loop task
//!
//! Owns the controller. Each tick it takes at most one queued command,
//! polls the controller and forwards its replies. On emergency it stops
//! taking commands and blinks the status LED forever.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_sync::channel::TrySendError;
use embassy_time::{Duration, Instant, Ticker, Timer};

use irwp_drivers::StatusLed;
use irwp_protocol::Response;

use crate::board::BoardController;
use crate::channels::{COMMAND_CHANNEL, RESPONSE_CHANNEL};

/// Milliseconds since boot, wrapping
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Queue a reply for the TX task without blocking the loop
fn send(response: Response) {
    if let Err(TrySendError::Full(response)) = RESPONSE_CHANNEL.try_send(response) {
        warn!("Reply queue full, dropping {:?}", response);
    }
}

#[embassy_executor::task]
pub async fn control_task(mut controller: BoardController, mut led: StatusLed<Output<'static>>) {
    info!("Control task started");

    let tick = Duration::from_millis(u64::from(controller.config().tick_interval_ms));
    let mut ticker = Ticker::every(tick);
    let mut frozen = false;

    loop {
        ticker.next().await;

        let command = COMMAND_CHANNEL.try_receive().ok();
        let poll = controller.poll(now_ms(), command);

        if poll.frozen != frozen {
            frozen = poll.frozen;
            if frozen {
                warn!("Interlock open, playback held");
            } else {
                info!("Interlock closed, playback resumed");
            }
        }

        for response in poll.responses {
            debug!("Reply: {:?}", response);
            send(response);
        }

        if poll.halted {
            error!("EMERGENCY STOP: outputs off, commands ignored until reset");
            break;
        }

        led.set(controller.state().is_armed());
    }

    // Terminal alert: outputs held off, LED blinking
    let period = Duration::from_millis(u64::from(controller.config().alert_blink_ms));
    loop {
        let _ = controller.poll(now_ms(), None);
        led.toggle();
        Timer::after(period).await;
    }
}
