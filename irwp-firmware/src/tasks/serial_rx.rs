//! Host UART receive task
//!
//! Assembles lines, decodes commands and queues them for the control loop.
//! Lines that fail to decode are dropped without a reply.

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartRx;
use embassy_sync::channel::TrySendError;
use embassy_time::{Duration, Timer};

use irwp_protocol::{Command, LineAssembler};

use crate::channels::COMMAND_CHANNEL;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: UartRx<'static, Async>) {
    info!("Serial RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; 1];

    loop {
        if let Err(e) = rx.read(&mut buf).await {
            warn!("UART read error: {:?}", e);
            assembler.reset();
            Timer::after(Duration::from_millis(10)).await;
            continue;
        }

        let line = match assembler.feed(buf[0]) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(e) => {
                warn!("Dropped input line: {:?}", e);
                continue;
            }
        };

        match Command::parse(&line) {
            Ok(command) => {
                trace!("Command: {:?}", command);
                if let Err(TrySendError::Full(command)) = COMMAND_CHANNEL.try_send(command) {
                    warn!("Command queue full, dropping {:?}", command);
                }
            }
            Err(e) => debug!("Ignoring '{}': {:?}", line.as_str(), e),
        }
    }
}
