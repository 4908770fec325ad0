//! Host UART transmit task
//!
//! Encodes replies from the control loop, one `\r\n` terminated line each.

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use embedded_io_async::Write;

use crate::channels::RESPONSE_CHANNEL;

#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: UartTx<'static, Async>) {
    info!("Serial TX task started");

    loop {
        let response = RESPONSE_CHANNEL.receive().await;

        let line = match response.encode() {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode {:?}: {:?}", response, e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send reply: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("Failed to send terminator: {:?}", e);
        }
    }
}
