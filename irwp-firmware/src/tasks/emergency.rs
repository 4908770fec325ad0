//! Emergency stop input
//!
//! Runs on the interrupt-priority executor so it preempts the control loop
//! at any await point or instruction boundary. Its only effect is setting
//! the latch; the control loop observes it on its next pass.

use defmt::*;
use embassy_stm32::exti::ExtiInput;

use irwp_core::safety::EmergencyLatch;

#[embassy_executor::task]
pub async fn emergency_task(mut input: ExtiInput<'static>, latch: &'static EmergencyLatch) {
    info!("Emergency task started");

    loop {
        input.wait_for_falling_edge().await;
        latch.mark();
    }
}
