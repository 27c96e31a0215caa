//! Fixed-rate polling loop for Embassy firmware.

use embassy_time::{Duration, Ticker};
use embedded_hal::digital::InputPin;

use crate::encoder::{EncoderState, PollOutcome, RotaryEncoder};
use crate::hal::Clock;

/// Poll `encoder` every `period`, forever.
///
/// This is a regular `async fn`, not an Embassy `#[task]`; wrap it in a
/// concrete task since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn knob_task(mut encoder: MyEncoder) {
///     poll_task(&mut encoder, Duration::from_millis(1), |state, outcome| {
///         if outcome.pulse.is_some() {
///             defmt::info!("position {}", state.position());
///         }
///     })
///     .await
/// }
/// ```
///
/// `on_outcome` runs after every poll that produced a pulse or a button
/// event. A failed poll is logged and retried on the next tick.
pub async fn poll_task<S1, S2, BTN, CLK, F>(
    encoder: &mut RotaryEncoder<'_, S1, S2, BTN, CLK>,
    period: Duration,
    mut on_outcome: F,
) -> !
where
    S1: InputPin,
    S2: InputPin,
    BTN: InputPin,
    CLK: Clock,
    F: FnMut(&EncoderState, &PollOutcome),
{
    #[cfg(feature = "defmt")]
    defmt::info!("encoder poll task started, period {} us", period.as_micros());

    let mut ticker = Ticker::every(period);
    loop {
        match encoder.poll() {
            Ok(outcome) if !outcome.is_idle() => on_outcome(encoder.state(), &outcome),
            Ok(_) => {}
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("encoder poll failed: {}", _e);
            }
        }
        ticker.next().await;
    }
}
