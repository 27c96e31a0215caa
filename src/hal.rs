//! Platform seams: the millisecond clock and pull-up configuration.
//!
//! Raw level reads go through [`embedded_hal::digital::InputPin`]. The two
//! traits here cover what embedded-hal leaves to each HAL: enabling the
//! pull-up on an input, and reading a monotonic millisecond counter.

use embedded_hal::digital::{ErrorType, InputPin};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic millisecond counter.
///
/// The counter may wrap; elapsed times are computed with wrapping
/// subtraction, so only windows longer than `u32::MAX` ms are ambiguous.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&mut self) -> u32;
}

/// Any `FnMut() -> u32` closure is a clock, e.g. a wrapper around a HAL
/// timer or a test counter.
impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Clock backed by the Embassy time driver.
#[cfg(feature = "task")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "task")]
impl Clock for EmbassyClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation gives the wrapping 32-bit counter the decoder expects.
        embassy_time::Instant::now().as_millis() as u32
    }
}

// ---------------------------------------------------------------------------
// Pull-up configuration
// ---------------------------------------------------------------------------

/// Input pin whose internal pull-up can be switched on at runtime.
///
/// The encoder and button lines are expected to idle high and be pulled
/// low by the switch contacts.
pub trait ConfigurePullUp: InputPin {
    /// Put the pin into pulled-up input mode.
    fn configure_pull_up(&mut self) -> Result<(), Self::Error>;
}

/// Wrapper for pins the HAL has already configured as pulled-up inputs.
///
/// Most HALs fix the pin mode at construction, e.g.
/// `embassy_rp::gpio::Input::new(pin, Pull::Up)`. Wrapping such a pin makes
/// [`ConfigurePullUp::configure_pull_up`] a no-op.
#[derive(Debug)]
pub struct Preconfigured<P>(pub P);

impl<P> Preconfigured<P> {
    /// Unwrap the inner pin.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for Preconfigured<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for Preconfigured<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }
}

impl<P: InputPin> ConfigurePullUp for Preconfigured<P> {
    fn configure_pull_up(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
