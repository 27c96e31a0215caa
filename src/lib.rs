//! Polled driver for a quadrature rotary encoder with pushbutton.
//!
//! Turns raw, bouncy level samples from the two encoder lines and the
//! button line into a bounded integer position and press / release /
//! long-press events. No interrupts and no allocation: the host calls
//! [`RotaryEncoder::poll`] from its main loop, every millisecond or so.
//!
//! # Architecture
//!
//! - **[`config`]** — [`EncoderConfig`] (range, wrap mode, acceleration)
//!   and [`Timing`] (debounce and long-press windows).
//! - **[`hal`]** — the [`Clock`] and [`ConfigurePullUp`] seams. Level reads
//!   use `embedded-hal` 1.0 [`InputPin`](embedded_hal::digital::InputPin).
//! - **[`button`]** — the debounce and event state machine.
//! - **[`quadrature`]** — edge detection, glitch filter, direction and
//!   acceleration.
//! - **[`RotaryEncoder`]** — owns the pins, clock and state; dispatches
//!   button events to registered handlers.
//!
//! # Quick start
//!
//! ```ignore
//! use rotary_encoder_driver::{EncoderConfig, Preconfigured, RotaryEncoder};
//!
//! let mut on_press = |state: &EncoderState, _ms| defmt::info!("press at {}", state.position());
//!
//! let mut encoder = RotaryEncoder::new(
//!     Preconfigured(Input::new(p.PIN_2, Pull::Up)),
//!     Preconfigured(Input::new(p.PIN_3, Pull::Up)),
//!     Preconfigured(Input::new(p.PIN_4, Pull::Up)),
//!     EmbassyClock,
//!     EncoderConfig::new(0, 127),
//! );
//! encoder.set_on_press(&mut on_press);
//! encoder.init()?;
//!
//! loop {
//!     encoder.poll()?;
//!     Timer::after_millis(1).await;
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] on public types and debug logging of
//!   pulses and button events.
//! - **`task`** — [`EmbassyClock`] and the [`poll_task`] loop, built on
//!   `embassy-time`.

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod config;
mod encoder;
mod error;
pub mod hal;
pub mod quadrature;
#[cfg(feature = "task")]
mod task;

#[cfg(test)]
mod fake;

pub use button::{ButtonEvent, ButtonLevel};
pub use config::{EncoderConfig, Timing};
pub use encoder::{EncoderState, Handler, PollOutcome, RotaryEncoder};
pub use error::{EncoderError, Line};
#[cfg(feature = "task")]
pub use hal::EmbassyClock;
pub use hal::{Clock, ConfigurePullUp, Preconfigured};
pub use quadrature::{Direction, Pulse};
#[cfg(feature = "task")]
pub use task::poll_task;
