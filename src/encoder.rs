//! The polled encoder: pins, clock, state and event handlers.
//!
//! [`RotaryEncoder::poll`] is the single entry point the host calls from its
//! main loop. Each call samples the button and both encoder lines once,
//! advances the [`ButtonDebouncer`] and [`QuadratureDecoder`], runs any
//! registered handler and returns a [`PollOutcome`] describing what
//! happened. The two state machines advance independently: an encoder edge
//! held back by the glitch filter never stalls the button.

use embedded_hal::digital::InputPin;

use crate::button::{ButtonDebouncer, ButtonEvent, ButtonLevel};
use crate::config::EncoderConfig;
use crate::error::{EncoderError, Line};
use crate::hal::{Clock, ConfigurePullUp};
use crate::quadrature::{Pulse, QuadratureDecoder};

/// Button event handler.
///
/// Receives the encoder state as it stands when the event is confirmed and
/// the event's millisecond payload (see [`ButtonEvent::payload_ms`]). Any
/// closure or `fn` with this signature works. Handlers run inside
/// [`RotaryEncoder::poll`] and must return promptly.
pub type Handler<'h> = &'h mut dyn FnMut(&EncoderState, u32);

/// Everything that happened during one [`RotaryEncoder::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// The accepted encoder pulse, if any.
    pub pulse: Option<Pulse>,
    /// The confirmed button event, if any.
    pub button: Option<ButtonEvent>,
}

impl PollOutcome {
    /// `true` if nothing happened.
    pub fn is_idle(&self) -> bool {
        self.pulse.is_none() && self.button.is_none()
    }
}

/// Mutable state of one encoder, as seen by event handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderState {
    position: i32,
    button: ButtonDebouncer,
    decoder: QuadratureDecoder,
}

impl EncoderState {
    /// Current position.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Last confirmed button level.
    pub fn button_level(&self) -> ButtonLevel {
        self.button.level()
    }

    /// Clock time at which the current hold was confirmed, if held.
    pub fn pressed_at(&self) -> Option<u32> {
        self.button.pressed_at()
    }

    /// Clock time of the last accepted encoder pulse, if any.
    pub fn last_pulse_ms(&self) -> Option<u32> {
        self.decoder.last_pulse_ms()
    }
}

#[derive(Default)]
struct Handlers<'h> {
    on_press: Option<Handler<'h>>,
    on_release: Option<Handler<'h>>,
    on_long_press: Option<Handler<'h>>,
}

/// Rotary encoder with pushbutton, sampled by polling.
///
/// `S1` is the pulse line, `S2` the direction line and `BTN` the
/// pushbutton. All three idle high and are pulled low by the switch.
///
/// # Example
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{ErrorType, InputPin};
/// # struct Pin(bool);
/// # impl ErrorType for Pin { type Error = Infallible; }
/// # impl InputPin for Pin {
/// #     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(self.0) }
/// #     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(!self.0) }
/// # }
/// use rotary_encoder_driver::{EncoderConfig, EncoderState, Preconfigured, RotaryEncoder};
///
/// let (s1, s2, btn) = (Pin(true), Pin(true), Pin(true));
/// let mut ticks = 0u32;
/// let clock = move || {
///     ticks += 1;
///     ticks
/// };
///
/// let mut on_press = |state: &EncoderState, _ms: u32| {
///     let _ = state.position();
/// };
///
/// let mut encoder = RotaryEncoder::new(
///     Preconfigured(s1),
///     Preconfigured(s2),
///     Preconfigured(btn),
///     clock,
///     EncoderConfig::new(0, 100),
/// );
/// encoder.set_on_press(&mut on_press);
/// encoder.init().unwrap();
///
/// let outcome = encoder.poll().unwrap();
/// assert!(outcome.is_idle());
/// assert_eq!(encoder.position(), 0);
/// ```
pub struct RotaryEncoder<'h, S1, S2, BTN, CLK> {
    s1: S1,
    s2: S2,
    button: BTN,
    clock: CLK,
    config: EncoderConfig,
    state: EncoderState,
    handlers: Handlers<'h>,
}

impl<'h, S1, S2, BTN, CLK> RotaryEncoder<'h, S1, S2, BTN, CLK> {
    /// Create an encoder at position 0 with all lines assumed at rest.
    ///
    /// Call [`init`](Self::init) once before the first
    /// [`poll`](Self::poll).
    pub fn new(s1: S1, s2: S2, button: BTN, clock: CLK, config: EncoderConfig) -> Self {
        Self {
            s1,
            s2,
            button,
            clock,
            config,
            state: EncoderState::default(),
            handlers: Handlers::default(),
        }
    }

    /// Current position.
    pub fn position(&self) -> i32 {
        self.state.position
    }

    /// Overwrite the position.
    ///
    /// The value is taken as-is; it is not clamped to the configured range.
    pub fn set_position(&mut self, position: i32) {
        self.state.position = position;
    }

    /// Last confirmed button level. Does not sample the line.
    pub fn button_level(&self) -> ButtonLevel {
        self.state.button.level()
    }

    /// Shared view of the encoder state.
    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Construction-time configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Run `handler` when a press is confirmed.
    pub fn set_on_press(&mut self, handler: Handler<'h>) {
        self.handlers.on_press = Some(handler);
    }

    /// Run `handler` when a release is confirmed.
    pub fn set_on_release(&mut self, handler: Handler<'h>) {
        self.handlers.on_release = Some(handler);
    }

    /// Run `handler` on every long-press.
    pub fn set_on_long_press(&mut self, handler: Handler<'h>) {
        self.handlers.on_long_press = Some(handler);
    }

    /// Remove all event handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers = Handlers::default();
    }

    /// Give back the pins and the clock.
    pub fn release(self) -> (S1, S2, BTN, CLK) {
        (self.s1, self.s2, self.button, self.clock)
    }

    fn dispatch(&mut self, event: ButtonEvent) {
        let slot = match event {
            ButtonEvent::Pressed { .. } => &mut self.handlers.on_press,
            ButtonEvent::Released { .. } => &mut self.handlers.on_release,
            ButtonEvent::LongPress { .. } => &mut self.handlers.on_long_press,
        };
        if let Some(handler) = slot.as_deref_mut() {
            handler(&self.state, event.payload_ms());
        }
    }
}

impl<'h, S1, S2, BTN, CLK> RotaryEncoder<'h, S1, S2, BTN, CLK>
where
    S1: ConfigurePullUp,
    S2: ConfigurePullUp,
    BTN: ConfigurePullUp,
{
    /// Switch all three lines to pulled-up inputs.
    ///
    /// # Errors
    /// [`EncoderError`] naming the first line the HAL failed to configure.
    pub fn init(&mut self) -> Result<(), EncoderError> {
        self.s1
            .configure_pull_up()
            .map_err(|e| EncoderError::pin(Line::Primary, e))?;
        self.s2
            .configure_pull_up()
            .map_err(|e| EncoderError::pin(Line::Secondary, e))?;
        self.button
            .configure_pull_up()
            .map_err(|e| EncoderError::pin(Line::Button, e))?;
        Ok(())
    }
}

impl<'h, S1, S2, BTN, CLK> RotaryEncoder<'h, S1, S2, BTN, CLK>
where
    S1: InputPin,
    S2: InputPin,
    BTN: InputPin,
    CLK: Clock,
{
    /// Sample all lines once and advance the encoder.
    ///
    /// Call this from the main loop at a period well below the encoder
    /// glitch window (a millisecond or so). Handlers for a confirmed button
    /// event run before this returns.
    ///
    /// # Errors
    /// [`EncoderError`] if a line cannot be read. All three lines are
    /// sampled before any state changes, so a failed call leaves the
    /// encoder untouched and fires no handler.
    pub fn poll(&mut self) -> Result<PollOutcome, EncoderError> {
        let now = self.clock.now_ms();

        let held = self
            .button
            .is_low()
            .map_err(|e| EncoderError::pin(Line::Button, e))?;
        let primary_high = self
            .s1
            .is_high()
            .map_err(|e| EncoderError::pin(Line::Primary, e))?;
        let secondary_high = self
            .s2
            .is_high()
            .map_err(|e| EncoderError::pin(Line::Secondary, e))?;

        // ── Button ───────────────────────────────────────────────────
        let button = self
            .state
            .button
            .update(ButtonLevel::from_line_low(held), now, &self.config.timing);

        if let Some(event) = button {
            #[cfg(feature = "defmt")]
            defmt::debug!("button {} at {} ms", event, now);
            self.dispatch(event);
        }

        // ── Encoder ──────────────────────────────────────────────────
        let pulse = self
            .state
            .decoder
            .sample(primary_high, secondary_high, now, &self.config);

        if let Some(pulse) = pulse {
            self.state.position = pulse.apply(self.state.position, &self.config);
            #[cfg(feature = "defmt")]
            defmt::debug!("pulse {} -> position {}", pulse, self.state.position);
        }

        Ok(PollOutcome { pulse, button })
    }
}
