//! Debounced pushbutton with press, release and repeating long-press events.
//!
//! The [`ButtonDebouncer`] keeps a *confirmed* level separate from the raw
//! samples it is fed. A raw change starts a debounce window; when the
//! window has elapsed the level sampled at that moment becomes the new
//! confirmed level. A bounce that settles back before the window closes
//! therefore never produces an event.
//!
//! ```text
//!   raw      ‾‾‾‾|_|‾|__________________________|‾|_|‾‾‾‾‾‾‾
//!   confirmed‾‾‾‾‾‾‾‾‾‾‾‾|________________________________|‾‾
//!                        ^ Pressed      ^ LongPress      ^ Released
//!                        |<-- long_press_ms -->|
//! ```

use crate::config::Timing;

/// Debounced level of the pushbutton.
///
/// The button pulls its line low, so `Held` corresponds to a low level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLevel {
    /// Contacts closed, line low.
    Held,
    /// Contacts open, line pulled high.
    Released,
}

impl ButtonLevel {
    /// Level corresponding to a raw line sample.
    pub fn from_line_low(is_low: bool) -> Self {
        if is_low {
            ButtonLevel::Held
        } else {
            ButtonLevel::Released
        }
    }
}

/// A confirmed button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// The button became held. `elapsed_ms` is the time between the first
    /// raw edge and its confirmation.
    Pressed { elapsed_ms: u32 },
    /// The button was let go after being held for `held_ms`.
    ///
    /// `held_ms` covers the whole hold, from the confirmed press to the
    /// confirmed release. Long-presses fired in between do not shorten it.
    Released { held_ms: u32 },
    /// The button has been held for `elapsed_ms` since it was pressed or
    /// since the previous long-press. Repeats while held.
    LongPress { elapsed_ms: u32 },
}

impl ButtonEvent {
    /// The millisecond payload handed to event handlers.
    pub fn payload_ms(&self) -> u32 {
        match *self {
            ButtonEvent::Pressed { elapsed_ms } => elapsed_ms,
            ButtonEvent::Released { held_ms } => held_ms,
            ButtonEvent::LongPress { elapsed_ms } => elapsed_ms,
        }
    }
}

/// Button debounce and event state machine.
#[derive(Debug, Clone, Copy)]
pub struct ButtonDebouncer {
    /// Last confirmed level.
    level: ButtonLevel,
    /// Start of the running debounce window, if any.
    pending_since: Option<u32>,
    /// When the confirmed level last became `Held`.
    held_since: u32,
    /// Reference point for the next long-press.
    long_press_mark: u32,
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonDebouncer {
    /// Create a debouncer with the button at rest (released).
    pub const fn new() -> Self {
        Self {
            level: ButtonLevel::Released,
            pending_since: None,
            held_since: 0,
            long_press_mark: 0,
        }
    }

    /// Last confirmed level. Does not sample the line.
    pub fn level(&self) -> ButtonLevel {
        self.level
    }

    /// `true` while a raw change is waiting out the debounce window.
    pub fn is_debouncing(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Timestamp at which the current hold was confirmed, or `None` when
    /// the button is released.
    pub fn pressed_at(&self) -> Option<u32> {
        match self.level {
            ButtonLevel::Held => Some(self.held_since),
            ButtonLevel::Released => None,
        }
    }

    /// Feed one raw sample taken at `now_ms`.
    ///
    /// Returns at most one event per call.
    pub fn update(&mut self, raw: ButtonLevel, now_ms: u32, timing: &Timing) -> Option<ButtonEvent> {
        if raw != self.level && self.pending_since.is_none() {
            self.pending_since = Some(now_ms);
        }

        if let Some(started) = self.pending_since {
            let elapsed = now_ms.wrapping_sub(started);
            if elapsed > timing.button_debounce_ms {
                self.pending_since = None;
                let previous = core::mem::replace(&mut self.level, raw);

                match (previous, raw) {
                    (ButtonLevel::Held, ButtonLevel::Released) => {
                        return Some(ButtonEvent::Released {
                            held_ms: now_ms.wrapping_sub(self.held_since),
                        });
                    }
                    (ButtonLevel::Released, ButtonLevel::Held) => {
                        self.held_since = now_ms;
                        self.long_press_mark = now_ms;
                        return Some(ButtonEvent::Pressed { elapsed_ms: elapsed });
                    }
                    // Raw level bounced back inside the window.
                    _ => {}
                }
            }
        }

        if self.level == ButtonLevel::Held {
            let elapsed = now_ms.wrapping_sub(self.long_press_mark);
            if elapsed > timing.long_press_ms {
                self.long_press_mark = now_ms;
                return Some(ButtonEvent::LongPress { elapsed_ms: elapsed });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    const HELD: ButtonLevel = ButtonLevel::Held;
    const RELEASED: ButtonLevel = ButtonLevel::Released;

    // Helper: sample `level` once per millisecond over `from..to`,
    // collecting every event with the time it fired.
    fn run(
        button: &mut ButtonDebouncer,
        level: ButtonLevel,
        from: u32,
        to: u32,
    ) -> Vec<(u32, ButtonEvent)> {
        let timing = Timing::default();
        (from..to)
            .filter_map(|t| button.update(level, t, &timing).map(|e| (t, e)))
            .collect()
    }

    #[test]
    fn starts_released() {
        let button = ButtonDebouncer::new();
        assert_eq!(button.level(), RELEASED);
        assert!(!button.is_debouncing());
        assert_eq!(button.pressed_at(), None);
    }

    #[test]
    fn press_confirmed_after_debounce_window() {
        let mut button = ButtonDebouncer::new();
        let events = run(&mut button, HELD, 1000, 1020);

        // Window opens at 1000 and must be strictly exceeded.
        assert_eq!(events, [(1011, ButtonEvent::Pressed { elapsed_ms: 11 })]);
        assert_eq!(button.level(), HELD);
        assert_eq!(button.pressed_at(), Some(1011));
    }

    #[test]
    fn short_bounce_is_ignored() {
        let mut button = ButtonDebouncer::new();
        let mut events = run(&mut button, HELD, 1000, 1006);
        assert!(button.is_debouncing());

        // Back to released before the window closed.
        events.extend(run(&mut button, RELEASED, 1006, 1100));

        assert!(events.is_empty());
        assert_eq!(button.level(), RELEASED);
        assert!(!button.is_debouncing());
    }

    #[test]
    fn release_reports_hold_duration() {
        let mut button = ButtonDebouncer::new();
        run(&mut button, HELD, 1000, 1300);
        let events = run(&mut button, RELEASED, 1300, 1400);

        assert_eq!(events, [(1311, ButtonEvent::Released { held_ms: 300 })]);
        assert_eq!(button.level(), RELEASED);
    }

    #[test]
    fn release_bounce_keeps_button_held() {
        let mut button = ButtonDebouncer::new();
        run(&mut button, HELD, 1000, 1100);
        let mut events = run(&mut button, RELEASED, 1100, 1105);
        events.extend(run(&mut button, HELD, 1105, 1200));

        assert!(events.is_empty());
        assert_eq!(button.level(), HELD);
    }

    #[test]
    fn long_press_repeats_while_held() {
        let mut button = ButtonDebouncer::new();
        let events = run(&mut button, HELD, 1000, 3500);

        let long_presses: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, ButtonEvent::LongPress { .. }))
            .collect();
        assert_eq!(long_presses.len(), 3);
        for (_, event) in long_presses {
            assert_eq!(*event, ButtonEvent::LongPress { elapsed_ms: 801 });
        }
    }

    #[test]
    fn release_after_long_press_reports_full_hold() {
        let mut button = ButtonDebouncer::new();
        run(&mut button, HELD, 1000, 3500);
        let events = run(&mut button, RELEASED, 3500, 3600);

        assert_eq!(events, [(3511, ButtonEvent::Released { held_ms: 2500 })]);
    }

    #[test]
    fn custom_timing_is_honoured() {
        let timing = Timing {
            button_debounce_ms: 2,
            long_press_ms: 50,
            ..Timing::default()
        };
        let mut button = ButtonDebouncer::new();
        assert_eq!(button.update(HELD, 0, &timing), None);
        assert_eq!(
            button.update(HELD, 3, &timing),
            Some(ButtonEvent::Pressed { elapsed_ms: 3 })
        );
        assert_eq!(button.update(HELD, 50, &timing), None);
        assert_eq!(
            button.update(HELD, 54, &timing),
            Some(ButtonEvent::LongPress { elapsed_ms: 51 })
        );
    }

    #[test]
    fn elapsed_time_survives_clock_wrap() {
        let timing = Timing::default();
        let mut button = ButtonDebouncer::new();
        let start = u32::MAX - 5;
        assert_eq!(button.update(HELD, start, &timing), None);
        assert_eq!(
            button.update(HELD, start.wrapping_add(11), &timing),
            Some(ButtonEvent::Pressed { elapsed_ms: 11 })
        );
    }

    #[test]
    fn payload_matches_variant() {
        assert_eq!(ButtonEvent::Pressed { elapsed_ms: 11 }.payload_ms(), 11);
        assert_eq!(ButtonEvent::Released { held_ms: 300 }.payload_ms(), 300);
        assert_eq!(ButtonEvent::LongPress { elapsed_ms: 801 }.payload_ms(), 801);
    }
}
