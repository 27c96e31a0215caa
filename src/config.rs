//! Construction-time configuration.
//!
//! An [`EncoderConfig`] fixes the value range, wrap mode and acceleration
//! parameters of one encoder. The debounce windows live in [`Timing`];
//! the defaults suit common mechanical EC11-style encoders polled every
//! millisecond or so.

// ---------------------------------------------------------------------------
// Timing defaults
// ---------------------------------------------------------------------------

/// A button level change must persist longer than this before it is confirmed.
pub const BUTTON_DEBOUNCE_MS: u32 = 10;

/// Encoder edges closer than this to the last accepted pulse are discarded.
pub const ENCODER_GLITCH_MS: u32 = 4;

/// Hold time after which (and repeatedly every which) a long-press fires.
pub const LONG_PRESS_MS: u32 = 800;

/// Pulses closer together than this count as fast movement.
pub const DEFAULT_THRESHOLD_MS: u32 = 15;

/// Step applied per pulse during fast movement.
pub const DEFAULT_FAST_STEP: i32 = 10;

/// Debounce and long-press windows, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Button debounce window. Default: [`BUTTON_DEBOUNCE_MS`].
    pub button_debounce_ms: u32,
    /// Encoder glitch window. Default: [`ENCODER_GLITCH_MS`].
    pub encoder_glitch_ms: u32,
    /// Long-press period. Default: [`LONG_PRESS_MS`].
    pub long_press_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            button_debounce_ms: BUTTON_DEBOUNCE_MS,
            encoder_glitch_ms: ENCODER_GLITCH_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

/// Immutable encoder parameters.
///
/// `min <= max` is the caller's responsibility and is not checked.
///
/// # Example
///
/// ```
/// use rotary_encoder_driver::EncoderConfig;
///
/// // Volume knob: 0..=100, stops at both ends, 5-unit steps when spun fast.
/// let config = EncoderConfig::new(0, 100).fast_step(5);
/// assert!(!config.circular);
/// assert_eq!(config.threshold_ms, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Lowest reachable position (inclusive).
    pub min: i32,
    /// Highest reachable position (inclusive).
    pub max: i32,
    /// Wrap to the opposite bound instead of saturating.
    pub circular: bool,
    /// Pulse spacing below which the fast step applies.
    pub threshold_ms: u32,
    /// Step magnitude during fast movement.
    pub fast_step: i32,
    /// Debounce and long-press windows.
    pub timing: Timing,
}

impl EncoderConfig {
    /// Create a configuration for the range `min..=max` with default
    /// wrap mode (saturating), threshold and fast step.
    pub const fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            circular: false,
            threshold_ms: DEFAULT_THRESHOLD_MS,
            fast_step: DEFAULT_FAST_STEP,
            timing: Timing {
                button_debounce_ms: BUTTON_DEBOUNCE_MS,
                encoder_glitch_ms: ENCODER_GLITCH_MS,
                long_press_ms: LONG_PRESS_MS,
            },
        }
    }

    /// Wrap around at the bounds instead of saturating.
    pub const fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Set the fast-movement threshold.
    pub const fn threshold_ms(mut self, threshold_ms: u32) -> Self {
        self.threshold_ms = threshold_ms;
        self
    }

    /// Set the step used during fast movement.
    pub const fn fast_step(mut self, fast_step: i32) -> Self {
        self.fast_step = fast_step;
        self
    }

    /// Override the debounce and long-press windows.
    pub const fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Bring `position` back into range after a step.
    ///
    /// Overshoot is not carried over: wrapping lands exactly on the
    /// opposite bound.
    pub fn fold(&self, position: i32) -> i32 {
        if position > self.max {
            if self.circular {
                self.min
            } else {
                self.max
            }
        } else if position < self.min {
            if self.circular {
                self.max
            } else {
                self.min
            }
        } else {
            position
        }
    }
}
