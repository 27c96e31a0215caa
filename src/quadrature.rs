//! Quadrature decoding with glitch filtering and acceleration.
//!
//! Only the primary line (S1) is watched for edges. When S1 falls, the
//! secondary line (S2) from the same sample decides the direction: a
//! detent turned clockwise leaves S2 at the same level S1 just fell to.
//!
//! ```text
//!            clockwise                counter-clockwise
//!   S1  ‾‾‾‾|________|‾‾‾‾       S1  ‾‾‾‾‾‾‾‾|_______|‾‾‾‾
//!   S2  ‾‾|________|‾‾‾‾‾‾       S2  ‾‾‾‾|_______|‾‾‾‾‾‾‾‾
//!           ^ S1 falls, S2 low           ^ S1 falls, S2 high
//! ```

use crate::config::EncoderConfig;

/// Rotation direction of an accepted pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Position increases.
    Clockwise,
    /// Position decreases.
    CounterClockwise,
}

/// One accepted encoder pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    /// Which way the knob turned.
    pub direction: Direction,
    /// Step size before the sign is applied: 1, or the fast step.
    pub magnitude: i32,
}

impl Pulse {
    /// Signed change this pulse applies to the position.
    pub fn delta(&self) -> i32 {
        match self.direction {
            Direction::Clockwise => self.magnitude,
            Direction::CounterClockwise => -self.magnitude,
        }
    }

    /// Apply this pulse to `position`, then saturate or wrap per `config`.
    pub fn apply(&self, position: i32, config: &EncoderConfig) -> i32 {
        config.fold(position.saturating_add(self.delta()))
    }
}

/// Edge detector for the primary line.
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    /// Level of S1 at the last examined edge.
    primary_high: bool,
    /// When the last pulse was accepted; `None` until the first one.
    last_pulse_ms: Option<u32>,
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureDecoder {
    /// Create a decoder with S1 at rest (high, pulled up).
    pub const fn new() -> Self {
        Self {
            primary_high: true,
            last_pulse_ms: None,
        }
    }

    /// Timestamp of the last accepted pulse, if any.
    pub fn last_pulse_ms(&self) -> Option<u32> {
        self.last_pulse_ms
    }

    /// Examine one sample of S1 and S2 taken at `now_ms`.
    ///
    /// An edge arriving within the glitch window is not consumed: the
    /// stored S1 level stays put, so the edge is looked at again on the
    /// next call. A bounce that returns to the stored level before then
    /// simply disappears. The first pulse after start-up has nothing to
    /// be measured against, so it is never filtered or accelerated.
    pub fn sample(
        &mut self,
        primary_high: bool,
        secondary_high: bool,
        now_ms: u32,
        config: &EncoderConfig,
    ) -> Option<Pulse> {
        if primary_high == self.primary_high {
            return None;
        }

        let since_last = self.last_pulse_ms.map(|last| now_ms.wrapping_sub(last));
        if let Some(since) = since_last {
            if since < config.timing.encoder_glitch_ms {
                #[cfg(feature = "defmt")]
                defmt::trace!("encoder edge {} ms after last pulse, deferred", since);
                return None;
            }
        }

        self.primary_high = primary_high;
        if primary_high {
            return None;
        }

        let direction = if secondary_high == primary_high {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        let magnitude = match since_last {
            Some(since) if since < config.threshold_ms => config.fast_step,
            _ => 1,
        };
        self.last_pulse_ms = Some(now_ms);
        Some(Pulse {
            direction,
            magnitude,
        })
    }
}
