//! Error types for the encoder driver.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// The physical line an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Encoder line S1 (the pulse line).
    Primary,
    /// Encoder line S2 (the direction line).
    Secondary,
    /// Pushbutton line.
    Button,
}

/// Errors that can occur when sampling or configuring the encoder pins.
///
/// The decoding logic itself cannot fail; every error comes from the GPIO
/// provider. HAL-specific pin errors are reduced to their
/// [`ErrorKind`] so the encoder can own pins from different drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderError {
    /// Which line failed.
    pub line: Line,
    /// Generic classification reported by the HAL.
    pub kind: ErrorKind,
}

impl EncoderError {
    pub(crate) fn pin<E: embedded_hal::digital::Error>(line: Line, error: E) -> Self {
        Self {
            line,
            kind: error.kind(),
        }
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let line = match self.line {
            Line::Primary => "primary encoder line",
            Line::Secondary => "secondary encoder line",
            Line::Button => "button line",
        };
        write!(f, "GPIO error on {}: {:?}", line, self.kind)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EncoderError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "GPIO error on {}: {}", self.line, self.kind)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_line() {
        let err = EncoderError {
            line: Line::Secondary,
            kind: ErrorKind::Other,
        };
        assert_eq!(err.to_string(), "GPIO error on secondary encoder line: Other");
    }
}
