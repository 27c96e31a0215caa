//! Test doubles for the GPIO and clock seams.
//!
//! Each fake shares its state through an `Rc<Cell<_>>`, so a test keeps a
//! clone to drive the level or the time while the encoder owns the other.

extern crate std;

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};

use crate::hal::ConfigurePullUp;

/// Input line whose level is set by the test.
#[derive(Clone)]
pub struct FakeLine {
    high: Rc<Cell<bool>>,
    pull_ups: Rc<Cell<u32>>,
}

impl FakeLine {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
            pull_ups: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, high: bool) {
        self.high.set(high);
    }

    pub fn pull_up_calls(&self) -> u32 {
        self.pull_ups.get()
    }
}

impl ErrorType for FakeLine {
    type Error = Infallible;
}

impl InputPin for FakeLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high.get())
    }
}

impl ConfigurePullUp for FakeLine {
    fn configure_pull_up(&mut self) -> Result<(), Infallible> {
        self.pull_ups.set(self.pull_ups.get() + 1);
        Ok(())
    }
}

/// Error reported by [`BrokenLine`].
#[derive(Debug)]
pub struct BrokenLineError;

impl Error for BrokenLineError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input line that fails every operation.
pub struct BrokenLine;

impl ErrorType for BrokenLine {
    type Error = BrokenLineError;
}

impl InputPin for BrokenLine {
    fn is_high(&mut self) -> Result<bool, BrokenLineError> {
        Err(BrokenLineError)
    }

    fn is_low(&mut self) -> Result<bool, BrokenLineError> {
        Err(BrokenLineError)
    }
}

impl ConfigurePullUp for BrokenLine {
    fn configure_pull_up(&mut self) -> Result<(), BrokenLineError> {
        Err(BrokenLineError)
    }
}

/// Millisecond clock advanced by the test.
#[derive(Clone)]
pub struct FakeClock(Rc<Cell<u32>>);

impl FakeClock {
    pub fn new(start_ms: u32) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn now(&self) -> u32 {
        self.0.get()
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl crate::hal::Clock for FakeClock {
    fn now_ms(&mut self) -> u32 {
        self.0.get()
    }
}
