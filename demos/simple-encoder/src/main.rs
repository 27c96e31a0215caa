//! Simple encoder example
//!
//! Demonstrates basic usage of the rotary-encoder-driver crate on the
//! Raspberry Pi Pico 2. Polls a mechanical encoder with pushbutton every
//! millisecond and logs position changes and button events via defmt.
//!
//! # Wiring
//!
//! | Signal     | Pico 2 Pin | Notes                        |
//! |------------|------------|------------------------------|
//! | ENC A (S1) | GP2        | Pull-up enabled, common GND  |
//! | ENC B (S2) | GP3        | Pull-up enabled              |
//! | ENC SW     | GP4        | Active-low, pull-up enabled  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::Duration;
use {defmt_rtt as _, panic_probe as _};

use rotary_encoder_driver::{
    poll_task, EmbassyClock, EncoderConfig, EncoderState, Preconfigured, RotaryEncoder,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

fn on_press(state: &EncoderState, elapsed_ms: u32) {
    info!("Pressed at position {} ({} ms debounce)", state.position(), elapsed_ms);
}

fn on_release(state: &EncoderState, held_ms: u32) {
    info!("Released at position {} after {} ms", state.position(), held_ms);
}

fn on_long_press(_state: &EncoderState, elapsed_ms: u32) {
    info!("Long press ({} ms)", elapsed_ms);
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // The HAL configures the pull-ups here, so init() has nothing left to do.
    let s1 = Preconfigured(Input::new(p.PIN_2, Pull::Up));
    let s2 = Preconfigured(Input::new(p.PIN_3, Pull::Up));
    let button = Preconfigured(Input::new(p.PIN_4, Pull::Up));

    // MIDI-style 0..=127 range that stops at both ends.
    let config = EncoderConfig::new(0, 127);

    let mut press = on_press;
    let mut release = on_release;
    let mut long_press = on_long_press;

    let mut encoder = RotaryEncoder::new(s1, s2, button, EmbassyClock, config);
    encoder.set_on_press(&mut press);
    encoder.set_on_release(&mut release);
    encoder.set_on_long_press(&mut long_press);

    if let Err(e) = encoder.init() {
        error!("Encoder init failed: {}", e);
    }

    info!("Encoder example started — turn the knob or press it");

    poll_task(&mut encoder, Duration::from_millis(1), |state, outcome| {
        if let Some(pulse) = outcome.pulse {
            info!("{} -> position {}", pulse.direction, state.position());
        }
    })
    .await
}
