//! Async driver for the Adafruit I2C QT Rotary Encoder (Seesaw-based).
//!
//! The breakout carries one detented encoder and its push switch behind a
//! Seesaw microcontroller. [`RotaryEncoder`] exposes the accumulated
//! position and the switch level; turning those into rate-limited deltas
//! and switch edges is left to the caller.
//!
//! # Architecture
//!
//! - **`seesaw`** (crate-private) — register reads/writes with the Seesaw
//!   write/delay/read timing.
//! - **[`RotaryEncoder`]** (public) — hardware check, position, and
//!   switch level.
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] for [`EncoderError`].

#![no_std]

pub use encoder::RotaryEncoder;
pub use error::EncoderError;
pub use registers::DEFAULT_ADDRESS;

mod encoder;
mod error;
mod registers;
mod seesaw;
