//! Input interpretation and parameter arbitration for the macrodrone synth.
//!
//! The firmware exposes a 12-key matrix, one rotary encoder with a push
//! switch, and MIDI note input. This crate turns those raw edges into
//! bounded changes to a shared [`ParameterStore`]: a bank of per-voice
//! detune values plus a handful of global synthesis parameters.
//!
//! # Architecture
//!
//! ```text
//!  KeyEdge / EncoderTick / SwitchEdge        MidiEvent (USB + DIN, merged)
//!                 │                                   │
//!                 ▼                                   ▼
//!   ┌──────────────────────────── UiController ─────────────────────────┐
//!   │ KeyHeldSet  EncoderSampler → EncoderInterpreter  NoteEventArbiter │
//!   │                              ChordActionHandler                   │
//!   └──────────────────────────────┬────────────────────────────────────┘
//!                                  │ ParamWriter (single writer)
//!                                  ▼
//!                           ParameterStore  ──►  snapshot() readers
//!                                                (audio, display, LEDs)
//! ```
//!
//! Every write clamps to the range declared by the active
//! [`VariantConfig`]; nothing in the runtime path returns an error.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging and [`defmt::Format`] derives.
//! - **`midly`** (default) — build [`MidiEvent`]s from raw MIDI bytes, DIN byte
//!   streams and USB-MIDI packets.

#![cfg_attr(not(test), no_std)]

pub mod arbiter;
pub mod chord;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod encoder;
pub mod error;
pub mod events;
#[cfg(feature = "midly")]
pub mod framer;
pub mod keys;
pub mod parameter_store;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use arbiter::{NoteControl, NoteEventArbiter};
pub use chord::{ChordAction, ChordActionHandler};
pub use config::{
    EncoderResponse, FieldRange, GlobalField, VariantConfig, DRONESYNTH, DRONESYNTH_WIDE,
    NUM_KEYS,
};
pub use controller::UiController;
pub use debounce::{Debouncer, DEBOUNCE_TICKS};
pub use encoder::{EncoderInterpreter, EncoderRoute, EncoderSampler};
pub use error::ConfigError;
pub use events::{EnvelopeEdge, InputEvent, MidiEvent};
#[cfg(feature = "midly")]
pub use framer::{usb_packet_event, DinFramer};
pub use keys::KeyHeldSet;
pub use parameter_store::{ParamWriter, ParameterSnapshot, ParameterStore};
