//! Drone vs played arbitration for the root note.
//!
//! ```text
//!            NoteOn                     NoteOn / NoteOff
//!   ┌───────┐ ─────────────► ┌────────┐ ◄─────┐
//!   │ Drone │                │ Played │ ──────┘
//!   └───────┘ ◄───────────── └────────┘
//!        manual root-note turn
//! ```
//!
//! Incoming notes take the root note away from the encoder; turning the
//! encoder in root-note mode always takes it back.

use crate::config::GlobalField;
use crate::events::{EnvelopeEdge, MidiEvent};
use crate::parameter_store::{ParamWriter, ParameterStore};

/// Who currently owns the root note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteControl {
    /// Root note follows the encoder (`drone_mode == true`).
    Drone,
    /// Root note follows incoming notes (`drone_mode == false`).
    Played,
}

impl NoteControl {
    /// Current state of `store`.
    pub fn of<const N: usize>(store: &ParameterStore<N>) -> Self {
        if store.drone_mode() {
            NoteControl::Drone
        } else {
            NoteControl::Played
        }
    }
}

/// Applies MIDI note events to the store and yields envelope edges.
///
/// Events from every transport are handled in arrival order; no source has
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteEventArbiter {
    channel: Option<u8>,
}

impl NoteEventArbiter {
    /// Arbiter listening on `channel` (0–15), or every channel if `None`.
    pub fn new(channel: Option<u8>) -> Self {
        Self { channel }
    }

    /// Handle one MIDI event.
    ///
    /// - `NoteOn` with non-zero velocity: root note = note (clamped to the
    ///   root-note range), drone mode off, attack edge.
    /// - `NoteOff`, or `NoteOn` with velocity 0: release edge; mode
    ///   unchanged.
    /// - Anything else, or a note on a filtered-out channel: ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use macrodrone::{EnvelopeEdge, MidiEvent, NoteEventArbiter, ParameterStore, DRONESYNTH};
    ///
    /// let store: ParameterStore = ParameterStore::new(DRONESYNTH);
    /// let writer = store.writer().unwrap();
    /// let arbiter = NoteEventArbiter::new(None);
    ///
    /// let edge = arbiter.handle(&writer, MidiEvent::NoteOn { note: 60, velocity: 90, channel: 0 });
    /// assert_eq!(edge, Some(EnvelopeEdge::Attack { note: 60, velocity: 90 }));
    /// assert_eq!(store.root_note(), 60);
    /// assert!(!store.drone_mode());
    /// ```
    pub fn handle<const N: usize>(
        &self,
        writer: &ParamWriter<'_, N>,
        event: MidiEvent,
    ) -> Option<EnvelopeEdge> {
        if let (Some(wanted), Some(got)) = (self.channel, event.channel()) {
            if wanted != got {
                return None;
            }
        }

        match event {
            MidiEvent::NoteOn { note, velocity, .. } if velocity > 0 => {
                let _root = writer.set_global(GlobalField::RootNote, i32::from(note));
                writer.set_drone_mode(false);

                #[cfg(feature = "defmt")]
                defmt::debug!("note on: {} root={}", note, _root);

                Some(EnvelopeEdge::Attack { note, velocity })
            }
            MidiEvent::NoteOn { note, .. } | MidiEvent::NoteOff { note, .. } => {
                #[cfg(feature = "defmt")]
                defmt::debug!("note off: {}", note);

                Some(EnvelopeEdge::Release { note })
            }
            MidiEvent::Other => None,
        }
    }

    /// The user turned the encoder while it was editing `field` with no
    /// key held. A root-note edit always returns control to the encoder.
    pub fn on_manual_edit<const N: usize>(&self, writer: &ParamWriter<'_, N>, field: GlobalField) {
        if field != GlobalField::RootNote {
            return;
        }
        if !writer.store().drone_mode() {
            #[cfg(feature = "defmt")]
            defmt::info!("root note reclaimed by encoder");
        }
        writer.set_drone_mode(true);
    }
}

impl Default for NoteEventArbiter {
    fn default() -> Self {
        Self::new(None)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
