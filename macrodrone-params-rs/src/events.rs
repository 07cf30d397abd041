//! Typed events crossing the boundary between the I/O shim and the core.
//!
//! The key scanner, encoder poller, and MIDI transports deliver these
//! values; the core never touches pins or bytes.

/// A discrete input edge from the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Debounced key edge. `index` is the key number (0-based).
    KeyEdge { index: usize, pressed: bool },
    /// Raw encoder position observed at `now_ms` (monotonic milliseconds).
    EncoderTick { raw_position: i32, now_ms: u64 },
    /// Encoder push-switch edge.
    SwitchEdge { pressed: bool },
}

/// A MIDI message as delivered by a transport.
///
/// Anything other than note on/off collapses to [`MidiEvent::Other`] and
/// is ignored by the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8, channel: u8 },
    NoteOff { note: u8, velocity: u8, channel: u8 },
    Other,
}

impl MidiEvent {
    /// Channel of a note message, `None` for [`MidiEvent::Other`].
    pub fn channel(&self) -> Option<u8> {
        match *self {
            MidiEvent::NoteOn { channel, .. } | MidiEvent::NoteOff { channel, .. } => {
                Some(channel)
            }
            MidiEvent::Other => None,
        }
    }
}

#[cfg(feature = "midly")]
impl MidiEvent {
    /// Parse one complete MIDI message (status byte plus data bytes).
    ///
    /// Bytes that `midly` cannot parse, and every non-note message, become
    /// [`MidiEvent::Other`].
    ///
    /// ```
    /// use macrodrone::MidiEvent;
    ///
    /// let ev = MidiEvent::from_bytes(&[0x91, 60, 100]);
    /// assert_eq!(ev, MidiEvent::NoteOn { note: 60, velocity: 100, channel: 1 });
    ///
    /// assert_eq!(MidiEvent::from_bytes(&[0xB0, 7, 100]), MidiEvent::Other);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match midly::live::LiveEvent::parse(bytes) {
            Ok(event) => event.into(),
            Err(_) => MidiEvent::Other,
        }
    }
}

#[cfg(feature = "midly")]
impl From<midly::live::LiveEvent<'_>> for MidiEvent {
    fn from(event: midly::live::LiveEvent<'_>) -> Self {
        use midly::{live::LiveEvent, MidiMessage};

        match event {
            LiveEvent::Midi { channel, message } => match message {
                MidiMessage::NoteOn { key, vel } => MidiEvent::NoteOn {
                    note: key.as_int(),
                    velocity: vel.as_int(),
                    channel: channel.as_int(),
                },
                MidiMessage::NoteOff { key, vel } => MidiEvent::NoteOff {
                    note: key.as_int(),
                    velocity: vel.as_int(),
                    channel: channel.as_int(),
                },
                _ => MidiEvent::Other,
            },
            _ => MidiEvent::Other,
        }
    }
}

/// Envelope gate edge for the audio engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnvelopeEdge {
    Attack { note: u8, velocity: u8 },
    Release { note: u8 },
}

// ── Unit Tests ───────────────────────────────────────────────────────
