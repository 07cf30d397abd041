//! Byte-stream and packet framing for the two MIDI transports.
//!
//! DIN MIDI arrives as a raw serial byte stream with running status; USB
//! MIDI arrives as 4-byte event packets. Both end up as [`MidiEvent`]s.

use crate::events::MidiEvent;

/// Byte-at-a-time framer for a serial (DIN) MIDI stream.
///
/// Realtime bytes (`0xF8..=0xFF`) are skipped without disturbing running
/// status. System common and SysEx bytes (`0xF0..=0xF7`) cancel it, and
/// data bytes are dropped until the next channel status byte.
///
/// # Examples
///
/// ```
/// use macrodrone::{DinFramer, MidiEvent};
///
/// let mut framer = DinFramer::new();
/// let events: Vec<_> = [0x90, 60, 100, 64, 90]
///     .into_iter()
///     .filter_map(|b| framer.push(b))
///     .collect();
///
/// // Second note reuses the running status.
/// assert_eq!(events[1], MidiEvent::NoteOn { note: 64, velocity: 90, channel: 0 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct DinFramer {
    status: Option<u8>,
    data: [u8; 2],
    len: usize,
}

impl DinFramer {
    pub const fn new() -> Self {
        Self {
            status: None,
            data: [0; 2],
            len: 0,
        }
    }

    /// Drop any partial message and the running status.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed one byte; returns an event once a channel message is complete.
    pub fn push(&mut self, byte: u8) -> Option<MidiEvent> {
        if byte >= 0xF8 {
            return None;
        }

        if byte & 0x80 != 0 {
            self.status = (byte < 0xF0).then_some(byte);
            self.len = 0;
            return None;
        }

        let status = self.status?;
        self.data[self.len] = byte;
        self.len += 1;

        let needed = data_len(status);
        if self.len < needed {
            return None;
        }
        self.len = 0;

        let msg = [status, self.data[0], self.data[1]];
        Some(MidiEvent::from_bytes(&msg[..1 + needed]))
    }
}

/// Data bytes following a channel status byte.
fn data_len(status: u8) -> usize {
    match status & 0xF0 {
        0xC0 | 0xD0 => 1,
        _ => 2,
    }
}

/// Decode one USB-MIDI event packet (cable/code index byte + 3 MIDI bytes).
///
/// Returns `None` for packets that do not carry a channel voice message
/// (code index outside `0x8..=0xE`) or are shorter than 4 bytes.
pub fn usb_packet_event(packet: &[u8]) -> Option<MidiEvent> {
    let [header, msg @ ..] = packet else {
        return None;
    };
    if msg.len() < 3 || !(0x8..=0xE).contains(&(header & 0x0F)) {
        return None;
    }
    Some(MidiEvent::from_bytes(&msg[..3]))
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(framer: &mut DinFramer, bytes: &[u8]) -> Vec<MidiEvent> {
        bytes.iter().filter_map(|&b| framer.push(b)).collect()
    }

    // ── DIN ──────────────────────────────────────────────────────────

    #[test]
    fn complete_note_on() {
        let mut framer = DinFramer::new();
        let events = feed(&mut framer, &[0x93, 48, 127]);
        assert_eq!(events, vec![MidiEvent::NoteOn { note: 48, velocity: 127, channel: 3 }]);
    }

    #[test]
    fn data_before_status_is_dropped() {
        let mut framer = DinFramer::new();
        let events = feed(&mut framer, &[60, 100, 0x80, 60, 0]);
        assert_eq!(events, vec![MidiEvent::NoteOff { note: 60, velocity: 0, channel: 0 }]);
    }

    #[test]
    fn realtime_bytes_do_not_break_messages() {
        let mut framer = DinFramer::new();
        let events = feed(&mut framer, &[0x90, 0xF8, 60, 0xFE, 100]);
        assert_eq!(events, vec![MidiEvent::NoteOn { note: 60, velocity: 100, channel: 0 }]);
    }

    #[test]
    fn sysex_cancels_running_status() {
        let mut framer = DinFramer::new();
        let events = feed(&mut framer, &[0x90, 60, 100, 0xF0, 0x7E, 0xF7, 62, 100]);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn single_data_byte_messages() {
        let mut framer = DinFramer::new();
        // Program change (1 data byte) followed by a note on.
        let events = feed(&mut framer, &[0xC0, 5, 0x90, 60, 90]);
        assert_eq!(
            events,
            vec![MidiEvent::Other, MidiEvent::NoteOn { note: 60, velocity: 90, channel: 0 }]
        );
    }

    #[test]
    fn reset_drops_partial_message() {
        let mut framer = DinFramer::new();
        feed(&mut framer, &[0x90, 60]);
        framer.reset();
        assert!(feed(&mut framer, &[100, 61, 100]).is_empty());
    }

    // ── USB ──────────────────────────────────────────────────────────

    #[test]
    fn usb_note_packets() {
        assert_eq!(
            usb_packet_event(&[0x09, 0x90, 60, 100]),
            Some(MidiEvent::NoteOn { note: 60, velocity: 100, channel: 0 })
        );
        assert_eq!(
            usb_packet_event(&[0x18, 0x85, 60, 0]),
            Some(MidiEvent::NoteOff { note: 60, velocity: 0, channel: 5 })
        );
    }

    #[test]
    fn usb_non_channel_packets_are_skipped() {
        // SysEx start (code index 0x4) and a truncated packet.
        assert_eq!(usb_packet_event(&[0x04, 0xF0, 0x7E, 0x00]), None);
        assert_eq!(usb_packet_event(&[0x09, 0x90]), None);
        assert_eq!(usb_packet_event(&[]), None);
    }
}
