//! UI-context dispatcher tying the interpreters to the store.
//!
//! [`UiController`] is what the firmware's UI task owns. It holds the
//! store's only [`ParamWriter`], so every mutation of shared state happens
//! from the context that drives it.

use rand::RngCore;

use crate::arbiter::NoteEventArbiter;
use crate::chord::{ChordAction, ChordActionHandler};
use crate::encoder::{EncoderInterpreter, EncoderRoute, EncoderSampler};
use crate::events::{EnvelopeEdge, InputEvent, MidiEvent};
use crate::keys::KeyHeldSet;
use crate::parameter_store::ParamWriter;

/// Owns the write side of the store plus all per-context input state.
///
/// # Examples
///
/// ```
/// use macrodrone::{InputEvent, ParameterStore, UiController, DRONESYNTH};
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let store: ParameterStore = ParameterStore::new(DRONESYNTH);
/// let mut ui = UiController::new(store.writer().unwrap(), SmallRng::seed_from_u64(1));
///
/// ui.handle_input(InputEvent::KeyEdge { index: 0, pressed: true });
/// ui.handle_input(InputEvent::EncoderTick { raw_position: 2, now_ms: 100 });
/// assert_eq!(store.detune(0), Some(58));
/// ```
pub struct UiController<'a, const N: usize, R> {
    writer: ParamWriter<'a, N>,
    sampler: EncoderSampler,
    arbiter: NoteEventArbiter,
    held: KeyHeldSet,
    rng: R,
}

impl<'a, const N: usize, R: RngCore> UiController<'a, N, R> {
    /// Build a controller around the store's writer. Sampling interval and
    /// MIDI channel come from the store's config.
    pub fn new(writer: ParamWriter<'a, N>, rng: R) -> Self {
        let config = writer.store().config();
        let sampler = EncoderSampler::new(config.encoder_interval_ms);
        let arbiter = NoteEventArbiter::new(config.midi_channel);
        Self {
            writer,
            sampler,
            arbiter,
            held: KeyHeldSet::empty(),
            rng,
        }
    }

    /// Set the encoder baseline to the hardware's current position.
    pub fn set_encoder_baseline(&mut self, position: i32) {
        self.sampler.set_baseline(position);
    }

    /// Returns `true` if an encoder position read at `now_ms` would be
    /// sampled. Lets the caller skip bus traffic between sample slots.
    pub fn encoder_due(&self, now_ms: u64) -> bool {
        self.sampler.is_due(now_ms)
    }

    pub fn held_keys(&self) -> KeyHeldSet {
        self.held
    }

    // ── Front-panel input ────────────────────────────────────────────

    /// Dispatch one front-panel event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyEdge { index, pressed } => self.on_key(index, pressed),
            InputEvent::EncoderTick { raw_position, now_ms } => {
                self.on_encoder(raw_position, now_ms);
            }
            InputEvent::SwitchEdge { pressed } => {
                self.on_switch(pressed);
            }
        }
    }

    /// Track a key edge and publish the held set.
    pub fn on_key(&mut self, index: usize, pressed: bool) {
        if index >= N {
            #[cfg(feature = "defmt")]
            defmt::warn!("key {} out of bounds", index);
            return;
        }

        self.held.set(index, pressed);
        self.writer.set_held_keys(self.held);

        #[cfg(feature = "defmt")]
        defmt::debug!("key {} {}", index, if pressed { "pressed" } else { "released" });
    }

    /// Offer a raw encoder position. Returns where the adjustment went.
    ///
    /// A root-note edit with no key held hands the root note back to the
    /// encoder even if the value was already at its limit.
    pub fn on_encoder(&mut self, raw_position: i32, now_ms: u64) -> EncoderRoute {
        let Some(delta) = self.sampler.sample(raw_position, now_ms) else {
            return EncoderRoute::Idle;
        };

        let route = EncoderInterpreter::apply(&self.writer, self.held, delta);
        if let EncoderRoute::Global { field, .. } = route {
            self.arbiter.on_manual_edit(&self.writer, field);
        }
        route
    }

    /// Handle an encoder push-switch edge.
    pub fn on_switch(&mut self, pressed: bool) -> ChordAction {
        ChordActionHandler::on_switch(&self.writer, self.held, pressed, &mut self.rng)
    }

    // ── MIDI ─────────────────────────────────────────────────────────

    /// Apply one MIDI event. Returns the envelope edge to forward to the
    /// audio engine, if any.
    pub fn handle_midi(&mut self, event: MidiEvent) -> Option<EnvelopeEdge> {
        self.arbiter.handle(&self.writer, event)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalField, VariantConfig, DRONESYNTH};
    use crate::parameter_store::ParameterStore;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn controller(store: &ParameterStore) -> UiController<'_, 12, SmallRng> {
        UiController::new(store.writer().unwrap(), SmallRng::seed_from_u64(42))
    }

    fn key(index: usize, pressed: bool) -> InputEvent {
        InputEvent::KeyEdge { index, pressed }
    }

    fn turn(raw_position: i32, now_ms: u64) -> InputEvent {
        InputEvent::EncoderTick { raw_position, now_ms }
    }

    fn note_on(note: u8) -> MidiEvent {
        MidiEvent::NoteOn { note, velocity: 100, channel: 0 }
    }

    // ── Keys ─────────────────────────────────────────────────────────

    #[test]
    fn key_edges_publish_held_set() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_input(key(4, true));
        ui.handle_input(key(7, true));
        assert!(store.held_keys().contains(4));
        assert!(store.held_keys().contains(7));

        ui.handle_input(key(4, false));
        assert!(!store.held_keys().contains(4));
        assert_eq!(ui.held_keys(), store.held_keys());
    }

    #[test]
    fn key_beyond_bank_is_ignored() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_input(key(12, true));
        assert!(store.held_keys().is_empty());
        assert_eq!(store.revision(), 0);
    }

    // ── Encoder ──────────────────────────────────────────────────────

    #[test]
    fn held_key_turn_scenario() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_input(key(0, true));
        ui.handle_input(turn(2, 25));
        assert_eq!(store.detune(0), Some(58));
        for voice in 1..12 {
            assert_eq!(store.detune(voice), Some(50 + voice as i32));
        }
    }

    #[test]
    fn released_key_stops_receiving_turns() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_input(key(0, true));
        ui.handle_input(turn(1, 25));
        ui.handle_input(key(0, false));
        ui.handle_input(turn(2, 50));

        assert_eq!(store.detune(0), Some(51));
        // Second turn went to the root note instead.
        assert_eq!(store.root_note(), 49);
    }

    #[test]
    fn turns_inside_interval_are_deferred() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        assert!(!ui.encoder_due(10));
        assert_eq!(ui.on_encoder(1, 10), EncoderRoute::Idle);
        assert_eq!(store.root_note(), 48);

        assert!(ui.encoder_due(21));
        ui.on_encoder(1, 21);
        assert_eq!(store.root_note(), 49);
    }

    #[test]
    fn baseline_avoids_power_on_jump() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);
        ui.set_encoder_baseline(-500);

        ui.on_encoder(-499, 30);
        assert_eq!(store.root_note(), 49);
    }

    #[test]
    fn filter_turn_scenario() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);
        ui.handle_input(InputEvent::SwitchEdge { pressed: true });
        ui.handle_input(InputEvent::SwitchEdge { pressed: false });
        ui.handle_input(InputEvent::SwitchEdge { pressed: true });
        assert_eq!(store.edit_mode(), GlobalField::Filter);

        let route = ui.on_encoder(-1, 30);
        assert_eq!(route, EncoderRoute::Global { field: GlobalField::Filter, value: 69 });
    }

    // ── Switch ───────────────────────────────────────────────────────

    #[test]
    fn switch_meaning_depends_on_held_keys() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        assert_eq!(ui.on_switch(true), ChordAction::ModeAdvanced(GlobalField::Scatter));

        ui.handle_input(key(3, true));
        assert_eq!(
            ui.on_switch(true),
            ChordAction::VoicesToggled { zeroed: 1, randomized: 0 }
        );
        assert_eq!(store.detune(3), Some(0));
        assert_eq!(store.edit_mode(), GlobalField::Scatter);
    }

    #[test]
    fn bouncy_switch_through_debouncer_advances_mode_once() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);
        let mut switch = crate::debounce::Debouncer::new(3);

        // One physical press whose contact bounces across several polls.
        let polls = [true, false, true, true, true, false, true, true, true, true];
        for level in polls {
            if let Some(pressed) = switch.update(level) {
                ui.handle_input(InputEvent::SwitchEdge { pressed });
            }
        }
        assert_eq!(store.edit_mode(), GlobalField::Scatter);
    }

    // ── Drone / played arbitration ───────────────────────────────────

    #[test]
    fn note_on_scenario() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);
        assert!(store.drone_mode());

        let edge = ui.handle_midi(note_on(60));
        assert_eq!(edge, Some(EnvelopeEdge::Attack { note: 60, velocity: 100 }));
        assert_eq!(store.root_note(), 60);
        assert!(!store.drone_mode());
    }

    #[test]
    fn root_note_turn_reclaims_drone_mode() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_midi(note_on(60));
        ui.on_encoder(-1, 30);
        assert!(store.drone_mode());
        assert_eq!(store.root_note(), 59);
    }

    #[test]
    fn reclaim_happens_even_at_range_limit() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_midi(note_on(127)); // clamps to 120
        ui.on_encoder(1, 30);
        assert_eq!(store.root_note(), 120);
        assert!(store.drone_mode());
    }

    #[test]
    fn held_key_turn_does_not_reclaim() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.handle_midi(note_on(60));
        ui.handle_input(key(1, true));
        ui.on_encoder(1, 30);
        assert!(!store.drone_mode());
    }

    #[test]
    fn non_root_mode_turn_does_not_reclaim() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        ui.on_switch(true); // Scatter
        ui.handle_midi(note_on(60));
        ui.on_encoder(1, 30);
        assert!(!store.drone_mode());
        assert_eq!(store.scatter(), 1);
    }

    #[test]
    fn interleaved_transports_apply_in_arrival_order() {
        let store = ParameterStore::new(DRONESYNTH);
        let mut ui = controller(&store);

        // Two sources merged into one stream: the last note on wins.
        let merged = [
            note_on(40),
            MidiEvent::Other,
            note_on(52),
            MidiEvent::NoteOff { note: 40, velocity: 0, channel: 0 },
        ];
        for ev in merged {
            ui.handle_midi(ev);
        }
        assert_eq!(store.root_note(), 52);
        assert!(!store.drone_mode());
    }

    #[test]
    fn config_channel_filter_is_used() {
        let config = VariantConfig { midi_channel: Some(2), ..DRONESYNTH };
        let store = ParameterStore::new(config);
        let mut ui = controller(&store);

        assert_eq!(ui.handle_midi(note_on(60)), None);
        assert!(store.drone_mode());
    }
}
