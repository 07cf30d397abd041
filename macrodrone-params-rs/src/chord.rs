//! Encoder push-switch handling.
//!
//! The switch is overloaded: with no key held it cycles the edit mode; with
//! any key held it toggles each held voice between zero and a random
//! detune. The presence of a single held key flips the whole meaning.

use rand::{Rng, RngCore};

use crate::config::GlobalField;
use crate::keys::KeyHeldSet;
use crate::parameter_store::ParamWriter;

/// What a switch press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChordAction {
    /// Release edge, ignored.
    None,
    /// No key held: moved to the next edit mode.
    ModeAdvanced(GlobalField),
    /// Keys held: `zeroed` voices were set to 0, `randomized` voices got a
    /// fresh random detune.
    VoicesToggled { zeroed: usize, randomized: usize },
}

/// Interprets encoder push-switch edges.
pub struct ChordActionHandler;

impl ChordActionHandler {
    /// Handle a switch edge. Only the press edge acts.
    ///
    /// For each held voice independently: a detune of exactly 0 becomes a
    /// random value in `[-max_tune, max_tune]`, anything else becomes 0.
    /// Pressing twice therefore does not restore the original detune, and
    /// a voice whose random draw happens to be 0 stays at 0.
    pub fn on_switch<const N: usize, R: RngCore>(
        writer: &ParamWriter<'_, N>,
        held: KeyHeldSet,
        pressed: bool,
        rng: &mut R,
    ) -> ChordAction {
        if !pressed {
            return ChordAction::None;
        }

        if held.is_empty() {
            let mode = writer.advance_edit_mode();

            #[cfg(feature = "defmt")]
            defmt::info!("edit mode: {}", mode.label());

            return ChordAction::ModeAdvanced(mode);
        }

        let max_tune = writer.store().config().max_tune;
        let mut zeroed = 0;
        let mut randomized = 0;

        for voice in held.iter() {
            let Some(current) = writer.store().detune(voice) else {
                continue;
            };
            if current == 0 {
                writer.set_detune(voice, rng.gen_range(-max_tune..=max_tune));
                randomized += 1;
            } else {
                writer.set_detune(voice, 0);
                zeroed += 1;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("chord toggle: zeroed={} randomized={}", zeroed, randomized);

        ChordAction::VoicesToggled { zeroed, randomized }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DRONESYNTH;
    use crate::parameter_store::ParameterStore;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    fn held(keys: &[usize]) -> KeyHeldSet {
        let mut set = KeyHeldSet::empty();
        for &k in keys {
            set.press(k);
        }
        set
    }

    // ── Mode cycling ─────────────────────────────────────────────────

    #[test]
    fn press_without_keys_advances_mode() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        let action = ChordActionHandler::on_switch(&w, KeyHeldSet::empty(), true, &mut rng);
        assert_eq!(action, ChordAction::ModeAdvanced(GlobalField::Scatter));
        // Voices untouched.
        assert_eq!(store.detune(0), Some(50));
    }

    #[test]
    fn k_presses_give_initial_plus_k_mod_count() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();
        w.set_edit_mode(2);

        for k in 1..=9 {
            ChordActionHandler::on_switch(&w, KeyHeldSet::empty(), true, &mut rng);
            assert_eq!(store.edit_mode_index(), (2 + k) % 4);
        }
    }

    #[test]
    fn release_edge_is_ignored() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        assert_eq!(
            ChordActionHandler::on_switch(&w, KeyHeldSet::empty(), false, &mut rng),
            ChordAction::None
        );
        assert_eq!(
            ChordActionHandler::on_switch(&w, held(&[0]), false, &mut rng),
            ChordAction::None
        );
        assert_eq!(store.revision(), 0);
    }

    // ── Zero / randomize toggle ──────────────────────────────────────

    #[test]
    fn press_with_keys_zeroes_nonzero_voices_and_keeps_mode() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        let action = ChordActionHandler::on_switch(&w, held(&[0, 3]), true, &mut rng);
        assert_eq!(action, ChordAction::VoicesToggled { zeroed: 2, randomized: 0 });
        assert_eq!(store.detune(0), Some(0));
        assert_eq!(store.detune(3), Some(0));
        assert_eq!(store.detune(1), Some(51));
        assert_eq!(store.edit_mode(), GlobalField::RootNote);
    }

    #[test]
    fn zero_voice_gets_random_value_in_range() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        for _ in 0..200 {
            w.set_detune(7, 0);
            ChordActionHandler::on_switch(&w, held(&[7]), true, &mut rng);
            let v = store.detune(7).unwrap();
            assert!((-96..=96).contains(&v));
        }
    }

    #[test]
    fn toggle_is_per_voice() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();
        w.set_detune(2, 0);

        let action = ChordActionHandler::on_switch(&w, held(&[2, 5]), true, &mut rng);
        assert_eq!(action, ChordAction::VoicesToggled { zeroed: 1, randomized: 1 });
        assert_eq!(store.detune(5), Some(0));
    }

    #[test]
    fn double_press_is_not_an_involution() {
        let store: ParameterStore = ParameterStore::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        // 50 → 0 → random. The original 50 is not restored (except by an
        // unlucky draw).
        ChordActionHandler::on_switch(&w, held(&[0]), true, &mut rng);
        assert_eq!(store.detune(0), Some(0));
        ChordActionHandler::on_switch(&w, held(&[0]), true, &mut rng);
        let after = store.detune(0).unwrap();
        assert!((-96..=96).contains(&after));
    }

    #[test]
    fn held_keys_beyond_bank_are_skipped() {
        let store = ParameterStore::<4>::new(DRONESYNTH);
        let w = store.writer().unwrap();
        let mut rng = rng();

        let action = ChordActionHandler::on_switch(&w, held(&[1, 9]), true, &mut rng);
        assert_eq!(action, ChordAction::VoicesToggled { zeroed: 1, randomized: 0 });
    }
}
