use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicUsize, Ordering};

use super::snapshot::ParameterSnapshot;
use super::writer::ParamWriter;
use crate::config::{GlobalField, VariantConfig, NUM_KEYS};
use crate::keys::KeyHeldSet;

/// Authoritative parameter state shared by the UI and audio contexts.
///
/// # Initialization
///
/// [`ParameterStore::new()`] seeds every field from the
/// [`VariantConfig`]: detune from the preset ramp, globals from their range
/// defaults, edit mode at the first entry of the mode list, drone mode on,
/// no keys held.
///
/// # Examples
///
/// ```
/// use macrodrone::{GlobalField, ParameterStore, DRONESYNTH};
///
/// let store: ParameterStore = ParameterStore::new(DRONESYNTH);
/// assert_eq!(store.root_note(), 48);
/// assert_eq!(store.detune(3), Some(53));
///
/// let writer = store.writer().unwrap();
/// writer.adjust_global(GlobalField::Volume, 100);
/// assert_eq!(store.volume(), 15); // clamped
///
/// // Only one writer exists.
/// assert!(store.writer().is_none());
/// ```
pub struct ParameterStore<const N: usize = NUM_KEYS> {
    pub(super) config: VariantConfig,
    pub(super) detune: [AtomicI32; N],
    pub(super) globals: [AtomicI32; GlobalField::COUNT],
    pub(super) edit_mode: AtomicUsize,
    pub(super) drone_mode: AtomicBool,
    pub(super) held: AtomicU32,
    pub(super) revision: AtomicU32,
    writer_taken: AtomicBool,
}

impl<const N: usize> ParameterStore<N> {
    /// Create a store in its power-on state for `config`.
    pub fn new(config: VariantConfig) -> Self {
        Self {
            detune: core::array::from_fn(|voice| AtomicI32::new(config.default_detune(voice))),
            globals: core::array::from_fn(|i| {
                AtomicI32::new(config.range(GlobalField::ALL[i]).default)
            }),
            edit_mode: AtomicUsize::new(0),
            drone_mode: AtomicBool::new(true),
            held: AtomicU32::new(0),
            revision: AtomicU32::new(0),
            writer_taken: AtomicBool::new(false),
            config,
        }
    }

    /// Claim the single write handle.
    ///
    /// Returns `None` on every call after the first.
    pub fn writer(&self) -> Option<ParamWriter<'_, N>> {
        if self.writer_taken.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ParameterStore writer already claimed");
            return None;
        }
        Some(ParamWriter::new(self))
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Number of voices in the bank.
    pub const fn voice_count(&self) -> usize {
        N
    }

    // ── Per-field reads ──────────────────────────────────────────────

    /// Detune of `voice`, or `None` if `voice >= N`.
    pub fn detune(&self, voice: usize) -> Option<i32> {
        self.detune.get(voice).map(|v| v.load(Ordering::Relaxed))
    }

    pub fn global(&self, field: GlobalField) -> i32 {
        self.globals[field.index()].load(Ordering::Relaxed)
    }

    pub fn root_note(&self) -> i32 {
        self.global(GlobalField::RootNote)
    }

    pub fn scatter(&self) -> i32 {
        self.global(GlobalField::Scatter)
    }

    pub fn filter(&self) -> i32 {
        self.global(GlobalField::Filter)
    }

    pub fn volume(&self) -> i32 {
        self.global(GlobalField::Volume)
    }

    /// Index into the configured edit-mode list.
    pub fn edit_mode_index(&self) -> usize {
        self.edit_mode.load(Ordering::Relaxed)
    }

    /// Field currently selected for unheld encoder turns.
    pub fn edit_mode(&self) -> GlobalField {
        self.config.mode_field(self.edit_mode_index())
    }

    pub fn drone_mode(&self) -> bool {
        self.drone_mode.load(Ordering::Relaxed)
    }

    pub fn held_keys(&self) -> KeyHeldSet {
        KeyHeldSet::from_bits(self.held.load(Ordering::Relaxed))
    }

    /// Write counter. Changes whenever any field changes.
    pub fn revision(&self) -> u32 {
        self.revision.load(Ordering::Acquire)
    }

    /// Copy every field into a [`ParameterSnapshot`].
    pub fn snapshot(&self) -> ParameterSnapshot<N> {
        let revision = self.revision();
        ParameterSnapshot {
            detune: core::array::from_fn(|voice| self.detune[voice].load(Ordering::Relaxed)),
            globals: core::array::from_fn(|i| self.globals[i].load(Ordering::Relaxed)),
            edit_mode: self.edit_mode(),
            drone_mode: self.drone_mode(),
            held: self.held_keys(),
            revision,
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
