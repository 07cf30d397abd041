use core::sync::atomic::Ordering;

use super::store::ParameterStore;
use crate::config::GlobalField;
use crate::keys::KeyHeldSet;

/// The single write handle to a [`ParameterStore`].
///
/// Obtained once from [`ParameterStore::writer()`]. Every setter clamps to
/// the range declared by the store's config and bumps the revision counter
/// when the stored value actually changes.
pub struct ParamWriter<'a, const N: usize> {
    store: &'a ParameterStore<N>,
}

impl<'a, const N: usize> ParamWriter<'a, N> {
    pub(super) fn new(store: &'a ParameterStore<N>) -> Self {
        Self { store }
    }

    /// The store this handle writes to, for reads.
    pub fn store(&self) -> &'a ParameterStore<N> {
        self.store
    }

    // ── Voice bank ───────────────────────────────────────────────────

    /// Set the detune of `voice`, clamped to `[-max_tune, max_tune]`.
    ///
    /// Returns the stored value, or `None` if `voice >= N` (no-op).
    pub fn set_detune(&self, voice: usize, value: i32) -> Option<i32> {
        let Some(slot) = self.store.detune.get(voice) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_detune: voice {} out of bounds", voice);
            return None;
        };

        let clamped = self.store.config.clamp_detune(value);
        if slot.swap(clamped, Ordering::Relaxed) != clamped {
            self.bump();
        }
        Some(clamped)
    }

    /// Add `dv` to the detune of `voice`, clamped.
    pub fn adjust_detune(&self, voice: usize, dv: i32) -> Option<i32> {
        let current = self.store.detune(voice)?;
        self.set_detune(voice, current.saturating_add(dv))
    }

    // ── Global fields ────────────────────────────────────────────────

    /// Set a global field, clamped to its configured range. Returns the
    /// stored value.
    pub fn set_global(&self, field: GlobalField, value: i32) -> i32 {
        let clamped = self.store.config.range(field).clamp(value);
        if self.store.globals[field.index()].swap(clamped, Ordering::Relaxed) != clamped {
            self.bump();
        }
        clamped
    }

    /// Add `dv` to a global field, clamped. Returns the stored value.
    pub fn adjust_global(&self, field: GlobalField, dv: i32) -> i32 {
        let current = self.store.global(field);
        self.set_global(field, current.saturating_add(dv))
    }

    // ── Modes and flags ──────────────────────────────────────────────

    /// Select edit mode `index`, wrapped modulo the configured mode count.
    pub fn set_edit_mode(&self, index: usize) -> GlobalField {
        let wrapped = match self.store.config.mode_count() {
            0 => 0,
            n => index % n,
        };
        if self.store.edit_mode.swap(wrapped, Ordering::Relaxed) != wrapped {
            self.bump();
        }
        self.store.edit_mode()
    }

    /// Step to the next edit mode, wrapping to the first after the last.
    pub fn advance_edit_mode(&self) -> GlobalField {
        self.set_edit_mode(self.store.edit_mode_index() + 1)
    }

    pub fn set_drone_mode(&self, drone: bool) {
        if self.store.drone_mode.swap(drone, Ordering::Relaxed) != drone {
            self.bump();
        }
    }

    /// Publish the live key-held set for readers.
    pub fn set_held_keys(&self, held: KeyHeldSet) {
        if self.store.held.swap(held.bits(), Ordering::Relaxed) != held.bits() {
            self.bump();
        }
    }

    fn bump(&self) {
        self.store.revision.fetch_add(1, Ordering::Release);
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
