use crate::config::{GlobalField, NUM_KEYS};
use crate::keys::KeyHeldSet;

/// Plain-value copy of the store for renderers and the audio engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterSnapshot<const N: usize = NUM_KEYS> {
    /// Per-voice detune, indexed by key number.
    pub detune: [i32; N],
    /// Global fields indexed by [`GlobalField::index`].
    pub globals: [i32; GlobalField::COUNT],
    /// Field the encoder edits when no key is held.
    pub edit_mode: GlobalField,
    /// `true` while the root note is under encoder control.
    pub drone_mode: bool,
    /// Keys held at snapshot time, for voice highlighting.
    pub held: KeyHeldSet,
    /// Store revision this snapshot was taken at.
    pub revision: u32,
}

impl<const N: usize> ParameterSnapshot<N> {
    pub fn global(&self, field: GlobalField) -> i32 {
        self.globals[field.index()]
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

    /// Returns `true` if `voice` is currently selected by a held key.
    pub fn is_held(&self, voice: usize) -> bool {
        self.held.contains(voice)
    }
}
