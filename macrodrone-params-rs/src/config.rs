//! Per-deployment variant configuration.
//!
//! The firmware variants differ only in their clamp ranges, their list of
//! edit modes, and their encoder response curve. All of that lives in a
//! [`VariantConfig`] table so one state machine serves every variant:
//!
//! ```text
//! mode → (field,    min, max, default)
//!   0  → RootNote    0   120   48
//!   1  → Scatter     0    50    0
//!   2  → Filter      0   127   70      (190 on DRONESYNTH_WIDE)
//!   3  → Volume      0    15   15
//! ```

use crate::error::ConfigError;

/// Number of keys on the matrix, and therefore voices in the bank.
pub const NUM_KEYS: usize = 12;

/// A global synthesis parameter an edit mode can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlobalField {
    RootNote,
    Scatter,
    Filter,
    Volume,
}

impl GlobalField {
    /// Number of global fields.
    pub const COUNT: usize = 4;

    /// Every field, in storage order.
    pub const ALL: [GlobalField; Self::COUNT] = [
        GlobalField::RootNote,
        GlobalField::Scatter,
        GlobalField::Filter,
        GlobalField::Volume,
    ];

    /// Storage index of this field.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short label for display and logs.
    pub const fn label(self) -> &'static str {
        match self {
            GlobalField::RootNote => "root",
            GlobalField::Scatter => "scatter",
            GlobalField::Filter => "filt",
            GlobalField::Volume => "volume",
        }
    }
}

/// Inclusive range and power-on default for one global field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldRange {
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl FieldRange {
    pub const fn new(min: i32, max: i32, default: i32) -> Self {
        Self { min, max, default }
    }

    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// How an encoder position delta is scaled before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderResponse {
    /// `delta³`: slow turns nudge, fast spins jump. Sign is preserved.
    Cubic,
    /// `delta × k`.
    Linear(i32),
}

impl EncoderResponse {
    /// Scale a raw position delta. Saturates instead of overflowing.
    ///
    /// ```
    /// use macrodrone::EncoderResponse;
    ///
    /// assert_eq!(EncoderResponse::Cubic.scale(2), 8);
    /// assert_eq!(EncoderResponse::Cubic.scale(-3), -27);
    /// assert_eq!(EncoderResponse::Linear(2).scale(-3), -6);
    /// ```
    pub fn scale(self, delta: i32) -> i32 {
        match self {
            EncoderResponse::Cubic => delta.saturating_mul(delta).saturating_mul(delta),
            EncoderResponse::Linear(k) => delta.saturating_mul(k),
        }
    }
}

/// Everything that differs between firmware variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VariantConfig {
    /// Human-readable variant name shown at boot.
    pub name: &'static str,
    /// Detune values are clamped to `[-max_tune, max_tune]`.
    pub max_tune: i32,
    /// Range table indexed by [`GlobalField::index`].
    pub fields: [FieldRange; GlobalField::COUNT],
    /// Edit modes in switch-press cycling order. The first entry is the
    /// power-on mode.
    pub edit_modes: &'static [GlobalField],
    /// Encoder delta scaling.
    pub response: EncoderResponse,
    /// An encoder sample is taken only once more than this many
    /// milliseconds have passed since the previous one.
    pub encoder_interval_ms: u64,
    /// Power-on detune of voice `i` is `detune_base + i * detune_step`.
    pub detune_base: i32,
    pub detune_step: i32,
    /// Only accept notes on this channel (0–15). `None` = omni.
    pub midi_channel: Option<u8>,
}

/// Edit-mode cycling order shared by the drone variants.
const DRONE_EDIT_MODES: [GlobalField; 4] = [
    GlobalField::RootNote,
    GlobalField::Scatter,
    GlobalField::Filter,
    GlobalField::Volume,
];

/// Drone synth: ±96 detune, filter 0–127.
pub const DRONESYNTH: VariantConfig = VariantConfig {
    name: "MPSP DRONE",
    max_tune: 96,
    fields: [
        FieldRange::new(0, 120, 48), // RootNote
        FieldRange::new(0, 50, 0),   // Scatter
        FieldRange::new(0, 127, 70), // Filter
        FieldRange::new(0, 15, 15),  // Volume
    ],
    edit_modes: &DRONE_EDIT_MODES,
    response: EncoderResponse::Cubic,
    encoder_interval_ms: 20,
    detune_base: 50,
    detune_step: 1,
    midi_channel: None,
};

/// Drone synth with the wider tuning and filter ranges: ±99 detune,
/// filter 0–190.
pub const DRONESYNTH_WIDE: VariantConfig = VariantConfig {
    name: "MPSP DRONE W",
    max_tune: 99,
    fields: [
        FieldRange::new(0, 120, 48),
        FieldRange::new(0, 50, 0),
        FieldRange::new(0, 190, 70),
        FieldRange::new(0, 15, 15),
    ],
    ..DRONESYNTH
};

impl Default for VariantConfig {
    fn default() -> Self {
        DRONESYNTH
    }
}

impl VariantConfig {
    /// Range entry for `field`.
    pub fn range(&self, field: GlobalField) -> &FieldRange {
        &self.fields[field.index()]
    }

    /// Clamp a detune value into `[-max_tune, max_tune]`.
    pub fn clamp_detune(&self, value: i32) -> i32 {
        value.clamp(-self.max_tune, self.max_tune)
    }

    /// Power-on detune for `voice`, clamped.
    pub fn default_detune(&self, voice: usize) -> i32 {
        let offset = (voice as i32).saturating_mul(self.detune_step);
        self.clamp_detune(self.detune_base.saturating_add(offset))
    }

    /// Number of edit modes the switch cycles through.
    pub fn mode_count(&self) -> usize {
        self.edit_modes.len()
    }

    /// Field selected by edit-mode index `mode`, wrapping modulo
    /// [`mode_count()`](Self::mode_count).
    ///
    /// Falls back to [`GlobalField::RootNote`] if the mode list is empty
    /// (rejected by [`validate()`](Self::validate)).
    pub fn mode_field(&self, mode: usize) -> GlobalField {
        match self.mode_count() {
            0 => GlobalField::RootNote,
            n => self.edit_modes[mode % n],
        }
    }

    /// Check the table for internal consistency.
    ///
    /// Writes clamp regardless of the result. An inconsistent table leaves
    /// some fields unreachable or stuck.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tune <= 0 {
            return Err(ConfigError::InvalidTuneRange);
        }

        for range in &self.fields {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange);
            }
            if range.default < range.min || range.default > range.max {
                return Err(ConfigError::DefaultOutOfRange);
            }
        }

        if self.edit_modes.is_empty() {
            return Err(ConfigError::NoEditModes);
        }
        for (i, field) in self.edit_modes.iter().enumerate() {
            if self.edit_modes[i + 1..].contains(field) {
                return Err(ConfigError::DuplicateEditMode);
            }
        }

        match self.midi_channel {
            Some(ch) if ch > 15 => Err(ConfigError::InvalidMidiChannel),
            _ => Ok(()),
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
