/// Reasons a [`VariantConfig`](crate::VariantConfig) is rejected by
/// [`validate()`](crate::VariantConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max_tune` must be strictly positive.
    InvalidTuneRange,
    /// A field range has `min > max`.
    InvertedRange,
    /// A field default lies outside its own `[min, max]`.
    DefaultOutOfRange,
    /// The edit-mode list is empty.
    NoEditModes,
    /// The same field appears twice in the edit-mode list.
    DuplicateEditMode,
    /// MIDI channel filter is outside 0–15.
    InvalidMidiChannel,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let msg = match self {
            ConfigError::InvalidTuneRange => "max_tune must be positive",
            ConfigError::InvertedRange => "field range has min > max",
            ConfigError::DefaultOutOfRange => "field default outside its range",
            ConfigError::NoEditModes => "edit-mode list is empty",
            ConfigError::DuplicateEditMode => "edit-mode list repeats a field",
            ConfigError::InvalidMidiChannel => "MIDI channel must be 0-15",
        };
        f.write_str(msg)
    }
}
