//! Shared parameter state with clamp-on-write semantics.
//!
//! [`ParameterStore`] is the one piece of state shared between the UI
//! context (key scanning, encoder, MIDI) and the audio context. It is
//! built entirely from atomics so a reader on the other core never sees a
//! torn value:
//!
//! ```text
//! detune:    [AtomicI32; N]        one per voice, read element-wise
//! globals:   [AtomicI32; 4]        root / scatter / filter / volume
//! edit_mode: AtomicUsize           index into VariantConfig::edit_modes
//! drone:     AtomicBool
//! held:      AtomicU32             KeyHeldSet bits
//! revision:  AtomicU32             bumped after every effective write
//! ```
//!
//! # Single writer
//!
//! All mutation goes through the [`ParamWriter`] returned by
//! [`ParameterStore::writer()`]. Only one writer is ever handed out, so
//! read-modify-write sequences such as "add `dv` then clamp" cannot race.
//! Readers hold a plain `&ParameterStore` and call
//! [`snapshot()`](ParameterStore::snapshot) or the per-field getters.
//!
//! Each field is individually consistent. A snapshot taken while the
//! writer is mid-update may mix old and new fields; compare
//! [`revision`](ParameterSnapshot::revision) across two snapshots to detect
//! that.

mod snapshot;
mod store;
mod writer;

pub use snapshot::ParameterSnapshot;
pub use store::ParameterStore;
pub use writer::ParamWriter;
