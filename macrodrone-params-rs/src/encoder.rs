//! Encoder sampling and delta routing.
//!
//! [`EncoderSampler`] rate-limits the raw position stream and produces
//! position deltas; [`EncoderInterpreter`] scales a delta and decides where
//! it lands:
//!
//! 1. any key held → every held voice's detune,
//! 2. otherwise → the global field selected by the current edit mode.

use crate::config::GlobalField;
use crate::keys::KeyHeldSet;
use crate::parameter_store::ParamWriter;

// ── EncoderSampler ───────────────────────────────────────────────────────

/// Turns a monotonic encoder position into rate-limited deltas.
///
/// A sample is taken only when more than `interval_ms` has elapsed since
/// the previous sample. Positions seen in between are not lost: the next
/// sample's delta covers all movement since the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSampler {
    last_position: i32,
    last_sample_ms: u64,
    interval_ms: u64,
}

impl EncoderSampler {
    /// Sampler with a zero baseline position at time zero.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            last_position: 0,
            last_sample_ms: 0,
            interval_ms,
        }
    }

    /// Replace the baseline position without producing a delta.
    ///
    /// Call this with the hardware's power-on position so the first delta
    /// does not include it.
    pub fn set_baseline(&mut self, position: i32) {
        self.last_position = position;
    }

    pub fn last_position(&self) -> i32 {
        self.last_position
    }

    /// Returns `true` if a sample taken at `now_ms` would be accepted.
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_sample_ms) > self.interval_ms
    }

    /// Offer a raw position observed at `now_ms`.
    ///
    /// Returns the non-zero delta since the previous accepted sample, or
    /// `None` if the interval has not elapsed or the encoder did not move.
    ///
    /// ```
    /// use macrodrone::EncoderSampler;
    ///
    /// let mut sampler = EncoderSampler::new(20);
    /// assert_eq!(sampler.sample(3, 10), None);    // too early
    /// assert_eq!(sampler.sample(3, 21), Some(3));
    /// assert_eq!(sampler.sample(5, 30), None);    // too early
    /// assert_eq!(sampler.sample(5, 42), Some(2));
    /// ```
    pub fn sample(&mut self, raw_position: i32, now_ms: u64) -> Option<i32> {
        if !self.is_due(now_ms) {
            return None;
        }
        self.last_sample_ms = now_ms;

        let delta = raw_position.wrapping_sub(self.last_position);
        self.last_position = raw_position;

        (delta != 0).then_some(delta)
    }
}

// ── EncoderInterpreter ───────────────────────────────────────────────────

/// Where a scaled encoder adjustment was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderRoute {
    /// Delta was zero; nothing changed.
    Idle,
    /// Applied to `count` held voices.
    Voices { count: usize },
    /// Applied to a global field; `value` is the stored result.
    Global { field: GlobalField, value: i32 },
}

/// Scales encoder deltas and routes them into the parameter store.
pub struct EncoderInterpreter;

impl EncoderInterpreter {
    /// Apply a raw position delta.
    ///
    /// The delta is scaled by the config's [`EncoderResponse`] (cubic by
    /// default), then added to every held voice, or, when no key is held,
    /// to the field selected by the edit mode. Results are clamped, never
    /// rejected.
    ///
    /// [`EncoderResponse`]: crate::EncoderResponse
    pub fn apply<const N: usize>(
        writer: &ParamWriter<'_, N>,
        held: KeyHeldSet,
        delta: i32,
    ) -> EncoderRoute {
        if delta == 0 {
            return EncoderRoute::Idle;
        }

        let store = writer.store();
        let dv = store.config().response.scale(delta);

        if !held.is_empty() {
            let count = held
                .iter()
                .filter_map(|voice| writer.adjust_detune(voice, dv))
                .count();

            #[cfg(feature = "defmt")]
            defmt::debug!("encoder: delta={} dv={} voices={}", delta, dv, count);

            return EncoderRoute::Voices { count };
        }

        let field = store.edit_mode();
        let value = writer.adjust_global(field, dv);

        #[cfg(feature = "defmt")]
        defmt::debug!("encoder: delta={} dv={} {}={}", delta, dv, field.label(), value);

        EncoderRoute::Global { field, value }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
