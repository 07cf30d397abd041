//! Key bank scanning.
//!
//! Each key is a GPIO pulled up and shorted to ground when pressed. Raw
//! levels go through one [`Debouncer`] per key.

use embassy_rp::gpio::Input;
use macrodrone::{Debouncer, NUM_KEYS};

/// Debounced scanner over the key GPIOs.
pub struct KeyScanner {
    pins: [Input<'static>; NUM_KEYS],
    debouncers: [Debouncer; NUM_KEYS],
}

impl KeyScanner {
    pub fn new(pins: [Input<'static>; NUM_KEYS]) -> Self {
        Self {
            pins,
            debouncers: [Debouncer::default(); NUM_KEYS],
        }
    }

    /// Sample every key once and report debounced edges as
    /// `(index, pressed)`.
    pub fn scan(&mut self, mut on_edge: impl FnMut(usize, bool)) {
        for (i, (pin, debouncer)) in self.pins.iter().zip(&mut self.debouncers).enumerate() {
            if let Some(pressed) = debouncer.update(pin.is_low()) {
                on_edge(i, pressed);
            }
        }
    }
}
