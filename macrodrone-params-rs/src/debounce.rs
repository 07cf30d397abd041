//! Counter debounce for polled switch levels.
//!
//! The firmware polls keys and the encoder push switch at a fixed tick and
//! feeds each raw level through a [`Debouncer`]. A level change is accepted
//! only after it has been seen on `ticks` consecutive polls; any poll that
//! agrees with the current state restarts the count.

/// Default number of consecutive disagreeing polls needed to accept a new
/// level.
pub const DEBOUNCE_TICKS: u8 = 3;

/// Debounced state of one switch.
///
/// # Examples
///
/// ```
/// use macrodrone::Debouncer;
///
/// let mut button = Debouncer::new(3);
/// assert_eq!(button.update(true), None);
/// assert_eq!(button.update(true), None);
/// assert_eq!(button.update(true), Some(true));
/// assert!(button.is_pressed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    pressed: bool,
    count: u8,
    ticks: u8,
}

impl Debouncer {
    /// Released switch that needs `ticks` agreeing polls to change state.
    /// `ticks` of 0 is treated as 1.
    pub const fn new(ticks: u8) -> Self {
        Self {
            pressed: false,
            count: 0,
            ticks: if ticks == 0 { 1 } else { ticks },
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one raw poll. Returns the new state on an accepted edge.
    pub fn update(&mut self, raw_pressed: bool) -> Option<bool> {
        if raw_pressed == self.pressed {
            self.count = 0;
            return None;
        }

        self.count += 1;
        if self.count < self.ticks {
            return None;
        }

        self.count = 0;
        self.pressed = raw_pressed;
        Some(raw_pressed)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_TICKS)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(debouncer: &mut Debouncer, levels: &[bool]) -> Vec<bool> {
        levels.iter().filter_map(|&l| debouncer.update(l)).collect()
    }

    #[test]
    fn starts_released() {
        let d = Debouncer::default();
        assert!(!d.is_pressed());
    }

    #[test]
    fn single_poll_glitch_is_ignored() {
        let mut d = Debouncer::new(3);
        assert!(feed(&mut d, &[true, false, false, false]).is_empty());
        assert!(!d.is_pressed());
    }

    #[test]
    fn edge_fires_on_exactly_the_nth_poll() {
        let mut d = Debouncer::new(3);
        assert_eq!(d.update(true), None);
        assert_eq!(d.update(true), None);
        assert_eq!(d.update(true), Some(true));
        // Further agreeing polls produce nothing.
        assert_eq!(d.update(true), None);
    }

    #[test]
    fn bounce_restarts_the_count() {
        let mut d = Debouncer::new(3);
        // Two highs, a bounce low, then only two more highs: not enough.
        assert!(feed(&mut d, &[true, true, false, true, true]).is_empty());
        assert_eq!(d.update(true), Some(true));
    }

    #[test]
    fn bouncy_press_gives_one_press_edge() {
        let mut d = Debouncer::new(3);
        let edges = feed(
            &mut d,
            &[true, false, true, true, true, true, false, true, true, true],
        );
        assert_eq!(edges, vec![true]);
    }

    #[test]
    fn release_needs_the_same_confirmation() {
        let mut d = Debouncer::new(2);
        feed(&mut d, &[true, true]);
        assert!(d.is_pressed());

        assert_eq!(d.update(false), None);
        assert_eq!(d.update(false), Some(false));
        assert!(!d.is_pressed());
    }

    #[test]
    fn zero_ticks_acts_like_one() {
        let mut d = Debouncer::new(0);
        assert_eq!(d.update(true), Some(true));
        assert_eq!(d.update(false), Some(false));
    }
}
