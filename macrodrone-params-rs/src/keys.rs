/// Set of currently held key indices, packed into a `u32` bitmask.
///
/// Indices 32 and above cannot be represented; [`press()`](Self::press)
/// and [`release()`](Self::release) ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyHeldSet(u32);

impl KeyHeldSet {
    /// Largest number of keys a set can track.
    pub const CAPACITY: usize = u32::BITS as usize;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn press(&mut self, index: usize) {
        if index < Self::CAPACITY {
            self.0 |= 1 << index;
        }
    }

    pub fn release(&mut self, index: usize) {
        if index < Self::CAPACITY {
            self.0 &= !(1 << index);
        }
    }

    /// Apply a key edge.
    pub fn set(&mut self, index: usize, pressed: bool) {
        if pressed {
            self.press(index);
        } else {
            self.release(index);
        }
    }

    pub fn contains(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1 << index) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Held indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..Self::CAPACITY).filter(move |&i| self.contains(i))
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let held = KeyHeldSet::default();
        assert!(held.is_empty());
        assert_eq!(held.len(), 0);
        assert_eq!(held.iter().count(), 0);
    }

    #[test]
    fn press_and_release_in_any_order() {
        let mut held = KeyHeldSet::empty();
        held.press(3);
        held.press(0);
        held.press(11);
        assert_eq!(held.len(), 3);
        assert!(held.contains(0) && held.contains(3) && held.contains(11));

        held.release(3);
        assert!(!held.contains(3));
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![0, 11]);
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut held = KeyHeldSet::empty();
        held.set(5, true);
        held.set(5, true);
        assert_eq!(held.len(), 1);

        held.set(5, false);
        held.set(5, false);
        assert!(held.is_empty());
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut held = KeyHeldSet::empty();
        held.press(32);
        held.press(1000);
        assert!(held.is_empty());
        assert!(!held.contains(32));
    }

    #[test]
    fn bits_round_trip() {
        let held = KeyHeldSet::from_bits(0b1010);
        assert_eq!(held.bits(), 0b1010);
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![1, 3]);
    }
}
