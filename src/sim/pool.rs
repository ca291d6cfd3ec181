//! Fixed-capacity entity pool
//!
//! Slots live in a plain array; a bitset marks which ones are active.
//! Acquiring takes the lowest free index, which keeps spawn order
//! deterministic for a given sequence of operations.

/// Arena of `N` reusable slots (N <= 32)
#[derive(Debug, Clone)]
pub struct Pool<T, const N: usize> {
    slots: [T; N],
    active: u32,
}

impl<T: Copy + Default, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> Pool<T, N> {
    const FITS_BITSET: () = assert!(N <= 32, "pool capacity exceeds the active bitset");

    /// Pool with every slot inactive
    pub fn new() -> Self {
        let () = Self::FITS_BITSET;
        Self {
            slots: [T::default(); N],
            active: 0,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.count_ones() as usize
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        index < N && self.active & (1 << index) != 0
    }

    /// Lowest inactive index, if any
    pub fn first_free(&self) -> Option<usize> {
        let free = (!self.active).trailing_zeros() as usize;
        (free < N).then_some(free)
    }

    /// Store `value` in the first free slot and mark it active.
    ///
    /// Returns `None` without touching the pool when every slot is in use.
    pub fn acquire(&mut self, value: T) -> Option<usize> {
        let index = self.first_free()?;
        self.slots[index] = value;
        self.active |= 1 << index;
        Some(index)
    }

    /// Deactivate a slot. Returns whether it was active.
    pub fn release(&mut self, index: usize) -> bool {
        let was_active = self.is_active(index);
        if was_active {
            self.active &= !(1 << index);
        }
        was_active
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        self.active = 0;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.is_active(index).then(|| &self.slots[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_active(index) {
            Some(&mut self.slots[index])
        } else {
            None
        }
    }

    /// Active slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        let active = self.active;
        self.slots
            .iter()
            .enumerate()
            .filter(move |(i, _)| active & (1 << i) != 0)
    }

    /// Active slots in index order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        let active = self.active;
        self.slots
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| active & (1 << i) != 0)
    }

    /// Deactivate every active slot for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) -> usize {
        let mut released = 0;
        for index in 0..N {
            if self.is_active(index) && !keep(&mut self.slots[index]) {
                self.active &= !(1 << index);
                released += 1;
            }
        }
        released
    }
}
