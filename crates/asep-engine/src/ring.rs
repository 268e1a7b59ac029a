//! Fixed-capacity ring buffer of statistics samples.
//!
//! The write position is monotonically increasing (never wraps); the slot
//! index is `pos % capacity`, and each slot remembers the position it was
//! written at so stale reads are detectable.

/// A tagged slot: the monotonic write position plus the stored value.
type Slot<T> = Option<(u64, T)>;

/// A fixed-capacity ring buffer that evicts its oldest entry on overflow.
#[derive(Clone, Debug)]
pub(crate) struct SampleRing<T> {
    slots: Vec<Slot<T>>,
    write_pos: u64,
    capacity: usize,
}

impl<T> SampleRing<T> {
    /// Create a ring with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`. Callers validate the window first.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(
            capacity >= 2,
            "SampleRing capacity must be >= 2, got {capacity}"
        );
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            write_pos: 0,
            capacity,
        }
    }

    /// Push a value, returning the one it evicted (if any).
    pub(crate) fn push(&mut self, value: T) -> Option<T> {
        let pos = self.write_pos;
        let idx = (pos % self.capacity as u64) as usize;
        let evicted = self.slots[idx].replace((pos, value)).map(|(_, v)| v);
        self.write_pos = pos + 1;
        evicted
    }

    /// The most recently pushed value.
    pub(crate) fn latest(&self) -> Option<&T> {
        let pos = self.write_pos.checked_sub(1)?;
        self.get_by_pos(pos)
    }

    /// The value written at monotonic position `pos`, unless evicted or
    /// not yet written.
    pub(crate) fn get_by_pos(&self, pos: u64) -> Option<&T> {
        if pos >= self.write_pos || self.write_pos - pos > self.capacity as u64 {
            return None;
        }
        let idx = (pos % self.capacity as u64) as usize;
        match &self.slots[idx] {
            Some((tag, value)) if *tag == pos => Some(value),
            _ => None,
        }
    }

    /// Stored values, oldest first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let start = self.write_pos - self.len() as u64;
        (start..self.write_pos).filter_map(move |pos| self.get_by_pos(pos))
    }

    /// Number of stored values (up to `capacity`).
    pub(crate) fn len(&self) -> usize {
        (self.write_pos as usize).min(self.capacity)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.write_pos == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every stored value and restart positions at 0.
    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.write_pos = 0;
    }
}
