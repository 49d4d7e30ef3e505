//! A fixed-capacity append-only log with oldest-first eviction.
//!
//! [`BoundedLog`] keeps entries in insertion order while never holding more
//! than the caller-provided capacity. Appending to a full log discards the
//! oldest entry first, so after any sequence of appends the log contains
//! the most recent `capacity` entries in their original order. Entries are
//! never mutated or removed individually.
//!
//! # Complexity
//! - `append`, `len`, `is_empty`, `capacity` are **O(1)**; `iter` and
//!   `snapshot` are linear in the stored length.
//!
//! # Thread Safety
//! - `BoundedLog<T>` has no interior mutability; wrap it in a mutex when
//!   concurrent writers append.

use std::collections::VecDeque;

/// A fixed-capacity append-only sequence that evicts its oldest entry when
/// a new entry is appended at capacity.
///
/// # Examples
///
/// ```rust
/// use noticeboard_common::collections::BoundedLog;
///
/// let mut log = BoundedLog::new(2);
/// log.append("a");
/// log.append("b");
/// log.append("c"); // evicts "a"
///
/// assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    /// Creates an empty log with the provided capacity.
    ///
    /// A capacity of zero is clamped to `1` so the log always holds at
    /// least the latest entry.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Appends an entry, evicting the oldest entry when full.
    pub fn append(&mut self, entry: T) {
        if self.entries.len() >= self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries the log can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries, leaving the capacity unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator visiting entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Returns a copy of the stored entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }

    /// Returns a copy of the most recent `limit` entries, oldest first.
    #[must_use]
    pub fn tail(&self, limit: usize) -> Vec<T> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::BoundedLog;

    #[test]
    fn append_evicts_oldest_first() {
        let mut log = BoundedLog::new(3);
        for value in 0..5 {
            log.append(value);
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn retains_most_recent_capacity_entries_in_order() {
        let mut log = BoundedLog::new(10);
        for value in 0..100 {
            log.append(value);
        }

        assert_eq!(log.len(), log.capacity());
        assert_eq!(log.snapshot(), (90..100).collect::<Vec<_>>());
    }

    #[test]
    fn tail_keeps_insertion_order() {
        let mut log = BoundedLog::new(5);
        for value in ["a", "b", "c", "d"] {
            log.append(value);
        }

        assert_eq!(log.tail(2), vec!["c", "d"]);
        assert_eq!(log.tail(10), vec!["a", "b", "c", "d"]);
        assert_eq!(log.tail(0), Vec::<&str>::new());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut log = BoundedLog::new(0);
        assert_eq!(log.capacity(), 1);

        log.append(1);
        log.append(2);
        assert_eq!(log.snapshot(), vec![2]);
    }

    #[test]
    fn clear_resets_length_but_retains_capacity() {
        let mut log = BoundedLog::new(4);
        log.append("x");
        log.append("y");
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.capacity(), 4);
    }
}
