//! Play queue
//!
//! A single ordered list with a current index, plus a snapshot of the
//! unshuffled order:
//!
//! ```text
//! entries (play order):   C  A  E  B  D     index = 0 (C playing)
//! original (unshuffled):  A  B  C  D  E
//! ```
//!
//! Both lists always hold the same entries. Adds and removals touch both;
//! shuffling only reorders `entries`.

use crate::shuffle::shuffle_pinned;
use crate::types::{EntryId, QueueEntry};
use cadence_core::Song;
use rand::Rng;

/// Result of a successful [`Queue::remove`]
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// The removed entry
    pub entry: QueueEntry,

    /// Whether the removed entry was the current one
    pub was_current: bool,
}

/// Play queue with shuffle restore support
///
/// Invariant: `index` is `None` or a valid position in `entries`; an empty
/// queue always has `index == None`.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Entries in play order
    entries: Vec<QueueEntry>,

    /// Entries in unshuffled order
    original: Vec<QueueEntry>,

    /// Current position in `entries`
    index: Option<usize>,

    /// Next slot identity to hand out
    next_entry_id: u64,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    fn make_entry(&mut self, song: Song) -> QueueEntry {
        let id = EntryId::new(self.next_entry_id);
        self.next_entry_id += 1;
        QueueEntry::new(id, song)
    }

    /// Replace the whole queue and select `index`
    ///
    /// `index` is clamped into range; an empty `songs` leaves the queue
    /// cleared.
    pub fn replace(&mut self, songs: Vec<Song>, index: usize) {
        let entries: Vec<QueueEntry> = songs.into_iter().map(|s| self.make_entry(s)).collect();
        self.original.clone_from(&entries);
        self.index = if entries.is_empty() {
            None
        } else {
            Some(index.min(entries.len() - 1))
        };
        self.entries = entries;
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.entries.clear();
        self.original.clear();
        self.index = None;
    }

    /// Append a song to the end of the queue
    ///
    /// Selects the first entry if nothing was selected. Returns `true` when
    /// the queue was empty before the call.
    pub fn push(&mut self, song: Song) -> bool {
        let was_empty = self.entries.is_empty();
        let entry = self.make_entry(song);

        self.original.push(entry.clone());
        self.entries.push(entry);

        if self.index.is_none() {
            self.index = Some(0);
        }

        was_empty
    }

    /// Insert a song right after the current entry
    ///
    /// Does not move the current index. In the unshuffled order the song
    /// goes to the end.
    pub fn insert_next(&mut self, song: Song) {
        let entry = self.make_entry(song);
        let position = self.index.map_or(0, |index| index + 1);

        self.original.push(entry.clone());
        self.entries.insert(position, entry);
    }

    /// Remove the entry at `index`
    ///
    /// Refuses (returns `None`) when the queue has one entry or less, or when
    /// `index` is out of range.
    ///
    /// Index adjustment:
    /// - removing the current entry keeps the same numeric index if still in
    ///   range, otherwise wraps to 0
    /// - removing before the current entry shifts the index down by one
    /// - removing after it leaves the index alone
    pub fn remove(&mut self, index: usize) -> Option<Removal> {
        if self.entries.len() <= 1 || index >= self.entries.len() {
            return None;
        }

        let entry = self.entries.remove(index);

        // Also remove from original (to maintain consistency)
        if let Some(pos) = self.original.iter().position(|e| e.id() == entry.id()) {
            self.original.remove(pos);
        }

        let was_current = match self.index {
            Some(current) if current == index => {
                self.index = Some(if index < self.entries.len() { index } else { 0 });
                true
            }
            Some(current) if index < current => {
                self.index = Some(current - 1);
                false
            }
            _ => false,
        };

        Some(Removal { entry, was_current })
    }

    /// Select entry at `index`
    ///
    /// Returns `false` (and changes nothing) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.index = Some(index);
        true
    }

    /// Shuffle the queue with the current entry pinned first
    ///
    /// The unshuffled order is left untouched.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.index = shuffle_pinned(&mut self.entries, self.index, rng);
    }

    /// Restore the unshuffled order
    ///
    /// The current entry keeps being current; if it cannot be found the first
    /// entry is selected.
    pub fn restore_original_order(&mut self) {
        let current = self.current().map(QueueEntry::id);
        self.entries.clone_from(&self.original);

        self.index = if self.entries.is_empty() {
            None
        } else {
            let found = current.and_then(|id| self.entries.iter().position(|e| e.id() == id));
            Some(found.unwrap_or(0))
        };
    }

    /// Currently selected entry
    pub fn current(&self) -> Option<&QueueEntry> {
        self.index.and_then(|index| self.entries.get(index))
    }

    /// Current index
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Get entry at index
    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    /// Entries in play order
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Entries in unshuffled order
    pub fn original(&self) -> &[QueueEntry] {
        &self.original
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
