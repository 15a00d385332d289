//! Shuffle for queue randomization
//!
//! The current entry is pinned to the front and only the remaining entries
//! are permuted, so enabling shuffle never replays or interrupts the song
//! that is already playing.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `entries` keeping the entry at `pinned` (if any) first
///
/// The rest are permuted with Fisher-Yates, so every order of the remaining
/// entries is equally likely. Returns the new index of the pinned entry.
pub fn shuffle_pinned<T, R: Rng + ?Sized>(
    entries: &mut Vec<T>,
    pinned: Option<usize>,
    rng: &mut R,
) -> Option<usize> {
    match pinned.filter(|&index| index < entries.len()) {
        Some(index) => {
            let current = entries.remove(index);
            entries.shuffle(rng);
            entries.insert(0, current);
            Some(0)
        }
        None => {
            entries.shuffle(rng);
            None
        }
    }
}
