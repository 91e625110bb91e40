//! Shuffle index selection

use rand::Rng;

/// Pick the next queue index under shuffle
///
/// Uniform over `[0, len)`. When the pick lands on the current index and an
/// alternative exists, advances to the following index instead, so the same
/// track never plays twice in immediate succession. Always in bounds.
pub fn next_shuffle_index(rng: &mut impl Rng, len: usize, current: Option<usize>) -> usize {
    debug_assert!(len > 0);
    let pick = rng.gen_range(0..len);
    match current {
        Some(index) if len > 1 && pick == index => (index + 1) % len,
        _ => pick,
    }
}
