use super::RunError;
use crate::Card;

/// Sorted, deduplicated indices, all in range for a hand of `len` cards.
pub(super) fn normalize_indices(indices: &[usize], len: usize) -> Result<Vec<usize>, RunError> {
    let mut unique = indices.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.iter().any(|&idx| idx >= len) {
        return Err(RunError::InvalidSelection);
    }
    Ok(unique)
}

/// Copies the selected cards without touching the hand.
pub(super) fn pick_cards(hand: &[Card], indices: &[usize]) -> Vec<Card> {
    indices.iter().map(|&idx| hand[idx]).collect()
}

/// Removes the selected cards from the hand. `indices` must come from
/// [`normalize_indices`].
pub(super) fn take_cards(hand: &mut Vec<Card>, indices: &[usize]) -> Vec<Card> {
    let mut picked = Vec::with_capacity(indices.len());
    for &idx in indices.iter().rev() {
        picked.push(hand.remove(idx));
    }
    picked.reverse();
    picked
}
