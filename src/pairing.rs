//! Round-robin pairing by the circle method.

use alloc::vec::Vec;

/// Pairings for round `round` of a round-robin over `players`.
///
/// `players[0]` stays fixed while the remaining entries are rotated right by
/// `round` places; the rotated list is then split in half and the halves are
/// zipped together. With an odd player count the last entry of the second
/// half has no partner and sits the round out.
///
/// Returns an empty list once `round >= players.len()`, i.e. when every
/// round of a full round-robin has been played.
pub fn pairing_for_round<T: Clone>(players: &[T], round: usize) -> Vec<(T, T)> {
    if round >= players.len() {
        return Vec::new();
    }

    let mut order = players.to_vec();
    let tail = &mut order[1..];
    if !tail.is_empty() {
        tail.rotate_right(round % tail.len());
    }

    let (first, second) = order.split_at(order.len() / 2);
    first.iter().cloned().zip(second.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn rotation_matches_circle_method() {
        let players = ["a", "b", "c", "d"];
        // tail [b, c, d] rotated right by 1 -> [d, b, c]
        assert_eq!(pairing_for_round(&players, 1), vec![("a", "b"), ("d", "c")]);
        // rotated by 2 -> [c, d, b]
        assert_eq!(pairing_for_round(&players, 2), vec![("a", "d"), ("c", "b")]);
    }

    #[test]
    fn odd_count_leaves_last_unpaired() {
        let players = ["a", "b", "c"];
        // tail [b, c] rotated by 1 -> [c, b]; order [a, c, b]
        assert_eq!(pairing_for_round(&players, 1), vec![("a", "c")]);
    }

    #[test]
    fn round_zero_is_identity_rotation() {
        let players = [1, 2, 3, 4];
        assert_eq!(pairing_for_round(&players, 0), vec![(1, 3), (2, 4)]);
    }
}
