use std::collections::HashSet;

use battleship_tournament::pairing_for_round;
use proptest::prelude::*;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{}", i)).collect()
}

/// Unordered view of a round: each pair with its names sorted.
fn as_set(pairs: &[(String, String)]) -> HashSet<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| {
            if a <= b {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            }
        })
        .collect()
}

#[test]
fn five_players_first_two_rounds_are_disjoint() {
    let players = names(5);
    let round_1 = pairing_for_round(&players, 1);
    let round_2 = pairing_for_round(&players, 2);
    assert_eq!(round_1.len(), 2);
    assert_eq!(round_2.len(), 2);
    assert!(as_set(&round_1).is_disjoint(&as_set(&round_2)));
}

#[test]
fn single_player_has_no_pairing() {
    assert!(pairing_for_round(&names(1), 1).is_empty());
    assert!(pairing_for_round(&names(1), 0).is_empty());
}

#[test]
fn exhausted_rounds_have_no_pairing() {
    assert!(pairing_for_round(&names(2), 2).is_empty());
    assert!(pairing_for_round(&names(6), 6).is_empty());
    assert!(pairing_for_round::<String>(&[], 0).is_empty());
}

#[test]
fn two_players_meet_in_round_one() {
    let players = names(2);
    assert_eq!(
        pairing_for_round(&players, 1),
        vec![("p0".to_string(), "p1".to_string())]
    );
}

#[test]
fn four_players_meet_everyone_over_a_full_cycle() {
    let players = names(4);
    let mut met = HashSet::new();
    for round in 0..3 {
        for (a, b) in pairing_for_round(&players, round) {
            let key = if a < b { (a, b) } else { (b, a) };
            assert!(met.insert(key), "pair repeated in round {}", round);
        }
    }
    assert_eq!(met.len(), 6);
}

#[test]
fn odd_count_sits_one_player_out() {
    let players = names(7);
    for round in 0..7 {
        let pairs = pairing_for_round(&players, round);
        assert_eq!(pairs.len(), 3);
        let seated: HashSet<&String> = pairs.iter().flat_map(|(a, b)| [a, b]).collect();
        assert_eq!(seated.len(), 6);
        // The first entry never rotates, so it never sits out.
        assert!(seated.contains(&players[0]));
    }
}

proptest! {
    #[test]
    fn every_player_plays_at_most_once_per_round(n in 0usize..24, round in 0usize..30) {
        let players = names(n);
        let pairs = pairing_for_round(&players, round);
        let mut seen = HashSet::new();
        for (a, b) in &pairs {
            prop_assert_ne!(a, b);
            prop_assert!(seen.insert(a.clone()));
            prop_assert!(seen.insert(b.clone()));
        }
        if round < n {
            prop_assert_eq!(pairs.len(), n / 2);
        } else {
            prop_assert!(pairs.is_empty());
        }
    }

    #[test]
    fn pairing_is_deterministic(n in 0usize..16, round in 0usize..16) {
        let players = names(n);
        prop_assert_eq!(pairing_for_round(&players, round), pairing_for_round(&players, round));
    }
}
