//! Scoring — clamping, accumulation, clearing, and the leader set.

use scoreboard_core::{engine::BoardEngine, rng::ShuffleRng, store::BoardStore};

fn board() -> BoardEngine {
    let store = BoardStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    BoardEngine::with_rng(store, ShuffleRng::new(7)).expect("engine")
}

/// Non-numeric and negative input both behave exactly like "0".
#[test]
fn bad_input_clamps_to_zero() {
    let mut board = board();
    board.add_player().unwrap();
    board.record_score(1, "10").unwrap();

    assert_eq!(board.record_score(1, "-5").unwrap(), Some(10));
    assert_eq!(board.record_score(1, "abc").unwrap(), Some(10));
    assert_eq!(board.record_score(1, "").unwrap(), Some(10));
    assert_eq!(board.record_score(1, "0").unwrap(), Some(10));
}

#[test]
fn scores_accumulate() {
    let mut board = board();
    board.add_player().unwrap();

    assert_eq!(board.record_score(1, "10").unwrap(), Some(10));
    assert_eq!(board.record_score(1, "5").unwrap(), Some(15));
    assert_eq!(board.cards()[0].score, 15);
}

#[test]
fn clear_zeroes_one_player_only() {
    let mut board = board();
    board.add_player().unwrap();
    board.add_player().unwrap();
    board.record_score(1, "7").unwrap();
    board.record_score(2, "9").unwrap();

    assert!(board.clear_score(1).unwrap());
    let cards = board.cards();
    assert_eq!(cards[0].score, 0);
    assert_eq!(cards[1].score, 9);
}

#[test]
fn reset_all_scores_zeroes_everyone_at_once() {
    let mut board = board();
    for _ in 0..3 {
        board.add_player().unwrap();
    }
    board.record_score(1, "4").unwrap();
    board.record_score(3, "11").unwrap();

    assert_eq!(board.reset_all_scores().unwrap(), 3);
    assert!(board.cards().iter().all(|c| c.score == 0));
    assert!(board.leaders().is_empty());
}

/// All players tied at the non-zero maximum are flagged — this is a
/// highlight set, not a single winner.
#[test]
fn leaders_flags_every_player_at_the_max() {
    let mut board = board();
    for _ in 0..3 {
        board.add_player().unwrap();
    }
    board.record_score(1, "10").unwrap();
    board.record_score(2, "10").unwrap();
    board.record_score(3, "5").unwrap();

    assert_eq!(board.leaders(), vec![1, 2]);
    let cards = board.cards();
    assert!(cards[0].leader);
    assert!(cards[1].leader);
    assert!(!cards[2].leader);
}

#[test]
fn nobody_leads_an_all_zero_board() {
    let mut board = board();
    board.add_player().unwrap();
    board.add_player().unwrap();

    assert!(board.leaders().is_empty());
    assert!(board.cards().iter().all(|c| !c.leader));
}

#[test]
fn score_operations_on_unknown_ids_are_noops() {
    let mut board = board();
    board.add_player().unwrap();

    assert_eq!(board.record_score(42, "10").unwrap(), None);
    assert!(!board.clear_score(42).unwrap());
    assert_eq!(board.cards()[0].score, 0);
}
