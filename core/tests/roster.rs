//! Roster lifecycle — id allocation, removal, renaming.

use scoreboard_core::{engine::BoardEngine, rng::ShuffleRng, store::BoardStore};

fn board() -> BoardEngine {
    let store = BoardStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    BoardEngine::with_rng(store, ShuffleRng::new(7)).expect("engine")
}

#[test]
fn new_players_get_sequential_ids_and_default_names() {
    let mut board = board();
    let a = board.add_player().unwrap();
    let b = board.add_player().unwrap();

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(a.name, "Player 1");
    assert_eq!(b.name, "Player 2");
    assert_eq!(a.score, 0);
    assert_eq!(board.roster(), &[1, 2]);
}

/// Removing the highest player must not free its id: the next add still
/// allocates strictly above every id ever handed out this session.
#[test]
fn ids_are_never_reused_after_removal() {
    let mut board = board();
    for _ in 0..3 {
        board.add_player().unwrap();
    }
    assert!(board.remove_player(3).unwrap());

    let next = board.add_player().unwrap();
    assert_eq!(next.id, 4);
    assert_eq!(board.roster(), &[1, 2, 4]);
}

#[test]
fn remove_twice_equals_remove_once() {
    let mut board = board();
    board.add_player().unwrap();
    board.add_player().unwrap();

    assert!(board.remove_player(2).unwrap());
    let after_first = board.cards();

    // Second removal is a no-op, not an error.
    assert!(!board.remove_player(2).unwrap());
    assert_eq!(board.cards(), after_first);
}

#[test]
fn remove_drops_name_and_score_together() {
    let mut board = board();
    board.add_player().unwrap();
    board.record_score(1, "12").unwrap();

    board.remove_player(1).unwrap();
    assert!(board.cards().is_empty());
    assert!(board.leaders().is_empty());
}

#[test]
fn rename_trims_and_empty_falls_back_to_default() {
    let mut board = board();
    board.add_player().unwrap();

    let name = board.rename_player(1, "  Alice  ").unwrap();
    assert_eq!(name.as_deref(), Some("Alice"));

    let name = board.rename_player(1, "   ").unwrap();
    assert_eq!(name.as_deref(), Some("Player 1"));
    assert_eq!(board.cards()[0].name, "Player 1");
}

#[test]
fn rename_unknown_id_is_a_noop() {
    let mut board = board();
    assert_eq!(board.rename_player(99, "Ghost").unwrap(), None);
    assert!(board.cards().is_empty());
}
