//! Match timer — ticking, toggling, resetting.

use scoreboard_core::{engine::BoardEngine, rng::ShuffleRng, store::BoardStore};

fn board() -> BoardEngine {
    let store = BoardStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    BoardEngine::with_rng(store, ShuffleRng::new(7)).expect("engine")
}

#[test]
fn three_ticks_add_three_seconds() {
    let mut board = board();
    assert!(board.toggle_timer());
    for _ in 0..3 {
        board.tick().unwrap();
    }
    assert_eq!(board.timer().elapsed, 3);
}

/// A tick that arrives after the timer stopped (already queued by the
/// periodic source) must change nothing.
#[test]
fn tick_while_paused_is_discarded() {
    let mut board = board();
    assert_eq!(board.tick().unwrap(), None);

    board.toggle_timer();
    board.tick().unwrap();
    board.toggle_timer(); // pause
    assert_eq!(board.tick().unwrap(), None);
    assert_eq!(board.timer().elapsed, 1);
}

#[test]
fn reset_stops_and_zeroes() {
    let mut board = board();
    board.toggle_timer();
    for _ in 0..5 {
        board.tick().unwrap();
    }

    board.reset_timer().unwrap();
    assert_eq!(board.timer().elapsed, 0);
    assert!(!board.timer().running);
}

#[test]
fn toggle_reports_the_new_state() {
    let mut board = board();
    assert!(board.toggle_timer());
    assert!(!board.toggle_timer());
}
