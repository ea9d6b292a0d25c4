//! board-runner: interactive terminal front end for the scoreboard engine.
//!
//! Usage:
//!   board-runner --db board.db
//!
//! Commands are line-oriented: `add`, `remove <id>`, `score <id> <value>`,
//! `clear <id>`, `name <id> <text>`, `reset-scores`, `sort`, `shuffle`,
//! `timer`, `reset-timer`, `show`, `help`, `quit`.
//!
//! The runner is the rendering collaborator and the periodic tick source.
//! Both stdin lines and timer ticks arrive over one channel, so the main
//! loop handles them strictly one at a time — command handling never
//! overlaps a tick.

use anyhow::Result;
use scoreboard_core::{
    clock::format_mmss, command::BoardCommand, engine::BoardEngine, event::BoardEvent,
    store::BoardStore,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

enum Input {
    Line(String),
    Tick,
    Eof,
}

/// The periodic tick source. At most one ticker is ever live: starting the
/// timer creates one, stopping it trips the stop token. A tick that was
/// already queued when the token tripped is discarded by the engine's own
/// running check.
struct Ticker {
    stop: Arc<AtomicBool>,
}

impl Ticker {
    fn start(tx: mpsc::Sender<Input>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let token = stop.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            if token.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(Input::Tick).is_err() {
                break;
            }
        });
        Self { stop }
    }

    fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("board.db");

    println!("Scoreboard — board-runner");
    println!("  started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("  db:      {db}");
    println!();

    let store = BoardStore::open(db)?;
    store.migrate()?;
    let mut engine = BoardEngine::new(store)?;

    render(&engine);
    print_help();

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());

    let mut ticker: Option<Ticker> = None;
    let mut awaiting_reset_confirm = false;
    prompt()?;

    while let Ok(input) = rx.recv() {
        match input {
            Input::Eof => break,
            Input::Tick => {
                // Engine discards the tick if the timer stopped meanwhile.
                if let Some(elapsed) = engine.tick()? {
                    print!("\r  timer {}  ", format_mmss(elapsed));
                    io::stdout().flush()?;
                }
            }
            Input::Line(line) => {
                let line = line.trim().to_string();

                if awaiting_reset_confirm {
                    awaiting_reset_confirm = false;
                    if line.eq_ignore_ascii_case("y") {
                        dispatch(&mut engine, BoardCommand::ResetAllScores, &tx, &mut ticker)?;
                        render(&engine);
                    } else {
                        println!("  reset cancelled");
                    }
                    prompt()?;
                    continue;
                }

                match parse_line(&line) {
                    Action::Quit => break,
                    Action::Nothing => {}
                    Action::Help => print_help(),
                    Action::Show => render(&engine),
                    Action::ConfirmReset => {
                        print!("Reset all scores to 0? [y/N] ");
                        io::stdout().flush()?;
                        awaiting_reset_confirm = true;
                        continue;
                    }
                    Action::Usage(msg) => println!("  usage: {msg}"),
                    Action::Unknown(word) => {
                        println!("  unknown command: {word} (try `help`)");
                    }
                    Action::Cmd(cmd) => {
                        let changed = dispatch(&mut engine, cmd, &tx, &mut ticker)?;
                        if changed {
                            render(&engine);
                        }
                    }
                }
                prompt()?;
            }
        }
    }

    if let Some(t) = ticker.take() {
        t.stop();
    }
    println!();
    println!("bye");
    Ok(())
}

/// Apply one command and react to its events: manage the ticker on timer
/// start/stop, report no-ops. Returns whether anything changed.
fn dispatch(
    engine: &mut BoardEngine,
    cmd: BoardCommand,
    tx: &mpsc::Sender<Input>,
    ticker: &mut Option<Ticker>,
) -> Result<bool> {
    let events = engine.apply(cmd)?;
    if events.is_empty() {
        println!("  nothing to do (no such player?)");
        return Ok(false);
    }

    for event in &events {
        log::debug!(
            "{} {}",
            event.type_name(),
            serde_json::to_string(event).unwrap_or_default()
        );
        match event {
            BoardEvent::TimerStarted { .. } => {
                // Replace, never stack: the previous ticker (if any) is
                // stopped before a new one is spawned.
                if let Some(old) = ticker.take() {
                    old.stop();
                }
                *ticker = Some(Ticker::start(tx.clone()));
                println!("  timer running");
            }
            BoardEvent::TimerStopped { elapsed } => {
                if let Some(old) = ticker.take() {
                    old.stop();
                }
                println!("  timer paused at {}", format_mmss(*elapsed));
            }
            BoardEvent::TimerReset => {
                if let Some(old) = ticker.take() {
                    old.stop();
                }
            }
            BoardEvent::PlayerAdded { id, name } => println!("  added {name} (#{id})"),
            BoardEvent::PlayerRemoved { id } => println!("  removed #{id}"),
            BoardEvent::ScoresReset { players } => println!("  reset {players} players to 0"),
            _ => {}
        }
    }
    Ok(true)
}

enum Action {
    Cmd(BoardCommand),
    ConfirmReset,
    Show,
    Help,
    Quit,
    Nothing,
    Usage(&'static str),
    Unknown(String),
}

fn parse_line(line: &str) -> Action {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Action::Nothing;
    };

    match verb {
        "add" => Action::Cmd(BoardCommand::AddPlayer),
        "remove" => match words.next().and_then(|w| w.parse().ok()) {
            Some(id) => Action::Cmd(BoardCommand::RemovePlayer { id }),
            None => Action::Usage("remove <id>"),
        },
        "score" => {
            let id = words.next().and_then(|w| w.parse().ok());
            let raw = words.next();
            match (id, raw) {
                (Some(id), Some(raw)) => Action::Cmd(BoardCommand::RecordScore {
                    id,
                    raw: raw.to_string(),
                }),
                _ => Action::Usage("score <id> <value>"),
            }
        }
        "clear" => match words.next().and_then(|w| w.parse().ok()) {
            Some(id) => Action::Cmd(BoardCommand::ClearScore { id }),
            None => Action::Usage("clear <id>"),
        },
        "name" => match words.next().and_then(|w| w.parse().ok()) {
            Some(id) => Action::Cmd(BoardCommand::RenamePlayer {
                id,
                raw: words.collect::<Vec<_>>().join(" "),
            }),
            None => Action::Usage("name <id> <text>"),
        },
        "reset-scores" => Action::ConfirmReset,
        "sort" => Action::Cmd(BoardCommand::SortDescending),
        "shuffle" => Action::Cmd(BoardCommand::Shuffle),
        "timer" => Action::Cmd(BoardCommand::ToggleTimer),
        "reset-timer" => Action::Cmd(BoardCommand::ResetTimer),
        "show" => Action::Show,
        "help" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => Action::Unknown(other.to_string()),
    }
}

fn render(engine: &BoardEngine) {
    let cards = engine.cards();
    println!("=== SCOREBOARD ===");
    if cards.is_empty() {
        println!("  (no players — `add` to start)");
    }
    for card in &cards {
        let mark = if card.leader { "*" } else { " " };
        println!("  {mark} #{:<3} {:<20} {}", card.id, card.name, card.score);
    }
    let timer = engine.timer();
    let state = if timer.running { "running" } else { "paused" };
    println!("  timer {} [{state}]", format_mmss(timer.elapsed));
}

fn print_help() {
    println!("commands:");
    println!("  add                 new player with a default name");
    println!("  remove <id>         drop a player (score goes with it)");
    println!("  score <id> <value>  add points (bad or negative input counts as 0)");
    println!("  clear <id>          set one player's score to 0");
    println!("  name <id> <text>    rename (empty falls back to the default)");
    println!("  reset-scores        zero everyone, after confirmation");
    println!("  sort                order by score, high to low");
    println!("  shuffle             random order");
    println!("  timer               start/pause the match timer");
    println!("  reset-timer         stop and zero the timer");
    println!("  show                reprint the board");
    println!("  quit");
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(Input::Line(l)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = tx.send(Input::Eof);
    });
}
