//! Water Run entry point
//!
//! Native demo driver: runs one self-playing round in the terminal. The bot
//! and ASCII board live here on the presentation side; the engine itself has
//! no knowledge of either.

use std::io::Write;
use std::thread;

use water_run::consts::GRID_SIZE;
use water_run::sim::{Cell, Direction, GameEvent, GamePhase, ItemKind};
use water_run::{FileScoreStore, GameLifecycle, GameMode};

fn main() {
    env_logger::init();

    let mode = std::env::args()
        .nth(1)
        .map(|s| GameMode::from_str_lossy(&s))
        .unwrap_or_default();
    log::info!("Water Run (native demo), mode={}", mode.as_str());

    let store = FileScoreStore::load("water_high_score.json");
    let mut game = GameLifecycle::new(store);
    game.start(mode);

    let interval = game.tick_interval();
    while game.phase() == GamePhase::Running {
        let dir = choose_direction(&game);
        game.set_direction(dir);
        game.tick();

        render(&game);
        for event in game.drain_events() {
            match event {
                GameEvent::Feedback(msg) => println!(">> {msg}"),
                GameEvent::Milestone(Some(badge)) => println!("** {}", badge.message()),
                GameEvent::Milestone(None) => {}
                GameEvent::RoundEnded {
                    reason,
                    final_score,
                } => {
                    println!("Round over ({reason:?}), final score {final_score}");
                }
            }
        }

        thread::sleep(interval);
    }

    let snap = game.snapshot();
    println!(
        "Jerry cans: {}  People served: {}  Pollutants hit: {}  Best: {}",
        snap.jerry_cans, snap.people_served, snap.pollution_hits, snap.high_score
    );
}

/// Greedy demo bot: head toward the nearest water drop, refusing moves that
/// would crash this tick. Falls back to any survivable heading.
fn choose_direction<S: water_run::ScoreStore>(game: &GameLifecycle<S>) -> Direction {
    let snap = game.snapshot();
    let head = snap.trail[0];

    let target = snap
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Water)
        .min_by_key(|i| (i.pos.x - head.x).abs() + (i.pos.y - head.y).abs())
        .map(|i| i.pos);

    let survivable = |dir: Direction| {
        let next = head.step(dir);
        next.in_bounds() && !snap.trail.contains(&next)
    };

    let mut preferred = Vec::new();
    if let Some(target) = target {
        if target.x > head.x {
            preferred.push(Direction::Right);
        } else if target.x < head.x {
            preferred.push(Direction::Left);
        }
        if target.y > head.y {
            preferred.push(Direction::Down);
        } else if target.y < head.y {
            preferred.push(Direction::Up);
        }
    }
    preferred.push(snap.direction);
    preferred.extend([
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ]);

    preferred
        .into_iter()
        .filter(|d| *d != snap.direction.opposite())
        .find(|d| survivable(*d))
        .unwrap_or(snap.direction)
}

/// Minimal render adapter: draws the snapshot as an ASCII board
fn render<S: water_run::ScoreStore>(game: &GameLifecycle<S>) {
    let snap = game.snapshot();
    let mut out = String::with_capacity((GRID_SIZE as usize + 3) * (GRID_SIZE as usize + 2));

    out.push_str(&format!(
        "score {:>4}  cans {:>3}  served {:>4}  hits {:>2}\n",
        snap.score, snap.jerry_cans, snap.people_served, snap.pollution_hits
    ));
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let cell = Cell::new(x, y);
            let glyph = if snap.trail.first() == Some(&cell) {
                'T'
            } else if snap.trail.contains(&cell) {
                'o'
            } else {
                match snap.items.iter().find(|i| i.pos == cell).map(|i| i.kind) {
                    Some(ItemKind::Water) => 'w',
                    Some(ItemKind::Pollution) => 'x',
                    None => '.',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(out.as_bytes());
    let _ = stdout.flush();
}
