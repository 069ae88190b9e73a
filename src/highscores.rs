//! High score persistence
//!
//! A single best-score integer under a fixed key. The lifecycle consults the
//! store at round end and only writes on improvement. Storage failures are
//! logged and degrade to an in-memory value; they never fail the round.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fixed storage key for the best score
pub const HIGH_SCORE_KEY: &str = "water_high_score";

/// Integer get/set store the lifecycle reads at round end
pub trait ScoreStore {
    fn get(&self) -> u32;
    fn set(&mut self, score: u32);
}

/// Record `score` if it beats the stored best. Returns true on a new record.
pub fn record_if_best<S: ScoreStore>(store: &mut S, score: u32) -> bool {
    if score > store.get() {
        store.set(score);
        true
    } else {
        false
    }
}

/// Volatile store for tests and demos
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    score: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u32 {
        self.score
    }

    fn set(&mut self, score: u32) {
        self.score = score;
    }
}

/// On-disk JSON body, e.g. `{"water_high_score":120}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(rename = "water_high_score")]
    best: u32,
}

/// JSON-file-backed store. The value is cached in memory; `set` writes
/// through immediately so a crash can lose at most the current round.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    cached: u32,
}

impl FileScoreStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<ScoreFile>(&json) {
                Ok(file) => {
                    log::info!("Loaded high score {} from {}", file.best, path.display());
                    file.best
                }
                Err(err) => {
                    log::warn!("Corrupt high score file, starting fresh: {err}");
                    0
                }
            },
            Err(_) => {
                log::info!("No high score file found, starting fresh");
                0
            }
        };
        Self { path, cached }
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self) -> u32 {
        self.cached
    }

    fn set(&mut self, score: u32) {
        self.cached = score;
        let body = ScoreFile { best: score };
        match serde_json::to_string(&body) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&self.path, json) {
                    log::warn!("Failed to write high score file: {err}");
                }
            }
            Err(err) => log::warn!("Failed to encode high score: {err}"),
        }
    }
}
