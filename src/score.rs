use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Persistence collaborator for the best score.
///
/// A missing record loads as `0`. The session only calls `save_best_score`
/// with a value strictly greater than the one it loaded or last saved.
pub trait ScoreStore {
    fn load_best_score(&self) -> io::Result<u32>;
    fn save_best_score(&mut self, score: u32) -> io::Result<()>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn load_best_score(&self) -> io::Result<u32> {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, score: u32) -> io::Result<()> {
        (**self).save_best_score(score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Best score kept as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Uses the platform-correct score file path.
    #[must_use]
    pub fn new() -> Self {
        Self::at(scores_path())
    }

    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for JsonScoreStore {
    /// Returns `Ok(0)` when the score file does not yet exist (first run).
    /// Returns `Err` when the file exists but cannot be read or parsed.
    fn load_best_score(&self) -> io::Result<u32> {
        load_high_score_from_path(&self.path)
    }

    /// Saves high score to disk, creating parent directories when needed.
    fn save_best_score(&mut self, score: u32) -> io::Result<()> {
        save_high_score_to_path(&self.path, score)
    }
}

/// In-memory store that remembers every save; used for `--no-save` runs and tests.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryScoreStore {
    best: u32,
    saves: Vec<u32>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self {
            best,
            saves: Vec::new(),
        }
    }

    /// Every value passed to `save_best_score`, oldest first.
    #[must_use]
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> io::Result<u32> {
        Ok(self.best)
    }

    fn save_best_score(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        self.saves.push(score);
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
