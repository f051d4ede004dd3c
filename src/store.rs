//! Per-user answer history storage.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::UserStats;

/// Error reading or writing user history.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
    /// A writer panicked while holding the store lock.
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "history IO error: {}", e),
            StoreError::Serialize(e) => write!(f, "history format error: {}", e),
            StoreError::Poisoned => write!(f, "history store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialize(e) => Some(e),
            StoreError::Poisoned => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err)
    }
}

/// Stores `UserStats` per user, quiz and section.
///
/// Each call is atomic on its own; a read followed by a put is not, so
/// concurrent submissions by one user to one section can lose updates.
pub trait UserHistoryStore: Send + Sync {
    fn stats_for_section(
        &self,
        user_id: &str,
        quiz_id: &str,
        section_id: &str,
    ) -> Result<Option<UserStats>, StoreError>;

    /// All of a user's section stats for a quiz, keyed by section id.
    fn stats_for_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> Result<HashMap<String, UserStats>, StoreError>;

    fn put_stats(&self, user_id: &str, stats: &UserStats) -> Result<(), StoreError>;

    fn delete_stats_for_quiz(&self, user_id: &str, quiz_id: &str) -> Result<(), StoreError>;
}

/// user id -> quiz id -> section id -> stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct History(BTreeMap<String, BTreeMap<String, BTreeMap<String, UserStats>>>);

impl History {
    fn section(&self, user_id: &str, quiz_id: &str, section_id: &str) -> Option<UserStats> {
        self.0.get(user_id)?.get(quiz_id)?.get(section_id).cloned()
    }

    fn quiz(&self, user_id: &str, quiz_id: &str) -> HashMap<String, UserStats> {
        self.0
            .get(user_id)
            .and_then(|quizzes| quizzes.get(quiz_id))
            .map(|sections| {
                sections
                    .iter()
                    .map(|(id, stats)| (id.clone(), stats.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn put(&mut self, user_id: &str, stats: &UserStats) {
        self.0
            .entry(user_id.to_string())
            .or_default()
            .entry(stats.quiz_id.clone())
            .or_default()
            .insert(stats.section_id.clone(), stats.clone());
    }

    fn delete_quiz(&mut self, user_id: &str, quiz_id: &str) -> bool {
        let Some(quizzes) = self.0.get_mut(user_id) else {
            return false;
        };
        let removed = quizzes.remove(quiz_id).is_some();
        if quizzes.is_empty() {
            self.0.remove(user_id);
        }
        removed
    }
}

fn lock(history: &Mutex<History>) -> Result<MutexGuard<'_, History>, StoreError> {
    history.lock().map_err(|_| StoreError::Poisoned)
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    history: Mutex<History>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserHistoryStore for MemoryHistoryStore {
    fn stats_for_section(
        &self,
        user_id: &str,
        quiz_id: &str,
        section_id: &str,
    ) -> Result<Option<UserStats>, StoreError> {
        Ok(lock(&self.history)?.section(user_id, quiz_id, section_id))
    }

    fn stats_for_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> Result<HashMap<String, UserStats>, StoreError> {
        Ok(lock(&self.history)?.quiz(user_id, quiz_id))
    }

    fn put_stats(&self, user_id: &str, stats: &UserStats) -> Result<(), StoreError> {
        lock(&self.history)?.put(user_id, stats);
        Ok(())
    }

    fn delete_stats_for_quiz(&self, user_id: &str, quiz_id: &str) -> Result<(), StoreError> {
        lock(&self.history)?.delete_quiz(user_id, quiz_id);
        Ok(())
    }
}

/// Keeps everything in memory and rewrites a JSON file after every change.
/// A change that cannot be written is not applied.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    history: Mutex<History>,
}

impl FileHistoryStore {
    /// Open the history file at `path`, starting empty if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let history = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => History::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            history: Mutex::new(history),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, history: &History) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json)?;
        debug!("saved user history to {}", self.path.display());
        Ok(())
    }
}

impl UserHistoryStore for FileHistoryStore {
    fn stats_for_section(
        &self,
        user_id: &str,
        quiz_id: &str,
        section_id: &str,
    ) -> Result<Option<UserStats>, StoreError> {
        Ok(lock(&self.history)?.section(user_id, quiz_id, section_id))
    }

    fn stats_for_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> Result<HashMap<String, UserStats>, StoreError> {
        Ok(lock(&self.history)?.quiz(user_id, quiz_id))
    }

    fn put_stats(&self, user_id: &str, stats: &UserStats) -> Result<(), StoreError> {
        let mut history = lock(&self.history)?;
        let mut updated = history.clone();
        updated.put(user_id, stats);
        self.save(&updated)?;
        *history = updated;
        Ok(())
    }

    fn delete_stats_for_quiz(&self, user_id: &str, quiz_id: &str) -> Result<(), StoreError> {
        let mut history = lock(&self.history)?;
        let mut updated = history.clone();
        if updated.delete_quiz(user_id, quiz_id) {
            self.save(&updated)?;
            *history = updated;
        }
        Ok(())
    }
}
