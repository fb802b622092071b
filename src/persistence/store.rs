use crate::domain::{CompletedTimer, Timer};
use crate::persistence::atomic_write;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File name for the live timer list
pub const TIMERS_FILE: &str = "timers.json";
/// File name for the completed-timer history log
pub const HISTORY_FILE: &str = "timer_history.json";

/// Durable storage for the two engine collections
///
/// Each collection is one JSON file holding a full snapshot; every save
/// replaces the whole file atomically, so a crash leaves either the old or
/// the new snapshot, never a torn one.
#[derive(Debug, Clone)]
pub struct TimerStore {
    dir: PathBuf,
}

impl TimerStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn timers_path(&self) -> PathBuf {
        self.dir.join(TIMERS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Load the live timer list; a missing file is an empty list
    pub fn load_timers(&self) -> Result<Vec<Timer>> {
        load_collection(&self.timers_path())
    }

    /// Load the history log; a missing file is an empty list
    pub fn load_history(&self) -> Result<Vec<CompletedTimer>> {
        load_collection(&self.history_path())
    }

    /// Replace the stored timer list with a full snapshot
    pub fn save_timers(&self, timers: &[Timer]) -> Result<()> {
        save_collection(&self.timers_path(), timers)
    }

    /// Replace the stored history log with a full snapshot
    pub fn save_history(&self, history: &[CompletedTimer]) -> Result<()> {
        save_collection(&self.history_path(), history)
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let collection = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(collection)
}

fn save_collection<T: serde::Serialize>(path: &Path, collection: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateTimerInput, TimerState};
    use chrono::Local;
    use tempfile::tempdir;

    fn make_timer(name: &str, seconds: u32) -> Timer {
        Timer::new(CreateTimerInput {
            name: name.to_string(),
            seconds,
            color: "red".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_load_missing_files_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path());

        assert!(store.load_timers().unwrap().is_empty());
        assert!(store.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_timers() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path());

        let mut timer = make_timer("Tea", 300);
        timer.start();
        timer.remaining = 120;
        store.save_timers(&[timer.clone()]).unwrap();

        let loaded = store.load_timers().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, timer.id);
        assert_eq!(loaded[0].name, "Tea");
        assert_eq!(loaded[0].duration, 300);
        assert_eq!(loaded[0].remaining, 120);
        assert_eq!(loaded[0].state, TimerState::Running);
    }

    #[test]
    fn test_save_and_load_history() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path());

        let timer = make_timer("Eggs", 420);
        let snap = CompletedTimer::snapshot(&timer, Local::now());
        store.save_history(&[snap.clone()]).unwrap();

        let loaded = store.load_history().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, snap.id);
        assert_eq!(loaded[0].name, "Eggs");
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path());

        store
            .save_timers(&[make_timer("A", 60), make_timer("B", 60)])
            .unwrap();
        store.save_timers(&[make_timer("C", 60)]).unwrap();

        let loaded = store.load_timers().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "C");
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path());

        std::fs::write(store.timers_path(), "not json").unwrap();
        assert!(store.load_timers().is_err());
    }
}
