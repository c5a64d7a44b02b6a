//! Persistence of finished sessions.

use crate::errors::{StoreError, StoreResult};
use ron::ser::PrettyConfig;
use schema::SessionRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Somewhere finished sessions are kept.
pub trait ResultStore {
    fn record(&mut self, record: SessionRecord) -> StoreResult<()>;

    /// Every stored result, best score first.
    fn results_by_score(&self) -> StoreResult<Vec<SessionRecord>>;

    fn clear(&mut self) -> StoreResult<()>;
}

fn sort_by_score(records: &mut [SessionRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Results kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    records: Vec<SessionRecord>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryResultStore {
    fn record(&mut self, record: SessionRecord) -> StoreResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn results_by_score(&self) -> StoreResult<Vec<SessionRecord>> {
        let mut records = self.records.clone();
        sort_by_score(&mut records);
        Ok(records)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.records.clear();
        Ok(())
    }
}

/// Results kept as a RON list in a single file. A missing file is an empty
/// leaderboard.
#[derive(Debug, Clone)]
pub struct RonResultStore {
    path: PathBuf,
    replace_on_insert: bool,
}

impl RonResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            replace_on_insert: false,
        }
    }

    /// When set, recording a result first drops every stored one.
    pub fn with_replace_on_insert(mut self, replace: bool) -> Self {
        self.replace_on_insert = replace;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> StoreResult<Vec<SessionRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(ron::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn write_all(&self, records: &[SessionRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let content = ron::ser::to_string_pretty(records, PrettyConfig::default())?;
        fs::write(&self.path, content).map_err(|err| self.io_error(err))
    }
}

impl ResultStore for RonResultStore {
    fn record(&mut self, record: SessionRecord) -> StoreResult<()> {
        let mut records = if self.replace_on_insert {
            Vec::new()
        } else {
            self.read_all()?
        };
        info!(
            trainer = %record.trainer_name,
            outcome = %record.outcome,
            score = record.score,
            "recording session result"
        );
        records.push(record);
        self.write_all(&records)
    }

    fn results_by_score(&self) -> StoreResult<Vec<SessionRecord>> {
        let mut records = self.read_all()?;
        sort_by_score(&mut records);
        debug!(count = records.len(), "leaderboard read");
        Ok(records)
    }

    fn clear(&mut self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::SessionOutcome;

    fn temp_store(name: &str) -> RonResultStore {
        let path = std::env::temp_dir().join(format!(
            "pokemon-duel-{}-{}.ron",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        RonResultStore::new(path)
    }

    fn sample_records() -> Vec<SessionRecord> {
        vec![
            SessionRecord::new("Ash Ketchum", SessionOutcome::Won, 5, 41),
            SessionRecord::new("Gary", SessionOutcome::Lost, 3, 12),
            SessionRecord::new("Misty", SessionOutcome::Won, 4, 57),
        ]
    }

    #[test]
    fn test_memory_store_orders_by_score() {
        let mut store = MemoryResultStore::new();
        for record in sample_records() {
            store.record(record).unwrap();
        }

        let scores: Vec<u32> = store
            .results_by_score()
            .unwrap()
            .iter()
            .map(|record| record.score)
            .collect();
        assert_eq!(scores, vec![57, 41, 12]);

        store.clear().unwrap();
        assert!(store.results_by_score().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = temp_store("missing");
        assert!(store.results_by_score().unwrap().is_empty());
    }

    #[test]
    fn test_ron_store_persists_between_instances() {
        let mut store = temp_store("persist");
        for record in sample_records() {
            store.record(record).unwrap();
        }

        let reopened = RonResultStore::new(store.path());
        let results = reopened.results_by_score().unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].trainer_name, "Misty");
        assert_eq!(results[2].outcome, SessionOutcome::Lost);

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_replace_on_insert_keeps_only_latest() {
        let mut store = temp_store("replace").with_replace_on_insert(true);
        for record in sample_records() {
            store.record(record).unwrap();
        }

        let results = store.results_by_score().unwrap();
        assert_eq!(results, vec![SessionRecord::new("Misty", SessionOutcome::Won, 4, 57)]);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupted_file() {
        let store = temp_store("corrupted");
        fs::write(store.path(), "not ron at all [").unwrap();

        assert!(matches!(store.results_by_score(), Err(StoreError::Decode(_))));
        fs::remove_file(store.path()).unwrap();
    }
}
