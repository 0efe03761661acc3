use crate::utils::now_unix_ms;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const HISTORY_FILE: &str = "history.json";

/// Record of one submitted print request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: Uuid,
    pub text: String,
    pub date: u64,
}

impl PrintJob {
    pub fn new(text: impl Into<String>) -> Self {
        PrintJob {
            id: Uuid::new_v4(),
            text: text.into(),
            date: now_unix_ms(),
        }
    }
}

/// Persistent print-job history, newest first.
///
/// The full list lives in memory behind the handle; every mutation is
/// written back to `history.json` before it returns.
#[derive(Clone)]
pub struct HistoryStore {
    path: Arc<PathBuf>,
    jobs: Arc<Mutex<Vec<PrintJob>>>,
}

impl HistoryStore {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating history dir {}", dir.display()))?;
        let path = dir.join(HISTORY_FILE);
        let jobs = Self::load(&path);
        Ok(HistoryStore {
            path: Arc::new(path),
            jobs: Arc::new(Mutex::new(jobs)),
        })
    }

    /// Missing file means a fresh station; an unreadable one is logged and
    /// treated the same, then overwritten on the next save.
    fn load(path: &Path) -> Vec<PrintJob> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&data) {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!("ignoring unreadable history file {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn locked(&self) -> MutexGuard<'_, Vec<PrintJob>> {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the stored jobs, newest first.
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.locked().clone()
    }

    pub fn len(&self) -> usize {
        self.locked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }

    pub fn find(&self, id: Uuid) -> Option<PrintJob> {
        self.locked().iter().find(|j| j.id == id).cloned()
    }

    pub fn prepend(&self, job: PrintJob) -> Result<()> {
        let mut jobs = self.locked();
        if jobs.iter().any(|j| j.id == job.id) {
            bail!("duplicate job id {}", job.id);
        }
        jobs.insert(0, job);
        self.save(&jobs)
    }

    pub fn clear(&self) -> Result<()> {
        let mut jobs = self.locked();
        jobs.clear();
        self.save(&jobs)
    }

    fn save(&self, jobs: &[PrintJob]) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let data = serde_json::to_string_pretty(jobs)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &*self.path)?;
        Ok(())
    }
}
