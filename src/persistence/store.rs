use super::files::{atomic_write, backup_file, ensure_dir, read_file};
use super::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the persisted state inside the data directory
pub const STATE_FILE_NAME: &str = "state.json";

/// Where snapshots come from and go to
pub trait Persist {
    /// `Ok(None)` when nothing usable has been stored yet
    fn load(&self) -> Result<Option<Snapshot>>;

    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// In-memory store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<Snapshot>,
    pub save_count: usize,
    /// Make every save fail, to exercise error paths
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Some(snapshot),
            ..Self::default()
        }
    }
}

impl Persist for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("Memory store rejected save");
        }
        self.saved = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// Pretty-printed JSON file, replaced atomically on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persist for JsonFileStore {
    /// A file that fails to parse is backed up and treated as empty, so a
    /// corrupted save never blocks startup.
    fn load(&self) -> Result<Option<Snapshot>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            debug!(path = %self.path.display(), "No saved state");
            return Ok(None);
        }

        match serde_json::from_str(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                let backup = backup_file(&self.path)?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "Saved state is unreadable; starting fresh"
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            ensure_dir(dir)?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize state")?;
        atomic_write(&self.path, &json)?;
        debug!(path = %self.path.display(), tasks = snapshot.tasks.len(), "State saved");
        Ok(())
    }
}
