//! Builder for creating and configuring Agenda instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::task;

use super::Agenda;
use crate::{
    clock::{Clock, SystemClock},
    db::Database,
    error::{CadenceError, IoResultExt, Result},
    persistence::{JsonFiles, MemoryPersistence, Persistence},
    store::Store,
};

#[derive(Clone)]
enum Backend {
    DefaultDatabase,
    Database(PathBuf),
    Json(PathBuf),
    Memory,
    Custom(Arc<dyn Persistence>),
}

/// Builder for creating and configuring Agenda instances.
#[derive(Clone)]
pub struct AgendaBuilder {
    backend: Backend,
    clock: Option<Arc<dyn Clock>>,
}

impl AgendaBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: Backend::DefaultDatabase,
            clock: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or
    /// `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backend = Backend::Database(path.as_ref().to_path_buf());
        }
        self
    }

    /// Stores data as JSON documents in `dir` instead of SQLite.
    pub fn with_json_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.backend = Backend::Json(dir.as_ref().to_path_buf());
        self
    }

    /// Keeps everything in memory; nothing is written to disk.
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    /// Uses a caller-supplied backend.
    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.backend = Backend::Custom(persistence);
        self
    }

    /// Replaces the system clock.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Like [`AgendaBuilder::with_clock`] for a clock the caller keeps a
    /// handle to.
    pub fn with_shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Opens the backend, loads every collection and builds the agenda.
    ///
    /// No refresh runs here; hosts call [`Agenda::refresh`] when they are
    /// ready.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::XdgDirectory` if the default data directory
    /// cannot be determined, `CadenceError::FileSystem` if a directory
    /// cannot be created and any persistence error raised while loading.
    pub async fn build(self) -> Result<Agenda> {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let backend = self.backend;

        let (persistence, snapshot) = task::spawn_blocking(move || {
            let persistence = Self::open(backend)?;
            let snapshot = persistence.load()?;
            Ok::<_, CadenceError>((persistence, snapshot))
        })
        .await
        .map_err(|e| CadenceError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!(
            "Loaded {} task(s), {} plan(s), {} history record(s)",
            snapshot.tasks.len(),
            snapshot.plans.len(),
            snapshot.history.len()
        );
        let store = Store::new(snapshot, Arc::clone(&clock));
        Ok(Agenda::new(store, persistence, clock))
    }

    fn open(backend: Backend) -> Result<Arc<dyn Persistence>> {
        let persistence: Arc<dyn Persistence> = match backend {
            Backend::DefaultDatabase => {
                Arc::new(Self::open_database(&Self::default_database_path()?)?)
            }
            Backend::Database(path) => Arc::new(Self::open_database(&path)?),
            Backend::Json(dir) => Arc::new(JsonFiles::new(dir)?),
            Backend::Memory => Arc::new(MemoryPersistence::new()),
            Backend::Custom(persistence) => persistence,
        };
        Ok(persistence)
    }

    fn open_database(path: &Path) -> Result<Database> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }
        debug!("Opening database at {}", path.display());
        Database::new(path)
    }

    /// Returns the default database path under the XDG data directory.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| CadenceError::XdgDirectory(e.to_string()))
    }
}

impl Default for AgendaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
