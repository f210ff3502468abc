// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, anyhow};
use idealog_app::{Idea, IdeaId};
use log::{debug, info, warn};
use rusqlite::{Connection, params};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const APP_NAME: &str = "idealog";

const DEMO_IDEAS: [&str; 5] = [
    "Launch a podcast about indie game design",
    "Weekly newsletter with three links and one opinion",
    "Turn customer support answers into a public FAQ",
    "Run a 30-day sketch challenge on social media",
    "Publish a teardown of our onboarding funnel",
];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid database path: {0}")]
    InvalidPath(String),
    #[error("open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("configure sqlite connection: {0}")]
    Configure(#[source] rusqlite::Error),
    #[error("create ideas table: {0}")]
    Schema(#[source] rusqlite::Error),
    #[error("insert idea: {0}")]
    Insert(#[source] rusqlite::Error),
    #[error("list ideas: {0}")]
    List(#[source] rusqlite::Error),
    #[error("database connection is unusable after an earlier panic; restart idealog")]
    Poisoned,
}

/// Owns the single long-lived SQLite connection. Every operation borrows it
/// through [`Store::with_connection`], which releases the guard on all paths.
pub struct Store {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: printable,
            source,
        })?;
        configure_connection(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".to_owned(),
            source,
        })?;
        configure_connection(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.acquire()?;
        f(&mut *guard)
    }

    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        self.with_connection(|conn| {
            conn.execute_batch(include_str!("sql/schema.sql"))
                .map_err(StorageError::Schema)
        })
    }

    pub fn insert(&self, text: &str) -> Result<IdeaId, StorageError> {
        let id = self.with_connection(|conn| {
            let tx = conn.transaction().map_err(StorageError::Insert)?;
            tx.execute("INSERT INTO ideas (text) VALUES (?)", params![text])
                .map_err(StorageError::Insert)?;
            let id = IdeaId::new(tx.last_insert_rowid());
            tx.commit().map_err(StorageError::Insert)?;
            Ok(id)
        });

        match &id {
            Ok(id) => info!("event=idea_insert status=ok id={id} chars={}", text.chars().count()),
            Err(error) => warn!("event=idea_insert status=error error={error}"),
        }
        id
    }

    pub fn list_all(&self) -> Result<Vec<Idea>, StorageError> {
        let ideas = self.with_connection(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, text FROM ideas ORDER BY id DESC")
                .map_err(StorageError::List)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Idea {
                        id: IdeaId::new(row.get(0)?),
                        text: row.get(1)?,
                    })
                })
                .map_err(StorageError::List)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(StorageError::List)
        })?;
        debug!("event=idea_list status=ok rows={}", ideas.len());
        Ok(ideas)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        self.with_connection(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM ideas", [], |row| row.get(0))
                .map_err(StorageError::List)?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
    }

    /// Fills an empty table with sample ideas for `--demo`.
    pub fn seed_demo_ideas(&self) -> Result<usize, StorageError> {
        if self.count()? > 0 {
            return Ok(0);
        }
        for text in DEMO_IDEAS {
            self.insert(text)?;
        }
        Ok(DEMO_IDEAS.len())
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

pub fn demo_ideas() -> &'static [&'static str] {
    &DEMO_IDEAS
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    if let Some(override_path) = env::var_os("IDEALOG_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set IDEALOG_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("idealog.db"))
}

pub fn validate_db_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath(
            "database path must not be empty".to_owned(),
        ));
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            return Err(StorageError::InvalidPath(format!(
                "{path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            )));
        }
    }

    if path.starts_with("file:") {
        return Err(StorageError::InvalidPath(format!(
            "{path:?} uses file: URI syntax; pass a plain filesystem path"
        )));
    }

    if path.contains('?') {
        return Err(StorageError::InvalidPath(format!(
            "{path:?} contains '?'; remove query parameters and use a plain file path"
        )));
    }

    Ok(())
}

fn configure_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(StorageError::Configure)
}
