use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key -> JSON-string storage used by every store. Implementations must not
/// panic on missing or unreadable values; callers fall back to a default
/// state instead.
pub trait StorageBackend {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, json: &str) -> Result<()>;
}

/// Local on-disk backend: one `kv` table in a SQLite file under the user's
/// data directory.
pub struct SqliteBackend {
    conn: Connection,
    path: PathBuf,
}

impl SqliteBackend {
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path())
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir {:?}", parent))?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open state db {:?}", path))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "crewboard") {
            proj_dirs.data_dir().join("state.db")
        } else {
            PathBuf::from("crewboard-state.db")
        }
    }
}

impl StorageBackend for SqliteBackend {
    fn load(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .ok()
    }

    fn save(&self, key: &str, json: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, json],
            )
            .with_context(|| format!("Failed to persist state for {key}"))?;
        Ok(())
    }
}

/// In-memory backend for tests and round-trip checks.
#[derive(Default)]
pub struct MemoryBackend {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, json: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), json.to_string());
        Ok(())
    }
}

/// Backend for execution contexts with no persistent medium. Loads nothing,
/// drops every write, so store construction never fails.
pub struct NullBackend;

impl StorageBackend for NullBackend {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn save(&self, _key: &str, _json: &str) -> Result<()> {
        Ok(())
    }
}

/// Deserialize a persisted state blob. Missing and corrupt values both yield
/// `None`; a corrupt blob must never crash store construction.
pub fn load_state<S: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Option<S> {
    let raw = backend.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            log::warn!("Discarding corrupt state for {key}: {err}");
            None
        }
    }
}

/// Serialize the whole state and write it. Best-effort: failures are logged
/// and dropped, never surfaced to the mutation that triggered the write.
pub fn save_state<S: Serialize>(backend: &dyn StorageBackend, key: &str, state: &S) {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Failed to serialize state for {key}: {err}");
            return;
        }
    };
    if let Err(err) = backend.save(key, &json) {
        log::warn!("Failed to persist state for {key}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_round_trips() {
        let backend = MemoryBackend::new();
        backend.save("k", r#"{"a":1}"#).unwrap();
        assert_eq!(backend.load("k").as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(backend.load("missing"), None);
    }

    #[test]
    fn null_backend_loads_nothing() {
        let backend = NullBackend;
        backend.save("k", "{}").unwrap();
        assert_eq!(backend.load("k"), None);
    }

    #[test]
    fn corrupt_blob_falls_back_to_none() {
        let backend = MemoryBackend::new();
        backend.save("k", "{not json").unwrap();
        let state: Option<Vec<String>> = load_state(&backend, "k");
        assert!(state.is_none());
    }

    #[test]
    fn sqlite_backend_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open_at(dir.path().join("state.db")).unwrap();
        backend.save("k", r#"["a","b"]"#).unwrap();
        backend.save("k", r#"["c"]"#).unwrap();
        assert_eq!(backend.load("k").as_deref(), Some(r#"["c"]"#));
    }

    #[test]
    fn state_save_load_is_deep_equal() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Nested {
            items: Vec<String>,
            counts: std::collections::HashMap<String, i64>,
            flag: bool,
        }
        let backend = MemoryBackend::new();
        let state = Nested {
            items: vec!["one".into(), "two".into()],
            counts: [("a".to_string(), 1)].into_iter().collect(),
            flag: true,
        };
        save_state(&backend, "nested", &state);
        let loaded: Nested = load_state(&backend, "nested").unwrap();
        assert_eq!(loaded, state);
    }
}
