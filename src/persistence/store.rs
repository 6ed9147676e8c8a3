// ============================================================================
// Snapshot Stores
// Keyed blob storage behind a trait so sessions can live in memory or on disk
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Keyed storage for serialized snapshots.
///
/// Independent sessions (e.g. one per trading pair) use distinct keys and
/// never collide. Implementations must tolerate concurrent access.
pub trait SnapshotStore: Send + Sync {
    /// Fetch the raw snapshot for `key`, if one exists.
    fn load(&self, key: &str) -> Option<String>;

    /// Overwrite the snapshot for `key`.
    fn save(&self, key: &str, raw: &str) -> io::Result<()>;

    /// Discard the snapshot for `key`.
    fn remove(&self, key: &str);
}

// ============================================================================
// In-memory store
// ============================================================================

/// Volatile store, primarily for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn save(&self, key: &str, raw: &str) -> io::Result<()> {
        self.entries.lock().insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Keys become file names verbatim, so callers should stick to plain
/// identifier characters.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, raw: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), raw)
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load("a").is_none());

        store.save("a", "{\"x\":1}").unwrap();
        assert_eq!(store.load("a").as_deref(), Some("{\"x\":1}"));

        store.save("a", "{}").unwrap();
        assert_eq!(store.load("a").as_deref(), Some("{}"));

        store.remove("a");
        assert!(store.load("a").is_none());
    }

    #[test]
    fn test_memory_store_keys_do_not_collide() {
        let store = MemoryStore::new();
        store.save("sim_TON_USDT", "ton").unwrap();
        store.save("sim_BTC_USDT", "btc").unwrap();
        assert_eq!(store.load("sim_TON_USDT").as_deref(), Some("ton"));
        assert_eq!(store.load("sim_BTC_USDT").as_deref(), Some("btc"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.load("session").is_none());
        store.save("session", "{\"v\":1}").unwrap();
        assert_eq!(store.load("session").as_deref(), Some("{\"v\":1}"));

        store.remove("session");
        assert!(store.load("session").is_none());
        // Removing a missing key is a no-op
        store.remove("session");
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep/nested");
        let store = FileStore::new(&nested);
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").as_deref(), Some("v"));
    }
}
