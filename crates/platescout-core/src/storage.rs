use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage capability injected into the favorites store.
///
/// Keeping this a trait (instead of hard-wiring a file path) lets tests run
/// against an in-memory fake and lets hosts with no durable substrate supply
/// [`NullStorage`], whose behavior the store treats identically to "nothing
/// persisted yet".
#[cfg_attr(test, mockall::automock)]
pub trait FavoritesStorage: Send + Sync {
    /// Read the full value under `key`, `None` when nothing was ever written
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Overwrite the full value under `key`
    fn write(&self, key: &str, data: &[u8]) -> io::Result<()>;
}

/// JSON-file storage under the platform data directory, one file per key
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Storage rooted at the default data directory
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn default_dir() -> crate::Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("platescout");
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl FavoritesStorage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), data)
    }
}

/// In-memory storage, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to simulate a previous session's data
    pub fn seeded(key: &str, data: &[u8]) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        storage
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, data: &[u8]) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// The documented "no substrate available" implementation: reads yield
/// nothing, writes are accepted and dropped. Callers cannot distinguish this
/// from an empty collection, which is exactly the contract.
pub struct NullStorage;

impl FavoritesStorage for NullStorage {
    fn read(&self, _key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _data: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("favorites").unwrap(), None);

        storage.write("favorites", b"[]").unwrap();
        assert_eq!(storage.read("favorites").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn null_storage_drops_writes() {
        let storage = NullStorage;
        storage.write("favorites", b"[]").unwrap();
        assert_eq!(storage.read("favorites").unwrap(), None);
    }
}
