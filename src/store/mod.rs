pub mod file;
pub mod memory;
pub mod sqlite;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::app::{MurmurError, Result};
use crate::domain::Post;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage contract shared by every backend.
///
/// Posts handed out are copies; changing them never touches storage.
/// Every successful mutation bumps the revision seen by [`PostStore::subscribe`].
pub trait PostStore {
    /// All posts, newest (highest id) first.
    fn get_all(&self) -> Result<Vec<Post>>;

    /// Inserts when `post.id == 0`, otherwise rewrites only `content`.
    /// Returns the row as stored after the write.
    fn save(&self, post: &Post) -> Result<Post>;

    /// Flips `likedByMe` and moves `likes` by one in the same step.
    fn like_by_id(&self, id: i64) -> Result<()>;

    fn share_by_id(&self, id: i64) -> Result<()>;

    fn remove_by_id(&self, id: i64) -> Result<()>;

    /// Receiver for the store's change revision.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Publishing half of a store's change notification.
pub struct ChangeSignal {
    tx: watch::Sender<u64>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    pub fn notify(&self) {
        self.tx.send_modify(|revision| *revision += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
    #[default]
    Sqlite,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::File => "file",
            StoreBackend::Sqlite => "sqlite",
        }
    }

    /// File name used under the data directory when no path is configured.
    pub fn default_file_name(self) -> Option<&'static str> {
        match self {
            StoreBackend::Memory => None,
            StoreBackend::File => Some("posts.json"),
            StoreBackend::Sqlite => Some("murmur.db"),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = MurmurError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(MurmurError::Config(format!(
                "Unknown store backend '{}' (expected memory, file or sqlite)",
                other
            ))),
        }
    }
}

pub type SharedStore = Arc<dyn PostStore + Send + Sync>;

/// Builds the single store instance for the process.
pub fn open_store(backend: StoreBackend, path: Option<PathBuf>) -> Result<SharedStore> {
    tracing::info!("Opening {} post store", backend);

    let store: SharedStore = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            let path = path.ok_or_else(|| MurmurError::Config("File store needs a path".into()))?;
            Arc::new(FileStore::open(path)?)
        }
        StoreBackend::Sqlite => match path {
            Some(path) => Arc::new(SqliteStore::new(path)?),
            None => Arc::new(SqliteStore::in_memory()?),
        },
    };

    Ok(store)
}
