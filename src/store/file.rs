use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use crate::app::Result;
use crate::domain::Post;
use crate::store::memory::PostTable;
use crate::store::{ChangeSignal, PostStore};

/// Posts kept in a single JSON document, rewritten on every change.
///
/// A change is applied to a copy of the table and only becomes visible once
/// the file write succeeded, so a failed write leaves both disk and memory
/// at the previous state.
pub struct FileStore {
    path: PathBuf,
    table: Mutex<PostTable>,
    changes: ChangeSignal,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let table = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                PostTable::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            PostTable::default()
        };

        tracing::info!("Loaded {} posts from {}", table.all().len(), path.display());

        Ok(Self {
            path,
            table: Mutex::new(table),
            changes: ChangeSignal::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, PostTable>> {
        Ok(self.table.lock()?)
    }

    fn persist(&self, table: &PostTable) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(table)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Runs `change` on a copy, writes it out, then swaps it in.
    fn apply<T>(&self, change: impl FnOnce(&mut PostTable) -> Result<T>) -> Result<T> {
        let mut table = self.lock()?;
        let mut next = table.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        *table = next;
        drop(table);

        self.changes.notify();
        Ok(out)
    }
}

impl PostStore for FileStore {
    fn get_all(&self) -> Result<Vec<Post>> {
        Ok(self.lock()?.all())
    }

    fn save(&self, post: &Post) -> Result<Post> {
        let saved = self.apply(|table| table.save(post))?;
        tracing::debug!("Saved post {} to {}", saved.id, self.path.display());
        Ok(saved)
    }

    fn like_by_id(&self, id: i64) -> Result<()> {
        if !self.apply(|table| Ok(table.like(id)))? {
            tracing::debug!("Like on missing post {} ignored", id);
        }
        Ok(())
    }

    fn share_by_id(&self, id: i64) -> Result<()> {
        if !self.apply(|table| Ok(table.share(id)))? {
            tracing::debug!("Share on missing post {} ignored", id);
        }
        Ok(())
    }

    fn remove_by_id(&self, id: i64) -> Result<()> {
        let removed = self.apply(|table| Ok(table.remove(id)))?;
        tracing::debug!("Remove post {}: {}", id, removed);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
