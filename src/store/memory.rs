use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::app::{MurmurError, Result};
use crate::domain::{Post, LOCAL_AUTHOR, PUBLISHED_MARKER};
use crate::store::{ChangeSignal, PostStore};

/// Rows plus the id counter. Kept newest-first so reads are a plain copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct PostTable {
    next_id: i64,
    posts: Vec<Post>,
}

impl PostTable {
    pub(crate) fn all(&self) -> Vec<Post> {
        self.posts.clone()
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn save(&mut self, post: &Post) -> Result<Post> {
        if post.is_new() {
            // Ids start at 1 and never go backwards, even after removals.
            self.next_id = self.next_id.max(self.max_id()) + 1;
            let saved = Post {
                id: self.next_id,
                author: LOCAL_AUTHOR.to_string(),
                content: post.content.clone(),
                published: PUBLISHED_MARKER.to_string(),
                ..Post::empty()
            };
            self.posts.insert(0, saved.clone());
            return Ok(saved);
        }

        let stored = self
            .find_mut(post.id)
            .ok_or(MurmurError::NotFound(post.id))?;
        stored.content = post.content.clone();
        Ok(stored.clone())
    }

    /// Returns false when no post has `id`.
    pub(crate) fn like(&mut self, id: i64) -> bool {
        match self.find_mut(id) {
            Some(post) => {
                post.likes += if post.liked_by_me { -1 } else { 1 };
                post.liked_by_me = !post.liked_by_me;
                true
            }
            None => false,
        }
    }

    pub(crate) fn share(&mut self, id: i64) -> bool {
        match self.find_mut(id) {
            Some(post) => {
                post.repost += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: i64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        self.posts.len() != before
    }

    fn max_id(&self) -> i64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0)
    }
}

/// Posts held only in process memory; every run starts empty.
pub struct MemoryStore {
    table: Mutex<PostTable>,
    changes: ChangeSignal,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(PostTable::default()),
            changes: ChangeSignal::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PostTable>> {
        Ok(self.table.lock()?)
    }
}

impl PostStore for MemoryStore {
    fn get_all(&self) -> Result<Vec<Post>> {
        Ok(self.lock()?.all())
    }

    fn save(&self, post: &Post) -> Result<Post> {
        let saved = self.lock()?.save(post)?;
        tracing::debug!("Saved post {}", saved.id);
        self.changes.notify();
        Ok(saved)
    }

    fn like_by_id(&self, id: i64) -> Result<()> {
        if !self.lock()?.like(id) {
            tracing::debug!("Like on missing post {} ignored", id);
        }
        self.changes.notify();
        Ok(())
    }

    fn share_by_id(&self, id: i64) -> Result<()> {
        if !self.lock()?.share(id) {
            tracing::debug!("Share on missing post {} ignored", id);
        }
        self.changes.notify();
        Ok(())
    }

    fn remove_by_id(&self, id: i64) -> Result<()> {
        let removed = self.lock()?.remove(id);
        tracing::debug!("Remove post {}: {}", id, removed);
        self.changes.notify();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
