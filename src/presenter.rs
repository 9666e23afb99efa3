use tokio::sync::watch;

use crate::app::{MurmurError, Result};
use crate::domain::Post;
use crate::store::SharedStore;

/// Mediates between one post store and whatever renders the feed.
///
/// The feed is published through a `watch` channel: a new subscriber sees the
/// latest snapshot straight away, and the snapshot is re-read from the store
/// whenever the store reports a change. The presenter also owns the single
/// edit slot used by the composer.
pub struct FeedPresenter {
    store: SharedStore,
    changes: watch::Receiver<u64>,
    feed: watch::Sender<Vec<Post>>,
    edited: Post,
}

impl FeedPresenter {
    pub fn new(store: SharedStore) -> Result<Self> {
        // Subscribe before the first read so no change can slip in between.
        let changes = store.subscribe();
        let (feed, _) = watch::channel(store.get_all()?);

        Ok(Self {
            store,
            changes,
            feed,
            edited: Post::empty(),
        })
    }

    /// Live feed, newest first. The receiver holds the current snapshot.
    pub fn observe_all(&mut self) -> Result<watch::Receiver<Vec<Post>>> {
        self.refresh()?;
        Ok(self.feed.subscribe())
    }

    /// Current feed snapshot.
    pub fn posts(&self) -> Vec<Post> {
        self.feed.borrow().clone()
    }

    /// Re-reads the store if it reported a change since the last read.
    pub fn refresh(&mut self) -> Result<bool> {
        let pending = self
            .changes
            .has_changed()
            .map_err(|_| MurmurError::ChannelClosed)?;
        if pending {
            self.reload()?;
        }
        Ok(pending)
    }

    /// Waits for the next store change, then refreshes the feed.
    pub async fn changed(&mut self) -> Result<()> {
        self.changes
            .changed()
            .await
            .map_err(|_| MurmurError::ChannelClosed)?;
        self.reload()
    }

    fn reload(&mut self) -> Result<()> {
        self.changes.mark_unchanged();
        let posts = self.store.get_all()?;
        tracing::trace!("Feed refreshed with {} posts", posts.len());
        self.feed.send_replace(posts);
        Ok(())
    }

    pub fn like(&mut self, id: i64) -> Result<()> {
        self.store.like_by_id(id)?;
        self.refresh()?;
        Ok(())
    }

    pub fn share(&mut self, id: i64) -> Result<()> {
        self.store.share_by_id(id)?;
        self.refresh()?;
        Ok(())
    }

    pub fn remove(&mut self, id: i64) -> Result<()> {
        self.store.remove_by_id(id)?;
        self.refresh()?;
        Ok(())
    }

    pub fn edited(&self) -> &Post {
        &self.edited
    }

    /// Starts editing `post`, dropping any edit in progress.
    pub fn begin_edit(&mut self, post: Post) {
        tracing::debug!("Editing post {}", post.id);
        self.edited = post;
    }

    /// Replaces the draft's content with the trimmed `text`.
    ///
    /// Returns false when the trimmed text already matches.
    pub fn set_edit_content(&mut self, text: &str) -> bool {
        let text = text.trim();
        if self.edited.content == text {
            return false;
        }
        self.edited = self.edited.with_content(text);
        true
    }

    /// Saves the draft and clears the edit slot.
    pub fn commit_edit(&mut self) -> Result<Post> {
        let saved = self.store.save(&self.edited)?;
        self.edited = Post::empty();
        self.refresh()?;
        Ok(saved)
    }

    /// Saves the draft but keeps it in the edit slot.
    pub fn save_new_only(&mut self) -> Result<Post> {
        let saved = self.store.save(&self.edited)?;
        self.refresh()?;
        Ok(saved)
    }
}
