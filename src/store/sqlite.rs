use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};
use tokio::sync::watch;

use crate::app::{MurmurError, Result};
use crate::domain::{Post, LOCAL_AUTHOR, PUBLISHED_MARKER};
use crate::store::{ChangeSignal, PostStore};

const POST_COLUMNS: &str =
    "id, author, content, published, likedByMe, likes, repost, views, video";

pub struct SqliteStore {
    conn: Mutex<Connection>,
    changes: ChangeSignal,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            changes: ChangeSignal::new(),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations.to_latest(&mut conn)?;
        tracing::info!("Post schema is up to date");

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MurmurError::Storage(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(0)?,
            author: row.get(1)?,
            content: row.get(2)?,
            published: row.get(3)?,
            liked_by_me: row.get::<_, i32>(4)? != 0,
            likes: row.get(5)?,
            repost: row.get(6)?,
            views: row.get(7)?,
            video: row.get(8)?,
        })
    }

    fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Post>> {
        let post = conn
            .query_row(
                &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
                params![id],
                Self::map_row,
            )
            .optional()?;

        Ok(post)
    }
}

impl PostStore for SqliteStore {
    fn get_all(&self) -> Result<Vec<Post>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts ORDER BY id DESC",
            POST_COLUMNS
        ))?;

        let posts = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn save(&self, post: &Post) -> Result<Post> {
        let conn = self.lock()?;

        let id = if post.is_new() {
            conn.execute(
                "INSERT INTO posts (author, content, published) VALUES (?1, ?2, ?3)",
                params![LOCAL_AUTHOR, post.content, PUBLISHED_MARKER],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!("Inserted post {}", id);
            id
        } else {
            let changed = conn.execute(
                "UPDATE posts SET content = ?1 WHERE id = ?2",
                params![post.content, post.id],
            )?;
            tracing::debug!("Updated content of post {} ({} rows)", post.id, changed);
            post.id
        };

        let saved = Self::get_by_id(&conn, id)?.ok_or(MurmurError::NotFound(id))?;
        drop(conn);

        self.changes.notify();
        Ok(saved)
    }

    fn like_by_id(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;

        let changed = conn.execute(
            "UPDATE posts SET
                likes = likes + CASE WHEN likedByMe THEN -1 ELSE 1 END,
                likedByMe = CASE WHEN likedByMe THEN 0 ELSE 1 END
             WHERE id = ?1",
            params![id],
        )?;
        drop(conn);

        if changed == 0 {
            tracing::debug!("Like on missing post {} ignored", id);
        }
        self.changes.notify();
        Ok(())
    }

    fn share_by_id(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;

        let changed = conn.execute(
            "UPDATE posts SET repost = repost + 1 WHERE id = ?1",
            params![id],
        )?;
        drop(conn);

        if changed == 0 {
            tracing::debug!("Share on missing post {} ignored", id);
        }
        self.changes.notify();
        Ok(())
    }

    fn remove_by_id(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;

        let changed = conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        drop(conn);

        tracing::debug!("Removed post {} ({} rows)", id, changed);
        self.changes.notify();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
