use thiserror::Error;

#[derive(Error, Debug)]
pub enum MurmurError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Post not found: {0}")]
    NotFound(i64),

    #[error("Change notification channel closed")]
    ChannelClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MurmurError {
    /// Failures raised by a storage engine rather than by the caller's input.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            MurmurError::Database(_)
                | MurmurError::Migration(_)
                | MurmurError::Io(_)
                | MurmurError::Serialization(_)
                | MurmurError::Storage(_)
        )
    }
}

impl<T> From<std::sync::PoisonError<T>> for MurmurError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MurmurError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MurmurError>;
