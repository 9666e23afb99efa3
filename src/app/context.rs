use std::path::PathBuf;

use crate::app::error::{MurmurError, Result};
use crate::config::{Config, StoreConfig};
use crate::presenter::FeedPresenter;
use crate::store::{open_store, SharedStore, StoreBackend};

/// Wires the store chosen at startup into the presenter.
pub struct AppContext {
    pub store: SharedStore,
    pub presenter: FeedPresenter,
}

impl AppContext {
    /// Builds the context from the config file, with optional overrides
    /// for the backend and its path.
    pub fn new(backend: Option<StoreBackend>, path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load().map_err(|e| MurmurError::Config(e.to_string()))?;

        let mut store_config = config.store;
        if let Some(backend) = backend {
            if backend != store_config.backend {
                // A configured path belongs to the configured backend.
                store_config.path = None;
            }
            store_config.backend = backend;
        }
        if path.is_some() {
            store_config.path = path;
        }

        Self::from_store_config(&store_config)
    }

    pub fn from_store_config(store_config: &StoreConfig) -> Result<Self> {
        let path = store_config
            .resolved_path()
            .map_err(|e| MurmurError::Config(e.to_string()))?;
        Self::with_store(open_store(store_config.backend, path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_store(open_store(StoreBackend::Memory, None)?)
    }

    pub fn with_store(store: SharedStore) -> Result<Self> {
        let presenter = FeedPresenter::new(store.clone())?;
        Ok(Self { store, presenter })
    }
}
