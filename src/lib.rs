//! # Murmur
//!
//! A local, offline social feed: posts you write, like, share, edit and remove,
//! kept in an embedded store on this machine.
//!
//! ## Architecture
//!
//! ```text
//! Store → Presenter → Renderer (CLI)
//! ```
//!
//! - [`store`]: one storage contract with SQLite, JSON-file and in-memory backends
//! - [`presenter`]: live feed snapshot plus the single edit slot
//! - [`cli`]: the command-line renderer
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a post
//! murmur add "hello"
//!
//! # Show the feed
//! murmur list
//!
//! # Like it, then take the like back
//! murmur like 1
//! murmur like 1
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the configured store
/// into a [`FeedPresenter`](presenter::FeedPresenter).
pub mod app;

/// Configuration loaded from `~/.config/murmur/config.toml`.
pub mod config;

/// Command-line interface using clap.
///
/// - `list` - Show the feed
/// - `add <content>` - Publish a post
/// - `edit <id> <content>` - Change a post's text
/// - `like <id>` / `share <id>` / `remove <id>`
/// - `open <id>` - Print the post's video link
pub mod cli;

/// Core domain models.
///
/// - [`Post`](domain::Post): one feed entry with its counters
pub mod domain;

/// Feed presenter sitting between a store and a renderer.
pub mod presenter;

/// Post persistence.
///
/// - [`PostStore`](store::PostStore): Trait every backend implements
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`FileStore`](store::FileStore): JSON file implementation
/// - [`MemoryStore`](store::MemoryStore): In-process implementation
pub mod store;
