pub mod commands;

use clap::{Parser, Subcommand};

use crate::store::StoreBackend;

#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "A local social feed", long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite, file or memory (overrides the config file)
    #[arg(short, long, global = true, value_parser = parse_backend)]
    pub backend: Option<StoreBackend>,

    /// Database or JSON file to use (overrides the config file)
    #[arg(short, long, global = true)]
    pub path: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the feed, newest first
    List,
    /// Publish a new post
    Add {
        /// Text of the post
        content: String,
    },
    /// Replace the text of an existing post
    Edit {
        /// Id of the post to edit
        id: i64,
        /// New text
        content: String,
    },
    /// Like a post, or take the like back
    Like {
        /// Id of the post
        id: i64,
    },
    /// Share a post
    Share {
        /// Id of the post
        id: i64,
    },
    /// Delete a post
    Remove {
        /// Id of the post
        id: i64,
    },
    /// Print a post's video link
    Open {
        /// Id of the post
        id: i64,
    },
}

fn parse_backend(s: &str) -> Result<StoreBackend, String> {
    s.parse().map_err(|e: crate::app::MurmurError| e.to_string())
}
