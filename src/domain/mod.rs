pub mod post;

pub use post::{display_count, Post, LOCAL_AUTHOR, PUBLISHED_MARKER};
