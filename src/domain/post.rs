use serde::{Deserialize, Serialize};

/// Author written on every post saved from this device.
pub const LOCAL_AUTHOR: &str = "Me";

/// Value written to `published` on insert.
pub const PUBLISHED_MARKER: &str = "now";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub published: String,
    #[serde(rename = "likedByMe")]
    pub liked_by_me: bool,
    pub likes: i64,
    pub repost: i64,
    pub views: i64,
    pub video: Option<String>,
}

impl Post {
    /// The blank draft an edit starts from: id 0, empty text, zero counters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn draft(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::empty()
        }
    }

    /// A post with id 0 has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn has_video(&self) -> bool {
        self.video.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }
}

/// Compact counter text: 999, 1.2K, 10K, 1.5M.
///
/// Values are truncated, never rounded up, so 1_099 reads as "1K".
pub fn display_count(n: i64) -> String {
    match n {
        n if n < 1_000 => n.to_string(),
        n if n < 10_000 => with_one_decimal(n / 100, "K"),
        n if n < 1_000_000 => format!("{}K", n / 1_000),
        n => with_one_decimal(n / 100_000, "M"),
    }
}

fn with_one_decimal(tenths: i64, suffix: &str) -> String {
    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac == 0 {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, frac, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_post_is_new() {
        let post = Post::empty();
        assert!(post.is_new());
        assert_eq!(post.content, "");
        assert_eq!(post.author, "");
        assert!(!post.liked_by_me);
        assert_eq!((post.likes, post.repost, post.views), (0, 0, 0));
        assert!(post.video.is_none());
    }

    #[test]
    fn test_with_content_keeps_other_fields() {
        let post = Post {
            id: 7,
            author: "Me".into(),
            content: "old".into(),
            published: "now".into(),
            liked_by_me: true,
            likes: 3,
            repost: 2,
            views: 9,
            video: Some("https://video.example/v".into()),
        };

        let edited = post.with_content("new");
        assert_eq!(edited.content, "new");
        assert_eq!(edited.with_content("old"), post);
    }

    #[test]
    fn test_has_video() {
        let mut post = Post::draft("clip");
        assert!(!post.has_video());
        post.video = Some(String::new());
        assert!(!post.has_video());
        post.video = Some("https://video.example/v".into());
        assert!(post.has_video());
    }

    #[test]
    fn test_display_count_small() {
        assert_eq!(display_count(0), "0");
        assert_eq!(display_count(999), "999");
    }

    #[test]
    fn test_display_count_thousands() {
        assert_eq!(display_count(1_000), "1K");
        assert_eq!(display_count(1_099), "1K");
        assert_eq!(display_count(1_150), "1.1K");
        assert_eq!(display_count(9_999), "9.9K");
        assert_eq!(display_count(10_000), "10K");
        assert_eq!(display_count(999_999), "999K");
    }

    #[test]
    fn test_display_count_millions() {
        assert_eq!(display_count(1_000_000), "1M");
        assert_eq!(display_count(1_250_000), "1.2M");
        assert_eq!(display_count(12_300_000), "12.3M");
    }

    #[test]
    fn test_json_uses_liked_by_me_column_name() {
        let json = serde_json::to_string(&Post::draft("hi")).unwrap();
        assert!(json.contains("\"likedByMe\":false"));
    }
}
