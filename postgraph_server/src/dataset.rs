use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    #[serde(default)]
    pub published: i64,
    #[serde(default)]
    pub likes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    #[serde(default)]
    pub published: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Everything the API serves. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse fixture {}", path.display()))
    }

    /// Comments of `post_id` in stored order, or `None` if the post is unknown.
    pub fn comments_for(&self, post_id: i64) -> Option<Vec<CommentRecord>> {
        self.posts.iter().find(|post| post.id == post_id)?;
        Some(
            self.comments
                .iter()
                .filter(|comment| comment.post_id == post_id)
                .cloned()
                .collect(),
        )
    }

    pub fn author(&self, author_id: i64) -> Option<&AuthorRecord> {
        self.authors.iter().find(|author| author.id == author_id)
    }

    /// Small built-in feed used when no fixture is given.
    pub fn seed() -> Self {
        let post = |id, author_id, content: &str, published, likes| PostRecord {
            id,
            author_id,
            content: content.to_string(),
            published,
            likes,
        };
        let comment = |id, post_id, author_id, content: &str, published| CommentRecord {
            id,
            post_id,
            author_id,
            content: content.to_string(),
            published,
        };
        let author = |id, name: &str, avatar: &str| AuthorRecord {
            id,
            name: name.to_string(),
            avatar: Some(avatar.to_string()),
        };

        Self {
            posts: vec![
                post(1, 1, "Welcome to the feed! Posts, comments and authors are all fetched concurrently.", 1_642_188_000, 12),
                post(2, 2, "Structured concurrency keeps every fan-out joined before the next stage starts.", 1_642_274_400, 4),
                post(3, 1, "Short one.", 1_642_360_800, 0),
                post(4, 3, "Deduplicated author lookups mean each author is fetched exactly once per run.", 1_642_447_200, 7),
            ],
            comments: vec![
                comment(1, 1, 2, "Glad to be here.", 1_642_190_000),
                comment(2, 1, 3, "Does it also handle failures mid-flight?", 1_642_191_000),
                comment(3, 1, 1, "It aborts the whole stage on the first failure.", 1_642_192_000),
                comment(4, 2, 3, "Nice write-up, the join barrier per stage is the key part.", 1_642_280_000),
                comment(5, 4, 2, "Even with dozens of comments by the same person?", 1_642_450_000),
                comment(6, 4, 3, "Yes, ids are collected into a set first.", 1_642_451_000),
            ],
            authors: vec![
                author(1, "Netology", "netology.jpg"),
                author(2, "Sber", "sber.jpg"),
                author(3, "Tinkoff", "tcs.jpg"),
            ],
        }
    }
}
