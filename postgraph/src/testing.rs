//! In-memory [`Transport`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::api_client::{author_path, comments_path, Transport, POSTS_PATH};
use crate::error::PipelineError;
use crate::models::{Author, Comment, Post};

enum Reply {
    Body(Bytes),
    Fail(String),
}

/// Serves canned bodies by path and records every request it receives.
/// Unknown paths fail like a 404 would.
#[derive(Default)]
pub(crate) struct StubTransport {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    /// Stub serving `posts`, the comments of each post and `authors`.
    pub(crate) fn with_graph(posts: &[Post], comments: &[Comment], authors: &[Author]) -> Self {
        let mut stub = Self::default().json(POSTS_PATH, serde_json::to_value(posts).expect("posts"));
        for post in posts {
            let own: Vec<&Comment> = comments.iter().filter(|c| c.post_id == post.id).collect();
            stub = stub.json(
                &comments_path(post.id),
                serde_json::to_value(own).expect("comments"),
            );
        }
        for author in authors {
            stub = stub.json(
                &author_path(author.id),
                serde_json::to_value(author).expect("author"),
            );
        }
        stub
    }

    pub(crate) fn json(self, path: &str, body: Value) -> Self {
        self.raw(path, &body.to_string())
    }

    pub(crate) fn raw(mut self, path: &str, body: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Body(Bytes::from(body.to_string())));
        self
    }

    pub(crate) fn fail(mut self, path: &str, reason: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Fail(reason.to_string()));
        self
    }

    pub(crate) fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn calls_with_prefix(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|path| path.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, path: &str) -> Result<Bytes, PipelineError> {
        self.calls.lock().expect("calls lock").push(path.to_string());
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(path) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail(reason)) => Err(PipelineError::transport(path, reason.clone())),
            None => Err(PipelineError::transport(path, "404 Not Found")),
        }
    }
}

pub(crate) fn post(id: i64, author_id: i64, content: &str) -> Post {
    Post {
        id,
        author_id,
        content: content.to_string(),
    }
}

pub(crate) fn comment(id: i64, post_id: i64, author_id: i64, content: &str) -> Comment {
    Comment {
        id,
        post_id,
        author_id,
        content: content.to_string(),
    }
}

pub(crate) fn author(id: i64, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
    }
}
