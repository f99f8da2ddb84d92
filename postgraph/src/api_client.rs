use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::PostgraphConfig;
use crate::error::PipelineError;
use crate::models::{Author, AuthorId, Comment, Post, PostId};

pub const POSTS_PATH: &str = "slow/posts";

pub fn comments_path(post_id: PostId) -> String {
    format!("slow/posts/{post_id}/comments")
}

pub fn author_path(author_id: AuthorId) -> String {
    format!("authors/{author_id}")
}

/// Raw GET access to the API. Implementations must be safe to call from many
/// tasks at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `path`, relative to the base URL, and returns the response body.
    async fn get(&self, path: &str) -> Result<Bytes, PipelineError>;
}

/// [`Transport`] over a shared `reqwest` connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &PostgraphConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("postgraph/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Bytes, PipelineError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| PipelineError::transport(path, err))?;
        response
            .bytes()
            .await
            .map_err(|err| PipelineError::transport(path, err))
    }
}

/// Typed access to the three resources. Cloning is cheap; clones share the
/// underlying transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(config: &PostgraphConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// One round trip for `path`, decoded into `T`. No retries.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, PipelineError> {
        let body = self.transport.get(path).await?;
        serde_json::from_slice(&body).map_err(|source| PipelineError::Decode {
            resource: path.to_string(),
            source,
        })
    }

    pub async fn posts(&self) -> Result<Vec<Post>, PipelineError> {
        self.fetch(POSTS_PATH).await
    }

    pub async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, PipelineError> {
        self.fetch(&comments_path(post_id)).await
    }

    pub async fn author(&self, author_id: AuthorId) -> Result<Author, PipelineError> {
        self.fetch(&author_path(author_id)).await
    }
}
