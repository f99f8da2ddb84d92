use std::time::Instant;

use tracing::instrument;

use crate::api_client::FetchClient;
use crate::authors::resolve_authors;
use crate::comments::aggregate_comments;
use crate::error::PipelineError;
use crate::render::RenderedView;

/// Fetches posts, then their comments, then the referenced authors, and
/// assembles the result. Stages run strictly one after another; only the
/// fetches inside a stage run concurrently.
#[derive(Clone)]
pub struct Pipeline {
    client: FetchClient,
}

impl Pipeline {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn run(&self) -> Result<RenderedView, PipelineError> {
        let started = Instant::now();

        let posts = self.client.posts().await?;
        tracing::info!(posts = posts.len(), "posts fetched");

        let aggregated = aggregate_comments(&self.client, posts).await?;
        let authors = resolve_authors(&self.client, &aggregated).await?;
        let view = RenderedView::assemble(&aggregated, &authors)?;

        tracing::info!(
            posts = view.posts.len(),
            comments = view.comment_count(),
            authors = authors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graph assembled"
        );
        Ok(view)
    }
}
