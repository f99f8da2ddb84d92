use tracing::instrument;

use crate::api_client::FetchClient;
use crate::error::PipelineError;
use crate::fanout::gather_ordered;
use crate::models::{Post, PostWithComments};

/// Fetches the comments of every post concurrently and pairs them up.
///
/// Entry `i` of the result belongs to `posts[i]`. Any failed fetch fails the
/// whole call and aborts the fetches still running.
#[instrument(skip_all, fields(posts = posts.len()))]
pub async fn aggregate_comments(
    client: &FetchClient,
    posts: Vec<Post>,
) -> Result<Vec<PostWithComments>, PipelineError> {
    let client = client.clone();
    let aggregated = gather_ordered("comments", posts, move |post| {
        let client = client.clone();
        async move {
            let comments = client.comments(post.id).await?;
            tracing::debug!(post_id = post.id, comments = comments.len(), "comments fetched");
            PostWithComments::new(post, comments)
        }
    })
    .await?;

    let total: usize = aggregated.iter().map(|entry| entry.comments.len()).sum();
    tracing::info!(comments = total, "comments aggregated");
    Ok(aggregated)
}
