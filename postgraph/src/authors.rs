use std::collections::{BTreeSet, HashMap};

use tracing::instrument;

use crate::api_client::FetchClient;
use crate::error::PipelineError;
use crate::fanout::gather_ordered;
use crate::models::{Author, AuthorId, PostWithComments};

/// Authors keyed by id. Built once per run, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorIndex {
    authors: HashMap<AuthorId, Author>,
}

impl AuthorIndex {
    pub fn get(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(&id)
    }

    /// Like [`AuthorIndex::get`], but a miss is a consistency error.
    pub fn require(&self, id: AuthorId) -> Result<&Author, PipelineError> {
        self.get(id)
            .ok_or_else(|| PipelineError::consistency(format!("author {id} missing from index")))
    }

    pub fn contains(&self, id: AuthorId) -> bool {
        self.authors.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

impl FromIterator<Author> for AuthorIndex {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        Self {
            authors: iter.into_iter().map(|author| (author.id, author)).collect(),
        }
    }
}

/// Distinct author ids referenced by any post or comment in `data`.
pub fn referenced_author_ids(data: &[PostWithComments]) -> BTreeSet<AuthorId> {
    data.iter().flat_map(|entry| entry.author_ids()).collect()
}

/// Fetches every referenced author exactly once, concurrently.
///
/// The id set is complete before the first request goes out. Any failed
/// fetch fails the whole resolution.
#[instrument(skip_all, fields(posts = data.len()))]
pub async fn resolve_authors(
    client: &FetchClient,
    data: &[PostWithComments],
) -> Result<AuthorIndex, PipelineError> {
    let ids: Vec<AuthorId> = referenced_author_ids(data).into_iter().collect();
    tracing::debug!(distinct = ids.len(), "resolving authors");

    let client = client.clone();
    let authors = gather_ordered("authors", ids, move |id| {
        let client = client.clone();
        async move {
            let author = client.author(id).await?;
            if author.id != id {
                return Err(PipelineError::consistency(format!(
                    "requested author {id} but received author {}",
                    author.id
                )));
            }
            Ok(author)
        }
    })
    .await?;

    let index: AuthorIndex = authors.into_iter().collect();
    tracing::info!(authors = index.len(), "authors resolved");
    Ok(index)
}
