pub mod api_client;
pub mod authors;
pub mod comments;
pub mod config;
pub mod error;
mod fanout;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::{FetchClient, HttpTransport, Transport};
pub use authors::{resolve_authors, AuthorIndex};
pub use comments::aggregate_comments;
pub use config::PostgraphConfig;
pub use error::{ErrorKind, PipelineError};
pub use models::{Author, Comment, Post, PostWithComments};
pub use pipeline::Pipeline;
pub use render::RenderedView;
