use std::fmt;
use thiserror::Error;
use tokio::task::JoinError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`PipelineError`], stable for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Decode,
    Consistency,
    Task,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Consistency => "consistency",
            ErrorKind::Task => "task",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Connectivity failure, timeout or non-success status.
    #[error("transport error fetching {resource}")]
    Transport {
        resource: String,
        #[source]
        source: BoxError,
    },

    /// The body did not match the expected shape.
    #[error("failed to decode {resource}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// Fetched data contradicts itself, e.g. an author id missing from the index.
    #[error("consistency error: {0}")]
    Consistency(String),

    /// A fetch task panicked or was cancelled by the runtime.
    #[error("fetch task failed")]
    Task(#[from] JoinError),
}

impl PipelineError {
    pub fn transport(resource: impl Into<String>, source: impl Into<BoxError>) -> Self {
        PipelineError::Transport {
            resource: resource.into(),
            source: source.into(),
        }
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        PipelineError::Consistency(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Transport { .. } => ErrorKind::Transport,
            PipelineError::Decode { .. } => ErrorKind::Decode,
            PipelineError::Consistency(_) => ErrorKind::Consistency,
            PipelineError::Task(_) => ErrorKind::Task,
        }
    }
}
