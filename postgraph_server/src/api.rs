use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::dataset::{AuthorRecord, CommentRecord, Dataset, PostRecord};

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    /// Artificial latency added to every `/slow/` route.
    slow_delay: Duration,
}

impl AppState {
    async fn slow_down(&self) {
        if !self.slow_delay.is_zero() {
            tokio::time::sleep(self.slow_delay).await;
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    posts: usize,
    authors: usize,
}

/// Routes: `/health`, and under `/api`: `/slow/posts`,
/// `/slow/posts/:id/comments`, `/authors/:id`.
pub fn router(dataset: Dataset, slow_delay: Duration) -> Router {
    let state = AppState {
        dataset: Arc::new(dataset),
        slow_delay,
    };

    let api = Router::new()
        .route("/slow/posts", get(list_posts))
        .route("/slow/posts/:id/comments", get(list_comments))
        .route("/authors/:id", get(get_author));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(?addr, "HTTP server listening");
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        posts: state.dataset.posts.len(),
        authors: state.dataset.authors.len(),
    })
}

async fn list_posts(State(state): State<AppState>) -> Json<Vec<PostRecord>> {
    state.slow_down().await;
    tracing::debug!(count = state.dataset.posts.len(), "serving posts");
    Json(state.dataset.posts.clone())
}

async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> ApiResult<Vec<CommentRecord>> {
    state.slow_down().await;
    let comments = state
        .dataset
        .comments_for(post_id)
        .ok_or_else(|| ApiError::NotFound(format!("post {post_id} not found")))?;
    tracing::debug!(post_id, count = comments.len(), "serving comments");
    Ok(Json(comments))
}

async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> ApiResult<AuthorRecord> {
    state
        .dataset
        .author(author_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("author {author_id} not found")))
}
