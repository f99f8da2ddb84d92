use std::fmt;

use serde::Serialize;

use crate::authors::AuthorIndex;
use crate::error::PipelineError;
use crate::models::{CommentId, PostId, PostWithComments};

/// Number of content characters shown per post or comment.
pub const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub posts: Vec<RenderedPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPost {
    pub id: PostId,
    pub preview: String,
    pub author_name: String,
    pub comments: Vec<RenderedComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedComment {
    pub id: CommentId,
    pub preview: String,
    pub author_name: String,
}

impl RenderedView {
    /// Attributes every post and comment in `data` using `authors`.
    pub fn assemble(
        data: &[PostWithComments],
        authors: &AuthorIndex,
    ) -> Result<Self, PipelineError> {
        let posts = data
            .iter()
            .map(|entry| -> Result<RenderedPost, PipelineError> {
                let comments = entry
                    .comments
                    .iter()
                    .map(|comment| -> Result<RenderedComment, PipelineError> {
                        Ok(RenderedComment {
                            id: comment.id,
                            preview: preview(&comment.content),
                            author_name: authors.require(comment.author_id)?.name.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RenderedPost {
                    id: entry.post.id,
                    preview: preview(&entry.post.content),
                    author_name: authors.require(entry.post.author_id)?.name.clone(),
                    comments,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { posts })
    }

    pub fn comment_count(&self) -> usize {
        self.posts.iter().map(|post| post.comments.len()).sum()
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for post in &self.posts {
            writeln!(
                f,
                "post #{}: {} author name: {}",
                post.id, post.preview, post.author_name
            )?;
            for comment in &post.comments {
                writeln!(
                    f,
                    "       comment #{}: {} author name: {}",
                    comment.id, comment.preview, comment.author_name
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// First [`PREVIEW_CHARS`] characters of `content`, never splitting a char.
pub fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{author, comment, post};
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_truncates_by_characters() {
        assert_eq!(preview("short"), "short");
        let long = "ж".repeat(50);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn view_attributes_posts_and_comments() {
        let data = vec![PostWithComments::new(
            post(1, 10, "Hello world, this is a rather long first post body"),
            vec![comment(100, 1, 20, "Nice post")],
        )
        .expect("aggregate")];
        let authors: AuthorIndex = vec![author(10, "Alice"), author(20, "Bob")]
            .into_iter()
            .collect();

        let view = RenderedView::assemble(&data, &authors).expect("assemble");

        assert_eq!(
            view,
            RenderedView {
                posts: vec![RenderedPost {
                    id: 1,
                    preview: "Hello world, this is a rather long first".into(),
                    author_name: "Alice".into(),
                    comments: vec![RenderedComment {
                        id: 100,
                        preview: "Nice post".into(),
                        author_name: "Bob".into(),
                    }],
                }],
            }
        );
        assert_eq!(
            view.to_string(),
            "post #1: Hello world, this is a rather long first author name: Alice\n\
             \x20      comment #100: Nice post author name: Bob\n\n"
        );
    }

    #[test]
    fn unknown_comment_author_fails_assembly() {
        let data = vec![PostWithComments::new(
            post(1, 10, "Hello"),
            vec![comment(100, 1, 99, "Who am I")],
        )
        .expect("aggregate")];
        let authors: AuthorIndex = vec![author(10, "Alice")].into_iter().collect();

        let err = RenderedView::assemble(&data, &authors).expect_err("missing author");
        assert_eq!(err.kind(), ErrorKind::Consistency);
    }
}
