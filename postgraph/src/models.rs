use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

pub type PostId = i64;
pub type CommentId = i64;
pub type AuthorId = i64;

// Field names follow the API's camelCase JSON; unknown fields are ignored.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: AuthorId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: AuthorId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

/// A post together with its comments, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl PostWithComments {
    /// Pairs `post` with `comments`, rejecting comments that point at another post.
    pub fn new(post: Post, comments: Vec<Comment>) -> Result<Self, PipelineError> {
        if let Some(stray) = comments.iter().find(|comment| comment.post_id != post.id) {
            return Err(PipelineError::consistency(format!(
                "comment {} references post {} but was fetched for post {}",
                stray.id, stray.post_id, post.id
            )));
        }
        Ok(Self { post, comments })
    }

    /// Every author id referenced by the post and its comments, duplicates included.
    pub fn author_ids(&self) -> impl Iterator<Item = AuthorId> + '_ {
        std::iter::once(self.post.author_id)
            .chain(self.comments.iter().map(|comment| comment.author_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_from_camel_case_and_ignores_extra_fields() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"authorId":10,"content":"Hello","published":1670000000,"likes":3}"#,
        )
        .expect("decode post");
        assert_eq!(
            post,
            Post {
                id: 1,
                author_id: 10,
                content: "Hello".into(),
            }
        );
    }

    #[test]
    fn comment_requires_post_id() {
        let result: Result<Comment, _> =
            serde_json::from_str(r#"{"id":100,"authorId":20,"content":"Nice post"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn stray_comment_is_a_consistency_error() {
        let post = Post {
            id: 1,
            author_id: 10,
            content: "Hello".into(),
        };
        let comment = Comment {
            id: 100,
            post_id: 2,
            author_id: 20,
            content: "Wrong thread".into(),
        };
        let err = PostWithComments::new(post, vec![comment]).expect_err("stray comment");
        assert_eq!(err.kind(), crate::ErrorKind::Consistency);
    }

    #[test]
    fn author_ids_cover_post_and_comments() {
        let post = Post {
            id: 1,
            author_id: 10,
            content: String::new(),
        };
        let comments = vec![
            Comment {
                id: 1,
                post_id: 1,
                author_id: 20,
                content: String::new(),
            },
            Comment {
                id: 2,
                post_id: 1,
                author_id: 10,
                content: String::new(),
            },
        ];
        let aggregated = PostWithComments::new(post, comments).expect("aggregate");
        assert_eq!(aggregated.author_ids().collect::<Vec<_>>(), vec![10, 20, 10]);
    }
}
