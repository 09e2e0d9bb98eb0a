//! # Comment Commands
//!
//! Posting and reading product comments.
//!
//! ## Author Resolution
//! ```text
//! author argument given and non-blank? ──yes──► use it
//!        │ no
//!        ▼
//! signed in? ──yes──► session email
//!        │ no
//!        ▼
//! config.default_author ("Anonymous")
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CommentState, SessionState};
use beiyetu_core::{Comment, ANONYMOUS_AUTHOR};

/// Comment DTO for callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: String,
    pub product_id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        CommentDto {
            id: c.id,
            product_id: c.product_id,
            author: c.author,
            text: c.text,
            created_at: c.created_at,
        }
    }
}

/// Posts a comment on a product.
///
/// ## Arguments
/// * `product_id` - Product the comment is about (kept as a string key)
/// * `author` - Explicit author; falls back to the signed-in email, then
///   `"Anonymous"`
/// * `text` - Comment body, must not be blank
pub fn add_comment(
    comments: &CommentState,
    session: &SessionState,
    product_id: String,
    author: Option<String>,
    text: String,
) -> Result<CommentDto, ApiError> {
    add_comment_with_default(comments, session, product_id, author, text, ANONYMOUS_AUTHOR)
}

/// [`add_comment`] with a configured anonymous author.
pub fn add_comment_with_default(
    comments: &CommentState,
    session: &SessionState,
    product_id: String,
    author: Option<String>,
    text: String,
    default_author: &str,
) -> Result<CommentDto, ApiError> {
    let author = author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| session.author_or(default_author));

    debug!(product_id = %product_id, author = %author, "add_comment command");

    let comment = comments.add_comment(&product_id, &author, &text)?;
    info!(product_id = %comment.product_id, id = %comment.id, "Comment posted");

    Ok(CommentDto::from(comment))
}

/// Lists a product's comments in the order they were posted.
pub fn list_comments(comments: &CommentState, product_id: String) -> Result<Vec<CommentDto>, ApiError> {
    debug!(product_id = %product_id, "list_comments command");

    Ok(comments
        .comments_for(&product_id)
        .into_iter()
        .map(CommentDto::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_explicit_anonymous_comment() {
        let comments = CommentState::new();
        let session = SessionState::new();
        add_comment(&comments, &session, "3".into(), None, "Saw it cheaper".into()).unwrap();

        let dto = add_comment(
            &comments,
            &session,
            "3".into(),
            Some("Anonymous".into()),
            "Great deal".into(),
        )
        .unwrap();

        let listed = list_comments(&comments, "3".into()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.last(), Some(&dto));
        assert_eq!(dto.author, "Anonymous");
        assert_eq!(dto.text, "Great deal");
    }

    #[test]
    fn test_author_defaults_to_session_email() {
        let comments = CommentState::new();
        let session = SessionState::new();

        let anon = add_comment(&comments, &session, "1".into(), None, "First".into()).unwrap();
        assert_eq!(anon.author, "Anonymous");

        session.login("mwangi@example.com").unwrap();
        let signed = add_comment(&comments, &session, "1".into(), Some("  ".into()), "Second".into())
            .unwrap();
        assert_eq!(signed.author, "mwangi@example.com");
    }

    #[test]
    fn test_configured_default_author() {
        let comments = CommentState::new();
        let session = SessionState::new();

        let dto = add_comment_with_default(&comments, &session, "2".into(), None, "Hi".into(), "Guest")
            .unwrap();
        assert_eq!(dto.author, "Guest");
    }

    #[test]
    fn test_blank_comment_is_validation_error() {
        let comments = CommentState::new();
        let session = SessionState::new();

        let err = add_comment(&comments, &session, "3".into(), None, "".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_comments(&comments, "3".into()).unwrap().is_empty());
    }

    #[test]
    fn test_long_comment_accepted() {
        let comments = CommentState::new();
        let session = SessionState::new();
        let text = "a".repeat(1_001);

        let dto = add_comment(&comments, &session, "3".into(), Some("Anonymous".into()), text.clone())
            .unwrap();

        assert_eq!(dto.text, text);
        assert_eq!(list_comments(&comments, "3".into()).unwrap(), vec![dto]);
    }
}
