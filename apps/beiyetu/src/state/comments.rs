//! # Comment State
//!
//! In-memory comments keyed by product id. Nothing is persisted: the
//! store starts empty on every launch.
//!
//! ## Thread Safety
//! One `Arc<Mutex<..>>` around the whole map. The lock is held only for a
//! single push or a single clone of one product's list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use beiyetu_core::validation::validate_comment_text;
use beiyetu_core::{Comment, CoreResult, ValidationError};

/// Append-only comment store.
#[derive(Debug, Clone, Default)]
pub struct CommentState {
    comments: Arc<Mutex<HashMap<String, Vec<Comment>>>>,
}

impl CommentState {
    /// Creates an empty store.
    pub fn new() -> Self {
        CommentState::default()
    }

    /// Appends a comment to a product's list and returns it.
    ///
    /// ## Errors
    /// `Validation` when the text or product id is blank. Nothing else is
    /// checked; author and text are stored as given.
    pub fn add_comment(&self, product_id: &str, author: &str, text: &str) -> CoreResult<Comment> {
        if product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product id".to_string(),
            }
            .into());
        }
        validate_comment_text(text)?;

        let comment = Comment::new(product_id, author, text);

        let mut comments = self.lock();
        let list = comments.entry(product_id.to_string()).or_default();
        list.push(comment.clone());

        debug!(product_id = %product_id, author = %author, total = list.len(), "Comment added");
        Ok(comment)
    }

    /// Comments for a product in submission order; empty if there are none.
    pub fn comments_for(&self, product_id: &str) -> Vec<Comment> {
        self.lock().get(product_id).cloned().unwrap_or_default()
    }

    /// Total comments across all products.
    pub fn total(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    // A panic while holding the lock leaves a valid map (pushes are atomic)
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Comment>>> {
        self.comments.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beiyetu_core::{CoreError, ANONYMOUS_AUTHOR};

    #[test]
    fn test_add_comment_appends_after_existing() {
        let state = CommentState::new();
        state.add_comment("3", "wanjiru@example.co.ke", "Cheaper at Naivas").unwrap();

        let added = state.add_comment("3", ANONYMOUS_AUTHOR, "Great deal").unwrap();

        let list = state.comments_for("3");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "Cheaper at Naivas");
        assert_eq!(list[1], added);
        assert_eq!(list[1].author, "Anonymous");
        assert_eq!(list[1].text, "Great deal");
        assert_eq!(list[1].product_id, "3");
    }

    #[test]
    fn test_blank_text_rejected() {
        let state = CommentState::new();

        let err = state.add_comment("3", ANONYMOUS_AUTHOR, "   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(state.comments_for("3").is_empty());
    }

    #[test]
    fn test_products_are_independent() {
        let state = CommentState::new();
        state.add_comment("1", ANONYMOUS_AUTHOR, "Too pricey").unwrap();
        state.add_comment("2", ANONYMOUS_AUTHOR, "Good value").unwrap();
        state.add_comment("1", ANONYMOUS_AUTHOR, "Still pricey").unwrap();

        assert_eq!(state.comments_for("1").len(), 2);
        assert_eq!(state.comments_for("2").len(), 1);
        assert!(state.comments_for("99").is_empty());
        assert_eq!(state.total(), 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let state = CommentState::new();
        let first = state.add_comment("5", ANONYMOUS_AUTHOR, "Same").unwrap();
        let second = state.add_comment("5", ANONYMOUS_AUTHOR, "Same").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(state.comments_for("5").len(), 2);
    }

    #[test]
    fn test_clones_share_storage() {
        let state = CommentState::new();
        let other = state.clone();

        other.add_comment("7", ANONYMOUS_AUTHOR, "Shared").unwrap();
        assert_eq!(state.comments_for("7").len(), 1);
    }

    #[test]
    fn test_long_comment_stored_unchanged() {
        let state = CommentState::new();
        let text = format!("  {}\n", "a".repeat(1_001));

        let added = state.add_comment("3", ANONYMOUS_AUTHOR, &text).unwrap();

        assert_eq!(added.text, text);
        assert_eq!(state.comments_for("3"), vec![added]);
    }

    #[test]
    fn test_any_non_blank_product_key_accepted() {
        let state = CommentState::new();
        let key = "p".repeat(300);

        state.add_comment(&key, ANONYMOUS_AUTHOR, "Odd key").unwrap();
        assert_eq!(state.comments_for(&key).len(), 1);

        let err = state.add_comment(" ", ANONYMOUS_AUTHOR, "No key").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
