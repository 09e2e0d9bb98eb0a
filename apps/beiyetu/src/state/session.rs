//! # Session State
//!
//! Stub sign-in: remembers an email address for the lifetime of the
//! process. There is no password, no backend and nothing written to disk.
//! The signed-in email doubles as the default comment author.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use beiyetu_core::validation::{validate_email, ValidationResult};

/// The current (stub) user.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<Mutex<Option<String>>>,
}

impl SessionState {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Signs in as `email`, replacing any previous user.
    pub fn login(&self, email: &str) -> ValidationResult<String> {
        validate_email(email)?;
        let email = email.trim().to_string();

        *self.lock() = Some(email.clone());
        info!(email = %email, "Signed in");
        Ok(email)
    }

    /// Signs out and returns who was signed in.
    pub fn logout(&self) -> Option<String> {
        let previous = self.lock().take();
        if let Some(email) = &previous {
            info!(email = %email, "Signed out");
        }
        previous
    }

    pub fn current_user(&self) -> Option<String> {
        self.lock().clone()
    }

    /// The signed-in email, or `fallback` when nobody is signed in.
    pub fn author_or(&self, fallback: &str) -> String {
        self.current_user().unwrap_or_else(|| fallback.to_string())
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.user.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let session = SessionState::new();
        assert_eq!(session.current_user(), None);

        let email = session.login("  otieno@example.com ").unwrap();
        assert_eq!(email, "otieno@example.com");
        assert_eq!(session.current_user().as_deref(), Some("otieno@example.com"));

        assert_eq!(session.logout().as_deref(), Some("otieno@example.com"));
        assert_eq!(session.current_user(), None);
        assert_eq!(session.logout(), None);
    }

    #[test]
    fn test_invalid_email_keeps_previous_user() {
        let session = SessionState::new();
        session.login("akinyi@example.com").unwrap();

        assert!(session.login("not-an-email").is_err());
        assert!(session.login("").is_err());
        assert_eq!(session.current_user().as_deref(), Some("akinyi@example.com"));
    }

    #[test]
    fn test_author_or() {
        let session = SessionState::new();
        assert_eq!(session.author_or("Anonymous"), "Anonymous");

        session.login("kamau@example.com").unwrap();
        assert_eq!(session.author_or("Anonymous"), "kamau@example.com");
    }
}
