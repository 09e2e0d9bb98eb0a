//! # Session Commands
//!
//! Stub sign-in. See [`SessionState`] for what is (not) checked.

use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// Signs in with an email address and returns it, trimmed.
pub fn login(session: &SessionState, email: String) -> Result<String, ApiError> {
    debug!("login command");
    Ok(session.login(&email)?)
}

/// Signs out. Returns who was signed in, if anyone.
pub fn logout(session: &SessionState) -> Result<Option<String>, ApiError> {
    debug!("logout command");
    Ok(session.logout())
}

pub fn current_user(session: &SessionState) -> Result<Option<String>, ApiError> {
    Ok(session.current_user())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_login_flow() {
        let session = SessionState::new();

        assert_eq!(login(&session, "njeri@example.com".into()).unwrap(), "njeri@example.com");
        assert_eq!(current_user(&session).unwrap().as_deref(), Some("njeri@example.com"));
        assert_eq!(logout(&session).unwrap().as_deref(), Some("njeri@example.com"));
        assert_eq!(current_user(&session).unwrap(), None);
    }

    #[test]
    fn test_login_rejects_bad_email() {
        let session = SessionState::new();

        let err = login(&session, "njeri".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(current_user(&session).unwrap(), None);
    }
}
