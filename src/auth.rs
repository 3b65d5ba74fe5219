//! Login and signup submission.
//!
//! The AutoChord backend does not expose account endpoints yet, so these
//! calls fabricate their result from the submitted form data. They keep the
//! async signature the real endpoints will have, so the controller wiring
//! stays put when they land.

use crate::model::User;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
}

/// Authenticate with the given credentials.
///
/// Pending backend integration: builds the user locally, nickname derived
/// from the email local-part.
pub async fn login(email: &str, password: &str) -> Result<User, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    tracing::info!(email, "login submitted");
    Ok(User::from_email("1", email))
}

/// Register a new account. Does not authenticate; the caller returns the
/// user to the login form afterwards.
pub async fn signup(email: &str, nickname: &str, password: &str) -> Result<(), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    tracing::info!(email, nickname, "signup submitted");
    Ok(())
}
