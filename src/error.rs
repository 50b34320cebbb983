use thiserror::Error;

/// Expected failure outcomes of record-store and form operations.
///
/// Display strings double as the user-facing alert messages. Store
/// failures carry the underlying cause and are not recoverable.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered.")]
    DuplicateEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("You must be signed in to do that.")]
    MissingSession,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AuthError {
    /// True for outcomes that are surfaced to the user and leave the
    /// application running; false only for persistence-medium failures.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::Store(_))
    }
}
