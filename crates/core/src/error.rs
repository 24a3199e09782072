/// Domain error taxonomy shared by the handlers and the auth extractor.
///
/// Every variant except [`CoreError::Internal`] carries a message that is
/// safe to show to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or missing request fields.
    #[error("{0}")]
    Validation(String),

    /// Missing, malformed, or expired credential.
    #[error("{0}")]
    Unauthorized(String),

    /// The entity addressed by the request does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An entity referenced from the request body does not exist.
    #[error("{0}")]
    MissingReference(String),

    /// A unique constraint would be violated (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure. The message is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}
