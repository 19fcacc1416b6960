use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the portal core.
#[derive(Debug, Error)]
pub enum Error {
    /// The session token failed to decode, or its claims were malformed.
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] JwtError),
    /// The session token decoded but its expiry has passed.
    #[error("Expired credential")]
    ExpiredCredential,
    /// A category is still unselected; no network call was made.
    #[error("Incomplete ballot: every category needs a choice or an abstention")]
    IncompleteBallot,
    /// The vote submission reached the server and was not accepted.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] figment::Error),
}

/// Outcome classification for a rejected vote submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The server rejected the ballot contents.
    #[error("Vote rejected: {0}")]
    ValidationRejected(String),
    /// A concurrent submission already succeeded for this voter.
    /// The vote IS recorded; callers must ratchet `has_voted`.
    #[error("A vote has already been recorded for this voter")]
    AlreadyVoted,
    /// Transient transport or server failure; retry is allowed.
    #[error("Submission failed: {0}")]
    NetworkOrServer(String),
}
