use thiserror::Error;

/// Everything that can go wrong in a run. None of these are recovered:
/// the first one aborts the pipe.
#[derive(Debug, Error)]
pub enum Error {
    /// The netrc file is missing, unreadable, or has no usable entry.
    #[error("credentials: {0}")]
    Credential(String),

    /// Login was rejected or the login call itself failed.
    #[error("login failed: {0}")]
    Auth(String),

    /// More than one team and no --team flag; we never guess.
    #[error("multiple teams available, pass --team to pick one")]
    AmbiguousTeam,

    /// Team or channel name did not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// A post or patch was rejected, or its request failed in transit.
    #[error("publish failed: {0}")]
    Publish(String),

    /// The input stream itself failed mid-read.
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}
