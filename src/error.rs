/// Errors raised by the GitHub integration.
///
/// "No result" outcomes (missing owner, acceptable failure statuses, empty
/// response bodies) are not errors; operations report them as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was absent, empty, or whitespace-only.
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// The issue to clone does not exist in the source repository.
    #[error("Issue #{number} could not be found in {owner}/{repo}")]
    IssueNotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    /// The user declined a confirmation prompt.
    #[error("Aborted, no changes were made")]
    Aborted,

    /// GitHub answered with a status the operation cannot accept.
    #[error("GitHub API request failed with HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse GitHub response: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Aborted => 0,
            Error::MissingParameter { .. } | Error::IssueNotFound { .. } => 1,
            Error::Api { .. } | Error::Http(_) | Error::Io(_) | Error::Json(_) => 2,
        }
    }

    /// Whether the error halts the whole requested operation.
    pub fn is_hard_stop(&self) -> bool {
        matches!(self, Error::IssueNotFound { .. } | Error::Aborted)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
