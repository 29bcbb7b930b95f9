//! Error types for tmux operations.

use thiserror::Error;

/// Errors that can occur during tmux operations.
#[derive(Error, Debug)]
pub enum TmuxError {
    /// tmux not found in PATH.
    #[error("tmux not found in PATH")]
    NotFound,

    /// No tmux server is running.
    #[error("no tmux server running")]
    NoServer,

    /// tmux rejected the session name.
    #[error("invalid tmux session name: {0}")]
    InvalidSessionName(String),

    /// tmux command failed.
    #[error("tmux returned nonzero with stderr: {0}")]
    CommandFailed(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse tmux output.
    #[error("parse error: {0}")]
    ParseError(String),
}

impl TmuxError {
    /// Classify the stderr of a failed tmux invocation.
    ///
    /// Only the failures callers are expected to recover from get their own
    /// variant; everything else is `CommandFailed`. A server without
    /// sessions is reported the same as no server at all, and so is a socket
    /// that is missing or refuses connections. Other socket errors, such as
    /// permission problems, stay fatal.
    pub fn from_stderr(stderr: &str) -> Self {
        let stderr = stderr.trim();
        if is_no_server(stderr) {
            TmuxError::NoServer
        } else if stderr.contains("bad session name") {
            TmuxError::InvalidSessionName(stderr.to_string())
        } else {
            TmuxError::CommandFailed(stderr.to_string())
        }
    }
}

fn is_no_server(stderr: &str) -> bool {
    if stderr.contains("no server running") || stderr.contains("no sessions") {
        return true;
    }
    stderr.contains("error connecting to")
        && (stderr.contains("(No such file or directory)")
            || stderr.contains("(Connection refused)"))
}

/// Result type alias for tmux operations.
pub type Result<T> = std::result::Result<T, TmuxError>;
