//! Error types for the session manager front-end.

use thiserror::Error;
use tmgr_tmux::TmuxError;

use crate::table::TableError;

/// Errors that end the interactive loop.
#[derive(Error, Debug)]
pub enum AppError {
    /// tmux could not be run or failed unexpectedly.
    #[error(transparent)]
    Tmux(#[from] TmuxError),

    /// The session table could not be rendered.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the front-end.
pub type Result<T> = std::result::Result<T, AppError>;
