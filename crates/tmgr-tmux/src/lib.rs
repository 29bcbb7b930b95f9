//! tmux access for tmgr.
//!
//! This crate wraps the tmux binary for the session manager front-end:
//! - Locate tmux in PATH
//! - List sessions as structured records
//! - Attach to a session (hands the terminal to tmux until it exits)
//! - Create detached sessions, telling invalid names apart from other failures
//!
//! The front-end only talks to tmux through the [`SessionSource`] and
//! [`SessionActions`] traits, so it can be driven by fakes in tests.
//!
//! # Example
//!
//! ```no_run
//! use tmgr_tmux::{SessionActions, SessionSource, TmuxClient};
//!
//! let tmux = TmuxClient::new().expect("tmux not found");
//!
//! tmux.create_session("scratch").unwrap();
//! for session in tmux.list_sessions().unwrap() {
//!     println!("{} {} attached={}", session.id, session.name, session.attached);
//! }
//! ```

pub mod client;
pub mod error;
pub mod session;

pub use client::TmuxClient;
pub use error::{Result, TmuxError};
pub use session::SessionRecord;

/// Something that can report the current set of sessions.
pub trait SessionSource {
    /// List the sessions that exist right now.
    ///
    /// Returns an empty list, not an error, when no server is running.
    fn list_sessions(&self) -> Result<Vec<SessionRecord>>;
}

/// Operations that change which session the operator is looking at.
pub trait SessionActions {
    /// Attach the current terminal to the session with the given id.
    ///
    /// Blocks until the attached client exits.
    fn attach(&self, session_id: &str) -> Result<()>;

    /// Create a new detached session.
    ///
    /// # Errors
    ///
    /// Returns `TmuxError::InvalidSessionName` when tmux rejects the name.
    fn create_session(&self, name: &str) -> Result<()>;
}
