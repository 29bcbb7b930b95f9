//! tmgr: an interactive tmux session picker.
//!
//! Lists tmux sessions in a table sized to the terminal and lets the
//! operator attach to one by index or create a new one by name.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod table;

pub use app::CommandLoop;
pub use config::TableConfig;
pub use error::{AppError, Result};
