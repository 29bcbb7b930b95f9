//! tmux client for listing, attaching to and creating sessions.

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::{debug, trace, warn};

use crate::session::{format_string, SESSION_FIELDS};
use crate::{Result, SessionActions, SessionRecord, SessionSource, TmuxError};

/// Runs tmux commands against the default server.
#[derive(Debug, Clone)]
pub struct TmuxClient {
    /// Path to tmux binary.
    tmux_path: PathBuf,
}

impl TmuxClient {
    /// Create a new TmuxClient.
    ///
    /// Verifies that tmux is available in PATH.
    ///
    /// # Errors
    ///
    /// Returns `TmuxError::NotFound` if tmux is not available.
    pub fn new() -> Result<Self> {
        let tmux_path = Self::find_tmux()?;
        debug!(path = %tmux_path.display(), "tmux found");
        Ok(Self { tmux_path })
    }

    /// Create a client for an explicit tmux binary.
    pub fn with_binary(tmux_path: impl Into<PathBuf>) -> Self {
        Self {
            tmux_path: tmux_path.into(),
        }
    }

    fn find_tmux() -> Result<PathBuf> {
        which::which("tmux").map_err(|_| TmuxError::NotFound)
    }

    /// Run a tmux command and return the output.
    fn run_tmux(&self, args: &[&str]) -> Result<Output> {
        trace!(args = ?args, "running tmux command");
        let output = Command::new(&self.tmux_path).args(args).output()?;
        trace!(
            status = %output.status,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "tmux command completed"
        );
        Ok(output)
    }

    /// Run a tmux command, classifying any failure from its stderr.
    fn run_tmux_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run_tmux(args)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TmuxError::from_stderr(&stderr))
        }
    }
}

impl SessionSource for TmuxClient {
    fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
        let format = format_string(&SESSION_FIELDS);
        let stdout = match self.run_tmux_checked(&["list-sessions", "-F", &format]) {
            Ok(stdout) => stdout,
            Err(TmuxError::NoServer) => {
                debug!("no tmux server running");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut sessions = Vec::new();
        for line in stdout.lines() {
            if line.is_empty() {
                continue;
            }
            trace!(line = %line, "session line");
            sessions.push(SessionRecord::parse(line)?);
        }

        debug!(count = sessions.len(), "listed tmux sessions");
        Ok(sessions)
    }
}

impl SessionActions for TmuxClient {
    fn attach(&self, session_id: &str) -> Result<()> {
        debug!(session_id = %session_id, "attaching to tmux session");

        // Inherits the terminal; tmux reports its own errors to the operator.
        let status = Command::new(&self.tmux_path)
            .args(["attach-session", "-t", session_id])
            .status()?;

        if !status.success() {
            warn!(session_id = %session_id, status = %status, "tmux attach exited with failure");
        }
        Ok(())
    }

    fn create_session(&self, name: &str) -> Result<()> {
        debug!(name = %name, "creating tmux session");
        self.run_tmux_checked(&["new-session", "-s", name, "-d"])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_when_tmux_not_found() {
        let result = TmuxClient::new();
        // Either succeeds (tmux installed) or returns NotFound
        if let Err(e) = result {
            assert!(matches!(e, TmuxError::NotFound));
        }
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let tmux = TmuxClient::with_binary("/nonexistent/bin/tmux-12345");
        let result = tmux.list_sessions();
        assert!(matches!(result, Err(TmuxError::Io(_))));
    }

    #[cfg(unix)]
    mod fake_tmux {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        use tempfile::TempDir;

        use super::*;

        /// Write an executable `tmux` shell script into a fresh temp dir.
        fn fake_tmux(body: &str) -> (TempDir, TmuxClient) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("tmux");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            (dir, TmuxClient::with_binary(path))
        }

        #[test]
        fn test_list_sessions_parses_output() {
            let (_dir, tmux) = fake_tmux(
                r#"printf '$1__SEPARATOR__beta__SEPARATOR__0\n$0__SEPARATOR__alpha__SEPARATOR__2\n'"#,
            );

            let sessions = tmux.list_sessions().unwrap();
            assert_eq!(
                sessions,
                vec![
                    SessionRecord::new("$1", "beta", false),
                    SessionRecord::new("$0", "alpha", true),
                ]
            );
        }

        #[test]
        fn test_list_sessions_name_containing_separator() {
            let (_dir, tmux) = fake_tmux(
                r#"printf '$1__SEPARATOR__a__SEPARATOR__b__SEPARATOR__0\n$2__SEPARATOR__plain__SEPARATOR__1\n'"#,
            );

            let sessions = tmux.list_sessions().unwrap();
            assert_eq!(
                sessions,
                vec![
                    SessionRecord::new("$1", "a__SEPARATOR__b", false),
                    SessionRecord::new("$2", "plain", true),
                ]
            );
        }

        #[test]
        fn test_list_sessions_no_server_is_empty() {
            let (_dir, tmux) =
                fake_tmux("echo 'no server running on /tmp/tmux-1000/default' >&2\nexit 1");

            let sessions = tmux.list_sessions().unwrap();
            assert!(sessions.is_empty());
        }

        #[test]
        fn test_list_sessions_other_failure_is_fatal() {
            let (_dir, tmux) = fake_tmux("echo 'server exited unexpectedly' >&2\nexit 1");

            let result = tmux.list_sessions();
            assert!(
                matches!(result, Err(TmuxError::CommandFailed(ref s)) if s == "server exited unexpectedly")
            );
        }

        #[test]
        fn test_list_sessions_socket_permission_denied_is_fatal() {
            let (_dir, tmux) = fake_tmux(
                "echo 'error connecting to /tmp/tmux-1000/default (Permission denied)' >&2\nexit 1",
            );

            let result = tmux.list_sessions();
            assert!(matches!(result, Err(TmuxError::CommandFailed(ref s)) if s.contains("Permission denied")));
        }

        #[test]
        fn test_list_sessions_malformed_line() {
            let (_dir, tmux) = fake_tmux("echo 'garbage'");
            assert!(matches!(tmux.list_sessions(), Err(TmuxError::ParseError(_))));
        }

        #[test]
        fn test_create_session_passes_arguments() {
            let (dir, tmux) = fake_tmux(r#"echo "$@" > "$(dirname "$0")/args""#);

            tmux.create_session("work").unwrap();

            let args = fs::read_to_string(dir.path().join("args")).unwrap();
            assert_eq!(args.trim(), "new-session -s work -d");
        }

        #[test]
        fn test_create_session_bad_name() {
            let (_dir, tmux) = fake_tmux("echo 'bad session name: a:b' >&2\nexit 1");

            let result = tmux.create_session("a:b");
            assert!(matches!(result, Err(TmuxError::InvalidSessionName(_))));
        }

        #[test]
        fn test_create_session_other_failure() {
            let (_dir, tmux) = fake_tmux("echo 'duplicate session: work' >&2\nexit 1");

            let result = tmux.create_session("work");
            assert!(matches!(result, Err(TmuxError::CommandFailed(_))));
        }

        #[test]
        fn test_attach_runs_attach_session() {
            let (dir, tmux) = fake_tmux(r#"echo "$@" > "$(dirname "$0")/args""#);

            tmux.attach("$3").unwrap();

            let args = fs::read_to_string(dir.path().join("args")).unwrap();
            assert_eq!(args.trim(), "attach-session -t $3");
        }

        #[test]
        fn test_attach_failure_is_not_an_error() {
            let (_dir, tmux) = fake_tmux("echo \"can't find session: \\$9\" >&2\nexit 1");
            assert!(tmux.attach("$9").is_ok());
        }
    }

    // Integration tests that require actual tmux
    #[test]
    #[ignore]
    fn test_create_and_list_session() {
        let tmux = TmuxClient::new().unwrap();
        let session_name = "test-tmgr-create";

        tmux.create_session(session_name).unwrap();

        let sessions = tmux.list_sessions().unwrap();
        let session = sessions
            .iter()
            .find(|s| s.name == session_name)
            .expect("created session is listed");
        assert!(session.id.starts_with('$'));
        assert!(!session.attached);

        // Clean up
        let _ = Command::new(&tmux.tmux_path)
            .args(["kill-session", "-t", &session.id])
            .status();
    }

    #[test]
    #[ignore]
    fn test_create_session_rejects_colon() {
        let tmux = TmuxClient::new().unwrap();
        let result = tmux.create_session("bad:name");
        assert!(matches!(result, Err(TmuxError::InvalidSessionName(_))));
    }
}
