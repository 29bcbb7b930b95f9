//! Session records parsed from `tmux list-sessions`.

use crate::{Result, TmuxError};

/// Separator placed between fields in tmux `-F` format strings.
///
/// Session names may contain almost anything, so a single character like
/// `:` is not safe here.
pub const FORMAT_SEPARATOR: &str = "__SEPARATOR__";

/// Format variables requested from `list-sessions`, in field order.
pub const SESSION_FIELDS: [&str; 3] = ["session_id", "session_name", "session_attached"];

/// Build a tmux format string (`#{a}SEP#{b}...`) for the given variables.
pub fn format_string(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| format!("#{{{}}}", field))
        .collect::<Vec<_>>()
        .join(FORMAT_SEPARATOR)
}

/// Snapshot of one tmux session at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Opaque session id (e.g. "$3"), unique among listed sessions.
    pub id: String,
    /// Human-assigned session name.
    pub name: String,
    /// Whether any client is attached to the session.
    pub attached: bool,
}

impl SessionRecord {
    /// Create a new SessionRecord.
    pub fn new(id: impl Into<String>, name: impl Into<String>, attached: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attached,
        }
    }

    /// Parse a session from one line of `list-sessions` output.
    ///
    /// Expected format: `session_id SEP session_name SEP session_attached`,
    /// where `session_attached` is the number of attached clients. The id
    /// and the count never contain the separator, so everything between the
    /// first and the last one is the name.
    pub fn parse(line: &str) -> Result<Self> {
        let invalid = || TmuxError::ParseError(format!("invalid session format: {}", line));

        let (id, rest) = line.split_once(FORMAT_SEPARATOR).ok_or_else(invalid)?;
        let (name, count) = rest.rsplit_once(FORMAT_SEPARATOR).ok_or_else(invalid)?;

        let clients: u32 = count
            .trim()
            .parse()
            .map_err(|_| TmuxError::ParseError(format!("invalid attached count: {}", count)))?;

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            attached: clients > 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_string() {
        assert_eq!(
            format_string(&SESSION_FIELDS),
            "#{session_id}__SEPARATOR__#{session_name}__SEPARATOR__#{session_attached}"
        );
        assert_eq!(format_string(&["pane_id"]), "#{pane_id}");
    }

    #[test]
    fn test_parse_session_valid() {
        let line = "$0__SEPARATOR__work__SEPARATOR__1";
        let session = SessionRecord::parse(line).unwrap();
        assert_eq!(session.id, "$0");
        assert_eq!(session.name, "work");
        assert!(session.attached);
    }

    #[test]
    fn test_parse_session_detached() {
        let session = SessionRecord::parse("$12__SEPARATOR__scratch__SEPARATOR__0").unwrap();
        assert_eq!(session.id, "$12");
        assert!(!session.attached);
    }

    #[test]
    fn test_parse_session_multiple_clients() {
        let session = SessionRecord::parse("$1__SEPARATOR__shared__SEPARATOR__3").unwrap();
        assert!(session.attached);
    }

    #[test]
    fn test_parse_session_name_with_colons_and_spaces() {
        let session = SessionRecord::parse("$2__SEPARATOR__my: odd name__SEPARATOR__0").unwrap();
        assert_eq!(session.name, "my: odd name");
    }

    #[test]
    fn test_parse_session_empty_name() {
        let session = SessionRecord::parse("$4__SEPARATOR____SEPARATOR__0").unwrap();
        assert_eq!(session.id, "$4");
        assert_eq!(session.name, "");
    }

    #[test]
    fn test_parse_session_name_containing_separator() {
        let session =
            SessionRecord::parse("$1__SEPARATOR__a__SEPARATOR__b__SEPARATOR__0").unwrap();
        assert_eq!(session, SessionRecord::new("$1", "a__SEPARATOR__b", false));
    }

    #[test]
    fn test_parse_session_invalid_format() {
        assert!(SessionRecord::parse("noseparator").is_err());
        assert!(SessionRecord::parse("$0__SEPARATOR__work").is_err());
    }

    #[test]
    fn test_parse_session_invalid_attached() {
        let result = SessionRecord::parse("$0__SEPARATOR__work__SEPARATOR__yes");
        assert!(matches!(result, Err(TmuxError::ParseError(_))));
    }

    #[test]
    fn test_parse_multiple_sessions() {
        let output = "$0__SEPARATOR__a__SEPARATOR__0\n$1__SEPARATOR__b__SEPARATOR__1\n";
        let sessions: Vec<SessionRecord> = output
            .lines()
            .filter(|l| !l.is_empty())
            .map(SessionRecord::parse)
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0], SessionRecord::new("$0", "a", false));
        assert_eq!(sessions[1], SessionRecord::new("$1", "b", true));
    }
}
