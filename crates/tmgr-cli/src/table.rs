//! Session table rendering.
//!
//! Sessions are sorted by name and packed column-major: the first column is
//! filled top to bottom before the second one starts. Each cell looks like
//!
//! ```text
//! 3)#long-ses*name -------[$12]
//! ```
//!
//! with the index, the attached marker, the (possibly shortened) name, a
//! dash fill up to the column width and the bracketed session id.

use crossterm::style::Stylize;
use thiserror::Error;
use tmgr_tmux::SessionRecord;

use crate::config::TableConfig;
use crate::layout::LayoutPlan;

/// Largest number of sessions the index column can number.
pub const MAX_SESSIONS: usize = 1000;

/// Errors that can occur while rendering the table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// More sessions than the index column can hold.
    #[error("you have {0} sessions, which is too many")]
    TooManySessions(usize),
}

/// Result type alias for table rendering.
pub type Result<T> = std::result::Result<T, TableError>;

/// Shorten `name` to at most `maxlen` characters.
///
/// Long names keep their first `maxlen / 2` characters and as many trailing
/// characters as fit after a `*` marker.
pub fn shorten_name(name: &str, maxlen: usize) -> String {
    let len = name.chars().count();
    if len <= maxlen {
        return name.to_string();
    }
    if maxlen == 0 {
        return String::new();
    }

    let start = maxlen / 2;
    let end = maxlen - start - 1;
    let head: String = name.chars().take(start).collect();
    let tail: String = name.chars().skip(len - end).collect();
    format!("{}*{}", head, tail)
}

/// Sort sessions by name. Equal names keep their relative order.
pub fn sort_sessions(sessions: &mut [SessionRecord]) {
    sessions.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Digits needed to number `count` sessions (0-based).
fn index_width(count: usize) -> Result<usize> {
    match count {
        n if n > MAX_SESSIONS => Err(TableError::TooManySessions(n)),
        n if n > 100 => Ok(3),
        n if n > 10 => Ok(2),
        _ => Ok(1),
    }
}

/// Renders sessions into printable table lines.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    config: TableConfig,
}

impl TableRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Render `sessions` as table rows, one string per row.
    ///
    /// Indices in the output refer to positions in name order, the same
    /// order [`sort_sessions`] produces.
    ///
    /// # Errors
    ///
    /// Returns `TableError::TooManySessions` for more than [`MAX_SESSIONS`]
    /// sessions; nothing is rendered in that case.
    pub fn render(&self, plan: &LayoutPlan, sessions: &[SessionRecord]) -> Result<Vec<String>> {
        let idx_width = index_width(sessions.len())?;
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let mut sorted: Vec<&SessionRecord> = sessions.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let id_width = sorted
            .iter()
            .map(|s| s.id.chars().count())
            .max()
            .unwrap_or(0);

        let cells: Vec<String> = sorted
            .iter()
            .enumerate()
            .map(|(i, session)| self.format_cell(i, session, idx_width, id_width, plan.column_width))
            .collect();

        let column_count = plan.column_count.max(1);
        let rows = cells.len().div_ceil(column_count);

        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = String::new();
            for column in 0..column_count {
                // The last column may run out of sessions before the last row.
                let Some(cell) = cells.get(column * rows + row) else {
                    break;
                };
                line.push_str(cell);
            }
            lines.push(line);
        }

        Ok(lines)
    }

    fn format_cell(
        &self,
        index: usize,
        session: &SessionRecord,
        idx_width: usize,
        id_width: usize,
        column_width: usize,
    ) -> String {
        let marker = match (session.attached, self.config.highlight_attached) {
            (true, true) => "#".bold().to_string(),
            (true, false) => "#".to_string(),
            (false, _) => " ".to_string(),
        };

        let name = shorten_name(&session.name, self.config.min_name_len);
        let overhead = self.config.fixed_overhead + idx_width + id_width;
        let fill = column_width.saturating_sub(name.chars().count() + overhead);

        format!(
            "{:0idx_width$}){}{} {}[{:<id_width$}] ",
            index,
            marker,
            name,
            "-".repeat(fill),
            session.id,
        )
    }
}
