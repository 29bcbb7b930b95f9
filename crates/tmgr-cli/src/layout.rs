//! Column layout for the session table.

use tracing::{debug, trace};

use crate::config::TableConfig;

/// How the table is split across the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Number of table columns, never less than 1.
    pub column_count: usize,
    /// Characters per column, decoration included.
    pub column_width: usize,
}

/// Work out how many columns fit in `terminal_columns` characters.
///
/// Starts from `max_columns` and gives up one column at a time until each
/// column is at least `min_column_width()` wide. One column separator is
/// reserved between neighbouring columns. At one column the search stops,
/// even if the terminal is too narrow for the minimum width.
pub fn compute(terminal_columns: usize, config: &TableConfig) -> LayoutPlan {
    let min_width = config.min_column_width();
    let mut column_count = config.max_columns.max(1) + 1;

    loop {
        column_count -= 1;
        let column_width = (terminal_columns + 1).saturating_sub(column_count) / column_count;

        if column_width >= min_width || column_count == 1 {
            debug!(
                terminal_columns,
                column_count, column_width, "computed table layout"
            );
            return LayoutPlan {
                column_count,
                column_width,
            };
        }

        trace!(column_count, column_width, "columns too narrow, shrinking");
    }
}
