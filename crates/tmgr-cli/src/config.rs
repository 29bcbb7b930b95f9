//! Fixed table parameters.

/// Parameters for laying out and rendering the session table.
///
/// Fixed at process start and passed explicitly to the layout engine and
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Most columns the table will ever use.
    pub max_columns: usize,
    /// Characters each cell spends on decoration: `)`, the attached marker,
    /// the space before the fill, the id brackets and the trailing space.
    pub fixed_overhead: usize,
    /// Names are shortened to this many characters, and a column is only
    /// considered wide enough if it can hold a name this long.
    pub min_name_len: usize,
    /// Render the attached marker in bold.
    pub highlight_attached: bool,
}

impl TableConfig {
    /// Narrowest column width the layout engine will accept without falling
    /// back to fewer columns.
    pub fn min_column_width(&self) -> usize {
        self.fixed_overhead + self.min_name_len + 3
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_columns: 5,
            fixed_overhead: 6,
            min_name_len: 15,
            highlight_attached: true,
        }
    }
}
