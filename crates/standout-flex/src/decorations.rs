//! Row decorations and the width they take.
//!
//! Separators, borders and gaps are drawn by the caller; the resolver only
//! needs to know how many display columns they consume so it can subtract
//! them from the total width before sizing the content columns.

use console::measure_text_width;
use serde::{Deserialize, Serialize};

/// Decorations for table rows (separators, prefixes, suffixes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decorations {
    /// Separator between columns (e.g., "  " or " │ ").
    pub column_sep: String,
    /// Prefix at the start of each row.
    pub row_prefix: String,
    /// Suffix at the end of each row.
    pub row_suffix: String,
}

impl Default for Decorations {
    fn default() -> Self {
        Decorations::gap("  ")
    }
}

impl Decorations {
    /// No decorations at all: columns are butted against each other.
    pub fn none() -> Self {
        Decorations::gap("")
    }

    /// A plain gap between columns and nothing on the sides.
    pub fn gap(sep: impl Into<String>) -> Self {
        Decorations {
            column_sep: sep.into(),
            row_prefix: String::new(),
            row_suffix: String::new(),
        }
    }

    /// Vertical borders of an ASCII table: `| a | b |`.
    pub fn ascii_table() -> Self {
        Decorations::gap(" | ").prefix("| ").suffix(" |")
    }

    /// Vertical borders of a box-drawing table: `│ a │ b │`.
    pub fn box_drawing() -> Self {
        Decorations::gap(" │ ").prefix("│ ").suffix(" │")
    }

    /// Set the column separator.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.column_sep = sep.into();
        self
    }

    /// Set the row prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.row_prefix = prefix.into();
        self
    }

    /// Set the row suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.row_suffix = suffix.into();
        self
    }

    /// Calculate the total overhead (prefix + suffix + separators between n columns).
    ///
    /// Widths are display widths with ANSI escapes ignored, so colored
    /// borders cost only their visible characters.
    pub fn overhead(&self, num_columns: usize) -> usize {
        let prefix_width = measure_text_width(&self.row_prefix);
        let suffix_width = measure_text_width(&self.row_suffix);
        let sep_width = measure_text_width(&self.column_sep);
        let sep_count = num_columns.saturating_sub(1);
        prefix_width + suffix_width + (sep_width * sep_count)
    }
}
