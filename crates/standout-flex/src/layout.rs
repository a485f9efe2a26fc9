//! Column layout: from column configuration and measured content to widths.
//!
//! A [`ColumnLayout`] holds what a table writer is configured with (the
//! columns, a default column for positions past the configured ones, and the
//! row decorations) and resolves widths for a batch of rows once the caller
//! has measured their content.
//!
//! Measuring is left to the caller: this crate knows nothing about text,
//! escape sequences or wrapping. For each visible column the caller supplies
//! a [`ContentMetrics`] with the widest cell (`size`) and the longest
//! unbreakable chunk of any cell (`min_content`).
//!
//! # Example
//!
//! ```rust
//! use standout_flex::{Col, ColumnLayout, ContentMetrics, Decorations};
//!
//! let layout = ColumnLayout::builder()
//!     .column(Col::rigid())
//!     .column(Col::flexed(1))
//!     .column(Col::flexed(2))
//!     .decorations(Decorations::ascii_table())
//!     .build();
//!
//! let metrics = [
//!     ContentMetrics::new(3, 3),
//!     ContentMetrics::new(40, 8),
//!     ContentMetrics::new(12, 5),
//! ];
//! // 60 columns minus "| ", " | " twice and " |".
//! let widths = layout.resolve(&metrics, 60).unwrap();
//! assert_eq!(widths.widths, vec![3, 15, 32]);
//! ```

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::decorations::Decorations;
use crate::error::Result;
use crate::item::FlexItem;
use crate::resolve::{resolve_flex_lengths, ResolvedWidths};

/// Measured content of one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentMetrics {
    /// Display width of the widest cell.
    pub size: usize,
    /// Display width of the longest chunk that cannot be wrapped.
    pub min_content: usize,
}

impl ContentMetrics {
    /// Create metrics from a natural size and a min-content width.
    pub fn new(size: usize, min_content: usize) -> Self {
        ContentMetrics { size, min_content }
    }

    /// Metrics covering both `self` and `other`.
    pub fn merge(self, other: ContentMetrics) -> Self {
        ContentMetrics {
            size: self.size.max(other.size),
            min_content: self.min_content.max(other.min_content),
        }
    }

    /// Fold per-cell metrics of several rows into per-column metrics.
    ///
    /// Rows may have different lengths; the result has as many entries as the
    /// longest row, and missing cells count as empty.
    ///
    /// ```rust
    /// use standout_flex::ContentMetrics;
    ///
    /// let rows = vec![
    ///     vec![ContentMetrics::new(5, 5), ContentMetrics::new(11, 5)],
    ///     vec![ContentMetrics::new(8, 8)],
    /// ];
    /// let columns = ContentMetrics::columns(&rows);
    /// assert_eq!(columns, vec![ContentMetrics::new(8, 8), ContentMetrics::new(11, 5)]);
    /// ```
    pub fn columns<R: AsRef<[ContentMetrics]>>(rows: &[R]) -> Vec<ContentMetrics> {
        let mut columns: Vec<ContentMetrics> = Vec::new();
        for row in rows {
            for (i, cell) in row.as_ref().iter().enumerate() {
                match columns.get_mut(i) {
                    Some(col) => *col = col.merge(*cell),
                    None => columns.push(*cell),
                }
            }
        }
        columns
    }
}

/// Column configuration for a table.
///
/// Configured columns apply positionally to the cells of each row. Columns
/// sized [`Sizing::Omit`](crate::Sizing::Omit) drop their cells; every
/// position past the configured columns uses `default_column`.
///
/// The default layout has shrinkable columns separated by two spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Configuration of the first `columns.len()` cell positions.
    pub columns: Vec<Column>,
    /// Configuration of every other position.
    pub default_column: Column,
    /// Row decorations, for the width they take.
    pub decorations: Decorations,
}

impl ColumnLayout {
    /// Create a layout with the given columns and default settings otherwise.
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnLayout {
            columns,
            ..Default::default()
        }
    }

    /// Create a layout builder.
    pub fn builder() -> ColumnLayoutBuilder {
        ColumnLayoutBuilder::default()
    }

    /// Whether the cell at raw `position` of a row is dropped.
    pub fn is_omitted(&self, position: usize) -> bool {
        self.columns
            .get(position)
            .unwrap_or(&self.default_column)
            .is_omitted()
    }

    /// The cells of `row` that are shown, in order.
    pub fn visible_cells<'a, T>(&self, row: &'a [T]) -> Vec<&'a T> {
        row.iter()
            .enumerate()
            .filter(|(i, _)| !self.is_omitted(*i))
            .map(|(_, cell)| cell)
            .collect()
    }

    /// The configuration of the visible column at `index`.
    ///
    /// Indices count only shown columns: omitted configured columns are
    /// skipped, and indices past the remaining ones get the default column.
    pub fn column_for(&self, index: usize) -> &Column {
        self.columns
            .iter()
            .filter(|c| !c.is_omitted())
            .nth(index)
            .unwrap_or(&self.default_column)
    }

    /// Build the flex items for visible columns with the given metrics.
    ///
    /// A metric whose column resolves to an omitted default column has no
    /// item; this only happens when more metrics are passed than there are
    /// visible cells.
    pub fn items(&self, metrics: &[ContentMetrics]) -> Vec<FlexItem> {
        metrics
            .iter()
            .enumerate()
            .filter_map(|(i, m)| self.column_for(i).to_item(*m))
            .collect()
    }

    /// Resolve the width of each visible column.
    ///
    /// `metrics` holds one entry per visible column (see
    /// [`visible_cells`](Self::visible_cells)). `total_width` is the full row
    /// width; the decoration overhead for the columns actually laid out is
    /// subtracted from it first, so metrics dropped by an omitted default
    /// column take no separators. The result may be wider than `total_width`
    /// when minimum widths require it.
    pub fn resolve(
        &self,
        metrics: &[ContentMetrics],
        total_width: usize,
    ) -> Result<ResolvedWidths> {
        let items = self.items(metrics);
        let overhead = self.decorations.overhead(items.len());
        let available = total_width.saturating_sub(overhead);
        let container = i64::try_from(available).unwrap_or(i64::MAX);
        resolve_flex_lengths(&items, container)
    }
}

/// Builder for constructing `ColumnLayout` instances.
#[derive(Clone, Debug, Default)]
pub struct ColumnLayoutBuilder {
    layout: ColumnLayout,
}

impl ColumnLayoutBuilder {
    /// Add a column.
    pub fn column(mut self, column: Column) -> Self {
        self.layout.columns.push(column);
        self
    }

    /// Add multiple columns from an iterator.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.layout.columns.extend(columns);
        self
    }

    /// Set the column used for positions past the configured ones.
    pub fn default_column(mut self, column: Column) -> Self {
        self.layout.default_column = column;
        self
    }

    /// Set the column separator.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.layout.decorations.column_sep = sep.into();
        self
    }

    /// Set all decorations at once.
    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.layout.decorations = decorations;
        self
    }

    /// Build the `ColumnLayout` instance.
    pub fn build(self) -> ColumnLayout {
        self.layout
    }
}
