//! # Standout Flex - Column Width Resolution
//!
//! `standout-flex` decides how wide each column of a terminal table should
//! be. It is a single-line, single-axis, integer-only take on the CSS
//! flexbox "resolve flexible lengths" algorithm: every column has a basis, a
//! grow and a shrink weight, a natural size and min/max bounds, and the
//! resolver grows or shrinks them until they fill the available width or hit
//! their bounds.
//!
//! The crate does no text handling and no I/O. Callers measure their cells,
//! hand over the measurements, and get back one width per column to wrap and
//! pad their content to.
//!
//! ## Core Concepts
//!
//! - [`FlexItem`]: raw flexbox parameters for one column
//! - [`resolve_flex_lengths`]: items + container width → [`ResolvedWidths`]
//! - [`Column`] / [`Col`]: sizing presets (rigid, shrinkable, flexed, omitted)
//! - [`ColumnLayout`]: columns + default column + [`Decorations`], resolved
//!   from per-column [`ContentMetrics`]
//!
//! ## Quick Start
//!
//! ```rust
//! use standout_flex::{resolve_flex_lengths, FlexItem, AUTO};
//!
//! let items = [
//!     FlexItem::new(30),                  // fixed at 30
//!     FlexItem::new(0).grow(1),           // one share of what is left
//!     FlexItem::new(0).grow(2),           // two shares
//! ];
//! let widths = resolve_flex_lengths(&items, 60).unwrap();
//! assert_eq!(widths.widths, vec![30, 10, 20]);
//!
//! // Content-sized columns that give way when space runs out.
//! let items = [
//!     FlexItem::new(AUTO).size(80).shrink(1),
//!     FlexItem::new(AUTO).size(80).shrink(1),
//! ];
//! let widths = resolve_flex_lengths(&items, 60).unwrap();
//! assert_eq!(widths.widths, vec![30, 30]);
//! ```
//!
//! ## Guarantees
//!
//! For every input, the result has one width per item, in order, and each
//! width is at least the item's minimum (itself at least 1) and at most its
//! maximum when one is set. Invalid parameters are corrected, never rejected
//! (see [`FlexItem::normalized`]).

mod column;
mod decorations;
mod error;
mod item;
mod layout;
mod resolve;

// Re-export public API
pub use column::{Align, Col, Column, Sizing};
pub use decorations::Decorations;
pub use error::{FlexError, Result};
pub use item::{Basis, FlexItem, AUTO};
pub use layout::{ColumnLayout, ColumnLayoutBuilder, ContentMetrics};
pub use resolve::{resolve_flex_lengths, ResolvedWidths};
