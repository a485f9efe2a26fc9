//! Column sizing presets.
//!
//! Most tables do not need raw flexbox parameters. A column usually either
//! hugs its content ([`Sizing::Rigid`]), hugs its content but gives way when
//! the table is too wide ([`Sizing::Shrinkable`]), or takes a proportional
//! share of the width regardless of content ([`Sizing::Flexed`]). These
//! presets translate into [`FlexItem`]s; [`Sizing::Flexbox`] exposes the raw
//! parameters for everything else.

use serde::{Deserialize, Serialize};

use crate::item::{Basis, FlexItem};
use crate::layout::ContentMetrics;

/// Text alignment within a column.
///
/// The resolver does not pad text; this is carried along so that the code
/// rendering cells can align them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Center text (pad on both sides).
    Center,
    /// Right-align text (pad on the left).
    Right,
}

/// How a column is sized relative to its content and to the table width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Sizing {
    /// As wide as the content, within min and max, whatever the table width.
    /// Like `flex: none` in CSS.
    Rigid,
    /// As wide as the content, but shrinks (down to min) when the table is
    /// too wide. A weight of 0 or less means 1. Like `flex: initial`.
    Shrinkable {
        #[serde(default)]
        weight: i64,
    },
    /// A share of the table width proportional to the weight, regardless of
    /// content. A weight of 0 or less means 1. Like `flex: N`.
    Flexed {
        #[serde(default)]
        weight: i64,
    },
    /// Raw flexbox parameters. Defaults are all zero with an auto basis.
    Flexbox {
        #[serde(default)]
        basis: Basis,
        #[serde(default)]
        grow: i64,
        #[serde(default)]
        shrink: i64,
    },
    /// The column is dropped from the output.
    Omit,
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Shrinkable { weight: 1 }
    }
}

/// Configuration for a single column.
///
/// In config files the sizing fields sit next to the bounds
/// (`{"type": "flexed", "weight": 2, "max": 40}`). Every key is optional; a
/// column without a `type` is shrinkable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ColumnRaw", into = "ColumnRaw")]
pub struct Column {
    /// How the column is sized.
    pub sizing: Sizing,
    /// Minimum width. 0 means the min-content width of the column.
    pub min: usize,
    /// Maximum width. 0 means no maximum; longer content must wrap.
    pub max: usize,
    /// Text alignment within the column.
    pub align: Align,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SizingKind {
    Rigid,
    Shrinkable,
    Flexed,
    Flexbox,
    Omit,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct ColumnRaw {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<SizingKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    basis: Option<Basis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grow: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shrink: Option<i64>,
    min: usize,
    max: usize,
    align: Align,
}

impl From<ColumnRaw> for Column {
    fn from(raw: ColumnRaw) -> Self {
        let sizing = match raw.kind {
            None => Sizing::Shrinkable {
                weight: raw.weight.unwrap_or(1),
            },
            Some(SizingKind::Rigid) => Sizing::Rigid,
            Some(SizingKind::Shrinkable) => Sizing::Shrinkable {
                weight: raw.weight.unwrap_or_default(),
            },
            Some(SizingKind::Flexed) => Sizing::Flexed {
                weight: raw.weight.unwrap_or_default(),
            },
            Some(SizingKind::Flexbox) => Sizing::Flexbox {
                basis: raw.basis.unwrap_or_default(),
                grow: raw.grow.unwrap_or_default(),
                shrink: raw.shrink.unwrap_or_default(),
            },
            Some(SizingKind::Omit) => Sizing::Omit,
        };
        Column {
            sizing,
            min: raw.min,
            max: raw.max,
            align: raw.align,
        }
    }
}

impl From<Column> for ColumnRaw {
    fn from(col: Column) -> Self {
        let mut raw = ColumnRaw {
            min: col.min,
            max: col.max,
            align: col.align,
            ..Default::default()
        };
        match col.sizing {
            Sizing::Rigid => raw.kind = Some(SizingKind::Rigid),
            Sizing::Shrinkable { weight } => {
                raw.kind = Some(SizingKind::Shrinkable);
                raw.weight = Some(weight);
            }
            Sizing::Flexed { weight } => {
                raw.kind = Some(SizingKind::Flexed);
                raw.weight = Some(weight);
            }
            Sizing::Flexbox {
                basis,
                grow,
                shrink,
            } => {
                raw.kind = Some(SizingKind::Flexbox);
                raw.basis = Some(basis);
                raw.grow = Some(grow);
                raw.shrink = Some(shrink);
            }
            Sizing::Omit => raw.kind = Some(SizingKind::Omit),
        }
        raw
    }
}

impl Column {
    /// Create a column with the given sizing and no bounds.
    pub fn new(sizing: Sizing) -> Self {
        Column {
            sizing,
            ..Default::default()
        }
    }

    /// Set the minimum width.
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum width (0 for none).
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Set the text alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set alignment to right (shorthand for `.align(Align::Right)`).
    pub fn right(self) -> Self {
        self.align(Align::Right)
    }

    /// Set alignment to center (shorthand for `.align(Align::Center)`).
    pub fn center(self) -> Self {
        self.align(Align::Center)
    }

    /// Whether the column is dropped from the output.
    pub fn is_omitted(&self) -> bool {
        matches!(self.sizing, Sizing::Omit)
    }

    /// Build the flex item for this column from its measured content.
    ///
    /// Returns `None` for omitted columns. The item's natural size is the
    /// content size; its minimum is the configured `min`, or the min-content
    /// width when `min` is 0, never above `max`.
    pub fn to_item(&self, metrics: ContentMetrics) -> Option<FlexItem> {
        let mut item = self.base_item()?;

        let mut min = if self.min > 0 {
            self.min
        } else {
            metrics.min_content
        };
        if self.max > 0 && min > self.max {
            min = self.max;
        }

        item.min = to_i64(min);
        item.max = to_i64(self.max);
        item.size = to_i64(metrics.size);
        Some(item)
    }

    fn base_item(&self) -> Option<FlexItem> {
        let item = match self.sizing {
            Sizing::Rigid => FlexItem::new(Basis::Auto),
            Sizing::Shrinkable { weight } => FlexItem::new(Basis::Auto).shrink(weight.max(1)),
            Sizing::Flexed { weight } => FlexItem::new(0).grow(weight.max(1)).shrink(1),
            Sizing::Flexbox {
                basis,
                grow,
                shrink,
            } => FlexItem::new(basis).grow(grow).shrink(shrink),
            Sizing::Omit => return None,
        };
        Some(item)
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Shorthand constructors for creating columns.
///
/// ```rust
/// use standout_flex::Col;
///
/// let col = Col::rigid().max(10);       // content width, at most 10
/// let col = Col::shrinkable(1).min(4);  // content width, may shrink to 4
/// let col = Col::flexed(2).right();     // two shares of the free width
/// let col = Col::omit();                // not shown
/// ```
pub struct Col;

impl Col {
    /// A column sized to its content.
    pub fn rigid() -> Column {
        Column::new(Sizing::Rigid)
    }

    /// A column sized to its content that may shrink with the given weight.
    pub fn shrinkable(weight: i64) -> Column {
        Column::new(Sizing::Shrinkable { weight })
    }

    /// A column taking `weight` shares of the table width.
    pub fn flexed(weight: i64) -> Column {
        Column::new(Sizing::Flexed { weight })
    }

    /// A column with raw flexbox parameters.
    pub fn flexbox(basis: impl Into<Basis>, grow: i64, shrink: i64) -> Column {
        Column::new(Sizing::Flexbox {
            basis: basis.into(),
            grow,
            shrink,
        })
    }

    /// A column that is dropped from the output.
    pub fn omit() -> Column {
        Column::new(Sizing::Omit)
    }

    /// A column of exactly `width` columns.
    pub fn fixed(width: usize) -> Column {
        Col::rigid().min(width).max(width)
    }
}
