//! Flex items and their normalization.
//!
//! A [`FlexItem`] describes one sizable element (a table column) the way a
//! CSS flex item is described: a basis, grow and shrink weights, a natural
//! size, and min/max bounds. All fields are signed so that nonsensical input
//! can be expressed and then corrected by [`FlexItem::normalized`].

use serde::{Deserialize, Serialize};

/// Sentinel basis value meaning "use the natural size".
pub const AUTO: i64 = -1;

/// Initial main-axis size of an item, before growing or shrinking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BasisRaw", into = "BasisRaw")]
pub enum Basis {
    /// Defer to the item's natural size.
    #[default]
    Auto,
    /// An explicit length in display columns.
    Length(i64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BasisRaw {
    Length(i64),
    Keyword(String),
}

impl From<Basis> for BasisRaw {
    fn from(basis: Basis) -> Self {
        match basis {
            Basis::Auto => BasisRaw::Keyword("auto".to_string()),
            Basis::Length(n) => BasisRaw::Length(n),
        }
    }
}

impl TryFrom<BasisRaw> for Basis {
    type Error = String;

    fn try_from(raw: BasisRaw) -> Result<Self, Self::Error> {
        match raw {
            BasisRaw::Length(n) => Ok(Basis::from(n)),
            BasisRaw::Keyword(s) if s == "auto" => Ok(Basis::Auto),
            BasisRaw::Keyword(s) => Err(format!(
                "Invalid basis: '{}'. Expected 'auto' or a length.",
                s
            )),
        }
    }
}

impl From<i64> for Basis {
    /// Negative values (including [`AUTO`]) mean `Auto`.
    fn from(n: i64) -> Self {
        if n >= 0 {
            Basis::Length(n)
        } else {
            Basis::Auto
        }
    }
}

impl From<i32> for Basis {
    fn from(n: i32) -> Self {
        Basis::from(i64::from(n))
    }
}

impl Basis {
    /// The explicit length, if any. Negative lengths count as auto.
    pub fn length(self) -> Option<i64> {
        match self {
            Basis::Length(n) if n >= 0 => Some(n),
            _ => None,
        }
    }

    /// Whether this basis defers to the natural size.
    pub fn is_auto(self) -> bool {
        self.length().is_none()
    }
}

/// One sizable element handed to the resolver.
///
/// Default values are all zero with an auto basis: an item that neither
/// grows nor shrinks and sits at its (normalized) natural size of 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexItem {
    /// Initial size before growing or shrinking.
    pub basis: Basis,
    /// Share of surplus space; 0 never grows.
    pub grow: i64,
    /// Share of deficit space, scaled by the base size; 0 never shrinks.
    pub shrink: i64,
    /// Natural (content) size.
    pub size: i64,
    /// Minimum width, at least 1 after normalization.
    pub min: i64,
    /// Maximum width, 0 for unconstrained.
    pub max: i64,
}

impl FlexItem {
    /// Create an item with an explicit or auto basis and everything else zero.
    pub fn new(basis: impl Into<Basis>) -> Self {
        FlexItem {
            basis: basis.into(),
            ..Default::default()
        }
    }

    /// Set the basis.
    pub fn basis(mut self, basis: impl Into<Basis>) -> Self {
        self.basis = basis.into();
        self
    }

    /// Set the grow weight.
    pub fn grow(mut self, grow: i64) -> Self {
        self.grow = grow;
        self
    }

    /// Set the shrink weight.
    pub fn shrink(mut self, shrink: i64) -> Self {
        self.shrink = shrink;
        self
    }

    /// Set the natural size.
    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Set the minimum width.
    pub fn min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum width (0 for none).
    pub fn max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Return a copy with every field moved into its legal range.
    ///
    /// Rules are applied in order, so later rules see the corrected values of
    /// earlier ones:
    ///
    /// 1. `min` is at least 1.
    /// 2. `grow` and `shrink` are at least 0.
    /// 3. `size` is at least 1.
    /// 4. a negative `max` becomes 0 (unconstrained).
    /// 5. `size` is raised to `min`.
    /// 6. with a `max`: it is raised to `min`, then `size` is capped at it.
    ///
    /// Normalizing a normalized item returns it unchanged.
    pub fn normalized(&self) -> FlexItem {
        let mut it = *self;
        if it.min < 1 {
            it.min = 1;
        }
        if it.grow < 0 {
            it.grow = 0;
        }
        if it.shrink < 0 {
            it.shrink = 0;
        }
        if it.size < 1 {
            it.size = 1;
        }
        if it.max < 0 {
            it.max = 0;
        }
        if it.size < it.min {
            it.size = it.min;
        }
        if it.max != 0 {
            if it.max < it.min {
                it.max = it.min;
            }
            if it.size > it.max {
                it.size = it.max;
            }
        }
        it
    }

    /// Flex base size: the explicit basis, or the natural size.
    pub(crate) fn flex_base_size(&self) -> i64 {
        self.basis.length().unwrap_or(self.size)
    }

    /// Clamp `value` into `[min, max]`, with no upper bound when `max` is 0.
    ///
    /// Works on 128-bit values so that targets computed from sums of sizes
    /// can be clamped without first narrowing them.
    pub(crate) fn clamp(&self, value: i128) -> i128 {
        let mut v = value.max(i128::from(self.min));
        if self.max != 0 {
            v = v.min(i128::from(self.max));
        }
        v
    }
}
