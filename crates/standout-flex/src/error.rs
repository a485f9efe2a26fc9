//! Error types for the flex crate.

use thiserror::Error;

/// Errors that can occur when resolving flex lengths.
///
/// Caller input is never rejected: out-of-range item parameters are
/// sanitized instead. The only failure is an internal one, which should never
/// happen and indicates a bug in the resolver itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlexError {
    /// The distribution loop did not freeze every item within `items + 1`
    /// iterations.
    #[error("flex resolution did not converge for {items} items after {iterations} iterations")]
    Unconverged { items: usize, iterations: usize },
}

/// Result type for flex operations.
pub type Result<T> = std::result::Result<T, FlexError>;
