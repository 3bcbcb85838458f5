//! Error taxonomy shared by every grammar constructor.
//!
//! Construction is the only place where a grammar can be rejected: once a
//! [`Grammar`](crate::Grammar) exists it is well formed, so rendering,
//! simplification, equality and copying can only fail when the output buffer
//! cannot grow.

use std::collections::TryReserveError;

/// Possible errors raised while building or rendering grammar expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A quantifier's lower bound exceeds its upper bound.
    #[error("invalid quantifier {{{min},{max}}}: lower bound exceeds upper bound")]
    InvalidQuantifier {
        /// The requested minimum repetition count.
        min: u32,
        /// The requested maximum repetition count.
        max: u32,
    },

    /// An integer component's lower bound exceeds its upper bound.
    #[error("invalid integer range [{min}, {max}]: lower bound exceeds upper bound")]
    InvalidIntegerRange {
        /// The requested minimum value.
        min: i64,
        /// The requested maximum value.
        max: i64,
    },

    /// A character range entry ends before it starts.
    #[error("invalid character range {start:?}-{end:?}: end precedes start")]
    InvalidRange {
        /// First character of the offending entry.
        start: char,
        /// Last character of the offending entry.
        end: char,
    },

    /// A character range was built from zero entries.
    #[error("character range must contain at least one entry")]
    EmptyRangeSet,

    /// A sequence or choice was built from zero subexpressions.
    #[error("group must contain at least one subexpression")]
    EmptyGroup,

    /// Nesting would exceed the depth that rendering and simplification can recurse through.
    #[error("expression nesting exceeds the depth limit of {limit}")]
    DepthLimit {
        /// The maximum supported nesting depth.
        limit: usize,
    },

    /// The output buffer could not grow while rendering.
    #[error("out of memory while building grammar text")]
    OutOfMemory(#[from] TryReserveError),

    /// The input JSON was syntactically invalid or structurally mismatched.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Decoded JSON describes an expression that cannot be built.
    #[error("schema error: {0}")]
    Schema(String),

    /// A builder configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
