//! Shorthand constructors for common grammar shapes.
//!
//! The composite helpers wrap the expression they are given without copying
//! it, so the same subtree may appear under several wrappers.

use crate::char_range::{CharRange, CharRangeEntry};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::quantifier::Quantifier;

fn class(bounds: &[(char, char)]) -> Grammar {
    let entries = bounds
        .iter()
        .map(|&(start, end)| CharRangeEntry::from_bounds(start, end))
        .collect();
    Grammar::from(CharRange::from_canonical(entries, false))
}

/// A string literal.
#[must_use]
pub fn literal(text: impl Into<String>) -> Grammar {
    Grammar::string(text)
}

/// `[0-9]`
#[must_use]
pub fn digit() -> Grammar {
    class(&[('0', '9')])
}

/// `[A-Za-z]`
#[must_use]
pub fn alpha() -> Grammar {
    class(&[('A', 'Z'), ('a', 'z')])
}

/// `[0-9A-Za-z]`
#[must_use]
pub fn alnum() -> Grammar {
    class(&[('0', '9'), ('A', 'Z'), ('a', 'z')])
}

/// `[\t\n\r ]`
#[must_use]
pub fn whitespace() -> Grammar {
    class(&[('\t', '\n'), ('\r', '\r'), (' ', ' ')])
}

/// Zero or one occurrence of `g`.
///
/// # Errors
///
/// Returns [`GrammarError::DepthLimit`] if `g` is already nested too deeply.
pub fn optional(g: &Grammar) -> Result<Grammar, GrammarError> {
    Grammar::sequence([g.clone()], Quantifier::OPTIONAL)
}

/// Zero or more occurrences of `g`.
///
/// # Errors
///
/// Returns [`GrammarError::DepthLimit`] if `g` is already nested too deeply.
pub fn zero_or_more(g: &Grammar) -> Result<Grammar, GrammarError> {
    Grammar::sequence([g.clone()], Quantifier::ZERO_OR_MORE)
}

/// One or more occurrences of `g`.
///
/// # Errors
///
/// Returns [`GrammarError::DepthLimit`] if `g` is already nested too deeply.
pub fn one_or_more(g: &Grammar) -> Result<Grammar, GrammarError> {
    Grammar::sequence([g.clone()], Quantifier::ONE_OR_MORE)
}

/// Exactly `n` occurrences of `g`.
///
/// # Errors
///
/// Returns [`GrammarError::InvalidQuantifier`] if `n` is zero, or
/// [`GrammarError::DepthLimit`] if `g` is already nested too deeply.
pub fn repeat(g: &Grammar, n: u32) -> Result<Grammar, GrammarError> {
    Grammar::sequence([g.clone()], Quantifier::exactly(n)?)
}

/// `items` in order, matched once.
///
/// # Errors
///
/// See [`Grammar::sequence`].
pub fn sequence<I>(items: I) -> Result<Grammar, GrammarError>
where
    I: IntoIterator<Item = Grammar>,
{
    Grammar::sequence(items, Quantifier::ONE)
}

/// Any one of `items`, matched once.
///
/// # Errors
///
/// See [`Grammar::choice`].
pub fn choice<I>(items: I) -> Result<Grammar, GrammarError>
where
    I: IntoIterator<Item = Grammar>,
{
    Grammar::choice(items, Quantifier::ONE)
}
