//! Grammars matching decimal integers between inclusive bounds.
//!
//! Matched integers never carry leading zeros, and zero is never signed.
//! Magnitudes are handled as `u128` so that `i64::MIN` has a representable
//! absolute value and `10^len` never overflows.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::quantifier::Quantifier;

/// Builds the grammar for integers in `[min, max]`, either side optionally unbounded.
pub(super) fn integer(min: Option<i64>, max: Option<i64>) -> Result<Grammar, GrammarError> {
    trace!(?min, ?max, "building integer grammar");
    match (min, max) {
        (None, None) => Grammar::choice(
            [
                seq([
                    Grammar::sequence([minus()], Quantifier::OPTIONAL)?,
                    nonzero()?,
                    Grammar::sequence([digit()?], Quantifier::ZERO_OR_MORE)?,
                ])?,
                zero(),
            ],
            Quantifier::ONE,
        ),
        (Some(lo), None) => at_least(lo),
        (None, Some(hi)) => at_most(hi),
        (Some(lo), Some(hi)) if lo > hi => {
            Err(GrammarError::InvalidIntegerRange { min: lo, max: hi })
        }
        (Some(lo), Some(hi)) => between(lo, hi),
    }
}

fn magnitude(n: i64) -> u128 {
    u128::from(n.unsigned_abs())
}

fn digit_count(n: u128) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

fn minus() -> Grammar {
    Grammar::string("-")
}

fn zero() -> Grammar {
    Grammar::string("0")
}

fn digit_range(lo: u8, hi: u8) -> Result<Grammar, GrammarError> {
    Grammar::char_range([(char::from(lo), char::from(hi))], false)
}

fn digit() -> Result<Grammar, GrammarError> {
    digit_range(b'0', b'9')
}

fn nonzero() -> Result<Grammar, GrammarError> {
    digit_range(b'1', b'9')
}

fn seq<I>(parts: I) -> Result<Grammar, GrammarError>
where
    I: IntoIterator<Item = Grammar>,
{
    Grammar::sequence(parts, Quantifier::ONE)
}

fn negated(magnitudes: Grammar) -> Result<Grammar, GrammarError> {
    seq([minus(), magnitudes])
}

/// `[1, ∞)`.
fn positive() -> Result<Grammar, GrammarError> {
    seq([
        nonzero()?,
        Grammar::sequence([digit()?], Quantifier::ZERO_OR_MORE)?,
    ])
}

/// `(-∞, -1]`.
fn negative() -> Result<Grammar, GrammarError> {
    seq([
        minus(),
        nonzero()?,
        Grammar::sequence([digit()?], Quantifier::ZERO_OR_MORE)?,
    ])
}

fn at_least(lo: i64) -> Result<Grammar, GrammarError> {
    match lo.cmp(&0) {
        Ordering::Less => Grammar::choice(
            [negated(range(1, magnitude(lo))?)?, zero(), positive()?],
            Quantifier::ONE,
        ),
        Ordering::Equal => Grammar::choice([zero(), positive()?], Quantifier::ONE),
        Ordering::Greater if lo == 1 => positive(),
        Ordering::Greater => unbounded_above(magnitude(lo)),
    }
}

fn at_most(hi: i64) -> Result<Grammar, GrammarError> {
    match hi.cmp(&0) {
        Ordering::Less => negated(unbounded_above(magnitude(hi))?),
        Ordering::Equal => Grammar::choice([negative()?, zero()], Quantifier::ONE),
        Ordering::Greater => Grammar::choice(
            [negative()?, zero(), range(1, magnitude(hi))?],
            Quantifier::ONE,
        ),
    }
}

fn between(lo: i64, hi: i64) -> Result<Grammar, GrammarError> {
    if hi < 0 {
        return negated(range(magnitude(hi), magnitude(lo))?);
    }
    if lo >= 0 {
        return range(magnitude(lo), magnitude(hi));
    }
    let mut parts = vec![negated(range(1, magnitude(lo))?)?, zero()];
    if hi > 0 {
        parts.push(range(1, magnitude(hi))?);
    }
    Grammar::choice(parts, Quantifier::ONE)
}

/// `[lo, hi]` for `lo <= hi`, split into one alternative per digit count,
/// longest first.
fn range(mut lo: u128, hi: u128) -> Result<Grammar, GrammarError> {
    if lo == hi {
        return Ok(Grammar::string(lo.to_string()));
    }
    let mut parts = Vec::new();
    if lo == 0 {
        parts.push(zero());
        lo = 1;
    }
    for len in digit_count(lo)..=digit_count(hi) {
        let block_lo = if len == 1 { 0 } else { 10_u128.pow(len - 1) };
        let block_hi = 10_u128.pow(len) - 1;
        let (start, end) = (lo.max(block_lo), hi.min(block_hi));
        if start == block_lo && end == block_hi {
            parts.push(digits(len)?);
        } else {
            parts.push(same_length(&start.to_string(), &end.to_string(), len)?);
        }
    }
    parts.reverse();
    if parts.len() == 1 {
        if let Some(only) = parts.pop() {
            return Ok(only);
        }
    }
    Grammar::choice(parts, Quantifier::ONE)
}

/// `[lo, ∞)` for `lo >= 1`.
fn unbounded_above(lo: u128) -> Result<Grammar, GrammarError> {
    let len = digit_count(lo);
    let longer = seq([
        nonzero()?,
        Grammar::sequence([digit()?], Quantifier::at_least(len))?,
    ])?;
    let same = same_length(&lo.to_string(), &(10_u128.pow(len) - 1).to_string(), len)?;
    Grammar::choice([longer, same], Quantifier::ONE)
}

/// Every integer of exactly `len` digits.
fn digits(len: u32) -> Result<Grammar, GrammarError> {
    match len {
        0 | 1 => digit(),
        2 => seq([nonzero()?, digit()?]),
        _ => seq([
            nonzero()?,
            Grammar::sequence([digit()?], Quantifier::exactly(len - 1)?)?,
        ]),
    }
}

/// `[lo, hi]` where both are `len`-digit strings (leading zeros allowed
/// below the first position) and `lo <= hi`.
fn same_length(lo: &str, hi: &str, len: u32) -> Result<Grammar, GrammarError> {
    if lo == hi {
        return Ok(Grammar::string(lo));
    }
    let (first_lo, rest_lo) = lo.split_at(1);
    let (first_hi, rest_hi) = hi.split_at(1);
    let (d_lo, d_hi) = (first_lo.as_bytes()[0], first_hi.as_bytes()[0]);
    if len == 1 {
        return digit_range(d_lo, d_hi);
    }
    if d_lo == d_hi {
        return seq([
            Grammar::string(first_lo),
            same_length(rest_lo, rest_hi, len - 1)?,
        ]);
    }

    let mut parts = vec![seq([
        Grammar::string(first_hi),
        same_length(&"0".repeat(rest_hi.len()), rest_hi, len - 1)?,
    ])?];
    if d_hi >= d_lo + 2 {
        let tail = if len == 2 {
            digit()?
        } else {
            Grammar::sequence([digit()?], Quantifier::exactly(len - 1)?)?
        };
        parts.push(seq([digit_range(d_lo + 1, d_hi - 1)?, tail])?);
    }
    parts.push(seq([
        Grammar::string(first_lo),
        same_length(rest_lo, &"9".repeat(rest_lo.len()), len - 1)?,
    ])?);
    Grammar::choice(parts, Quantifier::ONE)
}
