//! Repetition bounds attached to sequences and choices.

use std::borrow::Cow;

use crate::error::GrammarError;

/// A `{min, max}` repetition descriptor.
///
/// `max` of `None` means unbounded. The default `{1,1}` carries no visible
/// marker when rendered. Instances are validated on construction, so every
/// `Quantifier` in a grammar satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantifier {
    min: u32,
    max: Option<u32>,
}

impl Quantifier {
    /// Exactly once: `{1,1}`.
    pub const ONE: Self = Self {
        min: 1,
        max: Some(1),
    };

    /// Zero or one: `?`.
    pub const OPTIONAL: Self = Self {
        min: 0,
        max: Some(1),
    };

    /// Zero or more: `*`.
    pub const ZERO_OR_MORE: Self = Self { min: 0, max: None };

    /// One or more: `+`.
    pub const ONE_OR_MORE: Self = Self { min: 1, max: None };

    /// Creates a quantifier from its bounds.
    ///
    /// `{0,0}` is read as unbounded, the same as `*`. Any other zero upper
    /// bound is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidQuantifier`] if `min` exceeds a bounded `max`.
    pub fn new(min: u32, max: Option<u32>) -> Result<Self, GrammarError> {
        match max {
            None => Ok(Self { min, max: None }),
            Some(0) if min == 0 => Ok(Self { min, max: None }),
            Some(max) if min > max => Err(GrammarError::InvalidQuantifier { min, max }),
            Some(max) => Ok(Self {
                min,
                max: Some(max),
            }),
        }
    }

    /// Exactly `n` repetitions.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidQuantifier`] if `n` is zero.
    pub fn exactly(n: u32) -> Result<Self, GrammarError> {
        if n == 0 {
            return Err(GrammarError::InvalidQuantifier { min: 0, max: 0 });
        }
        Ok(Self {
            min: n,
            max: Some(n),
        })
    }

    /// At least `n` repetitions, with no upper bound.
    #[must_use]
    pub fn at_least(n: u32) -> Self {
        Self { min: n, max: None }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    /// The upper bound, or `None` when unbounded.
    #[must_use]
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Returns `true` for the default `{1,1}`.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::ONE
    }

    /// Returns `true` for `{0,1}`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        *self == Self::OPTIONAL
    }

    /// Renders the repetition marker that follows a group.
    ///
    /// Returns `None` for the default quantifier, which has no marker.
    #[must_use]
    pub fn render(&self) -> Option<Cow<'static, str>> {
        match (self.min, self.max) {
            (1, Some(1)) => None,
            (0, Some(1)) => Some(Cow::Borrowed("?")),
            (0, None) => Some(Cow::Borrowed("*")),
            (1, None) => Some(Cow::Borrowed("+")),
            (min, None) => Some(Cow::Owned(format!("{{{min},}}"))),
            (min, Some(max)) if min == max => Some(Cow::Owned(format!("{{{min}}}"))),
            (min, Some(max)) => Some(Cow::Owned(format!("{{{min},{max}}}"))),
        }
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::ONE
    }
}
