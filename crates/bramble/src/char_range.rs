//! Canonical sets of inclusive character intervals.
//!
//! A [`CharRange`] always holds its entries in canonical form: sorted by start,
//! with no two entries overlapping or touching. The representation of a given
//! character set is therefore unique, which both rendering and structural
//! equality depend on.

use crate::error::GrammarError;

/// An inclusive `[start, end]` interval of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharRangeEntry {
    start: char,
    end: char,
}

impl CharRangeEntry {
    /// Creates an entry covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidRange`] if `end` precedes `start`.
    pub fn new(start: char, end: char) -> Result<Self, GrammarError> {
        if end < start {
            return Err(GrammarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an entry covering a single character.
    #[must_use]
    pub fn single(c: char) -> Self {
        Self { start: c, end: c }
    }

    /// Creates an entry whose bounds are known to be ordered.
    pub(crate) fn from_bounds(start: char, end: char) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// First character in the interval.
    #[must_use]
    pub fn start(&self) -> char {
        self.start
    }

    /// Last character in the interval.
    #[must_use]
    pub fn end(&self) -> char {
        self.end
    }

    /// Returns `true` if `c` lies within the interval.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    /// Number of code points spanned by the interval.
    #[must_use]
    pub fn len(&self) -> u32 {
        u32::from(self.end) - u32::from(self.start) + 1
    }

    /// Always `false`; an entry spans at least one character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A set of allowed (or, when negated, disallowed) characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharRange {
    ranges: Vec<CharRangeEntry>,
    negate: bool,
}

impl CharRange {
    /// Builds a canonical character range from `(start, end)` pairs.
    ///
    /// Entries may be given in any order and may overlap or touch; they are
    /// sorted and merged into the minimal equivalent list.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyRangeSet`] if no entries are given, or
    /// [`GrammarError::InvalidRange`] if any entry ends before it starts.
    pub fn new<I>(ranges: I, negate: bool) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let entries = ranges
            .into_iter()
            .map(|(start, end)| CharRangeEntry::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries, negate)
    }

    /// Builds a canonical character range from already-constructed entries.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyRangeSet`] if `entries` is empty.
    pub fn from_entries(entries: Vec<CharRangeEntry>, negate: bool) -> Result<Self, GrammarError> {
        if entries.is_empty() {
            return Err(GrammarError::EmptyRangeSet);
        }
        Ok(Self {
            ranges: canonicalize(entries),
            negate,
        })
    }

    /// Builds a character range matching any of the given characters.
    ///
    /// Duplicates are ignored and consecutive characters collapse into intervals.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyRangeSet`] if no characters are given.
    pub fn from_chars<I>(chars: I, negate: bool) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = char>,
    {
        Self::from_entries(chars.into_iter().map(CharRangeEntry::single).collect(), negate)
    }

    /// Wraps entries that are known to be canonical and non-empty.
    pub(crate) fn from_canonical(ranges: Vec<CharRangeEntry>, negate: bool) -> Self {
        debug_assert!(!ranges.is_empty());
        debug_assert_eq!(canonicalize(ranges.clone()), ranges);
        Self { ranges, negate }
    }

    /// The canonical interval list.
    #[must_use]
    pub fn ranges(&self) -> &[CharRangeEntry] {
        &self.ranges
    }

    /// Whether the set is negated (`[^...]`).
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Returns `true` if `c` is matched by this range, taking negation into account.
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        self.covers(c) != self.negate
    }

    /// Returns `true` if `c` falls inside one of the listed intervals, ignoring negation.
    #[must_use]
    pub fn covers(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|entry| {
                if entry.end < c {
                    std::cmp::Ordering::Less
                } else if entry.start > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Number of code points covered by the listed intervals, ignoring negation.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.ranges.iter().map(CharRangeEntry::len).sum()
    }

    /// The single character this range lists, if it lists exactly one.
    #[must_use]
    pub fn single_char(&self) -> Option<char> {
        match self.ranges.as_slice() {
            [entry] if entry.start == entry.end => Some(entry.start),
            _ => None,
        }
    }
}

/// Sorts entries by start and merges every overlapping or adjacent pair.
fn canonicalize(mut entries: Vec<CharRangeEntry>) -> Vec<CharRangeEntry> {
    entries.sort_unstable();

    let mut merged: Vec<CharRangeEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged.last_mut() {
            Some(running) if u32::from(entry.start) <= u32::from(running.end) + 1 => {
                running.end = running.end.max(entry.end);
            }
            _ => merged.push(entry),
        }
    }
    merged
}
