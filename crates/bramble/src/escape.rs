//! Character escaping for string literals and character ranges.
//!
//! Each character is classified in a fixed order: control shorthand, then the
//! context's own escape set, then the always-safe set, and finally a hex escape.
//! The order matters for characters such as `-` or `]`, which are always safe
//! inside a string literal but must be escaped inside a range.

use std::fmt;

/// Where an escaped character will appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    /// Inside a `"..."` string literal.
    StringLiteral,
    /// Inside a `[...]` character range.
    CharRange,
}

impl EscapeContext {
    /// Characters that must be backslash-escaped in this context.
    #[must_use]
    pub fn escape_set(self) -> &'static str {
        match self {
            EscapeContext::StringLiteral => "\"\\",
            EscapeContext::CharRange => "^-[]\\",
        }
    }
}

/// The rendered representation of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped {
    /// Written as-is.
    Verbatim(char),
    /// A control character written as `\n`, `\r` or `\t`.
    Shorthand(char),
    /// A character written with a leading backslash.
    Backslash(char),
    /// Any other code point, written as `\x` followed by uppercase hex digits.
    Hex(u32),
}

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Escaped::Verbatim(c) => write!(f, "{c}"),
            Escaped::Shorthand(c) => write!(f, "\\{c}"),
            Escaped::Backslash(c) => write!(f, "\\{c}"),
            Escaped::Hex(code) => write!(f, "\\x{code:02X}"),
        }
    }
}

/// Punctuation rendered verbatim in both contexts (unless the context escapes it).
const SAFE_PUNCTUATION: &str = "!#$%&'()*+,-./:;<=>?@[]^_`{|}~";

/// Returns `true` for ASCII letters, digits, space and [`SAFE_PUNCTUATION`].
#[must_use]
pub fn is_always_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || SAFE_PUNCTUATION.contains(c)
}

/// Classifies `c` for output in `context`.
#[must_use]
pub fn escape(c: char, context: EscapeContext) -> Escaped {
    match c {
        '\n' => Escaped::Shorthand('n'),
        '\r' => Escaped::Shorthand('r'),
        '\t' => Escaped::Shorthand('t'),
        c if context.escape_set().contains(c) => Escaped::Backslash(c),
        c if is_always_safe(c) => Escaped::Verbatim(c),
        c => Escaped::Hex(u32::from(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn esc(c: char, context: EscapeContext) -> String {
        escape(c, context).to_string()
    }

    #[rstest]
    #[case('a', "a")]
    #[case('Z', "Z")]
    #[case('7', "7")]
    #[case(' ', " ")]
    #[case('-', "-")]
    #[case('[', "[")]
    #[case('^', "^")]
    #[case('"', "\\\"")]
    #[case('\\', "\\\\")]
    #[case('\n', "\\n")]
    #[case('\r', "\\r")]
    #[case('\t', "\\t")]
    #[case('\0', "\\x00")]
    #[case('\u{7f}', "\\x7F")]
    #[case('é', "\\xE9")]
    #[case('λ', "\\x3BB")]
    #[case('😀', "\\x1F600")]
    fn test_string_literal_context(#[case] c: char, #[case] expected: &str) {
        assert_eq!(esc(c, EscapeContext::StringLiteral), expected);
    }

    #[rstest]
    #[case('a', "a")]
    #[case('"', "\\x22")]
    #[case('^', "\\^")]
    #[case('-', "\\-")]
    #[case('[', "\\[")]
    #[case(']', "\\]")]
    #[case('\\', "\\\\")]
    #[case('\n', "\\n")]
    #[case('.', ".")]
    #[case('\u{1}', "\\x01")]
    fn test_char_range_context(#[case] c: char, #[case] expected: &str) {
        assert_eq!(esc(c, EscapeContext::CharRange), expected);
    }

    #[test]
    fn test_always_safe_set() {
        assert!(is_always_safe('~'));
        assert!(is_always_safe('`'));
        assert!(!is_always_safe('"'));
        assert!(!is_always_safe('\\'));
        assert!(!is_always_safe('\n'));
        assert!(!is_always_safe('é'));
    }
}
