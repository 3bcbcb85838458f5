//! Rendering grammar trees to GBNF notation.
//!
//! A subtree may render to nothing at all (an empty literal, or a group whose
//! children are all empty). That outcome is `Ok(None)` and is distinct from a
//! failure: parents skip absent children, and a rule whose body is absent is
//! itself absent.

use crate::char_range::CharRange;
use crate::error::GrammarError;
use crate::escape::{escape, EscapeContext, Escaped};

use super::{Grammar, Group, GroupKind, Node};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Text buffer whose growth is fallible.
///
/// Every append reserves first, so an allocation failure surfaces as
/// [`GrammarError::OutOfMemory`] and the partially built text is dropped with
/// the buffer.
#[derive(Default)]
struct Output {
    buf: String,
}

impl Output {
    fn push_str(&mut self, s: &str) -> Result<(), GrammarError> {
        self.buf.try_reserve(s.len())?;
        self.buf.push_str(s);
        Ok(())
    }

    fn push_char(&mut self, c: char) -> Result<(), GrammarError> {
        self.buf.try_reserve(c.len_utf8())?;
        self.buf.push(c);
        Ok(())
    }

    fn push_escaped(&mut self, c: char, context: EscapeContext) -> Result<(), GrammarError> {
        match escape(c, context) {
            Escaped::Verbatim(c) => self.push_char(c),
            Escaped::Shorthand(c) | Escaped::Backslash(c) => {
                self.push_char('\\')?;
                self.push_char(c)
            }
            Escaped::Hex(code) => {
                self.push_str("\\x")?;
                let digits = if code <= 0xFF {
                    2
                } else {
                    (u32::BITS - code.leading_zeros()).div_ceil(4)
                };
                for i in (0..digits).rev() {
                    let nibble = (code >> (i * 4)) & 0xF;
                    self.push_char(char::from(HEX_DIGITS[nibble as usize]))?;
                }
                Ok(())
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

impl Grammar {
    /// Renders the full form of this expression, parenthesizing groups that need it.
    ///
    /// Equivalent to `render_with(true, true)`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::OutOfMemory`] if the output cannot be allocated.
    pub fn render(&self) -> Result<Option<String>, GrammarError> {
        self.render_with(true, true)
    }

    /// Renders this expression to a single line of GBNF.
    ///
    /// `full` selects between `symbol ::= value` and the bare symbol for
    /// derivation rules; nested rules are always referenced by symbol.
    /// `wrap` asks for parentheses around a group that would otherwise be
    /// ambiguous in its parent. Groups followed by a quantifier marker are
    /// parenthesized whenever they need it, regardless of `wrap`.
    ///
    /// Returns `Ok(None)` when the expression contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::OutOfMemory`] if the output cannot be allocated.
    pub fn render_with(&self, full: bool, wrap: bool) -> Result<Option<String>, GrammarError> {
        match self.node() {
            Node::StringLiteral(value) => render_string(value),
            Node::CharRange(range) => render_char_range(range).map(Some),
            Node::DerivationRule(rule) => {
                if !full {
                    let mut out = Output::default();
                    out.push_str(rule.symbol())?;
                    return Ok(Some(out.finish()));
                }
                let Some(value) = rule.value().render_with(false, wrap)? else {
                    return Ok(None);
                };
                let mut out = Output::default();
                out.push_str(rule.symbol())?;
                out.push_str(" ::= ")?;
                out.push_str(&value)?;
                Ok(Some(out.finish()))
            }
            Node::Sequence(group) => render_group(GroupKind::Sequence, group, wrap),
            Node::Choice(group) => render_group(GroupKind::Choice, group, wrap),
        }
    }
}

fn render_string(value: &str) -> Result<Option<String>, GrammarError> {
    if value.is_empty() {
        return Ok(None);
    }
    let mut out = Output::default();
    out.push_char('"')?;
    for c in value.chars() {
        out.push_escaped(c, EscapeContext::StringLiteral)?;
    }
    out.push_char('"')?;
    Ok(Some(out.finish()))
}

fn render_char_range(range: &CharRange) -> Result<String, GrammarError> {
    let mut out = Output::default();
    out.push_char('[')?;
    if range.is_negated() {
        out.push_char('^')?;
    }
    for entry in range.ranges() {
        out.push_escaped(entry.start(), EscapeContext::CharRange)?;
        match entry.len() {
            1 => {}
            2 => out.push_escaped(entry.end(), EscapeContext::CharRange)?,
            _ => {
                out.push_char('-')?;
                out.push_escaped(entry.end(), EscapeContext::CharRange)?;
            }
        }
    }
    out.push_char(']')?;
    Ok(out.finish())
}

fn render_group(kind: GroupKind, group: &Group, wrap: bool) -> Result<Option<String>, GrammarError> {
    let mut out = Output::default();
    let mut any = false;
    for child in group.subexprs() {
        let Some(text) = child.render_with(false, true)? else {
            continue;
        };
        if any {
            out.push_str(kind.separator())?;
        }
        out.push_str(&text)?;
        any = true;
    }
    if !any {
        return Ok(None);
    }
    let body = out.finish();

    let suffix = group.quantifier().render();
    let mut out = Output::default();
    if needs_wrap(kind, group) && (wrap || suffix.is_some()) {
        out.push_char('(')?;
        out.push_str(&body)?;
        out.push_char(')')?;
    } else {
        out.push_str(&body)?;
    }
    if let Some(suffix) = suffix {
        out.push_str(&suffix)?;
    }
    Ok(Some(out.finish()))
}

/// Whether a group's rendered body is ambiguous without parentheses.
///
/// A lone child under a quantifier only needs them when, after looking through
/// single-child default wrappers, it is still a group. Several choice arms
/// always do; several sequence operands only when a marker follows.
fn needs_wrap(kind: GroupKind, group: &Group) -> bool {
    match group.subexprs() {
        [] => false,
        [child] => {
            if group.quantifier().is_default() {
                return false;
            }
            let mut current = child;
            while let Some((_, inner)) = current.as_group() {
                match inner.subexprs() {
                    [only] if inner.quantifier().is_default() => current = only,
                    _ => break,
                }
            }
            current.as_group().is_some()
        }
        _ => match kind {
            GroupKind::Choice => true,
            GroupKind::Sequence => !group.quantifier().is_default(),
        },
    }
}
