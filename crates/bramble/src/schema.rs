//! JSON description of grammar expression trees.
//!
//! This module defines a serializable mirror of [`Grammar`] that can be read
//! from JSON with [`facet_json`], in the same tagged-node shape Tree-sitter
//! uses for its `grammar.json`: every node carries a `type` discriminant and
//! only the fields that kind of node needs.
//!
//! ```json
//! {
//!   "type": "RULE",
//!   "name": "root",
//!   "content": {
//!     "type": "CHOICE",
//!     "members": [
//!       { "type": "STRING", "value": "yes" },
//!       { "type": "STRING", "value": "no" }
//!     ]
//!   }
//! }
//! ```

use facet::Facet;

use crate::char_range::{CharRange, CharRangeEntry};
use crate::error::GrammarError;
use crate::grammar::{Grammar, MAX_DEPTH};
use crate::quantifier::Quantifier;

/// A grammar expression as it appears in JSON.
///
/// Which fields are read depends on [`ExprType`]; the rest are ignored.
#[derive(Debug, Clone, Facet)]
pub struct Expr {
    /// The discriminant identifying what kind of expression this is.
    #[facet(rename = "type")]
    pub expr_type: ExprType,

    /// Literal text for `STRING` expressions.
    #[facet(default)]
    pub value: Option<String>,

    /// Symbol for `RULE` expressions.
    #[facet(default)]
    pub name: Option<String>,

    /// Body of a `RULE` expression.
    #[facet(default)]
    pub content: Option<Box<Expr>>,

    /// Operands of `SEQ` and `CHOICE` expressions.
    #[facet(default)]
    pub members: Vec<Expr>,

    /// Intervals of a `CHAR_RANGE` expression.
    #[facet(default)]
    pub ranges: Vec<RangeDef>,

    /// Whether a `CHAR_RANGE` expression is negated.
    #[facet(default)]
    pub negate: Option<bool>,

    /// Repetition of a `SEQ` or `CHOICE` expression; absent means exactly once.
    #[facet(default)]
    pub quantifier: Option<QuantifierDef>,
}

/// The enumeration of all recognized expression types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum ExprType {
    /// A literal string.
    #[facet(rename = "STRING")]
    String,
    /// A character class.
    #[facet(rename = "CHAR_RANGE")]
    CharRange,
    /// A named derivation rule.
    #[facet(rename = "RULE")]
    Rule,
    /// A sequential composition of members.
    #[facet(rename = "SEQ")]
    Seq,
    /// A choice between members.
    #[facet(rename = "CHOICE")]
    Choice,
}

/// An inclusive character interval, each bound a one-character string.
#[derive(Debug, Clone, Facet)]
pub struct RangeDef {
    /// First character of the interval.
    pub start: String,
    /// Last character of the interval.
    pub end: String,
}

/// Repetition bounds; an absent `max` means unbounded.
#[derive(Debug, Clone, Copy, Facet)]
pub struct QuantifierDef {
    /// Minimum number of repetitions.
    pub min: u32,
    /// Maximum number of repetitions.
    #[facet(default)]
    pub max: Option<u32>,
}

fn single_char(bound: &str, field: &str) -> Result<char, GrammarError> {
    let mut chars = bound.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GrammarError::Schema(format!(
            "range {field} must be exactly one character, got {bound:?}"
        ))),
    }
}

impl RangeDef {
    /// Converts the bounds into a validated entry.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Schema`] if a bound is not a single character,
    /// or [`GrammarError::InvalidRange`] if the bounds are inverted.
    pub fn to_entry(&self) -> Result<CharRangeEntry, GrammarError> {
        CharRangeEntry::new(
            single_char(&self.start, "start")?,
            single_char(&self.end, "end")?,
        )
    }
}

impl QuantifierDef {
    /// Converts the bounds into a validated [`Quantifier`].
    ///
    /// # Errors
    ///
    /// See [`Quantifier::new`].
    pub fn to_quantifier(self) -> Result<Quantifier, GrammarError> {
        Quantifier::new(self.min, self.max)
    }
}

impl Expr {
    /// Builds the grammar this expression describes.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Schema`] if a field required by the expression
    /// type is missing, [`GrammarError::DepthLimit`] if the expression nests
    /// deeper than [`MAX_DEPTH`], or any constructor error raised while building.
    pub fn to_grammar(&self) -> Result<Grammar, GrammarError> {
        self.build(1)
    }

    /// Converts this expression, sitting `depth` levels below the root.
    /// The limit is checked before descending into members.
    fn build(&self, depth: usize) -> Result<Grammar, GrammarError> {
        if depth > MAX_DEPTH {
            return Err(GrammarError::DepthLimit { limit: MAX_DEPTH });
        }
        match self.expr_type {
            ExprType::String => {
                let value = self.value.as_deref().ok_or_else(|| missing("STRING", "value"))?;
                Ok(Grammar::string(value))
            }
            ExprType::CharRange => {
                let entries = self
                    .ranges
                    .iter()
                    .map(RangeDef::to_entry)
                    .collect::<Result<Vec<_>, _>>()?;
                let range = CharRange::from_entries(entries, self.negate.unwrap_or(false))?;
                Ok(Grammar::from(range))
            }
            ExprType::Rule => {
                let name = self.name.as_deref().ok_or_else(|| missing("RULE", "name"))?;
                let content = self.content.as_deref().ok_or_else(|| missing("RULE", "content"))?;
                Grammar::rule(name, content.build(depth + 1)?)
            }
            ExprType::Seq => {
                Grammar::sequence(self.member_grammars(depth)?, self.parsed_quantifier()?)
            }
            ExprType::Choice => {
                Grammar::choice(self.member_grammars(depth)?, self.parsed_quantifier()?)
            }
        }
    }

    fn member_grammars(&self, depth: usize) -> Result<Vec<Grammar>, GrammarError> {
        self.members.iter().map(|member| member.build(depth + 1)).collect()
    }

    fn parsed_quantifier(&self) -> Result<Quantifier, GrammarError> {
        self.quantifier
            .map_or(Ok(Quantifier::ONE), QuantifierDef::to_quantifier)
    }
}

fn missing(kind: &str, field: &str) -> GrammarError {
    GrammarError::Schema(format!("{kind} expression requires a '{field}' field"))
}

/// Parses a grammar expression from its JSON description.
///
/// # Errors
///
/// Returns [`GrammarError::JsonParse`] if the provided string is not valid JSON
/// or does not match the [`Expr`] shape, and the errors of
/// [`Expr::to_grammar`] otherwise.
pub fn parse_expr(json: &str) -> Result<Grammar, GrammarError> {
    let expr: Expr =
        facet_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))?;
    expr.to_grammar()
}
