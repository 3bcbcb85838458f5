//! Build, simplify and render GBNF grammar expressions.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The error type shared by every fallible operation.
pub mod error;

/// Repetition bounds attached to sequences and choices.
pub mod quantifier;

/// Canonical sets of character intervals.
///
/// Ranges are sorted and merged on construction, so two ranges matching the
/// same characters always compare and render identically.
pub mod char_range;

/// Per-character escaping rules for rendered output.
pub mod escape;

/// The immutable expression tree at the heart of the crate.
///
/// A [`Grammar`] is a cheap handle to a shared node. Nodes never change after
/// construction, so subtrees may be reused under any number of parents and
/// handed across threads freely. Rendering and simplification live here too.
pub mod grammar;

/// Ready-made character classes and repetition wrappers.
pub mod helpers;

/// Collections of named rules, as written to a GBNF file.
pub mod rules;

/// Structural checks over rule sets.
///
/// Validation catches symbols that would not parse as GBNF identifiers and
/// references to rules that are missing or defined twice before anything is
/// handed to a sampler.
pub mod validate;

/// Reading expression trees from JSON.
pub mod schema;

/// Rule sets matching JSON documents.
pub mod json;

pub use char_range::{CharRange, CharRangeEntry};
pub use error::GrammarError;
pub use escape::{escape, EscapeContext, Escaped};
pub use grammar::{DerivationRule, Grammar, GrammarKind, Group, GroupKind, Node, MAX_DEPTH};
pub use json::{JsonBuilderConfig, JsonComponent, JsonRuleBuilder};
pub use quantifier::Quantifier;
pub use rules::RuleSet;
pub use schema::{parse_expr, Expr};
pub use validate::{validate, ValidationError};
