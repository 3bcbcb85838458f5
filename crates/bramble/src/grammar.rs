//! The grammar expression tree.
//!
//! A [`Grammar`] is a cheap, cloneable handle to an immutable node. Cloning a
//! handle shares the node through an atomic reference count, so the same
//! subtree can be referenced from many parents (and from many threads) without
//! copying. Nodes are never mutated after construction, which also makes the
//! tree acyclic: a parent can only be built from children that already exist.
//!
//! Every operation on the tree dispatches by matching on [`Node`]:
//! rendering lives in [`render`], simplification in [`simplify`], and
//! structural equality and copying below.

use std::fmt;
use std::sync::Arc;

use crate::char_range::CharRange;
use crate::error::GrammarError;
use crate::quantifier::Quantifier;

pub mod render;
pub mod simplify;

/// Deepest nesting accepted by the composite constructors.
///
/// Rendering and simplification recurse once per level, so the limit keeps
/// them well within a default thread stack.
pub const MAX_DEPTH: usize = 256;

/// A shared, immutable grammar expression.
#[derive(Clone)]
pub struct Grammar {
    node: Arc<Node>,
}

/// The variants a grammar expression can take.
#[derive(Debug)]
pub enum Node {
    /// Matches a string exactly. Empty strings vanish on simplification.
    StringLiteral(String),
    /// Matches a single character from (or outside of) a set.
    CharRange(CharRange),
    /// A named production, `symbol ::= value`.
    DerivationRule(DerivationRule),
    /// Concatenation of subexpressions.
    Sequence(Group),
    /// Alternation between subexpressions.
    Choice(Group),
}

/// The tag of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// [`Node::StringLiteral`].
    StringLiteral,
    /// [`Node::CharRange`].
    CharRange,
    /// [`Node::DerivationRule`].
    DerivationRule,
    /// [`Node::Sequence`].
    Sequence,
    /// [`Node::Choice`].
    Choice,
}

/// How the subexpressions of a [`Group`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Logical AND, joined with a space.
    Sequence,
    /// Logical OR, joined with `" | "`.
    Choice,
}

impl GroupKind {
    /// The separator placed between rendered subexpressions.
    #[must_use]
    pub fn separator(self) -> &'static str {
        match self {
            GroupKind::Sequence => " ",
            GroupKind::Choice => " | ",
        }
    }
}

/// A named production binding a symbol to an expression.
#[derive(Debug, Clone)]
pub struct DerivationRule {
    symbol: String,
    value: Grammar,
}

impl DerivationRule {
    /// The non-terminal symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The expression the symbol derives into.
    #[must_use]
    pub fn value(&self) -> &Grammar {
        &self.value
    }
}

/// The payload of a sequence or choice.
#[derive(Debug, Clone)]
pub struct Group {
    subexprs: Vec<Grammar>,
    quantifier: Quantifier,
    depth: usize,
}

impl Group {
    fn new(subexprs: Vec<Grammar>, quantifier: Quantifier) -> Result<Self, GrammarError> {
        if subexprs.is_empty() {
            return Err(GrammarError::EmptyGroup);
        }
        let group = Self::from_parts(subexprs, quantifier);
        check_depth(group.depth)?;
        Ok(group)
    }

    /// Assembles a group whose children and quantifier are already known to be valid.
    pub(crate) fn from_parts(subexprs: Vec<Grammar>, quantifier: Quantifier) -> Self {
        let depth = 1 + subexprs.iter().map(Grammar::depth).max().unwrap_or(0);
        Self {
            subexprs,
            quantifier,
            depth,
        }
    }

    /// The subexpressions, in order.
    #[must_use]
    pub fn subexprs(&self) -> &[Grammar] {
        &self.subexprs
    }

    /// The repetition bounds of the whole group.
    #[must_use]
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Number of subexpressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subexprs.len()
    }

    /// Returns `true` if the group has no subexpressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subexprs.is_empty()
    }
}

fn check_depth(depth: usize) -> Result<(), GrammarError> {
    if depth > MAX_DEPTH {
        return Err(GrammarError::DepthLimit { limit: MAX_DEPTH });
    }
    Ok(())
}

impl Grammar {
    pub(crate) fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_node(Node::StringLiteral(value.into()))
    }

    /// Creates a character range from `(start, end)` pairs.
    ///
    /// # Errors
    ///
    /// See [`CharRange::new`].
    pub fn char_range<I>(ranges: I, negate: bool) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        CharRange::new(ranges, negate).map(Self::from)
    }

    /// Creates a character range matching any of `chars`.
    ///
    /// # Errors
    ///
    /// See [`CharRange::from_chars`].
    pub fn from_chars<I>(chars: I, negate: bool) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = char>,
    {
        CharRange::from_chars(chars, negate).map(Self::from)
    }

    /// Creates a derivation rule `symbol ::= value`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::DepthLimit`] if `value` is already nested [`MAX_DEPTH`] deep.
    pub fn rule(symbol: impl Into<String>, value: Grammar) -> Result<Self, GrammarError> {
        check_depth(value.depth() + 1)?;
        Ok(Self::rule_unchecked(symbol.into(), value))
    }

    pub(crate) fn rule_unchecked(symbol: String, value: Grammar) -> Self {
        Self::from_node(Node::DerivationRule(DerivationRule { symbol, value }))
    }

    /// Creates a sequence (concatenation) of subexpressions.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyGroup`] if `subexprs` is empty, or
    /// [`GrammarError::DepthLimit`] if the result would nest too deeply.
    pub fn sequence<I>(subexprs: I, quantifier: Quantifier) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = Grammar>,
    {
        let group = Group::new(subexprs.into_iter().collect(), quantifier)?;
        Ok(Self::from_node(Node::Sequence(group)))
    }

    /// Creates a choice (alternation) between subexpressions.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyGroup`] if `subexprs` is empty, or
    /// [`GrammarError::DepthLimit`] if the result would nest too deeply.
    pub fn choice<I>(subexprs: I, quantifier: Quantifier) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = Grammar>,
    {
        let group = Group::new(subexprs.into_iter().collect(), quantifier)?;
        Ok(Self::from_node(Node::Choice(group)))
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// The variant tag of the underlying node.
    #[must_use]
    pub fn kind(&self) -> GrammarKind {
        match *self.node {
            Node::StringLiteral(_) => GrammarKind::StringLiteral,
            Node::CharRange(_) => GrammarKind::CharRange,
            Node::DerivationRule(_) => GrammarKind::DerivationRule,
            Node::Sequence(_) => GrammarKind::Sequence,
            Node::Choice(_) => GrammarKind::Choice,
        }
    }

    /// The literal text, if this is a string literal.
    #[must_use]
    pub fn as_string_literal(&self) -> Option<&str> {
        match &*self.node {
            Node::StringLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// The character range, if this is one.
    #[must_use]
    pub fn as_char_range(&self) -> Option<&CharRange> {
        match &*self.node {
            Node::CharRange(range) => Some(range),
            _ => None,
        }
    }

    /// The rule payload, if this is a derivation rule.
    #[must_use]
    pub fn as_rule(&self) -> Option<&DerivationRule> {
        match &*self.node {
            Node::DerivationRule(rule) => Some(rule),
            _ => None,
        }
    }

    /// The group payload and how it combines, if this is a sequence or choice.
    #[must_use]
    pub fn as_group(&self) -> Option<(GroupKind, &Group)> {
        match &*self.node {
            Node::Sequence(group) => Some((GroupKind::Sequence, group)),
            Node::Choice(group) => Some((GroupKind::Choice, group)),
            _ => None,
        }
    }

    /// Nesting depth of the tree; leaves have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &*self.node {
            Node::StringLiteral(_) | Node::CharRange(_) => 1,
            Node::DerivationRule(rule) => rule.value.depth() + 1,
            Node::Sequence(group) | Node::Choice(group) => group.depth,
        }
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Grammar) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Structural equality.
    ///
    /// Two grammars are equal when they have the same variant and recursively
    /// equal payloads. `check_quantifier` controls whether the quantifiers of
    /// the two top-level nodes take part; nested groups always compare theirs.
    #[must_use]
    pub fn equals(&self, other: &Grammar, check_quantifier: bool) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (&*self.node, &*other.node) {
            (Node::StringLiteral(a), Node::StringLiteral(b)) => a == b,
            (Node::CharRange(a), Node::CharRange(b)) => a == b,
            (Node::DerivationRule(a), Node::DerivationRule(b)) => {
                a.symbol == b.symbol && a.value.equals(&b.value, true)
            }
            (Node::Sequence(a), Node::Sequence(b)) | (Node::Choice(a), Node::Choice(b)) => {
                (!check_quantifier || a.quantifier == b.quantifier)
                    && a.subexprs.len() == b.subexprs.len()
                    && a
                        .subexprs
                        .iter()
                        .zip(&b.subexprs)
                        .all(|(x, y)| x.equals(y, true))
            }
            _ => false,
        }
    }

    /// Copies the top-level node.
    ///
    /// Leaves are duplicated by value. Rules and groups get a fresh node that
    /// shares the same children, so the copy is cheap regardless of tree size.
    #[must_use]
    pub fn copy(&self) -> Grammar {
        let node = match &*self.node {
            Node::StringLiteral(value) => Node::StringLiteral(value.clone()),
            Node::CharRange(range) => Node::CharRange(range.clone()),
            Node::DerivationRule(rule) => Node::DerivationRule(rule.clone()),
            Node::Sequence(group) => Node::Sequence(group.clone()),
            Node::Choice(group) => Node::Choice(group.clone()),
        };
        Self::from_node(node)
    }
}

impl From<CharRange> for Grammar {
    fn from(range: CharRange) -> Self {
        Self::from_node(Node::CharRange(range))
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, true)
    }
}

impl Eq for Grammar {}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.node {
            Node::StringLiteral(value) => f.debug_tuple("StringLiteral").field(value).finish(),
            Node::CharRange(range) => {
                let ranges: Vec<_> = range
                    .ranges()
                    .iter()
                    .map(|entry| (entry.start(), entry.end()))
                    .collect();
                f.debug_struct("CharRange")
                    .field("ranges", &ranges)
                    .field("negate", &range.is_negated())
                    .finish()
            }
            Node::DerivationRule(rule) => f
                .debug_struct("DerivationRule")
                .field("symbol", &rule.symbol)
                .field("value", &rule.value)
                .finish(),
            Node::Sequence(group) | Node::Choice(group) => {
                let name = match self.kind() {
                    GrammarKind::Choice => "Choice",
                    _ => "Sequence",
                };
                f.debug_struct(name)
                    .field("subexprs", &group.subexprs)
                    .field("quantifier", &(group.quantifier.min(), group.quantifier.max()))
                    .finish()
            }
        }
    }
}

/// Renders the full form of the grammar, writing nothing when it renders empty.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.render() {
            Ok(Some(text)) => f.write_str(&text),
            Ok(None) => Ok(()),
            Err(_) => Err(fmt::Error),
        }
    }
}
