//! Normalizing rewrites over grammar trees.
//!
//! Simplification is bottom-up and never fails. Its output is a fixpoint:
//! simplifying a simplified tree yields a structurally equal tree.

use tracing::trace;

use crate::quantifier::Quantifier;

use super::{Grammar, Group, GroupKind, Node};

impl Grammar {
    /// Rewrites this expression into an equivalent, minimal form.
    ///
    /// Returns `None` when the expression matches only the empty string and
    /// would contribute nothing to the surface grammar.
    ///
    /// - Empty literals vanish, and single-character ranges become literals.
    /// - A rule whose body vanishes vanishes with it.
    /// - Groups drop vanished children and absorb default-quantified children of
    ///   the same kind. Adjacent literals in a sequence are concatenated and
    ///   repeated choice arms are dropped, keeping the first.
    /// - A group left with a single child unwraps to that child when its
    ///   quantifier is the default. Otherwise it becomes a quantified sequence,
    ///   even if it was a choice; a plain sequence child, or an optional one
    ///   under an optional marker, lends its operands directly.
    #[must_use]
    pub fn simplify(&self) -> Option<Grammar> {
        match self.node() {
            Node::StringLiteral(value) => {
                if value.is_empty() {
                    None
                } else {
                    Some(self.copy())
                }
            }
            Node::CharRange(range) => match range.single_char() {
                Some(c) if !range.is_negated() => Some(Grammar::string(c)),
                _ => Some(self.copy()),
            },
            Node::DerivationRule(rule) => {
                let value = rule.value().simplify()?;
                Some(Grammar::rule_unchecked(rule.symbol().to_owned(), value))
            }
            Node::Sequence(group) => {
                simplify_group(GroupKind::Sequence, group.subexprs(), group.quantifier())
            }
            Node::Choice(group) => {
                simplify_group(GroupKind::Choice, group.subexprs(), group.quantifier())
            }
        }
    }
}

fn build(kind: GroupKind, subexprs: Vec<Grammar>, quantifier: Quantifier) -> Grammar {
    let group = Group::from_parts(subexprs, quantifier);
    Grammar::from_node(match kind {
        GroupKind::Sequence => Node::Sequence(group),
        GroupKind::Choice => Node::Choice(group),
    })
}

fn simplify_group(kind: GroupKind, subexprs: &[Grammar], quantifier: Quantifier) -> Option<Grammar> {
    let children = subexprs.iter().filter_map(Grammar::simplify).collect();
    reduce_group(kind, children, quantifier)
}

/// Normalizes a group whose children are already simplified.
fn reduce_group(kind: GroupKind, simplified: Vec<Grammar>, quantifier: Quantifier) -> Option<Grammar> {
    let mut children = Vec::with_capacity(simplified.len());
    for child in simplified {
        match child.as_group() {
            Some((inner_kind, inner)) if inner_kind == kind && inner.quantifier().is_default() => {
                trace!(?kind, spliced = inner.len(), "flattening nested group");
                children.extend(inner.subexprs().iter().cloned());
            }
            _ => children.push(child),
        }
    }

    let mut children = match kind {
        GroupKind::Sequence => merge_literals(children),
        GroupKind::Choice => dedup(children),
    };

    match children.len() {
        0 => None,
        1 => children
            .pop()
            .and_then(|child| collapse_single(child, quantifier)),
        _ => Some(build(kind, children, quantifier)),
    }
}

/// Collapses a group that has been reduced to one child.
///
/// A choice with one arm is a sequence with one operand, so both end up here
/// and a quantified survivor is always rebuilt as a sequence.
fn collapse_single(child: Grammar, quantifier: Quantifier) -> Option<Grammar> {
    if quantifier.is_default() {
        return Some(child);
    }
    if let Some((GroupKind::Sequence, inner)) = child.as_group() {
        let inner_quantifier = inner.quantifier();
        if inner_quantifier.is_default()
            || (quantifier.is_optional() && inner_quantifier.is_optional())
        {
            trace!("collapsing nested sequence");
            return reduce_group(GroupKind::Sequence, inner.subexprs().to_vec(), quantifier);
        }
    }
    Some(build(GroupKind::Sequence, vec![child], quantifier))
}

/// Concatenates each run of adjacent string literals into one literal.
fn merge_literals(children: Vec<Grammar>) -> Vec<Grammar> {
    let mut merged = Vec::with_capacity(children.len());
    let mut run: Vec<Grammar> = Vec::new();
    for child in children {
        if child.as_string_literal().is_some() {
            run.push(child);
        } else {
            flush_literals(&mut run, &mut merged);
            merged.push(child);
        }
    }
    flush_literals(&mut run, &mut merged);
    merged
}

fn flush_literals(run: &mut Vec<Grammar>, merged: &mut Vec<Grammar>) {
    if run.len() > 1 {
        trace!(count = run.len(), "merging adjacent literals");
        let text: String = run.iter().filter_map(Grammar::as_string_literal).collect();
        merged.push(Grammar::string(text));
        run.clear();
    } else {
        merged.append(run);
    }
}

/// Drops every child structurally equal to an earlier one.
fn dedup(children: Vec<Grammar>) -> Vec<Grammar> {
    let mut kept: Vec<Grammar> = Vec::with_capacity(children.len());
    for child in children {
        if kept.iter().any(|seen| seen.equals(&child, true)) {
            trace!("dropping duplicate alternative");
        } else {
            kept.push(child);
        }
    }
    kept
}
