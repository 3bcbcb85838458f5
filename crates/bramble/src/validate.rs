//! Validation routines for rule sets.
//!
//! This module performs structural checks over a [`RuleSet`] before it is
//! written out as a GBNF file: symbols must be legal identifiers, every rule
//! referenced from another rule must be listed with the same body, and rules
//! that no one can reach or that render to nothing are reported as warnings.

use std::collections::HashSet;

use tracing::warn;

use crate::grammar::{DerivationRule, Grammar, Node};
use crate::rules::RuleSet;

/// Represents a validation failure encountered when checking a rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The descriptive human-readable error message.
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Performs semantic validation of a [`RuleSet`].
///
/// - Checks that every symbol is a GBNF identifier.
/// - Checks that every nested rule is listed, with the same body.
/// - Warns about rules unreachable from the first rule.
/// - Warns about rules that render empty.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the first structural violation found.
pub fn validate(rules: &RuleSet) -> Result<(), ValidationError> {
    check_symbols(rules)?;
    check_references(rules)?;
    check_unreachable_rules(rules);
    check_empty_rules(rules);
    Ok(())
}

/// Returns `true` for a non-empty run of ASCII letters, digits and dashes.
#[must_use]
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn symbol_of(rule: &Grammar) -> &str {
    rule.as_rule().map_or("", DerivationRule::symbol)
}

fn check_symbols(rules: &RuleSet) -> Result<(), ValidationError> {
    for rule in rules {
        let symbol = symbol_of(rule);
        if !is_valid_symbol(symbol) {
            return Err(ValidationError::new(format!(
                "invalid rule symbol '{symbol}': expected letters, digits or '-'"
            )));
        }
    }
    Ok(())
}

fn check_references(rules: &RuleSet) -> Result<(), ValidationError> {
    for rule in rules {
        let context = symbol_of(rule);
        let mut referenced = Vec::new();
        if let Some(body) = rule.as_rule() {
            collect_references(body.value(), &mut referenced);
        }
        for nested in referenced {
            let name = symbol_of(nested);
            match rules.get(name) {
                None => {
                    return Err(ValidationError::new(format!(
                        "undefined symbol '{name}' referenced in rule '{context}'"
                    )));
                }
                Some(defined) if !defined.equals(nested, true) => {
                    return Err(ValidationError::new(format!(
                        "symbol '{name}' referenced in rule '{context}' conflicts with its definition"
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Pushes every rule nested in `g`, without descending into those rules.
fn collect_references<'a>(g: &'a Grammar, referenced: &mut Vec<&'a Grammar>) {
    match g.node() {
        Node::DerivationRule(_) => referenced.push(g),
        Node::Sequence(group) | Node::Choice(group) => {
            for child in group.subexprs() {
                collect_references(child, referenced);
            }
        }
        Node::StringLiteral(_) | Node::CharRange(_) => {
            // terminals: nothing to traverse
        }
    }
}

fn check_unreachable_rules(rules: &RuleSet) {
    // Start from the first rule (convention: entry point)
    let Some(entry_point) = rules.first() else {
        return;
    };

    let mut reachable = HashSet::new();
    let mut to_visit = vec![symbol_of(entry_point)];

    while let Some(symbol) = to_visit.pop() {
        if !reachable.insert(symbol) {
            continue;
        }
        if let Some(body) = rules.get(symbol).and_then(Grammar::as_rule) {
            let mut referenced = Vec::new();
            collect_references(body.value(), &mut referenced);
            to_visit.extend(referenced.into_iter().map(symbol_of));
        }
    }

    for rule in rules {
        let symbol = symbol_of(rule);
        if !reachable.contains(symbol) {
            warn!(symbol, "unreachable rule");
        }
    }
}

fn check_empty_rules(rules: &RuleSet) {
    for rule in rules {
        if matches!(rule.render_with(true, false), Ok(None)) {
            warn!(symbol = symbol_of(rule), "rule renders empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{digit, literal, one_or_more, sequence};

    #[test]
    fn test_valid_rule_set() {
        let digits = Grammar::rule("digits", one_or_more(&digit()).unwrap()).unwrap();
        let root = Grammar::rule("root", sequence([literal("#"), digits]).unwrap()).unwrap();
        assert_eq!(validate(&RuleSet::collect(&root)), Ok(()));
    }

    #[test]
    fn test_symbol_syntax() {
        assert!(is_valid_symbol("item-ws"));
        assert!(is_valid_symbol("rule2"));
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("snake_case"));
        assert!(!is_valid_symbol("has space"));

        let bad = Grammar::rule("not valid", literal("x")).unwrap();
        let err = validate(&RuleSet::collect(&bad)).unwrap_err();
        assert!(err.message.contains("invalid rule symbol 'not valid'"));
    }

    #[test]
    fn test_undefined_reference() {
        let nested = Grammar::rule("nested", literal("x")).unwrap();
        let root = Grammar::rule("root", sequence([nested, literal("y")]).unwrap()).unwrap();
        let mut set = RuleSet::new();
        set.push(root).unwrap();
        let err = validate(&set).unwrap_err();
        assert_eq!(
            err.to_string(),
            "undefined symbol 'nested' referenced in rule 'root'"
        );
    }

    #[test]
    fn test_conflicting_definition() {
        let first = Grammar::rule("item", literal("a")).unwrap();
        let second = Grammar::rule("item", literal("b")).unwrap();
        let root = Grammar::rule("root", sequence([first, second]).unwrap()).unwrap();
        let err = validate(&RuleSet::collect(&root)).unwrap_err();
        assert!(err.message.contains("conflicts with its definition"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut set = RuleSet::new();
        set.push(Grammar::rule("root", literal("x")).unwrap()).unwrap();
        set.push(Grammar::rule("orphan", literal("")).unwrap()).unwrap();
        assert_eq!(validate(&set), Ok(()));
        assert_eq!(validate(&RuleSet::new()), Ok(()));
    }
}
