//! Ordered collections of derivation rules.
//!
//! A [`RuleSet`] is what a GBNF file contains: one `symbol ::= value` line per
//! rule, the first rule being the entry point. Rules nested inside other rules
//! are referenced by symbol in the rendered text, so a complete file needs
//! every nested rule listed alongside the root.

use std::slice;

use crate::error::GrammarError;
use crate::grammar::{Grammar, Node};

/// Derivation rules, unique by symbol, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Grammar>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `root` and every rule nested beneath it.
    ///
    /// Rules are gathered depth-first in child order. When two nested rules
    /// share a symbol, the first one reached is kept.
    #[must_use]
    pub fn collect(root: &Grammar) -> Self {
        let mut set = Self::new();
        set.visit(root);
        set
    }

    fn visit(&mut self, g: &Grammar) {
        match g.node() {
            Node::DerivationRule(rule) => {
                if self.insert(g.clone()) {
                    self.visit(rule.value());
                }
            }
            Node::Sequence(group) | Node::Choice(group) => {
                for child in group.subexprs() {
                    self.visit(child);
                }
            }
            Node::StringLiteral(_) | Node::CharRange(_) => {}
        }
    }

    fn insert(&mut self, rule: Grammar) -> bool {
        let symbol = rule.as_rule().map(|r| r.symbol().to_owned());
        if symbol.is_some_and(|symbol| self.get(&symbol).is_some()) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Appends a rule.
    ///
    /// Returns `false`, leaving the set unchanged, if a rule with the same
    /// symbol is already present.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Schema`] if `rule` is not a derivation rule.
    pub fn push(&mut self, rule: Grammar) -> Result<bool, GrammarError> {
        if rule.as_rule().is_none() {
            return Err(GrammarError::Schema(format!(
                "only derivation rules can be added to a rule set, got {:?}",
                rule.kind()
            )));
        }
        Ok(self.insert(rule))
    }

    /// Looks up a rule by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Grammar> {
        self.rules
            .iter()
            .find(|g| g.as_rule().is_some_and(|rule| rule.symbol() == symbol))
    }

    /// The entry-point rule.
    #[must_use]
    pub fn first(&self) -> Option<&Grammar> {
        self.rules.first()
    }

    /// Iterates over the rules in order.
    pub fn iter(&self) -> slice::Iter<'_, Grammar> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Simplifies every rule, dropping those that become empty.
    #[must_use]
    pub fn simplify(&self) -> Self {
        Self {
            rules: self.rules.iter().filter_map(Grammar::simplify).collect(),
        }
    }

    /// Renders the set as GBNF text, one rule per line.
    ///
    /// Rules whose body renders empty are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::OutOfMemory`] if the output cannot be allocated.
    pub fn render(&self) -> Result<String, GrammarError> {
        let mut out = String::new();
        for rule in &self.rules {
            if let Some(line) = rule.render_with(true, false)? {
                out.try_reserve(line.len() + 1)?;
                out.push_str(&line);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Grammar;
    type IntoIter = slice::Iter<'a, Grammar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{choice, digit, literal, one_or_more, sequence};

    fn number_grammar() -> Grammar {
        let digits = Grammar::rule("digits", one_or_more(&digit()).unwrap()).unwrap();
        let sign = Grammar::rule("sign", choice([literal("+"), literal("-")]).unwrap()).unwrap();
        let signed = sequence([sign, digits.clone()]).unwrap();
        Grammar::rule("root", choice([signed, digits]).unwrap()).unwrap()
    }

    #[test]
    fn test_collect_walks_depth_first() {
        let set = RuleSet::collect(&number_grammar());
        let symbols: Vec<_> = set
            .iter()
            .map(|g| g.as_rule().unwrap().symbol().to_owned())
            .collect();
        assert_eq!(symbols, ["root", "sign", "digits"]);
    }

    #[test]
    fn test_collect_from_non_rule_root() {
        let inner = Grammar::rule("inner", literal("x")).unwrap();
        let root = sequence([inner, literal("y")]).unwrap();
        let set = RuleSet::collect(&root);
        assert_eq!(set.len(), 1);
        assert!(set.get("inner").is_some());
    }

    #[test]
    fn test_render_lists_each_rule() {
        let set = RuleSet::collect(&number_grammar());
        assert_eq!(
            set.render().unwrap(),
            "root ::= sign digits | digits\nsign ::= \"+\" | \"-\"\ndigits ::= [0-9]+\n"
        );
    }

    #[test]
    fn test_push_keeps_first_definition() {
        let mut set = RuleSet::new();
        assert!(set.push(Grammar::rule("a", literal("1")).unwrap()).unwrap());
        assert!(!set.push(Grammar::rule("a", literal("2")).unwrap()).unwrap());
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("a").unwrap().as_rule().unwrap().value().as_string_literal(),
            Some("1")
        );
    }

    #[test]
    fn test_push_rejects_non_rules() {
        let mut set = RuleSet::new();
        assert!(matches!(
            set.push(literal("x")),
            Err(GrammarError::Schema(_))
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_rules_are_skipped() {
        let mut set = RuleSet::new();
        set.push(Grammar::rule("empty", literal("")).unwrap()).unwrap();
        set.push(Grammar::rule("full", literal("x")).unwrap()).unwrap();
        assert_eq!(set.render().unwrap(), "full ::= \"x\"\n");

        let simplified = set.simplify();
        assert_eq!(simplified.len(), 1);
        assert_eq!(simplified.first().unwrap().as_rule().unwrap().symbol(), "full");
    }
}
