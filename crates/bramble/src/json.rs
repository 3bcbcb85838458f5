//! Rule sets that match JSON documents.
//!
//! A [`JsonComponent`] describes the shape of a JSON value: fixed literals,
//! free-form strings, booleans and arrays, integers within optional bounds,
//! objects with known keys, or an arbitrary [`Grammar`] spliced in as-is. [`JsonRuleBuilder`] turns a
//! component into a [`RuleSet`] whose `root` rule matches the serialized value,
//! with whitespace between items governed by a [`JsonBuilderConfig`].
//!
//! Unless the configuration is compact, two helper rules are emitted next to
//! `root`: `item-ws` (between array items and object members, optionally
//! spanning lines) and `key-ws` (after an object key's colon).

use facet::Facet;
use tracing::debug;

use crate::char_range::{CharRange, CharRangeEntry};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::quantifier::Quantifier;
use crate::rules::RuleSet;

mod integer;

/// Symbol of the rule matching whitespace between items.
pub const ITEM_WS: &str = "item-ws";
/// Symbol of the rule matching whitespace after an object key.
pub const KEY_WS: &str = "key-ws";
/// Symbol of the entry-point rule.
pub const ROOT: &str = "root";

/// The shape of a JSON value to match.
#[derive(Debug, Clone)]
pub enum JsonComponent {
    /// `null`.
    Null,
    /// Either `true` or `false`.
    Boolean,
    /// Exactly `true` or exactly `false`.
    BooleanLiteral(bool),
    /// A specific integer.
    IntegerLiteral(i64),
    /// Any integer within the inclusive bounds, written without leading zeros.
    Integer {
        /// Smallest value allowed, or unbounded below.
        min: Option<i64>,
        /// Largest value allowed, or unbounded above.
        max: Option<i64>,
    },
    /// Any string whose length in characters lies within the bounds.
    String {
        /// Minimum number of characters.
        min: u32,
        /// Maximum number of characters, or unbounded.
        max: Option<u32>,
    },
    /// A specific string, matched in its JSON-encoded form.
    StringLiteral(String),
    /// An array whose items all match `item`, with a bounded item count.
    Array {
        /// Shape of every item.
        item: Box<JsonComponent>,
        /// Minimum number of items.
        min: u32,
        /// Maximum number of items, or unbounded.
        max: Option<u32>,
    },
    /// An array of fixed length with one shape per position.
    ArrayLiteral(Vec<JsonComponent>),
    /// An object with the given keys, in order.
    Object(Vec<(String, JsonComponent)>),
    /// A grammar used verbatim.
    Grammar(Grammar),
}

impl From<Grammar> for JsonComponent {
    fn from(g: Grammar) -> Self {
        Self::Grammar(g)
    }
}

impl From<bool> for JsonComponent {
    fn from(value: bool) -> Self {
        Self::BooleanLiteral(value)
    }
}

impl From<i64> for JsonComponent {
    fn from(value: i64) -> Self {
        Self::IntegerLiteral(value)
    }
}

impl From<&str> for JsonComponent {
    fn from(value: &str) -> Self {
        Self::StringLiteral(value.to_owned())
    }
}

/// Whitespace and encoding options for [`JsonRuleBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBuilderConfig {
    /// Spaces per indentation level. Must be at least 1.
    pub indent: u32,
    /// Deepest indentation level to allow, or `None` for no limit.
    /// A limit of zero rules out multi-line output.
    pub max_level: Option<u32>,
    /// Whether items may be separated by newlines.
    pub allow_multiline: bool,
    /// Whether whitespace between items may be omitted.
    pub allow_compact: bool,
    /// Emit no whitespace rules at all.
    pub compact: bool,
    /// Alternatives matching one space.
    pub space_chars: Vec<String>,
    /// Alternatives matching one newline.
    pub newline_chars: Vec<String>,
    /// Encode non-ASCII characters in string literals as `\u` escapes.
    pub ensure_ascii: bool,
}

impl Default for JsonBuilderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            max_level: Some(3),
            allow_multiline: true,
            allow_compact: true,
            compact: false,
            space_chars: vec![" ".to_owned(), "\t".to_owned()],
            newline_chars: vec!["\n".to_owned()],
            ensure_ascii: true,
        }
    }
}

/// Partial configuration as read from JSON; absent fields keep their defaults.
#[derive(Debug, Default, Facet)]
struct ConfigOverrides {
    #[facet(default)]
    indent: Option<u32>,
    /// Negative means unlimited.
    #[facet(default)]
    max_level: Option<i64>,
    #[facet(default)]
    allow_multiline: Option<bool>,
    #[facet(default)]
    allow_compact: Option<bool>,
    #[facet(default)]
    compact: Option<bool>,
    #[facet(default)]
    space_chars: Option<Vec<String>>,
    #[facet(default)]
    newline_chars: Option<Vec<String>>,
    #[facet(default)]
    ensure_ascii: Option<bool>,
}

impl JsonBuilderConfig {
    /// Reads a configuration from JSON, filling absent fields with defaults.
    ///
    /// A negative `max_level` means no limit.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::JsonParse`] if the JSON cannot be decoded, or
    /// [`GrammarError::InvalidConfig`] if `max_level` does not fit.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let overrides: ConfigOverrides =
            facet_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))?;
        let mut config = Self::default();
        if let Some(indent) = overrides.indent {
            config.indent = indent;
        }
        if let Some(level) = overrides.max_level {
            config.max_level = if level < 0 {
                None
            } else {
                Some(u32::try_from(level).map_err(|_| {
                    GrammarError::InvalidConfig(format!("max_level out of range: {level}"))
                })?)
            };
        }
        if let Some(allow) = overrides.allow_multiline {
            config.allow_multiline = allow;
        }
        if let Some(allow) = overrides.allow_compact {
            config.allow_compact = allow;
        }
        if let Some(compact) = overrides.compact {
            config.compact = compact;
        }
        if let Some(chars) = overrides.space_chars {
            config.space_chars = chars;
        }
        if let Some(chars) = overrides.newline_chars {
            config.newline_chars = chars;
        }
        if let Some(ensure) = overrides.ensure_ascii {
            config.ensure_ascii = ensure;
        }
        Ok(config)
    }
}

/// Builds rule sets matching JSON values.
#[derive(Debug, Clone)]
pub struct JsonRuleBuilder {
    config: JsonBuilderConfig,
    space: Grammar,
    newline: Grammar,
}

fn alternatives(options: &[String], field: &str) -> Result<Grammar, GrammarError> {
    match options {
        [] => Err(GrammarError::InvalidConfig(format!("{field} must not be empty"))),
        [only] => Ok(Grammar::string(only.as_str())),
        _ => Grammar::choice(options.iter().map(|s| Grammar::string(s.as_str())), Quantifier::ONE),
    }
}

impl JsonRuleBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidConfig`] if `indent` is zero or either
    /// character list is empty.
    pub fn new(config: JsonBuilderConfig) -> Result<Self, GrammarError> {
        if config.indent < 1 {
            return Err(GrammarError::InvalidConfig(format!(
                "indent must be positive: {}",
                config.indent
            )));
        }
        let space = alternatives(&config.space_chars, "space_chars")?;
        let newline = alternatives(&config.newline_chars, "newline_chars")?;
        Ok(Self {
            config,
            space,
            newline,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &JsonBuilderConfig {
        &self.config
    }

    /// Whitespace separating items of arrays and objects.
    ///
    /// # Errors
    ///
    /// Returns a constructor error if the configured bounds are unrepresentable.
    pub fn item_ws(&self) -> Result<Grammar, GrammarError> {
        let config = &self.config;
        let quantifier = if config.allow_compact {
            Quantifier::OPTIONAL
        } else {
            Quantifier::ONE
        };
        let multiline = config.allow_multiline && config.max_level != Some(0);
        if !multiline {
            if quantifier.is_default() {
                return Ok(self.space.clone());
            }
            return Grammar::sequence([self.space.clone()], quantifier);
        }

        let deepest = config.max_level.map(|level| config.indent.saturating_mul(level));
        let spaces = Grammar::sequence([self.space.clone()], Quantifier::new(0, deepest)?)?;
        let indent_ws = if config.indent < 2 {
            self.space.clone()
        } else {
            spaces.clone()
        };
        let newline_ws = Grammar::sequence([self.newline.clone(), spaces], Quantifier::ONE)?;
        Grammar::choice([newline_ws, indent_ws], quantifier)
    }

    /// Whitespace after the colon of an object member.
    ///
    /// # Errors
    ///
    /// Returns a constructor error if the grammar cannot be built.
    pub fn key_ws(&self) -> Result<Grammar, GrammarError> {
        let space = Grammar::string(" ");
        if self.config.allow_compact {
            Grammar::sequence([space], Quantifier::OPTIONAL)
        } else {
            Ok(space)
        }
    }

    /// Builds the rules matching `value`, entry point first.
    ///
    /// # Errors
    ///
    /// Returns any error raised while constructing the grammar.
    pub fn build(&self, value: &JsonComponent) -> Result<RuleSet, GrammarError> {
        let (item_ws, key_ws) = if self.config.compact {
            (None, None)
        } else {
            (
                Some(Grammar::rule(ITEM_WS, self.item_ws()?)?),
                Some(Grammar::rule(KEY_WS, self.key_ws()?)?),
            )
        };
        let ws = Whitespace {
            item: item_ws.as_ref(),
            key: key_ws.as_ref(),
            ensure_ascii: self.config.ensure_ascii,
        };
        let root = Grammar::rule(ROOT, ws.component(value)?)?;

        let mut rules = RuleSet::new();
        rules.push(root)?;
        for rule in [item_ws, key_ws].into_iter().flatten() {
            rules.push(rule)?;
        }
        debug!(rules = rules.len(), "built JSON rule set");
        Ok(rules)
    }

    /// Builds the rules matching `value` and renders them as GBNF text.
    ///
    /// # Errors
    ///
    /// See [`JsonRuleBuilder::build`] and [`RuleSet::render`].
    pub fn render(&self, value: &JsonComponent) -> Result<String, GrammarError> {
        self.build(value)?.render()
    }
}

/// Whitespace rules threaded through nested arrays and objects.
struct Whitespace<'a> {
    item: Option<&'a Grammar>,
    key: Option<&'a Grammar>,
    ensure_ascii: bool,
}

impl Whitespace<'_> {
    fn component(&self, value: &JsonComponent) -> Result<Grammar, GrammarError> {
        match value {
            JsonComponent::Null => Ok(Grammar::string("null")),
            JsonComponent::Boolean => Grammar::choice(
                [Grammar::string("true"), Grammar::string("false")],
                Quantifier::ONE,
            ),
            JsonComponent::BooleanLiteral(value) => {
                Ok(Grammar::string(if *value { "true" } else { "false" }))
            }
            JsonComponent::IntegerLiteral(value) => Ok(Grammar::string(value.to_string())),
            JsonComponent::Integer { min, max } => integer::integer(*min, *max),
            JsonComponent::String { min, max } => string_grammar(*min, *max),
            JsonComponent::StringLiteral(value) => Ok(Grammar::string(encode_string(
                value,
                self.ensure_ascii,
            ))),
            JsonComponent::Array { item, min, max } => self.array(item, *min, *max),
            JsonComponent::ArrayLiteral(values) => self.array_literal(values),
            JsonComponent::Object(members) => self.object(members),
            JsonComponent::Grammar(g) => Ok(g.copy()),
        }
    }

    fn push_item_ws(&self, parts: &mut Vec<Grammar>) {
        if let Some(ws) = self.item {
            parts.push(ws.clone());
        }
    }

    fn array(&self, item: &JsonComponent, min: u32, max: Option<u32>) -> Result<Grammar, GrammarError> {
        if max == Some(0) {
            return Ok(Grammar::string("[]"));
        }
        Quantifier::new(min, max)?;
        let value = self.component(item)?;

        let mut first = Vec::new();
        self.push_item_ws(&mut first);
        first.push(value.clone());

        let mut parts = vec![Grammar::sequence(first, Quantifier::ONE)?];
        if max.is_none_or(|max| max > 1) {
            let mut rest = vec![Grammar::string(",")];
            self.push_item_ws(&mut rest);
            rest.push(value);
            let repeat = Quantifier::new(min.saturating_sub(1), max.map(|max| max - 1))?;
            parts.push(Grammar::sequence(rest, repeat)?);
        }
        self.push_item_ws(&mut parts);

        let open = Grammar::string("[");
        let close = Grammar::string("]");
        if min == 0 {
            let body = Grammar::sequence(parts, Quantifier::OPTIONAL)?;
            return Grammar::sequence([open, body, close], Quantifier::ONE);
        }
        let mut all = Vec::with_capacity(parts.len() + 2);
        all.push(open);
        all.extend(parts);
        all.push(close);
        Grammar::sequence(all, Quantifier::ONE)
    }

    fn array_literal(&self, values: &[JsonComponent]) -> Result<Grammar, GrammarError> {
        let mut parts = vec![Grammar::string("[")];
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                parts.push(Grammar::string(","));
            }
            self.push_item_ws(&mut parts);
            parts.push(self.component(value)?);
        }
        self.push_item_ws(&mut parts);
        parts.push(Grammar::string("]"));
        Grammar::sequence(parts, Quantifier::ONE)
    }

    fn object(&self, members: &[(String, JsonComponent)]) -> Result<Grammar, GrammarError> {
        let mut parts = vec![Grammar::string("{")];
        for (i, (key, value)) in members.iter().enumerate() {
            if i > 0 {
                parts.push(Grammar::string(","));
            }
            self.push_item_ws(&mut parts);
            parts.push(Grammar::string(encode_string(key, self.ensure_ascii)));
            parts.push(Grammar::string(":"));
            if let Some(ws) = self.key {
                parts.push(ws.clone());
            }
            parts.push(self.component(value)?);
        }
        self.push_item_ws(&mut parts);
        parts.push(Grammar::string("}"));
        Grammar::sequence(parts, Quantifier::ONE)
    }
}

/// One character of a JSON string body, raw or escaped.
fn string_char() -> Result<Grammar, GrammarError> {
    let forbidden = vec![
        CharRangeEntry::new('\0', '\u{1f}')?,
        CharRangeEntry::single('"'),
        CharRangeEntry::single('\\'),
        CharRangeEntry::single('\u{7f}'),
    ];
    let raw = Grammar::from(CharRange::from_entries(forbidden, true)?);

    let short = Grammar::from_chars("\\/\"bfnrt".chars(), false)?;
    let hex = Grammar::char_range([('0', '9'), ('A', 'F'), ('a', 'f')], false)?;
    let unicode = Grammar::sequence(
        [
            Grammar::string("u"),
            Grammar::sequence([hex], Quantifier::exactly(4)?)?,
        ],
        Quantifier::ONE,
    )?;
    let escaped = Grammar::sequence(
        [
            Grammar::string("\\"),
            Grammar::choice([short, unicode], Quantifier::ONE)?,
        ],
        Quantifier::ONE,
    )?;
    Grammar::choice([raw, escaped], Quantifier::ONE)
}

fn string_grammar(min: u32, max: Option<u32>) -> Result<Grammar, GrammarError> {
    if max == Some(0) {
        return Ok(Grammar::string("\"\""));
    }
    let body = Grammar::sequence([string_char()?], Quantifier::new(min, max)?)?;
    Grammar::sequence(
        [Grammar::string("\""), body, Grammar::string("\"")],
        Quantifier::ONE,
    )
}

/// Serializes `value` as a JSON string, quotes included.
///
/// Quotes, backslashes and control characters are always escaped. With
/// `ensure_ascii`, every character outside printable ASCII is written as a
/// `\u` escape, using a surrogate pair above the Basic Multilingual Plane.
#[must_use]
pub fn encode_string(value: &str, ensure_ascii: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 || (ensure_ascii && !(' '..='~').contains(&c)) => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn builder(config: JsonBuilderConfig) -> JsonRuleBuilder {
        JsonRuleBuilder::new(config).unwrap()
    }

    fn compact() -> JsonRuleBuilder {
        builder(JsonBuilderConfig {
            compact: true,
            ..JsonBuilderConfig::default()
        })
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(encode_string("", true), r#""""#);
        assert_eq!(encode_string("gandalf", true), r#""gandalf""#);
        assert_eq!(encode_string("say \"hi\"", true), r#""say \"hi\"""#);
        assert_eq!(encode_string(r"a\b", true), r#""a\\b""#);
        assert_eq!(encode_string("line\nbreak\u{1}", true), r#""line\nbreak\u0001""#);
        assert_eq!(encode_string("gandalf😀", true), r#""gandalf\ud83d\ude00""#);
        assert_eq!(encode_string("gandalf😀", false), "\"gandalf😀\"");
        assert_eq!(encode_string("é\u{7f}", true), r#""\u00e9\u007f""#);
        assert_eq!(encode_string("é\u{7f}", false), "\"é\u{7f}\"");
    }

    #[test]
    fn test_scalar_literals() {
        let b = compact();
        assert_eq!(b.render(&JsonComponent::Null).unwrap(), "root ::= \"null\"\n");
        assert_eq!(b.render(&true.into()).unwrap(), "root ::= \"true\"\n");
        assert_eq!(b.render(&(-42_i64).into()).unwrap(), "root ::= \"-42\"\n");
        assert_eq!(
            b.render(&JsonComponent::Boolean).unwrap(),
            "root ::= \"true\" | \"false\"\n"
        );
        assert_eq!(
            b.render(&"hi".into()).unwrap(),
            "root ::= \"\\\"hi\\\"\"\n"
        );
    }

    #[test]
    fn test_default_whitespace_rules() {
        let rendered = builder(JsonBuilderConfig::default())
            .render(&JsonComponent::Null)
            .unwrap();
        assert_eq!(
            rendered,
            concat!(
                "root ::= \"null\"\n",
                r#"item-ws ::= ("\n" ((" " | "\t")){0,6} | ((" " | "\t")){0,6})?"#,
                "\n",
                r#"key-ws ::= " "?"#,
                "\n",
            )
        );
    }

    #[test]
    fn test_single_line_whitespace() {
        let b = builder(JsonBuilderConfig {
            allow_multiline: false,
            allow_compact: false,
            space_chars: vec![" ".into()],
            ..JsonBuilderConfig::default()
        });
        assert_eq!(b.item_ws().unwrap(), Grammar::string(" "));
        assert_eq!(b.key_ws().unwrap(), Grammar::string(" "));

        let b = builder(JsonBuilderConfig {
            max_level: Some(0),
            space_chars: vec![" ".into()],
            ..JsonBuilderConfig::default()
        });
        assert_eq!(b.item_ws().unwrap().to_string(), r#"" "?"#);
    }

    #[test]
    fn test_unlimited_levels() {
        let b = builder(JsonBuilderConfig {
            indent: 1,
            max_level: None,
            space_chars: vec![" ".into()],
            ..JsonBuilderConfig::default()
        });
        assert_eq!(
            b.item_ws().unwrap().render_with(false, false).unwrap().unwrap(),
            r#"("\n" " "* | " ")?"#
        );
    }

    #[test]
    fn test_compact_object_simplifies_to_one_literal() {
        let value = JsonComponent::Object(vec![
            ("name".into(), "gandalf".into()),
            ("age".into(), 42_i64.into()),
        ]);
        let rules = compact().build(&value).unwrap().simplify();
        assert_eq!(
            rules.render().unwrap(),
            r#"root ::= "{\"name\":\"gandalf\",\"age\":42}""#.to_owned() + "\n"
        );
    }

    #[test]
    fn test_object_with_whitespace_references_rules() {
        let value = JsonComponent::Object(vec![("k".into(), JsonComponent::Null)]);
        let rules = builder(JsonBuilderConfig::default()).build(&value).unwrap();
        assert_eq!(rules.len(), 3);
        let root = rules.first().unwrap().simplify().unwrap();
        assert_eq!(
            root.render_with(true, false).unwrap().unwrap(),
            r#"root ::= "{" item-ws "\"k\":" key-ws "null" item-ws "}""#
        );
        assert_eq!(crate::validate::validate(&rules), Ok(()));
    }

    #[test]
    fn test_optional_array() {
        let value = JsonComponent::Array {
            item: Box::new(JsonComponent::Boolean),
            min: 0,
            max: None,
        };
        assert_eq!(
            compact().render(&value).unwrap(),
            r#"root ::= "[" (("true" | "false") ("," ("true" | "false"))*)? "]""#.to_owned() + "\n"
        );
    }

    #[test]
    fn test_bounded_array() {
        let value = JsonComponent::Array {
            item: Box::new(JsonComponent::Null),
            min: 2,
            max: Some(3),
        };
        assert_eq!(
            compact().render(&value).unwrap(),
            r#"root ::= "[" "null" ("," "null"){1,2} "]""#.to_owned() + "\n"
        );

        let single = JsonComponent::Array {
            item: Box::new(JsonComponent::Null),
            min: 1,
            max: Some(1),
        };
        assert_eq!(
            compact().render(&single).unwrap(),
            "root ::= \"[\" \"null\" \"]\"\n"
        );

        let empty = JsonComponent::Array {
            item: Box::new(JsonComponent::Null),
            min: 0,
            max: Some(0),
        };
        assert_eq!(compact().render(&empty).unwrap(), "root ::= \"[]\"\n");

        let inverted = JsonComponent::Array {
            item: Box::new(JsonComponent::Null),
            min: 3,
            max: Some(2),
        };
        assert!(matches!(
            compact().build(&inverted),
            Err(GrammarError::InvalidQuantifier { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_array_literal() {
        let value = JsonComponent::ArrayLiteral(vec![1_i64.into(), JsonComponent::Null]);
        let rules = compact().build(&value).unwrap().simplify();
        assert_eq!(rules.render().unwrap(), "root ::= \"[1,null]\"\n");
    }

    #[test]
    fn test_free_string() {
        let value = JsonComponent::String { min: 1, max: None };
        let rendered = compact().render(&value).unwrap();
        assert_eq!(
            rendered,
            concat!(
                r#"root ::= "\"" (([^\x00-\x1F\x22\\\x7F] | "\\" ([\x22/\\bfnrt] | "u" [0-9A-Fa-f]{4})))+ "\"""#,
                "\n"
            )
        );
        let empty = JsonComponent::String { min: 0, max: Some(0) };
        assert_eq!(compact().render(&empty).unwrap(), "root ::= \"\\\"\\\"\"\n");
    }

    #[rstest]
    #[case(None, None, r#""-"? [1-9] [0-9]* | "0""#)]
    #[case(Some(-5), Some(5), r#""-" [1-5] | "0" | [1-5]"#)]
    #[case(Some(0), Some(99), r#"[1-9] [0-9] | [1-9] | "0""#)]
    #[case(Some(100), Some(999), "[1-9] [0-9]{2}")]
    #[case(Some(-20), Some(-10), r#""-" ("2" "0" | "1" [0-9])"#)]
    #[case(Some(-3), Some(0), r#""-" [1-3] | "0""#)]
    #[case(Some(0), None, r#""0" | [1-9] [0-9]*"#)]
    #[case(Some(1), None, "[1-9] [0-9]*")]
    #[case(Some(10), None, r#"[1-9] [0-9]{2,} | ("9" [0-9] | [2-8] [0-9] | "1" [0-9])"#)]
    #[case(Some(-5), None, r#""-" [1-5] | "0" | [1-9] [0-9]*"#)]
    #[case(None, Some(0), r#""-" [1-9] [0-9]* | "0""#)]
    #[case(None, Some(-3), r#""-" ([1-9] [0-9]+ | [3-9])"#)]
    #[case(None, Some(12), r#""-" [1-9] [0-9]* | "0" | ("1" [0-2] | [1-9])"#)]
    fn test_integer_ranges(#[case] min: Option<i64>, #[case] max: Option<i64>, #[case] expected: &str) {
        let value = JsonComponent::Integer { min, max };
        assert_eq!(compact().render(&value).unwrap(), format!("root ::= {expected}\n"));
    }

    #[test]
    fn test_integer_range_rejects_inverted_bounds() {
        let value = JsonComponent::Integer {
            min: Some(5),
            max: Some(3),
        };
        assert!(matches!(
            compact().build(&value),
            Err(GrammarError::InvalidIntegerRange { min: 5, max: 3 })
        ));
        let single = JsonComponent::Integer {
            min: Some(-7),
            max: Some(-7),
        };
        assert_eq!(compact().render(&single).unwrap(), "root ::= \"-\" \"7\"\n");
    }

    #[test]
    fn test_embedded_grammar_is_copied() {
        let digits = Grammar::sequence([crate::helpers::digit()], Quantifier::ONE_OR_MORE).unwrap();
        let rules = compact().build(&digits.clone().into()).unwrap();
        let root = rules.get(ROOT).unwrap().as_rule().unwrap();
        assert_eq!(root.value(), &digits);
        assert!(!root.value().ptr_eq(&digits));
    }

    #[test]
    fn test_config_from_json() {
        let config = JsonBuilderConfig::from_json(r#"{"indent": 4, "compact": true}"#).unwrap();
        assert_eq!(config.indent, 4);
        assert!(config.compact);
        assert_eq!(config.max_level, Some(3));
        assert_eq!(config.space_chars, [" ", "\t"]);

        let config = JsonBuilderConfig::from_json(r#"{"max_level": -1}"#).unwrap();
        assert_eq!(config.max_level, None);

        assert!(matches!(
            JsonBuilderConfig::from_json("[1, 2"),
            Err(GrammarError::JsonParse(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        let zero_indent = JsonBuilderConfig {
            indent: 0,
            ..JsonBuilderConfig::default()
        };
        assert!(matches!(
            JsonRuleBuilder::new(zero_indent),
            Err(GrammarError::InvalidConfig(_))
        ));

        let no_spaces = JsonBuilderConfig {
            space_chars: Vec::new(),
            ..JsonBuilderConfig::default()
        };
        assert!(matches!(
            JsonRuleBuilder::new(no_spaces),
            Err(GrammarError::InvalidConfig(_))
        ));
    }
}
