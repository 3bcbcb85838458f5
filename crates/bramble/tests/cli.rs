//! End-to-end tests for the `bramble` binary.
#![cfg(feature = "cli")]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn grammar_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const YES_NO: &str = r#"{
    "type": "RULE",
    "name": "root",
    "content": {
        "type": "CHOICE",
        "members": [
            {"type": "STRING", "value": "yes"},
            {"type": "STRING", "value": "no"}
        ]
    }
}"#;

#[test]
fn test_renders_rule_set() {
    let file = grammar_file(YES_NO);
    cargo_bin_cmd!("bramble")
        .arg(file.path())
        .assert()
        .success()
        .stdout("root ::= \"yes\" | \"no\"\n");
}

#[test]
fn test_lists_nested_rules() {
    let file = grammar_file(
        r##"{
        "type": "RULE",
        "name": "root",
        "content": {
            "type": "SEQ",
            "members": [
                {"type": "STRING", "value": "#"},
                {
                    "type": "RULE",
                    "name": "digits",
                    "content": {
                        "type": "SEQ",
                        "quantifier": {"min": 1},
                        "members": [
                            {"type": "CHAR_RANGE", "ranges": [{"start": "0", "end": "9"}]}
                        ]
                    }
                }
            ]
        }
    }"##,
    );
    cargo_bin_cmd!("bramble")
        .arg(file.path())
        .assert()
        .success()
        .stdout("root ::= \"#\" digits\ndigits ::= [0-9]+\n");
}

#[test]
fn test_simplify_flag() {
    let file = grammar_file(
        r#"{
        "type": "SEQ",
        "members": [
            {"type": "STRING", "value": "Hello"},
            {"type": "STRING", "value": " "},
            {"type": "STRING", "value": "World"}
        ]
    }"#,
    );
    cargo_bin_cmd!("bramble")
        .arg("--simplify")
        .arg(file.path())
        .assert()
        .success()
        .stdout("\"Hello World\"\n");
}

#[test]
fn test_invalid_grammar_fails() {
    let file = grammar_file(r#"{"type": "SEQ", "members": []}"#);
    cargo_bin_cmd!("bramble")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_file_fails() {
    cargo_bin_cmd!("bramble")
        .arg("/nonexistent/grammar.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
