//! CLI integration tests for cardq commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use cardq_card::fixtures;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a cardq command.
fn cardq() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("cardq").unwrap()
}

/// Helper to run `cardq` with HOME isolated to the provided directory.
fn cardq_in(dir: &Path) -> Command {
    let mut cmd = cardq();
    cmd.env("HOME", dir)
        .env_remove("CARDQ_LOG")
        .env_remove("RUST_LOG")
        .current_dir(dir);
    cmd
}

/// Writes the sample card dump and a config pointing at it.
fn setup_cards(dir: &Path) {
    fs::write(dir.join("cards.json"), fixtures::sample_dump_json()).unwrap();
    fs::write(
        dir.join(".cardq.toml"),
        "[cards]\npath = \"cards.json\"\n\n[index]\nroot = \".cardq/index\"\n",
    )
    .unwrap();
}

/// Runs a command expected to succeed and parses its stdout as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        cardq_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".cardq.toml")).unwrap();
        assert!(contents.contains("[cards]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".cardq.toml"), "existing").unwrap();

        cardq_in(dir.path()).arg("init").assert().failure();
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".cardq.toml"), "old content").unwrap();

        cardq_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".cardq.toml")).unwrap();
        assert!(contents.contains("[suggest]"));
    }

    #[test]
    fn updates_gitignore_once() {
        let dir = temp_dir();
        fs::write(dir.path().join(".gitignore"), "*.log").unwrap();

        cardq_in(dir.path()).arg("init").assert().success();
        cardq_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let gitignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(gitignore, "*.log\n.cardq/\n");
    }
}

mod tokenize {
    use super::*;

    #[test]
    fn json_lists_tokens_with_offsets() {
        let dir = temp_dir();
        let tokens = json_output(cardq_in(dir.path()).args(["tokenize", "name:fire", "--json"]));

        let tokens = tokens.as_array().unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0]["type"], "Field");
        assert_eq!(tokens[1]["type"], "Colon");
        assert_eq!(tokens[2]["type"], "FieldValue");
        assert_eq!(tokens[2]["position"], 5);
        assert_eq!(tokens[2]["value"], "fire");
        assert_eq!(tokens[2]["parent_field"], "name");
    }

    #[test]
    fn table_output() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .args(["tokenize", "type:creature AND cmc:[2 TO 4]"])
            .assert()
            .success()
            .stdout(predicate::str::contains("RangeTo"));
    }

    #[test]
    fn works_with_invalid_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".cardq.toml"), "not [valid toml").unwrap();

        cardq_in(dir.path())
            .args(["tokenize", "name:\"fire"])
            .assert()
            .success();
    }
}

mod check {
    use super::*;

    #[test]
    fn valid_query_passes() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .args(["check", "name:fire OR text:\"draw a card\""])
            .assert()
            .success()
            .stdout(predicate::str::contains("ok"));
    }

    #[test]
    fn unclosed_quote_fails_with_caret() {
        let dir = temp_dir();
        let assert = cardq_in(dir.path())
            .args(["check", "name:\"fire b"])
            .assert()
            .failure();

        let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
        assert!(stderr.contains("quote"));
        assert!(stderr.contains("     ^"));
    }
}

mod expr {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .args(["expr", "mana", "{R}"])
            .assert()
            .success()
            .stdout(predicate::str::contains("mana:\\{R\\}"));
    }

    #[test]
    fn quotes_values_with_spaces() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .args(["expr", "name", "shivan dragon"])
            .assert()
            .success()
            .stdout(predicate::str::contains("name:\"shivan dragon\""));
    }

    #[test]
    fn unknown_field_fails() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .args(["expr", "nosuchfield", "x"])
            .assert()
            .failure();
    }
}

mod index {
    use super::*;

    #[test]
    fn builds_versioned_directories() {
        let dir = temp_dir();
        setup_cards(dir.path());

        cardq_in(dir.path())
            .arg("index")
            .assert()
            .success()
            .stderr(predicate::str::contains("Built document index"));

        let root = dir.path().join(".cardq/index");
        assert!(root.join("cards/0.41/version").is_file());
        assert!(root.join("words/0.41/version").is_file());
    }

    #[test]
    fn second_run_reuses_index() {
        let dir = temp_dir();
        setup_cards(dir.path());

        cardq_in(dir.path()).arg("index").assert().success();
        cardq_in(dir.path())
            .arg("index")
            .assert()
            .success()
            .stderr(predicate::str::contains("Built").not());
    }

    #[test]
    fn force_rebuilds() {
        let dir = temp_dir();
        setup_cards(dir.path());

        cardq_in(dir.path()).arg("index").assert().success();
        cardq_in(dir.path())
            .args(["index", "--force"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Built spellchecker index"));
    }

    #[test]
    fn missing_cards_config_fails() {
        let dir = temp_dir();
        cardq_in(dir.path()).arg("index").assert().failure();
    }
}

mod suggest {
    use super::*;

    #[test]
    fn field_value_suggestions() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let output = json_output(cardq_in(dir.path()).args([
            "suggest",
            "rarity:my",
            "--json",
        ]));

        assert_eq!(output["token"]["value"], "my");
        assert_eq!(output["token"]["position"], 7);
        assert_eq!(output["suggestions"][0]["value"], "mythic");
        assert_eq!(output["suggestions"][0]["type"], "FieldValue");
    }

    #[test]
    fn unbound_value_offers_fields_first() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let output = json_output(cardq_in(dir.path()).args(["suggest", "rari", "--json"]));

        assert_eq!(output["suggestions"][0]["value"], "rarity:");
        assert_eq!(output["suggestions"][0]["type"], "Field");
    }

    #[test]
    fn boolean_operators() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let output = json_output(cardq_in(dir.path()).args([
            "suggest",
            "fire AND bolt",
            "--caret",
            "7",
            "--json",
        ]));

        let values: Vec<_> = output["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["value"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(values, ["AND", "OR", "NOT", "&&", "||", "!", "+", "-"]);
    }

    #[test]
    fn empty_query_has_no_token() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let output = json_output(cardq_in(dir.path()).args(["suggest", "", "--json"]));
        assert!(output["token"].is_null());
        assert_eq!(output["suggestions"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn text_output_names_the_token() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let assert = cardq_in(dir.path())
            .args(["suggest", "name:shivan"])
            .assert()
            .success();
        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(stdout.contains("Replace: \"shivan\" (5..11)"));
        assert!(stdout.contains("Shivan Dragon [FieldValue]"));
    }
}

mod values {
    use super::*;

    #[test]
    fn numeric_values_in_numeric_order() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let values = json_output(cardq_in(dir.path()).args([
            "values", "2", "--field", "power", "--json",
        ]));
        assert_eq!(values, serde_json::json!(["2", "12", "20"]));
    }

    #[test]
    fn localized_names() {
        let dir = temp_dir();
        setup_cards(dir.path());

        cardq_in(dir.path())
            .args(["values", "молн", "--field", "name", "--lang", "ru"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Молния"));
    }
}

mod status {
    use super::*;

    #[test]
    fn reports_missing_index() {
        let dir = temp_dir();
        setup_cards(dir.path());

        let assert = cardq_in(dir.path()).arg("status").assert().success();
        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(stdout.contains("document index: missing"));
        assert!(stdout.contains("No issues found."));
    }

    #[test]
    fn reports_current_index_after_build() {
        let dir = temp_dir();
        setup_cards(dir.path());

        cardq_in(dir.path()).arg("index").assert().success();
        cardq_in(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("spellchecker index: current"));
    }

    #[test]
    fn warns_without_cards() {
        let dir = temp_dir();
        fs::write(dir.path().join(".cardq.toml"), "[suggest]\nmax_count = 0\n").unwrap();

        cardq_in(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("max_count is 0"));
    }

    #[test]
    fn no_config_suggests_init() {
        let dir = temp_dir();
        cardq_in(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("cardq init"));
    }
}

mod config {
    use super::*;

    #[test]
    fn prints_effective_settings() {
        let dir = temp_dir();
        fs::write(dir.path().join(".cardq.toml"), "[suggest]\nlanguage = \"ru\"\n").unwrap();

        cardq_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("language = \"ru\""));
    }
}
