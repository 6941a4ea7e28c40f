//! End-to-end CLI tests covering spec.md §8's concrete scenarios through
//! the `dlc` binary itself (`assert_cmd`), rather than through the library
//! crates directly.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp source file");
    write!(file, "{contents}").expect("write temp source file");
    file
}

#[test]
fn bare_file_argument_defaults_to_lex() {
    let file = source_file("42");
    Command::cargo_bin("dlc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
}

#[test]
fn source_command_dumps_raw_text_unchanged() {
    let file = source_file("x = 1\nx + 2\n");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["source"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("x = 1\nx + 2\n");
}

#[test]
fn lex_command_prints_one_token_per_line() {
    let file = source_file("x + 1");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["lex"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("+").and(predicate::str::contains("eof")));
}

#[test]
fn parse_command_dumps_multi_clause_function() {
    let file = source_file("fact(0) = 1\nfact(n) = n * fact(n - 1)");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["parse"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fact\""));
}

#[test]
fn pp_command_warns_about_unused_binding() {
    let file = source_file("do\n  x = 1\n  2\nend");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["pp"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn undefined_variable_is_a_fatal_error_on_the_pp_command() {
    let file = source_file("y");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["pp"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable"));
}

#[test]
fn regex_outside_a_pattern_is_a_fatal_parse_error() {
    let file = source_file("x = /ab+/");
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["parse"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error on line"));
}

#[test]
fn missing_file_is_a_usage_error() {
    Command::cargo_bin("dlc")
        .unwrap()
        .args(["lex", "/no/such/file.dlc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't read"));
}
