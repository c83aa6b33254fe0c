//! # UI Tests for Parse Errors
#![cfg(not(miri))]

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn format_stderr(file: &str) -> String {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["format", "-"])
    .write_stdin(file)
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(2));
  assert!(output.stdout.is_empty());
  String::from_utf8(output.stderr).unwrap()
}

#[test]
fn expected_expression() {
  let file = indoc! {"
    local a = 1
    x = )
  "};
  let output = format_stderr(file);
  let expected = indoc! {"
    ✕ Error: Expected Expression
    expected expression but got )

        ╭─[STDIN:2]
      2 │ x = )
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn expected_token() {
  let file = indoc! {"
    if a then
      b()
  "};
  let output = format_stderr(file);
  let expected = indoc! {"
    ✕ Error: Expected end
    expected end but got End of File

        ╭─[STDIN:3]
      3 │
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn unterminated_string() {
  let file = "x = 'hello\n";
  let output = format_stderr(file);
  let expected = indoc! {"
    ✕ Error: Unterminated String
    missing closing quote or bracket for string

        ╭─[STDIN:1]
      1 │ x = 'hello
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn invalid_assignment() {
  let file = "f() = 1\n";
  let output = format_stderr(file);
  let expected = indoc! {"
    ✕ Error: Invalid Assignment Target
    can only assign to variables, fields, and indexes

        ╭─[STDIN:1]
      1 │ f() = 1
    ────╯
  "};
  assert_eq!(output, expected);
}
