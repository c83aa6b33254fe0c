//! # UI Tests for Debug Print Commands
#![cfg(not(miri))]

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn print(command: &str, source: &str) -> String {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["print", command, "-"])
    .write_stdin(source)
    .output()
    .unwrap();

  assert!(output.status.success());
  assert!(output.stderr.is_empty());
  String::from_utf8(output.stdout).unwrap()
}

#[test]
fn tokens() {
  let output = print("tokens", "local x = 'a' -- note\n");
  let expected = indoc! {"
        ╭─[Tokens: STDIN]
      0 │ local
      6 │ Identifier (length: 1)
      8 │ =
     10 │ String (length: 3)
     14 │ Comment (length: 7)
    ────╯
  "};

  assert_eq!(output, expected);
}

#[test]
fn ast() {
  let output = print("ast", "local x = 5 + 3");
  let expected = indoc! {"
    ╭─[Abstract Syntax Tree: STDIN]
    ├─ Local
    │  ├─ Variables
    │  │  ╰─ Name (x)
    │  ╰─ Values
    │     ╰─ Binary (+)
    │        ├─ Number (5)
    │        ╰─ Number (3)
    ╯
  "};

  assert_eq!(output, expected);
}

#[test]
fn ast_with_syntax_error() {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["print", "ast", "-"])
    .write_stdin("local = 5")
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(2));
  assert!(output.stdout.is_empty());
  assert!(!output.stderr.is_empty());
}
