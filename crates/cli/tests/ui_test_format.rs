//! # UI Tests for the Format Command
#![cfg(not(miri))]

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use std::{env, fs};

fn format(args: &[&str], source: &str) -> std::process::Output {
  Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .arg("format")
    .args(args)
    .args(["--config-line-ending", "lf"])
    .write_stdin(source)
    .output()
    .unwrap()
}

#[test]
fn formats_stdin() {
  let output = format(&["-"], "local x=1\nif x then print(x)end");

  assert!(output.status.success());
  assert!(output.stderr.is_empty());
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "local x = 1\nif x then print(x) end\n"
  );
}

#[test]
fn config_flags() {
  let output = format(
    &[
      "-",
      "--config-indent-size",
      "2",
      "--config-quote-style",
      "single",
      "--config-inline-block",
      "false",
    ],
    "if x then print(\"a\") end",
  );

  assert!(output.status.success());
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "if x then\n  print'a'\nend\n"
  );
}

#[test]
fn extra_newlines_flag() {
  let source = "a()\nfunction f() end";

  let output = format(&["-"], source);
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "a()\n\nfunction f() end\n"
  );

  let output = format(&["-", "--config-extra-newlines", "false"], source);
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "a()\nfunction f() end\n"
  );
}

#[test]
fn check_formatted() {
  let output = format(&["-", "--check"], "local x = 1\n");

  assert_eq!(output.status.code(), Some(0));
  assert!(output.stdout.is_empty());
  assert!(output.stderr.is_empty());
}

#[test]
fn check_unformatted() {
  let output = format(&["-", "--check"], "local x=1\n");

  assert_eq!(output.status.code(), Some(1));
  assert!(output.stdout.is_empty());
  assert_eq!(
    String::from_utf8(output.stderr).unwrap(),
    "✕ Error: File is not formatted\n`STDIN` is not formatted\nhint: run without `--check` to format it\n\n"
  );
}

#[test]
fn empty_source() {
  let output = format(&["-"], "");

  assert!(output.status.success());
  assert!(output.stdout.is_empty());
}

#[test]
fn missing_file() {
  let output = format(&["does-not-exist.lua"], "");

  assert_eq!(output.status.code(), Some(2));
  assert_eq!(
    String::from_utf8(output.stderr).unwrap(),
    "✕ Error: File not found `does-not-exist.lua`\n\n"
  );
}

#[test]
fn formats_file_in_place() {
  let path = env::temp_dir().join(format!("luafmt-ui-test-{}.lua", std::process::id()));
  fs::write(&path, "return {1,2}").unwrap();
  let file = path.to_str().unwrap();

  let output = format(&[file, "--dryrun"], "");
  assert!(output.status.success());
  assert_eq!(String::from_utf8(output.stdout).unwrap(), "return { 1, 2 }\n");
  assert_eq!(fs::read_to_string(&path).unwrap(), "return {1,2}");

  let output = format(&[file], "");
  assert!(output.status.success());
  assert!(output.stdout.is_empty());
  assert_eq!(fs::read_to_string(&path).unwrap(), "return { 1, 2 }\n");

  let output = format(&[file, "--check"], "");
  assert_eq!(output.status.code(), Some(0));

  fs::remove_file(&path).unwrap();
}
