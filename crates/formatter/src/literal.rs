//! # Literal Normalisation
//!
//! Canonical text for number and string literals, and long brackets for block comments.

use crate::config::QuoteStyle;

/// The shortest text for a finite number which parses back to the same value
///
/// Chooses between plain decimal and exponent notation, preferring decimal on a tie.
/// `1000` becomes `1e3`, but `100` stays as `100`.
#[must_use]
pub fn normalize_number(value: f64) -> String {
  let decimal = value.to_string();
  let exponent = format!("{value:e}");

  if exponent.len() < decimal.len() {
    exponent
  } else {
    decimal
  }
}

/// Hexadecimal numbers keep their form, with uppercase digits
pub(crate) fn normalize_hex(raw: &str) -> Option<String> {
  let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
  Some(format!("0x{}", digits.to_ascii_uppercase()))
}

/// A quoted string literal representing the bytes given
///
/// Lua strings are bytes, so anything which isn't valid UTF-8 is written as a
/// decimal escape, as are control characters without a named escape.
#[must_use]
pub fn normalize_string(value: &[u8], quote_style: QuoteStyle) -> String {
  let quote = quote_style.quote_for(value);

  let mut string = String::with_capacity(value.len() + 2);
  string.push(quote);
  for chunk in value.utf8_chunks() {
    for character in chunk.valid().chars() {
      escape(&mut string, character, quote);
    }
    for byte in chunk.invalid() {
      decimal_escape(&mut string, *byte);
    }
  }
  string.push(quote);

  string
}

fn escape(string: &mut String, character: char, quote: char) {
  match character {
    '\\' => string.push_str("\\\\"),
    '\x07' => string.push_str("\\a"),
    '\x08' => string.push_str("\\b"),
    '\x0C' => string.push_str("\\f"),
    '\n' => string.push_str("\\n"),
    '\r' => string.push_str("\\r"),
    '\t' => string.push_str("\\t"),
    '\x0B' => string.push_str("\\v"),
    character if character == quote => {
      string.push('\\');
      string.push(character);
    }
    #[allow(clippy::cast_possible_truncation)]
    character if character.is_ascii_control() => decimal_escape(string, character as u8),
    character => string.push(character),
  }
}

/// Always three digits, so a following digit isn't read as part of the escape
fn decimal_escape(string: &mut String, byte: u8) {
  string.push_str(&format!("\\{byte:03}"));
}

/// Wrap the content in long brackets, `[[content]]` or `[==[content]==]`
///
/// Uses the lowest level whose closing bracket doesn't appear in the content.
#[must_use]
pub fn long_bracket(content: &str) -> String {
  let closes_early = |level: usize| {
    let close = format!("]{}]", "=".repeat(level));
    format!("{content}]").contains(&close)
  };
  let level = (0..).find(|level| !closes_early(*level)).unwrap_or_default();
  let equals = "=".repeat(level);

  format!("[{equals}[{content}]{equals}]")
}
