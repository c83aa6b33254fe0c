//! Reading the value of number literals

/// Parse the text of a number literal into its value.
///
/// Accepts decimal numbers with optional fraction and exponent (`3`, `.5`, `1e-3`), and
/// hexadecimal integers (`0xFF`). Returns `None` if the text is not a valid number.
///
/// # Examples
/// ```
/// use luafmt_syntax::parse_number;
///
/// assert_eq!(parse_number("1e3"), Some(1000.0));
/// assert_eq!(parse_number("0xff"), Some(255.0));
/// assert_eq!(parse_number("3abc"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
  match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
    Some(digits) => parse_hex(digits),
    None => parse_decimal(text),
  }
}

fn parse_hex(digits: &str) -> Option<f64> {
  if digits.is_empty() {
    return None;
  }

  digits.chars().try_fold(0.0, |value: f64, c| {
    Some(value * 16.0 + f64::from(c.to_digit(16)?))
  })
}

fn is_digits(text: &str) -> bool {
  text.bytes().all(|c| c.is_ascii_digit())
}

fn parse_decimal(text: &str) -> Option<f64> {
  let (mantissa, exponent) = match text.find(['e', 'E']) {
    Some(index) => (&text[..index], Some(&text[index + 1..])),
    None => (text, None),
  };

  let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
  if !is_digits(integer) || !is_digits(fraction) || (integer.is_empty() && fraction.is_empty()) {
    return None;
  }

  if let Some(exponent) = exponent {
    let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    if digits.is_empty() || !is_digits(digits) {
      return None;
    }
  }

  text.parse().ok()
}

#[cfg(test)]
mod test {
  use super::parse_number;

  #[test]
  fn decimal() {
    assert_eq!(parse_number("0"), Some(0.0));
    assert_eq!(parse_number("42"), Some(42.0));
    assert_eq!(parse_number("3.25"), Some(3.25));
    assert_eq!(parse_number(".5"), Some(0.5));
    assert_eq!(parse_number("5."), Some(5.0));
    assert_eq!(parse_number("1e6"), Some(1_000_000.0));
    assert_eq!(parse_number("2.5E-1"), Some(0.25));
    assert_eq!(parse_number("1e999"), Some(f64::INFINITY));
  }

  #[test]
  fn hexadecimal() {
    assert_eq!(parse_number("0x0"), Some(0.0));
    assert_eq!(parse_number("0XfF"), Some(255.0));
    assert_eq!(parse_number("0x10"), Some(16.0));
  }

  #[test]
  fn malformed() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("."), None);
    assert_eq!(parse_number("0x"), None);
    assert_eq!(parse_number("0xG"), None);
    assert_eq!(parse_number("1.2.3"), None);
    assert_eq!(parse_number("1e"), None);
    assert_eq!(parse_number("1e+"), None);
    assert_eq!(parse_number("3abc"), None);
    assert_eq!(parse_number("inf"), None);
    assert_eq!(parse_number("nan"), None);
  }
}
