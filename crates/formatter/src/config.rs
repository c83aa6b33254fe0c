//! The configuration options for the formatter
use std::fmt;

/// Configuration for the formatter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// Put a blank line around function declarations
  pub extra_newlines: bool,
  /// Which constructs can be kept on a single line
  pub inline: Inline,
  /// Which quote to prefer for strings
  pub quote_style: QuoteStyle,
  /// The indentation to use, tabs or a number of spaces
  pub indentation: Indentation,
  /// The line ending to use
  pub line_ending: LineEnding,
}
impl Default for Config {
  fn default() -> Self {
    Self {
      extra_newlines: true,
      inline: Inline::default(),
      quote_style: QuoteStyle::default(),
      indentation: Indentation::Tab,
      line_ending: LineEnding::Native,
    }
  }
}

/// Which constructs can be kept on a single line, if they are short enough
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inline {
  /// Bodies with a single short statement, e.g. `if a then b() end`
  pub block: bool,
  /// Short tables with a few fields, e.g. `{ 1, 2, 3 }`
  pub table: bool,
}
impl Default for Inline {
  fn default() -> Self {
    Self {
      block: true,
      table: true,
    }
  }
}

/// The quote to use for strings
///
/// The other quote is used if the string contains the preferred quote but not the other,
/// so fewer escapes are needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuoteStyle {
  /// Prefer `"`
  #[default]
  Double,
  /// Prefer `'`
  Single,
}
impl QuoteStyle {
  /// The quote to use for a string with the given contents
  #[must_use]
  pub fn quote_for(self, value: &[u8]) -> char {
    let (preferred, other) = match self {
      Self::Double => ('"', '\''),
      Self::Single => ('\'', '"'),
    };

    #[allow(clippy::cast_possible_truncation)]
    let contains = |quote: char| value.contains(&(quote as u8));
    if contains(preferred) && !contains(other) {
      other
    } else {
      preferred
    }
  }
}

/// The indentation to use when printing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indentation {
  /// Use this number of spaces for indentation
  Space(u16),
  /// Use tabs for indentation
  Tab,
}
impl From<u16> for Indentation {
  /// The number of spaces to use for indentation. If 0 use tabs.
  fn from(n: u16) -> Self {
    if n == 0 { Self::Tab } else { Self::Space(n) }
  }
}
impl fmt::Display for Indentation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Space(n) => (0..*n).try_for_each(|_| write!(f, " ")),
      Self::Tab => write!(f, "\t"),
    }
  }
}

/// The type of line endings to use for the file
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum LineEnding {
  ///  Line Feed only (\n), common on Linux and macOS as well as inside git repos
  LineFeed,

  /// Carriage Return + Line Feed characters (\r\n), common on Windows
  CarriageReturnLineFeed,

  /// Line endings will be converted to `\n` on Unix and `\r\n` on Windows.
  #[default]
  Native,
}
impl LineEnding {
  /// The characters of the line ending
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      LineEnding::LineFeed => "\n",
      LineEnding::CarriageReturnLineFeed => "\r\n",

      #[cfg(not(target_os = "windows"))]
      LineEnding::Native => "\n",
      #[cfg(target_os = "windows")]
      LineEnding::Native => "\r\n",
    }
  }

  /// Convert text using `\n` line endings to use this line ending
  pub(crate) fn apply(self, text: String) -> String {
    match self.as_str() {
      "\n" => text,
      line_ending => text.replace('\n', line_ending),
    }
  }
}
