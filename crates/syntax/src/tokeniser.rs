use crate::span::Span;
use std::{fmt, iter};

/// Convert a string of source code into an [Iterator] of [Token]s
///
/// Whitespace is skipped, but comments are kept as tokens.
pub struct Tokeniser<'source> {
  /// The source code to tokenise
  source: &'source [u8],
  /// The current position in the source code
  position: usize,
}
impl<'source> From<&'source str> for Tokeniser<'source> {
  /// Create a new [Tokeniser] from a source code string
  ///
  /// # Panics
  /// Panics if the length of the source code is greater than `u32::MAX`
  fn from(value: &'source str) -> Self {
    assert!(value.len() < u32::MAX as usize);

    Self {
      source: value.as_ref(),
      position: 0,
    }
  }
}
impl Tokeniser<'_> {
  /// Has the end of the source code been reached?
  fn is_end(&self, position: usize) -> bool {
    position >= self.source.len()
  }

  fn at(&self, position: usize) -> Option<u8> {
    self.source.get(position).copied()
  }

  fn skip_whitespace(&mut self) {
    while let Some(b' ' | b'\t' | b'\r' | b'\n' | b'\x0B' | b'\x0C') = self.at(self.position) {
      self.position += 1;
    }
  }

  /// Get the next token from the source code
  fn get_next_token(&self) -> (TokenKind, usize) {
    let character = self.source[self.position];
    let next_character = self.at(self.position + 1);

    match character {
      b'-' if next_character == Some(b'-') => self.comment(),

      // Values
      quote @ (b'"' | b'\'') => self.string(quote),
      b'[' if matches!(next_character, Some(b'[' | b'=')) => self.long_string(),
      b'0'..=b'9' => self.number(),
      b'.' if matches!(next_character, Some(b'0'..=b'9')) => self.number(),
      b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.identifier(),

      // Brackets
      b'(' => (TokenKind::LeftParen, 1),
      b')' => (TokenKind::RightParen, 1),
      b'{' => (TokenKind::LeftCurly, 1),
      b'}' => (TokenKind::RightCurly, 1),
      b'[' => (TokenKind::LeftSquare, 1),
      b']' => (TokenKind::RightSquare, 1),

      // Punctuation
      b',' => (TokenKind::Comma, 1),
      b';' => (TokenKind::Semicolon, 1),
      b':' if next_character == Some(b':') => (TokenKind::ColonColon, 2),
      b':' => (TokenKind::Colon, 1),
      b'.' if self.source[self.position..].starts_with(b"...") => (TokenKind::DotDotDot, 3),
      b'.' if next_character == Some(b'.') => (TokenKind::DotDot, 2),
      b'.' => (TokenKind::Dot, 1),

      // Operators
      b'+' => (TokenKind::Plus, 1),
      b'-' => (TokenKind::Minus, 1),
      b'*' => (TokenKind::Star, 1),
      b'/' => (TokenKind::Slash, 1),
      b'%' => (TokenKind::Percent, 1),
      b'^' => (TokenKind::Caret, 1),
      b'#' => (TokenKind::Hash, 1),

      // Comparisons
      b'=' if next_character == Some(b'=') => (TokenKind::EqualEqual, 2),
      b'~' if next_character == Some(b'=') => (TokenKind::TildeEqual, 2),
      b'<' if next_character == Some(b'=') => (TokenKind::LessEqual, 2),
      b'>' if next_character == Some(b'=') => (TokenKind::GreaterEqual, 2),
      b'=' => (TokenKind::Equal, 1),
      b'<' => (TokenKind::Less, 1),
      b'>' => (TokenKind::Greater, 1),

      // Unknown character
      x if (x & 0b1111_0000) == 0b1111_0000 => (TokenKind::Unknown, 4),
      x if (x & 0b1110_0000) == 0b1110_0000 => (TokenKind::Unknown, 3),
      x if (x & 0b1100_0000) == 0b1100_0000 => (TokenKind::Unknown, 2),
      _ => (TokenKind::Unknown, 1),
    }
  }

  /// If a long bracket (`[[`, `[==[`) opens at the position, get its level and length
  fn long_bracket_level(&self, position: usize) -> Option<usize> {
    if self.at(position) != Some(b'[') {
      return None;
    }

    let level = self.source[position + 1..]
      .iter()
      .take_while(|c| **c == b'=')
      .count();

    (self.at(position + 1 + level) == Some(b'[')).then_some(level)
  }

  /// Find the end of a long bracket body, returns the position after the closing bracket
  fn long_bracket_end(&self, body_start: usize, level: usize) -> Option<usize> {
    let mut position = body_start;

    while !self.is_end(position) {
      if self.source[position] == b']' {
        let equals = self.source[position + 1..]
          .iter()
          .take_while(|c| **c == b'=')
          .count();

        if equals == level && self.at(position + 1 + level) == Some(b']') {
          return Some(position + level + 2);
        }
      }

      position += 1;
    }

    None
  }

  /// Skip to the end of a comment token, either the end of line or the closing bracket
  fn comment(&self) -> (TokenKind, usize) {
    let start = self.position + 2;

    if let Some(level) = self.long_bracket_level(start) {
      return match self.long_bracket_end(start + level + 2, level) {
        Some(end) => (TokenKind::Comment, end - self.position),
        None => (
          TokenKind::UnterminatedComment,
          self.source.len() - self.position,
        ),
      };
    }

    let length = self.source[self.position..]
      .iter()
      .take_while(|c| !matches!(c, b'\n' | b'\r'))
      .count();

    (TokenKind::Comment, length)
  }

  /// Go to the end of a string token, the closing quote
  fn string(&self, quote: u8) -> (TokenKind, usize) {
    let mut position = self.position + 1;

    loop {
      match self.at(position) {
        None | Some(b'\n' | b'\r') => {
          break (TokenKind::UnterminatedString, position - self.position);
        }
        Some(b'\\') if self.source[position + 1..].starts_with(b"\r\n") => position += 3,
        Some(b'\\') => position += 2,
        Some(c) if c == quote => break (TokenKind::String, position - self.position + 1),
        Some(_) => position += 1,
      }
    }
  }

  /// Go to the end of a long string, e.g. `[==[ ... ]==]`
  fn long_string(&self) -> (TokenKind, usize) {
    let Some(level) = self.long_bracket_level(self.position) else {
      return (TokenKind::LeftSquare, 1);
    };

    match self.long_bracket_end(self.position + level + 2, level) {
      Some(end) => (TokenKind::LongString, end - self.position),
      None => (
        TokenKind::UnterminatedString,
        self.source.len() - self.position,
      ),
    }
  }

  /// Get a number token. Validity is checked by the parser.
  ///
  /// Like the reference lexer, it greedily reads anything that could continue a number,
  /// so `3abc` is a single (malformed) number rather than a number and a name.
  fn number(&self) -> (TokenKind, usize) {
    let mut position = self.position;

    while let Some(c) = self.at(position) {
      let is_exponent_sign = matches!(c, b'+' | b'-')
        && matches!(self.source[position - 1], b'e' | b'E')
        && !self.is_hex(position);

      if c.is_ascii_alphanumeric() || c == b'.' || c == b'_' || is_exponent_sign {
        position += 1;
      } else {
        break;
      }
    }

    (TokenKind::Number, position - self.position)
  }

  /// Is the number which is currently being read a hex number?
  fn is_hex(&self, position: usize) -> bool {
    let number = &self.source[self.position..position];
    number.starts_with(b"0x") || number.starts_with(b"0X")
  }

  /// Get an identifier token, a sequence of [a-zA-Z0-9_]
  fn identifier(&self) -> (TokenKind, usize) {
    let length = self.source[self.position..]
      .iter()
      .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_')
      .count();

    let word = &self.source[self.position..self.position + length];
    (TokenKind::from_word(word), length)
  }
}
impl Iterator for Tokeniser<'_> {
  type Item = Token;

  fn next(&mut self) -> Option<Self::Item> {
    self.skip_whitespace();

    if self.is_end(self.position) {
      return None;
    }

    let (kind, len) = self.get_next_token();
    let start = self.position;
    self.position = (self.position + len).min(self.source.len());

    Some(Token {
      kind,
      start: u32::try_from(start).unwrap(),
      length: u32::try_from(self.position - start).unwrap(),
    })
  }
}
impl iter::FusedIterator for Tokeniser<'_> {}

/// A Token of source code, a lexeme of the language
///
/// With the type of token, start position and length of the token in the source code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Token {
  /// The type of the token
  pub kind: TokenKind,
  /// The byte position the token starts at
  pub start: u32,
  /// The length of the token in bytes
  pub length: u32,
}
impl Token {
  /// The byte position after the end of the token
  #[must_use]
  pub const fn end(&self) -> u32 {
    self.start + self.length
  }
}
impl From<Token> for Span {
  fn from(token: Token) -> Self {
    Self::new(token.start, token.end())
  }
}
impl From<&Token> for Span {
  fn from(token: &Token) -> Self {
    Self::new(token.start, token.end())
  }
}

/// The type of a token
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum TokenKind {
  // Brackets
  /// `(`
  LeftParen,
  /// `)`
  RightParen,
  /// `{`
  LeftCurly,
  /// `}`
  RightCurly,
  /// `[`
  LeftSquare,
  /// `]`
  RightSquare,

  // Punctuation
  /// `,`
  Comma,
  /// `;`
  Semicolon,
  /// `:`
  Colon,
  /// `::`
  ColonColon,
  /// `.`
  Dot,
  /// `..`
  DotDot,
  /// `...`
  DotDotDot,
  /// `=`
  Equal,

  // Operators
  /// `+`
  Plus,
  /// `-`
  Minus,
  /// `*`
  Star,
  /// `/`
  Slash,
  /// `%`
  Percent,
  /// `^`
  Caret,
  /// `#`
  Hash,

  // Comparators
  /// `==`
  EqualEqual,
  /// `~=`
  TildeEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,

  // Values
  /// A name, a sequence of [a-zA-Z0-9_] not starting with a digit
  Identifier,
  /// A number, decimal or hexadecimal
  Number,
  /// A string between `'` or `"`
  String,
  /// A string between long brackets, e.g. `[[text]]`
  LongString,

  // Keywords
  /// `and`
  And,
  /// `break`
  Break,
  /// `do`
  Do,
  /// `else`
  Else,
  /// `elseif`
  ElseIf,
  /// `end`
  End,
  /// `false`
  False,
  /// `for`
  For,
  /// `function`
  Function,
  /// `goto`
  Goto,
  /// `if`
  If,
  /// `in`
  In,
  /// `local`
  Local,
  /// `nil`
  Nil,
  /// `not`
  Not,
  /// `or`
  Or,
  /// `repeat`
  Repeat,
  /// `return`
  Return,
  /// `then`
  Then,
  /// `true`
  True,
  /// `until`
  Until,
  /// `while`
  While,

  // Trivia
  /// A comment, `-- text` or `--[[ text ]]`
  Comment,

  // Errors
  /// A long comment without its closing bracket
  UnterminatedComment,
  /// A string without its closing quote or bracket
  UnterminatedString,
  /// An unknown character
  Unknown,

  /// The end of the source code
  #[default]
  EndOfFile,
}
impl TokenKind {
  /// Determines the type of a word, is it a keyword or a standard identifier
  fn from_word(word: &[u8]) -> Self {
    match word {
      b"and" => Self::And,
      b"break" => Self::Break,
      b"do" => Self::Do,
      b"else" => Self::Else,
      b"elseif" => Self::ElseIf,
      b"end" => Self::End,
      b"false" => Self::False,
      b"for" => Self::For,
      b"function" => Self::Function,
      b"goto" => Self::Goto,
      b"if" => Self::If,
      b"in" => Self::In,
      b"local" => Self::Local,
      b"nil" => Self::Nil,
      b"not" => Self::Not,
      b"or" => Self::Or,
      b"repeat" => Self::Repeat,
      b"return" => Self::Return,
      b"then" => Self::Then,
      b"true" => Self::True,
      b"until" => Self::Until,
      b"while" => Self::While,
      _ => Self::Identifier,
    }
  }

  /// Is the token a keyword?
  #[must_use]
  pub fn is_keyword(self) -> bool {
    matches!(
      self,
      Self::And
        | Self::Break
        | Self::Do
        | Self::Else
        | Self::ElseIf
        | Self::End
        | Self::False
        | Self::For
        | Self::Function
        | Self::Goto
        | Self::If
        | Self::In
        | Self::Local
        | Self::Nil
        | Self::Not
        | Self::Or
        | Self::Repeat
        | Self::Return
        | Self::Then
        | Self::True
        | Self::Until
        | Self::While
    )
  }

  /// Does the token always have the same text (and so the same length)?
  #[must_use]
  pub fn has_fixed_length(self) -> bool {
    !matches!(
      self,
      Self::Identifier
        | Self::Number
        | Self::String
        | Self::LongString
        | Self::Comment
        | Self::UnterminatedComment
        | Self::UnterminatedString
        | Self::Unknown
    )
  }
}
impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let string = match self {
      Self::LeftParen => "(",
      Self::RightParen => ")",
      Self::LeftCurly => "{",
      Self::RightCurly => "}",
      Self::LeftSquare => "[",
      Self::RightSquare => "]",
      Self::Comma => ",",
      Self::Semicolon => ";",
      Self::Colon => ":",
      Self::ColonColon => "::",
      Self::Dot => ".",
      Self::DotDot => "..",
      Self::DotDotDot => "...",
      Self::Equal => "=",
      Self::Plus => "+",
      Self::Minus => "-",
      Self::Star => "*",
      Self::Slash => "/",
      Self::Percent => "%",
      Self::Caret => "^",
      Self::Hash => "#",
      Self::EqualEqual => "==",
      Self::TildeEqual => "~=",
      Self::Less => "<",
      Self::LessEqual => "<=",
      Self::Greater => ">",
      Self::GreaterEqual => ">=",
      Self::Identifier => "Identifier",
      Self::Number => "Number",
      Self::String => "String",
      Self::LongString => "Long String",
      Self::And => "and",
      Self::Break => "break",
      Self::Do => "do",
      Self::Else => "else",
      Self::ElseIf => "elseif",
      Self::End => "end",
      Self::False => "false",
      Self::For => "for",
      Self::Function => "function",
      Self::Goto => "goto",
      Self::If => "if",
      Self::In => "in",
      Self::Local => "local",
      Self::Nil => "nil",
      Self::Not => "not",
      Self::Or => "or",
      Self::Repeat => "repeat",
      Self::Return => "return",
      Self::Then => "then",
      Self::True => "true",
      Self::Until => "until",
      Self::While => "while",
      Self::Comment => "Comment",
      Self::UnterminatedComment => "Unterminated Comment",
      Self::UnterminatedString => "Unterminated String",
      Self::Unknown => "Unknown Character",
      Self::EndOfFile => "End of File",
    };

    write!(f, "{string}")
  }
}
