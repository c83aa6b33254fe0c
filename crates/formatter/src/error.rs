use luafmt_syntax::ParseError;
use thiserror::Error;

/// An error which stopped the source from being formatted
///
/// No partial output is produced when formatting fails.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormatError {
  /// A node which can't be printed in the position it was found
  #[error("cannot format a {kind} node in this position")]
  UnsupportedNode {
    /// The kind of node found
    kind: &'static str,
  },
  /// A number which changes value when printed in its normalised form
  #[error("number `{raw}` would be printed as `{normalized}`, which has a different value")]
  LiteralRoundTrip {
    /// The number as written in the source
    raw: String,
    /// The number as it would have been printed
    normalized: String,
  },
  /// The source is not valid Lua
  #[error(transparent)]
  MalformedInput(#[from] ParseError),
}
