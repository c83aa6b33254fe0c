//! # Syntax
//! Parse Lua source code into an Abstract Syntax Tree
//!
//! A recursive descent parser, with precedence climbing for expressions
//! (using the same binding powers as the reference Lua implementation).
//!
//! The source is first tokenised, comments are split off into their own list, then
//! the tree is built from the remaining tokens. Every node records the byte span of
//! the source it came from. Comments are not part of the tree; they are returned
//! alongside it, ordered by position, so tools can decide where to put them.
//!
//! The parser is not error tolerant. The first syntax error stops parsing.

pub mod ast;
mod number;
mod parser;
mod span;
mod tokeniser;

#[cfg(test)]
mod test;

/// Parses a source code string into an AST.
///
/// # Errors
/// Returns the first syntax error found in the source.
///
/// # Examples
/// ```
/// use luafmt_syntax::parse;
/// let ast = parse("local x = 5 + 3").unwrap();
///
/// assert_eq!(ast.chunk.body.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<AST<'_>, ParseError> {
  parser::Parser::new(source).parse()
}

/// Get the tokens from a source code string
pub fn tokenise(source: &str) -> impl Iterator<Item = tokeniser::Token> + '_ {
  tokeniser::Tokeniser::from(source)
}

pub use ast::{AST, GetSpan};
pub use number::parse_number;
pub use parser::ParseError;
pub use span::{LineIndex, Span};
pub use tokeniser::{Token, TokenKind};
