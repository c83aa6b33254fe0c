//! # Formatter
//!
//! A tool to consistently format Lua source code.
//!
//! Works in stages, each on its own copy of the tree:
//! - Repairs the spans of if clauses, so each clause contains its body
//! - Puts the comments back into the tree, into the innermost block or table holding them
//! - Prints each node, deciding where parentheses are needed from operator precedence,
//!   and which blocks and tables are short enough to stay on one line

#![deny(unsafe_code)]

mod ast;
mod comments;
pub mod config;
mod error;
mod formatter;
pub mod literal;
pub mod precedence;
mod ranges;


use formatter::{Formattable, Formatter};
use log::debug;
use luafmt_syntax::AST;

/// Opinionated formatting of Lua source code.
///
/// # Errors
/// If the source isn't valid Lua, or it can't be printed without changing its meaning.
///
/// # Examples
/// ```
/// use luafmt_formatter::{format, FormatterConfig};
/// use luafmt_formatter::config::LineEnding;
///
/// let config = FormatterConfig { line_ending: LineEnding::LineFeed, ..Default::default() };
/// let formatted = format("local x=5+3", config).unwrap();
///
/// assert_eq!(formatted, "local x = 5 + 3");
/// ```
pub fn format(source: &str, config: FormatterConfig) -> Result<String, FormatError> {
  let ast = luafmt_syntax::parse(source)?;
  format_ast(&ast, config)
}

/// Opinionated formatting of an already parsed AST.
///
/// The AST is left untouched, the formatter works on its own copy.
///
/// # Errors
/// If the AST can't be printed without changing its meaning.
pub fn format_ast(ast: &AST, config: FormatterConfig) -> Result<String, FormatError> {
  debug!(
    "Formatting {} statements with {} comments",
    ast.chunk.body.len(),
    ast.comments.len()
  );

  let mut chunk = ast.chunk.clone();
  ranges::repair(&mut chunk);
  comments::attach(&mut chunk, &ast.comments);

  let formatter = Formatter::new(config);
  let output = chunk.format(&formatter, 0)?;

  Ok(config.line_ending.apply(output))
}

pub use config::Config as FormatterConfig;
pub use error::FormatError;
