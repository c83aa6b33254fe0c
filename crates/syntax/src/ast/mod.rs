//! # AST
//!
//! The definition of the Abstract Syntax Tree (AST)
//!
//! Every node owns its children and knows the span of source it came from.
//! Comments are kept out of the tree by the parser, but the tree can hold them in the
//! bodies of blocks and in table constructors, so tools can put them back.

use crate::span::Span;

pub mod expression;
mod prettyprint;
pub mod statement;

pub use expression::Expression;
pub use statement::Statement;

/// Abstract Syntax Tree representing the source
#[must_use]
#[derive(Debug)]
pub struct AST<'source> {
  /// The source code which the AST is for
  pub source: &'source str,
  /// The root of the tree
  pub chunk: Chunk,
  /// All the comments in the source, in the order they appear
  pub comments: Vec<Comment>,
}
impl<'source> AST<'source> {
  pub(crate) fn new(source: &'source str, chunk: Chunk, comments: Vec<Comment>) -> Self {
    Self {
      source,
      chunk,
      comments,
    }
  }
}

/// An item which has a location in the source code
pub trait GetSpan {
  /// The location of the item
  fn span(&self) -> Span;
}
impl<T: GetSpan> GetSpan for Box<T> {
  fn span(&self) -> Span {
    self.as_ref().span()
  }
}

/// The root of the tree, the statements of a whole file
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
  /// The statements of the file
  pub body: Vec<Statement>,
  /// The location of the chunk, always the whole file
  pub span: Span,
}
impl GetSpan for Chunk {
  fn span(&self) -> Span {
    self.span
  }
}

/// A name of a variable, field, or label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
  /// The text of the name
  pub name: String,
  /// The location of the name
  pub span: Span,
}
impl GetSpan for Name {
  fn span(&self) -> Span {
    self.span
  }
}

/// The delimiter style of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
  /// A comment to the end of the line, `-- text`
  Line,
  /// A comment in long brackets, `--[[ text ]]`
  Block,
}

/// A comment, `-- text` or `--[[ text ]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  /// The text of the comment, without the delimiters
  pub text: String,
  /// The source of the comment, including the delimiters
  pub raw: String,
  /// The delimiter style used
  pub kind: CommentKind,
  /// The location of the comment
  pub span: Span,
}
impl Comment {
  /// Is the comment in long brackets?
  #[must_use]
  pub fn is_block(&self) -> bool {
    self.kind == CommentKind::Block
  }
}
impl GetSpan for Comment {
  fn span(&self) -> Span {
    self.span
  }
}
