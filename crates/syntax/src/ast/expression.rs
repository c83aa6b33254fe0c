//! # Expressions

use super::{Comment, GetSpan, Name, statement::Function};
use crate::span::Span;
use std::fmt;

/// An expression, which can be evaluated to a value
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
  /// A binary expression, e.g. `1 + 2`, `a and b`
  Binary(Binary),
  /// A function call with arguments in brackets, e.g. `print(1, 2)`, `obj:method()`
  Call(Call),
  /// An anonymous function, e.g. `function(x) return x end`
  Function(Box<Function>),
  /// An expression in parentheses, e.g. `(1 + 2)`
  Group(Group),
  /// A variable, e.g. `x`
  Identifier(Name),
  /// Indexing with an expression, e.g. `t[1]`
  Index(Index),
  /// A literal value, e.g. `nil`, `true`, `1`, `"hello"`, `...`
  Literal(Literal),
  /// Accessing a field by name, e.g. `t.field`, `obj:method`
  Member(Member),
  /// A call with a single string argument, e.g. `require "module"`
  StringCall(StringCall),
  /// A table constructor, e.g. `{ 1, 2, key = 3 }`
  Table(Table),
  /// A call with a single table argument, e.g. `setup { debug = true }`
  TableCall(TableCall),
  /// A unary expression, e.g. `not x`, `-1`, `#list`
  Unary(Unary),
}
impl Expression {
  /// Remove any parentheses around the expression
  pub fn unwrap_groups(&self) -> &Self {
    match self {
      Self::Group(group) => group.expression.unwrap_groups(),
      expression => expression,
    }
  }

  /// Can the expression evaluate to multiple values?
  ///
  /// Wrapping these in parentheses truncates them to a single value.
  #[must_use]
  pub fn is_multiple_value(&self) -> bool {
    matches!(
      self,
      Self::Call(_)
        | Self::StringCall(_)
        | Self::TableCall(_)
        | Self::Literal(Literal {
          kind: LiteralKind::Vararg,
          ..
        })
    )
  }

  /// The name of the kind of the expression
  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Binary(_) => "Binary",
      Self::Call(_) => "Call",
      Self::Function(_) => "Function",
      Self::Group(_) => "Group",
      Self::Identifier(_) => "Identifier",
      Self::Index(_) => "Index",
      Self::Literal(_) => "Literal",
      Self::Member(_) => "Member",
      Self::StringCall(_) => "StringCall",
      Self::Table(_) => "Table",
      Self::TableCall(_) => "TableCall",
      Self::Unary(_) => "Unary",
    }
  }
}
impl GetSpan for Expression {
  fn span(&self) -> Span {
    match self {
      Self::Binary(binary) => binary.span,
      Self::Call(call) => call.span,
      Self::Function(function) => function.span,
      Self::Group(group) => group.span,
      Self::Identifier(name) => name.span,
      Self::Index(index) => index.span,
      Self::Literal(literal) => literal.span,
      Self::Member(member) => member.span,
      Self::StringCall(call) => call.span,
      Self::Table(table) => table.span,
      Self::TableCall(call) => call.span,
      Self::Unary(unary) => unary.span,
    }
  }
}

/// A binary expression, e.g. `1 + 2`, `a and b`
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
  /// The left hand side of the operation
  pub left: Box<Expression>,
  /// The operator of the operation
  pub operator: BinaryOperator,
  /// The right hand side of the operation
  pub right: Box<Expression>,
  /// The location of the expression
  pub span: Span,
}

/// The operator of a binary expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
  /// `+`
  Add,
  /// `-`
  Subtract,
  /// `*`
  Multiply,
  /// `/`
  Divide,
  /// `%`
  Remainder,
  /// `^`
  Power,
  /// `..`
  Concat,
  /// `==`
  Equal,
  /// `~=`
  NotEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,
  /// `and`
  And,
  /// `or`
  Or,
}
impl BinaryOperator {
  /// The source representation of the operator
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Add => "+",
      Self::Subtract => "-",
      Self::Multiply => "*",
      Self::Divide => "/",
      Self::Remainder => "%",
      Self::Power => "^",
      Self::Concat => "..",
      Self::Equal => "==",
      Self::NotEqual => "~=",
      Self::Less => "<",
      Self::LessEqual => "<=",
      Self::Greater => ">",
      Self::GreaterEqual => ">=",
      Self::And => "and",
      Self::Or => "or",
    }
  }

  /// Is the operator a short-circuiting logical operator (`and`, `or`)?
  #[must_use]
  pub fn is_logical(self) -> bool {
    matches!(self, Self::And | Self::Or)
  }
}
impl fmt::Display for BinaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A function call with arguments in brackets, e.g. `print(1, 2)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
  /// The expression being called
  pub base: Box<Expression>,
  /// The arguments passed
  pub arguments: Vec<Expression>,
  /// The location of the expression
  pub span: Span,
}

/// An expression in parentheses, e.g. `(1 + 2)`
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
  /// The expression in the parentheses
  pub expression: Box<Expression>,
  /// The location of the expression, including the parentheses
  pub span: Span,
}

/// Indexing with an expression, e.g. `t[1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
  /// The expression being indexed
  pub base: Box<Expression>,
  /// The key
  pub index: Box<Expression>,
  /// The location of the expression
  pub span: Span,
}

/// A literal value, e.g. `nil`, `true`, `1`, `"hello"`, `...`
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
  /// The type and value of the literal
  pub kind: LiteralKind,
  /// The source text of the literal
  pub raw: String,
  /// The location of the literal
  pub span: Span,
}
impl GetSpan for Literal {
  fn span(&self) -> Span {
    self.span
  }
}

/// The type and value of a literal
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
  /// `nil`
  Nil,
  /// `true` or `false`
  Boolean(bool),
  /// A number
  Number(f64),
  /// A string, with escape sequences decoded. Lua strings are bytes, not UTF-8
  String(Vec<u8>),
  /// `...`
  Vararg,
}

/// The character used between the base and the field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indexer {
  /// `.`
  Dot,
  /// `:`, a method
  Colon,
}
impl Indexer {
  /// The source representation of the indexer
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Dot => ".",
      Self::Colon => ":",
    }
  }
}

/// Accessing a field by name, e.g. `t.field`, `obj:method`
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
  /// The expression being indexed
  pub base: Box<Expression>,
  /// `.` or `:`
  pub indexer: Indexer,
  /// The name of the field
  pub identifier: Name,
  /// The location of the expression
  pub span: Span,
}

/// A call with a single string argument, e.g. `require "module"`
#[derive(Debug, Clone, PartialEq)]
pub struct StringCall {
  /// The expression being called
  pub base: Box<Expression>,
  /// The string argument
  pub argument: Literal,
  /// The location of the expression
  pub span: Span,
}

/// A table constructor, e.g. `{ 1, 2, key = 3 }`
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
  /// The fields of the table
  pub fields: Vec<Field>,
  /// The location of the expression
  pub span: Span,
}
impl GetSpan for Table {
  fn span(&self) -> Span {
    self.span
  }
}

/// A call with a single table argument, e.g. `setup { debug = true }`
#[derive(Debug, Clone, PartialEq)]
pub struct TableCall {
  /// The expression being called
  pub base: Box<Expression>,
  /// The table argument
  pub argument: Table,
  /// The location of the expression
  pub span: Span,
}

/// A field of a table constructor
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
  /// A field with a computed key, e.g. `[1 + 1] = 2`
  Keyed(KeyedField),
  /// A field with a name as key, e.g. `name = "value"`
  Named(NamedField),
  /// A field without a key, e.g. `"value"`
  Positional(Expression),
  /// A comment between fields
  Comment(Comment),
}
impl Field {
  /// Is the field a comment?
  #[must_use]
  pub fn is_comment(&self) -> bool {
    matches!(self, Self::Comment(_))
  }
}
impl GetSpan for Field {
  fn span(&self) -> Span {
    match self {
      Self::Keyed(field) => field.span,
      Self::Named(field) => field.span,
      Self::Positional(value) => value.span(),
      Self::Comment(comment) => comment.span,
    }
  }
}

/// A field with a computed key, e.g. `[1 + 1] = 2`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedField {
  /// The key expression
  pub key: Expression,
  /// The value expression
  pub value: Expression,
  /// The location of the field
  pub span: Span,
}

/// A field with a name as key, e.g. `name = "value"`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedField {
  /// The key
  pub name: Name,
  /// The value expression
  pub value: Expression,
  /// The location of the field
  pub span: Span,
}

/// A unary expression, e.g. `not x`, `-1`, `#list`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
  /// The operator
  pub operator: UnaryOperator,
  /// The operand
  pub argument: Box<Expression>,
  /// The location of the expression
  pub span: Span,
}

/// The operator of a unary expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
  /// `not`
  Not,
  /// `-`
  Negate,
  /// `#`
  Length,
}
impl UnaryOperator {
  /// The source representation of the operator
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Not => "not",
      Self::Negate => "-",
      Self::Length => "#",
    }
  }

  /// Is the operator a word rather than a symbol?
  #[must_use]
  pub fn is_word(self) -> bool {
    self == Self::Not
  }
}
impl fmt::Display for UnaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
