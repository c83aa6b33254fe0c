//! # Statements

use super::{Comment, GetSpan, Name, expression::Expression};
use crate::span::Span;

/// A statement in the source code.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  /// Assigning to existing variables or fields, e.g. `a, t.b = 1, 2`
  Assignment(Assignment),
  /// `break`
  Break(Break),
  /// A function call as a statement, e.g. `print("hello")`
  Call(CallStatement),
  /// A comment on its own, between statements
  Comment(Comment),
  /// A scoped block, e.g. `do ... end`
  Do(Do),
  /// A generic for loop, e.g. `for k, v in pairs(t) do ... end`
  ForGeneric(ForGeneric),
  /// A numeric for loop, e.g. `for i = 1, 10, 2 do ... end`
  ForNumeric(ForNumeric),
  /// A function declaration, e.g. `function a.b:c() ... end`, `local function f() ... end`
  Function(Box<Function>),
  /// A jump to a label, e.g. `goto continue`
  Goto(Goto),
  /// An if statement, with optional `elseif` and `else` clauses
  If(If),
  /// A label, e.g. `::continue::`
  Label(Label),
  /// Declaring local variables, e.g. `local a, b = 1, 2`
  Local(Local),
  /// A repeat-until loop, e.g. `repeat ... until done`
  Repeat(Repeat),
  /// A return statement, e.g. `return a, b`
  Return(Return),
  /// A while loop, e.g. `while running do ... end`
  While(While),
}
impl Statement {
  /// Is the statement a comment?
  #[must_use]
  pub fn is_comment(&self) -> bool {
    matches!(self, Self::Comment(_))
  }

  /// Is the statement a (named) function declaration?
  #[must_use]
  pub fn is_function_declaration(&self) -> bool {
    matches!(self, Self::Function(_))
  }

  /// The name of the kind of the statement
  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Assignment(_) => "Assignment",
      Self::Break(_) => "Break",
      Self::Call(_) => "CallStatement",
      Self::Comment(_) => "Comment",
      Self::Do(_) => "Do",
      Self::ForGeneric(_) => "ForGeneric",
      Self::ForNumeric(_) => "ForNumeric",
      Self::Function(_) => "Function",
      Self::Goto(_) => "Goto",
      Self::If(_) => "If",
      Self::Label(_) => "Label",
      Self::Local(_) => "Local",
      Self::Repeat(_) => "Repeat",
      Self::Return(_) => "Return",
      Self::While(_) => "While",
    }
  }
}
impl GetSpan for Statement {
  fn span(&self) -> Span {
    match self {
      Self::Assignment(assignment) => assignment.span,
      Self::Break(break_) => break_.span,
      Self::Call(call) => call.span,
      Self::Comment(comment) => comment.span,
      Self::Do(do_) => do_.span,
      Self::ForGeneric(for_) => for_.span,
      Self::ForNumeric(for_) => for_.span,
      Self::Function(function) => function.span,
      Self::Goto(goto) => goto.span,
      Self::If(if_) => if_.span,
      Self::Label(label) => label.span,
      Self::Local(local) => local.span,
      Self::Repeat(repeat) => repeat.span,
      Self::Return(return_) => return_.span,
      Self::While(while_) => while_.span,
    }
  }
}

/// Assigning to existing variables or fields, e.g. `a, t.b = 1, 2`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
  /// The targets, identifiers, members, or indexes
  pub variables: Vec<Expression>,
  /// The values
  pub init: Vec<Expression>,
  /// The location of the statement
  pub span: Span,
}

/// `break`
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
  /// The location of the statement
  pub span: Span,
}

/// A function call as a statement, e.g. `print("hello")`
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
  /// The call expression
  pub expression: Expression,
  /// The location of the statement
  pub span: Span,
}

/// A scoped block, e.g. `do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct Do {
  /// The statements in the block
  pub body: Vec<Statement>,
  /// The location of the statement
  pub span: Span,
}

/// A generic for loop, e.g. `for k, v in pairs(t) do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForGeneric {
  /// The loop variables
  pub variables: Vec<Name>,
  /// The iterator expressions
  pub iterators: Vec<Expression>,
  /// The loop body
  pub body: Vec<Statement>,
  /// The location of the statement
  pub span: Span,
}

/// A numeric for loop, e.g. `for i = 1, 10, 2 do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForNumeric {
  /// The loop variable
  pub variable: Name,
  /// The initial value
  pub start: Expression,
  /// The limit
  pub end: Expression,
  /// The optional step
  pub step: Option<Expression>,
  /// The loop body
  pub body: Vec<Statement>,
  /// The location of the statement
  pub span: Span,
}

/// A function, either a declaration statement or an anonymous function expression
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
  /// The name of the function, missing for anonymous functions
  pub name: Option<FunctionName>,
  /// Is it a `local function` declaration?
  pub is_local: bool,
  /// The parameters
  pub parameters: Vec<Parameter>,
  /// The function body
  pub body: Vec<Statement>,
  /// The location of the function, from `local`/`function` to `end`
  pub span: Span,
}
impl GetSpan for Function {
  fn span(&self) -> Span {
    self.span
  }
}

/// The name of a declared function, e.g. `a.b.c:method`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionName {
  /// The dotted path, e.g. `a`, `b`, `c`
  pub path: Vec<Name>,
  /// The method name after a `:`
  pub method: Option<Name>,
  /// The location of the name
  pub span: Span,
}
impl GetSpan for FunctionName {
  fn span(&self) -> Span {
    self.span
  }
}

/// A parameter of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
  /// A named parameter
  Name(Name),
  /// `...`
  Vararg(Span),
}
impl GetSpan for Parameter {
  fn span(&self) -> Span {
    match self {
      Self::Name(name) => name.span,
      Self::Vararg(span) => *span,
    }
  }
}

/// A jump to a label, e.g. `goto continue`
#[derive(Debug, Clone, PartialEq)]
pub struct Goto {
  /// The label to jump to
  pub label: Name,
  /// The location of the statement
  pub span: Span,
}

/// An if statement, with optional `elseif` and `else` clauses
#[derive(Debug, Clone, PartialEq)]
pub struct If {
  /// The clauses, always starting with an `if` clause
  pub clauses: Vec<Clause>,
  /// The location of the statement, from `if` to `end`
  pub span: Span,
}

/// A clause of an if statement
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
  /// Which kind of clause, with its condition
  pub kind: ClauseKind,
  /// The statements run if the clause is chosen
  pub body: Vec<Statement>,
  /// The location of the clause.
  ///
  /// As produced by the parser, this only covers the clause header: from the keyword up
  /// to and including `then` (or just `else`). It does not contain the body.
  pub span: Span,
}
impl GetSpan for Clause {
  fn span(&self) -> Span {
    self.span
  }
}

/// Which kind of clause, with its condition
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseKind {
  /// `if condition then`
  If(Expression),
  /// `elseif condition then`
  ElseIf(Expression),
  /// `else`
  Else,
}
impl ClauseKind {
  /// The condition of the clause, if it has one
  #[must_use]
  pub fn condition(&self) -> Option<&Expression> {
    match self {
      Self::If(condition) | Self::ElseIf(condition) => Some(condition),
      Self::Else => None,
    }
  }
}

/// A label, e.g. `::continue::`
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
  /// The name of the label
  pub label: Name,
  /// The location of the statement
  pub span: Span,
}

/// Declaring local variables, e.g. `local a, b = 1, 2`
#[derive(Debug, Clone, PartialEq)]
pub struct Local {
  /// The variables being declared
  pub variables: Vec<Name>,
  /// The values, possibly empty
  pub init: Vec<Expression>,
  /// The location of the statement
  pub span: Span,
}

/// A repeat-until loop, e.g. `repeat ... until done`
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
  /// The loop body
  pub body: Vec<Statement>,
  /// The condition to stop looping
  pub condition: Expression,
  /// The location of the statement
  pub span: Span,
}

/// A return statement, e.g. `return a, b`
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
  /// The values returned
  pub arguments: Vec<Expression>,
  /// The location of the statement
  pub span: Span,
}

/// A while loop, e.g. `while running do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct While {
  /// The condition to keep looping
  pub condition: Expression,
  /// The loop body
  pub body: Vec<Statement>,
  /// The location of the statement
  pub span: Span,
}
