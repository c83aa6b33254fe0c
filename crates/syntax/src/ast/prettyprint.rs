//! Pretty-print the AST into a human readable format.
//!
//! Based upon this [blog post](https://www.georgevreilly.com/blog/2023/01/24/TreeInRust2PrintingTrees.html)

use super::{AST, Chunk, Comment, Name, expression::*, statement::*};
use std::fmt;

impl fmt::Display for AST<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.chunk)?;

    for comment in &self.comments {
      comment.pretty(f, "", false)?;
    }

    Ok(())
  }
}
impl fmt::Display for Chunk {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for statement in &self.body {
      statement.pretty(f, "", false)?;
    }

    Ok(())
  }
}
impl fmt::Display for FunctionName {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let path = self.path.iter().map(|name| name.name.as_str());
    write!(f, "{}", path.collect::<Vec<_>>().join("."))?;

    if let Some(method) = &self.method {
      write!(f, ":{}", method.name)?;
    }

    Ok(())
  }
}

const OTHER_CHILD: &str = "│  ";
const OTHER_ENTRY: &str = "├─ ";
const FINAL_CHILD: &str = "   ";
const FINAL_ENTRY: &str = "╰─ ";

pub trait PrettyPrint {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result;
}

/// Write the line for a node, and get the prefix for its children
fn entry(
  f: &mut fmt::Formatter,
  prefix: &str,
  last: bool,
  label: fmt::Arguments,
) -> Result<String, fmt::Error> {
  let connector = if last { FINAL_ENTRY } else { OTHER_ENTRY };
  writeln!(f, "{prefix}{connector}{label}")?;

  Ok(format!("{prefix}{}", if last { FINAL_CHILD } else { OTHER_CHILD }))
}

fn list<T: PrettyPrint>(f: &mut fmt::Formatter, items: &[T], prefix: &str) -> fmt::Result {
  let Some((last_item, items)) = items.split_last() else {
    return Ok(());
  };

  for item in items {
    item.pretty(f, prefix, false)?;
  }
  last_item.pretty(f, prefix, true)
}

/// A labelled group of nodes, e.g. the arguments of a call
fn section<T: PrettyPrint>(
  f: &mut fmt::Formatter,
  label: &str,
  items: &[T],
  prefix: &str,
  last: bool,
) -> fmt::Result {
  let prefix = entry(f, prefix, last, format_args!("{label}"))?;
  list(f, items, &prefix)
}

impl<T: PrettyPrint> PrettyPrint for Box<T> {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    self.as_ref().pretty(f, prefix, last)
  }
}
impl PrettyPrint for Comment {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    entry(f, prefix, last, format_args!("Comment ({})", self.raw.escape_debug()))?;
    Ok(())
  }
}
impl PrettyPrint for Name {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    entry(f, prefix, last, format_args!("Name ({})", self.name))?;
    Ok(())
  }
}

impl PrettyPrint for Statement {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match self {
      Self::Assignment(x) => x.pretty(f, prefix, last),
      Self::Break(_) => entry(f, prefix, last, format_args!("Break")).map(|_| ()),
      Self::Call(x) => x.pretty(f, prefix, last),
      Self::Comment(x) => x.pretty(f, prefix, last),
      Self::Do(x) => x.pretty(f, prefix, last),
      Self::ForGeneric(x) => x.pretty(f, prefix, last),
      Self::ForNumeric(x) => x.pretty(f, prefix, last),
      Self::Function(x) => x.pretty(f, prefix, last),
      Self::Goto(x) => entry(f, prefix, last, format_args!("Goto ({})", x.label.name)).map(|_| ()),
      Self::If(x) => x.pretty(f, prefix, last),
      Self::Label(x) => entry(f, prefix, last, format_args!("Label ({})", x.label.name)).map(|_| ()),
      Self::Local(x) => x.pretty(f, prefix, last),
      Self::Repeat(x) => x.pretty(f, prefix, last),
      Self::Return(x) => x.pretty(f, prefix, last),
      Self::While(x) => x.pretty(f, prefix, last),
    }
  }
}
impl PrettyPrint for Assignment {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Assignment"))?;
    section(f, "Variables", &self.variables, &prefix, false)?;
    section(f, "Values", &self.init, &prefix, true)
  }
}
impl PrettyPrint for CallStatement {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Call Statement"))?;
    self.expression.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Do {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Do"))?;
    list(f, &self.body, &prefix)
  }
}
impl PrettyPrint for ForGeneric {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("For Generic"))?;
    section(f, "Variables", &self.variables, &prefix, false)?;
    section(f, "Iterators", &self.iterators, &prefix, false)?;
    section(f, "Body", &self.body, &prefix, true)
  }
}
impl PrettyPrint for ForNumeric {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("For Numeric ({})", self.variable.name))?;
    section(f, "Start", std::slice::from_ref(&self.start), &prefix, false)?;
    section(f, "End", std::slice::from_ref(&self.end), &prefix, false)?;
    if let Some(step) = &self.step {
      section(f, "Step", std::slice::from_ref(step), &prefix, false)?;
    }
    section(f, "Body", &self.body, &prefix, true)
  }
}
impl PrettyPrint for Function {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = match (&self.name, self.is_local) {
      (Some(name), true) => entry(f, prefix, last, format_args!("Local Function ({name})"))?,
      (Some(name), false) => entry(f, prefix, last, format_args!("Function ({name})"))?,
      (None, _) => entry(f, prefix, last, format_args!("Function"))?,
    };

    if !self.parameters.is_empty() {
      section(f, "Parameters", &self.parameters, &prefix, false)?;
    }
    section(f, "Body", &self.body, &prefix, true)
  }
}
impl PrettyPrint for Parameter {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match self {
      Self::Name(name) => name.pretty(f, prefix, last),
      Self::Vararg(_) => entry(f, prefix, last, format_args!("Vararg")).map(|_| ()),
    }
  }
}
impl PrettyPrint for If {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("If"))?;
    list(f, &self.clauses, &prefix)
  }
}
impl PrettyPrint for Clause {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let label = match self.kind {
      ClauseKind::If(_) => "If Clause",
      ClauseKind::ElseIf(_) => "Else If Clause",
      ClauseKind::Else => "Else Clause",
    };
    let prefix = entry(f, prefix, last, format_args!("{label}"))?;

    if let Some(condition) = self.kind.condition() {
      section(f, "Condition", std::slice::from_ref(condition), &prefix, false)?;
    }
    section(f, "Body", &self.body, &prefix, true)
  }
}
impl PrettyPrint for Local {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Local"))?;

    if self.init.is_empty() {
      return section(f, "Variables", &self.variables, &prefix, true);
    }
    section(f, "Variables", &self.variables, &prefix, false)?;
    section(f, "Values", &self.init, &prefix, true)
  }
}
impl PrettyPrint for Repeat {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Repeat"))?;
    section(f, "Body", &self.body, &prefix, false)?;
    section(f, "Until", std::slice::from_ref(&self.condition), &prefix, true)
  }
}
impl PrettyPrint for Return {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Return"))?;
    list(f, &self.arguments, &prefix)
  }
}
impl PrettyPrint for While {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("While"))?;
    section(f, "Condition", std::slice::from_ref(&self.condition), &prefix, false)?;
    section(f, "Body", &self.body, &prefix, true)
  }
}

impl PrettyPrint for Expression {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match self {
      Self::Binary(x) => x.pretty(f, prefix, last),
      Self::Call(x) => x.pretty(f, prefix, last),
      Self::Function(x) => x.pretty(f, prefix, last),
      Self::Group(x) => x.pretty(f, prefix, last),
      Self::Identifier(x) => entry(f, prefix, last, format_args!("Variable ({})", x.name)).map(|_| ()),
      Self::Index(x) => x.pretty(f, prefix, last),
      Self::Literal(x) => x.pretty(f, prefix, last),
      Self::Member(x) => x.pretty(f, prefix, last),
      Self::StringCall(x) => x.pretty(f, prefix, last),
      Self::Table(x) => x.pretty(f, prefix, last),
      Self::TableCall(x) => x.pretty(f, prefix, last),
      Self::Unary(x) => x.pretty(f, prefix, last),
    }
  }
}
impl PrettyPrint for Binary {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Binary ({})", self.operator))?;
    self.left.pretty(f, &prefix, false)?;
    self.right.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Call {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Call"))?;
    section(f, "Callee", std::slice::from_ref(&self.base), &prefix, false)?;
    section(f, "Arguments", &self.arguments, &prefix, true)
  }
}
impl PrettyPrint for Group {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Group"))?;
    self.expression.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Index {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Index"))?;
    self.base.pretty(f, &prefix, false)?;
    self.index.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Literal {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let raw = &self.raw;
    match self.kind {
      LiteralKind::Nil => entry(f, prefix, last, format_args!("Nil")),
      LiteralKind::Boolean(value) => entry(f, prefix, last, format_args!("Boolean ({value})")),
      LiteralKind::Number(_) => entry(f, prefix, last, format_args!("Number ({raw})")),
      LiteralKind::String(_) => entry(f, prefix, last, format_args!("String {}", raw.escape_debug())),
      LiteralKind::Vararg => entry(f, prefix, last, format_args!("Vararg")),
    }?;

    Ok(())
  }
}
impl PrettyPrint for Member {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let (indexer, name) = (self.indexer.as_str(), &self.identifier.name);
    let prefix = entry(f, prefix, last, format_args!("Member ({indexer}{name})"))?;
    self.base.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for StringCall {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("String Call"))?;
    self.base.pretty(f, &prefix, false)?;
    self.argument.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Table {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Table"))?;
    list(f, &self.fields, &prefix)
  }
}
impl PrettyPrint for Field {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match self {
      Self::Keyed(field) => {
        let prefix = entry(f, prefix, last, format_args!("Keyed Field"))?;
        field.key.pretty(f, &prefix, false)?;
        field.value.pretty(f, &prefix, true)
      }
      Self::Named(field) => {
        let prefix = entry(f, prefix, last, format_args!("Named Field ({})", field.name.name))?;
        field.value.pretty(f, &prefix, true)
      }
      Self::Positional(value) => value.pretty(f, prefix, last),
      Self::Comment(comment) => comment.pretty(f, prefix, last),
    }
  }
}
impl PrettyPrint for TableCall {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Table Call"))?;
    self.base.pretty(f, &prefix, false)?;
    self.argument.pretty(f, &prefix, true)
  }
}
impl PrettyPrint for Unary {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let prefix = entry(f, prefix, last, format_args!("Unary ({})", self.operator))?;
    self.argument.pretty(f, &prefix, true)
  }
}
