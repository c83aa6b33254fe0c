use crate::{
  FormatError,
  formatter::{Formattable, Formatter},
  literal::{long_bracket, normalize_hex, normalize_number, normalize_string},
  precedence::{left_needs_parens, right_needs_parens, unary_needs_parens},
};
use luafmt_syntax::{
  ast::{Chunk, Comment, Expression, Name, Statement, expression::*, statement::*},
  parse_number,
};

impl<T: Formattable> Formattable for Box<T> {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    self.as_ref().format(f, depth)
  }
}

impl Formattable for Chunk {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    f.statements(&self.body, depth)
  }
}

impl Formattable for Name {
  fn format(&self, _: &Formatter, _: usize) -> Result<String, FormatError> {
    Ok(self.name.clone())
  }
}

impl Formattable for Comment {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let content = self.text.trim();

    if !self.is_block() || !content.contains(['\n', '\r']) {
      return Ok(if content.is_empty() {
        "--".into()
      } else {
        format!("-- {content}")
      });
    }

    let line_indentation = format!("\n{}", f.indentation(depth + 1));
    let lines = content
      .split(['\n', '\r'])
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .collect::<Vec<_>>();
    let body = format!(
      "{line_indentation}{}\n{}",
      lines.join(&line_indentation),
      f.indentation(depth)
    );

    Ok(format!("--{}", long_bracket(&body)))
  }
}

impl Formattable for Statement {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    match self {
      Self::Assignment(assignment) => assignment.format(f, depth),
      Self::Break(_) => Ok("break".into()),
      Self::Call(call) => call.format(f, depth),
      Self::Comment(comment) => comment.format(f, depth),
      Self::Do(do_) => do_.format(f, depth),
      Self::ForGeneric(for_) => for_.format(f, depth),
      Self::ForNumeric(for_) => for_.format(f, depth),
      Self::Function(function) => function.format(f, depth),
      Self::Goto(goto) => Ok(format!("goto {}", goto.label.name)),
      Self::If(if_) => if_.format(f, depth),
      Self::Label(label) => Ok(format!("::{}::", label.label.name)),
      Self::Local(local) => local.format(f, depth),
      Self::Repeat(repeat) => repeat.format(f, depth),
      Self::Return(return_) => return_.format(f, depth),
      Self::While(while_) => while_.format(f, depth),
    }
  }
}

impl Formattable for Assignment {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let variables = f.list(&self.variables, depth)?;
    let values = f.list(&self.init, depth)?;

    Ok(format!("{variables} = {values}"))
  }
}

impl Formattable for CallStatement {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    match &self.expression {
      Expression::Call(_) | Expression::StringCall(_) | Expression::TableCall(_) => {
        self.expression.format(f, depth)
      }
      expression => Err(FormatError::UnsupportedNode {
        kind: expression.kind_name(),
      }),
    }
  }
}

impl Formattable for Do {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    Ok(format!("do{}end", f.block(&self.body, depth, true)?))
  }
}

impl Formattable for ForGeneric {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let variables = f.list(&self.variables, depth)?;
    let iterators = f.list(&self.iterators, depth)?;
    let body = f.block(&self.body, depth, true)?;

    Ok(format!("for {variables} in {iterators} do{body}end"))
  }
}

impl Formattable for ForNumeric {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let mut range = vec![self.start.format(f, depth)?, self.end.format(f, depth)?];
    if let Some(step) = &self.step {
      range.push(step.format(f, depth)?);
    }
    let body = f.block(&self.body, depth, true)?;

    Ok(format!(
      "for {} = {} do{body}end",
      self.variable.name,
      range.join(", ")
    ))
  }
}

impl Formattable for Function {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let mut function = String::new();
    if self.is_local {
      function.push_str("local ");
    }
    function.push_str("function");
    if let Some(name) = &self.name {
      function.push(' ');
      function.push_str(&name.to_string());
    }

    function.push('(');
    function.push_str(&f.list(&self.parameters, depth)?);
    function.push(')');
    function.push_str(&f.block(&self.body, depth, true)?);
    function.push_str("end");

    Ok(function)
  }
}

impl Formattable for Parameter {
  fn format(&self, _: &Formatter, _: usize) -> Result<String, FormatError> {
    Ok(match self {
      Self::Name(name) => name.name.clone(),
      Self::Vararg(_) => "...".into(),
    })
  }
}

impl Formattable for If {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let Some(last) = self.clauses.len().checked_sub(1) else {
      return Err(FormatError::UnsupportedNode { kind: "If" });
    };

    let clauses = self
      .clauses
      .iter()
      .enumerate()
      .map(|(index, clause)| format_clause(clause, f, depth, index == last))
      .collect::<Result<Vec<_>, _>>()?;
    let separator = format!("\n{}", f.indentation(depth));

    Ok(format!("{}end", clauses.join(&separator)))
  }
}

/// Only the last clause is followed by the `end` keyword
fn format_clause(
  clause: &Clause,
  f: &Formatter,
  depth: usize,
  trailing: bool,
) -> Result<String, FormatError> {
  let body = f.block(&clause.body, depth, trailing)?;

  Ok(match &clause.kind {
    ClauseKind::If(condition) => format!("if {} then{body}", condition.format(f, depth)?),
    ClauseKind::ElseIf(condition) => format!("elseif {} then{body}", condition.format(f, depth)?),
    ClauseKind::Else => format!("else{body}"),
  })
}

impl Formattable for Local {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let variables = f.list(&self.variables, depth)?;

    if self.init.is_empty() {
      Ok(format!("local {variables}"))
    } else {
      Ok(format!("local {variables} = {}", f.list(&self.init, depth)?))
    }
  }
}

impl Formattable for Repeat {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let body = f.block(&self.body, depth, true)?;
    let condition = self.condition.format(f, depth)?;

    Ok(format!("repeat{body}until {condition}"))
  }
}

impl Formattable for Return {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    if self.arguments.is_empty() {
      Ok("return".into())
    } else {
      Ok(format!("return {}", f.list(&self.arguments, depth)?))
    }
  }
}

impl Formattable for While {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let condition = self.condition.format(f, depth)?;
    let body = f.block(&self.body, depth, true)?;

    Ok(format!("while {condition} do{body}end"))
  }
}

/// The expression as it is printed, without redundant parentheses
///
/// Parentheses around an expression with multiple values are kept, as they
/// truncate it to its first value.
fn without_parens(expression: &Expression) -> &Expression {
  match expression {
    Expression::Group(group) if group.expression.unwrap_groups().is_multiple_value() => expression,
    Expression::Group(group) => without_parens(&group.expression),
    expression => expression,
  }
}

fn parenthesize(text: String, needs_parens: bool) -> String {
  if needs_parens { format!("({text})") } else { text }
}

/// The base of an index, member access, or call
fn format_base(base: &Expression, f: &Formatter, depth: usize) -> Result<String, FormatError> {
  let base = without_parens(base);
  let needs_parens = !matches!(
    base,
    Expression::Identifier(_)
      | Expression::Member(_)
      | Expression::Index(_)
      | Expression::Call(_)
      | Expression::StringCall(_)
      | Expression::TableCall(_)
      | Expression::Group(_)
  );

  Ok(parenthesize(base.format(f, depth)?, needs_parens))
}

impl Formattable for Expression {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    match self {
      Self::Binary(binary) => binary.format(f, depth),
      Self::Call(call) => call.format(f, depth),
      Self::Function(function) => function.format(f, depth),
      Self::Group(group) => group.format(f, depth),
      Self::Identifier(name) => name.format(f, depth),
      Self::Index(index) => index.format(f, depth),
      Self::Literal(literal) => literal.format(f, depth),
      Self::Member(member) => member.format(f, depth),
      Self::StringCall(call) => call.format(f, depth),
      Self::Table(table) => table.format(f, depth),
      Self::TableCall(call) => call.format(f, depth),
      Self::Unary(unary) => unary.format(f, depth),
    }
  }
}

impl Formattable for Binary {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let left = without_parens(&self.left);
    let right = without_parens(&self.right);

    let left_text = parenthesize(
      left.format(f, depth)?,
      left_needs_parens(self.operator, left),
    );
    let right_text = parenthesize(
      right.format(f, depth)?,
      right_needs_parens(self.operator, right),
    );

    Ok(format!("{left_text} {} {right_text}", self.operator))
  }
}

impl Formattable for Call {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let base = format_base(&self.base, f, depth)?;

    if let [argument] = self.arguments.as_slice() {
      match without_parens(argument) {
        Expression::Literal(
          literal @ Literal {
            kind: LiteralKind::String(_),
            ..
          },
        ) => return Ok(base + &literal.format(f, depth)?),
        Expression::Table(table) => return Ok(base + &table.format(f, depth)?),
        _ => {}
      }
    }

    Ok(format!("{base}({})", f.list(&self.arguments, depth)?))
  }
}

impl Formattable for Group {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let expression = self.expression.unwrap_groups();
    let text = expression.format(f, depth)?;

    Ok(parenthesize(text, expression.is_multiple_value()))
  }
}

impl Formattable for Index {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let base = format_base(&self.base, f, depth)?;
    let index = self.index.format(f, depth)?;

    Ok(format!("{base}[{index}]"))
  }
}

impl Formattable for Literal {
  fn format(&self, f: &Formatter, _: usize) -> Result<String, FormatError> {
    match &self.kind {
      LiteralKind::Nil | LiteralKind::Boolean(_) | LiteralKind::Vararg => Ok(self.raw.clone()),
      LiteralKind::Number(value) => format_number(&self.raw, *value),
      LiteralKind::String(value) => Ok(normalize_string(value, f.config.quote_style)),
    }
  }
}

/// Normalise a number, checking it keeps its value
fn format_number(raw: &str, value: f64) -> Result<String, FormatError> {
  let normalized = match normalize_hex(raw) {
    Some(hex) => hex,
    None if value.is_finite() => normalize_number(value),
    None => raw.to_owned(),
  };

  if parse_number(&normalized) == Some(value) {
    Ok(normalized)
  } else {
    Err(FormatError::LiteralRoundTrip {
      raw: raw.to_owned(),
      normalized,
    })
  }
}

impl Formattable for Member {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let base = format_base(&self.base, f, depth)?;

    Ok(format!(
      "{base}{}{}",
      self.indexer.as_str(),
      self.identifier.name
    ))
  }
}

impl Formattable for StringCall {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let base = format_base(&self.base, f, depth)?;

    Ok(base + &self.argument.format(f, depth)?)
  }
}

impl Formattable for Table {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    f.table(&self.fields, depth)
  }
}

impl Formattable for TableCall {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let base = format_base(&self.base, f, depth)?;

    Ok(base + &self.argument.format(f, depth)?)
  }
}

impl Formattable for Field {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    match self {
      Self::Keyed(field) => Ok(format!(
        "[{}] = {}",
        field.key.format(f, depth)?,
        field.value.format(f, depth)?
      )),
      Self::Named(field) => Ok(format!(
        "{} = {}",
        field.name.name,
        field.value.format(f, depth)?
      )),
      Self::Positional(value) => value.format(f, depth),
      Self::Comment(comment) => comment.format(f, depth),
    }
  }
}

impl Formattable for Unary {
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError> {
    let argument = without_parens(&self.argument);
    let text = argument.format(f, depth)?;

    if unary_needs_parens(argument) {
      Ok(format!("{}({text})", self.operator))
    } else if self.operator.is_word() || matches!(argument, Expression::Unary(_)) {
      Ok(format!("{} {text}", self.operator))
    } else {
      Ok(format!("{}{text}", self.operator))
    }
  }
}
