//! # Range Repair
//!
//! The parser gives if clauses the span of their header only. Extend each clause to
//! the start of the next, and the last to the end of the if statement, so a clause
//! contains everything written inside it.

use log::trace;
use luafmt_syntax::ast::{
  Chunk, Expression, Statement,
  expression::Field,
  statement::{ClauseKind, If},
};

/// Repair the spans of every if statement in the chunk
pub(crate) fn repair(chunk: &mut Chunk) {
  statements(&mut chunk.body);
}

fn statements(body: &mut [Statement]) {
  body.iter_mut().for_each(statement);
}

fn expressions(expressions: &mut [Expression]) {
  expressions.iter_mut().for_each(expression);
}

fn statement(statement: &mut Statement) {
  match statement {
    Statement::Assignment(assignment) => {
      expressions(&mut assignment.variables);
      expressions(&mut assignment.init);
    }
    Statement::Break(_) | Statement::Comment(_) | Statement::Goto(_) | Statement::Label(_) => {}
    Statement::Call(call) => expression(&mut call.expression),
    Statement::Do(do_) => statements(&mut do_.body),
    Statement::ForGeneric(for_) => {
      expressions(&mut for_.iterators);
      statements(&mut for_.body);
    }
    Statement::ForNumeric(for_) => {
      expression(&mut for_.start);
      expression(&mut for_.end);
      if let Some(step) = &mut for_.step {
        expression(step);
      }
      statements(&mut for_.body);
    }
    Statement::Function(function) => statements(&mut function.body),
    Statement::If(if_) => {
      clauses(if_);
      for clause in &mut if_.clauses {
        if let ClauseKind::If(condition) | ClauseKind::ElseIf(condition) = &mut clause.kind {
          expression(condition);
        }
        statements(&mut clause.body);
      }
    }
    Statement::Local(local) => expressions(&mut local.init),
    Statement::Repeat(repeat) => {
      statements(&mut repeat.body);
      expression(&mut repeat.condition);
    }
    Statement::Return(return_) => expressions(&mut return_.arguments),
    Statement::While(while_) => {
      expression(&mut while_.condition);
      statements(&mut while_.body);
    }
  }
}

fn clauses(if_: &mut If) {
  for index in 0..if_.clauses.len() {
    let end = if_.clauses.get(index + 1).map_or(if_.span.end, |next| next.span.start);
    let clause = &mut if_.clauses[index];

    if clause.span.end != end {
      trace!("Extended clause at {} to end at {end}", clause.span.start);
      clause.span.end = end;
    }
  }
}

fn expression(expression: &mut Expression) {
  match expression {
    Expression::Binary(binary) => {
      self::expression(&mut binary.left);
      self::expression(&mut binary.right);
    }
    Expression::Call(call) => {
      self::expression(&mut call.base);
      expressions(&mut call.arguments);
    }
    Expression::Function(function) => statements(&mut function.body),
    Expression::Group(group) => self::expression(&mut group.expression),
    Expression::Identifier(_) | Expression::Literal(_) => {}
    Expression::Index(index) => {
      self::expression(&mut index.base);
      self::expression(&mut index.index);
    }
    Expression::Member(member) => self::expression(&mut member.base),
    Expression::StringCall(call) => self::expression(&mut call.base),
    Expression::Table(table) => fields(&mut table.fields),
    Expression::TableCall(call) => {
      self::expression(&mut call.base);
      fields(&mut call.argument.fields);
    }
    Expression::Unary(unary) => self::expression(&mut unary.argument),
  }
}

fn fields(fields: &mut [Field]) {
  for field in fields {
    match field {
      Field::Keyed(field) => {
        expression(&mut field.key);
        expression(&mut field.value);
      }
      Field::Named(field) => expression(&mut field.value),
      Field::Positional(value) => expression(value),
      Field::Comment(_) => {}
    }
  }
}

#[cfg(test)]
mod test {
  use super::repair;
  use luafmt_syntax::{
    GetSpan, Span,
    ast::{Expression, Statement},
    parse,
  };

  fn clause_spans(statement: &Statement) -> Vec<Span> {
    let Statement::If(if_) = statement else {
      panic!("expected if statement");
    };
    if_.clauses.iter().map(|clause| clause.span).collect()
  }

  #[test]
  fn clauses_extend_to_next_clause() {
    let source = "if a then b() elseif c then d() else e() end";
    let mut chunk = parse(source).unwrap().chunk;
    repair(&mut chunk);

    assert_eq!(
      clause_spans(&chunk.body[0]),
      [Span::new(0, 14), Span::new(14, 32), Span::new(32, 44)]
    );
  }

  #[test]
  fn clauses_contain_their_bodies() {
    let source = "if a then\n  b()\n  c()\nend";
    let mut chunk = parse(source).unwrap().chunk;
    repair(&mut chunk);

    let Statement::If(if_) = &chunk.body[0] else {
      panic!("expected if statement");
    };
    let clause = &if_.clauses[0];
    assert_eq!(clause.body.len(), 2);
    assert!(clause.body.iter().all(|statement| clause.span.contains(statement.span())));
  }

  #[test]
  fn nested_if_statements_are_repaired() {
    let source = "f(function() if a then else end end)";
    let mut chunk = parse(source).unwrap().chunk;
    repair(&mut chunk);

    let Statement::Call(call) = &chunk.body[0] else {
      panic!("expected call");
    };
    let Expression::Call(call) = &call.expression else {
      panic!("expected call");
    };
    let Expression::Function(function) = &call.arguments[0] else {
      panic!("expected function");
    };
    assert_eq!(
      clause_spans(&function.body[0]),
      [Span::new(13, 23), Span::new(23, 31)]
    );
  }

  #[test]
  fn repair_is_idempotent() {
    let source = "if a then elseif b then end";
    let mut chunk = parse(source).unwrap().chunk;
    repair(&mut chunk);
    let once = chunk.clone();
    repair(&mut chunk);

    assert_eq!(chunk, once);
  }
}
