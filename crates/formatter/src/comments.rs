//! # Comment Reattachment
//!
//! The parser keeps comments out of the tree. Put each one back into the innermost
//! block or table which contains it, before the first item which comes after it.
//!
//! Expressions can't hold comments, so a comment inside an expression is moved up to the
//! nearest block, in front of the statement containing it. The chunk accepts every
//! comment, so none are lost.

use log::{debug, trace};
use luafmt_syntax::{
  GetSpan,
  ast::{
    Chunk, Comment, Expression, Statement,
    expression::{Field, Table},
    statement::{Clause, ClauseKind, Function},
  },
};

/// Place every comment into the chunk
pub(crate) fn attach(chunk: &mut Chunk, comments: &[Comment]) {
  for comment in comments {
    insert(&mut chunk.body, comment.clone());
  }
}

/// A node which may be able to hold a comment somewhere inside it
trait Attach: GetSpan {
  /// Place the comment in the innermost container in the node,
  /// or give it back if the node has nowhere to put it.
  fn attach(&mut self, comment: Comment) -> Result<(), Comment>;
}
impl<T: Attach> Attach for Box<T> {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    self.as_mut().attach(comment)
  }
}

/// An item of a list which comments can be inserted into
trait Slot: Attach {
  fn from_comment(comment: Comment) -> Self;
}

/// Insert a comment into a list, inside an item if one can hold it
fn insert<T: Slot>(slot: &mut Vec<T>, comment: Comment) {
  let span = comment.span;

  let (index, comment) = match slot.iter().position(|item| item.span().contains(span)) {
    Some(index) => match slot[index].attach(comment) {
      Ok(()) => return,
      Err(comment) => {
        debug!("Moved comment at {} out of an expression", span.start);
        (index, comment)
      }
    },
    None => {
      let index = slot.iter().position(|item| item.span().start >= span.end);
      (index.unwrap_or(slot.len()), comment)
    }
  };

  trace!("Placed comment at {} at position {index}", span.start);
  slot.insert(index, T::from_comment(comment));
}

/// Try the node, if it contains the comment
fn within<T: Attach>(node: &mut T, comment: Comment) -> Result<(), Comment> {
  if node.span().contains(comment.span) {
    node.attach(comment)
  } else {
    Err(comment)
  }
}

fn within_optional<T: Attach>(node: Option<&mut T>, comment: Comment) -> Result<(), Comment> {
  match node {
    Some(node) => within(node, comment),
    None => Err(comment),
  }
}

fn within_any<T: Attach>(nodes: &mut [T], mut comment: Comment) -> Result<(), Comment> {
  for node in nodes {
    comment = match within(node, comment) {
      Ok(()) => return Ok(()),
      Err(comment) => comment,
    };
  }

  Err(comment)
}

/// A container takes any comment its children don't
fn or_insert<T: Slot>(attempt: Result<(), Comment>, slot: &mut Vec<T>) -> Result<(), Comment> {
  if let Err(comment) = attempt {
    insert(slot, comment);
  }

  Ok(())
}

impl Slot for Statement {
  fn from_comment(comment: Comment) -> Self {
    Self::Comment(comment)
  }
}
impl Attach for Statement {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    match self {
      Self::Assignment(assignment) => within_any(&mut assignment.variables, comment)
        .or_else(|comment| within_any(&mut assignment.init, comment)),
      Self::Break(_) | Self::Comment(_) | Self::Goto(_) | Self::Label(_) => Err(comment),
      Self::Call(call) => within(&mut call.expression, comment),
      Self::Do(do_) => or_insert(Err(comment), &mut do_.body),
      Self::ForGeneric(for_) => or_insert(within_any(&mut for_.iterators, comment), &mut for_.body),
      Self::ForNumeric(for_) => {
        let attempt = within(&mut for_.start, comment)
          .or_else(|comment| within(&mut for_.end, comment))
          .or_else(|comment| within_optional(for_.step.as_mut(), comment));
        or_insert(attempt, &mut for_.body)
      }
      Self::Function(function) => function.attach(comment),
      Self::If(if_) => within_any(&mut if_.clauses, comment),
      Self::Local(local) => within_any(&mut local.init, comment),
      Self::Repeat(repeat) => {
        let attempt = within(&mut repeat.condition, comment);
        or_insert(attempt, &mut repeat.body)
      }
      Self::Return(return_) => within_any(&mut return_.arguments, comment),
      Self::While(while_) => {
        let attempt = within(&mut while_.condition, comment);
        or_insert(attempt, &mut while_.body)
      }
    }
  }
}

impl Attach for Clause {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    let attempt = match &mut self.kind {
      ClauseKind::If(condition) | ClauseKind::ElseIf(condition) => within(condition, comment),
      ClauseKind::Else => Err(comment),
    };

    or_insert(attempt, &mut self.body)
  }
}

impl Attach for Function {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    or_insert(Err(comment), &mut self.body)
  }
}

impl Attach for Expression {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    match self {
      Self::Binary(binary) => {
        within(&mut binary.left, comment).or_else(|comment| within(&mut binary.right, comment))
      }
      Self::Call(call) => within(&mut call.base, comment)
        .or_else(|comment| within_any(&mut call.arguments, comment)),
      Self::Function(function) => function.attach(comment),
      Self::Group(group) => within(&mut group.expression, comment),
      Self::Identifier(_) | Self::Literal(_) => Err(comment),
      Self::Index(index) => {
        within(&mut index.base, comment).or_else(|comment| within(&mut index.index, comment))
      }
      Self::Member(member) => within(&mut member.base, comment),
      Self::StringCall(call) => within(&mut call.base, comment),
      Self::Table(table) => table.attach(comment),
      Self::TableCall(call) => {
        within(&mut call.base, comment).or_else(|comment| within(&mut call.argument, comment))
      }
      Self::Unary(unary) => within(&mut unary.argument, comment),
    }
  }
}

impl Attach for Table {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    or_insert(Err(comment), &mut self.fields)
  }
}

impl Slot for Field {
  fn from_comment(comment: Comment) -> Self {
    Self::Comment(comment)
  }
}
impl Attach for Field {
  fn attach(&mut self, comment: Comment) -> Result<(), Comment> {
    match self {
      Self::Keyed(field) => {
        within(&mut field.key, comment).or_else(|comment| within(&mut field.value, comment))
      }
      Self::Named(field) => within(&mut field.value, comment),
      Self::Positional(value) => within(value, comment),
      Self::Comment(_) => Err(comment),
    }
  }
}
