//! # Precedence
//!
//! When the operands of an operator need parentheses to keep their meaning.

use luafmt_syntax::ast::{
  Expression,
  expression::{Binary, BinaryOperator},
};
use std::cmp::Ordering;

/// The rank of all unary operators, only `^` binds tighter
pub const UNARY_RANK: u8 = 7;

/// How tightly a binary operator binds, higher binds tighter
#[must_use]
pub fn rank(operator: BinaryOperator) -> u8 {
  match operator {
    BinaryOperator::Power => 8,
    BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => 6,
    BinaryOperator::Add | BinaryOperator::Subtract => 5,
    BinaryOperator::Concat => 4,
    BinaryOperator::Equal
    | BinaryOperator::NotEqual
    | BinaryOperator::Less
    | BinaryOperator::LessEqual
    | BinaryOperator::Greater
    | BinaryOperator::GreaterEqual => 3,
    BinaryOperator::And => 2,
    BinaryOperator::Or => 1,
  }
}

/// Which way a chain of the same operator groups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  /// `a - b - c` is `(a - b) - c`
  Left,
  /// `a ^ b ^ c` is `a ^ (b ^ c)`
  Right,
}
impl Associativity {
  /// The associativity of an operator
  #[must_use]
  pub fn of(operator: BinaryOperator) -> Self {
    match operator {
      BinaryOperator::Power | BinaryOperator::Concat => Self::Right,
      _ => Self::Left,
    }
  }
}

/// Does `a op (b op c)` equal `(a op b) op c`?
fn is_associative(operator: BinaryOperator) -> bool {
  matches!(
    operator,
    BinaryOperator::Add
      | BinaryOperator::Multiply
      | BinaryOperator::Concat
      | BinaryOperator::And
      | BinaryOperator::Or
  )
}

/// Does the left operand of the operator need parentheses?
///
/// Ties are always bracketed, so `(a + b) + c` keeps its brackets.
#[must_use]
pub fn left_needs_parens(operator: BinaryOperator, left: &Expression) -> bool {
  match left {
    Expression::Binary(Binary { operator: left, .. }) => rank(*left) <= rank(operator),
    Expression::Unary(_) => rank(operator) > UNARY_RANK,
    _ => false,
  }
}

/// Does the right operand of the operator need parentheses?
#[must_use]
pub fn right_needs_parens(operator: BinaryOperator, right: &Expression) -> bool {
  let Expression::Binary(Binary { operator: right, .. }) = right else {
    return false;
  };

  match rank(*right).cmp(&rank(operator)) {
    Ordering::Less => true,
    Ordering::Greater => false,
    Ordering::Equal => {
      let regroupable = *right == operator && is_associative(operator);
      Associativity::of(operator) == Associativity::Left && !regroupable
    }
  }
}

/// Does the operand of a unary operator need parentheses?
#[must_use]
pub fn unary_needs_parens(argument: &Expression) -> bool {
  matches!(argument, Expression::Binary(binary) if rank(binary.operator) < UNARY_RANK)
}
