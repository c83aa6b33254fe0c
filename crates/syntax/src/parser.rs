use crate::{
  ast::{AST, Chunk, Comment, CommentKind, GetSpan, Name, expression::*, statement::*},
  number::parse_number,
  span::Span,
  tokeniser::{Token, TokenKind, Tokeniser},
};
use thiserror::Error;

/// The binding power of unary operators, tighter than all binary operators except `^`
const UNARY_PRIORITY: u8 = 8;

pub struct Parser<'source> {
  /// The source code being parsed
  source: &'source str,
  /// The tokens of the source, without comments
  tokens: Vec<Token>,
  /// The comments of the source, in order
  comments: Vec<Comment>,

  /// The current token
  position: usize,
  /// The token returned once all the tokens have been used
  end_of_file: Token,
}
impl<'source> Parser<'source> {
  pub fn new(source: &'source str) -> Self {
    let (comment_tokens, tokens): (Vec<_>, Vec<_>) =
      Tokeniser::from(source).partition(|token| token.kind == TokenKind::Comment);

    let comments = comment_tokens
      .into_iter()
      .map(|token| comment(source, token))
      .collect();

    Self {
      source,
      tokens,
      comments,
      position: 0,
      end_of_file: Token {
        kind: TokenKind::EndOfFile,
        start: u32::try_from(source.len()).unwrap(),
        length: 0,
      },
    }
  }

  pub fn parse(mut self) -> Result<AST<'source>, ParseError> {
    let body = self.block()?;

    if !self.is_finished() {
      return Err(self.expected(TokenKind::EndOfFile));
    }

    let chunk = Chunk {
      body,
      span: Span::new(0, self.end_of_file.start),
    };

    Ok(AST::new(self.source, chunk, self.comments))
  }

  fn is_finished(&self) -> bool {
    self.current_kind() == TokenKind::EndOfFile
  }

  fn current_token(&self) -> Token {
    self
      .tokens
      .get(self.position)
      .copied()
      .unwrap_or(self.end_of_file)
  }

  fn current_kind(&self) -> TokenKind {
    self.current_token().kind
  }

  fn peek_kind(&self) -> TokenKind {
    self
      .tokens
      .get(self.position + 1)
      .map_or(TokenKind::EndOfFile, |token| token.kind)
  }

  /// The position after the end of the last token which was used
  fn previous_end(&self) -> u32 {
    self
      .position
      .checked_sub(1)
      .and_then(|position| self.tokens.get(position))
      .map_or(0, Token::end)
  }

  fn advance(&mut self) -> Token {
    let token = self.current_token();
    self.position += 1;
    token
  }

  fn matches(&mut self, kind: TokenKind) -> bool {
    if self.current_kind() == kind {
      self.position += 1;
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
    if self.current_kind() == kind {
      Ok(self.advance())
    } else {
      Err(self.expected(kind))
    }
  }

  fn expected(&self, expected: TokenKind) -> ParseError {
    self.unexpected(|received| ParseError::Expected { expected, received })
  }

  /// An error for the current token
  ///
  /// If the current token is a malformed token, the error describes that instead.
  fn unexpected(&self, error: impl FnOnce(Token) -> ParseError) -> ParseError {
    let token = self.current_token();

    match token.kind {
      TokenKind::Unknown => ParseError::UnknownCharacter(token),
      TokenKind::UnterminatedString => ParseError::UnterminatedString(token),
      TokenKind::UnterminatedComment => ParseError::UnterminatedComment(token),
      _ => error(token),
    }
  }

  fn text(&self, token: Token) -> &'source str {
    Span::from(token).source_text(self.source)
  }

  fn span_from(&self, start: u32) -> Span {
    Span::new(start, self.previous_end())
  }

  fn name(&mut self) -> Result<Name, ParseError> {
    let token = self.expect(TokenKind::Identifier)?;

    Ok(Name {
      name: self.text(token).to_owned(),
      span: token.into(),
    })
  }
}

// Statements
impl Parser<'_> {
  /// Parse statements until the end of a block (`end`, `else`, `elseif`, `until`, or end of file)
  fn block(&mut self) -> Result<Vec<Statement>, ParseError> {
    let mut body = Vec::new();

    loop {
      match self.current_kind() {
        kind if is_block_end(kind) => return Ok(body),
        TokenKind::Semicolon => self.position += 1,
        TokenKind::Return => {
          body.push(self.return_()?);

          // return must be the last statement in a block
          return if is_block_end(self.current_kind()) {
            Ok(body)
          } else {
            Err(self.expected(TokenKind::End))
          };
        }
        _ => body.push(self.statement()?),
      }
    }
  }

  fn statement(&mut self) -> Result<Statement, ParseError> {
    match self.current_kind() {
      TokenKind::Break => Ok(Statement::Break(Break {
        span: self.advance().into(),
      })),
      TokenKind::ColonColon => self.label(),
      TokenKind::Do => self.do_(),
      TokenKind::For => self.for_(),
      TokenKind::Function => self.function_declaration(),
      TokenKind::Goto => self.goto(),
      TokenKind::If => self.if_(),
      TokenKind::Local => self.local(),
      TokenKind::Repeat => self.repeat(),
      TokenKind::While => self.while_(),
      TokenKind::Identifier | TokenKind::LeftParen => self.expression_statement(),
      _ => Err(self.unexpected(ParseError::ExpectedStatement)),
    }
  }

  fn expression_statement(&mut self) -> Result<Statement, ParseError> {
    let expression = self.suffixed_expression()?;

    match self.current_kind() {
      TokenKind::Equal | TokenKind::Comma => self.assignment(expression),
      _ if is_call(&expression) => {
        let span = expression.span();
        Ok(Statement::Call(CallStatement { expression, span }))
      }
      _ => Err(self.expected(TokenKind::Equal)),
    }
  }

  fn assignment(&mut self, first: Expression) -> Result<Statement, ParseError> {
    let start = first.span().start;
    let mut variables = vec![assignment_target(first)?];

    while self.matches(TokenKind::Comma) {
      let variable = self.suffixed_expression()?;
      variables.push(assignment_target(variable)?);
    }

    self.expect(TokenKind::Equal)?;
    let init = self.expression_list()?;

    Ok(Statement::Assignment(Assignment {
      variables,
      init,
      span: self.span_from(start),
    }))
  }

  fn do_(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let body = self.block()?;
    self.expect(TokenKind::End)?;

    Ok(Statement::Do(Do {
      body,
      span: self.span_from(start.start),
    }))
  }

  fn for_(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let first = self.name()?;

    if self.matches(TokenKind::Equal) {
      let from = self.expression()?;
      self.expect(TokenKind::Comma)?;
      let to = self.expression()?;
      let step = if self.matches(TokenKind::Comma) {
        Some(self.expression()?)
      } else {
        None
      };

      self.expect(TokenKind::Do)?;
      let body = self.block()?;
      self.expect(TokenKind::End)?;

      return Ok(Statement::ForNumeric(ForNumeric {
        variable: first,
        start: from,
        end: to,
        step,
        body,
        span: self.span_from(start.start),
      }));
    }

    let mut variables = vec![first];
    while self.matches(TokenKind::Comma) {
      variables.push(self.name()?);
    }

    self.expect(TokenKind::In)?;
    let iterators = self.expression_list()?;
    self.expect(TokenKind::Do)?;
    let body = self.block()?;
    self.expect(TokenKind::End)?;

    Ok(Statement::ForGeneric(ForGeneric {
      variables,
      iterators,
      body,
      span: self.span_from(start.start),
    }))
  }

  fn function_declaration(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();

    let first = self.name()?;
    let mut path = vec![first];
    while self.matches(TokenKind::Dot) {
      path.push(self.name()?);
    }
    let method = if self.matches(TokenKind::Colon) {
      Some(self.name()?)
    } else {
      None
    };
    let name = FunctionName {
      span: self.span_from(path[0].span.start),
      path,
      method,
    };

    let (parameters, body) = self.function_body()?;

    Ok(Statement::Function(Box::new(Function {
      name: Some(name),
      is_local: false,
      parameters,
      body,
      span: self.span_from(start.start),
    })))
  }

  /// The parameters and body of a function, from the opening bracket to `end`
  fn function_body(&mut self) -> Result<(Vec<Parameter>, Vec<Statement>), ParseError> {
    self.expect(TokenKind::LeftParen)?;

    let mut parameters = Vec::new();
    if self.current_kind() != TokenKind::RightParen {
      loop {
        if self.current_kind() == TokenKind::DotDotDot {
          parameters.push(Parameter::Vararg(self.advance().into()));
          break;
        }

        parameters.push(Parameter::Name(self.name()?));

        if !self.matches(TokenKind::Comma) {
          break;
        }
      }
    }
    self.expect(TokenKind::RightParen)?;

    let body = self.block()?;
    self.expect(TokenKind::End)?;

    Ok((parameters, body))
  }

  fn goto(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let label = self.name()?;

    Ok(Statement::Goto(Goto {
      label,
      span: self.span_from(start.start),
    }))
  }

  fn if_(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let mut clauses = Vec::new();

    let condition = self.expression()?;
    self.expect(TokenKind::Then)?;
    let header = self.span_from(start.start);
    clauses.push(Clause {
      kind: ClauseKind::If(condition),
      body: self.block()?,
      span: header,
    });

    while self.current_kind() == TokenKind::ElseIf {
      let keyword = self.advance();
      let condition = self.expression()?;
      self.expect(TokenKind::Then)?;
      let header = self.span_from(keyword.start);

      clauses.push(Clause {
        kind: ClauseKind::ElseIf(condition),
        body: self.block()?,
        span: header,
      });
    }

    if self.current_kind() == TokenKind::Else {
      let keyword = self.advance();

      clauses.push(Clause {
        kind: ClauseKind::Else,
        body: self.block()?,
        span: keyword.into(),
      });
    }

    self.expect(TokenKind::End)?;

    Ok(Statement::If(If {
      clauses,
      span: self.span_from(start.start),
    }))
  }

  fn label(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let label = self.name()?;
    self.expect(TokenKind::ColonColon)?;

    Ok(Statement::Label(Label {
      label,
      span: self.span_from(start.start),
    }))
  }

  fn local(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();

    if self.matches(TokenKind::Function) {
      let name = self.name()?;
      let (parameters, body) = self.function_body()?;

      return Ok(Statement::Function(Box::new(Function {
        name: Some(FunctionName {
          span: name.span,
          path: vec![name],
          method: None,
        }),
        is_local: true,
        parameters,
        body,
        span: self.span_from(start.start),
      })));
    }

    let mut variables = vec![self.name()?];
    while self.matches(TokenKind::Comma) {
      variables.push(self.name()?);
    }

    let init = if self.matches(TokenKind::Equal) {
      self.expression_list()?
    } else {
      Vec::new()
    };

    Ok(Statement::Local(Local {
      variables,
      init,
      span: self.span_from(start.start),
    }))
  }

  fn repeat(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let body = self.block()?;
    self.expect(TokenKind::Until)?;
    let condition = self.expression()?;

    Ok(Statement::Repeat(Repeat {
      body,
      condition,
      span: self.span_from(start.start),
    }))
  }

  fn return_(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();

    let arguments = match self.current_kind() {
      TokenKind::Semicolon => Vec::new(),
      kind if is_block_end(kind) => Vec::new(),
      _ => self.expression_list()?,
    };
    self.matches(TokenKind::Semicolon);

    Ok(Statement::Return(Return {
      arguments,
      span: self.span_from(start.start),
    }))
  }

  fn while_(&mut self) -> Result<Statement, ParseError> {
    let start = self.advance();
    let condition = self.expression()?;
    self.expect(TokenKind::Do)?;
    let body = self.block()?;
    self.expect(TokenKind::End)?;

    Ok(Statement::While(While {
      condition,
      body,
      span: self.span_from(start.start),
    }))
  }
}

// Expressions
impl Parser<'_> {
  fn expression(&mut self) -> Result<Expression, ParseError> {
    self.expression_with_priority(0)
  }

  fn expression_list(&mut self) -> Result<Vec<Expression>, ParseError> {
    let mut expressions = vec![self.expression()?];

    while self.matches(TokenKind::Comma) {
      expressions.push(self.expression()?);
    }

    Ok(expressions)
  }

  /// Parse an expression, only consuming binary operators which bind tighter than `limit`
  fn expression_with_priority(&mut self, limit: u8) -> Result<Expression, ParseError> {
    let mut left = match unary_operator(self.current_kind()) {
      Some(operator) => {
        let token = self.advance();
        let argument = self.expression_with_priority(UNARY_PRIORITY)?;

        Expression::Unary(Unary {
          operator,
          span: Span::new(token.start, argument.span().end),
          argument: Box::new(argument),
        })
      }
      None => self.simple_expression()?,
    };

    while let Some(operator) = binary_operator(self.current_kind()) {
      let (left_priority, right_priority) = binary_priority(operator);
      if left_priority <= limit {
        break;
      }

      self.position += 1;
      let right = self.expression_with_priority(right_priority)?;

      left = Expression::Binary(Binary {
        span: left.span().merge(right.span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
      });
    }

    Ok(left)
  }

  fn simple_expression(&mut self) -> Result<Expression, ParseError> {
    let token = self.current_token();

    let kind = match token.kind {
      TokenKind::Nil => LiteralKind::Nil,
      TokenKind::True => LiteralKind::Boolean(true),
      TokenKind::False => LiteralKind::Boolean(false),
      TokenKind::DotDotDot => LiteralKind::Vararg,
      TokenKind::Number => match parse_number(self.text(token)) {
        Some(value) => LiteralKind::Number(value),
        None => return Err(ParseError::InvalidNumber(token)),
      },
      TokenKind::String | TokenKind::LongString => {
        return Ok(Expression::Literal(self.string()?));
      }
      TokenKind::LeftCurly => return Ok(Expression::Table(self.table()?)),
      TokenKind::Function => return self.function_expression(),
      _ => return self.suffixed_expression(),
    };

    self.position += 1;
    Ok(Expression::Literal(Literal {
      kind,
      raw: self.text(token).to_owned(),
      span: token.into(),
    }))
  }

  fn primary_expression(&mut self) -> Result<Expression, ParseError> {
    match self.current_kind() {
      TokenKind::Identifier => Ok(Expression::Identifier(self.name()?)),
      TokenKind::LeftParen => {
        let opening = self.advance();
        let expression = self.expression()?;
        let closing = self.expect(TokenKind::RightParen)?;

        Ok(Expression::Group(Group {
          expression: Box::new(expression),
          span: Span::new(opening.start, closing.end()),
        }))
      }
      _ => Err(self.unexpected(ParseError::ExpectedExpression)),
    }
  }

  /// A primary expression followed by any number of field accesses, indexes, and calls
  fn suffixed_expression(&mut self) -> Result<Expression, ParseError> {
    let mut expression = self.primary_expression()?;

    loop {
      expression = match self.current_kind() {
        TokenKind::Dot => {
          self.position += 1;
          let identifier = self.name()?;
          member(expression, Indexer::Dot, identifier)
        }
        TokenKind::Colon => {
          self.position += 1;
          let identifier = self.name()?;
          self.call(member(expression, Indexer::Colon, identifier))?
        }
        TokenKind::LeftSquare => {
          self.position += 1;
          let index = self.expression()?;
          let closing = self.expect(TokenKind::RightSquare)?;

          Expression::Index(Index {
            span: Span::new(expression.span().start, closing.end()),
            base: Box::new(expression),
            index: Box::new(index),
          })
        }
        TokenKind::LeftParen | TokenKind::String | TokenKind::LongString | TokenKind::LeftCurly => {
          self.call(expression)?
        }
        _ => return Ok(expression),
      };
    }
  }

  /// The arguments of a call: in brackets, a single string, or a single table
  fn call(&mut self, base: Expression) -> Result<Expression, ParseError> {
    let start = base.span().start;
    let base = Box::new(base);

    match self.current_kind() {
      TokenKind::String | TokenKind::LongString => {
        let argument = self.string()?;
        Ok(Expression::StringCall(StringCall {
          span: Span::new(start, argument.span.end),
          base,
          argument,
        }))
      }
      TokenKind::LeftCurly => {
        let argument = self.table()?;
        Ok(Expression::TableCall(TableCall {
          span: Span::new(start, argument.span.end),
          base,
          argument,
        }))
      }
      TokenKind::LeftParen => {
        self.position += 1;
        let arguments = if self.current_kind() == TokenKind::RightParen {
          Vec::new()
        } else {
          self.expression_list()?
        };
        let closing = self.expect(TokenKind::RightParen)?;

        Ok(Expression::Call(Call {
          base,
          arguments,
          span: Span::new(start, closing.end()),
        }))
      }
      _ => Err(self.expected(TokenKind::LeftParen)),
    }
  }

  fn function_expression(&mut self) -> Result<Expression, ParseError> {
    let start = self.advance();
    let (parameters, body) = self.function_body()?;

    Ok(Expression::Function(Box::new(Function {
      name: None,
      is_local: false,
      parameters,
      body,
      span: self.span_from(start.start),
    })))
  }

  fn string(&mut self) -> Result<Literal, ParseError> {
    let token = self.advance();
    let raw = self.text(token);

    let value = if token.kind == TokenKind::LongString {
      long_string_value(raw)
    } else {
      string_value(raw, token.start)?
    };

    Ok(Literal {
      kind: LiteralKind::String(value),
      raw: raw.to_owned(),
      span: token.into(),
    })
  }

  fn table(&mut self) -> Result<Table, ParseError> {
    let opening = self.expect(TokenKind::LeftCurly)?;
    let mut fields = Vec::new();

    while self.current_kind() != TokenKind::RightCurly {
      fields.push(self.field()?);

      if !self.matches(TokenKind::Comma) && !self.matches(TokenKind::Semicolon) {
        break;
      }
    }
    let closing = self.expect(TokenKind::RightCurly)?;

    Ok(Table {
      fields,
      span: Span::new(opening.start, closing.end()),
    })
  }

  fn field(&mut self) -> Result<Field, ParseError> {
    match self.current_kind() {
      TokenKind::LeftSquare => {
        let opening = self.advance();
        let key = self.expression()?;
        self.expect(TokenKind::RightSquare)?;
        self.expect(TokenKind::Equal)?;
        let value = self.expression()?;

        Ok(Field::Keyed(KeyedField {
          key,
          value,
          span: self.span_from(opening.start),
        }))
      }
      TokenKind::Identifier if self.peek_kind() == TokenKind::Equal => {
        let name = self.name()?;
        self.position += 1;
        let value = self.expression()?;

        Ok(Field::Named(NamedField {
          span: self.span_from(name.span.start),
          name,
          value,
        }))
      }
      _ => Ok(Field::Positional(self.expression()?)),
    }
  }
}

fn is_block_end(kind: TokenKind) -> bool {
  matches!(
    kind,
    TokenKind::End
      | TokenKind::Else
      | TokenKind::ElseIf
      | TokenKind::Until
      | TokenKind::EndOfFile
  )
}

fn is_call(expression: &Expression) -> bool {
  matches!(
    expression,
    Expression::Call(_) | Expression::StringCall(_) | Expression::TableCall(_)
  )
}

fn assignment_target(expression: Expression) -> Result<Expression, ParseError> {
  match expression {
    Expression::Identifier(_)
    | Expression::Index(_)
    | Expression::Member(Member {
      indexer: Indexer::Dot,
      ..
    }) => Ok(expression),
    _ => Err(ParseError::InvalidAssignmentTarget(expression.span())),
  }
}

fn member(base: Expression, indexer: Indexer, identifier: Name) -> Expression {
  Expression::Member(Member {
    span: Span::new(base.span().start, identifier.span.end),
    base: Box::new(base),
    indexer,
    identifier,
  })
}

fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
  match kind {
    TokenKind::Not => Some(UnaryOperator::Not),
    TokenKind::Minus => Some(UnaryOperator::Negate),
    TokenKind::Hash => Some(UnaryOperator::Length),
    _ => None,
  }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
  let operator = match kind {
    TokenKind::Plus => BinaryOperator::Add,
    TokenKind::Minus => BinaryOperator::Subtract,
    TokenKind::Star => BinaryOperator::Multiply,
    TokenKind::Slash => BinaryOperator::Divide,
    TokenKind::Percent => BinaryOperator::Remainder,
    TokenKind::Caret => BinaryOperator::Power,
    TokenKind::DotDot => BinaryOperator::Concat,
    TokenKind::EqualEqual => BinaryOperator::Equal,
    TokenKind::TildeEqual => BinaryOperator::NotEqual,
    TokenKind::Less => BinaryOperator::Less,
    TokenKind::LessEqual => BinaryOperator::LessEqual,
    TokenKind::Greater => BinaryOperator::Greater,
    TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
    TokenKind::And => BinaryOperator::And,
    TokenKind::Or => BinaryOperator::Or,
    _ => return None,
  };

  Some(operator)
}

/// The left and right binding powers of a binary operator
///
/// Right associative operators (`^`, `..`) bind less tightly on the right.
fn binary_priority(operator: BinaryOperator) -> (u8, u8) {
  match operator {
    BinaryOperator::Or => (1, 1),
    BinaryOperator::And => (2, 2),
    BinaryOperator::Equal
    | BinaryOperator::NotEqual
    | BinaryOperator::Less
    | BinaryOperator::LessEqual
    | BinaryOperator::Greater
    | BinaryOperator::GreaterEqual => (3, 3),
    BinaryOperator::Concat => (5, 4),
    BinaryOperator::Add | BinaryOperator::Subtract => (6, 6),
    BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => (7, 7),
    BinaryOperator::Power => (10, 9),
  }
}

/// Build a comment from its token, splitting off the delimiters
fn comment(source: &str, token: Token) -> Comment {
  let raw = Span::from(token).source_text(source);
  let content = &raw[2..];

  let (text, kind) = match long_bracket_level(content) {
    Some(level) => (
      &content[level + 2..content.len() - level - 2],
      CommentKind::Block,
    ),
    None => (content, CommentKind::Line),
  };

  Comment {
    text: text.to_owned(),
    raw: raw.to_owned(),
    kind,
    span: token.into(),
  }
}

/// If the text starts with a long bracket, how many `=` are in it
fn long_bracket_level(text: &str) -> Option<usize> {
  let rest = text.strip_prefix('[')?;
  let level = rest.bytes().take_while(|c| *c == b'=').count();

  rest[level..].starts_with('[').then_some(level)
}

/// The value of a long string, `[[text]]`. A newline directly after the opening bracket is skipped.
///
/// Each line break (`\r\n`, `\n\r`, `\r` or `\n`) in the content is read as a single `\n`.
fn long_string_value(raw: &str) -> Vec<u8> {
  let level = long_bracket_level(raw).unwrap_or(0);
  let content = &raw[level + 2..raw.len() - level - 2];

  let content = ["\r\n", "\n\r", "\n", "\r"]
    .iter()
    .find_map(|newline| content.strip_prefix(newline))
    .unwrap_or(content);

  let mut value = Vec::with_capacity(content.len());
  let mut bytes = content.bytes().peekable();
  while let Some(byte) = bytes.next() {
    match byte {
      b'\r' | b'\n' => {
        value.push(b'\n');
        bytes.next_if(|&next| matches!(next, b'\r' | b'\n') && next != byte);
      }
      _ => value.push(byte),
    }
  }

  value
}

/// The value of a quoted string, with escape sequences decoded
fn string_value(raw: &str, start: u32) -> Result<Vec<u8>, ParseError> {
  let content = &raw.as_bytes()[1..raw.len() - 1];
  let mut value = Vec::with_capacity(content.len());
  let mut position = 0;

  let invalid_escape = |from: usize, to: usize| {
    let offset = |position: usize| start + 1 + u32::try_from(position).unwrap();
    ParseError::InvalidEscape(Span::new(offset(from), offset(to.min(content.len()))))
  };

  while let Some(&byte) = content.get(position) {
    position += 1;

    if byte != b'\\' {
      value.push(byte);
      continue;
    }

    let escape_start = position - 1;
    let Some(&escape) = content.get(position) else {
      return Err(invalid_escape(escape_start, position));
    };
    position += 1;

    match escape {
      b'a' => value.push(0x07),
      b'b' => value.push(0x08),
      b'f' => value.push(0x0C),
      b'n' => value.push(b'\n'),
      b'r' => value.push(b'\r'),
      b't' => value.push(b'\t'),
      b'v' => value.push(0x0B),
      b'\\' | b'"' | b'\'' => value.push(escape),
      b'\n' | b'\r' => {
        value.push(b'\n');

        // `\r\n` and `\n\r` are a single newline
        if let Some(&next) = content.get(position)
          && matches!(next, b'\n' | b'\r')
          && next != escape
        {
          position += 1;
        }
      }
      b'x' => {
        let byte = content
          .get(position..position + 2)
          .filter(|digits| digits.iter().all(u8::is_ascii_hexdigit))
          .and_then(|digits| u8::from_str_radix(std::str::from_utf8(digits).ok()?, 16).ok());

        match byte {
          Some(byte) => value.push(byte),
          None => return Err(invalid_escape(escape_start, position + 2)),
        }
        position += 2;
      }
      b'z' => {
        while content
          .get(position)
          .is_some_and(|c| c.is_ascii_whitespace() || *c == 0x0B)
        {
          position += 1;
        }
      }
      b'0'..=b'9' => {
        let digits = content[position - 1..]
          .iter()
          .take(3)
          .take_while(|c| c.is_ascii_digit())
          .count();
        let code = content[position - 1..position - 1 + digits]
          .iter()
          .fold(0, |code: u32, digit| code * 10 + u32::from(digit - b'0'));

        match u8::try_from(code) {
          Ok(byte) => value.push(byte),
          Err(_) => return Err(invalid_escape(escape_start, position - 1 + digits)),
        }
        position += digits - 1;
      }
      _ => return Err(invalid_escape(escape_start, position)),
    }
  }

  Ok(value)
}

/// An error which arose during parsing
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
  /// Expected a token of a certain kind
  #[error("expected {expected} but got {}", .received.kind)]
  Expected {
    /// Expected Token Kind to be
    expected: TokenKind,
    /// Received this Token instead
    received: Token,
  },
  /// Expected Expression
  #[error("expected expression but got {}", .0.kind)]
  ExpectedExpression(Token),
  /// Expected Statement
  #[error("expected statement but got {}", .0.kind)]
  ExpectedStatement(Token),
  /// Unknown Character
  #[error("got unknown character")]
  UnknownCharacter(Token),
  /// Unterminated String Literal
  #[error("missing closing quote or bracket for string")]
  UnterminatedString(Token),
  /// Unterminated Block Comment
  #[error("missing closing bracket for comment")]
  UnterminatedComment(Token),
  /// Malformed Number
  #[error("number literal is malformed")]
  InvalidNumber(Token),
  /// Invalid Escape Sequence in String
  #[error("invalid escape sequence in string")]
  InvalidEscape(Span),
  /// Invalid Assignment Target
  #[error("can only assign to variables, fields, and indexes")]
  InvalidAssignmentTarget(Span),
}
impl ParseError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> String {
    match self {
      Self::Expected { expected, .. } => format!("Expected {expected}"),
      Self::ExpectedExpression(_) => "Expected Expression".into(),
      Self::ExpectedStatement(_) => "Expected Statement".into(),
      Self::UnknownCharacter(_) => "Unknown Character".into(),
      Self::UnterminatedString(_) => "Unterminated String".into(),
      Self::UnterminatedComment(_) => "Unterminated Comment".into(),
      Self::InvalidNumber(_) => "Invalid Number".into(),
      Self::InvalidEscape(_) => "Invalid Escape Sequence".into(),
      Self::InvalidAssignmentTarget(_) => "Invalid Assignment Target".into(),
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    self.to_string()
  }

  /// The location of the error
  pub fn span(&self) -> Span {
    match self {
      Self::Expected { received, .. } => received.into(),
      Self::ExpectedExpression(token)
      | Self::ExpectedStatement(token)
      | Self::UnknownCharacter(token)
      | Self::UnterminatedString(token)
      | Self::UnterminatedComment(token)
      | Self::InvalidNumber(token) => token.into(),
      Self::InvalidEscape(span) | Self::InvalidAssignmentTarget(span) => *span,
    }
  }
}
