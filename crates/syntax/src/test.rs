use crate::{
  ParseError, Span, TokenKind,
  ast::{AST, CommentKind, Expression, Statement, expression::LiteralKind, statement::ClauseKind},
};
use indoc::indoc;

fn parse(source: &str) -> Result<AST<'_>, ParseError> {
  crate::parse(source)
}

fn parse_to_string(source: &str) -> String {
  crate::parse(source).unwrap().to_string()
}

/// The first value assigned in the source
fn first_value(source: &str) -> Expression {
  let ast = crate::parse(source).unwrap();

  match ast.chunk.body.into_iter().next() {
    Some(Statement::Assignment(assignment)) => assignment.init.into_iter().next().unwrap(),
    Some(Statement::Local(local)) => local.init.into_iter().next().unwrap(),
    _ => panic!("expected an assignment"),
  }
}

fn string_value(source: &str) -> Vec<u8> {
  match first_value(source) {
    Expression::Literal(literal) => match literal.kind {
      LiteralKind::String(value) => value,
      kind => panic!("expected a string, got {kind:?}"),
    },
    expression => panic!("expected a literal, got {}", expression.kind_name()),
  }
}

#[test]
fn empty_source() {
  assert!(parse("").is_ok());
  assert!(parse("    ").is_ok());
  assert!(parse("\n\n\n").is_ok());
  assert!(parse(";;").is_ok());
  assert!(parse("-- only a comment").is_ok());
}

#[test]
fn statements() {
  assert!(parse("local x").is_ok());
  assert!(parse("local a, b = 1, 2").is_ok());
  assert!(parse("a, b = b, a").is_ok());
  assert!(parse("a.b.c = 1; t[1] = 2").is_ok());
  assert!(parse("do end").is_ok());
  assert!(parse("while true do break end").is_ok());
  assert!(parse("repeat local x = 1 until x").is_ok());
  assert!(parse("for i = 1, 10 do end").is_ok());
  assert!(parse("for i = 10, 1, -1 do print(i) end").is_ok());
  assert!(parse("for k, v in pairs(t) do end").is_ok());
  assert!(parse("if a then elseif b then else end").is_ok());
  assert!(parse("function a.b.c:d(x, ...) return self end").is_ok());
  assert!(parse("local function f(...) return ... end").is_ok());
  assert!(parse("goto continue ::continue::").is_ok());
  assert!(parse("return").is_ok());
  assert!(parse("return;").is_ok());
  assert!(parse("return 1, 2").is_ok());
}

#[test]
fn calls() {
  assert!(parse("f()").is_ok());
  assert!(parse("f(1, 2)").is_ok());
  assert!(parse("f 'string'").is_ok());
  assert!(parse("f [[long string]]").is_ok());
  assert!(parse("f { 1, 2; 3, }").is_ok());
  assert!(parse("obj:method()").is_ok());
  assert!(parse("obj:method 'x'").is_ok());
  assert!(parse("a.b['c']:d()()").is_ok());
  assert!(parse("(f or g)()").is_ok());
}

#[test]
fn expression_statement_must_be_call_or_assignment() {
  let error = parse("x").unwrap_err();
  assert!(matches!(
    error,
    ParseError::Expected {
      expected: TokenKind::Equal,
      ..
    }
  ));
  assert_eq!(error.title(), "Expected =");
  assert_eq!(error.message(), "expected = but got End of File");

  assert!(matches!(parse("1 = 2"), Err(ParseError::ExpectedStatement(_))));
  assert!(matches!(parse("(a) = 1"), Err(ParseError::InvalidAssignmentTarget(_))));
  assert!(matches!(parse("f() = 1"), Err(ParseError::InvalidAssignmentTarget(_))));
  assert!(matches!(parse("a:b = 1"), Err(ParseError::Expected { .. })));
}

#[test]
fn return_must_be_last() {
  assert!(matches!(
    parse("return 1 x = 2"),
    Err(ParseError::Expected {
      expected: TokenKind::End,
      ..
    })
  ));
  assert!(parse("do return end x = 2").is_ok());
}

#[test]
fn unexpected_block_end() {
  assert!(matches!(
    parse("x = 1 end"),
    Err(ParseError::Expected {
      expected: TokenKind::EndOfFile,
      ..
    })
  ));
  assert!(parse("if a then").is_err());
  assert!(parse("function f()").is_err());
}

#[test]
fn malformed_tokens() {
  assert!(matches!(parse("x = $"), Err(ParseError::UnknownCharacter(_))));
  assert!(matches!(parse("x = 'a"), Err(ParseError::UnterminatedString(_))));
  assert!(matches!(parse("x = [[a"), Err(ParseError::UnterminatedString(_))));
  assert!(matches!(parse("--[[ a"), Err(ParseError::UnterminatedComment(_))));
  assert!(matches!(parse("x = 3abc"), Err(ParseError::InvalidNumber(_))));
  assert!(matches!(parse("x = 0x"), Err(ParseError::InvalidNumber(_))));
  assert!(matches!(parse("x ="), Err(ParseError::ExpectedExpression(_))));

  // Unknown characters are fine in strings and comments
  assert!(parse("x = '¬'").is_ok());
  assert!(parse("x = '🤗' -- 🤗").is_ok());
}

#[test]
fn string_escapes() {
  assert_eq!(string_value(r"x = 'a\tb'"), b"a\tb");
  assert_eq!(string_value(r#"x = "\"\'\\""#), b"\"'\\");
  assert_eq!(string_value(r"x = '\a\b\f\n\r\v'"), b"\x07\x08\x0C\n\r\x0B");
  assert_eq!(string_value(r"x = '\65\066\0'"), b"AB\0");
  assert_eq!(string_value(r"x = '\1234'"), b"{4");
  assert_eq!(string_value(r"x = '\x41\x6a'"), b"Aj");
  assert_eq!(string_value("x = 'a\\z   \t b'"), b"ab");
  assert_eq!(string_value("x = 'a\\\nb'"), b"a\nb");
  assert_eq!(string_value("x = 'a\\\r\nb'"), b"a\nb");

  assert!(matches!(parse(r"x = '\q'"), Err(ParseError::InvalidEscape(_))));
  assert!(matches!(parse(r"x = '\300'"), Err(ParseError::InvalidEscape(_))));
  assert!(matches!(parse(r"x = '\xG1'"), Err(ParseError::InvalidEscape(_))));
  assert_eq!(
    parse(r"x = 'ab\q'").unwrap_err().span(),
    Span::new(7, 9)
  );
}

#[test]
fn long_strings() {
  assert_eq!(string_value("x = [[hello]]"), b"hello");
  assert_eq!(string_value("x = [[\nhello]]"), b"hello");
  assert_eq!(string_value("x = [==[\n\nhello]]]==]"), b"\nhello]]");
  assert_eq!(string_value(r"x = [[\n]]"), br"\n");
}

#[test]
fn long_string_line_breaks() {
  assert_eq!(string_value("x = [[a\r\nb]]"), b"a\nb");
  assert_eq!(string_value("x = [[a\n\rb]]"), b"a\nb");
  assert_eq!(string_value("x = [[a\rb\nc]]"), b"a\nb\nc");
  assert_eq!(string_value("x = [[\r\na\r\n\r\nb]]"), b"a\n\nb");
  assert_eq!(string_value("x = [[a\n\nb]]"), b"a\n\nb");
}

#[test]
fn numbers() {
  let Expression::Literal(literal) = first_value("x = 0x10") else {
    panic!("expected a literal");
  };

  assert_eq!(literal.kind, LiteralKind::Number(16.0));
  assert_eq!(literal.raw, "0x10");
  assert_eq!(literal.span, Span::new(4, 8));
}

#[test]
fn comments_are_separate() {
  let ast = parse("-- hello\nx = 1 --[==[ block ]==]").unwrap();

  assert_eq!(ast.chunk.body.len(), 1);
  assert_eq!(ast.comments.len(), 2);

  assert_eq!(ast.comments[0].text, " hello");
  assert_eq!(ast.comments[0].kind, CommentKind::Line);
  assert_eq!(ast.comments[0].span, Span::new(0, 8));

  assert_eq!(ast.comments[1].text, " block ");
  assert_eq!(ast.comments[1].raw, "--[==[ block ]==]");
  assert!(ast.comments[1].is_block());
  assert_eq!(ast.comments[1].span, Span::new(15, 32));
}

#[test]
fn if_clause_spans_cover_header() {
  let ast = parse("if a then b() elseif c then else end").unwrap();
  let Statement::If(if_) = &ast.chunk.body[0] else {
    panic!("expected an if statement");
  };

  assert_eq!(if_.span, Span::new(0, 36));
  let spans: Vec<_> = if_.clauses.iter().map(|clause| clause.span).collect();
  assert_eq!(
    spans,
    [Span::new(0, 9), Span::new(14, 27), Span::new(28, 32)]
  );

  assert!(matches!(if_.clauses[0].kind, ClauseKind::If(_)));
  assert!(matches!(if_.clauses[1].kind, ClauseKind::ElseIf(_)));
  assert!(matches!(if_.clauses[2].kind, ClauseKind::Else));
  assert_eq!(if_.clauses[0].body.len(), 1);
}

#[test]
fn chunk_span_is_whole_source() {
  let ast = parse("  x = 1  \n").unwrap();
  assert_eq!(ast.chunk.span, Span::new(0, 10));
  assert_eq!(ast.chunk.body[0].kind_name(), "Assignment");
}

#[test]
fn local_declaration() {
  let ast = parse_to_string("local x = 5 + 3");
  let expected = indoc! {"
    ├─ Local
    │  ├─ Variables
    │  │  ╰─ Name (x)
    │  ╰─ Values
    │     ╰─ Binary (+)
    │        ├─ Number (5)
    │        ╰─ Number (3)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn call_with_member_and_index() {
  let ast = parse_to_string("print(a.b, t[1])");
  let expected = indoc! {"
    ├─ Call Statement
    │  ╰─ Call
    │     ├─ Callee
    │     │  ╰─ Variable (print)
    │     ╰─ Arguments
    │        ├─ Member (.b)
    │        │  ╰─ Variable (a)
    │        ╰─ Index
    │           ├─ Variable (t)
    │           ╰─ Number (1)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn binary_associativity() {
  let ast = parse_to_string("x = 1 - 2 - 3");
  let expected = indoc! {"
    ├─ Assignment
    │  ├─ Variables
    │  │  ╰─ Variable (x)
    │  ╰─ Values
    │     ╰─ Binary (-)
    │        ├─ Binary (-)
    │        │  ├─ Number (1)
    │        │  ╰─ Number (2)
    │        ╰─ Number (3)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("x = a .. b .. c");
  let expected = indoc! {"
    ├─ Assignment
    │  ├─ Variables
    │  │  ╰─ Variable (x)
    │  ╰─ Values
    │     ╰─ Binary (..)
    │        ├─ Variable (a)
    │        ╰─ Binary (..)
    │           ├─ Variable (b)
    │           ╰─ Variable (c)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn binary_precedence() {
  let ast = parse_to_string("x = a or b and c == 1 + 2 * -d ^ 2");
  let expected = indoc! {"
    ├─ Assignment
    │  ├─ Variables
    │  │  ╰─ Variable (x)
    │  ╰─ Values
    │     ╰─ Binary (or)
    │        ├─ Variable (a)
    │        ╰─ Binary (and)
    │           ├─ Variable (b)
    │           ╰─ Binary (==)
    │              ├─ Variable (c)
    │              ╰─ Binary (+)
    │                 ├─ Number (1)
    │                 ╰─ Binary (*)
    │                    ├─ Number (2)
    │                    ╰─ Unary (-)
    │                       ╰─ Binary (^)
    │                          ├─ Variable (d)
    │                          ╰─ Number (2)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn groups_are_kept() {
  let ast = parse_to_string("x = (1 + 2) * 3");
  let expected = indoc! {"
    ├─ Assignment
    │  ├─ Variables
    │  │  ╰─ Variable (x)
    │  ╰─ Values
    │     ╰─ Binary (*)
    │        ├─ Group
    │        │  ╰─ Binary (+)
    │        │     ├─ Number (1)
    │        │     ╰─ Number (2)
    │        ╰─ Number (3)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn function_declarations() {
  let ast = parse_to_string("function a.b:c(x, ...) return x end");
  let expected = indoc! {"
    ├─ Function (a.b:c)
    │  ├─ Parameters
    │  │  ├─ Name (x)
    │  │  ╰─ Vararg
    │  ╰─ Body
    │     ╰─ Return
    │        ╰─ Variable (x)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("local function f() end");
  let expected = indoc! {"
    ├─ Local Function (f)
    │  ╰─ Body
  "};
  assert_eq!(ast, expected);
}

#[test]
fn table_constructor() {
  let ast = parse_to_string("f { 1, x = 2, [3] = 4 }");
  let expected = indoc! {"
    ├─ Call Statement
    │  ╰─ Table Call
    │     ├─ Variable (f)
    │     ╰─ Table
    │        ├─ Number (1)
    │        ├─ Named Field (x)
    │        │  ╰─ Number (2)
    │        ╰─ Keyed Field
    │           ├─ Number (3)
    │           ╰─ Number (4)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn if_statement() {
  let ast = parse_to_string("if a then b() else end");
  let expected = indoc! {"
    ├─ If
    │  ├─ If Clause
    │  │  ├─ Condition
    │  │  │  ╰─ Variable (a)
    │  │  ╰─ Body
    │  │     ╰─ Call Statement
    │  │        ╰─ Call
    │  │           ├─ Callee
    │  │           │  ╰─ Variable (b)
    │  │           ╰─ Arguments
    │  ╰─ Else Clause
    │     ╰─ Body
  "};
  assert_eq!(ast, expected);
}

#[test]
fn comments_listed_after_tree() {
  let ast = parse_to_string("x = 1 -- one");
  let expected = indoc! {"
    ├─ Assignment
    │  ├─ Variables
    │  │  ╰─ Variable (x)
    │  ╰─ Values
    │     ╰─ Number (1)
    ├─ Comment (-- one)
  "};
  assert_eq!(ast, expected);
}
