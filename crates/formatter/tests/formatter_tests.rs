//! # Formatter Tests
//!
//! Check that the output of the formatter matches the expected output.

use indoc::indoc;
use luafmt_formatter::config::{Config, Inline, LineEnding};
use luafmt_formatter::{FormatError, format_ast};
use luafmt_syntax::{
  ast::{Expression, Statement, expression::LiteralKind},
  parse,
};
use pretty_assertions::assert_eq;

fn format(source: &str, config: Config) -> String {
  let config = Config {
    line_ending: LineEnding::LineFeed,
    ..config
  };

  luafmt_formatter::format(source, config).unwrap()
}

macro_rules! assert_format {
  ($source:expr, $expected:expr) => {
    assert_format!($source, $expected, Config::default())
  };
  ($source:expr, $expected:expr, $config:expr) => {
    let output = format($source, $config);
    assert_eq!(output, $expected);
    assert_eq!(format(&output, $config), output);
  };
}

/// Regrouping a bracketed right operand into a left nested chain brackets the inner chain
/// again on the next pass, so the output isn't checked to be stable
macro_rules! assert_format_once {
  ($source:expr, $expected:expr) => {
    assert_eq!(format($source, Config::default()), $expected);
  };
}

#[test]
fn literals() {
  assert_format!("_=true,false,nil,...", "_ = true, false, nil, ...");
  assert_format!("_=1,1000,1000000,0xff", "_ = 1, 1e3, 1e6, 0xFF");
  assert_format!("_=[['_]], [[\"_\"]]", "_ = \"'_\", '\"_\"'");
}

#[test]
fn call_arguments() {
  assert_format!("f('_')", "f\"_\"");
  assert_format!("f(\"_\")", "f\"_\"");
  assert_format!("f[[_]]", "f\"_\"");
  assert_format!("f({_})", "f{ _ }");
  assert_format!("f({_})._ = _", "f{ _ }._ = _");
  assert_format!("_{_=_}", "_{ _ = _ }");
}

#[test]
fn comments() {
  assert_format!(
    "if _ then --comment \n do _=_--another comment\n end end",
    "if _ then\n\t-- comment\n\tdo\n\t\t_ = _\n\t\t-- another comment\n\tend\nend"
  );
  assert_format!("_=--[[comment]]_", "-- comment\n_ = _");
  assert_format!("--[[multi\nline]]", "--[[\n\tmulti\n\tline\n]]");
}

#[test]
fn nested_comments() {
  assert_format!(
    "function _() function _() if _ then --[[comment]] end end end",
    "function _()\n\tfunction _()\n\t\tif _ then\n\t\t\t-- comment\n\t\tend\n\tend\nend"
  );
  assert_format!(
    "do do do --[[comment]] end end end",
    "do\n\tdo\n\t\tdo\n\t\t\t-- comment\n\t\tend\n\tend\nend"
  );
}

#[test]
fn long_string_line_breaks() {
  assert_format!("x = [[a\r\nb]]\r\n", "x = \"a\\nb\"");
  assert_format!("x = [[\r\na\rb\n\rc]]", "x = \"a\\nb\\nc\"");
}

#[test]
fn statements_starting_with_brackets() {
  assert_format!("local a = f;(\"x\"):len()", "local a = f\n;(\"x\"):len()");
  assert_format!("f();(g or h)()", "f()\n;(g or h)()");
  assert_format!("(f or g)()", "(f or g)()");
  assert_format!("do (f or g)() end", "do (f or g)() end");

  let output = format("a = b;(c or d).e = 1", Config::default());
  assert_eq!(output, "a = b\n;(c or d).e = 1");
  assert_eq!(parse(&output).unwrap().chunk.body.len(), 2);
}

#[test]
fn block_comment_with_carriage_return() {
  assert_format!("--[[a\rb]] x = 1", "--[[\n\ta\n\tb\n]]\nx = 1");
  assert_format!("--[[a\r\nb]]", "--[[\n\ta\n\tb\n]]");
}

#[test]
fn precedence() {
  assert_format!("a = 1*1 + 1", "a = 1 * 1 + 1");
  assert_format!("a = 1 + 1 * 1", "a = 1 + 1 * 1");
  assert_format!("_ = (1+1)*(1+1)", "_ = (1 + 1) * (1 + 1)");
  assert_format!("_ = not (1 and 1)", "_ = not(1 and 1)");
  assert_format!(
    "_ = _ or not ((_ and _) or (_ and _))",
    "_ = _ or not(_ and _ or _ and _)"
  );
  assert_format!("_=- -_", "_ = - -_");
}

#[test]
fn left_nested_chains() {
  assert_format!("a = b - c - d", "a = (b - c) - d");
  assert_format!("a = (b .. c) .. d", "a = (b .. c) .. d");
  assert_format!("a = b * c / d", "a = (b * c) / d");
}

#[test]
fn regrouped_right_operand() {
  assert_format_once!("a = 1 + (1 + 1) + 1", "a = (1 + 1 + 1) + 1");
  assert_format!("a = (1 + 1 + 1) + 1", "a = ((1 + 1) + 1) + 1");
}

#[test]
fn bracketed_bases() {
  assert_format!("_=('string')._", "_ = (\"string\")._");
  assert_format!("_=({})._", "_ = ({})._");
}

#[test]
fn blocks() {
  assert_format!("if _ then _()end", "if _ then _() end");
  assert_format!(
    "if a then a() elseif b then b() else c() end",
    "if a then a()\nelseif b then b()\nelse c() end"
  );
  assert_format!("local _", "local _");
  assert_format!("repeat _() until _", "repeat _() until _");
  assert_format!("repeat _();_() until _", "repeat\n\t_()\n\t_()\nuntil _");
}

#[test]
fn function_declarations() {
  assert_format!("_=_\nfunction _()end", "_ = _\n\nfunction _() end");
  assert_format!(
    "function _()end;function _()end",
    "function _() end\n\nfunction _() end"
  );
  assert_format!("_ = function() end", "_ = function() end");
  assert_format!(
    "_()--comment\nfunction _()end",
    "_()\n\n-- comment\nfunction _() end"
  );
}

#[test]
fn table_with_comment() {
  assert_format!(
    "_{_=function()end,--comment\n_=function()end}",
    "_{\n\t_ = function() end,\n\t-- comment\n\t_ = function() end\n}"
  );
}

#[test]
fn inline_block_disabled() {
  let config = Config {
    inline: Inline {
      block: false,
      table: true,
    },
    ..Config::default()
  };
  assert_format!("if _ then _()end", "if _ then\n\t_()\nend", config);
}

#[test]
fn whole_program() {
  let source = indoc! {"
    -- Fibonacci numbers
    local function fib(n)
    if n<2 then return n end
    return fib(n-1)+fib(n-2)
    end
    local results={}
    for i=1,10 do results[#results+1]=fib(i) end
    print(table.concat(results,', '))
  "};
  let config = Config {
    indentation: 2.into(),
    ..Config::default()
  };

  assert_format!(
    source,
    indoc! {r#"
      -- Fibonacci numbers
      local function fib(n)
        if n < 2 then return n end
        return fib(n - 1) + fib(n - 2)
      end

      local results = {}
      for i = 1, 10 do results[#results + 1] = fib(i) end
      print(table.concat(results, ", "))"#
    },
    config
  );
}

#[test]
fn every_comment_is_kept() {
  let source = indoc! {"
    -- first
    local x = { --[[a]] 1, -- b
      2 }
    while x do -- c
      x = nil --[[d]]
    end -- e
    return f(--[[f]] x)
  "};
  let output = format(source, Config::default());

  for comment in ["a", "b", "c", "d", "e", "f", "first"] {
    assert_eq!(
      output.matches(&format!("-- {comment}\n")).count()
        + usize::from(output.ends_with(&format!("-- {comment}"))),
      1,
      "{comment}\n{output}"
    );
  }
}

#[test]
fn malformed_input() {
  let result = luafmt_formatter::format("x = ", Config::default());
  assert!(matches!(result, Err(FormatError::MalformedInput(_))));

  let result = luafmt_formatter::format("if x then", Config::default());
  assert!(matches!(result, Err(FormatError::MalformedInput(_))));
}

#[test]
fn unsupported_call_statement() {
  let mut ast = parse("f()").unwrap();
  let Statement::Call(call) = &mut ast.chunk.body[0] else {
    panic!("expected call statement");
  };
  call.expression = Expression::Identifier(luafmt_syntax::ast::Name {
    name: "f".into(),
    span: call.span,
  });

  assert_eq!(
    format_ast(&ast, Config::default()),
    Err(FormatError::UnsupportedNode { kind: "Identifier" })
  );
}

#[test]
fn number_round_trip() {
  let mut ast = parse("x = 0x10").unwrap();
  let Statement::Assignment(assignment) = &mut ast.chunk.body[0] else {
    panic!("expected assignment");
  };
  let Expression::Literal(literal) = &mut assignment.init[0] else {
    panic!("expected literal");
  };
  literal.kind = LiteralKind::Number(1.0);

  assert_eq!(
    format_ast(&ast, Config::default()),
    Err(FormatError::LiteralRoundTrip {
      raw: "0x10".into(),
      normalized: "0x10".into()
    })
  );
}

#[test]
fn source_ast_is_unchanged() {
  let ast = parse("if a then -- comment\nb() end").unwrap();
  let before = ast.chunk.clone();
  format_ast(&ast, Config::default()).unwrap();

  assert_eq!(ast.chunk, before);
  assert_eq!(ast.comments.len(), 1);
}
