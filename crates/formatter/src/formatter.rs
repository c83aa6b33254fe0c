use crate::{FormatError, config::Config};
use luafmt_syntax::ast::{Statement, expression::Field};

/// The longest an item can be and still be placed inline
pub const INLINE_WIDTH: usize = 60;

/// The most fields a table can have and still be placed inline
pub const INLINE_FIELDS: usize = 3;

/// An item which can be formatted
pub trait Formattable {
  /// Render the item as text, with any new lines indented to the given depth
  fn format(&self, f: &Formatter, depth: usize) -> Result<String, FormatError>;
}

/// Formatter holding the configuration, and the layout decisions shared between nodes
pub struct Formatter {
  pub(crate) config: Config,
  indentation: String,
}
impl Formatter {
  pub(crate) fn new(config: Config) -> Self {
    Self {
      indentation: config.indentation.to_string(),
      config,
    }
  }

  /// The indentation for the start of a line at the given depth
  pub(crate) fn indentation(&self, depth: usize) -> String {
    self.indentation.repeat(depth)
  }

  /// Format a comma separated list
  pub(crate) fn list<T: Formattable>(
    &self,
    items: &[T],
    depth: usize,
  ) -> Result<String, FormatError> {
    let items = items
      .iter()
      .map(|item| item.format(self, depth))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(items.join(", "))
  }

  /// Format a sequence of statements, one per line
  ///
  /// A statement starting with `(` after another statement is prefixed with `;`,
  /// otherwise it would be read as a call continuing the previous line.
  pub(crate) fn statements(
    &self,
    body: &[Statement],
    depth: usize,
  ) -> Result<String, FormatError> {
    let indentation = self.indentation(depth);
    let mut output = String::new();

    for (index, statement) in body.iter().enumerate() {
      let text = statement.format(self, depth)?;

      if index > 0 {
        if self.config.extra_newlines && blank_line_between(body, index - 1) {
          output.push('\n');
        }
        output.push('\n');
        output.push_str(&indentation);

        if text.starts_with('(') {
          output.push(';');
        }
      }

      output.push_str(&text);
    }

    Ok(output)
  }

  /// Format the body of a block, up to the closing keyword.
  ///
  /// Empty bodies become a single space before the closing keyword, or nothing when another
  /// clause follows so the line has no trailing whitespace. A short single statement can stay on the
  /// same line. Otherwise each statement gets its own line, indented one level deeper.
  /// If `trailing`, the closing keyword follows the body so spacing is added after it.
  pub(crate) fn block(
    &self,
    body: &[Statement],
    depth: usize,
    trailing: bool,
  ) -> Result<String, FormatError> {
    if body.is_empty() {
      return Ok(if trailing { " ".into() } else { String::new() });
    }

    let statements = self.statements(body, depth + 1)?;

    let single_statement = matches!(body, [statement] if !statement.is_comment());
    if self.config.inline.block && single_statement && fits_inline(&statements) {
      return Ok(if trailing {
        format!(" {statements} ")
      } else {
        format!(" {statements}")
      });
    }

    let mut block = format!("\n{}{statements}", self.indentation(depth + 1));
    if trailing {
      block.push('\n');
      block.push_str(&self.indentation(depth));
    }

    Ok(block)
  }

  /// Format a table constructor, from `{` to `}`
  pub(crate) fn table(&self, fields: &[Field], depth: usize) -> Result<String, FormatError> {
    if fields.is_empty() {
      return Ok("{}".into());
    }

    let rendered = fields
      .iter()
      .map(|field| field.format(self, depth + 1))
      .collect::<Result<Vec<_>, _>>()?;

    let inline = self.config.inline.table
      && fields.len() <= INLINE_FIELDS
      && !fields.iter().any(Field::is_comment)
      && rendered.iter().all(|field| fits_inline(field));
    if inline {
      return Ok(format!("{{ {} }}", rendered.join(", ")));
    }

    let indentation = self.indentation(depth + 1);
    let last_value = fields.iter().rposition(|field| !field.is_comment());

    let mut table = String::from("{");
    for (index, (field, text)) in fields.iter().zip(&rendered).enumerate() {
      table.push('\n');
      table.push_str(&indentation);
      table.push_str(text);

      if !field.is_comment() && last_value.is_some_and(|last| index < last) {
        table.push(',');
      }
    }
    table.push('\n');
    table.push_str(&self.indentation(depth));
    table.push('}');

    Ok(table)
  }
}

fn fits_inline(text: &str) -> bool {
  text.chars().count() <= INLINE_WIDTH && !text.contains('\n')
}

/// Does the statement, or the run of comments starting at it, lead into a function declaration?
fn leads_to_declaration(body: &[Statement], index: usize) -> bool {
  body[index..]
    .iter()
    .find(|statement| !statement.is_comment())
    .is_some_and(Statement::is_function_declaration)
}

/// Function declarations are separated from their neighbours by a blank line,
/// but comments directly above a declaration stay next to it
fn blank_line_between(body: &[Statement], index: usize) -> bool {
  body[index].is_function_declaration()
    || (leads_to_declaration(body, index + 1) && !leads_to_declaration(body, index))
}

#[cfg(test)]
mod test {
  use super::{blank_line_between, fits_inline};
  use crate::comments;
  use luafmt_syntax::parse;

  #[test]
  fn inline_width() {
    assert!(fits_inline(&"x".repeat(60)));
    assert!(!fits_inline(&"x".repeat(61)));
    assert!(fits_inline(&"é".repeat(60)));
    assert!(!fits_inline("a\nb"));
  }

  #[test]
  fn blank_lines_around_declarations() {
    let ast = parse("a()\nfunction f() end\nb()\n-- about g\n-- more\nfunction g() end").unwrap();
    let mut chunk = ast.chunk.clone();
    comments::attach(&mut chunk, &ast.comments);

    let body = &chunk.body;
    assert_eq!(body.len(), 6);
    assert!(blank_line_between(body, 0));
    assert!(blank_line_between(body, 1));
    assert!(blank_line_between(body, 2));
    assert!(!blank_line_between(body, 3));
    assert!(!blank_line_between(body, 4));

    let ast = parse("a()\nb()").unwrap();
    assert!(!blank_line_between(&ast.chunk.body, 0));
  }
}
