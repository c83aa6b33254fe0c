use luafmt_formatter::FormatError;
use luafmt_syntax::{LineIndex, ParseError, Span, TokenKind, tokenise};
use owo_colors::{OwoColorize, Style};
use std::fmt;

/// An error to show to the user
pub struct Message {
  pub title: String,
  pub body: String,
  pub hint: Option<String>,
}
impl Message {
  pub fn error(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      hint: None,
    }
  }
}
impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", "✕ Error".bold().red())?;
    writeln!(f, "{} {}", ":".bold(), &self.title.bold())?;

    if !self.body.is_empty() {
      writeln!(f, "{}", &self.body)?;
    }

    if let Some(hint) = &self.hint {
      writeln!(f, "{} {}", "hint:".italic().cyan(), hint)?;
    }

    Ok(())
  }
}
impl From<&ParseError> for Message {
  fn from(error: &ParseError) -> Self {
    Self {
      title: error.title(),
      body: error.message(),
      hint: None,
    }
  }
}
impl From<&FormatError> for Message {
  fn from(error: &FormatError) -> Self {
    match error {
      FormatError::MalformedInput(error) => Self::from(error),
      FormatError::UnsupportedNode { .. } => Self {
        title: "Unsupported Node".into(),
        body: error.to_string(),
        hint: None,
      },
      FormatError::LiteralRoundTrip { .. } => Self {
        title: "Number Changed Value".into(),
        body: error.to_string(),
        hint: Some("the file has been left unchanged".into()),
      },
    }
  }
}

pub struct CodeFrame<'a> {
  title: &'a str,
  source: &'a str,
  span: Span,

  lines: LineIndex,
}
impl<'a> CodeFrame<'a> {
  pub fn new(title: &'a str, source: &'a str, span: Span) -> Self {
    Self {
      title: if title == "-" { "STDIN" } else { title },
      source,
      span,
      lines: LineIndex::from_source(source),
    }
  }
}
impl fmt::Display for CodeFrame<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let start_line = self.lines.line(self.span).max(1);
    let end_line = self.lines.final_line(self.span).max(start_line);

    writeln!(
      f,
      "    {}{}{}{}{}",
      "╭─[".dimmed(),
      self.title,
      ":".dimmed(),
      start_line,
      "]".dimmed()
    )?;

    for line in start_line..=end_line {
      let line_text = self.lines.line_span(line).source_text(self.source);
      let line_text = line_text.trim_end_matches(['\n', '\r']);

      write!(f, "{line:>3} {}", "│".dimmed())?;
      if !line_text.is_empty() {
        write!(f, " ")?;
      }
      highlight_source(f, line_text)?;
      writeln!(f)?;
    }

    write!(f, "{}", "────╯".dimmed())
  }
}

pub fn highlight_source(output: &mut dyn fmt::Write, source: &str) -> fmt::Result {
  let mut last = 0;
  for token in tokenise(source) {
    // if there is a gap between tokens, keep the whitespace from the source
    if token.start != last {
      let gap = Span::new(last, token.start).source_text(source);
      write!(output, "{gap}")?;
    }

    let style = match token.kind {
      TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Nil => {
        Style::new().blue()
      }
      TokenKind::String | TokenKind::LongString | TokenKind::UnterminatedString => {
        Style::new().green()
      }
      TokenKind::Local | TokenKind::Function => Style::new().magenta(),
      kind if kind.is_keyword() => Style::new().cyan(),
      TokenKind::Comment | TokenKind::UnterminatedComment => Style::new().dimmed(),
      _ => Style::new(),
    };
    let token_text = Span::from(token).source_text(source);
    write!(output, "{}", token_text.style(style))?;

    last = token.end();
  }

  Ok(())
}
