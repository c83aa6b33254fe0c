use super::FormatOptions;
use super::diagnostics::{CodeFrame, Message};

use luafmt_formatter::{FormatError, FormatterConfig};
use luafmt_syntax::{AST, tokenise};

use anstream::{eprintln, print, println};
use log::{debug, info};
use std::fs;

pub enum CommandStatus {
  /// Command was successful
  Success,
  /// Command ran, but the check failed
  Failure,
}

fn display_name(filename: &str) -> &str {
  if filename == "-" { "STDIN" } else { filename }
}

fn read_file(filename: &str) -> Result<String, ()> {
  if filename == "-" {
    return read_stdin();
  }

  match fs::read(filename) {
    Ok(file) if file.len() > u32::MAX as usize => {
      eprintln!("{}", Message::error("File too large - max size 4GB".into()));
      Err(())
    }
    Ok(file) => into_source(file),
    Err(_) => {
      eprintln!("{}", Message::error(format!("File not found `{filename}`")));
      Err(())
    }
  }
}

fn read_stdin() -> Result<String, ()> {
  use std::io::{self, Read};

  let mut buffer = Vec::new();
  let mut stdin = io::stdin().lock();

  match stdin.read_to_end(&mut buffer) {
    Ok(_) if buffer.len() > u32::MAX as usize => {
      eprintln!("{}", Message::error("File too large - max size 4GB".into()));
      Err(())
    }
    Ok(_) => into_source(buffer),
    Err(_) => {
      eprintln!("{}", Message::error("Problem Reading from STDIN".into()));
      Err(())
    }
  }
}

fn into_source(bytes: Vec<u8>) -> Result<String, ()> {
  String::from_utf8(bytes).map_err(|_| {
    eprintln!("{}", Message::error("Source is not valid UTF-8".into()));
  })
}

fn parse<'source>(filename: &str, source: &'source str) -> Result<AST<'source>, ()> {
  luafmt_syntax::parse(source).map_err(|error| {
    eprintln!("{}", Message::from(&error));
    eprintln!("{}", CodeFrame::new(filename, source, error.span()));
  })
}

pub fn format(options: &FormatOptions) -> Result<CommandStatus, ()> {
  let config = FormatterConfig {
    extra_newlines: options.config_extra_newlines,
    inline: luafmt_formatter::config::Inline {
      block: options.config_inline_block,
      table: options.config_inline_table,
    },
    quote_style: options.config_quote_style.into(),
    indentation: options.config_indent_size.into(),
    line_ending: options.config_line_ending.into(),
  };

  let source = read_file(&options.file)?;
  let ast = parse(&options.file, &source)?;
  let mut formatted_source = match luafmt_formatter::format_ast(&ast, config) {
    Ok(formatted) => formatted,
    Err(error) => {
      eprintln!("{}", Message::from(&error));
      if let FormatError::MalformedInput(error) = &error {
        eprintln!("{}", CodeFrame::new(&options.file, &source, error.span()));
      }
      return Err(());
    }
  };
  if !formatted_source.is_empty() {
    formatted_source.push_str(config.line_ending.as_str());
  }

  if options.dryrun {
    print!("{formatted_source}");
    return Ok(CommandStatus::Success);
  }

  if options.check {
    if formatted_source == source {
      info!("`{}` is formatted", display_name(&options.file));
      return Ok(CommandStatus::Success);
    }

    eprintln!("{}", Message {
      title: "File is not formatted".into(),
      body: format!("`{}` is not formatted", display_name(&options.file)),
      hint: Some("run without `--check` to format it".into()),
    });
    return Ok(CommandStatus::Failure);
  }

  if options.file == "-" {
    print!("{formatted_source}");
    return Ok(CommandStatus::Success);
  }

  if formatted_source == source {
    debug!("`{}` is already formatted", options.file);
  } else if fs::write(&options.file, formatted_source).is_err() {
    eprintln!("{}", Message::error("Problem writing to file".into()));
    return Err(());
  } else {
    info!("Formatted `{}`", options.file);
  }

  Ok(CommandStatus::Success)
}

pub fn print_tokens(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;

  println!("    ╭─[Tokens: {}]", display_name(filename));
  for token in tokenise(&source) {
    print!("{:>3} │ {}", token.start, token.kind);
    if !token.kind.has_fixed_length() {
      print!(" (length: {})", token.length);
    }
    println!();
  }
  println!("────╯");

  Ok(CommandStatus::Success)
}

pub fn print_ast(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let ast = parse(filename, &source)?;

  println!("╭─[Abstract Syntax Tree: {}]", display_name(filename));
  print!("{ast}");
  println!("╯");

  Ok(CommandStatus::Success)
}
