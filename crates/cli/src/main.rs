//! # luafmt
//! An opinionated formatter for Lua source code.
//!
//! Consistent indentation, spacing, and parentheses, while keeping every comment.

#![allow(clippy::print_stdout)]

mod commands;
mod diagnostics;

use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commands::CommandStatus;
use luafmt_formatter::config::{LineEnding, QuoteStyle};
use owo_colors::*;
use std::process;

const STYLES: Styles = Styles::styled()
  .usage(Style::new().italic())
  .header(AnsiColor::BrightBlue.on_default().bold());

fn coloured_header() -> String {
  format!(
    "{} {}",
    "luafmt".fg::<owo_colors::colors::css::RoyalBlue>().bold(),
    concat!("(v", env!("CARGO_PKG_VERSION"), ")").italic().dimmed()
  )
}

fn about() -> String {
  format!(
    "{}\nAn opinionated formatter for Lua source code.",
    coloured_header()
  )
}

#[derive(Parser)]
#[clap(
  name = "luafmt",
  version,
  about = about(),
  styles = STYLES,
  disable_help_subcommand = true,
)]
enum App {
  /// Formats source files
  #[clap(alias = "fmt")]
  Format(FormatOptions),

  /// Prints debugging information
  Print {
    #[command(subcommand)]
    command: PrintCommand,
  },
}

#[derive(Args)]
struct FormatOptions {
  /// The file to format, `-` to read from STDIN
  file: String,
  /// Preview the results of the formatting
  #[clap(long)]
  dryrun: bool,
  /// Check the file is formatted. Do not write to file
  #[clap(long)]
  check: bool,

  /// Put a blank line around function declarations
  #[clap(long, default_value_t = true, action = ArgAction::Set, help_heading = "Formatting Config")]
  config_extra_newlines: bool,
  /// Keep bodies with a single short statement on one line
  #[clap(long, default_value_t = true, action = ArgAction::Set, help_heading = "Formatting Config")]
  config_inline_block: bool,
  /// Keep short tables with up to three fields on one line
  #[clap(long, default_value_t = true, action = ArgAction::Set, help_heading = "Formatting Config")]
  config_inline_table: bool,
  /// The quote to prefer for strings
  #[clap(long, value_enum, default_value_t = QuoteOption::Double, help_heading = "Formatting Config")]
  config_quote_style: QuoteOption,
  /// Indentation size (spaces) to use. If 0 uses tabs
  #[clap(long, default_value_t = 0, help_heading = "Formatting Config")]
  config_indent_size: u16,
  /// The line endings to use
  #[clap(long, value_enum, default_value_t = LineEndingOption::Native, help_heading = "Formatting Config")]
  config_line_ending: LineEndingOption,
}

#[derive(Clone, Copy, ValueEnum)]
enum QuoteOption {
  /// `"string"`
  Double,
  /// `'string'`
  Single,
}
impl From<QuoteOption> for QuoteStyle {
  fn from(option: QuoteOption) -> Self {
    match option {
      QuoteOption::Double => Self::Double,
      QuoteOption::Single => Self::Single,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum LineEndingOption {
  /// `\n`
  Lf,
  /// `\r\n`
  Crlf,
  /// `\r\n` on Windows, otherwise `\n`
  Native,
}
impl From<LineEndingOption> for LineEnding {
  fn from(option: LineEndingOption) -> Self {
    match option {
      LineEndingOption::Lf => Self::LineFeed,
      LineEndingOption::Crlf => Self::CarriageReturnLineFeed,
      LineEndingOption::Native => Self::Native,
    }
  }
}

#[derive(Subcommand)]
enum PrintCommand {
  /// Displays the tokens in the file
  Tokens {
    /// The file to print
    file: String,
  },
  /// Displays the Abstract Syntax Tree
  Ast {
    /// The file to print
    file: String,
  },
}

fn main() -> process::ExitCode {
  env_logger::init();
  let args = App::parse();

  let result = match args {
    App::Format(options) => commands::format(&options),
    App::Print { command } => match command {
      PrintCommand::Tokens { file } => commands::print_tokens(&file),
      PrintCommand::Ast { file } => commands::print_ast(&file),
    },
  };

  match result {
    Ok(CommandStatus::Success) => process::ExitCode::from(0),
    Ok(CommandStatus::Failure) => process::ExitCode::from(1),
    Err(()) => process::ExitCode::from(2),
  }
}
