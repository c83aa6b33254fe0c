//! Source positions and related helper functions.

/// A half-open byte range `[start, end)` of the source code
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  /// The byte index of the start of the span
  pub start: u32,
  /// The byte index after the end of the span
  pub end: u32,
}

impl Span {
  /// Create a new `Span` from a start and end position
  #[inline]
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// A span covering both `Span`s and everything between them
  pub fn merge(self, other: Self) -> Self {
    Self::new(self.start.min(other.start), self.end.max(other.end))
  }

  /// Check if a `Span` fully contains another `Span`
  #[must_use]
  pub const fn contains(self, other: Self) -> bool {
    self.start <= other.start && other.end <= self.end
  }

  /// Get the source text for a `Span` from a source string
  #[must_use]
  pub fn source_text(self, source_text: &str) -> &str {
    &source_text[self.start as usize..self.end as usize]
  }
}

/// Index for looking up the line number from source positions
///
/// Line numbers given start at 1
#[must_use]
#[derive(Debug)]
pub struct LineIndex {
  line_starts: Vec<u32>,
  file_length: u32,
}
impl LineIndex {
  /// Create a new `LineIndex` from a source string.
  ///
  /// # Panics
  ///
  /// Panics if the source string is longer than `u32::MAX` bytes.
  #[allow(clippy::cast_possible_truncation, reason = "source.len() < u32::MAX")]
  pub fn from_source(source: &str) -> Self {
    assert!(source.len() < u32::MAX as usize);

    let line_starts = std::iter::once(0)
      .chain(
        source
          .bytes()
          .enumerate()
          .filter(|(_, byte)| *byte == b'\n')
          .map(|(index, _)| index as u32 + 1),
      )
      .collect();

    Self {
      line_starts,
      file_length: source.len() as u32,
    }
  }

  fn line_of(&self, position: u32) -> usize {
    match self.line_starts.binary_search(&position) {
      Ok(line) => line + 1,
      Err(line) => line,
    }
  }

  /// Get the line number which a `Span` starts on
  #[must_use]
  pub fn line(&self, span: Span) -> usize {
    self.line_of(span.start)
  }

  /// Get the line number which a `Span` ends on
  #[must_use]
  pub fn final_line(&self, span: Span) -> usize {
    self.line_of(span.end.saturating_sub(1).max(span.start))
  }

  /// Get a `Span` for a given line number
  ///
  /// # Panics
  /// Panics if the line number doesn't exist
  pub fn line_span(&self, line: usize) -> Span {
    let start = self.line_starts[line - 1];
    let end = *self.line_starts.get(line).unwrap_or(&self.file_length);

    Span::new(start, end)
  }

  /// The number of lines in the file
  #[must_use]
  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }
}
