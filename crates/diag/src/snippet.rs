use span::Span;

/// The single source line a span starts on, plus where the span falls
/// within it.
///
/// Line and column information is derived here, at render time, instead of
/// being carried by every token. A span that crosses lines is clipped to
/// its first line, with the highlight extending to the end of that line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet<'a> {
  /// The full text of the line, without its trailing newline.
  pub text: &'a str,
  /// 1-based line number of `text` within the source.
  pub line: usize,
  /// Byte range of the highlight within `text`. `start <= end`, and
  /// `end - start >= 1` whenever `text` is non-empty.
  pub span: Span,
}

impl<'a> Snippet<'a> {
  pub fn new(src: &'a str, span: impl Into<Span>) -> Self {
    let span: Span = span.into();
    let start = span.start.min(src.len());

    let line_start = src[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = src[line_start..]
      .find('\n')
      .map(|i| i + line_start)
      .unwrap_or(src.len());
    let text = &src[line_start..line_end];

    let line = src[..start].matches('\n').count() + 1;

    let col_start = start - line_start;
    let col_end = if span.end <= line_end {
      (span.end - line_start).max(col_start + 1)
    } else {
      text.len()
    };
    let col_end = col_end.min(text.len().max(col_start + 1));

    Snippet {
      text,
      line,
      span: (col_start..col_end).into(),
    }
  }

  /// The highlighted fragment of the line.
  pub fn highlight(&self) -> &str {
    let end = self.span.end.min(self.text.len());
    let start = self.span.start.min(end);
    &self.text[start..end]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn middle_line() {
    let src = "first\nsecond line\nthird";
    let s = Snippet::new(src, 6..12);
    assert_eq!(s.text, "second line");
    assert_eq!(s.line, 2);
    assert_eq!(s.highlight(), "second");
  }

  #[test]
  fn clips_multi_line_spans_to_first_line() {
    let src = "while x\n    y\n";
    let s = Snippet::new(src, 0..13);
    assert_eq!(s.text, "while x");
    assert_eq!(s.line, 1);
    assert_eq!(s.highlight(), "while x");
  }

  #[test]
  fn empty_span_still_highlights_one_column() {
    let src = "abc\n";
    let s = Snippet::new(src, 1..1);
    assert_eq!(s.highlight(), "b");
  }
}
