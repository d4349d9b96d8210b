//! Error report rendering.
//!
//! A [`Report`] renders one error in the interpreter's house format:
//!
//! ```text
//! Invalid Syntax: Expected 'End'
//! File sum.alg, line 4
//!
//! print x
//! ^^^^^
//! ```
//!
//! Callers that need extra context (such as a runtime traceback) write it
//! before emitting the report.

use std::fmt;
use std::fmt::Write;

use owo_colors::{OwoColorize, Style};
use span::Span;
use thiserror::Error;

use crate::snippet::Snippet;

/// One error, ready to render: the error name, its one-line message, the
/// source it points into, and the span to underline.
pub struct Report<'a> {
  name: &'a str,
  message: &'a str,
  source: &'a str,
  file: Option<&'a str>,
  span: Span,
  color: bool,
}

impl<'a> Report<'a> {
  pub fn new(
    name: &'a str,
    source: &'a str,
    message: &'a str,
    span: impl Into<Span>,
  ) -> Report<'a> {
    Report {
      name,
      message,
      source,
      file: None,
      span: span.into(),
      color: false,
    }
  }

  /// Name the file the source was loaded from; a report without one
  /// locates itself in `<program>`.
  pub fn file(mut self, file: &'a str) -> Self {
    self.file = Some(file);
    self
  }

  pub fn color(mut self, enabled: bool) -> Self {
    self.color = enabled;
    self
  }

  /// Emit the report to `w`.
  pub fn emit<W: Write>(&self, w: &mut W) -> Result<(), EmitError> {
    if self.span.start > self.source.len() || self.span.end > self.source.len() {
      return Err(EmitError::OutOfBounds);
    }

    let snippet = Snippet::new(self.source, self.span);
    let paint = Paint { enabled: self.color };

    // {name}: {message}
    writeln!(w, "{}: {}", paint.header(self.name), self.message)?;
    // File {file}, line {line}
    let location = format!(
      "File {}, line {}",
      self.file.unwrap_or("<program>"),
      snippet.line
    );
    writeln!(w, "{}", paint.location(&location))?;
    writeln!(w)?;

    // the offending line, with a caret run underneath. Tabs are flattened
    // to single spaces so the caret columns stay aligned.
    writeln!(w, "{}", snippet.text.replace('\t', " "))?;
    let pad = " ".repeat(snippet.span.start);
    let width = (snippet.span.end - snippet.span.start).max(1);
    writeln!(w, "{pad}{}", paint.caret(&"^".repeat(width)))?;

    Ok(())
  }

  /// Emit the report to a string.
  pub fn emit_to_string(&self) -> Result<String, EmitError> {
    let mut buf = String::new();
    self.emit(&mut buf)?;
    Ok(buf)
  }
}

/// The three places a report uses ANSI styling, painted eagerly into
/// owned strings. When disabled the text passes through untouched, so the
/// same rendering path serves terminals and plain-text sinks.
struct Paint {
  enabled: bool,
}

impl Paint {
  fn header(&self, text: &str) -> String {
    self.apply(text, Style::new().red().bold())
  }

  fn location(&self, text: &str) -> String {
    self.apply(text, Style::new().blue())
  }

  fn caret(&self, text: &str) -> String {
    self.apply(text, Style::new().red())
  }

  fn apply(&self, text: &str, style: Style) -> String {
    if self.enabled {
      text.style(style).to_string()
    } else {
      text.to_owned()
    }
  }
}

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to format")]
  Fmt(#[from] fmt::Error),
  #[error("span does not fit within source string")]
  OutOfBounds,
}
