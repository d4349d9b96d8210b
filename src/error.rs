use std::fmt::Display;

use diag::{Report, Snippet};
use span::Span;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of the pipeline: a lex/parse error, or a runtime error
/// carrying a traceback.
#[derive(Debug)]
pub enum Error {
  Syntax(syntax::Error),
  Runtime(RuntimeError),
}

/// A runtime failure, positioned at `span`, with one [`Frame`] per active
/// call (outermost first).
#[derive(Debug)]
pub struct RuntimeError {
  pub message: String,
  pub span: Span,
  pub trace: Vec<Frame>,
}

/// One traceback entry: the frame's display name and the position it had
/// reached when the error unwound through it.
#[derive(Debug)]
pub struct Frame {
  pub name: String,
  pub span: Span,
}

impl Error {
  /// Render the error against the source it was produced from, in the
  /// interpreter's report format. `color` enables ANSI styling.
  pub fn report(&self, file: &str, source: &str, color: bool) -> String {
    match self {
      Error::Syntax(e) => {
        let span = clamp(e.span, source);
        Report::new(e.kind.name(), source, e.message.as_ref(), span)
          .file(file)
          .color(color)
          .emit_to_string()
          .unwrap_or_else(|_| self.to_string())
      }
      Error::Runtime(e) => {
        let mut out = String::from("Traceback (most recent call last):\n");
        for frame in &e.trace {
          let line = Snippet::new(source, clamp(frame.span, source)).line;
          out.push_str(&format!("   File {file}, line {line}, in {}\n", frame.name));
        }
        let span = clamp(e.span, source);
        let report = Report::new("RunTime error", source, &e.message, span)
          .file(file)
          .color(color)
          .emit_to_string()
          .unwrap_or_else(|_| self.to_string());
        out.push_str(&report);
        out
      }
    }
  }
}

// Spans may point at a trailing newline the driver appended during source
// normalisation; pull them back inside the text.
fn clamp(span: Span, source: &str) -> Span {
  Span {
    start: span.start.min(source.len()),
    end: span.end.min(source.len()),
  }
}

impl From<syntax::Error> for Error {
  fn from(value: syntax::Error) -> Self {
    Error::Syntax(value)
  }
}

impl From<RuntimeError> for Error {
  fn from(value: RuntimeError) -> Self {
    Error::Runtime(value)
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Syntax(e) => write!(f, "{e}"),
      Error::Runtime(e) => write!(f, "RunTime error: {}", e.message),
    }
  }
}

impl std::error::Error for Error {}
