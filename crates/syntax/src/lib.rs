use beef::lean::Cow;
use span::Span;

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::parse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced while lexing or parsing.
///
/// The `kind` selects the user-visible error name; `span` anchors the
/// report in the source.
#[derive(Clone, Debug)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: Cow<'static, str>,
  pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  IllegalChar,
  ExpectedChar,
  InvalidSyntax,
  Indentation,
}

impl ErrorKind {
  pub fn name(&self) -> &'static str {
    match self {
      ErrorKind::IllegalChar => "Illegal Character",
      ErrorKind::ExpectedChar => "Expected Character",
      ErrorKind::InvalidSyntax => "Invalid Syntax",
      ErrorKind::Indentation => "Indentation Error",
    }
  }
}

impl Error {
  pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Error {
      kind,
      message: message.into(),
      span: span.into(),
    }
  }

  pub fn illegal_char(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Self::new(ErrorKind::IllegalChar, message, span)
  }

  pub fn expected_char(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Self::new(ErrorKind::ExpectedChar, message, span)
  }

  pub fn syntax(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Self::new(ErrorKind::InvalidSyntax, message, span)
  }

  pub fn indentation(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Self::new(ErrorKind::Indentation, message, span)
  }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let Error { kind, message, .. } = self;
    write!(f, "{}: {message}", kind.name())
  }
}
