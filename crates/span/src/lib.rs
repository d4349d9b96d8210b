//! Source positions.
//!
//! Everything that points back into a source file (tokens, syntax nodes,
//! errors) carries a [`Span`], a half-open byte region. Line and column
//! numbers are not stored here; the diagnostics layer derives them from
//! the span when a report is rendered.

use std::ops::{Deref, DerefMut, Range};

/// A half-open `[start, end)` byte region of the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

impl Span {
  /// The smallest span that encloses both `self` and `other`.
  ///
  /// The operands may arrive in either order (an assignment's span is
  /// built from its target and its value, whichever ends later), so this
  /// takes the outermost bounds rather than assuming `self` comes first.
  pub fn merge(&self, other: Span) -> Span {
    Span {
      start: self.start.min(other.start),
      end: self.end.max(other.end),
    }
  }

  pub fn range(&self) -> Range<usize> {
    self.start..self.end
  }
}

impl From<Range<usize>> for Span {
  fn from(range: Range<usize>) -> Span {
    Span {
      start: range.start,
      end: range.end,
    }
  }
}

/// A syntax node together with the region it was parsed from.
///
/// Derefs to the node, so `Spanned<ExprKind>` reads like a bare
/// `ExprKind` everywhere the span is not of interest.
#[derive(Clone, Copy, Debug)]
pub struct Spanned<T> {
  pub span: Span,
  pub node: T,
}

impl<T> Spanned<T> {
  pub fn new(span: impl Into<Span>, node: T) -> Spanned<T> {
    Spanned {
      span: span.into(),
      node,
    }
  }
}

impl<T> Deref for Spanned<T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.node
  }
}

impl<T> DerefMut for Spanned<T> {
  fn deref_mut(&mut self) -> &mut T {
    &mut self.node
  }
}

impl<T: std::fmt::Display> std::fmt::Display for Spanned<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.node.fmt(f)
  }
}
