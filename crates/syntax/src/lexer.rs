#![allow(non_camel_case_types)]

use std::fmt;

use logos::Logos;
use span::Span;

use crate::{Error, Result};

/// A single token. `ws` carries the indentation level (in units of 4
/// columns) for `Tok_Indent` tokens and is `None` for everything else.
#[derive(Clone, Copy, Debug)]
pub struct Token {
  pub ws: Option<u64>,
  pub kind: TokenKind,
  pub span: Span,
}

impl Token {
  fn new(kind: TokenKind, span: impl Into<Span>) -> Token {
    Token {
      ws: None,
      kind,
      span: span.into(),
    }
  }

  fn indent(level: u64, span: impl Into<Span>) -> Token {
    Token {
      ws: Some(level),
      kind: TokenKind::Tok_Indent,
      span: span.into(),
    }
  }

  #[inline]
  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

/// Scan `src` into a token list.
///
/// Line structure is explicit in the output: every line break (`\n` or
/// `;`) yields a `Tok_Newline` followed by a `Tok_Indent` carrying the
/// next line's indentation level. The list always ends with `Tok_Eof`.
/// Scanning stops at the first error.
pub fn lex(src: &str) -> Result<Vec<Token>> {
  let mut tokens = Vec::new();

  // Indentation of the very first line is measured up front (the scanner
  // proper only sees it at line breaks). It is emitted only when nonzero.
  let head = src.len() - src.trim_start_matches([' ', '\t']).len();
  if head != 0 {
    let level = indent_level(&src[..head], (0..head).into())?;
    if level != 0 {
      tokens.push(Token::indent(level, 0..head));
    }
  }

  let mut lexer = logos::Lexer::<TokenKind>::new(src);
  while let Some(result) = lexer.next() {
    let span: Span = lexer.span().into();
    let lexeme = lexer.slice();

    match result {
      // A run of line breaks; the trailing spaces/tabs are the new line's
      // indentation.
      Ok(TokenKind::_Tok_Line) => {
        tokens.push(Token::new(TokenKind::Tok_Newline, span.start..span.start + 1));
        let ws_at = lexeme.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let ws_span = Span::from(span.start + ws_at..span.end);
        let level = indent_level(&lexeme[ws_at..], ws_span)?;
        tokens.push(Token::indent(level, ws_span));
      }
      // `;` separates statements exactly like a line break, including the
      // indentation count for whatever follows it.
      Ok(TokenKind::_Tok_Semi) => {
        tokens.push(Token::new(TokenKind::Tok_Newline, span.start..span.start + 1));
        let ws_span = Span::from(span.start + 1..span.end);
        let level = indent_level(&lexeme[1..], ws_span)?;
        tokens.push(Token::indent(level, ws_span));
      }
      Ok(kind) => tokens.push(Token::new(kind, span)),
      Err(()) => return Err(unmatched(lexeme, span)),
    }
  }

  let end = src.len();
  tokens.push(Token::new(TokenKind::Tok_Eof, end..end));
  Ok(tokens)
}

/// Width of an indentation run, where a tab counts as 4 columns. The
/// width must divide into whole levels of 4.
fn indent_level(ws: &str, span: Span) -> Result<u64> {
  let count: u64 = ws.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum();
  if count % 4 != 0 {
    return Err(Error::indentation(
      format!("Indentation level must be a multiple of 4 spaces or tabs, got {count} spaces"),
      span,
    ));
  }
  Ok(count / 4)
}

/// Classify a scanner error by its first character. Unterminated strings
/// and the one-character prefixes of `==`/`!=` get dedicated messages.
fn unmatched(lexeme: &str, span: Span) -> Error {
  match lexeme.chars().next() {
    Some(quote @ ('"' | '\'')) => {
      Error::expected_char(format!("String should be closed by {quote}"), span)
    }
    Some('=') => Error::expected_char("'=' (after '=')", span),
    Some('!') => Error::expected_char("'=' (after '!')", span),
    Some(c) => Error::illegal_char(format!("'{c}'"), span),
    None => Error::illegal_char("unexpected end of input", span),
  }
}

#[derive(Clone, Copy, Debug, Logos, PartialEq, Eq)]
pub enum TokenKind {
  // Keywords
  #[token("and")]
  Kw_And,
  #[token("or")]
  Kw_Or,
  #[token("not")]
  Kw_Not,
  #[token("if")]
  Kw_If,
  #[token("then")]
  Kw_Then,
  #[token("else")]
  Kw_Else,
  #[token("for")]
  Kw_For,
  #[token("to")]
  Kw_To,
  #[token("downto")]
  Kw_Downto,
  #[token("while")]
  Kw_While,
  #[token("function")]
  Kw_Function,
  #[token("return")]
  Kw_Return,
  #[token("Algo")]
  Kw_Algo,
  #[token("Begin")]
  Kw_Begin,
  #[token("End")]
  Kw_End,
  /// Reserved; accepted by the lexer but never produced by the grammar.
  #[token("do")]
  Kw_Do,
  /// Reserved; accepted by the lexer but never produced by the grammar.
  #[token("END")]
  Kw_EndUpper,

  // Brackets
  #[token("(")]
  Brk_ParenL,
  #[token(")")]
  Brk_ParenR,
  #[token("[")]
  Brk_SquareL,
  #[token("]")]
  Brk_SquareR,

  // Misc characters
  #[token(",")]
  Tok_Comma,
  #[token(":")]
  Tok_Colon,

  // Operators
  #[token("+")]
  Op_Plus,
  #[token("-")]
  Op_Minus,
  #[token("*")]
  Op_Star,
  #[token("**")]
  Op_StarStar,
  /// `/`, exact division.
  #[token("/")]
  Op_Slash,
  /// The `div` keyword, floor division.
  #[token("div")]
  Op_Div,
  #[token("mod")]
  Op_Mod,
  /// `<--`, the assignment arrow.
  #[token("<--")]
  Op_Assign,
  #[token("==")]
  Op_EqualEqual,
  #[token("!=")]
  Op_BangEqual,
  #[token("<")]
  Op_Less,
  #[token("<=")]
  Op_LessEqual,
  #[token(">")]
  Op_More,
  #[token(">=")]
  Op_MoreEqual,

  // Literals
  #[regex("[0-9]+", priority = 10)]
  Lit_Int,
  /// `1.5`, and also `5.` (a second dot ends the literal).
  #[regex(r"[0-9]+\.[0-9]*")]
  Lit_Float,
  /// `True` or `False`.
  #[token("True")]
  #[token("False")]
  Lit_Bool,
  /// Single- or double-quoted; must close on the same line.
  #[regex(r#""([^"\\\n\r]|\\[^\n\r])*""#)]
  #[regex(r"'([^'\\\n\r]|\\[^\n\r])*'")]
  Lit_String,
  #[regex("[a-zA-Z][a-zA-Z0-9_]*")]
  Lit_Ident,

  #[doc(hidden)]
  #[regex(r"(\r?\n)+[ \t]*")]
  _Tok_Line,
  #[doc(hidden)]
  #[regex(r";[ \t]*")]
  _Tok_Semi,
  #[doc(hidden)]
  #[regex(r"[ \t]+", logos::skip)]
  _Tok_Space,
  #[doc(hidden)]
  #[regex(r"#[^\n]*", logos::skip)]
  _Tok_Comment,

  // Synthesised by `lex`, never matched by the scanner.
  Tok_Newline,
  Tok_Indent,
  Tok_Eof,
}

impl TokenKind {
  pub fn name(&self) -> &'static str {
    match self {
      TokenKind::Kw_And => "and",
      TokenKind::Kw_Or => "or",
      TokenKind::Kw_Not => "not",
      TokenKind::Kw_If => "if",
      TokenKind::Kw_Then => "then",
      TokenKind::Kw_Else => "else",
      TokenKind::Kw_For => "for",
      TokenKind::Kw_To => "to",
      TokenKind::Kw_Downto => "downto",
      TokenKind::Kw_While => "while",
      TokenKind::Kw_Function => "function",
      TokenKind::Kw_Return => "return",
      TokenKind::Kw_Algo => "Algo",
      TokenKind::Kw_Begin => "Begin",
      TokenKind::Kw_End => "End",
      TokenKind::Kw_Do => "do",
      TokenKind::Kw_EndUpper => "END",
      TokenKind::Brk_ParenL => "(",
      TokenKind::Brk_ParenR => ")",
      TokenKind::Brk_SquareL => "[",
      TokenKind::Brk_SquareR => "]",
      TokenKind::Tok_Comma => ",",
      TokenKind::Tok_Colon => ":",
      TokenKind::Op_Plus => "+",
      TokenKind::Op_Minus => "-",
      TokenKind::Op_Star => "*",
      TokenKind::Op_StarStar => "**",
      TokenKind::Op_Slash => "/",
      TokenKind::Op_Div => "div",
      TokenKind::Op_Mod => "mod",
      TokenKind::Op_Assign => "<--",
      TokenKind::Op_EqualEqual => "==",
      TokenKind::Op_BangEqual => "!=",
      TokenKind::Op_Less => "<",
      TokenKind::Op_LessEqual => "<=",
      TokenKind::Op_More => ">",
      TokenKind::Op_MoreEqual => ">=",
      TokenKind::Lit_Int => "int",
      TokenKind::Lit_Float => "float",
      TokenKind::Lit_Bool => "bool",
      TokenKind::Lit_String => "string",
      TokenKind::Lit_Ident => "identifier",
      TokenKind::_Tok_Line => "<line break>",
      TokenKind::_Tok_Semi => ";",
      TokenKind::_Tok_Space => "<whitespace>",
      TokenKind::_Tok_Comment => "<comment>",
      TokenKind::Tok_Newline => "end of line",
      TokenKind::Tok_Indent => "<indent>",
      TokenKind::Tok_Eof => "end of input",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests;
