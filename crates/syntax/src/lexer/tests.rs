use super::TokenKind::*;
use super::*;
use crate::ErrorKind;

fn kinds(src: &str) -> Vec<TokenKind> {
  match lex(src) {
    Ok(tokens) => tokens.iter().map(|t| t.kind).collect(),
    Err(e) => panic!("lex failed: {e}"),
  }
}

fn lex_err(src: &str) -> Error {
  match lex(src) {
    Ok(tokens) => panic!("expected a lex error, got {tokens:?}"),
    Err(e) => e,
  }
}

#[test]
fn statement_tokens() {
  assert_eq!(
    kinds("x <-- 2 + 3*4\n"),
    vec![
      Lit_Ident, Op_Assign, Lit_Int, Op_Plus, Lit_Int, Op_Star, Lit_Int, Tok_Newline, Tok_Indent,
      Tok_Eof
    ]
  );
}

#[test]
fn semicolon_acts_as_a_line_break() {
  assert_eq!(
    kinds("x <-- 1;print x\n"),
    vec![
      Lit_Ident, Op_Assign, Lit_Int, Tok_Newline, Tok_Indent, Lit_Ident, Lit_Ident, Tok_Newline,
      Tok_Indent, Tok_Eof
    ]
  );
}

#[test]
fn indent_tokens_carry_their_level() {
  let tokens = lex("a\n    b\n        c\n").map_err(|e| e.to_string()).ok();
  let tokens = tokens.as_deref().unwrap_or_default();
  let levels: Vec<u64> = tokens
    .iter()
    .filter(|t| t.is(Tok_Indent))
    .map(|t| t.ws.unwrap_or(99))
    .collect();
  assert_eq!(levels, vec![1, 2, 0]);
}

#[test]
fn a_tab_counts_as_four_columns() {
  let tokens = match lex("a\n\tb\n") {
    Ok(tokens) => tokens,
    Err(e) => panic!("lex failed: {e}"),
  };
  let levels: Vec<u64> = tokens
    .iter()
    .filter(|t| t.is(Tok_Indent))
    .map(|t| t.ws.unwrap_or(99))
    .collect();
  assert_eq!(levels, vec![1, 0]);
}

#[test]
fn file_head_indentation_is_emitted_only_when_nonzero() {
  assert_eq!(kinds("    a\n")[0], Tok_Indent);
  assert_eq!(kinds("a\n")[0], Lit_Ident);
}

#[test]
fn indentation_must_divide_into_fours() {
  let e = lex_err("a\n   b\n");
  assert_eq!(e.kind, ErrorKind::Indentation);
  assert!(e
    .message
    .as_ref()
    .contains("must be a multiple of 4 spaces or tabs, got 3 spaces"));
}

#[test]
fn numbers() {
  assert_eq!(kinds("1 25 1.5 5."), vec![Lit_Int, Lit_Int, Lit_Float, Lit_Float, Tok_Eof]);
  // a second dot ends the literal; the stray dot is then unmatchable
  let e = lex_err("1.2.3");
  assert_eq!(e.kind, ErrorKind::IllegalChar);
}

#[test]
fn strings_accept_both_quote_styles() {
  assert_eq!(kinds(r#""ab" 'cd'"#), vec![Lit_String, Lit_String, Tok_Eof]);
}

#[test]
fn unterminated_strings_are_rejected() {
  let e = lex_err("\"abc\n");
  assert_eq!(e.kind, ErrorKind::ExpectedChar);
  assert!(e.message.as_ref().contains("String should be closed by \""));

  let e = lex_err("'abc");
  assert!(e.message.as_ref().contains("String should be closed by '"));
}

#[test]
fn comparison_and_assignment_arrows() {
  assert_eq!(
    kinds("< <= <-- > >= == !="),
    vec![Op_Less, Op_LessEqual, Op_Assign, Op_More, Op_MoreEqual, Op_EqualEqual, Op_BangEqual, Tok_Eof]
  );
}

#[test]
fn lone_equals_and_bang_need_a_second_character() {
  assert_eq!(lex_err("=").message.as_ref(), "'=' (after '=')");
  assert_eq!(lex_err("!").message.as_ref(), "'=' (after '!')");
}

#[test]
fn keywords_and_identifiers() {
  assert_eq!(
    kinds("for to downto android True div mod"),
    vec![Kw_For, Kw_To, Kw_Downto, Lit_Ident, Lit_Bool, Op_Div, Op_Mod, Tok_Eof]
  );
}

#[test]
fn comments_run_to_the_end_of_the_line() {
  assert_eq!(
    kinds("x # a comment: <-- ; \"\ny"),
    vec![Lit_Ident, Tok_Newline, Tok_Indent, Lit_Ident, Tok_Eof]
  );
}

#[test]
fn unknown_characters_are_illegal() {
  let e = lex_err("x $ y");
  assert_eq!(e.kind, ErrorKind::IllegalChar);
  assert_eq!(e.message.as_ref(), "'$'");
}

#[test]
fn token_spans_point_back_into_the_source() {
  let src = "total <-- price ** 2\n";
  let tokens = match lex(src) {
    Ok(tokens) => tokens,
    Err(e) => panic!("lex failed: {e}"),
  };
  let lexemes: Vec<&str> = tokens
    .iter()
    .filter(|t| !matches!(t.kind, Tok_Newline | Tok_Indent | Tok_Eof))
    .map(|t| &src[t.span.range()])
    .collect();
  assert_eq!(lexemes, vec!["total", "<--", "price", "**", "2"]);
}
