use super::*;

impl<'src> Parser<'src> {
  pub(super) fn run_command(&mut self) -> Result<ast::Item<'src>> {
    self.bump(); // `run`
    let token = self.current();
    if !token.is(Lit_String) {
      return Err(Error::syntax("Expected string after 'run'", token.span));
    }
    self.bump();
    let path = ast::lit::str(self.lexeme(&token));
    Ok(ast::Item::Run(Spanned::new(token.span, path)))
  }

  pub(super) fn item(&mut self) -> Result<ast::Item<'src>> {
    match self.current().kind {
      Kw_Algo => self.algo(),
      Kw_Function => self.func(),
      _ => Err(Error::syntax(
        "Expected 'Algo' or 'function'",
        self.current().span,
      )),
    }
  }

  fn algo(&mut self) -> Result<ast::Item<'src>> {
    self.bump(); // `Algo`
    let body = self.body_block()?;
    Ok(ast::Item::Algo(ast::Algo { body }))
  }

  fn func(&mut self) -> Result<ast::Item<'src>> {
    self.bump(); // `function`
    let name = self.ident()?;
    self.expect(Brk_ParenL)?;
    let mut params = Vec::new();
    if self.at(Lit_Ident) {
      params.push(self.param()?);
      while self.bump_if(Tok_Comma) {
        params.push(self.param()?);
      }
    }
    self.expect(Brk_ParenR)?;
    let ret = if self.bump_if(Tok_Colon) {
      Some(self.type_tag()?)
    } else {
      None
    };
    self.expect(Tok_Newline)?;
    let body = self.body_block()?;
    Ok(ast::Item::Func(ast::Func {
      name,
      params,
      body,
      ret,
    }))
  }

  fn param(&mut self) -> Result<ast::Param<'src>> {
    let name = self.ident()?;
    self.expect(Tok_Colon)?;
    let ty = self.type_tag()?;
    // parameters may shadow earlier declarations; last registration wins
    self.decls.declare_param(name.as_ref(), ty);
    Ok(ast::Param { name, ty })
  }

  /// The declaration header and `Begin … End` body shared by `Algo`
  /// blocks and function definitions.
  fn body_block(&mut self) -> Result<ast::Expr<'src>> {
    self.skip_newlines();
    while self.at(Lit_Ident) {
      self.var_declaration()?;
      self.skip_newlines();
    }
    self.expect(Kw_Begin)?;
    self.skip_newlines();
    let body = self.statements()?;
    self.expect(Kw_End)?;
    Ok(body)
  }

  /// `name (',' name)* ':' type`; registers every name in the
  /// declaration table.
  fn var_declaration(&mut self) -> Result<()> {
    let mut names = vec![self.ident()?];
    while self.bump_if(Tok_Comma) {
      names.push(self.ident()?);
    }
    self.expect(Tok_Colon)?;
    let ty = self.type_tag()?;
    for name in &names {
      if self.decls.declare(name.as_ref(), ty).is_err() {
        return Err(Error::syntax(
          format!("Variable '{name}' is already declared"),
          name.span,
        ));
      }
    }
    Ok(())
  }

  pub(super) fn type_tag(&mut self) -> Result<ast::TypeTag> {
    let token = self.current();
    if token.is(Lit_Ident) && self.lexeme(&token) == "array" {
      self.bump();
      let of = self.current();
      if !of.is(Lit_Ident) || self.lexeme(&of) != "of" {
        return Err(Error::syntax("Expected 'of' after 'array'", of.span));
      }
      self.bump();
      let elem = self.current();
      let scalar = elem
        .is(Lit_Ident)
        .then(|| ast::Scalar::from_name(self.lexeme(&elem)))
        .flatten();
      match scalar {
        Some(scalar) => {
          self.bump();
          Ok(ast::TypeTag::Array(scalar))
        }
        None => Err(Error::syntax(
          "Expected a valid type (int, float, str, bool) after 'of'",
          elem.span,
        )),
      }
    } else {
      let scalar = token
        .is(Lit_Ident)
        .then(|| ast::Scalar::from_name(self.lexeme(&token)))
        .flatten();
      match scalar {
        Some(scalar) => {
          self.bump();
          Ok(ast::TypeTag::Scalar(scalar))
        }
        None => Err(Error::syntax(
          "Expected 'int', 'float', 'str', 'bool' or 'array'",
          token.span,
        )),
      }
    }
  }

  /// A statement list anchored at the level of its first statement. The
  /// list ends at `End`, at end of input, or when a line starts below the
  /// anchor level; a line above it is an indentation error.
  pub(super) fn statements(&mut self) -> Result<ast::Expr<'src>> {
    let start = self.current().span;
    let level = self.indent;
    let mut stmts = vec![self.statement()?];
    loop {
      self.skip_newlines();
      if matches!(self.current().kind, Kw_End | Tok_Eof) {
        break;
      }
      if self.indent < level {
        break;
      }
      if self.indent > level {
        return Err(Error::indentation(
          format!("Expected indentation level {level}, got {}", self.indent),
          self.current().span,
        ));
      }
      stmts.push(self.statement()?);
    }
    let span = start.merge(self.previous().span);
    Ok(Spanned::new(span, ast::ExprKind::Block(stmts)))
  }

  /// A control-structure body: the caller is looking at the newline after
  /// the header, and the block must sit exactly one level deeper than the
  /// header's line.
  pub(super) fn indented_block(&mut self, outer: u64) -> Result<ast::Expr<'src>> {
    self.skip_newlines();
    if self.indent != outer + 1 {
      return Err(Error::indentation(
        format!("Expected indentation level {}, got {}", outer + 1, self.indent),
        self.current().span,
      ));
    }
    self.statements()
  }

  pub(super) fn statement(&mut self) -> Result<ast::Expr<'src>> {
    self.check_recursion_limit(self.current().span)?;

    if self.at(Kw_Return) {
      let start = self.bump().span;
      let value = if matches!(self.current().kind, Tok_Newline | Kw_End | Kw_Else | Tok_Eof) {
        None
      } else {
        Some(Box::new(self.expr()?))
      };
      let span = start.merge(self.previous().span);
      return Ok(Spanned::new(span, ast::ExprKind::Return(value)));
    }

    self.expr()
  }
}
