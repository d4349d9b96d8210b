use super::*;

impl<'src> Parser<'src> {
  pub(super) fn expr(&mut self) -> Result<ast::Expr<'src>> {
    self.check_recursion_limit(self.current().span)?;

    // `name <-- value` and `name[i]… <-- value` share a prefix with plain
    // expressions, so the assignment shape is attempted first and the
    // parser rewinds when no arrow follows.
    if self.at(Lit_Ident) {
      let mark = self.pos;
      let name = self.ident()?;
      let mut indices = Vec::new();
      while self.bump_if(Brk_SquareL) {
        let index = self.expr()?;
        self.expect(Brk_SquareR)?;
        indices.push(index);
      }
      if self.bump_if(Op_Assign) {
        let value = self.expr()?;
        let span = name.span.merge(value.span);
        let kind = if indices.is_empty() {
          ast::ExprKind::Assign(Box::new(ast::Assign { name, value }))
        } else {
          ast::ExprKind::IndexAssign(Box::new(ast::IndexAssign {
            name,
            indices,
            value,
          }))
        };
        return Ok(Spanned::new(span, kind));
      }
      self.rewind(mark);
    }

    self.logic_expr()
  }

  fn binary(
    op: ast::BinaryOp,
    lhs: ast::Expr<'src>,
    rhs: ast::Expr<'src>,
  ) -> ast::Expr<'src> {
    let span = lhs.span.merge(rhs.span);
    Spanned::new(span, ast::ExprKind::Binary(Box::new(ast::Binary { op, lhs, rhs })))
  }

  fn logic_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.comp_expr()?;
    loop {
      let op = match self.current().kind {
        Kw_And => ast::BinaryOp::And,
        Kw_Or => ast::BinaryOp::Or,
        _ => break,
      };
      self.bump();
      let right = self.comp_expr()?;
      left = Self::binary(op, left, right);
    }
    Ok(left)
  }

  fn comp_expr(&mut self) -> Result<ast::Expr<'src>> {
    if self.at(Kw_Not) {
      let start = self.bump().span;
      let rhs = self.comp_expr()?;
      let span = start.merge(rhs.span);
      return Ok(Spanned::new(
        span,
        ast::ExprKind::Unary(Box::new(ast::Unary {
          op: ast::UnaryOp::Not,
          rhs,
        })),
      ));
    }

    let mut left = self.arith_expr()?;
    loop {
      let op = match self.current().kind {
        Op_EqualEqual => ast::BinaryOp::Eq,
        Op_BangEqual => ast::BinaryOp::Neq,
        Op_Less => ast::BinaryOp::Less,
        Op_LessEqual => ast::BinaryOp::LessEq,
        Op_More => ast::BinaryOp::More,
        Op_MoreEqual => ast::BinaryOp::MoreEq,
        _ => break,
      };
      self.bump();
      let right = self.arith_expr()?;
      left = Self::binary(op, left, right);
    }
    Ok(left)
  }

  fn arith_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.term()?;
    loop {
      let op = match self.current().kind {
        Op_Plus => ast::BinaryOp::Add,
        Op_Minus => ast::BinaryOp::Sub,
        _ => break,
      };
      self.bump();
      let right = self.term()?;
      left = Self::binary(op, left, right);
    }
    Ok(left)
  }

  fn term(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.factor()?;
    loop {
      let op = match self.current().kind {
        Op_Star => ast::BinaryOp::Mul,
        Op_Slash => ast::BinaryOp::Div,
        Op_Div => ast::BinaryOp::IntDiv,
        Op_Mod => ast::BinaryOp::Rem,
        _ => break,
      };
      self.bump();
      let right = self.factor()?;
      left = Self::binary(op, left, right);
    }
    Ok(left)
  }

  fn factor(&mut self) -> Result<ast::Expr<'src>> {
    let op = match self.current().kind {
      Op_Plus => ast::UnaryOp::Plus,
      Op_Minus => ast::UnaryOp::Minus,
      _ => return self.power(),
    };
    let start = self.bump().span;
    let rhs = self.factor()?;
    let span = start.merge(rhs.span);
    Ok(Spanned::new(
      span,
      ast::ExprKind::Unary(Box::new(ast::Unary { op, rhs })),
    ))
  }

  fn power(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.call_expr()?;
    while self.bump_if(Op_StarStar) {
      // the right operand re-enters `factor`, so `**` chains associate to
      // the right
      let right = self.factor()?;
      left = Self::binary(ast::BinaryOp::Pow, left, right);
    }
    Ok(left)
  }

  fn call_expr(&mut self) -> Result<ast::Expr<'src>> {
    let callee = self.atom()?;

    if let ast::ExprKind::Var(name) = &*callee {
      if let Some(builtin) = ast::BuiltinKind::from_name(name.as_ref()) {
        return self.builtin_call(callee, builtin);
      }
    }

    if self.bump_if(Brk_ParenL) {
      let mut args = Vec::new();
      if !self.at(Brk_ParenR) {
        args.push(self.expr()?);
        while self.bump_if(Tok_Comma) {
          args.push(self.expr()?);
        }
        if !self.at(Brk_ParenR) {
          return Err(Error::syntax("Expected ',' or ')'", self.current().span));
        }
      }
      self.expect(Brk_ParenR)?;
      let span = callee.span.merge(self.previous().span);
      return Ok(Spanned::new(
        span,
        ast::ExprKind::Call(Box::new(ast::Call { callee, args })),
      ));
    }

    Ok(callee)
  }

  /// Built-in names get their own call shapes, resolved before the
  /// generic parenthesised form.
  fn builtin_call(
    &mut self,
    callee: ast::Expr<'src>,
    builtin: ast::BuiltinKind,
  ) -> Result<ast::Expr<'src>> {
    use crate::ast::BuiltinKind::*;

    // a built-in name alone on its line is a zero-argument call
    if matches!(self.current().kind, Tok_Newline | Tok_Eof) {
      let span = callee.span;
      return Ok(Spanned::new(
        span,
        ast::ExprKind::Call(Box::new(ast::Call {
          callee,
          args: Vec::new(),
        })),
      ));
    }

    match builtin {
      Get => self.read_targets(callee.span),
      CreateArray | Random | Size => {
        self.expect(Brk_ParenL)?;
        let mut args = vec![self.expr()?];
        while self.bump_if(Tok_Comma) {
          args.push(self.expr()?);
        }
        self.expect(Brk_ParenR)?;
        let span = callee.span.merge(self.previous().span);
        Ok(Spanned::new(
          span,
          ast::ExprKind::Call(Box::new(ast::Call { callee, args })),
        ))
      }
      // the remaining built-ins take their arguments bare, up to the end
      // of the line
      Print | Run | Sqrt => {
        let mut args = vec![self.expr()?];
        while self.bump_if(Tok_Comma) {
          args.push(self.expr()?);
        }
        let span = callee.span.merge(self.previous().span);
        Ok(Spanned::new(
          span,
          ast::ExprKind::Call(Box::new(ast::Call { callee, args })),
        ))
      }
    }
  }

  /// The store targets of a `get`: either one array variable narrowed by
  /// an index path, or one-or-more plain variables.
  fn read_targets(&mut self, start: Span) -> Result<ast::Expr<'src>> {
    let first = self.ident()?;
    let mut targets = Vec::new();
    if self.decls.is_array(first.as_ref()) {
      let mut path = Vec::new();
      while self.bump_if(Brk_SquareL) {
        let index = self.expr()?;
        self.expect(Brk_SquareR)?;
        path.push(index);
      }
      targets.push(ast::ReadTarget { name: first, path });
    } else {
      targets.push(ast::ReadTarget {
        name: first,
        path: Vec::new(),
      });
      while self.bump_if(Tok_Comma) {
        let name = self.ident()?;
        targets.push(ast::ReadTarget {
          name,
          path: Vec::new(),
        });
      }
    }
    let span = start.merge(self.previous().span);
    Ok(Spanned::new(
      span,
      ast::ExprKind::Read(Box::new(ast::Read { targets })),
    ))
  }

  fn atom(&mut self) -> Result<ast::Expr<'src>> {
    self.check_recursion_limit(self.current().span)?;

    let token = self.current();
    match token.kind {
      Lit_Int => {
        self.bump();
        Ok(Spanned::new(token.span, ast::lit::int(self.lexeme(&token))))
      }
      Lit_Float => {
        self.bump();
        Ok(Spanned::new(token.span, ast::lit::float(self.lexeme(&token))))
      }
      Lit_Bool => {
        self.bump();
        let value = if self.lexeme(&token) == "True" { 1 } else { 0 };
        Ok(Spanned::new(token.span, ast::ExprKind::Int(value)))
      }
      Lit_String => {
        self.bump();
        Ok(Spanned::new(
          token.span,
          ast::ExprKind::Str(ast::lit::str(self.lexeme(&token))),
        ))
      }
      Lit_Ident => {
        let name = self.ident()?;
        let var_span = name.span;
        let var = Spanned::new(var_span, ast::ExprKind::Var(name));
        let mut indices = Vec::new();
        while self.bump_if(Brk_SquareL) {
          let index = self.expr()?;
          self.expect(Brk_SquareR)?;
          indices.push(index);
        }
        if indices.is_empty() {
          Ok(var)
        } else {
          let span = var_span.merge(self.previous().span);
          Ok(Spanned::new(
            span,
            ast::ExprKind::Index(Box::new(ast::Index {
              target: var,
              indices,
            })),
          ))
        }
      }
      Brk_ParenL => {
        self.bump();
        let expr = self.expr()?;
        self.expect(Brk_ParenR)?;
        Ok(expr)
      }
      // brackets parenthesise a single expression, same as `( … )`
      Brk_SquareL => {
        self.bump();
        let expr = self.expr()?;
        self.expect(Brk_SquareR)?;
        Ok(expr)
      }
      Kw_If => self.if_expr(),
      Kw_For => self.for_expr(),
      Kw_While => self.while_expr(),
      _ => Err(Error::syntax(
        "Expected int, float, identifier, '+', '-', or '('",
        token.span,
      )),
    }
  }

  fn if_expr(&mut self) -> Result<ast::Expr<'src>> {
    let start = self.current().span;
    let (branches, else_body) = self.if_chain()?;
    let span = start.merge(self.previous().span);
    Ok(Spanned::new(
      span,
      ast::ExprKind::If(Box::new(ast::If {
        branches,
        else_body,
      })),
    ))
  }

  fn if_chain(
    &mut self,
  ) -> Result<(Vec<ast::Branch<'src>>, Option<ast::Body<'src>>)> {
    let outer = self.indent;
    self.expect(Kw_If)?;
    let cond = self.expr()?;
    self.expect(Kw_Then)?;
    let body = self.branch_body(outer)?;
    let mut branches = vec![ast::Branch { cond, body }];
    let mut else_body = None;

    if self.bump_if(Kw_Else) {
      if self.at(Kw_If) {
        // `else if …` continues the chain
        let (nested, nested_else) = self.if_chain()?;
        branches.extend(nested);
        else_body = nested_else;
      } else {
        else_body = Some(self.branch_body(outer)?);
      }
    }

    Ok((branches, else_body))
  }

  /// A branch body: an indented block when the header ends at a line
  /// break, otherwise a single inline statement.
  fn branch_body(&mut self, outer: u64) -> Result<ast::Body<'src>> {
    if self.at(Tok_Newline) {
      Ok(ast::Body {
        expr: self.indented_block(outer)?,
        block: true,
      })
    } else {
      Ok(ast::Body {
        expr: self.statement()?,
        block: false,
      })
    }
  }

  fn while_expr(&mut self) -> Result<ast::Expr<'src>> {
    let outer = self.indent;
    let start = self.expect(Kw_While)?.span;
    let cond = self.expr()?;
    if !self.at(Tok_Newline) {
      return Err(Error::syntax(
        "Expected an indented block after the loop header",
        self.current().span,
      ));
    }
    let body = self.indented_block(outer)?;
    let span = start.merge(self.previous().span);
    Ok(Spanned::new(
      span,
      ast::ExprKind::While(Box::new(ast::While {
        cond,
        body: ast::Body { expr: body, block: true },
      })),
    ))
  }

  fn for_expr(&mut self) -> Result<ast::Expr<'src>> {
    let outer = self.indent;
    let start = self.expect(Kw_For)?.span;
    let var = self.ident()?;
    self.expect(Op_Assign)?;
    let from = self.expr()?;
    let dir = match self.current().kind {
      Kw_To => ast::Direction::To,
      Kw_Downto => ast::Direction::Downto,
      _ => {
        return Err(Error::syntax(
          "Expected 'to' or 'downto'",
          self.current().span,
        ))
      }
    };
    self.bump();
    let to = self.expr()?;
    if !self.at(Tok_Newline) {
      return Err(Error::syntax(
        "Expected an indented block after the loop header",
        self.current().span,
      ));
    }
    let body = self.indented_block(outer)?;
    let span = start.merge(self.previous().span);
    Ok(Spanned::new(
      span,
      ast::ExprKind::For(Box::new(ast::For {
        var,
        start: from,
        end: to,
        dir,
        body: ast::Body { expr: body, block: true },
      })),
    ))
  }
}
