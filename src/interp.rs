//! The tree-walking evaluator.

use std::rc::Rc;

use span::Span;
use syntax::ast;

use crate::builtins;
use crate::error::{Frame, RuntimeError};
use crate::host::{Console, ScriptLoader, StopFlag};
use crate::scope::Scope;
use crate::value::{Func, Num, OpError, Value};

pub type Eval<'a> = Result<Flow<'a>, RuntimeError>;

/// The carrier of one evaluation step: a plain value, or a value
/// travelling upwards out of a `return`.
pub enum Flow<'a> {
  Value(Value<'a>),
  Return(Value<'a>),
}

/// Unwrap one step, propagating in-flight returns (errors ride on `?`).
macro_rules! value {
  ($e:expr) => {
    match $e? {
      Flow::Value(value) => value,
      flow @ Flow::Return(_) => return Ok(flow),
    }
  };
}

struct CallFrame {
  name: String,
  /// The call site this frame was entered from.
  entry: Span,
}

pub struct Interp<'a> {
  pub(crate) console: &'a dyn Console,
  pub(crate) loader: &'a dyn ScriptLoader,
  pub(crate) stop: StopFlag,
  frames: Vec<CallFrame>,
}

impl<'a> Interp<'a> {
  pub fn new(console: &'a dyn Console, loader: &'a dyn ScriptLoader, stop: StopFlag) -> Interp<'a> {
    Interp {
      console,
      loader,
      stop,
      frames: vec![CallFrame {
        name: String::from("<program>"),
        entry: Span::default(),
      }],
    }
  }

  /// Execute a parsed program against its global scope. Top-level items
  /// run in source order; a stray top-level `return` is discarded.
  pub fn run(&mut self, program: &'a ast::Program<'a>, scope: &Scope<'a>) -> Result<(), RuntimeError> {
    for item in &program.items {
      match item {
        ast::Item::Func(func) => {
          let value = Value::Func(Rc::new(Func {
            name: func.name.to_string(),
            params: &func.params,
            body: &func.body,
            ret: func.ret,
            scope: scope.clone(),
          }));
          scope.set(func.name.as_ref(), value);
        }
        ast::Item::Algo(algo) => {
          self.pause(algo.body.span)?;
          self.eval(&algo.body, scope)?;
        }
        ast::Item::Run(path) => {
          builtins::run_script(self, path.as_str(), path.span)?;
        }
      }
    }
    Ok(())
  }

  /// Build a runtime error at `span`, snapshotting the current call stack
  /// into a traceback. Each frame is reported at the position its callee
  /// was entered from; the innermost frame at the error itself.
  pub(crate) fn error(&self, message: impl Into<String>, span: Span) -> RuntimeError {
    let mut trace = Vec::with_capacity(self.frames.len());
    for (i, frame) in self.frames.iter().enumerate() {
      let at = self.frames.get(i + 1).map(|next| next.entry).unwrap_or(span);
      trace.push(Frame {
        name: frame.name.clone(),
        span: at,
      });
    }
    RuntimeError {
      message: message.into(),
      span,
      trace,
    }
  }

  /// A suspension point: observe cancellation first, then let the host
  /// breathe.
  pub(crate) fn pause(&self, span: Span) -> Result<(), RuntimeError> {
    if self.stop.is_set() {
      return Err(self.error("Execution stopped by user", span));
    }
    self.console.yield_now();
    Ok(())
  }

  // An `eval` dive through a call frame stays well under 1 KiB of stack;
  // 128 KiB of headroom covers the deepest realistic remaining descent.
  const MINIMUM_STACK_REQUIRED: usize = 128_000;

  /// Turn runaway recursion into a runtime error instead of a stack
  /// overflow. On targets where the remaining stack is unknown the check
  /// is a no-op.
  fn check_call_depth(&self, span: Span) -> Result<(), RuntimeError> {
    if stacker::remaining_stack()
      .map(|available| available > Self::MINIMUM_STACK_REQUIRED)
      .unwrap_or(true)
    {
      Ok(())
    } else {
      Err(self.error("Call stack limit reached", span))
    }
  }

  fn eval(&mut self, expr: &'a ast::Expr<'a>, scope: &Scope<'a>) -> Eval<'a> {
    match &**expr {
      ast::ExprKind::Int(v) => Ok(Flow::Value(Value::Num(Num::Int(*v)))),
      ast::ExprKind::Float(v) => Ok(Flow::Value(Value::Num(Num::Float(*v)))),
      ast::ExprKind::Str(s) => Ok(Flow::Value(Value::str(s))),

      ast::ExprKind::Block(stmts) => {
        let mut elements = Vec::with_capacity(stmts.len());
        for stmt in stmts {
          self.pause(stmt.span)?;
          elements.push(value!(self.eval(stmt, scope)));
        }
        Ok(Flow::Value(Value::list(elements)))
      }

      ast::ExprKind::Var(name) => self.var_access(name, scope),

      ast::ExprKind::Assign(assign) => {
        let name = &assign.name;
        let Some(ty) = scope.get_type(name.as_ref()) else {
          return Err(self.error(format!("Variable '{name}' is not declared"), name.span));
        };
        let value = value!(self.eval(&assign.value, scope));
        if !type_check(ty, &value) {
          return Err(self.error(
            format!(
              "Variable '{name}' is of type '{ty}', but got '{}'",
              value.type_name()
            ),
            assign.value.span,
          ));
        }
        scope.set(name.as_ref(), value.clone());
        Ok(Flow::Value(value))
      }

      ast::ExprKind::IndexAssign(assign) => {
        let target = value!(self.var_access(&assign.name, scope));
        let mut path = Vec::with_capacity(assign.indices.len());
        for index in &assign.indices {
          let Value::Num(n) = value!(self.eval(index, scope)) else {
            return Err(self.error("The index must be a number", index.span));
          };
          path.push(n.as_i64());
        }
        let value = value!(self.eval(&assign.value, scope));
        target
          .set_element(&path, value.clone())
          .map_err(|_| self.error("Out-of-bounds index or invalid format", expr.span))?;
        Ok(Flow::Value(value))
      }

      ast::ExprKind::Binary(bin) => self.binary(expr.span, bin, scope),

      ast::ExprKind::Unary(unary) => {
        let value = value!(self.eval(&unary.rhs, scope));
        let result = match unary.op {
          ast::UnaryOp::Plus => Ok(value),
          ast::UnaryOp::Minus => value.neg(),
          ast::UnaryOp::Not => value.not(),
        };
        match result {
          Ok(value) => Ok(Flow::Value(value)),
          Err(_) => Err(self.error("Illegal operation", expr.span)),
        }
      }

      ast::ExprKind::If(branches) => {
        for branch in &branches.branches {
          let cond = value!(self.eval(&branch.cond, scope));
          if cond.is_true() {
            return self.body(&branch.body, scope);
          }
        }
        match &branches.else_body {
          Some(body) => self.body(body, scope),
          None => Ok(Flow::Value(Value::null())),
        }
      }

      ast::ExprKind::For(for_) => self.for_loop(expr.span, for_, scope),

      ast::ExprKind::While(while_) => {
        let mut elements = Vec::new();
        loop {
          self.pause(expr.span)?;
          let cond = value!(self.eval(&while_.cond, scope));
          if !cond.is_true() {
            break;
          }
          let value = value!(self.eval(&while_.body.expr, scope));
          if !while_.body.block {
            elements.push(value);
          }
        }
        Ok(Flow::Value(if while_.body.block {
          Value::null()
        } else {
          Value::list(elements)
        }))
      }

      ast::ExprKind::Call(call) => {
        let callee = value!(self.eval(&call.callee, scope));
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
          args.push(value!(self.eval(arg, scope)));
        }
        self.pause(expr.span)?;
        match callee {
          Value::Func(func) => self.call_func(&func, args, expr.span),
          Value::Builtin(builtin) => builtins::call(self, builtin, &args, &call.args, expr.span),
          _ => Err(self.error("Illegal operation", expr.span)),
        }
      }

      ast::ExprKind::Read(read) => self.read(expr.span, read, scope),

      ast::ExprKind::Return(value) => {
        let value = match value {
          Some(expr) => value!(self.eval(expr, scope)),
          None => Value::null(),
        };
        Ok(Flow::Return(value))
      }

      ast::ExprKind::Index(index) => {
        let mut current = value!(self.eval(&index.target, scope));
        for index_expr in &index.indices {
          let Value::Num(n) = value!(self.eval(index_expr, scope)) else {
            return Err(self.error("The index must be a number", index_expr.span));
          };
          current = current
            .element(n.as_i64())
            .map_err(|_| self.error("Index access error (probably out of bounds)", expr.span))?;
        }
        Ok(Flow::Value(current))
      }
    }
  }

  fn var_access(&mut self, name: &ast::Ident<'a>, scope: &Scope<'a>) -> Eval<'a> {
    match scope.get(name.as_ref()) {
      Some(value) => Ok(Flow::Value(value)),
      // declared but never assigned reads as the null value
      None if scope.get_type(name.as_ref()).is_some() => Ok(Flow::Value(Value::null())),
      None => Err(self.error(format!("'{name}' is not defined"), name.span)),
    }
  }

  fn binary(&mut self, span: Span, bin: &'a ast::Binary<'a>, scope: &Scope<'a>) -> Eval<'a> {
    match bin.op {
      // `and`/`or` short-circuit on truthiness and yield the deciding
      // operand
      ast::BinaryOp::And => {
        let lhs = value!(self.eval(&bin.lhs, scope));
        if !lhs.is_true() {
          return Ok(Flow::Value(lhs));
        }
        Ok(Flow::Value(value!(self.eval(&bin.rhs, scope))))
      }
      ast::BinaryOp::Or => {
        let lhs = value!(self.eval(&bin.lhs, scope));
        if lhs.is_true() {
          return Ok(Flow::Value(lhs));
        }
        Ok(Flow::Value(value!(self.eval(&bin.rhs, scope))))
      }
      op => {
        let lhs = value!(self.eval(&bin.lhs, scope));
        let rhs = value!(self.eval(&bin.rhs, scope));
        match Value::binary(op, &lhs, &rhs) {
          Ok(value) => Ok(Flow::Value(value)),
          Err(OpError::DivByZero) => Err(self.error("Division by 0", bin.rhs.span)),
          Err(OpError::OutOfBounds) => Err(self.error(
            "Element at this index could not be retrieved from list because index is out of bounds",
            bin.rhs.span,
          )),
          Err(OpError::Illegal) => Err(self.error("Illegal operation", span)),
        }
      }
    }
  }

  /// A control-structure body: block bodies always yield null, inline
  /// bodies yield their value.
  fn body(&mut self, body: &'a ast::Body<'a>, scope: &Scope<'a>) -> Eval<'a> {
    let value = value!(self.eval(&body.expr, scope));
    Ok(Flow::Value(if body.block { Value::null() } else { value }))
  }

  fn for_loop(&mut self, span: Span, for_: &'a ast::For<'a>, scope: &Scope<'a>) -> Eval<'a> {
    let start = value!(self.eval(&for_.start, scope));
    let end = value!(self.eval(&for_.end, scope));
    let (Value::Num(start), Value::Num(end)) = (start, end) else {
      return Err(self.error("For loop bounds must be numbers", span));
    };

    let mut elements = Vec::new();
    let mut i = start;
    loop {
      let running = match for_.dir {
        ast::Direction::To => i.le(end),
        ast::Direction::Downto => end.le(i),
      };
      if !running {
        break;
      }
      self.pause(span)?;
      // the loop variable lives in the enclosing scope
      scope.set(for_.var.as_ref(), Value::Num(i));
      i = match for_.dir {
        ast::Direction::To => i.add(Num::Int(1)),
        ast::Direction::Downto => i.sub(Num::Int(1)),
      };
      let value = value!(self.eval(&for_.body.expr, scope));
      if !for_.body.block {
        elements.push(value);
      }
    }
    Ok(Flow::Value(if for_.body.block {
      Value::null()
    } else {
      Value::list(elements)
    }))
  }

  fn call_func(&mut self, func: &Rc<Func<'a>>, args: Vec<Value<'a>>, span: Span) -> Eval<'a> {
    self.check_call_depth(span)?;
    check_arity(self, &func.name, func.params.len(), args.len(), span)?;

    let call_scope = func.scope.child();
    for (param, arg) in func.params.iter().zip(args) {
      // the parameter's declared type shadows any global of the same name
      call_scope.set_type(param.name.as_ref(), param.ty);
      call_scope.set(param.name.as_ref(), arg);
    }

    self.frames.push(CallFrame {
      name: func.name.clone(),
      entry: span,
    });
    let result = self.eval(func.body, &call_scope);
    self.frames.pop();

    match result? {
      Flow::Return(value) => Ok(Flow::Value(value)),
      // a function body is a block; falling off the end yields null
      Flow::Value(_) => Ok(Flow::Value(Value::null())),
    }
  }

  /// The targeted `get` statement: read one line per target and store it,
  /// as an integer when the text parses as one.
  fn read(&mut self, span: Span, read: &'a ast::Read<'a>, scope: &Scope<'a>) -> Eval<'a> {
    let mut last = Value::null();
    for target in &read.targets {
      self.pause(target.name.span)?;
      let text = self
        .console
        .read_line("")
        .map_err(|e| self.error(format!("Failed to read input: {e}"), span))?;
      let value = builtins::parse_input(&text);

      if target.path.is_empty() {
        scope.set(target.name.as_ref(), value.clone());
      } else {
        let list = value!(self.var_access(&target.name, scope));
        let mut path = Vec::with_capacity(target.path.len());
        for index in &target.path {
          let Value::Num(n) = value!(self.eval(index, scope)) else {
            return Err(self.error("The index must be a number", index.span));
          };
          path.push(n.as_i64());
        }
        list
          .set_element(&path, value.clone())
          .map_err(|_| self.error("Index access error", span))?;
      }
      last = value;
    }
    Ok(Flow::Value(last))
  }
}

fn type_check(ty: ast::TypeTag, value: &Value<'_>) -> bool {
  use syntax::ast::{Scalar, TypeTag};
  match ty {
    // a bool is just a 0/1 number
    TypeTag::Scalar(Scalar::Int | Scalar::Float | Scalar::Bool) => {
      matches!(value, Value::Num(_))
    }
    TypeTag::Scalar(Scalar::Str) => matches!(value, Value::Str(_)),
    // array cells are checked for index validity only
    TypeTag::Array(_) => true,
  }
}

/// Exact-arity check shared by user functions and most built-ins.
pub(crate) fn check_arity(
  interp: &Interp<'_>,
  name: &str,
  expected: usize,
  got: usize,
  span: Span,
) -> Result<(), RuntimeError> {
  if got > expected {
    Err(interp.error(
      format!("{} too many arguments passed into '{name}'", got - expected),
      span,
    ))
  } else if got < expected {
    Err(interp.error(
      format!("{} too few arguments passed into '{name}'", expected - got),
      span,
    ))
  } else {
    Ok(())
  }
}
