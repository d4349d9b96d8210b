//! The fixed set of built-in operations, dispatched by kind.

use rand::Rng;
use span::Span;
use syntax::ast::{self, BuiltinKind};

use crate::interp::{check_arity, Eval, Flow, Interp};
use crate::util::JoinIter;
use crate::value::{Num, Value};

pub(crate) fn call<'a>(
  interp: &mut Interp<'a>,
  builtin: BuiltinKind,
  args: &[Value<'a>],
  arg_exprs: &[ast::Expr<'a>],
  span: Span,
) -> Eval<'a> {
  match builtin {
    BuiltinKind::Print => print(interp, args, span),
    BuiltinKind::Get => get(interp, span),
    BuiltinKind::Run => run(interp, args, span),
    BuiltinKind::Sqrt => sqrt(interp, args, span),
    BuiltinKind::Random => random(interp, args, span),
    BuiltinKind::Size => size(interp, args, span),
    BuiltinKind::CreateArray => create_array(interp, args, arg_exprs, span),
  }
}

/// `print ...`: display forms joined by single spaces, one line per
/// call, then a yield so the host can paint.
fn print<'a>(interp: &mut Interp<'a>, args: &[Value<'a>], span: Span) -> Eval<'a> {
  let mut line = args.iter().join(" ").to_string();
  line.push('\n');
  interp
    .console
    .write(&line)
    .map_err(|e| interp.error(format!("Failed to write output: {e}"), span))?;
  interp.pause(span)?;
  Ok(Flow::Value(Value::null()))
}

/// A bare `get` with no target: read a line and yield it as the call's
/// value. Targeted forms are compiled to a dedicated node and handled by
/// the evaluator.
fn get<'a>(interp: &mut Interp<'a>, span: Span) -> Eval<'a> {
  interp.pause(span)?;
  let text = interp
    .console
    .read_line("")
    .map_err(|e| interp.error(format!("Failed to read input: {e}"), span))?;
  Ok(Flow::Value(parse_input(&text)))
}

/// Input lines that parse as integers are stored as numbers; anything
/// else stays a string.
pub(crate) fn parse_input<'a>(text: &str) -> Value<'a> {
  match text.trim().parse::<i64>() {
    Ok(v) => Value::Num(Num::Int(v)),
    Err(_) => Value::str(text),
  }
}

fn run<'a>(interp: &mut Interp<'a>, args: &[Value<'a>], span: Span) -> Eval<'a> {
  check_arity(interp, "run", 1, args.len(), span)?;
  let Value::Str(path) = &args[0] else {
    return Err(interp.error("Argument to 'run' must be a string", span));
  };
  let path = path.to_string();
  run_script(interp, &path, span)
}

/// Load another source file through the host capability and put it
/// through the whole pipeline against a fresh global scope. A failure
/// inside the script surfaces as a runtime error carrying the inner
/// report.
pub(crate) fn run_script<'a>(interp: &mut Interp<'a>, path: &str, span: Span) -> Eval<'a> {
  let script = interp
    .loader
    .read_file(path)
    .map_err(|e| interp.error(format!("Failed to load script \"{path}\"\n{e}"), span))?;
  if let Err(error) = crate::run_program(
    &script,
    interp.console,
    interp.loader,
    interp.stop.clone(),
  ) {
    let rendered = error.report(path, &script, false);
    return Err(interp.error(
      format!("Failed to finish executing script \"{path}\"\n{rendered}"),
      span,
    ));
  }
  Ok(Flow::Value(Value::null()))
}

fn sqrt<'a>(interp: &mut Interp<'a>, args: &[Value<'a>], span: Span) -> Eval<'a> {
  check_arity(interp, "SQRT", 1, args.len(), span)?;
  let Value::Num(n) = &args[0] else {
    return Err(interp.error(
      format!("Argument must be a number, got '{}'", args[0].type_name()),
      span,
    ));
  };
  Ok(Flow::Value(Value::Num(Num::Float(n.as_f64().sqrt()))))
}

/// `nombreAleatoire(a, b)`: a uniformly random integer in `[a, b]`.
fn random<'a>(interp: &mut Interp<'a>, args: &[Value<'a>], span: Span) -> Eval<'a> {
  check_arity(interp, "nombreAleatoire", 2, args.len(), span)?;
  let (Value::Num(a), Value::Num(b)) = (&args[0], &args[1]) else {
    return Err(interp.error("Arguments must be numbers", span));
  };
  let (lo, hi) = (a.as_i64(), b.as_i64());
  if lo > hi {
    return Err(interp.error("Invalid range for 'nombreAleatoire'", span));
  }
  let value = rand::thread_rng().gen_range(lo..=hi);
  Ok(Flow::Value(Value::Num(Num::Int(value))))
}

/// `size(T)`: the length of the outermost list.
fn size<'a>(interp: &mut Interp<'a>, args: &[Value<'a>], span: Span) -> Eval<'a> {
  check_arity(interp, "size", 1, args.len(), span)?;
  let Value::List(list) = &args[0] else {
    return Err(interp.error("Argument to 'size' must be an array", span));
  };
  let len = list.borrow().len() as i64;
  Ok(Flow::Value(Value::Num(Num::Int(len))))
}

fn create_array<'a>(
  interp: &mut Interp<'a>,
  args: &[Value<'a>],
  arg_exprs: &[ast::Expr<'a>],
  span: Span,
) -> Eval<'a> {
  if args.is_empty() {
    return Err(interp.error("'create_array' expects at least one dimension", span));
  }
  let mut dims = Vec::with_capacity(args.len());
  for (i, arg) in args.iter().enumerate() {
    let at = arg_exprs.get(i).map(|e| e.span).unwrap_or(span);
    let Value::Num(n) = arg else {
      return Err(interp.error("Array sizes must be numbers", at));
    };
    let size = usize::try_from(n.as_i64())
      .map_err(|_| interp.error("Array sizes must be non-negative", at))?;
    dims.push(size);
  }
  Ok(Flow::Value(build_array(&dims)))
}

/// A rectangular nested list whose innermost cells hold the empty string,
/// the "unset cell" sentinel. Every nested list is freshly allocated so
/// the rows mutate independently.
fn build_array<'a>(dims: &[usize]) -> Value<'a> {
  match dims {
    [len] => Value::list(vec![Value::str(""); *len]),
    [len, rest @ ..] => Value::list((0..*len).map(|_| build_array(rest)).collect()),
    [] => Value::list(Vec::new()),
  }
}
