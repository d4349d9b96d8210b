//! The runtime value model: tagged variants with total operator tables.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use syntax::ast;

use crate::scope::Scope;
use crate::util::JoinIter;

/// A runtime value. Lists are shared, so nested structures built by
/// `create_array` stay independently mutable through every alias;
/// everything else copies by value.
#[derive(Clone)]
pub enum Value<'a> {
  Num(Num),
  Str(Rc<str>),
  List(Rc<RefCell<Vec<Value<'a>>>>),
  Func(Rc<Func<'a>>),
  Builtin(ast::BuiltinKind),
}

/// One numeric slot, integral or floating. Arithmetic stays integral
/// while it can.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Num {
  Int(i64),
  Float(f64),
}

/// A user-defined function: its parameter list and body in the AST, plus
/// the scope it was defined in (call scopes chain to it).
pub struct Func<'a> {
  pub name: String,
  pub params: &'a [ast::Param<'a>],
  pub body: &'a ast::Expr<'a>,
  pub ret: Option<ast::TypeTag>,
  pub scope: Scope<'a>,
}

/// Why an operator application failed; the evaluator attaches spans and
/// messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpError {
  Illegal,
  DivByZero,
  OutOfBounds,
}

impl Num {
  pub fn as_f64(self) -> f64 {
    match self {
      Num::Int(v) => v as f64,
      Num::Float(v) => v,
    }
  }

  /// Truncating conversion, used for indices.
  pub fn as_i64(self) -> i64 {
    match self {
      Num::Int(v) => v,
      Num::Float(v) => v as i64,
    }
  }

  pub fn is_zero(self) -> bool {
    match self {
      Num::Int(v) => v == 0,
      Num::Float(v) => v == 0.0,
    }
  }

  fn promote(self, other: Num, int: impl FnOnce(i64, i64) -> i64, float: impl FnOnce(f64, f64) -> f64) -> Num {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => Num::Int(int(a, b)),
      (a, b) => Num::Float(float(a.as_f64(), b.as_f64())),
    }
  }

  pub fn add(self, other: Num) -> Num {
    self.promote(other, i64::wrapping_add, |a, b| a + b)
  }

  pub fn sub(self, other: Num) -> Num {
    self.promote(other, i64::wrapping_sub, |a, b| a - b)
  }

  pub fn mul(self, other: Num) -> Num {
    self.promote(other, i64::wrapping_mul, |a, b| a * b)
  }

  /// Floor division, like the `div` keyword.
  pub fn floor_div(self, other: Num) -> Num {
    self.promote(other, floor_div_i64, |a, b| (a / b).floor())
  }

  /// Floor remainder; the sign follows the divisor.
  pub fn floor_rem(self, other: Num) -> Num {
    self.promote(other, floor_rem_i64, |a, b| a - (a / b).floor() * b)
  }

  pub fn pow(self, other: Num) -> Num {
    if let (Num::Int(base), Num::Int(exp)) = (self, other) {
      if let Ok(exp) = u32::try_from(exp) {
        if let Some(v) = base.checked_pow(exp) {
          return Num::Int(v);
        }
      }
    }
    Num::Float(self.as_f64().powf(other.as_f64()))
  }

  pub fn neg(self) -> Num {
    match self {
      Num::Int(v) => Num::Int(v.wrapping_neg()),
      Num::Float(v) => Num::Float(-v),
    }
  }

  pub fn eq_num(self, other: Num) -> bool {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => a == b,
      (a, b) => a.as_f64() == b.as_f64(),
    }
  }

  pub fn lt(self, other: Num) -> bool {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => a < b,
      (a, b) => a.as_f64() < b.as_f64(),
    }
  }

  pub fn le(self, other: Num) -> bool {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => a <= b,
      (a, b) => a.as_f64() <= b.as_f64(),
    }
  }
}

fn floor_div_i64(a: i64, b: i64) -> i64 {
  let q = a.wrapping_div(b);
  if a % b != 0 && (a < 0) != (b < 0) {
    q - 1
  } else {
    q
  }
}

fn floor_rem_i64(a: i64, b: i64) -> i64 {
  a.wrapping_sub(floor_div_i64(a, b).wrapping_mul(b))
}

impl<'a> Value<'a> {
  /// The null value: `Number 0`.
  pub fn null() -> Value<'a> {
    Value::Num(Num::Int(0))
  }

  pub fn str(text: &str) -> Value<'a> {
    Value::Str(Rc::from(text))
  }

  pub fn list(elements: Vec<Value<'a>>) -> Value<'a> {
    Value::List(Rc::new(RefCell::new(elements)))
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Num(_) => "Number",
      Value::Str(_) => "String",
      Value::List(_) => "List",
      Value::Func(_) => "Function",
      Value::Builtin(_) => "BuiltInFunction",
    }
  }

  pub fn is_true(&self) -> bool {
    match self {
      Value::Num(n) => !n.is_zero(),
      Value::Str(s) => !s.is_empty(),
      Value::List(l) => !l.borrow().is_empty(),
      Value::Func(_) | Value::Builtin(_) => true,
    }
  }

  /// Dispatch a (non-logical) binary operator. `and`/`or` short-circuit
  /// in the evaluator and never reach this table.
  pub fn binary(op: ast::BinaryOp, lhs: &Value<'a>, rhs: &Value<'a>) -> Result<Value<'a>, OpError> {
    use syntax::ast::BinaryOp::*;
    match op {
      Add => lhs.add(rhs),
      Sub => lhs.arith(rhs, Num::sub),
      Mul => lhs.arith(rhs, Num::mul),
      Div => lhs.div(rhs),
      IntDiv => lhs.div_like(rhs, Num::floor_div),
      Rem => lhs.div_like(rhs, Num::floor_rem),
      Pow => lhs.arith(rhs, Num::pow),
      Eq | Neq | Less | LessEq | More | MoreEq => lhs.compare(op, rhs),
      And | Or => Err(OpError::Illegal),
    }
  }

  fn add(&self, other: &Value<'a>) -> Result<Value<'a>, OpError> {
    match (self, other) {
      (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a.add(*b))),
      // string concatenation takes the displayed form of the right side
      (Value::Str(a), b) => Ok(Value::str(&format!("{a}{b}"))),
      _ => Err(OpError::Illegal),
    }
  }

  fn arith(&self, other: &Value<'a>, op: impl FnOnce(Num, Num) -> Num) -> Result<Value<'a>, OpError> {
    match (self, other) {
      (Value::Num(a), Value::Num(b)) => Ok(Value::Num(op(*a, *b))),
      _ => Err(OpError::Illegal),
    }
  }

  /// `/` divides exactly; on a list it is the legacy index shorthand.
  fn div(&self, other: &Value<'a>) -> Result<Value<'a>, OpError> {
    match (self, other) {
      (Value::Num(a), Value::Num(b)) => {
        if b.is_zero() {
          return Err(OpError::DivByZero);
        }
        Ok(Value::Num(Num::Float(a.as_f64() / b.as_f64())))
      }
      (Value::List(_), Value::Num(index)) => self.element(index.as_i64()),
      _ => Err(OpError::Illegal),
    }
  }

  fn div_like(&self, other: &Value<'a>, op: impl FnOnce(Num, Num) -> Num) -> Result<Value<'a>, OpError> {
    match (self, other) {
      (Value::Num(a), Value::Num(b)) => {
        if b.is_zero() {
          return Err(OpError::DivByZero);
        }
        Ok(Value::Num(op(*a, *b)))
      }
      _ => Err(OpError::Illegal),
    }
  }

  fn compare(&self, op: ast::BinaryOp, other: &Value<'a>) -> Result<Value<'a>, OpError> {
    use syntax::ast::BinaryOp::*;
    let (Value::Num(a), Value::Num(b)) = (self, other) else {
      return Err(OpError::Illegal);
    };
    let result = match op {
      Eq => a.eq_num(*b),
      Neq => !a.eq_num(*b),
      Less => a.lt(*b),
      LessEq => a.le(*b),
      More => b.lt(*a),
      MoreEq => b.le(*a),
      _ => return Err(OpError::Illegal),
    };
    Ok(Value::Num(Num::Int(result as i64)))
  }

  /// `not` maps 0 to 1 and everything else to 0; numbers only.
  pub fn not(&self) -> Result<Value<'a>, OpError> {
    match self {
      Value::Num(n) => Ok(Value::Num(Num::Int(n.is_zero() as i64))),
      _ => Err(OpError::Illegal),
    }
  }

  pub fn neg(&self) -> Result<Value<'a>, OpError> {
    match self {
      Value::Num(n) => Ok(Value::Num(n.neg())),
      _ => Err(OpError::Illegal),
    }
  }

  /// Fetch one element of a list by index.
  pub fn element(&self, index: i64) -> Result<Value<'a>, OpError> {
    let Value::List(list) = self else {
      return Err(OpError::Illegal);
    };
    let list = list.borrow();
    let index = usize::try_from(index).map_err(|_| OpError::OutOfBounds)?;
    list.get(index).cloned().ok_or(OpError::OutOfBounds)
  }

  /// Store into a nested element through an index path, mutating the
  /// shared list in place.
  pub fn set_element(&self, path: &[i64], value: Value<'a>) -> Result<(), OpError> {
    let Some((&last, rest)) = path.split_last() else {
      return Err(OpError::OutOfBounds);
    };
    let mut current = self.clone();
    for &index in rest {
      current = current.element(index)?;
    }
    let Value::List(list) = &current else {
      return Err(OpError::Illegal);
    };
    let index = usize::try_from(last).map_err(|_| OpError::OutOfBounds)?;
    let mut list = list.borrow_mut();
    let slot = list.get_mut(index).ok_or(OpError::OutOfBounds)?;
    *slot = value;
    Ok(())
  }
}

impl fmt::Display for Num {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // f64's Display already renders integral values without a decimal
    // point, which is the output format `print` wants
    match self {
      Num::Int(v) => write!(f, "{v}"),
      Num::Float(v) => write!(f, "{v}"),
    }
  }
}

impl fmt::Display for Value<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Num(n) => write!(f, "{n}"),
      Value::Str(s) => f.write_str(s),
      Value::List(l) => {
        let elements = l.borrow();
        write!(f, "{}", elements.iter().join(", "))
      }
      Value::Func(func) => write!(f, "<function {}>", func.name),
      Value::Builtin(b) => write!(f, "<built-in function {}>", b.name()),
    }
  }
}

impl fmt::Debug for Value<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Str(s) => write!(f, "{s:?}"),
      Value::List(l) => f.debug_list().entries(l.borrow().iter()).finish(),
      other => write!(f, "{other}"),
    }
  }
}
