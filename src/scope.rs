//! Nested scopes: a value map and a type map per scope, with a parent
//! link for lexical lookup.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use syntax::ast::{BuiltinKind, Declarations, TypeTag};

use crate::value::{Num, Value};

/// One lexical scope. Cheap to clone; clones share the underlying maps,
/// which is what lets a captured function scope observe later global
/// definitions.
#[derive(Clone)]
pub struct Scope<'a>(Rc<RefCell<Inner<'a>>>);

struct Inner<'a> {
  symbols: IndexMap<String, Value<'a>>,
  types: IndexMap<String, TypeTag>,
  parent: Option<Scope<'a>>,
}

impl<'a> Scope<'a> {
  fn new(parent: Option<Scope<'a>>) -> Scope<'a> {
    Scope(Rc::new(RefCell::new(Inner {
      symbols: IndexMap::new(),
      types: IndexMap::new(),
      parent,
    })))
  }

  /// The global scope for one program run: parse-time declarations plus
  /// the pre-bound constants and built-ins.
  pub fn global(decls: &Declarations) -> Scope<'a> {
    let scope = Scope::new(None);
    for (name, ty) in decls.iter() {
      scope.set_type(name, ty);
    }
    scope.set("NULL", Value::null());
    scope.set("true", Value::Num(Num::Int(1)));
    scope.set("false", Value::Num(Num::Int(0)));
    scope.set("Pi", Value::Num(Num::Float(std::f64::consts::PI)));
    for builtin in [
      BuiltinKind::Print,
      BuiltinKind::Get,
      BuiltinKind::Run,
      BuiltinKind::Sqrt,
      BuiltinKind::Random,
      BuiltinKind::Size,
      BuiltinKind::CreateArray,
    ] {
      scope.set(builtin.name(), Value::Builtin(builtin));
    }
    scope
  }

  /// A fresh child scope chained to this one.
  pub fn child(&self) -> Scope<'a> {
    Scope::new(Some(self.clone()))
  }

  /// Look a name up through the scope chain.
  pub fn get(&self, name: &str) -> Option<Value<'a>> {
    let inner = self.0.borrow();
    if let Some(value) = inner.symbols.get(name) {
      return Some(value.clone());
    }
    inner.parent.as_ref().and_then(|parent| parent.get(name))
  }

  /// Look a declared type up through the scope chain.
  pub fn get_type(&self, name: &str) -> Option<TypeTag> {
    let inner = self.0.borrow();
    if let Some(ty) = inner.types.get(name) {
      return Some(*ty);
    }
    inner.parent.as_ref().and_then(|parent| parent.get_type(name))
  }

  /// Bind a value in this scope. Assignments never write through to a
  /// parent, which is what keeps parameter shadows from leaking.
  pub fn set(&self, name: &str, value: Value<'a>) {
    self.0.borrow_mut().symbols.insert(name.to_owned(), value);
  }

  pub fn set_type(&self, name: &str, ty: TypeTag) {
    self.0.borrow_mut().types.insert(name.to_owned(), ty);
  }
}
