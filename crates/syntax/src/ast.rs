use beef::lean::Cow;
use span::Spanned;

/// An identifier with its source span.
pub type Ident<'src> = Spanned<Cow<'src, str>>;

/// A parsed source file: top-level items plus the declaration table the
/// parser accumulated while reading `name: type` headers.
#[cfg_attr(test, derive(Debug))]
pub struct Program<'src> {
  pub items: Vec<Item<'src>>,
  pub decls: Declarations,
}

#[cfg_attr(test, derive(Debug))]
pub enum Item<'src> {
  /// The main `Algo … Begin … End` block.
  Algo(Algo<'src>),
  Func(Func<'src>),
  /// The `run "file"` short-program shape, recognised only at the very
  /// start of the token stream.
  Run(Spanned<String>),
}

#[cfg_attr(test, derive(Debug))]
pub struct Algo<'src> {
  pub body: Expr<'src>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Func<'src> {
  pub name: Ident<'src>,
  pub params: Vec<Param<'src>>,
  pub body: Expr<'src>,
  pub ret: Option<TypeTag>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Param<'src> {
  pub name: Ident<'src>,
  pub ty: TypeTag,
}

pub type Expr<'src> = Spanned<ExprKind<'src>>;

#[cfg_attr(test, derive(Debug))]
pub enum ExprKind<'src> {
  Int(i64),
  Float(f64),
  Str(String),
  /// A statement list. Evaluates its elements in order and yields them as
  /// a list value.
  Block(Vec<Expr<'src>>),
  Var(Ident<'src>),
  Assign(Box<Assign<'src>>),
  Binary(Box<Binary<'src>>),
  Unary(Box<Unary<'src>>),
  If(Box<If<'src>>),
  For(Box<For<'src>>),
  While(Box<While<'src>>),
  Call(Box<Call<'src>>),
  /// The `get` input statement with its store targets.
  Read(Box<Read<'src>>),
  Return(Option<Box<Expr<'src>>>),
  Index(Box<Index<'src>>),
  IndexAssign(Box<IndexAssign<'src>>),
}

#[cfg_attr(test, derive(Debug))]
pub struct Assign<'src> {
  pub name: Ident<'src>,
  pub value: Expr<'src>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Binary<'src> {
  pub op: BinaryOp,
  pub lhs: Expr<'src>,
  pub rhs: Expr<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  /// `/`, exact division.
  Div,
  /// `div`, floor division.
  IntDiv,
  /// `mod`.
  Rem,
  Pow,
  Eq,
  Neq,
  Less,
  LessEq,
  More,
  MoreEq,
  And,
  Or,
}

#[cfg_attr(test, derive(Debug))]
pub struct Unary<'src> {
  pub op: UnaryOp,
  pub rhs: Expr<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
  Plus,
  Minus,
  Not,
}

/// One arm of an `if`/`else if` chain plus the optional `else`.
#[cfg_attr(test, derive(Debug))]
pub struct If<'src> {
  pub branches: Vec<Branch<'src>>,
  pub else_body: Option<Body<'src>>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Branch<'src> {
  pub cond: Expr<'src>,
  pub body: Body<'src>,
}

/// A control-structure body. `block` records whether it was written as an
/// indented block (which always yields the null value) or as a single
/// inline statement (which yields that statement's value).
#[cfg_attr(test, derive(Debug))]
pub struct Body<'src> {
  pub expr: Expr<'src>,
  pub block: bool,
}

#[cfg_attr(test, derive(Debug))]
pub struct For<'src> {
  pub var: Ident<'src>,
  pub start: Expr<'src>,
  pub end: Expr<'src>,
  pub dir: Direction,
  pub body: Body<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
  To,
  Downto,
}

#[cfg_attr(test, derive(Debug))]
pub struct While<'src> {
  pub cond: Expr<'src>,
  pub body: Body<'src>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Call<'src> {
  pub callee: Expr<'src>,
  pub args: Vec<Expr<'src>>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Read<'src> {
  pub targets: Vec<ReadTarget<'src>>,
}

/// A `get` store destination: a variable, optionally narrowed to an array
/// element through an index path.
#[cfg_attr(test, derive(Debug))]
pub struct ReadTarget<'src> {
  pub name: Ident<'src>,
  pub path: Vec<Expr<'src>>,
}

#[cfg_attr(test, derive(Debug))]
pub struct Index<'src> {
  pub target: Expr<'src>,
  pub indices: Vec<Expr<'src>>,
}

#[cfg_attr(test, derive(Debug))]
pub struct IndexAssign<'src> {
  pub name: Ident<'src>,
  pub indices: Vec<Expr<'src>>,
  pub value: Expr<'src>,
}

/// Scalar declaration types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalar {
  Int,
  Float,
  Str,
  Bool,
}

impl Scalar {
  pub fn from_name(name: &str) -> Option<Scalar> {
    match name {
      "int" => Some(Scalar::Int),
      "float" => Some(Scalar::Float),
      "str" => Some(Scalar::Str),
      "bool" => Some(Scalar::Bool),
      _ => None,
    }
  }
}

/// The declared type of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
  Scalar(Scalar),
  Array(Scalar),
}

impl TypeTag {
  pub fn is_array(&self) -> bool {
    matches!(self, TypeTag::Array(_))
  }
}

impl std::fmt::Display for TypeTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let scalar = |s: &Scalar| match s {
      Scalar::Int => "int",
      Scalar::Float => "float",
      Scalar::Str => "str",
      Scalar::Bool => "bool",
    };
    match self {
      TypeTag::Scalar(s) => f.write_str(scalar(s)),
      TypeTag::Array(s) => write!(f, "array<{}>", scalar(s)),
    }
  }
}

/// The fixed set of built-in operations, recognised by name both by the
/// parser (their call shapes differ) and by the interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinKind {
  Print,
  Get,
  Run,
  Sqrt,
  Random,
  Size,
  CreateArray,
}

impl BuiltinKind {
  pub fn from_name(name: &str) -> Option<BuiltinKind> {
    match name {
      "print" => Some(BuiltinKind::Print),
      "get" => Some(BuiltinKind::Get),
      "run" => Some(BuiltinKind::Run),
      "SQRT" => Some(BuiltinKind::Sqrt),
      "nombreAleatoire" => Some(BuiltinKind::Random),
      "size" => Some(BuiltinKind::Size),
      "create_array" => Some(BuiltinKind::CreateArray),
      _ => None,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      BuiltinKind::Print => "print",
      BuiltinKind::Get => "get",
      BuiltinKind::Run => "run",
      BuiltinKind::Sqrt => "SQRT",
      BuiltinKind::Random => "nombreAleatoire",
      BuiltinKind::Size => "size",
      BuiltinKind::CreateArray => "create_array",
    }
  }
}

/// Names bound before any user declaration: the built-ins plus the
/// pre-defined constants. Declaring one of these is an error.
pub fn is_reserved(name: &str) -> bool {
  BuiltinKind::from_name(name).is_some() || matches!(name, "NULL" | "true" | "false" | "Pi")
}

/// The parse-time record of every `name: type` declaration. Shared with
/// the runtime, which seeds the global scope's type map from it.
#[derive(Debug, Default)]
pub struct Declarations {
  map: std::collections::HashMap<String, TypeTag>,
  /// Names declared as variables, the domain of the uniqueness check.
  /// Parameter registrations are exempt so that a parameter may share its
  /// name with a global.
  vars: std::collections::HashSet<String>,
}

impl Declarations {
  pub fn new() -> Declarations {
    Declarations::default()
  }

  /// Register a variable declaration. Each name may be declared once per
  /// program, and never over a reserved name.
  pub fn declare(&mut self, name: &str, ty: TypeTag) -> Result<(), ()> {
    if is_reserved(name) || self.vars.contains(name) {
      return Err(());
    }
    self.vars.insert(name.to_owned());
    self.map.insert(name.to_owned(), ty);
    Ok(())
  }

  /// Register a function parameter. No uniqueness check; the last
  /// registration of a name wins.
  pub fn declare_param(&mut self, name: &str, ty: TypeTag) {
    self.map.insert(name.to_owned(), ty);
  }

  pub fn get(&self, name: &str) -> Option<TypeTag> {
    self.map.get(name).copied()
  }

  pub fn is_array(&self, name: &str) -> bool {
    self.get(name).map(|ty| ty.is_array()).unwrap_or(false)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, TypeTag)> {
    self.map.iter().map(|(k, v)| (k.as_str(), *v))
  }
}

/// Literal cooking helpers.
pub mod lit {
  use super::ExprKind;

  /// Parse an integer literal. Values beyond `i64` fall back to a float.
  pub fn int(lexeme: &str) -> ExprKind<'static> {
    match lexeme.parse::<i64>() {
      Ok(v) => ExprKind::Int(v),
      Err(_) => ExprKind::Float(lexeme.parse::<f64>().unwrap_or(f64::INFINITY)),
    }
  }

  pub fn float(lexeme: &str) -> ExprKind<'static> {
    ExprKind::Float(lexeme.parse::<f64>().unwrap_or(f64::NAN))
  }

  /// Cook a string literal: strip the quotes, process `\n`/`\t` (any other
  /// escaped character stands for itself), and apply the legacy
  /// `Saut-de-ligne` line-break alias.
  pub fn str(lexeme: &str) -> String {
    let body = &lexeme[1..lexeme.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
      if c != '\\' {
        out.push(c);
        continue;
      }
      match chars.next() {
        Some('n') => out.push('\n'),
        Some('t') => out.push('\t'),
        Some(other) => out.push(other),
        None => out.push('\\'),
      }
    }
    if out == "Saut-de-ligne" {
      out = String::from("\n");
    }
    out
  }
}
