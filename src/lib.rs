//! An interpreter for a small algorithmic teaching language.
//!
//! A program is a set of optional `function` definitions plus one `Algo`
//! block:
//!
//! ```text
//! Algo
//!     x: int
//! Begin
//!     x <-- 2 + 3*4
//!     print x
//! End
//! ```
//!
//! The interpreter is cooperative: it checks a host-settable stop flag
//! and yields to the host console at every statement, loop iteration, and
//! I/O operation, so an embedding UI stays responsive and can cancel
//! execution at any time.
//!
//! ```
//! let daups = daups::Daups::default();
//! daups.run("Algo\n    x: int\nBegin\n    x <-- 6 * 7\nEnd\n").unwrap();
//! ```

mod builtins;
mod error;
mod host;
mod interp;
mod scope;
mod util;
mod value;

pub use error::{Error, Frame, Result, RuntimeError};
pub use host::{Console, FsLoader, NoopLoader, ScriptLoader, StdConsole, StopFlag};
pub use value::{Num, Value};

use interp::Interp;
use scope::Scope;

/// An interpreter instance: the host capabilities plus a cancellation
/// flag. Each [`run`][`Daups::run`] call is independent: the global
/// scope is rebuilt from scratch every time.
pub struct Daups {
  console: Box<dyn Console>,
  loader: Box<dyn ScriptLoader>,
  stop: StopFlag,
}

impl Daups {
  pub fn builder() -> DaupsBuilder {
    DaupsBuilder {
      console: None,
      loader: None,
    }
  }

  /// Lex, parse and execute `source`. On failure the returned error is
  /// rendered against the same source via [`Error::report`].
  pub fn run(&self, source: &str) -> Result<()> {
    self.stop.clear();
    run_program(source, &*self.console, &*self.loader, self.stop.clone())
  }

  /// The cancellation handle; cloneable and settable from another
  /// thread. Observed at every suspension point.
  pub fn stop_flag(&self) -> StopFlag {
    self.stop.clone()
  }

  /// Recover the concrete console installed via the builder.
  pub fn console<T: 'static>(&self) -> Option<&T> {
    self.console.as_any().downcast_ref()
  }
}

impl Default for Daups {
  fn default() -> Self {
    Self::builder().build()
  }
}

pub struct DaupsBuilder {
  console: Option<Box<dyn Console>>,
  loader: Option<Box<dyn ScriptLoader>>,
}

impl DaupsBuilder {
  pub fn console<T: Console + 'static>(mut self, console: T) -> Self {
    self.console = Some(Box::new(console));
    self
  }

  pub fn loader<T: ScriptLoader + 'static>(mut self, loader: T) -> Self {
    self.loader = Some(Box::new(loader));
    self
  }

  pub fn build(self) -> Daups {
    Daups {
      console: self.console.unwrap_or_else(|| Box::new(StdConsole)),
      loader: self.loader.unwrap_or_else(|| Box::new(NoopLoader)),
      stop: StopFlag::new(),
    }
  }
}

/// One trip through the pipeline: normalise the source, lex and parse,
/// seed a fresh global scope, and walk the program. Also the re-entry
/// point for the `run` built-in, which is why the capabilities come in as
/// borrows.
pub(crate) fn run_program(
  source: &str,
  console: &dyn Console,
  loader: &dyn ScriptLoader,
  stop: StopFlag,
) -> Result<()> {
  let mut text = source.to_owned();
  if !text.ends_with('\n') {
    text.push('\n');
  }

  let program = syntax::parse(&text)?;
  let scope = Scope::global(&program.decls);
  let mut interp = Interp::new(console, loader, stop);
  interp.run(&program, &scope)?;
  Ok(())
}

#[cfg(test)]
mod tests;
