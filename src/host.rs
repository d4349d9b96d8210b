//! The capabilities the interpreter consumes from its embedding host:
//! console I/O, script loading for `run`, and the cancellation flag.

use std::any::Any;
use std::fmt::Display;
use std::io;
use std::io::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Console capability: where `print` output goes and where `get` input
/// comes from.
///
/// `yield_now` is invoked at every suspension point, so an embedding host
/// can repaint its UI or pump an event loop between interpreter steps.
pub trait Console: Any {
  /// Append `text` to the program's output.
  fn write(&self, text: &str) -> io::Result<()>;

  /// Read one line of input, without its line terminator. Returns the
  /// empty string at end of input.
  fn read_line(&self, prompt: &str) -> io::Result<String>;

  /// Called at each suspension point. The default does nothing.
  fn yield_now(&self) {}

  fn as_any(&self) -> &dyn Any;
}

/// The process console: stdout/stdin.
pub struct StdConsole;

impl Console for StdConsole {
  fn write(&self, text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
  }

  fn read_line(&self, prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
      self.write(prompt)?;
    }
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
      line.pop();
    }
    Ok(line)
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// Script-loading capability used by the `run` built-in.
pub trait ScriptLoader {
  fn read_file(&self, path: &str) -> Result<String, Box<dyn std::error::Error + 'static>>;
}

/// Loads scripts from the filesystem. The CLI installs this one.
pub struct FsLoader;

impl ScriptLoader for FsLoader {
  fn read_file(&self, path: &str) -> Result<String, Box<dyn std::error::Error + 'static>> {
    Ok(std::fs::read_to_string(path)?)
  }
}

/// Refuses to load anything; the default for embedded use.
pub struct NoopLoader;

#[derive(Debug)]
pub struct LoadRefused {
  pub path: String,
}

impl Display for LoadRefused {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "could not load script `{}`", self.path)
  }
}

impl std::error::Error for LoadRefused {}

impl ScriptLoader for NoopLoader {
  fn read_file(&self, path: &str) -> Result<String, Box<dyn std::error::Error + 'static>> {
    Err(Box::new(LoadRefused {
      path: path.to_owned(),
    }))
  }
}

/// Cancellation handle observed at every suspension point. Cloneable and
/// safe to set from another thread.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
  pub fn new() -> StopFlag {
    StopFlag::default()
  }

  pub fn stop(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  pub fn clear(&self) {
    self.0.store(false, Ordering::Relaxed);
  }

  pub fn is_set(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}
