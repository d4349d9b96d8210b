use std::any::Any;
use std::cell::{Cell, RefCell};
use std::io;

use crate::{Console, StopFlag};

/// A console that captures output and replays scripted input lines.
pub struct TestConsole {
  output: RefCell<String>,
  input: RefCell<Vec<String>>,
}

impl TestConsole {
  pub fn new() -> TestConsole {
    TestConsole::with_input(&[])
  }

  pub fn with_input(lines: &[&str]) -> TestConsole {
    TestConsole {
      output: RefCell::new(String::new()),
      input: RefCell::new(lines.iter().map(|line| line.to_string()).collect()),
    }
  }

  pub fn output(&self) -> String {
    self.output.borrow().clone()
  }
}

impl Console for TestConsole {
  fn write(&self, text: &str) -> io::Result<()> {
    self.output.borrow_mut().push_str(text);
    Ok(())
  }

  fn read_line(&self, _prompt: &str) -> io::Result<String> {
    let mut input = self.input.borrow_mut();
    if input.is_empty() {
      Ok(String::new())
    } else {
      Ok(input.remove(0))
    }
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// A console that raises the stop flag after a fixed number of
/// suspension points, for cancellation tests.
pub struct StopConsole {
  after: Cell<usize>,
  flag: RefCell<Option<StopFlag>>,
}

impl StopConsole {
  pub fn new(after: usize) -> StopConsole {
    StopConsole {
      after: Cell::new(after),
      flag: RefCell::new(None),
    }
  }

  /// Install the flag to raise; call after building the interpreter.
  pub fn arm(&self, flag: StopFlag) {
    *self.flag.borrow_mut() = Some(flag);
  }
}

impl Console for StopConsole {
  fn write(&self, _text: &str) -> io::Result<()> {
    Ok(())
  }

  fn read_line(&self, _prompt: &str) -> io::Result<String> {
    Ok(String::new())
  }

  fn yield_now(&self) {
    let remaining = self.after.get();
    if remaining == 0 {
      if let Some(flag) = &*self.flag.borrow() {
        flag.stop();
      }
    } else {
      self.after.set(remaining - 1);
    }
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// Run a program and compare the captured output.
macro_rules! check {
  ($name:ident, $input:literal, $expected:expr) => {
    #[test]
    fn $name() {
      let input = indoc::indoc!($input);
      let daups = $crate::Daups::builder()
        .console($crate::tests::common::TestConsole::new())
        .build();
      match daups.run(input) {
        Ok(()) => {
          let console = daups
            .console::<$crate::tests::common::TestConsole>()
            .expect("test console is installed");
          pretty_assertions::assert_eq!(console.output(), $expected);
        }
        Err(error) => panic!(
          "program failed:\n{}",
          error.report("test.alg", input, false)
        ),
      }
    }
  };
}

/// Run a program, expect it to fail, and look for `$needle` in the
/// rendered report.
macro_rules! check_error {
  ($name:ident, $input:literal, $needle:literal) => {
    #[test]
    fn $name() {
      let input = indoc::indoc!($input);
      let daups = $crate::Daups::builder()
        .console($crate::tests::common::TestConsole::new())
        .build();
      match daups.run(input) {
        Ok(()) => {
          let console = daups
            .console::<$crate::tests::common::TestConsole>()
            .expect("test console is installed");
          panic!("unexpected success, output: {:?}", console.output());
        }
        Err(error) => {
          let report = error.report("test.alg", input, false);
          assert!(
            report.contains($needle),
            "report does not contain {:?}:\n{report}",
            $needle
          );
        }
      }
    }
  };
}
