//! End-to-end tests driving the public API with custom host
//! capabilities.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use daups::{Console, Daups, ScriptLoader};

struct Capture {
  output: RefCell<String>,
  input: RefCell<Vec<String>>,
}

impl Capture {
  fn new(input: &[&str]) -> Capture {
    Capture {
      output: RefCell::new(String::new()),
      input: RefCell::new(input.iter().map(|s| s.to_string()).collect()),
    }
  }
}

impl Console for Capture {
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

/// Serves scripts from an in-memory map, standing in for the filesystem.
struct MapLoader {
  files: HashMap<String, String>,
}

impl ScriptLoader for MapLoader {
  fn read_file(&self, path: &str) -> Result<String, Box<dyn std::error::Error + 'static>> {
    match self.files.get(path) {
      Some(source) => Ok(source.clone()),
      None => Err(format!("no such file: {path}").into()),
    }
  }
}

fn run(source: &str, input: &[&str]) -> String {
  let daups = Daups::builder().console(Capture::new(input)).build();
  match daups.run(source) {
    Ok(()) => daups.console::<Capture>().unwrap().output.borrow().clone(),
    Err(e) => panic!("program failed:\n{}", e.report("e2e.alg", source, false)),
  }
}

#[test]
fn arithmetic_and_print() {
  let out = run(
    "Algo\n    x: int\nBegin\n    x <-- 2 + 3*4\n    print x\nEnd\n",
    &[],
  );
  assert_eq!(out, "14\n");
}

#[test]
fn string_concatenation() {
  let out = run(
    "Algo\n    s: str\nBegin\n    s <-- \"a\" + \"b\"\n    print s\nEnd\n",
    &[],
  );
  assert_eq!(out, "ab\n");
}

#[test]
fn counted_loop_prints_each_value_separately() {
  let out = run(
    "Algo\n    i: int\nBegin\n    for i <-- 1 to 3\n        print i\nEnd\n",
    &[],
  );
  assert_eq!(out, "1\n2\n3\n");
}

#[test]
fn arrays_round_trip() {
  let out = run(
    "Algo\n    T: array of int\nBegin\n    T <-- create_array(3)\n    T[0] <-- 10\n    print T[0]\nEnd\n",
    &[],
  );
  assert_eq!(out, "10\n");
}

#[test]
fn user_functions() {
  let out = run(
    "function f(x: int): int\nBegin\n    return x*x\nEnd\n\nAlgo\n    y: int\nBegin\n    y <-- f(5)\n    print y\nEnd\n",
    &[],
  );
  assert_eq!(out, "25\n");
}

#[test]
fn interactive_program() {
  let out = run(
    "Algo\n    a, b: int\nBegin\n    get a\n    get b\n    print a * b\nEnd\n",
    &["6", "7"],
  );
  assert_eq!(out, "42\n");
}

#[test]
fn run_builtin_executes_another_script() {
  let mut files = HashMap::new();
  files.insert(
    String::from("child.alg"),
    String::from("Algo\n    x: int\nBegin\n    x <-- 21\n    print x * 2\nEnd\n"),
  );

  let daups = Daups::builder()
    .console(Capture::new(&[]))
    .loader(MapLoader { files })
    .build();

  let parent = "Algo\nBegin\n    print \"before\"\n    run \"child.alg\"\n    print \"after\"\nEnd\n";
  daups.run(parent).expect("chained scripts run cleanly");
  let out = daups.console::<Capture>().unwrap().output.borrow().clone();
  assert_eq!(out, "before\n42\nafter\n");
}

#[test]
fn run_short_program_shape() {
  let mut files = HashMap::new();
  files.insert(
    String::from("main.alg"),
    String::from("Algo\nBegin\n    print \"chained\"\nEnd\n"),
  );

  let daups = Daups::builder()
    .console(Capture::new(&[]))
    .loader(MapLoader { files })
    .build();

  daups.run("run \"main.alg\"\n").expect("short program runs");
  let out = daups.console::<Capture>().unwrap().output.borrow().clone();
  assert_eq!(out, "chained\n");
}

#[test]
fn failures_inside_a_chained_script_are_wrapped() {
  let mut files = HashMap::new();
  files.insert(
    String::from("bad.alg"),
    String::from("Algo\n    x: int\nBegin\n    x <-- 1 / 0\nEnd\n"),
  );

  let daups = Daups::builder()
    .console(Capture::new(&[]))
    .loader(MapLoader { files })
    .build();

  let source = "Algo\nBegin\n    run \"bad.alg\"\nEnd\n";
  let error = daups.run(source).expect_err("the child script fails");
  let report = error.report("parent.alg", source, false);
  assert!(
    report.contains("Failed to finish executing script \"bad.alg\""),
    "{report}"
  );
  assert!(report.contains("Division by 0"), "{report}");
}

#[test]
fn division_by_zero_is_reported_at_the_divisor() {
  let source = "Algo\n    x: int\nBegin\n    x <-- 10 / 0\nEnd\n";
  let daups = Daups::builder().console(Capture::new(&[])).build();
  let error = daups.run(source).expect_err("division by zero fails");
  let report = error.report("div.alg", source, false);
  assert!(report.contains("RunTime error: Division by 0"), "{report}");
  assert!(report.contains("File div.alg, line 4"), "{report}");
}
