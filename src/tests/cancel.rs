use super::common::StopConsole;
use crate::{Daups, Error};

#[test]
fn raising_the_stop_flag_cancels_a_hot_loop() {
  let source = "Algo\n    x: int\nBegin\n    x <-- 0\n    while True\n        x <-- x + 1\nEnd\n";

  let daups = Daups::builder().console(StopConsole::new(10)).build();
  daups
    .console::<StopConsole>()
    .expect("stop console is installed")
    .arm(daups.stop_flag());

  let error = daups.run(source).expect_err("the loop must be cancelled");
  match &error {
    Error::Runtime(e) => assert_eq!(e.message, "Execution stopped by user"),
    Error::Syntax(e) => panic!("unexpected syntax error: {e}"),
  }
}

#[test]
fn cancellation_unwinds_nested_calls() {
  let source = "\
function spin(n: int): int
Begin
    while True
        n <-- n + 1
    return n
End

Algo
    y: int
Begin
    y <-- spin(0)
End
";

  let daups = Daups::builder().console(StopConsole::new(10)).build();
  daups
    .console::<StopConsole>()
    .expect("stop console is installed")
    .arm(daups.stop_flag());

  let error = daups.run(source).expect_err("the call must be cancelled");
  let report = error.report("spin.alg", source, false);
  assert!(report.contains("Execution stopped by user"), "{report}");
  assert!(report.contains("in spin"), "{report}");
  assert!(report.contains("Traceback (most recent call last):"), "{report}");
}

#[test]
fn the_flag_is_cleared_between_runs() {
  let source = "Algo\n    x: int\nBegin\n    x <-- 1\nEnd\n";

  let daups = Daups::default();
  daups.stop_flag().stop();
  // `run` clears any stale cancellation before starting
  daups.run(source).expect("a fresh run is not cancelled");
}
