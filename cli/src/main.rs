use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use daups::{Daups, FsLoader};

#[derive(Debug, Parser)]
#[clap(name = "daups", version)]
struct App {
  /// Path to the program to run.
  #[clap(value_name = "FILE")]
  file: PathBuf,
}

fn main() -> anyhow::Result<()> {
  let app = App::parse();

  let name = app.file.display().to_string();
  let source = std::fs::read_to_string(&app.file)
    .with_context(|| format!("Failed to read file at {name}"))?;

  let daups = Daups::builder().loader(FsLoader).build();
  if let Err(error) = daups.run(&source) {
    let color = std::io::stderr().is_terminal();
    eprintln!("{}", error.report(&name, &source, color));
    anyhow::bail!("Failed to run {name}");
  }

  Ok(())
}
