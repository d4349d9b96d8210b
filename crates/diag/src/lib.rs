pub mod report;
mod snippet;

pub use report::{EmitError, Report};
pub use snippet::Snippet;
