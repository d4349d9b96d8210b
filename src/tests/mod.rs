#[macro_use]
pub mod common;

mod arrays;
mod cancel;
mod functions;
mod operators;
