//! Process execution: spawning tools and teeing their output.

mod runner;
mod tee;

pub use runner::TokioProcessRunner;
pub use tee::{StreamKind, drain_lines};
