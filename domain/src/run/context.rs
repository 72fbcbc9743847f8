//! Run context (Value Object)

use super::template::{substitute, tokenize_args};

/// Substitution values supplied by the user for one invocation.
///
/// Either value may be empty; an empty value still replaces its placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub target: String,
    pub module: String,
}

impl RunContext {
    pub fn new(target: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            module: module.into(),
        }
    }

    /// Substitute this context into `template` and split it into arguments.
    pub fn materialize(&self, template: &str) -> Vec<String> {
        tokenize_args(&substitute(template, self))
    }
}
