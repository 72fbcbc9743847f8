//! Run-time values: substitution context, argument templating and outcomes.

pub mod context;
pub mod outcome;
pub mod template;
