//! Scenario domain module
//!
//! A [`Scenario`] is executed as a best-effort checklist: phases run strictly
//! in declared order and a failing phase never stops the ones after it.

pub mod entities;

pub use entities::{Phase, Scenario};
