//! Use cases (application services)

pub mod check_scenario;
pub mod edit_scenarios;
pub mod execute_phase;
pub mod run_scenario;
pub mod run_tool;

#[cfg(test)]
pub(crate) mod test_support;
