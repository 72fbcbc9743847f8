//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-invocation execution limits

pub mod execution_params;

pub use execution_params::ExecutionParams;
