//! Tool domain module
//!
//! - [`Tool`]: one external executable and its catalog metadata
//! - [`ToolCatalog`]: the read-only set of tools, looked up by name
//!   without regard to case

pub mod catalog;
pub mod entities;

pub use catalog::ToolCatalog;
pub use entities::Tool;
