//! Northern - Companies House adapters
//!
//! A registry lookup endpoint for company profiles, and an MCP tool server
//! that forwards searches and debug fetches to upstream HTTP services.

pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod registry;
pub mod tools;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{NorthernError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
