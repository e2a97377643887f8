//! CLI command implementations.

pub mod collect;
pub mod config;
pub mod get;
