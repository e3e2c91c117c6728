//! CLI command handlers

pub mod lint;
pub mod mcp;
