//! CLI command handlers

pub mod check;
pub mod probe;
pub mod serve;
