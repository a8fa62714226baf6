// src/cli/mod.rs
//! Command-line surface of `tidyfan`.

pub mod args;
pub mod dispatch;

pub use args::Cli;
