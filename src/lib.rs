pub mod aggregate;
pub mod cli;
pub mod compile_db;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exit;
pub mod fixes;
pub mod interrupt;
pub mod invocation;
pub mod logging;
pub mod pool;
pub mod session;
pub mod types;
