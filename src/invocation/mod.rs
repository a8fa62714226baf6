//! Building and running clang-tidy (and clang-apply-replacements) commands.

mod builder;
mod process;
pub mod tools;

pub use builder::{InvocationBuilder, TidyInvocation};
pub use process::{run_captured, Invoker, ProcessInvoker};
