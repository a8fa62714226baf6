//! Diagnostic reconstruction and cross-invocation deduplication.

mod dedup;
mod diagnostic;
mod parser;

pub use dedup::DeduplicationStore;
pub use diagnostic::{Diagnostic, Fingerprint, Severity};
pub use parser::{parse_header, DiagnosticParser, ParserState};
