//! Suggested-fix export handling.
//!
//! Each clang-tidy invocation writes its fixes to its own YAML file inside a
//! shared scratch directory. After the pool drains, those files are merged
//! into one document that `clang-apply-replacements` understands.

mod export_dir;
mod merge;

pub use export_dir::{reserve_fix_file, FixExportDir};
pub use merge::{
    collect_fix_files, load_fix_document, merge_documents, merge_replacement_files, MergeOutcome,
};

use serde::{Deserialize, Serialize};

/// One replacement record. The applier owns its schema, so records are
/// carried through untouched.
pub type FixReplacement = serde_yaml::Value;

/// A clang-tidy fix export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixDocument {
    /// Required by the applier's schema but never read by it.
    #[serde(rename = "MainSourceFile", default)]
    pub main_source_file: String,
    #[serde(rename = "Diagnostics", default)]
    pub diagnostics: Vec<FixReplacement>,
}

impl FixDocument {
    /// A merged document: the placeholder source file plus `replacements`.
    #[must_use]
    pub fn with_replacements(replacements: Vec<FixReplacement>) -> Self {
        Self {
            main_source_file: String::new(),
            diagnostics: replacements,
        }
    }
}
