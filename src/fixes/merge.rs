//! Merging of per-file fix documents into one document for the applier.

use super::{FixDocument, FixReplacement};
use crate::error::{Result, TidyError};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Fix files found in the export directory.
    pub documents: usize,
    /// Files that were empty or held no document.
    pub skipped: usize,
    /// Replacement records written to the merged document.
    pub replacements: usize,
}

/// Lists the `*.yaml` files directly inside `dir`, in file-name order.
///
/// # Errors
/// Returns error if the directory cannot be read.
pub fn collect_fix_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_yaml = entry.path().extension().is_some_and(|ext| ext == "yaml");
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Loads one fix document. Empty files and YAML null yield `None`.
///
/// # Errors
/// Returns error if the file cannot be read or is not a fix document.
pub fn load_fix_document(path: &Path) -> Result<Option<FixDocument>> {
    let content = fs::read_to_string(path).map_err(|e| TidyError::io(e, path))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str::<Option<FixDocument>>(&content).map_err(|source| TidyError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Concatenates the replacement lists of `docs`, in order. `None` when
/// there is nothing to apply.
#[must_use]
pub fn merge_documents<I>(docs: I) -> Option<FixDocument>
where
    I: IntoIterator<Item = FixDocument>,
{
    let merged: Vec<FixReplacement> = docs.into_iter().flat_map(|d| d.diagnostics).collect();
    if merged.is_empty() {
        None
    } else {
        Some(FixDocument::with_replacements(merged))
    }
}

/// Merges every fix document in `dir` into `mergefile`.
///
/// With no replacements at all, `mergefile` is left empty rather than
/// holding a document with an empty list.
///
/// # Errors
/// Returns error on the first unreadable or malformed document, or if the
/// output cannot be written.
pub fn merge_replacement_files(dir: &Path, mergefile: &Path) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();
    let mut docs = Vec::new();

    for file in collect_fix_files(dir)? {
        outcome.documents += 1;
        match load_fix_document(&file)? {
            Some(doc) => docs.push(doc),
            None => {
                debug!("skipping empty fix document {}", file.display());
                outcome.skipped += 1;
            }
        }
    }

    match merge_documents(docs) {
        Some(doc) => {
            outcome.replacements = doc.diagnostics.len();
            let text = serde_yaml::to_string(&doc).map_err(|source| TidyError::Yaml {
                path: mergefile.to_path_buf(),
                source,
            })?;
            fs::write(mergefile, text).map_err(|e| TidyError::io(e, mergefile))?;
        }
        None => {
            File::create(mergefile).map_err(|e| TidyError::io(e, mergefile))?;
        }
    }

    Ok(outcome)
}
