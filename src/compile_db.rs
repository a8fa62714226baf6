// src/compile_db.rs
//! Compilation database lookup and loading.

use crate::error::{Result, TidyError};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File name clang tooling looks for.
pub const DB_FILE: &str = "compile_commands.json";

#[derive(Debug, Deserialize)]
struct CompileCommand {
    directory: PathBuf,
    file: PathBuf,
}

/// Walks from `start` up to the filesystem root and returns the first
/// directory containing `compile_commands.json`.
///
/// # Errors
/// Returns `CompileDbNotFound` if no ancestor holds a database.
pub fn find_compilation_database(start: &Path) -> Result<PathBuf> {
    let start = fs::canonicalize(start).map_err(|e| TidyError::io(e, start))?;
    let found = start
        .ancestors()
        .find(|dir| dir.join(DB_FILE).is_file())
        .map(Path::to_path_buf);
    found.ok_or(TidyError::CompileDbNotFound { start })
}

/// Reads the database in `build_path` and returns every entry's file as an
/// absolute path, in database order.
///
/// # Errors
/// Returns error if the database cannot be read or is not valid JSON.
pub fn load_files(build_path: &Path) -> Result<Vec<PathBuf>> {
    let path = build_path.join(DB_FILE);
    let content = fs::read_to_string(&path).map_err(|e| TidyError::io(e, &path))?;
    parse_files(&content).map_err(|source| TidyError::CompileDb { path, source })
}

/// Parses database JSON text into absolute file paths.
///
/// # Errors
/// Returns the JSON error for malformed input.
pub fn parse_files(content: &str) -> std::result::Result<Vec<PathBuf>, serde_json::Error> {
    let entries: Vec<CompileCommand> = serde_json::from_str(content)?;
    Ok(entries
        .into_iter()
        .map(|entry| make_absolute(&entry.file, &entry.directory))
        .collect())
}

/// Joins a relative `file` onto `directory`. Absolute paths pass through.
#[must_use]
pub fn make_absolute(file: &Path, directory: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        normalize_lexically(&directory.join(file))
    }
}

/// Resolves `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Selects which database entries get analysed.
#[derive(Debug, Clone)]
pub struct FileFilter {
    re: Regex,
}

impl FileFilter {
    /// Wraps the alternation built by `RunConfig::file_regex`. A path is kept
    /// when the regex matches anywhere in it.
    #[must_use]
    pub fn from_regex(re: Regex) -> Self {
        Self { re }
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.re.is_match(&path.to_string_lossy())
    }

    /// Keeps the matching paths, preserving order.
    #[must_use]
    pub fn apply(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    #[test]
    fn relative_entries_are_joined_and_normalized() {
        let got = make_absolute(Path::new("../src/./a.cpp"), Path::new("/project/build"));
        assert_eq!(got, PathBuf::from("/project/src/a.cpp"));
    }

    #[test]
    fn absolute_entries_pass_through() {
        let got = make_absolute(Path::new("/abs/b.cpp"), Path::new("/project/build"));
        assert_eq!(got, PathBuf::from("/abs/b.cpp"));
    }

    #[test]
    fn parse_keeps_database_order_and_ignores_extra_keys() {
        let json = r#"[
            {"directory": "/p", "file": "b.cpp", "command": "c++ -c b.cpp"},
            {"directory": "/p", "file": "/x/a.cpp", "arguments": ["c++"]}
        ]"#;
        let files = parse_files(json).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("/p/b.cpp"), PathBuf::from("/x/a.cpp")]
        );
    }

    #[test]
    fn malformed_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DB_FILE), "{not json").unwrap();
        assert!(matches!(
            load_files(dir.path()),
            Err(TidyError::CompileDb { .. })
        ));
    }

    #[test]
    fn database_found_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DB_FILE), "[]").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = find_compilation_database(&nested).unwrap();
        assert_eq!(found, fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn filter_searches_anywhere_in_path() {
        let config = RunConfig {
            files: vec!["kwsys".to_string(), "\\.cxx$".to_string()],
            ..RunConfig::default()
        };
        let filter = FileFilter::from_regex(config.file_regex().unwrap());
        let kept = filter.apply(vec![
            PathBuf::from("/project/Source/kwsys/Base64.c"),
            PathBuf::from("/project/Source/other/main.c"),
            PathBuf::from("/project/test.cxx"),
        ]);
        assert_eq!(
            kept,
            vec![
                PathBuf::from("/project/Source/kwsys/Base64.c"),
                PathBuf::from("/project/test.cxx"),
            ]
        );
    }

    #[test]
    fn default_patterns_match_everything() {
        let filter = FileFilter::from_regex(RunConfig::default().file_regex().unwrap());
        assert!(filter.matches(Path::new("/any/file.c")));
    }
}
