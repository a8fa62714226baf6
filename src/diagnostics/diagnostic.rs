//! A single diagnostic reconstructed from clang-tidy output.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Severities that open a new diagnostic. `note` is absent because
/// notes are context of the diagnostic before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            other => Err(format!("not a diagnostic severity: {other}")),
        }
    }
}

/// SHA-256 of a diagnostic's canonical text, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hashes `text` exactly as given. No line-ending normalization:
    /// two diagnostics are the same only if their text is byte-identical.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finding: location, severity, message and any context lines that
/// followed the header (code excerpts, carets, notes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    path: String,
    line: u32,
    column: u32,
    severity: Severity,
    message: String,
    additional: Vec<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        line: u32,
        column: u32,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            severity,
            message: message.into(),
            additional: Vec::new(),
        }
    }

    /// Appends one context line. Only the parser calls this, and only while
    /// the diagnostic is still in flight.
    pub fn add_additional_line(&mut self, line: impl Into<String>) {
        self.additional.push(line.into());
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn additional_lines(&self) -> &[String] {
        &self.additional
    }

    /// The header line as clang-tidy printed it.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{}:{}:{}: {}: {}",
            self.path, self.line, self.column, self.severity, self.message
        )
    }

    /// Header plus every context line, joined by `\n`.
    #[must_use]
    pub fn canonical_text(&self) -> String {
        let mut text = self.header();
        for line in &self.additional {
            text.push('\n');
            text.push_str(line);
        }
        text
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.canonical_text())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}
