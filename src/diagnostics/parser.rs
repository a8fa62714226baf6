//! Stateful parser for clang-tidy's textual output.
//!
//! The parser walks the output line by line. A header line
//! (`path:line:col: error|warning: message`) opens a diagnostic; every line
//! after it that is not another header is context of that diagnostic. Lines
//! before the first header are noise and dropped.

use super::dedup::DeduplicationStore;
use super::diagnostic::{Diagnostic, Severity};
use regex::Regex;
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+):(\d+):(\d+): (error|warning): (.*)$")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Parses a header line into a fresh diagnostic. `None` means the line is
/// context or noise, including headers whose numbers overflow.
#[must_use]
pub fn parse_header(line: &str) -> Option<Diagnostic> {
    let caps = HEADER_RE.captures(line)?;
    let path = caps.get(1)?.as_str();
    let row = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let column = caps.get(3)?.as_str().parse::<u32>().ok()?;
    let severity = caps.get(4)?.as_str().parse::<Severity>().ok()?;
    let message = caps.get(5)?.as_str();
    Some(Diagnostic::new(path, row, column, severity, message))
}

/// Where the parser is within the stream.
#[derive(Debug, Default)]
pub enum ParserState {
    #[default]
    Idle,
    InFlight(Diagnostic),
}

/// Collects the unique diagnostics of one invocation's output.
///
/// The dedup store lives as long as the parser; [`reset`](Self::reset) only
/// starts a new session, so output repeated by a later invocation yields
/// nothing new.
#[derive(Debug, Default)]
pub struct DiagnosticParser {
    state: ParserState,
    store: DeduplicationStore,
    unique: Vec<Diagnostic>,
}

impl DiagnosticParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole captured output and finalizes the last diagnostic.
    pub fn parse_str(&mut self, input: &str) {
        self.parse_lines(input.lines());
    }

    /// Parses a sequence of lines (without line terminators) and finalizes
    /// the last diagnostic.
    pub fn parse_lines<'a, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.feed_line(line);
        }
        self.finish();
    }

    /// Advances the state machine by one line.
    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim_end();
        if let Some(diag) = parse_header(line) {
            self.finalize();
            self.state = ParserState::InFlight(diag);
            return;
        }
        if let ParserState::InFlight(current) = &mut self.state {
            current.add_additional_line(line);
        }
    }

    /// Flushes the in-flight diagnostic at end of stream.
    pub fn finish(&mut self) {
        self.finalize();
    }

    /// Starts a new session. An unfinished diagnostic is finalized first so
    /// its fingerprint reaches the store; the store itself is kept.
    pub fn reset(&mut self) {
        self.finalize();
        self.unique.clear();
    }

    /// Unique diagnostics of the current session, in order of appearance.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.unique
    }

    /// Hands the session's diagnostics to the caller and empties the list.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.unique)
    }

    #[must_use]
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ParserState::Idle)
    }

    #[must_use]
    pub fn store(&self) -> &DeduplicationStore {
        &self.store
    }

    fn finalize(&mut self) {
        if let ParserState::InFlight(diag) = std::mem::take(&mut self.state) {
            if self.store.insert_fingerprint(diag.fingerprint()) {
                self.unique.push(diag);
            }
        }
    }
}
