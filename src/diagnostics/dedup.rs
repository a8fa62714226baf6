//! Run-wide set of diagnostic fingerprints.

use super::diagnostic::Fingerprint;
use std::collections::HashSet;

/// Remembers every diagnostic already emitted during the run.
///
/// The set only grows. There is no eviction and no removal, so the same text
/// is suppressed no matter how many invocations later it shows up again.
#[derive(Debug, Default)]
pub struct DeduplicationStore {
    seen: HashSet<Fingerprint>,
}

impl DeduplicationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `text` was not seen before (the caller should emit
    /// it) and records it. Returns `false` without side effects otherwise.
    pub fn insert_and_query(&mut self, text: &str) -> bool {
        self.insert_fingerprint(Fingerprint::of(text))
    }

    /// Same as [`insert_and_query`](Self::insert_and_query) for a
    /// precomputed fingerprint.
    pub fn insert_fingerprint(&mut self, fp: Fingerprint) -> bool {
        self.seen.insert(fp)
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(&Fingerprint::of(text))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
