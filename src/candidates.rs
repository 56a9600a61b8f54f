//! Ordered pool of directed overlap candidates.

use std::collections::BTreeSet;

use serde::Serialize;

/// A directed claim that the suffix of `source` overlaps the prefix of `target`.
///
/// Field order defines the ordering: overlap first, then source index, then
/// target index. The pool pops the greatest candidate, so ties on overlap go
/// to the higher source index and then the higher target index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Candidate {
    pub overlap: usize,
    pub source: usize,
    pub target: usize,
}

impl Candidate {
    pub fn new(overlap: usize, source: usize, target: usize) -> Self {
        Self {
            overlap,
            source,
            target,
        }
    }
}

/// Set of unique candidates with max-extraction.
#[derive(Debug, Default, Clone)]
pub struct CandidatePool {
    entries: BTreeSet<Candidate>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the exact candidate was already present.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        self.entries.insert(candidate)
    }

    /// Erase an exact candidate. Absent candidates are ignored.
    pub fn remove(&mut self, candidate: &Candidate) -> bool {
        self.entries.remove(candidate)
    }

    /// Remove and return the greatest candidate.
    pub fn pop_best(&mut self) -> Option<Candidate> {
        self.entries.pop_last()
    }

    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.entries.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates from best to worst.
    pub fn iter_best_first(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter().rev()
    }
}
