//! Read collection with stable indices and explicit retirement.

use std::collections::HashSet;

use serde::Serialize;

use crate::candidates::Candidate;
use crate::overlap::{merge_into, suffix_prefix_overlap};

/// How exact duplicate reads are collapsed before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupMode {
    /// Keep the first occurrence of every distinct read, in input order.
    #[default]
    Global,
    /// Collapse only runs of adjacent identical reads.
    Consecutive,
}

/// Drop duplicate reads according to `mode`, preserving first-occurrence order.
pub fn dedup_reads(reads: Vec<String>, mode: DedupMode) -> Vec<String> {
    match mode {
        DedupMode::Global => {
            let mut seen: HashSet<String> = HashSet::with_capacity(reads.len());
            reads
                .into_iter()
                .filter(|read| seen.insert(read.clone()))
                .collect()
        }
        DedupMode::Consecutive => {
            let mut reads = reads;
            reads.dedup();
            reads
        }
    }
}

/// State of one index in a [`ReadSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadSlot {
    Alive(String),
    /// Content was merged into another read; the index is never reused.
    Retired,
}

impl ReadSlot {
    pub fn as_alive(&self) -> Option<&str> {
        match self {
            Self::Alive(seq) => Some(seq.as_str()),
            Self::Retired => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive(_))
    }
}

/// Fixed-size collection of reads addressed by stable index.
#[derive(Debug, Clone)]
pub struct ReadSet {
    slots: Vec<ReadSlot>,
    alive: usize,
}

impl ReadSet {
    pub fn new(reads: Vec<String>) -> Self {
        let alive = reads.len();
        Self {
            slots: reads.into_iter().map(ReadSlot::Alive).collect(),
            alive,
        }
    }

    /// Total number of slots, retired ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).and_then(ReadSlot::as_alive)
    }

    pub fn slot(&self, idx: usize) -> Option<&ReadSlot> {
        self.slots.get(idx)
    }

    /// Score the directed pair `source -> target` on current contents.
    ///
    /// `None` for self pairs and for pairs touching a retired or unknown index.
    pub fn candidate(&self, source: usize, target: usize) -> Option<Candidate> {
        if source == target {
            return None;
        }
        let suffix_read = self.get(source)?;
        let prefix_read = self.get(target)?;
        Some(Candidate::new(
            suffix_prefix_overlap(suffix_read, prefix_read),
            source,
            target,
        ))
    }

    /// Append `consumed` onto `survivor` past `overlap_len` and retire `consumed`.
    ///
    /// Returns `false` without touching anything if either read is not alive
    /// or the indices coincide.
    pub fn absorb(&mut self, survivor: usize, consumed: usize, overlap_len: usize) -> bool {
        if survivor == consumed || self.get(survivor).is_none() || self.get(consumed).is_none() {
            return false;
        }
        let ReadSlot::Alive(tail) = std::mem::replace(&mut self.slots[consumed], ReadSlot::Retired)
        else {
            return false;
        };
        if let ReadSlot::Alive(contig) = &mut self.slots[survivor] {
            merge_into(contig, &tail, overlap_len);
        }
        self.alive -= 1;
        true
    }

    /// Consume the set, returning the content at `idx` if it is still alive.
    pub fn into_read(mut self, idx: usize) -> Option<String> {
        if idx >= self.slots.len() {
            return None;
        }
        match std::mem::replace(&mut self.slots[idx], ReadSlot::Retired) {
            ReadSlot::Alive(seq) => Some(seq),
            ReadSlot::Retired => None,
        }
    }
}
