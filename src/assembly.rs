//! Greedy shortest-superstring assembly.
//!
//! Every directed pair of distinct reads is scored by its exact suffix/prefix
//! overlap and kept in a [`CandidatePool`]. Each round pops the best pair,
//! purges every candidate touching either endpoint, merges the target onto the
//! source, retires the target and rescores the survivor against the rest. The
//! pool only ever holds candidates whose overlap matches the current contents
//! of both endpoints.

use log::{debug, info, trace};
use serde::Serialize;

use crate::candidates::{Candidate, CandidatePool};
use crate::error::AssemblyError;
use crate::reads::{dedup_reads, DedupMode, ReadSet};

/// Options that govern a greedy assembly run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AssemblyConfig {
    /// Duplicate handling applied before any scoring.
    pub dedup: DedupMode,
}

/// One round of the greedy loop: `consumed` was merged onto `survivor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeEvent {
    pub survivor: usize,
    pub consumed: usize,
    pub overlap: usize,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    /// Final contig.
    pub sequence: String,
    /// Merge trace in the order the rounds ran.
    pub merges: Vec<MergeEvent>,
    /// Reads supplied, duplicates included.
    pub input_reads: usize,
    /// Reads left after deduplication.
    pub distinct_reads: usize,
}

impl Assembly {
    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }

    /// Sum of overlaps collapsed by all merges.
    pub fn total_overlap(&self) -> usize {
        self.merges.iter().map(|m| m.overlap).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GreedyAssembler {
    config: AssemblyConfig,
}

impl GreedyAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, reads: Vec<String>) -> Result<Assembly, AssemblyError> {
        let input_reads = reads.len();
        let reads = dedup_reads(reads, self.config.dedup);
        if reads.is_empty() {
            return Err(AssemblyError::EmptyInput);
        }
        let distinct_reads = reads.len();
        info!(
            "Assembling {} distinct reads ({} supplied, dedup {:?})",
            distinct_reads, input_reads, self.config.dedup
        );

        let mut reads = ReadSet::new(reads);
        let mut pool = seed_pool(&reads);
        debug!("Seeded candidate pool with {} pairs", pool.len());

        let n = reads.len();
        let mut merges = Vec::with_capacity(n.saturating_sub(1));
        let mut last = 0usize;

        while let Some(best) = pool.pop_best() {
            let Candidate {
                overlap,
                source,
                target,
            } = best;
            trace!("Best candidate {source} -> {target} overlapping {overlap}");

            for k in 0..n {
                discard(&reads, &mut pool, target, k);
                discard(&reads, &mut pool, k, target);
                discard(&reads, &mut pool, k, source);
                discard(&reads, &mut pool, source, k);
            }

            if !reads.absorb(source, target, overlap) {
                debug_assert!(false, "popped candidate {source} -> {target} touches a retired read");
                continue;
            }

            for k in 0..n {
                offer(&reads, &mut pool, k, source);
                offer(&reads, &mut pool, source, k);
            }

            merges.push(MergeEvent {
                survivor: source,
                consumed: target,
                overlap,
            });
            last = source;
            debug!(
                "Merged read {target} into {source} (overlap {overlap}); {} reads alive, {} candidates",
                reads.alive_count(),
                pool.len()
            );
        }

        let sequence = reads.into_read(last).unwrap_or_default();
        info!(
            "Assembled {} bp contig from {} merges",
            sequence.len(),
            merges.len()
        );

        Ok(Assembly {
            sequence,
            merges,
            input_reads,
            distinct_reads,
        })
    }
}

/// Convenience wrapper using the default configuration.
pub fn assemble(reads: Vec<String>) -> Result<Assembly, AssemblyError> {
    GreedyAssembler::default().assemble(reads)
}

fn seed_pool(reads: &ReadSet) -> CandidatePool {
    let mut pool = CandidatePool::new();
    for i in 0..reads.len() {
        for j in 0..reads.len() {
            offer(reads, &mut pool, i, j);
        }
    }
    pool
}

fn offer(reads: &ReadSet, pool: &mut CandidatePool, source: usize, target: usize) {
    if let Some(candidate) = reads.candidate(source, target) {
        pool.insert(candidate);
    }
}

fn discard(reads: &ReadSet, pool: &mut CandidatePool, source: usize, target: usize) {
    if let Some(candidate) = reads.candidate(source, target) {
        pool.remove(&candidate);
    }
}
