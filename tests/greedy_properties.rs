//! End-to-end properties of the greedy assembler.
//!
//! These tests verify that:
//! 1. Runs are deterministic for identical input
//! 2. Feeding repeated reads matches feeding the deduplicated list
//! 3. Exactly n - 1 merges happen for n distinct reads
//! 4. The contig contains every input read

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use superstring::{assemble, dedup_reads, suffix_prefix_overlap, DedupMode};

fn random_genome(rng: &mut StdRng, len: usize) -> String {
    let bases = ['A', 'C', 'G', 'T'];
    (0..len).map(|_| bases[rng.gen_range(0..4)]).collect()
}

fn tiled_reads(genome: &str, read_len: usize, step: usize) -> Vec<String> {
    let mut reads = Vec::new();
    let mut start = 0;
    while start + read_len <= genome.len() {
        reads.push(genome[start..start + read_len].to_string());
        start += step;
    }
    if start < genome.len() && genome.len() >= read_len {
        reads.push(genome[genome.len() - read_len..].to_string());
    }
    reads
}

fn random_reads(seed: u64, n: usize, max_len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(1..=max_len);
            (0..len)
                .map(|_| if rng.gen_bool(0.5) { 'a' } else { 'b' })
                .collect()
        })
        .collect()
}

#[test]
fn repeated_runs_agree() {
    let reads = random_reads(7, 30, 6);
    let first = assemble(reads.clone()).unwrap();
    let second = assemble(reads).unwrap();
    assert_eq!(first.sequence, second.sequence);
    assert_eq!(first.merges, second.merges);
}

#[test]
fn duplicates_do_not_change_the_result() {
    let distinct = vec![
        "ACGTT".to_string(),
        "GTTCA".to_string(),
        "TCAGG".to_string(),
        "CCCC".to_string(),
    ];
    let mut noisy = Vec::new();
    for read in &distinct {
        noisy.push(read.clone());
        noisy.push(read.clone());
    }
    noisy.push(distinct[0].clone());

    let clean = assemble(distinct.clone()).unwrap();
    let repeated = assemble(noisy).unwrap();
    assert_eq!(clean.sequence, repeated.sequence);
    assert_eq!(clean.merges, repeated.merges);
}

#[test]
fn performs_one_merge_per_retired_read() {
    for seed in 0..10 {
        let reads = random_reads(seed, 25, 5);
        let distinct = dedup_reads(reads.clone(), DedupMode::Global).len();
        let result = assemble(reads).unwrap();
        assert_eq!(result.distinct_reads, distinct);
        assert_eq!(result.merge_count(), distinct - 1);

        let mut consumed: Vec<usize> = result.merges.iter().map(|m| m.consumed).collect();
        consumed.sort_unstable();
        consumed.dedup();
        assert_eq!(consumed.len(), distinct - 1, "an index was retired twice");
    }
}

#[test]
fn contig_contains_every_read() {
    for seed in 0..5 {
        let reads = random_reads(100 + seed, 20, 7);
        let result = assemble(reads.clone()).unwrap();
        for read in &reads {
            assert!(result.sequence.contains(read.as_str()), "{read} missing");
        }
    }
}

#[test]
fn merge_overlaps_match_recorded_lengths() {
    let reads = random_reads(42, 15, 6);
    let result = assemble(reads.clone()).unwrap();
    let total_len: usize = dedup_reads(reads, DedupMode::Global)
        .iter()
        .map(String::len)
        .sum();
    assert_eq!(result.sequence.len(), total_len - result.total_overlap());
}

#[test]
fn reconstructs_tiled_genome() {
    let mut rng = StdRng::seed_from_u64(42);
    let genome = random_genome(&mut rng, 400);
    let reads = tiled_reads(&genome, 60, 20);

    let result = assemble(reads.clone()).unwrap();
    for read in &reads {
        assert!(result.sequence.contains(read.as_str()));
    }
    // Adjacent tiles share 40 bases; a random genome has no repeat that long.
    assert_eq!(result.sequence, genome);
    assert!(result.merges.iter().all(|m| m.overlap >= 40));
}

#[test]
fn disjoint_reads_concatenate() {
    let result = assemble(vec!["foo".to_string(), "bar".to_string()]).unwrap();
    assert_eq!(result.sequence.len(), 6);
    assert_eq!(suffix_prefix_overlap("foo", "bar"), 0);
    assert_eq!(result.sequence, "barfoo");
}
