//! Synthetic error-free read generator for exercising the assembler.
//!
//! Samples fixed-length substrings of a random ACGT genome and writes them as
//! whitespace-separated tokens (default) or FASTQ with constant quality.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "simulate_reads")]
#[command(about = "Generate error-free reads sampled from a random genome")]
struct Args {
    /// Genome length in bases
    #[arg(long, default_value_t = 1000)]
    genome_len: usize,

    /// Length of every sampled read
    #[arg(long, default_value_t = 150)]
    read_len: usize,

    /// Number of reads to sample
    #[arg(long, default_value_t = 100)]
    reads: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit FASTQ records instead of bare tokens
    #[arg(long)]
    fastq: bool,

    /// Output path for the reads (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Optional path receiving the genome as a single line
    #[arg(long)]
    genome_out: Option<PathBuf>,
}

fn random_genome(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let bases = b"ACGT";
    (0..len).map(|_| bases[rng.gen_range(0..4)]).collect()
}

fn sample_read<'a>(rng: &mut StdRng, genome: &'a [u8], read_len: usize) -> &'a [u8] {
    let start = rng.gen_range(0..=genome.len() - read_len);
    &genome[start..start + read_len]
}

fn write_reads<W: Write>(out: &mut W, reads: &[&[u8]], fastq: bool) -> io::Result<()> {
    for (idx, read) in reads.iter().enumerate() {
        if fastq {
            writeln!(out, "@{idx}")?;
            out.write_all(read)?;
            writeln!(out, "\n+")?;
            out.write_all(&vec![b'I'; read.len()])?;
            writeln!(out)?;
        } else {
            out.write_all(read)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.read_len == 0 {
        bail!("--read-len must be positive");
    }
    if args.read_len > args.genome_len {
        bail!(
            "--read-len {} exceeds --genome-len {}",
            args.read_len,
            args.genome_len
        );
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let genome = random_genome(&mut rng, args.genome_len);
    let reads: Vec<&[u8]> = (0..args.reads)
        .map(|_| sample_read(&mut rng, &genome, args.read_len))
        .collect();

    if let Some(path) = &args.genome_out {
        let mut fh =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        fh.write_all(&genome)?;
        writeln!(fh)?;
    }

    match &args.output {
        Some(path) => {
            let fh = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_reads(&mut BufWriter::new(fh), &reads, args.fastq)?;
        }
        None => write_reads(&mut io::stdout().lock(), &reads, args.fastq)?,
    }
    Ok(())
}
