use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bio::alignment::distance::levenshtein;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::Serialize;

use superstring::{
    read_sequences, read_tokens, Assembly, AssemblyConfig, DedupMode, GreedyAssembler,
    MergeEvent,
};

/// Greedy shortest common superstring assembler.
///
/// Reads whitespace-separated tokens from stdin (or a FASTA/FASTQ/token file)
/// and prints the assembled contig.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file; stdin when absent or "-". FASTA/FASTQ detected by extension, .gz accepted
    input: Option<PathBuf>,

    /// How duplicate reads are collapsed before assembly
    #[arg(long, value_enum, default_value_t = DedupArg::Global)]
    dedup: DedupArg,

    /// Optional output FASTA path for the assembled sequence
    #[arg(long)]
    output_fasta: Option<PathBuf>,

    /// Wrap assembled FASTA lines to this width (0 = no-wrap)
    #[arg(long, default_value_t = 60)]
    fasta_line_width: usize,

    /// Optional JSON file receiving the merge trace
    #[arg(long)]
    merge_log: Option<PathBuf>,

    /// Optional reference used for post-assembly confirmation
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Verbose/info output (default: quiet)
    #[arg(long, short = 'v', alias = "info")]
    verbose: bool,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Trace output
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DedupArg {
    /// Drop every repeat of an earlier read
    Global,
    /// Drop only repeats directly following an identical read
    Consecutive,
}

impl From<DedupArg> for DedupMode {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::Global => DedupMode::Global,
            DedupArg::Consecutive => DedupMode::Consecutive,
        }
    }
}

#[derive(Serialize)]
struct MergeLog<'a> {
    config: AssemblyConfig,
    input_reads: usize,
    distinct_reads: usize,
    merge_count: usize,
    total_overlap: usize,
    contig_length: usize,
    merges: &'a [MergeEvent],
}

fn main() {
    let args = Args::parse();
    let log_level = if args.trace {
        "trace"
    } else if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "error"
    };
    env_logger::Builder::new().parse_filters(log_level).init();

    let result = run_pipeline(&args).and_then(|assembled| {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{assembled}")?;
        stdout.flush()?;
        Ok(())
    });
    if let Err(error) = result {
        eprintln!("Assembly failed: {error:?}");
        std::process::exit(1);
    }
}

fn load_reads(input: Option<&Path>) -> Result<Vec<String>> {
    match input {
        Some(path) if path != Path::new("-") => read_sequences(path)
            .with_context(|| format!("Failed to parse reads from {}", path.display())),
        _ => read_tokens(io::stdin().lock()).context("Failed to read tokens from stdin"),
    }
}

fn load_reference(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        bail!("Reference path {} does not exist", path.display());
    }
    let sequences = read_sequences(path)
        .with_context(|| format!("Failed to parse reference from {}", path.display()))?;
    if sequences.is_empty() {
        return Ok(None);
    }
    Ok(Some(sequences.concat()))
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_fasta<W: Write>(out: &mut W, header: &str, sequence: &str, line_width: usize) -> Result<()> {
    writeln!(out, ">{header}")?;
    if line_width == 0 || sequence.is_empty() {
        writeln!(out, "{sequence}")?;
        return Ok(());
    }
    // Wrap on characters so multi-byte reads never split mid-symbol.
    let symbols: Vec<char> = sequence.chars().collect();
    for line in symbols.chunks(line_width) {
        let line: String = line.iter().collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_merge_log(path: &Path, config: AssemblyConfig, assembly: &Assembly) -> Result<()> {
    create_parent_dirs(path)?;
    let log = MergeLog {
        config,
        input_reads: assembly.input_reads,
        distinct_reads: assembly.distinct_reads,
        merge_count: assembly.merge_count(),
        total_overlap: assembly.total_overlap(),
        contig_length: assembly.sequence.len(),
        merges: &assembly.merges,
    };
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    writeln!(file, "{}", serde_json::to_string_pretty(&log)?)?;
    Ok(())
}

/// Contigs or references longer than this skip the quadratic edit-distance check.
const MAX_DISTANCE_LEN: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceCheck {
    Exact,
    Distance(usize),
    Skipped,
}

fn check_reference(assembled: &str, reference_seq: &str) -> ReferenceCheck {
    if assembled == reference_seq {
        ReferenceCheck::Exact
    } else if assembled.len().max(reference_seq.len()) <= MAX_DISTANCE_LEN {
        ReferenceCheck::Distance(levenshtein(assembled.as_bytes(), reference_seq.as_bytes()) as usize)
    } else {
        ReferenceCheck::Skipped
    }
}

fn log_reference_check(check: ReferenceCheck, assembled_len: usize, reference_len: usize) {
    match check {
        ReferenceCheck::Exact => info!(
            "Assembled contig matches the reference sequence exactly ({assembled_len} bp)."
        ),
        ReferenceCheck::Distance(distance) => info!(
            "Edit distance to reference (len {assembled_len} vs {reference_len}): {distance}"
        ),
        ReferenceCheck::Skipped => info!(
            "Reference check skipped: contig {assembled_len} bp or reference {reference_len} bp is over {MAX_DISTANCE_LEN} bp."
        ),
    }
}

fn run_pipeline(args: &Args) -> Result<String> {
    let reads = load_reads(args.input.as_deref())?;
    info!("Loaded {} reads", reads.len());

    let config = AssemblyConfig {
        dedup: args.dedup.into(),
    };
    let assembly = GreedyAssembler::new(config)
        .assemble(reads)
        .context("Greedy assembly failed")?;
    debug!("Merge trace: {:?}", assembly.merges);

    if let Some(path) = &args.merge_log {
        write_merge_log(path, config, &assembly)?;
        info!("Merge trace written to {}", path.display());
    }

    if let Some(path) = &args.output_fasta {
        create_parent_dirs(path)?;
        let mut fh =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let header = format!(
            "assembled_from_{}",
            args.input
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "stdin".to_string())
        );
        write_fasta(&mut fh, &header, &assembly.sequence, args.fasta_line_width)?;
        info!("Assembled FASTA written to {}", path.display());
    }

    if let Some(path) = &args.reference {
        if let Some(reference_seq) = load_reference(path)? {
            let check = check_reference(&assembly.sequence, &reference_seq);
            log_reference_check(check, assembly.sequence.len(), reference_seq.len());
        }
    }

    Ok(assembly.sequence)
}
