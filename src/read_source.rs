//! Loading reads from token streams and sequence files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bio::io::{fasta, fastq};
use flate2::read::MultiGzDecoder;

/// Errors returned while loading reads.
#[derive(thiserror::Error, Debug)]
pub enum ReadSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed FASTA record: {0}")]
    Fasta(String),
    #[error("Malformed FASTQ record: {0}")]
    Fastq(String),
    #[error("Encountered non-UTF-8 symbols in read data")]
    NonUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    Fastq,
    Fasta,
    /// Whitespace-delimited tokens, one read per token.
    Tokens,
}

const GZIP_SUFFIXES: [&str; 2] = ["gz", "bgz"];

/// Lower-cased extensions of the file name, last one first (`r.FA.gz` -> `["gz", "fa"]`).
fn extensions(path: &Path) -> Vec<String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.rsplit('.')
        .take(name.matches('.').count())
        .map(str::to_owned)
        .collect()
}

pub fn is_gzip(path: &Path) -> bool {
    extensions(path)
        .first()
        .is_some_and(|ext| GZIP_SUFFIXES.contains(&ext.as_str()))
}

/// Guess the record format from the file name, ignoring one compression suffix.
pub fn infer_format(path: &Path) -> SequenceFormat {
    let exts = extensions(path);
    let skip = usize::from(is_gzip(path));
    match exts.get(skip).map(String::as_str) {
        Some("fastq" | "fq") => SequenceFormat::Fastq,
        Some("fasta" | "fa" | "fna") => SequenceFormat::Fasta,
        _ => SequenceFormat::Tokens,
    }
}

pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, ReadSourceError> {
    let file = File::open(path).map_err(|source| ReadSourceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Split everything the reader yields on whitespace; each token is one read.
pub fn read_tokens<R: Read>(mut reader: R) -> Result<Vec<String>, ReadSourceError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes).map_err(|_| ReadSourceError::NonUtf8)?;
    Ok(text.split_whitespace().map(str::to_owned).collect())
}

fn sequence_string(bytes: &[u8]) -> Result<String, ReadSourceError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ReadSourceError::NonUtf8)
}

/// Read FASTA records, keeping only their sequences. Empty records are skipped.
pub fn read_fasta<R: Read>(reader: R) -> Result<Vec<String>, ReadSourceError> {
    let mut sequences = Vec::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| ReadSourceError::Fasta(e.to_string()))?;
        if record.seq().is_empty() {
            continue;
        }
        sequences.push(sequence_string(record.seq())?);
    }
    Ok(sequences)
}

/// Read FASTQ records, keeping only their sequences. Qualities are dropped.
pub fn read_fastq<R: Read>(reader: R) -> Result<Vec<String>, ReadSourceError> {
    let mut sequences = Vec::new();
    for record in fastq::Reader::new(reader).records() {
        let record = record.map_err(|e| ReadSourceError::Fastq(e.to_string()))?;
        if record.seq().is_empty() {
            continue;
        }
        sequences.push(sequence_string(record.seq())?);
    }
    Ok(sequences)
}

/// Load reads from `path` in the format its extension suggests.
pub fn read_sequences(path: &Path) -> Result<Vec<String>, ReadSourceError> {
    let reader = open_reader(path)?;
    match infer_format(path) {
        SequenceFormat::Fastq => read_fastq(reader),
        SequenceFormat::Fasta => read_fasta(reader),
        SequenceFormat::Tokens => read_tokens(reader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_tokens_on_any_whitespace() {
        let reads = read_tokens(Cursor::new("ab  bc\n\tcd\r\n\n")).unwrap();
        assert_eq!(reads, vec!["ab", "bc", "cd"]);
    }

    #[test]
    fn blank_stream_has_no_tokens() {
        assert!(read_tokens(Cursor::new(" \n\t ")).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_utf8_tokens() {
        let err = read_tokens(Cursor::new(vec![0x61, 0xff, 0x62])).unwrap_err();
        assert!(matches!(err, ReadSourceError::NonUtf8));
    }

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(infer_format(Path::new("r.fq")), SequenceFormat::Fastq);
        assert_eq!(infer_format(Path::new("r.FASTQ.gz")), SequenceFormat::Fastq);
        assert_eq!(infer_format(Path::new("r.fna")), SequenceFormat::Fasta);
        assert_eq!(infer_format(Path::new("r.fa.bgz")), SequenceFormat::Fasta);
        assert_eq!(infer_format(Path::new("reads.txt")), SequenceFormat::Tokens);
        assert_eq!(infer_format(Path::new("reads")), SequenceFormat::Tokens);
        assert!(is_gzip(Path::new("r.fa.gz")));
        assert!(!is_gzip(Path::new("r.fa")));
        assert!(!is_gzip(Path::new("gz")));
        assert_eq!(infer_format(Path::new("dir.fa/reads")), SequenceFormat::Tokens);
        assert_eq!(infer_format(Path::new(".gz")), SequenceFormat::Tokens);
    }

    #[test]
    fn parses_fasta_sequences() {
        let data = ">r1\nACGT\nAC\n>r2\nGTAA\n";
        let reads = read_fasta(Cursor::new(data)).unwrap();
        assert_eq!(reads, vec!["ACGTAC", "GTAA"]);
    }

    #[test]
    fn skips_empty_fasta_records() {
        let reads = read_fasta(Cursor::new(">a\n>b\nAC\n")).unwrap();
        assert_eq!(reads, vec!["AC"]);
    }

    #[test]
    fn parses_fastq_sequences() {
        let data = "@r1\nACGT\n+\nIIII\n@r2\nGTAA\n+\nIIII\n";
        let reads = read_fastq(Cursor::new(data)).unwrap();
        assert_eq!(reads, vec!["ACGT", "GTAA"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_sequences(Path::new("/nonexistent/reads.fa")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reads.fa"));
    }
}
