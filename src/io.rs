//! Sequence source and interval sink.
//!
//! These are the only places that touch the filesystem; the decoders receive
//! already-parsed, validated sequences.
//!
//! Input files are either FASTA (first non-blank byte is `>`; all records are
//! concatenated in order, headers dropped) or raw text (every line
//! concatenated). Whitespace is stripped and lowercase is folded to uppercase
//! before validation.

use crate::error::IoError;
use crate::intervals::Interval;
use crate::model::State;
use crate::sequence::ObservedSequence;
use bio::io::fasta;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Read and validate the observed sequence stored at `path`.
pub fn read_sequence(path: impl AsRef<Path>) -> Result<ObservedSequence, IoError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let raw = if let Some(start) = fasta_start(&bytes) {
        let reader = fasta::Reader::new(&bytes[start..]);
        let mut seq = Vec::new();
        let mut records = 0usize;
        for result in reader.records() {
            let record = result.map_err(|e| IoError::Fasta(e.to_string()))?;
            seq.extend_from_slice(record.seq());
            records += 1;
        }
        if records == 0 {
            return Err(IoError::NoRecords(path.to_path_buf()));
        }
        seq
    } else {
        bytes
    };
    let cleaned = normalize(&raw);

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), len = cleaned.len(), "read sequence");

    Ok(ObservedSequence::from_bytes(&cleaned)?)
}

/// Read a hidden path written in the `h` / `l` alphabet.
///
/// Lines starting with `>` are treated as headers and skipped.
pub fn read_hidden_path(path: impl AsRef<Path>) -> Result<Vec<State>, IoError> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .filter(|line| !line.starts_with('>'))
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(position, c)| {
            State::from_char(c).ok_or(IoError::InvalidHiddenState {
                position,
                symbol: c,
            })
        })
        .collect()
}

/// Write one `start,end` line per interval.
pub fn write_intervals<W: Write>(mut out: W, intervals: &[Interval]) -> std::io::Result<()> {
    for iv in intervals {
        writeln!(out, "{iv}")?;
    }
    out.flush()
}

/// Write intervals to a file, replacing any existing content.
///
/// An empty interval list produces an empty file.
pub fn write_intervals_file(
    path: impl AsRef<Path>,
    intervals: &[Interval],
) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_intervals(BufWriter::new(file), intervals)?;
    Ok(())
}

/// Write `seq` as a single-record FASTA file.
pub fn write_fasta(
    path: impl AsRef<Path>,
    id: &str,
    seq: &ObservedSequence,
) -> Result<(), IoError> {
    let mut writer = fasta::Writer::new(BufWriter::new(File::create(path)?));
    writer.write(id, None, &seq.to_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write a hidden path as one `h` / `l` line.
pub fn write_hidden_path(path: impl AsRef<Path>, hidden: &[State]) -> Result<(), IoError> {
    let mut out = BufWriter::new(File::create(path)?);
    let line: String = hidden.iter().map(|s| s.as_char()).collect();
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// Offset of the leading `>` when the first non-blank byte is a FASTA header.
fn fasta_start(bytes: &[u8]) -> Option<usize> {
    bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .filter(|&i| bytes[i] == b'>')
}

fn normalize(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(u8::to_ascii_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("gc_decode_io_{}_{name}", std::process::id()))
    }

    #[test]
    fn reads_multiline_fasta() {
        let path = temp_path("multi.fa");
        fs::write(&path, ">seq1 description\nacgt\nGGCC\n>seq2\nTTAA\n").unwrap();
        let seq = read_sequence(&path).unwrap();
        assert_eq!(seq.to_bytes(), b"ACGTGGCCTTAA");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn leading_blank_lines_before_header() {
        let path = temp_path("leading_blank.fa");
        fs::write(&path, "\n  \n>seq\nACGT\n").unwrap();
        assert_eq!(read_sequence(&path).unwrap().to_bytes(), b"ACGT");
        let _ = fs::remove_file(path);
        assert_eq!(fasta_start(b"\n\t>x"), Some(2));
        assert_eq!(fasta_start(b" ACGT"), None);
        assert_eq!(fasta_start(b""), None);
    }

    #[test]
    fn reads_raw_text() {
        let path = temp_path("raw.txt");
        fs::write(&path, "ACG T\nccgg\n").unwrap();
        assert_eq!(read_sequence(&path).unwrap().to_bytes(), b"ACGTCCGG");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_invalid_and_empty_input() {
        let path = temp_path("bad.fa");
        fs::write(&path, ">x\nACGN\n").unwrap();
        assert!(matches!(
            read_sequence(&path),
            Err(IoError::Sequence(DecodeError::InvalidSymbol { position: 3, .. }))
        ));
        fs::write(&path, "\n\n").unwrap();
        assert!(matches!(
            read_sequence(&path),
            Err(IoError::Sequence(DecodeError::EmptySequence))
        ));
        let _ = fs::remove_file(path);
        assert!(matches!(read_sequence(temp_path("missing.fa")), Err(IoError::Io(_))));
    }

    #[test]
    fn interval_lines() {
        let mut buf = Vec::new();
        write_intervals(
            &mut buf,
            &[Interval { start: 1, end: 4 }, Interval { start: 9, end: 9 }],
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1,4\n9,9\n");

        let mut empty = Vec::new();
        write_intervals(&mut empty, &[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn simulated_files_read_back() {
        let fa = temp_path("sim.fa");
        let hidden = temp_path("sim.hidden");
        let seq = ObservedSequence::from_bytes(b"ACGTTGCA").unwrap();
        let states = vec![State::Rich, State::Poor, State::Poor];
        write_fasta(&fa, "simulated", &seq).unwrap();
        write_hidden_path(&hidden, &states).unwrap();
        assert_eq!(read_sequence(&fa).unwrap(), seq);
        assert_eq!(read_hidden_path(&hidden).unwrap(), states);
        let _ = fs::remove_file(fa);
        let _ = fs::remove_file(hidden);
    }
}
