// fasta.rs - Aligned FASTA loader

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use bio::io::fasta;
use crate::data::alignment::{Alignment, SeqRecord};

/// Parse aligned FASTA from any reader
pub fn parse_fasta<R: std::io::Read>(input: R) -> Result<Vec<SeqRecord>, String> {
    let reader = fasta::Reader::new(input);
    let mut records = Vec::new();

    for record_result in reader.records() {
        let record = record_result.map_err(|e| format!("Invalid FASTA record: {}", e))?;
        records.push(SeqRecord::new(record.id(), record.seq()));
    }

    if records.is_empty() {
        return Err("FASTA input contains no sequences".to_string());
    }
    Ok(records)
}

/// Load an aligned FASTA file into an `Alignment`
pub fn load_fasta(path: &Path) -> Result<Alignment, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file '{}': {}", path.display(), e))?;
    let records = parse_fasta(BufReader::new(file))
        .map_err(|e| format!("{} (in '{}')", e, path.display()))?;
    Alignment::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fasta_records() {
        let input = b">seq1 some description\nACGT\n>seq2\nAC-T\n" as &[u8];
        let records = parse_fasta(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].seq, b"ACGT");
        assert_eq!(records[1].seq, b"AC-T");
    }

    #[test]
    fn test_parse_fasta_multiline_sequence() {
        let input = b">seq1\nAC\nGT\n>seq2\nACGT\n" as &[u8];
        let records = parse_fasta(input).unwrap();
        assert_eq!(records[0].seq, b"ACGT");
        let aln = Alignment::new(records).unwrap();
        assert_eq!(aln.length(), 4);
    }

    #[test]
    fn test_parse_fasta_empty_errors() {
        let input = b"" as &[u8];
        assert!(parse_fasta(input).is_err());
    }
}
