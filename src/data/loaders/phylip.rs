// phylip.rs - Sequential PHYLIP loader (relaxed names)

use std::path::Path;
use crate::data::alignment::{Alignment, SeqRecord};

/// Parse sequential PHYLIP: a header line `ntax nchar`, then one line per
/// taxon with the name as the first whitespace-separated token. Sequence
/// data may contain spaces, which are stripped. Interleaved files are not
/// supported and fail the length check with a clear error.
pub fn parse_phylip(content: &str) -> Result<Vec<SeqRecord>, String> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| "Empty PHYLIP input".to_string())?;
    let mut header_fields = header.split_whitespace();
    let ntax: usize = header_fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| format!("Invalid PHYLIP header: '{}'", header.trim()))?;
    let nchar: usize = header_fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| format!("Invalid PHYLIP header: '{}'", header.trim()))?;

    let mut records = Vec::with_capacity(ntax);
    for line in lines {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let name = parts
            .next()
            .ok_or_else(|| format!("Malformed PHYLIP line: '{}'", trimmed))?;
        let seq: Vec<u8> = parts
            .next()
            .unwrap_or("")
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        if seq.len() != nchar {
            return Err(format!(
                "Sequence '{}' has {} characters, header declares {} \
                 (interleaved PHYLIP is not supported)",
                name,
                seq.len(),
                nchar
            ));
        }
        records.push(SeqRecord::new(name, &seq));
    }

    if records.len() != ntax {
        return Err(format!(
            "PHYLIP header declares {} taxa but {} were found",
            ntax,
            records.len()
        ));
    }
    Ok(records)
}

/// Load a sequential PHYLIP file into an `Alignment`
pub fn load_phylip(path: &Path) -> Result<Alignment, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read PHYLIP file '{}': {}", path.display(), e))?;
    let records =
        parse_phylip(&content).map_err(|e| format!("{} (in '{}')", e, path.display()))?;
    Alignment::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequential() {
        let input = " 3 8\ntaxon_a ACGTACGT\ntaxon_b ACGT ACGA\ntaxon_c AC--ACGT\n";
        let records = parse_phylip(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].id, "taxon_b");
        assert_eq!(records[1].seq, b"ACGTACGA");
    }

    #[test]
    fn test_taxon_count_mismatch() {
        let input = "3 4\na ACGT\nb ACGT\n";
        assert!(parse_phylip(input).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let input = "2 4\na ACGT\nb ACG\n";
        assert!(parse_phylip(input).is_err());
    }

    #[test]
    fn test_bad_header() {
        assert!(parse_phylip("not a header\n").is_err());
        assert!(parse_phylip("").is_err());
    }
}
