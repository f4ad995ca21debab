// mod.rs - Alignment and tree file loaders

use std::path::Path;
use std::str::FromStr;
use crate::data::alignment::Alignment;

pub mod fasta;
pub mod newick;
pub mod phylip;

pub use fasta::load_fasta;
pub use newick::{load_newick, parse_newick};
pub use phylip::load_phylip;

/// Supported alignment input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Fasta,
    Phylip,
}

impl FromStr for AlignmentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fasta" | "fa" => Ok(AlignmentFormat::Fasta),
            "phylip" | "phy" => Ok(AlignmentFormat::Phylip),
            _ => Err(format!(
                "Invalid alignment format: {}. Use: fasta, phylip",
                s
            )),
        }
    }
}

impl AlignmentFormat {
    /// Guess the format from a file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "fasta" | "fa" | "fna" | "fas" | "aln" => Some(AlignmentFormat::Fasta),
            "phy" | "phylip" => Some(AlignmentFormat::Phylip),
            _ => None,
        }
    }
}

/// Load an alignment, auto-detecting the format from the extension when
/// no explicit format is given
pub fn load_alignment(path: &Path, format: Option<AlignmentFormat>) -> Result<Alignment, String> {
    let format = match format.or_else(|| AlignmentFormat::from_extension(path)) {
        Some(f) => f,
        None => {
            return Err(format!(
                "Cannot detect alignment format of '{}'; use --input-format fasta|phylip",
                path.display()
            ))
        }
    };
    match format {
        AlignmentFormat::Fasta => load_fasta(path),
        AlignmentFormat::Phylip => load_phylip(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(
            AlignmentFormat::from_str("FASTA").unwrap(),
            AlignmentFormat::Fasta
        );
        assert_eq!(
            AlignmentFormat::from_str("phy").unwrap(),
            AlignmentFormat::Phylip
        );
        assert!(AlignmentFormat::from_str("nexus").is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            AlignmentFormat::from_extension(Path::new("x.fasta")),
            Some(AlignmentFormat::Fasta)
        );
        assert_eq!(
            AlignmentFormat::from_extension(Path::new("x.phy")),
            Some(AlignmentFormat::Phylip)
        );
        assert_eq!(AlignmentFormat::from_extension(Path::new("x.bin")), None);
    }
}
