// lib.rs - phylogen library root

//! # phylogen - Phylogenetic tree construction from multiple sequence alignments
//!
//! This library builds phylogenetic trees from DNA alignments using distance
//! methods (UPGMA, Neighbor-Joining) and maximum parsimony with a
//! nearest-neighbor interchange search. Strategies are registered under
//! string keys, so the construction method is a runtime choice.
//!
//! ## Features
//!
//! - **Pluggable strategies**: UPGMA, NJ and parsimony behind one trait
//! - **Scoring models**: identity, blastn and transition/transversion scoring
//! - **Multiple formats**: FASTA/PHYLIP input, Newick/NEXUS/ASCII output
//! - **Flexible filtering**: taxon filtering with regex and file lists
//! - **Parallel**: distance and parsimony scoring fan out over rayon
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use phylogen::prelude::*;
//!
//! // Load an alignment and build a Neighbor-Joining tree
//! let alignment = load_alignment(std::path::Path::new("aln.fasta"), None)?;
//! let registry = GeneratorRegistry::new();
//! let generator = registry.get("nj").ok_or("unknown generator")?;
//! let tree = generator.generate(&alignment)?;
//! println!("{}", to_newick(&tree));
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{DistanceCalculator, ScoringModel};
    pub use crate::core::{DistanceTreeConstructor, DistanceTreeMethod};
    pub use crate::core::{GeneratorRegistry, TreeGenerator};
    pub use crate::core::{DistanceMatrix, Tree, TreeStats};
    pub use crate::core::{NniSearcher, ParsimonyScorer, ParsimonyTreeConstructor};
    pub use crate::data::{load_alignment, Alignment, AlignmentFormat, SeqRecord, TaxonFilter};
    pub use crate::output::{draw_ascii, to_newick, write_matrix, write_tree};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{DistanceMatrix, GeneratorRegistry, Tree, TreeGenerator, TreeStats};
pub use data::{Alignment, SeqRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "phylogen v{} - Phylogenetic tree construction toolkit",
        VERSION
    )
}
