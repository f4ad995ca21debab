// mod.rs - Data handling module

pub mod alignment;
pub mod loaders;

// Re-export main types for convenience
pub use alignment::{Alignment, SeqRecord, TaxonFilter};
pub use loaders::{load_alignment, AlignmentFormat};
