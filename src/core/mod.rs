// mod.rs - Core logic module

pub mod calculator;
pub mod distance;
pub mod generators;
pub mod matrix;
pub mod parsimony;
pub mod tree;

// Re-export main types for convenience
pub use calculator::{DistanceCalculator, ScoringModel};
pub use distance::{DistanceTreeConstructor, DistanceTreeMethod};
pub use generators::{GeneratorRegistry, TreeGenerator};
pub use matrix::DistanceMatrix;
pub use parsimony::{NniSearcher, ParsimonyScorer, ParsimonyTreeConstructor};
pub use tree::{Node, NodeIndex, Tree, TreeStats};
