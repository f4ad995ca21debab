// mod.rs - Pluggable tree generation strategies

use crate::core::matrix::DistanceMatrix;
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Trait for pluggable tree construction strategies
pub trait TreeGenerator: Send + Sync {
    /// Get generator name (the registry key)
    fn name(&self) -> &'static str;

    /// Get generator description
    fn description(&self) -> &'static str;

    /// Build a tree from a multiple alignment
    fn generate(&self, alignment: &Alignment) -> Result<Tree, String>;

    /// Build a tree directly from a precomputed distance matrix.
    /// Only distance-based strategies support this entry point.
    fn generate_from_matrix(&self, _dm: &DistanceMatrix) -> Result<Tree, String> {
        Err(format!(
            "The '{}' method cannot start from a distance matrix; provide an alignment",
            self.name()
        ))
    }

    /// Whether this strategy accepts a precomputed distance matrix
    fn supports_matrix_input(&self) -> bool {
        false
    }
}

// Re-export strategy implementations
pub mod distance_tree;
pub mod factory;
pub mod parsimony_tree;

pub use distance_tree::DistanceTreeGenerator;
pub use factory::GeneratorRegistry;
pub use parsimony_tree::ParsimonyTreeGenerator;
