// distance_tree.rs - Distance-based strategies (UPGMA, Neighbor-Joining)

use crate::core::calculator::{DistanceCalculator, ScoringModel};
use crate::core::distance::{DistanceTreeConstructor, DistanceTreeMethod};
use crate::core::generators::TreeGenerator;
use crate::core::matrix::DistanceMatrix;
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Distance-based tree construction: compute a distance matrix with a
/// scoring model, then cluster it with UPGMA or Neighbor-Joining
pub struct DistanceTreeGenerator {
    method: DistanceTreeMethod,
    model: ScoringModel,
    quiet: bool,
}

impl DistanceTreeGenerator {
    pub fn new(method: DistanceTreeMethod, model: ScoringModel) -> Self {
        Self {
            method,
            model,
            quiet: false,
        }
    }

    /// Disable the distance computation progress bar
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl TreeGenerator for DistanceTreeGenerator {
    fn name(&self) -> &'static str {
        match self.method {
            DistanceTreeMethod::Upgma => "upgma",
            DistanceTreeMethod::Nj => "nj",
        }
    }

    fn description(&self) -> &'static str {
        self.method.description()
    }

    fn generate(&self, alignment: &Alignment) -> Result<Tree, String> {
        let mut calculator = DistanceCalculator::with_model(self.model.clone());
        if self.quiet {
            calculator = calculator.quiet();
        }
        let dm = calculator.get_distance(alignment)?;
        self.generate_from_matrix(&dm)
    }

    fn generate_from_matrix(&self, dm: &DistanceMatrix) -> Result<Tree, String> {
        DistanceTreeConstructor::new().build(self.method, dm)
    }

    fn supports_matrix_input(&self) -> bool {
        true
    }
}
