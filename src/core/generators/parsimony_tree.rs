// parsimony_tree.rs - Parsimony strategy (Fitch scoring + NNI search)

use crate::core::generators::TreeGenerator;
use crate::core::parsimony::{NniSearcher, ParsimonyScorer, ParsimonyTreeConstructor};
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Parsimony tree construction: NNI hill-climb minimizing the Fitch score,
/// seeded by an explicit starter tree or an identity-NJ tree
pub struct ParsimonyTreeGenerator {
    starter: Option<Tree>,
}

impl ParsimonyTreeGenerator {
    pub fn new() -> Self {
        Self { starter: None }
    }

    pub fn with_starter(starter: Tree) -> Self {
        Self {
            starter: Some(starter),
        }
    }
}

impl Default for ParsimonyTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeGenerator for ParsimonyTreeGenerator {
    fn name(&self) -> &'static str {
        "parsimony"
    }

    fn description(&self) -> &'static str {
        "Maximum parsimony via nearest-neighbor interchange search"
    }

    fn generate(&self, alignment: &Alignment) -> Result<Tree, String> {
        let searcher = NniSearcher::new(ParsimonyScorer::new());
        let constructor = match &self.starter {
            Some(tree) => ParsimonyTreeConstructor::with_starter(searcher, tree.clone()),
            None => ParsimonyTreeConstructor::new(searcher),
        };
        constructor.build_tree(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeqRecord;

    #[test]
    fn test_parsimony_generator() {
        let aln = Alignment::new(vec![
            SeqRecord::new("a1", b"AACC"),
            SeqRecord::new("a2", b"AACT"),
            SeqRecord::new("g1", b"GGCC"),
            SeqRecord::new("g2", b"GGCT"),
        ])
        .unwrap();
        let generator = ParsimonyTreeGenerator::new();
        assert_eq!(generator.name(), "parsimony");
        assert!(!generator.supports_matrix_input());
        let tree = generator.generate(&aln).unwrap();
        assert_eq!(tree.num_leaves(), 4);
    }
}
