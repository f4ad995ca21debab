// constructor.rs - Parsimony tree construction

use crate::core::calculator::DistanceCalculator;
use crate::core::distance::DistanceTreeConstructor;
use crate::core::parsimony::searcher::NniSearcher;
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Builds a most-parsimonious tree by NNI search from a starter tree.
/// Without an explicit starter, a Neighbor-Joining tree over identity
/// distances seeds the search.
pub struct ParsimonyTreeConstructor {
    searcher: NniSearcher,
    starter: Option<Tree>,
}

impl ParsimonyTreeConstructor {
    pub fn new(searcher: NniSearcher) -> Self {
        Self {
            searcher,
            starter: None,
        }
    }

    pub fn with_starter(searcher: NniSearcher, starter: Tree) -> Self {
        Self {
            searcher,
            starter: Some(starter),
        }
    }

    pub fn build_tree(&self, alignment: &Alignment) -> Result<Tree, String> {
        let starter = match &self.starter {
            Some(tree) => tree.clone(),
            None => {
                let calculator = DistanceCalculator::new("identity")?.quiet();
                let dm = calculator.get_distance(alignment)?;
                DistanceTreeConstructor::new().nj(&dm)?
            }
        };
        let (tree, score) = self.searcher.search(&starter, alignment)?;
        println!("🌳 Parsimony score: {}", score);
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsimony::scorer::ParsimonyScorer;
    use crate::data::loaders::parse_newick;
    use crate::data::SeqRecord;

    fn alignment(rows: &[(&str, &[u8])]) -> Alignment {
        Alignment::new(
            rows.iter()
                .map(|(id, seq)| SeqRecord::new(id, seq))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_build_from_nj_starter() {
        let aln = alignment(&[
            ("a1", b"AAAATTTT"),
            ("a2", b"AAAATTTA"),
            ("g1", b"GGGGTTTT"),
            ("g2", b"GGGGTTTA"),
        ]);
        let constructor = ParsimonyTreeConstructor::new(NniSearcher::new(ParsimonyScorer::new()));
        let tree = constructor.build_tree(&aln).unwrap();
        assert_eq!(tree.num_leaves(), 4);
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        // four A/G columns explained by one change, plus the T/A column
        assert_eq!(score, 6);
    }

    #[test]
    fn test_build_with_explicit_starter() {
        let aln = alignment(&[
            ("a1", b"AA"),
            ("a2", b"AA"),
            ("g1", b"GG"),
            ("g2", b"GG"),
        ]);
        let starter = parse_newick("((a1,g1),(a2,g2));").unwrap();
        let constructor = ParsimonyTreeConstructor::with_starter(
            NniSearcher::new(ParsimonyScorer::new()),
            starter,
        );
        let tree = constructor.build_tree(&aln).unwrap();
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 2);
    }

    #[test]
    fn test_starter_leaf_mismatch_errors() {
        let aln = alignment(&[("x", b"AA"), ("y", b"AA"), ("z", b"GG"), ("w", b"GG")]);
        let starter = parse_newick("((a1,g1),(a2,g2));").unwrap();
        let constructor = ParsimonyTreeConstructor::with_starter(
            NniSearcher::new(ParsimonyScorer::new()),
            starter,
        );
        assert!(constructor.build_tree(&aln).is_err());
    }
}
