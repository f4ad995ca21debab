// searcher.rs - Nearest-neighbor interchange tree search

use rayon::prelude::*;
use crate::core::parsimony::scorer::ParsimonyScorer;
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Hill-climbing search over NNI rearrangements: in each round every
/// neighbor of the current tree is scored (in parallel) and the best one
/// is adopted if it strictly improves the parsimony score.
pub struct NniSearcher {
    scorer: ParsimonyScorer,
}

impl NniSearcher {
    pub fn new(scorer: ParsimonyScorer) -> Self {
        Self { scorer }
    }

    /// Search from `tree`, returning the best tree found and its score
    pub fn search(&self, tree: &Tree, alignment: &Alignment) -> Result<(Tree, u64), String> {
        let mut best_tree = tree.clone();
        let mut best_score = self.scorer.get_score(&best_tree, alignment)?;
        let mut round = 0;

        loop {
            round += 1;
            let mut neighbors = Self::get_neighbors(&best_tree);
            if neighbors.is_empty() {
                break;
            }

            let scored: Vec<u64> = neighbors
                .par_iter()
                .map(|t| self.scorer.get_score(t, alignment))
                .collect::<Result<Vec<_>, String>>()?;

            let (best_index, &round_best) = scored
                .iter()
                .enumerate()
                .min_by_key(|(_, &s)| s)
                .ok_or_else(|| "NNI search produced no neighbors".to_string())?;

            if round_best < best_score {
                best_score = round_best;
                best_tree = neighbors.swap_remove(best_index);
                println!(
                    "🔄 NNI round {}: improved parsimony score to {}",
                    round, best_score
                );
            } else {
                break;
            }
        }
        Ok((best_tree, best_score))
    }

    /// All NNI neighbors of a rooted tree.
    ///
    /// Two move families: grandchild swaps across a two-child root whose
    /// children are both internal (the central edge of a rooted binary
    /// tree), and sibling/child swaps at every other internal edge. When
    /// the root multifurcates its internal children take part in the
    /// sibling moves like any other edge.
    pub fn get_neighbors(tree: &Tree) -> Vec<Tree> {
        let mut out = Vec::new();
        let root = tree.root();
        let root_children = tree.node(root).children.clone();

        if root_children.len() == 2 {
            let (left, right) = (root_children[0], root_children[1]);
            if tree.node(left).children.len() == 2 && tree.node(right).children.len() == 2 {
                let left_right = tree.node(left).children[1];
                let right_left = tree.node(right).children[0];
                let right_right = tree.node(right).children[1];
                for swap_with in [right_right, right_left] {
                    let mut neighbor = tree.clone();
                    if neighbor.swap_subtrees(left_right, swap_with).is_ok() {
                        out.push(neighbor);
                    }
                }
            }
        }

        for v in 0..tree.num_nodes() {
            let node = tree.node(v);
            if node.is_leaf() {
                continue;
            }
            let parent = match node.parent {
                Some(p) => p,
                None => continue,
            };
            // the central edge of a binary root is handled above
            if parent == root && root_children.len() == 2 {
                continue;
            }
            let siblings: Vec<usize> = tree
                .node(parent)
                .children
                .iter()
                .copied()
                .filter(|&c| c != v)
                .collect();
            for &sibling in &siblings {
                for &child in &node.children {
                    let mut neighbor = tree.clone();
                    if neighbor.swap_subtrees(sibling, child).is_ok() {
                        out.push(neighbor);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
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
    fn test_neighbors_of_balanced_quartet() {
        let tree = parse_newick("((a,b),(c,d));").unwrap();
        let neighbors = NniSearcher::get_neighbors(&tree);
        // central edge only: two rearrangements
        assert_eq!(neighbors.len(), 2);
        for neighbor in &neighbors {
            let leaves: HashSet<String> = neighbor.leaf_names().into_iter().collect();
            assert_eq!(leaves.len(), 4);
        }
    }

    #[test]
    fn test_neighbors_of_caterpillar() {
        // internal edge between (a,b) and its parent, plus the central edge
        let tree = parse_newick("(((a,b),c),(d,e));").unwrap();
        let neighbors = NniSearcher::get_neighbors(&tree);
        assert_eq!(neighbors.len(), 4);
    }

    #[test]
    fn test_three_taxa_have_no_neighbors() {
        let tree = parse_newick("((a,b),c);").unwrap();
        assert!(NniSearcher::get_neighbors(&tree).is_empty());
    }

    #[test]
    fn test_search_fixes_bad_quartet() {
        let tree = parse_newick("((a1,g1),(a2,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"AAAA"),
            ("a2", b"AAAA"),
            ("g1", b"GGGG"),
            ("g2", b"GGGG"),
        ]);
        let searcher = NniSearcher::new(ParsimonyScorer::new());
        let (best, score) = searcher.search(&tree, &aln).unwrap();
        // optimal grouping (a1,a2)|(g1,g2) needs one change per column
        assert_eq!(score, 4);
        let leaves: HashSet<String> = best.leaf_names().into_iter().collect();
        assert_eq!(leaves.len(), 4);
    }

    #[test]
    fn test_search_keeps_optimal_tree() {
        let tree = parse_newick("((a1,a2),(g1,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"AA"),
            ("a2", b"AA"),
            ("g1", b"GG"),
            ("g2", b"GG"),
        ]);
        let searcher = NniSearcher::new(ParsimonyScorer::new());
        let (_, score) = searcher.search(&tree, &aln).unwrap();
        assert_eq!(score, 2);
    }
}
