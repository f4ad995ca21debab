// scorer.rs - Fitch small parsimony scoring

use std::collections::{HashMap, HashSet};
use crate::core::tree::Tree;
use crate::data::Alignment;

/// Scores a tree against an alignment by the Fitch criterion: the minimum
/// number of character-state changes over all columns. Every distinct
/// character is a state, gaps included. Multifurcations are folded
/// pairwise in child order.
pub struct ParsimonyScorer;

impl ParsimonyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn get_score(&self, tree: &Tree, alignment: &Alignment) -> Result<u64, String> {
        if tree.num_leaves() != alignment.len() {
            return Err(format!(
                "Tree has {} leaves but alignment has {} sequences",
                tree.num_leaves(),
                alignment.len()
            ));
        }

        // leaf node -> alignment row; every row may be claimed once
        let mut leaf_row: HashMap<usize, usize> = HashMap::new();
        let mut used_rows: HashSet<usize> = HashSet::new();
        for leaf in tree.leaves() {
            let label = tree.node(leaf).label();
            let row = alignment
                .records()
                .iter()
                .position(|r| r.id == label)
                .ok_or_else(|| {
                    format!("Tree leaf '{}' not present in the alignment", label)
                })?;
            if !used_rows.insert(row) {
                return Err(format!("Tree contains duplicate leaf label '{}'", label));
            }
            leaf_row.insert(leaf, row);
        }

        let order = tree.postorder();
        let records = alignment.records();
        let mut score = 0u64;
        let mut sets = vec![0u64; tree.num_nodes()];

        for col in 0..alignment.length() {
            // per-column dictionary of observed states
            let mut states: Vec<u8> = Vec::new();
            for &index in &order {
                let node = tree.node(index);
                if node.is_leaf() {
                    let c = records[leaf_row[&index]].seq[col];
                    let bit = match states.iter().position(|&s| s == c) {
                        Some(p) => p,
                        None => {
                            states.push(c);
                            states.len() - 1
                        }
                    };
                    if bit >= 64 {
                        return Err(format!(
                            "Column {} has more than 64 distinct states",
                            col + 1
                        ));
                    }
                    sets[index] = 1u64 << bit;
                } else {
                    let mut acc = 0u64;
                    for &child in &node.children {
                        if acc == 0 {
                            acc = sets[child];
                        } else if acc & sets[child] == 0 {
                            acc |= sets[child];
                            score += 1;
                        } else {
                            acc &= sets[child];
                        }
                    }
                    sets[index] = acc;
                }
            }
        }
        Ok(score)
    }
}

impl Default for ParsimonyScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_grouped_states_single_change() {
        let tree = parse_newick("((a1,a2),(g1,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"A"),
            ("a2", b"A"),
            ("g1", b"G"),
            ("g2", b"G"),
        ]);
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 1);
    }

    #[test]
    fn test_split_states_two_changes() {
        let tree = parse_newick("((a1,g1),(a2,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"A"),
            ("a2", b"A"),
            ("g1", b"G"),
            ("g2", b"G"),
        ]);
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 2);
    }

    #[test]
    fn test_scores_sum_over_columns() {
        let tree = parse_newick("((a1,a2),(g1,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"AAC"),
            ("a2", b"AAC"),
            ("g1", b"GAC"),
            ("g2", b"GAT"),
        ]);
        // column 1: one change, column 2: none, column 3: one change
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 2);
    }

    #[test]
    fn test_gap_is_a_state() {
        let tree = parse_newick("((a1,a2),(g1,g2));").unwrap();
        let aln = alignment(&[
            ("a1", b"-"),
            ("a2", b"-"),
            ("g1", b"G"),
            ("g2", b"G"),
        ]);
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 1);
    }

    #[test]
    fn test_leaf_mismatch_rejected() {
        let tree = parse_newick("((a1,a2),(g1,g2));").unwrap();
        let aln = alignment(&[("a1", b"A"), ("a2", b"A"), ("g1", b"G"), ("x", b"G")]);
        assert!(ParsimonyScorer::new().get_score(&tree, &aln).is_err());

        let aln_small = alignment(&[("a1", b"A"), ("a2", b"A")]);
        assert!(ParsimonyScorer::new().get_score(&tree, &aln_small).is_err());
    }

    #[test]
    fn test_duplicate_leaf_labels_rejected() {
        // counts line up, but a1 appears twice and a2 is never covered
        let tree = parse_newick("((a1,a1),(g1,g2));").unwrap();
        let aln = alignment(&[("a1", b"A"), ("a2", b"A"), ("g1", b"G"), ("g2", b"G")]);
        let err = ParsimonyScorer::new().get_score(&tree, &aln).unwrap_err();
        assert!(err.contains("duplicate leaf label"));
    }

    #[test]
    fn test_trifurcation_folds_pairwise() {
        let tree = parse_newick("(a,g,t);").unwrap();
        let aln = alignment(&[("a", b"A"), ("g", b"G"), ("t", b"T")]);
        // fold: {A}&{G} empty -> 1, {A,G}&{T} empty -> 2
        let score = ParsimonyScorer::new().get_score(&tree, &aln).unwrap();
        assert_eq!(score, 2);
    }
}
