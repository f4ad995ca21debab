// distance.rs - Distance-based tree construction (UPGMA and Neighbor-Joining)

use std::str::FromStr;
use crate::core::matrix::DistanceMatrix;
use crate::core::tree::{NodeIndex, Tree};

/// Distance-based construction method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceTreeMethod {
    Upgma,
    Nj,
}

impl FromStr for DistanceTreeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upgma" => Ok(DistanceTreeMethod::Upgma),
            "nj" | "neighbor-joining" => Ok(DistanceTreeMethod::Nj),
            _ => Err(format!("Invalid tree method: {}. Use: upgma, nj", s)),
        }
    }
}

impl DistanceTreeMethod {
    pub fn description(&self) -> &'static str {
        match self {
            DistanceTreeMethod::Upgma => "UPGMA hierarchical clustering",
            DistanceTreeMethod::Nj => "Neighbor-Joining",
        }
    }
}

/// Builds trees from a distance matrix.
///
/// Both algorithms consume the matrix pairwise, merging the best pair into
/// a fresh inner clade named `Inner1..InnerN` and collapsing the matrix row
/// of the merged pair, until the matrix is exhausted. Ties resolve to the
/// first minimum in row-major scan order, so results are deterministic.
pub struct DistanceTreeConstructor;

impl DistanceTreeConstructor {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, method: DistanceTreeMethod, dm: &DistanceMatrix) -> Result<Tree, String> {
        match method {
            DistanceTreeMethod::Upgma => self.upgma(dm),
            DistanceTreeMethod::Nj => self.nj(dm),
        }
    }

    /// UPGMA: repeatedly merge the closest pair; the new cluster sits at
    /// height `min_dist / 2` and its row is the plain average of the merged
    /// rows. Produces an ultrametric rooted tree.
    pub fn upgma(&self, dm: &DistanceMatrix) -> Result<Tree, String> {
        if dm.len() < 2 {
            return Err("Tree construction requires at least two taxa".to_string());
        }
        let mut dm = dm.clone();
        let mut tree = Tree::with_capacity(dm.len());

        // one slot per active cluster: arena node plus current height
        let mut clusters: Vec<(NodeIndex, f64)> = dm
            .names()
            .iter()
            .map(|name| (tree.add_leaf(name, None), 0.0))
            .collect();
        let mut inner_count = 0;

        while dm.len() > 1 {
            let (min_i, min_j, min_dist) = find_min(dm.len(), |i, j| dm.get(i, j));

            inner_count += 1;
            let height = min_dist / 2.0;
            let (node_i, height_i) = clusters[min_i];
            let (node_j, height_j) = clusters[min_j];
            tree.node_mut(node_i).branch_length = Some(height - height_i);
            tree.node_mut(node_j).branch_length = Some(height - height_j);
            let name = format!("Inner{}", inner_count);
            let inner = tree.add_internal(Some(name.clone()), vec![node_i, node_j], None);

            // new row: average of the two merged rows
            for k in 0..dm.len() {
                if k != min_i && k != min_j {
                    let value = (dm.get(min_i, k) + dm.get(min_j, k)) / 2.0;
                    dm.set(min_j, k, value);
                }
            }
            dm.rename(min_j, name);
            clusters[min_j] = (inner, height);
            dm.remove(min_i);
            clusters.remove(min_i);
        }

        tree.set_root(clusters[0].0);
        Ok(tree)
    }

    /// Neighbor-Joining: merge the pair minimizing `d(i,j) - r(i) - r(j)`
    /// with `r` the scaled row sums; branch lengths split by divergence
    /// difference. The final pair is attached to the last inner clade,
    /// giving a trifurcating root.
    pub fn nj(&self, dm: &DistanceMatrix) -> Result<Tree, String> {
        if dm.len() < 2 {
            return Err("Tree construction requires at least two taxa".to_string());
        }
        let mut dm = dm.clone();
        let mut tree = Tree::with_capacity(dm.len());
        let mut clusters: Vec<NodeIndex> = dm
            .names()
            .iter()
            .map(|name| tree.add_leaf(name, None))
            .collect();

        if dm.len() == 2 {
            // degenerate case, split the distance evenly
            let half = dm.get(1, 0) / 2.0;
            tree.node_mut(clusters[0]).branch_length = Some(half);
            tree.node_mut(clusters[1]).branch_length = Some(half);
            let root = tree.add_internal(
                Some("Inner1".to_string()),
                vec![clusters[1], clusters[0]],
                None,
            );
            tree.set_root(root);
            return Ok(tree);
        }

        let mut inner_count = 0;
        let mut last_inner = usize::MAX;

        while dm.len() > 2 {
            let m = dm.len();
            let node_dist: Vec<f64> = (0..m)
                .map(|i| (0..m).map(|k| dm.get(i, k)).sum::<f64>() / (m as f64 - 2.0))
                .collect();
            let (min_i, min_j, _) =
                find_min(m, |i, j| dm.get(i, j) - node_dist[i] - node_dist[j]);

            inner_count += 1;
            let dist_ij = dm.get(min_i, min_j);
            let branch_i = 0.5 * dist_ij + 0.5 * (node_dist[min_i] - node_dist[min_j]);
            let branch_j = dist_ij - branch_i;
            tree.node_mut(clusters[min_i]).branch_length = Some(branch_i);
            tree.node_mut(clusters[min_j]).branch_length = Some(branch_j);
            let name = format!("Inner{}", inner_count);
            let inner = tree.add_internal(
                Some(name.clone()),
                vec![clusters[min_i], clusters[min_j]],
                None,
            );
            last_inner = inner;

            for k in 0..m {
                if k != min_i && k != min_j {
                    let value = 0.5 * (dm.get(min_i, k) + dm.get(min_j, k) - dist_ij);
                    dm.set(min_j, k, value);
                }
            }
            dm.rename(min_j, name);
            clusters[min_j] = inner;
            dm.remove(min_i);
            clusters.remove(min_i);
        }

        // attach the remaining cluster to the last inner clade
        let (root, other) = if clusters[0] == last_inner {
            (clusters[0], clusters[1])
        } else {
            (clusters[1], clusters[0])
        };
        tree.node_mut(other).branch_length = Some(dm.get(1, 0));
        tree.add_child(root, other);
        tree.set_root(root);
        Ok(tree)
    }
}

impl Default for DistanceTreeConstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// First minimum of `value(i, j)` over the lower triangle, scanning rows
/// in order (i over 1..n, j over 0..i)
fn find_min<F: Fn(usize, usize) -> f64>(n: usize, value: F) -> (usize, usize, f64) {
    let mut best = (1, 0, value(1, 0));
    for i in 1..n {
        for j in 0..i {
            let v = value(i, j);
            if v < best.2 {
                best = (i, j, v);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tree::to_newick;

    fn matrix(names: &[&str], entries: &[(usize, usize, f64)]) -> DistanceMatrix {
        let mut dm =
            DistanceMatrix::new(names.iter().map(|s| s.to_string()).collect()).unwrap();
        for &(i, j, d) in entries {
            dm.set(i, j, d);
        }
        dm
    }

    #[test]
    fn test_upgma_ultrametric() {
        let dm = matrix(
            &["A", "B", "C", "D"],
            &[
                (0, 1, 2.0),
                (0, 2, 4.0),
                (1, 2, 4.0),
                (0, 3, 6.0),
                (1, 3, 6.0),
                (2, 3, 6.0),
            ],
        );
        let tree = DistanceTreeConstructor::new().upgma(&dm).unwrap();
        assert_eq!(
            to_newick(&tree),
            "(D:3,(C:2,(B:1,A:1)Inner1:1)Inner2:1)Inner3;"
        );
        // every leaf sits at the same depth
        let depths = tree.depths(false);
        for leaf in tree.leaves() {
            assert!((depths[leaf] - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_nj_additive() {
        let dm = matrix(
            &["A", "B", "C", "D"],
            &[
                (0, 1, 5.0),
                (0, 2, 9.0),
                (0, 3, 9.0),
                (1, 2, 10.0),
                (1, 3, 10.0),
                (2, 3, 8.0),
            ],
        );
        let tree = DistanceTreeConstructor::new().nj(&dm).unwrap();
        assert_eq!(to_newick(&tree), "(C:4,(B:3,A:2)Inner1:3,D:4)Inner2;");
        // trifurcating root
        assert_eq!(tree.node(tree.root()).children.len(), 3);
    }

    #[test]
    fn test_nj_two_taxa() {
        let dm = matrix(&["A", "B"], &[(0, 1, 3.0)]);
        let tree = DistanceTreeConstructor::new().nj(&dm).unwrap();
        assert_eq!(to_newick(&tree), "(B:1.5,A:1.5)Inner1;");
    }

    #[test]
    fn test_single_taxon_rejected() {
        let dm = matrix(&["A"], &[]);
        let constructor = DistanceTreeConstructor::new();
        assert!(constructor.upgma(&dm).is_err());
        assert!(constructor.nj(&dm).is_err());
    }

    #[test]
    fn test_build_dispatch() {
        let dm = matrix(&["A", "B", "C"], &[(0, 1, 2.0), (0, 2, 4.0), (1, 2, 4.0)]);
        let constructor = DistanceTreeConstructor::new();
        let upgma = constructor.build(DistanceTreeMethod::Upgma, &dm).unwrap();
        let nj = constructor.build(DistanceTreeMethod::Nj, &dm).unwrap();
        assert_eq!(upgma.num_leaves(), 3);
        assert_eq!(nj.num_leaves(), 3);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "UPGMA".parse::<DistanceTreeMethod>().unwrap(),
            DistanceTreeMethod::Upgma
        );
        assert_eq!(
            "neighbor-joining".parse::<DistanceTreeMethod>().unwrap(),
            DistanceTreeMethod::Nj
        );
        assert!("fitch".parse::<DistanceTreeMethod>().is_err());
    }
}
