// tree.rs - Arena-based rooted phylogenetic tree

use serde::Serialize;

/// Index of a node in the tree arena
pub type NodeIndex = usize;

/// During construction only, marker for an unset root
const NO_ROOT: NodeIndex = usize::MAX;

/// A single node: leaf or internal clade
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub branch_length: Option<f64>,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Display label: name or empty string
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Rooted phylogenetic tree stored as a node arena.
///
/// Nodes live in a contiguous vector and reference each other by index,
/// which keeps clones cheap and makes rearrangement moves (NNI) simple
/// pointer swaps instead of ownership juggling.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeIndex,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NO_ROOT,
        }
    }

    /// Pre-allocate for a binary tree over `num_leaves` taxa
    pub fn with_capacity(num_leaves: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(2 * num_leaves.max(1) - 1),
            root: NO_ROOT,
        }
    }

    /// Add a leaf node, returning its index
    pub fn add_leaf(&mut self, name: &str, branch_length: Option<f64>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node {
            name: Some(name.to_string()),
            branch_length,
            parent: None,
            children: Vec::new(),
        });
        index
    }

    /// Add an internal node over existing children, returning its index.
    /// Children get their parent pointer updated.
    pub fn add_internal(
        &mut self,
        name: Option<String>,
        children: Vec<NodeIndex>,
        branch_length: Option<f64>,
    ) -> NodeIndex {
        let index = self.nodes.len();
        for &child in &children {
            self.nodes[child].parent = Some(index);
        }
        self.nodes.push(Node {
            name,
            branch_length,
            parent: None,
            children,
        });
        index
    }

    /// Attach an existing node as an additional child of `parent`
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub fn set_root(&mut self, index: NodeIndex) {
        self.root = index;
        self.nodes[index].parent = None;
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.root == NO_ROOT
    }

    /// Postorder traversal (children before parents), starting at the root
    pub fn postorder(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.is_empty() {
            return out;
        }
        let mut stack = vec![(self.root, false)];
        while let Some((index, expanded)) = stack.pop() {
            if expanded {
                out.push(index);
                continue;
            }
            stack.push((index, true));
            for &child in self.nodes[index].children.iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    /// Leaf indices in traversal order
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.postorder()
            .into_iter()
            .filter(|&i| self.nodes[i].is_leaf())
            .collect()
    }

    /// Leaf labels in traversal order
    pub fn leaf_names(&self) -> Vec<String> {
        self.leaves()
            .into_iter()
            .map(|i| self.nodes[i].label().to_string())
            .collect()
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn num_internal(&self) -> usize {
        self.nodes.len() - self.num_leaves()
    }

    /// True if any edge carries a positive branch length
    pub fn has_branch_lengths(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| n.branch_length.map(|b| b > 0.0).unwrap_or(false))
    }

    /// Root-to-node distances; with `unit_branch_lengths` every edge counts 1
    pub fn depths(&self, unit_branch_lengths: bool) -> Vec<f64> {
        let mut depths = vec![0.0; self.nodes.len()];
        if self.is_empty() {
            return depths;
        }
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            for &child in &self.nodes[index].children {
                let edge = if unit_branch_lengths {
                    1.0
                } else {
                    self.nodes[child].branch_length.unwrap_or(0.0)
                };
                depths[child] = depths[index] + edge;
                stack.push(child);
            }
        }
        depths
    }

    pub fn max_depth(&self, unit_branch_lengths: bool) -> f64 {
        self.depths(unit_branch_lengths)
            .into_iter()
            .fold(0.0, f64::max)
    }

    pub fn total_branch_length(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.branch_length.unwrap_or(0.0))
            .sum()
    }

    /// Swap two disjoint subtrees in place by exchanging their slots in the
    /// respective parent child lists. Both nodes must have parents and must
    /// not be in an ancestor/descendant relation.
    pub fn swap_subtrees(&mut self, a: NodeIndex, b: NodeIndex) -> Result<(), String> {
        let parent_a = self.nodes[a]
            .parent
            .ok_or_else(|| "Cannot swap the root of the tree".to_string())?;
        let parent_b = self.nodes[b]
            .parent
            .ok_or_else(|| "Cannot swap the root of the tree".to_string())?;

        let pos_a = self.nodes[parent_a]
            .children
            .iter()
            .position(|&c| c == a)
            .ok_or_else(|| "Corrupt tree: child not found in parent".to_string())?;
        let pos_b = self.nodes[parent_b]
            .children
            .iter()
            .position(|&c| c == b)
            .ok_or_else(|| "Corrupt tree: child not found in parent".to_string())?;

        self.nodes[parent_a].children[pos_a] = b;
        self.nodes[parent_b].children[pos_b] = a;
        self.nodes[a].parent = Some(parent_b);
        self.nodes[b].parent = Some(parent_a);
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a constructed tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeStats {
    pub taxa: usize,
    pub internal_nodes: usize,
    pub total_branch_length: f64,
    pub max_depth: f64,
}

impl TreeStats {
    pub fn from_tree(tree: &Tree) -> Self {
        Self {
            taxa: tree.num_leaves(),
            internal_nodes: tree.num_internal(),
            total_branch_length: tree.total_branch_length(),
            max_depth: tree.max_depth(!tree.has_branch_lengths()),
        }
    }
}
