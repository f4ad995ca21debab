// ascii.rs - Plain-text tree rendering for terminal display

use crate::core::tree::Tree;

/// Render a rooted tree as an ASCII drawing.
///
/// Each leaf occupies every other row, internal nodes sit centered between
/// their first and last child, and horizontal runs of `_` are scaled to the
/// root-to-node depths. Trees without branch lengths are drawn with unit
/// edges.
pub fn draw_ascii(tree: &Tree, column_width: usize) -> String {
    let leaves = tree.leaves();
    if leaves.is_empty() {
        return String::new();
    }

    let max_label_width = leaves
        .iter()
        .map(|&leaf| tree.node(leaf).label().chars().count())
        .max()
        .unwrap_or(0);
    let drawing_width = column_width.saturating_sub(max_label_width + 1).max(10);
    let drawing_height = 2 * leaves.len() - 1;

    // Column per node, proportional to depth. Keep a small margin so long
    // labels never push the deepest column past the drawing edge.
    let unit = !tree.has_branch_lengths();
    let depths = tree.depths(unit);
    let max_depth = depths.iter().cloned().fold(0.0_f64, f64::max);
    let fudge_margin = (leaves.len() as f64).log2().ceil();
    let cols_per_unit = if max_depth > 0.0 {
        (drawing_width as f64 - fudge_margin) / max_depth
    } else {
        1.0
    };
    let col_positions: Vec<usize> = depths
        .iter()
        .map(|d| ((d * cols_per_unit + 1.0) as usize).min(drawing_width - 1))
        .collect();

    // Row per node: leaves on even rows, internals centered between the
    // rows of their first and last child.
    let mut row_positions = vec![0usize; tree.num_nodes()];
    for (pos, &leaf) in leaves.iter().enumerate() {
        row_positions[leaf] = 2 * pos;
    }
    for index in tree.postorder() {
        let node = tree.node(index);
        if !node.is_leaf() {
            let first = row_positions[node.children[0]];
            let last = row_positions[*node.children.last().unwrap()];
            row_positions[index] = (first + last) / 2;
        }
    }

    let mut grid = vec![vec![b' '; drawing_width]; drawing_height];
    let mut stack = vec![(tree.root(), 0usize)];
    while let Some((index, start_col)) = stack.pop() {
        let this_col = col_positions[index];
        let this_row = row_positions[index];
        for col in start_col..this_col {
            grid[this_row][col] = b'_';
        }
        let node = tree.node(index);
        if !node.is_leaf() {
            let top_row = row_positions[node.children[0]];
            let bottom_row = row_positions[*node.children.last().unwrap()];
            for row in (top_row + 1)..=bottom_row {
                grid[row][this_col] = b'|';
            }
            for &child in &node.children {
                stack.push((child, this_col + 1));
            }
        }
    }

    let mut out = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let line: &str = std::str::from_utf8(cells).unwrap_or("");
        out.push_str(line.trim_end());
        if row % 2 == 0 {
            out.push(' ');
            out.push_str(tree.node(leaves[row / 2]).label());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loaders::newick::parse_newick;

    #[test]
    fn test_draw_ascii_contains_all_taxa() {
        let tree = parse_newick("((A:1,B:1)X:1,(C:2,D:2)Y:0.5)R;").unwrap();
        let drawing = draw_ascii(&tree, 80);
        for taxon in ["A", "B", "C", "D"] {
            assert!(drawing.contains(taxon), "missing taxon {}", taxon);
        }
        assert_eq!(drawing.lines().count(), 7);
    }

    #[test]
    fn test_draw_ascii_without_branch_lengths() {
        let tree = parse_newick("((A,B),C);").unwrap();
        let drawing = draw_ascii(&tree, 60);
        assert!(drawing.contains('_'));
        assert!(drawing.contains('|'));
        assert_eq!(drawing.lines().count(), 5);
    }

    #[test]
    fn test_deeper_leaves_sit_further_right() {
        let tree = parse_newick("((A:1,B:1)X:4,C:1)R;").unwrap();
        let drawing = draw_ascii(&tree, 80);
        let col_of = |taxon: &str| {
            drawing
                .lines()
                .find(|line| line.ends_with(taxon))
                .map(|line| line.len())
                .unwrap()
        };
        assert!(col_of("A") > col_of("C"));
    }

    #[test]
    fn test_single_leaf() {
        let tree = parse_newick("A;").unwrap();
        let drawing = draw_ascii(&tree, 40);
        assert!(drawing.trim_end().ends_with('A'));
    }
}
