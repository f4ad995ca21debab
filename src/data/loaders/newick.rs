// newick.rs - Newick tree parser (used for parsimony starter trees)

use std::path::Path;
use crate::core::tree::{NodeIndex, Tree};

/// Parse a single Newick string into a rooted tree.
///
/// Supports nested clades, leaf and inner labels (quoted with `'` or
/// unquoted), branch lengths after `:`, and `[...]` comments. The string
/// must end with `;`.
pub fn parse_newick(text: &str) -> Result<Tree, String> {
    let mut cursor = Cursor {
        bytes: text.as_bytes(),
        pos: 0,
    };
    let mut tree = Tree::new();

    cursor.skip_trivia()?;
    let root = cursor.parse_subtree(&mut tree)?;
    cursor.skip_trivia()?;
    match cursor.next_byte() {
        Some(b';') => {}
        _ => return Err("Newick string must end with ';'".to_string()),
    }
    cursor.skip_trivia()?;
    if cursor.pos < cursor.bytes.len() {
        return Err(format!(
            "Trailing content after Newick tree at byte {}",
            cursor.pos
        ));
    }

    tree.set_root(root);
    Ok(tree)
}

/// Load a Newick tree from a file (first tree only)
pub fn load_newick(path: &Path) -> Result<Tree, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read tree file '{}': {}", path.display(), e))?;
    parse_newick(content.trim()).map_err(|e| format!("{} (in '{}')", e, path.display()))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip whitespace and `[...]` comments
    fn skip_trivia(&mut self) -> Result<(), String> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'[') => {
                    let start = self.pos;
                    while let Some(b) = self.next_byte() {
                        if b == b']' {
                            break;
                        }
                    }
                    if self.bytes.get(self.pos - 1) != Some(&b']') {
                        return Err(format!("Unterminated comment starting at byte {}", start));
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_subtree(&mut self, tree: &mut Tree) -> Result<NodeIndex, String> {
        self.skip_trivia()?;
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let mut children = vec![self.parse_subtree(tree)?];
            self.skip_trivia()?;
            while self.peek() == Some(b',') {
                self.pos += 1;
                children.push(self.parse_subtree(tree)?);
                self.skip_trivia()?;
            }
            if self.next_byte() != Some(b')') {
                return Err(format!("Expected ')' at byte {}", self.pos));
            }
            let name = self.parse_label()?;
            let branch_length = self.parse_branch_length()?;
            Ok(tree.add_internal(name, children, branch_length))
        } else {
            let name = self
                .parse_label()?
                .ok_or_else(|| format!("Expected a leaf label at byte {}", self.pos))?;
            let branch_length = self.parse_branch_length()?;
            Ok(tree.add_leaf(&name, branch_length))
        }
    }

    fn parse_label(&mut self) -> Result<Option<String>, String> {
        self.skip_trivia()?;
        if self.peek() == Some(b'\'') {
            self.pos += 1;
            let mut label = String::new();
            loop {
                match self.next_byte() {
                    Some(b'\'') => {
                        // doubled quote is an escaped quote
                        if self.peek() == Some(b'\'') {
                            self.pos += 1;
                            label.push('\'');
                        } else {
                            break;
                        }
                    }
                    Some(b) => label.push(b as char),
                    None => return Err("Unterminated quoted label".to_string()),
                }
            }
            return Ok(Some(label));
        }

        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b"(),:;[]".contains(&b) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        let label = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| format!("Invalid UTF-8 in label at byte {}", start))?;
        Ok(Some(label.to_string()))
    }

    fn parse_branch_length(&mut self) -> Result<Option<f64>, String> {
        self.skip_trivia()?;
        if self.peek() != Some(b':') {
            return Ok(None);
        }
        self.pos += 1;
        self.skip_trivia()?;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || b"+-.eE".contains(&b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| "Invalid branch length".to_string())?;
        let value: f64 = text
            .parse()
            .map_err(|_| format!("Invalid branch length '{}' at byte {}", text, start))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_tree() {
        let tree = parse_newick("((A:1,B:2)Inner1:0.5,C:3)Inner2;").unwrap();
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
        let root = tree.root();
        assert_eq!(tree.node(root).label(), "Inner2");
        assert_eq!(tree.node(root).children.len(), 2);
        let inner = tree.node(root).children[0];
        assert_eq!(tree.node(inner).branch_length, Some(0.5));
    }

    #[test]
    fn test_parse_without_branch_lengths() {
        let tree = parse_newick("(A,(B,C));").unwrap();
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
        assert!(!tree.has_branch_lengths());
    }

    #[test]
    fn test_parse_quoted_labels_and_comments() {
        let tree = parse_newick("[run 7]('taxon one':1,'it''s':2)root;").unwrap();
        assert_eq!(tree.leaf_names(), vec!["taxon one", "it's"]);
    }

    #[test]
    fn test_parse_trifurcation() {
        let tree = parse_newick("(A:1,B:1,C:1)Inner1;").unwrap();
        assert_eq!(tree.node(tree.root()).children.len(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_newick("(A,B)").is_err()); // missing ';'
        assert!(parse_newick("(A,B); junk").is_err());
        assert!(parse_newick("(A,:1);").is_err());
        assert!(parse_newick("(A:x,B:1);").is_err());
    }
}
