// matrix.rs - Lower-triangular distance matrix over named taxa

use std::collections::HashSet;
use std::path::Path;

/// Symmetric distance matrix stored as a lower triangle with a zero diagonal.
/// Row `i` holds `i + 1` entries, so `get(i, j)` and `get(j, i)` read the
/// same cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Create a zeroed matrix over the given taxon names
    pub fn new(names: Vec<String>) -> Result<Self, String> {
        if names.is_empty() {
            return Err("Distance matrix requires at least one taxon".to_string());
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err("Distance matrix taxon names must be non-empty".to_string());
            }
            if !seen.insert(name.clone()) {
                return Err(format!("Duplicate taxon name in distance matrix: '{}'", name));
            }
        }
        let rows = (0..names.len()).map(|i| vec![0.0; i + 1]).collect();
        Ok(Self { names, rows })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= j {
            self.rows[i][j]
        } else {
            self.rows[j][i]
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if i >= j {
            self.rows[i][j] = value;
        } else {
            self.rows[j][i] = value;
        }
    }

    /// Remove taxon `index`, shrinking the triangle accordingly
    pub fn remove(&mut self, index: usize) {
        self.names.remove(index);
        self.rows.remove(index);
        for row in self.rows.iter_mut().skip(index) {
            row.remove(index);
        }
    }

    /// Rename taxon `index` (used when a cluster replaces a taxon slot)
    pub fn rename(&mut self, index: usize, name: String) {
        self.names[index] = name;
    }

    /// Load a labeled square matrix from a TSV or CSV file. The first row
    /// must carry the taxon names, each following row must start with its
    /// taxon name. Symmetry is checked within a small tolerance.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read matrix file '{}': {}", path.display(), e))?;

        let separator = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => ',',
            _ => '\t',
        };
        Self::parse_str(&content, separator)
    }

    /// Parse a labeled square matrix from text
    pub fn parse_str(content: &str, separator: char) -> Result<Self, String> {
        let mut lines = content
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let header = lines
            .next()
            .ok_or_else(|| "Empty matrix file".to_string())?;
        let header_fields: Vec<&str> = header.split(separator).collect();
        if header_fields.len() < 2 {
            return Err("Matrix header must list at least one taxon".to_string());
        }
        let names: Vec<String> = header_fields[1..]
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let mut matrix = Self::new(names.clone())?;
        let mut done: HashSet<usize> = HashSet::new();

        for (line_num, line) in lines.enumerate() {
            let fields: Vec<&str> = line.split(separator).collect();
            if fields.len() != names.len() + 1 {
                return Err(format!(
                    "Matrix row {} has {} fields, expected {}",
                    line_num + 2,
                    fields.len(),
                    names.len() + 1
                ));
            }
            let row_name = fields[0].trim();
            let i = matrix.index_of(row_name).ok_or_else(|| {
                format!("Matrix row '{}' does not match any header taxon", row_name)
            })?;
            for (j, field) in fields[1..].iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    format!("Invalid distance value '{}' in row '{}'", field, row_name)
                })?;
                if j != i && done.contains(&j) {
                    let mirrored = matrix.get(i, j);
                    if (mirrored - value).abs() > 1e-6 {
                        return Err(format!(
                            "Matrix is not symmetric: [{},{}] = {} vs {}",
                            row_name, names[j], value, mirrored
                        ));
                    }
                }
                if i == j && value.abs() > 1e-6 {
                    return Err(format!(
                        "Matrix diagonal for '{}' must be zero, found {}",
                        row_name, value
                    ));
                }
                matrix.set(i, j, value);
            }
            done.insert(i);
        }

        if done.len() != names.len() {
            return Err(format!(
                "Matrix has {} data rows but {} header taxa",
                done.len(),
                names.len()
            ));
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_symmetric() {
        let mut dm =
            DistanceMatrix::new(vec!["A".to_string(), "B".to_string(), "C".to_string()]).unwrap();
        dm.set(0, 2, 0.5);
        dm.set(1, 0, 0.25);
        assert_eq!(dm.get(2, 0), 0.5);
        assert_eq!(dm.get(0, 1), 0.25);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert!(DistanceMatrix::new(vec!["A".to_string(), "A".to_string()]).is_err());
        assert!(DistanceMatrix::new(vec![]).is_err());
    }

    #[test]
    fn test_remove_shrinks_triangle() {
        let mut dm = DistanceMatrix::new(
            vec!["A", "B", "C", "D"].into_iter().map(String::from).collect(),
        )
        .unwrap();
        dm.set(3, 1, 7.0);
        dm.set(2, 1, 3.0);
        dm.remove(0);
        assert_eq!(dm.len(), 3);
        assert_eq!(dm.names(), &["B", "C", "D"]);
        assert_eq!(dm.get(2, 0), 7.0);
        assert_eq!(dm.get(1, 0), 3.0);
    }

    #[test]
    fn test_parse_labeled_tsv() {
        let text = "Sample\tA\tB\tC\nA\t0\t2\t4\nB\t2\t0\t6\nC\t4\t6\t0\n";
        let dm = DistanceMatrix::parse_str(text, '\t').unwrap();
        assert_eq!(dm.len(), 3);
        assert_eq!(dm.get(0, 1), 2.0);
        assert_eq!(dm.get(2, 0), 4.0);
        assert_eq!(dm.get(1, 2), 6.0);
    }

    #[test]
    fn test_parse_rejects_asymmetry() {
        let text = "Sample\tA\tB\nA\t0\t2\nB\t3\t0\n";
        assert!(DistanceMatrix::parse_str(text, '\t').is_err());
    }

    #[test]
    fn test_parse_rejects_nonzero_diagonal() {
        let text = "Sample\tA\tB\nA\t1\t2\nB\t2\t0\n";
        assert!(DistanceMatrix::parse_str(text, '\t').is_err());
    }
}
