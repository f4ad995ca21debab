// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub matrix: Option<String>,
    pub output: Option<String>,

    // Core settings
    pub generator: Option<String>,
    pub scoring: Option<String>,
    pub format: Option<String>,
    pub input_format: Option<String>,

    // Distance matrix output
    pub matrix_output: Option<String>,
    pub matrix_format: Option<String>,

    // Taxon filtering
    pub include_taxa: Option<String>,
    pub exclude_taxa: Option<String>,
    pub include_taxa_list: Option<String>,
    pub exclude_taxa_list: Option<String>,

    // Parsimony search
    pub starter_tree: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Extras
    pub stats: Option<String>,

    // Flags
    pub show: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# phylogen.toml - Configuration file for phylogen
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to input alignment file (FASTA or PHYLIP)
input = "/path/to/alignment.fasta"

# Path to precomputed distance matrix (.tsv or .csv) instead of an alignment
# matrix = "/path/to/distances.tsv"

# Output tree file
output = "tree.nwk"

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Tree generator: upgma, nj, parsimony
generator = "nj"

# Scoring model for distance calculation: identity, blastn, trans
# Note: ignored when generator = "parsimony"
scoring = "identity"

# Output tree format: newick, nexus, ascii
format = "newick"

# Input alignment format: fasta, phylip (omit to detect from extension)
# input_format = "fasta"

# =============================================================================
# DISTANCE MATRIX OUTPUT
# =============================================================================

# Also write the computed distance matrix to this file
# matrix_output = "distances.tsv"

# Distance matrix output format: tsv, csv, phylip, nexus
matrix_format = "tsv"

# =============================================================================
# TAXON FILTERING
# =============================================================================

# Include only taxa matching regex pattern
# include_taxa = "sample.*"

# Exclude taxa matching regex pattern
# exclude_taxa = "outgroup.*"

# Include only taxa listed in a file (one taxon per line)
# include_taxa_list = "taxa.txt"

# Exclude taxa listed in a file (one taxon per line)
# exclude_taxa_list = "blacklist.txt"

# =============================================================================
# PARSIMONY SEARCH
# =============================================================================

# Newick file with a starting tree for the parsimony search
# starter_tree = "start.nwk"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# =============================================================================
# EXTRAS
# =============================================================================

# Write tree summary statistics as JSON to this file
# stats = "stats.json"

# Print the tree as an ASCII drawing after construction
show = false

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join("phylogen_config_round_trip.toml");
        let config = Config {
            input: Some("aln.fasta".to_string()),
            generator: Some("upgma".to_string()),
            threads: Some(4),
            show: Some(true),
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.input.as_deref(), Some("aln.fasta"));
        assert_eq!(loaded.generator.as_deref(), Some("upgma"));
        assert_eq!(loaded.threads, Some(4));
        assert_eq!(loaded.show, Some(true));
        assert!(loaded.matrix.is_none());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_generate_sample_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.generator.as_deref(), Some("nj"));
        assert_eq!(config.format.as_deref(), Some("newick"));
        assert_eq!(config.dry_run, Some(false));
    }
}
