// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.matrix.is_none() {
            self.matrix = config.matrix;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.generator == "nj" && config.generator.is_some() {
            self.generator = config.generator.unwrap();
        }
        if self.scoring == "identity" && config.scoring.is_some() {
            self.scoring = config.scoring.unwrap();
        }
        if self.format == "newick" && config.format.is_some() {
            self.format = config.format.unwrap();
        }
        if self.input_format.is_none() {
            self.input_format = config.input_format;
        }

        // Distance matrix output
        if self.matrix_output.is_none() {
            self.matrix_output = config.matrix_output;
        }
        if self.matrix_format == "tsv" && config.matrix_format.is_some() {
            self.matrix_format = config.matrix_format.unwrap();
        }

        // Taxon filtering
        if self.include_taxa.is_none() {
            self.include_taxa = config.include_taxa;
        }
        if self.exclude_taxa.is_none() {
            self.exclude_taxa = config.exclude_taxa;
        }
        if self.include_taxa_list.is_none() {
            self.include_taxa_list = config.include_taxa_list;
        }
        if self.exclude_taxa_list.is_none() {
            self.exclude_taxa_list = config.exclude_taxa_list;
        }

        // Parsimony search
        if self.starter_tree.is_none() {
            self.starter_tree = config.starter_tree;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Extras
        if self.stats.is_none() {
            self.stats = config.stats;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.show && config.show.unwrap_or(false) {
            self.show = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
