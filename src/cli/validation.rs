// validation.rs - Input validation utilities

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;
use regex::Regex;
use crate::cli::args::Args;
use crate::core::calculator::ScoringModel;
use crate::core::generators::GeneratorRegistry;
use crate::core::tree::Tree;
use crate::data::loaders::newick::load_newick;
use crate::data::{AlignmentFormat, TaxonFilter};

#[derive(Debug)]
pub struct ValidationResult {
    pub input_format: Option<AlignmentFormat>,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
    pub include_set: Option<HashSet<String>>,
    pub exclude_set: Option<HashSet<String>>,
    pub starter_tree: Option<Tree>,
}

impl ValidationResult {
    /// Borrow the compiled filters as a taxon filter
    pub fn taxon_filter(&self) -> TaxonFilter<'_> {
        TaxonFilter {
            include_regex: self.include_regex.as_ref(),
            exclude_regex: self.exclude_regex.as_ref(),
            include_set: self.include_set.as_ref(),
            exclude_set: self.exclude_set.as_ref(),
        }
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    // Validate generator key
    let registry = GeneratorRegistry::new();
    if !registry.has_generator(&args.generator) {
        return Err(format!(
            "Invalid generator '{}'. Available: {}",
            args.generator,
            registry.names().join(", ")
        ));
    }

    // Validate scoring model
    ScoringModel::by_name(&args.scoring)?;

    // Validate output formats
    match args.format.to_lowercase().as_str() {
        "newick" | "nexus" | "ascii" => {}
        other => return Err(format!("Invalid tree format '{}'. Use: newick, nexus, ascii", other)),
    }
    match args.matrix_format.to_lowercase().as_str() {
        "tsv" | "csv" | "phylip" | "nexus" => {}
        other => {
            return Err(format!(
                "Invalid matrix format '{}'. Use: tsv, csv, phylip, nexus",
                other
            ))
        }
    }

    // Exactly one input source
    if args.input.is_none() && args.matrix.is_none() {
        return Err("Either --input or --matrix is required".to_string());
    }
    if args.input.is_some() && args.matrix.is_some() {
        return Err("--input and --matrix are mutually exclusive".to_string());
    }

    // Validate matrix input incompatibilities
    if args.matrix.is_some() {
        if args.generator == "parsimony" {
            return Err(
                "--matrix is not compatible with --generator parsimony (parsimony scores sequence columns, not distances)"
                    .to_string(),
            );
        }
        if args.matrix_output.is_some() {
            return Err("--matrix-output requires an alignment input".to_string());
        }
        if args.include_taxa.is_some()
            || args.exclude_taxa.is_some()
            || args.include_taxa_list.is_some()
            || args.exclude_taxa_list.is_some()
        {
            return Err("Taxon filters require an alignment input".to_string());
        }
    }

    // Starter tree only makes sense for the parsimony search
    if args.starter_tree.is_some() && args.generator != "parsimony" {
        return Err(format!(
            "--starter-tree is not compatible with --generator {}",
            args.generator
        ));
    }

    // Parse explicit input format
    let input_format = match &args.input_format {
        Some(name) => Some(AlignmentFormat::from_str(name)?),
        None => None,
    };

    // Compile regex patterns
    let include_regex = if let Some(pattern) = &args.include_taxa {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_taxa regex: {}", e))?)
    } else {
        None
    };

    let exclude_regex = if let Some(pattern) = &args.exclude_taxa {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_taxa regex: {}", e))?)
    } else {
        None
    };

    // Load filter sets from files
    let include_set = if let Some(file_path) = &args.include_taxa_list {
        Some(load_set_from_file(file_path)?)
    } else {
        None
    };

    let exclude_set = if let Some(file_path) = &args.exclude_taxa_list {
        Some(load_set_from_file(file_path)?)
    } else {
        None
    };

    // Load the starter tree
    let starter_tree = match &args.starter_tree {
        Some(path) => Some(load_newick(std::path::Path::new(path))?),
        None => None,
    };

    Ok(ValidationResult {
        input_format,
        include_regex,
        exclude_regex,
        include_set,
        exclude_set,
        starter_tree,
    })
}

/// Load a set of strings from a file (one per line)
fn load_set_from_file(file_path: &str) -> Result<HashSet<String>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open filter file '{}': {}", file_path, e))?;

    let reader = BufReader::new(file);
    let mut set = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!(
                "Failed to read line {} from '{}': {}",
                line_num + 1,
                file_path,
                e
            )
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            set.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} items from filter file '{}'", set.len(), file_path);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            input: Some("aln.fasta".to_string()),
            matrix: None,
            output: None,
            generator: "nj".to_string(),
            scoring: "identity".to_string(),
            format: "newick".to_string(),
            input_format: None,
            matrix_output: None,
            matrix_format: "tsv".to_string(),
            include_taxa: None,
            exclude_taxa: None,
            include_taxa_list: None,
            exclude_taxa_list: None,
            starter_tree: None,
            threads: None,
            stats: None,
            show: false,
            dry_run: false,
            list_generators: false,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_valid_args_pass() {
        let result = validate_args(&base_args()).unwrap();
        assert!(result.input_format.is_none());
        assert!(!result.taxon_filter().is_active());
    }

    #[test]
    fn test_unknown_generator_rejected() {
        let mut args = base_args();
        args.generator = "ml".to_string();
        let err = validate_args(&args).unwrap_err();
        assert!(err.contains("Invalid generator"));
        assert!(err.contains("nj, parsimony, upgma"));
    }

    #[test]
    fn test_unknown_scoring_rejected() {
        let mut args = base_args();
        args.scoring = "pam250".to_string();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_bad_formats_rejected() {
        let mut args = base_args();
        args.format = "svg".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.matrix_format = "xlsx".to_string();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_input_source_required_and_exclusive() {
        let mut args = base_args();
        args.input = None;
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.matrix = Some("dm.tsv".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_matrix_incompatibilities() {
        let mut args = base_args();
        args.input = None;
        args.matrix = Some("dm.tsv".to_string());
        args.generator = "parsimony".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.input = None;
        args.matrix = Some("dm.tsv".to_string());
        args.include_taxa = Some("^s".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_starter_tree_requires_parsimony() {
        let mut args = base_args();
        args.starter_tree = Some("start.nwk".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_bad_regex_rejected() {
        let mut args = base_args();
        args.include_taxa = Some("[".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_explicit_input_format_parsed() {
        let mut args = base_args();
        args.input_format = Some("phylip".to_string());
        let result = validate_args(&args).unwrap();
        assert_eq!(result.input_format, Some(AlignmentFormat::Phylip));
    }
}
