// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// phylogen - Phylogenetic tree construction from multiple sequence alignments
pub struct Args {
    /// path to input alignment file (FASTA or PHYLIP)
    #[argh(option)]
    pub input: Option<String>,

    /// path to precomputed distance matrix (.tsv or .csv) instead of an alignment
    #[argh(option)]
    pub matrix: Option<String>,

    /// output tree file
    #[argh(option)]
    pub output: Option<String>,

    /// tree generator: upgma, nj, parsimony (default: nj)
    #[argh(option, default = "String::from(\"nj\")")]
    pub generator: String,

    /// scoring model for distance calculation: identity, blastn, trans (default: identity)
    #[argh(option, default = "String::from(\"identity\")")]
    pub scoring: String,

    /// output tree format: newick, nexus, ascii (default: newick)
    #[argh(option, default = "String::from(\"newick\")")]
    pub format: String,

    /// input alignment format: fasta, phylip (default: detect from extension)
    #[argh(option)]
    pub input_format: Option<String>,

    /// also write the computed distance matrix to this file
    #[argh(option)]
    pub matrix_output: Option<String>,

    /// distance matrix output format: tsv, csv, phylip, nexus (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub matrix_format: String,

    /// include only taxa matching regex pattern
    #[argh(option)]
    pub include_taxa: Option<String>,

    /// exclude taxa matching regex pattern
    #[argh(option)]
    pub exclude_taxa: Option<String>,

    /// include only taxa listed in a file (one taxon per line)
    #[argh(option)]
    pub include_taxa_list: Option<String>,

    /// exclude taxa listed in a file (one taxon per line)
    #[argh(option)]
    pub exclude_taxa_list: Option<String>,

    /// newick file with a starting tree for the parsimony search
    #[argh(option)]
    pub starter_tree: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// write tree summary statistics as JSON to this file
    #[argh(option)]
    pub stats: Option<String>,

    /// print the tree as an ASCII drawing after construction
    #[argh(switch)]
    pub show: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// list available tree generators and exit
    #[argh(switch)]
    pub list_generators: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
