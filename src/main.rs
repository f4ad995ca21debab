// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;
use phylogen::cli::Config;
use phylogen::core::matrix::DistanceMatrix;
use phylogen::core::{DistanceCalculator, GeneratorRegistry, ScoringModel, Tree, TreeStats};
use phylogen::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Handle generator listing
    if args.list_generators {
        let registry = GeneratorRegistry::new();
        println!("Available tree generators:");
        for (name, desc) in registry.list_generators() {
            println!("  - {}: {}", name, desc);
        }
        return Ok(());
    }

    println!("🚀 phylogen v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    // Validate all arguments
    let validation_result = validate_args(&args)?;

    let output = args.output.as_ref().ok_or("--output is required")?;

    println!("🌳 Generator: {}", args.generator);
    if args.generator != "parsimony" {
        println!("🧮 Scoring model: {}", args.scoring);
    }

    let registry =
        GeneratorRegistry::with_options(&args.scoring, validation_result.starter_tree.clone())?;
    let generator = registry.get(&args.generator).ok_or_else(|| {
        format!(
            "Unknown generator '{}'. Available: {}",
            args.generator,
            registry.names().join(", ")
        )
    })?;

    let total_start = Instant::now();

    // Load input: either an alignment or a precomputed distance matrix
    let alignment = match &args.input {
        Some(input_path) => {
            let alignment =
                load_alignment(Path::new(input_path), validation_result.input_format)?;
            println!(
                "🧬 Loaded alignment: {} taxa × {} columns",
                alignment.len(),
                alignment.length()
            );
            Some(alignment.filter(&validation_result.taxon_filter())?)
        }
        None => None,
    };

    let matrix_input = match &args.matrix {
        Some(matrix_path) => {
            let dm = DistanceMatrix::from_file(Path::new(matrix_path))?;
            println!("📐 Loaded distance matrix: {} taxa", dm.len());
            Some(dm)
        }
        None => None,
    };

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        if let Some(aln) = &alignment {
            println!(
                "📊 Final alignment: {} taxa × {} columns",
                aln.len(),
                aln.length()
            );
        }
        if let Some(dm) = &matrix_input {
            println!("📊 Final matrix: {} taxa", dm.len());
        }
        return Ok(());
    }

    // Build the tree
    println!("\n🔄 Constructing tree...");
    let build_start = Instant::now();
    let tree: Tree = match (&alignment, &matrix_input) {
        (Some(aln), None) => {
            // Optionally emit the distance matrix alongside the tree
            if let Some(matrix_output) = &args.matrix_output {
                let model = ScoringModel::by_name(&args.scoring)?;
                let dm = DistanceCalculator::with_model(model).get_distance(aln)?;
                write_matrix(matrix_output, &args.matrix_format, &dm, &command_line)?;
                if generator.supports_matrix_input() {
                    generator.generate_from_matrix(&dm)?
                } else {
                    generator.generate(aln)?
                }
            } else {
                generator.generate(aln)?
            }
        }
        (None, Some(dm)) => generator.generate_from_matrix(dm)?,
        _ => return Err("Either --input or --matrix is required".to_string()),
    };
    println!(
        "✅ Tree constructed in {:.2}s",
        build_start.elapsed().as_secs_f64()
    );

    // Write output
    write_tree(output, &args.format, &tree, &command_line)?;

    // Write tree statistics if requested
    if let Some(stats_path) = &args.stats {
        let stats = TreeStats::from_tree(&tree);
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("Failed to serialize tree stats: {}", e))?;
        std::fs::write(stats_path, json)
            .map_err(|e| format!("Failed to write stats file '{}': {}", stats_path, e))?;
        println!("📊 Tree statistics written to: {}", stats_path);
    }

    // Show the tree in the terminal if requested
    if args.show {
        println!();
        print!("{}", draw_ascii(&tree, 80));
    }

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === PHYLOGEN COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!("📊 Tree: {} taxa, {} internal nodes", tree.num_leaves(), tree.num_internal());
    println!("📁 Output written to: {}", output);
    println!("🔧 Command: {}", command_line);

    Ok(())
}
