#!/usr/bin/env rust-script

//! # Custom Generator Example
//!
//! This example demonstrates how to implement and register custom tree
//! generators in phylogen.
//!
//! Usage:
//! ```bash
//! cargo run --example custom_generator
//! ```

use phylogen::core::{GeneratorRegistry, Tree, TreeGenerator};
use phylogen::data::{Alignment, SeqRecord};
use phylogen::output::to_newick;

/// Example 1: Star tree generator
/// Attaches every taxon directly to the root. Useless as a phylogeny,
/// handy as a null topology for comparisons.
pub struct StarTreeGenerator;

impl TreeGenerator for StarTreeGenerator {
    fn name(&self) -> &'static str {
        "star"
    }

    fn description(&self) -> &'static str {
        "Star topology: all taxa attached to a single root"
    }

    fn generate(&self, alignment: &Alignment) -> Result<Tree, String> {
        let mut tree = Tree::with_capacity(alignment.len());
        let leaves: Vec<_> = alignment
            .ids()
            .iter()
            .map(|id| tree.add_leaf(id, Some(1.0)))
            .collect();
        let root = tree.add_internal(Some("Root".to_string()), leaves, None);
        tree.set_root(root);
        Ok(tree)
    }
}

/// Example 2: Alphabetical caterpillar generator
/// Builds a ladder tree with taxa sorted by name. The topology carries no
/// signal from the data; it shows that a generator controls shape freely.
pub struct CaterpillarGenerator;

impl TreeGenerator for CaterpillarGenerator {
    fn name(&self) -> &'static str {
        "caterpillar"
    }

    fn description(&self) -> &'static str {
        "Ladder topology over alphabetically sorted taxa"
    }

    fn generate(&self, alignment: &Alignment) -> Result<Tree, String> {
        let mut ids = alignment.ids();
        if ids.len() < 2 {
            return Err("Caterpillar topology requires at least two taxa".to_string());
        }
        ids.sort();

        let mut tree = Tree::with_capacity(ids.len());
        let mut spine = tree.add_leaf(&ids[0], Some(1.0));
        for (count, id) in ids[1..].iter().enumerate() {
            let leaf = tree.add_leaf(id, Some(1.0));
            spine = tree.add_internal(
                Some(format!("Inner{}", count + 1)),
                vec![spine, leaf],
                Some(1.0),
            );
        }
        tree.set_root(spine);
        Ok(tree)
    }
}

fn main() {
    println!("🔌 phylogen Custom Generator Examples");
    println!("=====================================\n");

    // Create registry with custom generators
    let mut registry = GeneratorRegistry::new();

    // Register custom generators alongside the built-in strategies
    registry.register(Box::new(StarTreeGenerator));
    registry.register(Box::new(CaterpillarGenerator));

    println!("📊 Available Generators:");
    for (name, description) in registry.list_generators() {
        println!("  • {}: {}", name, description);
    }
    println!();

    // A small test alignment
    let alignment = Alignment::new(vec![
        SeqRecord::new("delta", b"ACGTACGT"),
        SeqRecord::new("alpha", b"ACGTACGA"),
        SeqRecord::new("gamma", b"ACGAACGA"),
        SeqRecord::new("beta", b"TCGAACGA"),
    ])
    .expect("valid alignment");

    // Build a tree with each generator
    for key in ["star", "caterpillar", "upgma"] {
        if let Some(generator) = registry.get(key) {
            println!("🌳 Generator: {}", generator.name());
            match generator.generate(&alignment) {
                Ok(tree) => println!("   {}", to_newick(&tree)),
                Err(e) => println!("   ERROR: {}", e),
            }
            println!();
        }
    }

    // Unknown keys simply resolve to nothing
    println!("🚫 Unknown key lookup:");
    println!("   registry.get(\"bogus\") → {:?}", registry.get("bogus").map(|g| g.name()));

    println!("\n✅ Custom generator examples completed!");
    println!("💡 Tip: implement TreeGenerator to plug any construction method into the registry");
}
