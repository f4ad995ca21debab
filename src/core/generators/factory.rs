// factory.rs - Registry mapping method keys to pre-built strategies

use std::collections::HashMap;
use crate::core::calculator::ScoringModel;
use crate::core::distance::DistanceTreeMethod;
use crate::core::generators::{
    DistanceTreeGenerator, ParsimonyTreeGenerator, TreeGenerator,
};
use crate::core::tree::Tree;

/// Registry of available tree generators.
///
/// Lookup of a registered key returns the strategy; any unknown key
/// returns `None`.
pub struct GeneratorRegistry {
    generators: HashMap<String, Box<dyn TreeGenerator>>,
}

impl GeneratorRegistry {
    /// Registry with the built-in strategies over identity distances
    pub fn new() -> Self {
        Self::with_model(ScoringModel::identity(), None)
    }

    /// Registry configured with a scoring model for the distance-based
    /// strategies and an optional starter tree for parsimony
    pub fn with_options(scoring: &str, starter: Option<Tree>) -> Result<Self, String> {
        Ok(Self::with_model(ScoringModel::by_name(scoring)?, starter))
    }

    fn with_model(model: ScoringModel, starter: Option<Tree>) -> Self {
        let mut registry = Self {
            generators: HashMap::new(),
        };

        // Register built-in generators
        registry.register(Box::new(DistanceTreeGenerator::new(
            DistanceTreeMethod::Upgma,
            model.clone(),
        )));
        registry.register(Box::new(DistanceTreeGenerator::new(
            DistanceTreeMethod::Nj,
            model,
        )));
        let parsimony = match starter {
            Some(tree) => ParsimonyTreeGenerator::with_starter(tree),
            None => ParsimonyTreeGenerator::new(),
        };
        registry.register(Box::new(parsimony));

        registry
    }

    /// Register a generator under its own name
    pub fn register(&mut self, generator: Box<dyn TreeGenerator>) {
        self.generators
            .insert(generator.name().to_string(), generator);
    }

    /// Get a generator by key; unknown keys return `None`
    pub fn get(&self, key: &str) -> Option<&dyn TreeGenerator> {
        self.generators.get(key).map(|g| g.as_ref())
    }

    /// Check if a generator exists
    pub fn has_generator(&self, key: &str) -> bool {
        self.generators.contains_key(key)
    }

    /// List all available generators
    pub fn list_generators(&self) -> Vec<(&str, &str)> {
        let mut list: Vec<(&str, &str)> = self
            .generators
            .values()
            .map(|g| (g.name(), g.description()))
            .collect();
        list.sort_by_key(|(name, _)| *name);
        list
    }

    /// Get all generator names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_keys_resolve() {
        let registry = GeneratorRegistry::new();
        for key in ["upgma", "nj", "parsimony"] {
            let generator = registry.get(key);
            assert!(generator.is_some(), "key '{}' should resolve", key);
            assert_eq!(generator.unwrap().name(), key);
            assert!(registry.has_generator(key));
        }
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let registry = GeneratorRegistry::new();
        assert!(registry.get("maximum-likelihood").is_none());
        assert!(registry.get("").is_none());
        assert!(registry.get("UPGMA").is_none()); // keys are case-sensitive
        assert!(!registry.has_generator("bayesian"));
    }

    #[test]
    fn test_every_listed_generator_resolves() {
        let registry = GeneratorRegistry::new();
        let listed = registry.list_generators();
        assert_eq!(listed.len(), 3);
        for (name, _) in listed {
            assert!(registry.get(name).is_some());
        }
    }

    #[test]
    fn test_names_sorted() {
        let registry = GeneratorRegistry::new();
        assert_eq!(registry.names(), vec!["nj", "parsimony", "upgma"]);
    }

    #[test]
    fn test_with_options_validates_scoring() {
        assert!(GeneratorRegistry::with_options("blastn", None).is_ok());
        assert!(GeneratorRegistry::with_options("bogus", None).is_err());
    }
}
