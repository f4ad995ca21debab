// mod.rs - Parsimony scoring, NNI search and construction

pub mod constructor;
pub mod scorer;
pub mod searcher;

pub use constructor::ParsimonyTreeConstructor;
pub use scorer::ParsimonyScorer;
pub use searcher::NniSearcher;
