pub mod advisory;
pub mod aggregator;
pub mod analyzer;
pub mod explain;
pub mod extractor;
pub mod scorer;

pub use analyzer::{EngineConfig, ScamAnalyzer};
pub use scorer::ScoringConfig;
