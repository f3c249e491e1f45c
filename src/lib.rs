pub mod engine;
pub mod models;
pub mod store;
pub mod utils;

pub use engine::{EngineConfig, ScamAnalyzer, ScoringConfig};
pub use models::{Category, CategoryScore, Hit, RiskProfile, RiskTier};
pub use store::PatternStore;
pub use utils::{EngineError, Result};
