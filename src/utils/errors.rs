use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("input too large: {actual} chars exceeds hard limit of {limit}")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("pattern store: {0}")]
    PatternStore(String),

    #[error("pattern store: rule '{rule}' has invalid regex: {source}")]
    BadRuleRegex {
        rule: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("rule evaluation failed: {0}")]
    RuleEvaluation(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
