use serde::Serialize;

use super::Category;

/// A single matched signal contributing evidence to a category.
///
/// Produced by the extractor, owned by the analysis run that produced it.
/// Only `evidence` and `explanation` appear in the serialized result; the
/// rest is bookkeeping for aggregation and ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Hit {
    #[serde(skip_serializing)]
    pub rule_id: String,
    #[serde(skip_serializing)]
    pub category: Category,
    /// Weight of the originating rule, carried unchanged.
    #[serde(skip_serializing)]
    pub weight: f64,
    /// Byte offset of the match in the normalized text.
    #[serde(skip_serializing)]
    pub offset: usize,
    /// Matched substring, original casing preserved.
    pub evidence: String,
    /// Explanation template rendered with the evidence filled in.
    pub explanation: String,
}

impl Hit {
    pub fn new(
        rule_id: impl Into<String>,
        category: Category,
        weight: f64,
        offset: usize,
        evidence: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            weight,
            offset,
            evidence: evidence.into(),
            explanation: explanation.into(),
        }
    }
}
