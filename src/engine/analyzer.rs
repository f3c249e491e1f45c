use std::cmp::Ordering;
use std::sync::Arc;

use crate::engine::{advisory, aggregator, explain, extractor, scorer::ScoringConfig};
use crate::models::{CategoryScore, Hit, RiskProfile};
use crate::store::PatternStore;
use crate::utils::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Input beyond this many chars is truncated before analysis.
    pub max_input_chars: usize,
    /// When false, overlong input is rejected instead of truncated once it
    /// passes `hard_max_chars`.
    pub truncate_overlong: bool,
    pub hard_max_chars: usize,
    pub max_category_tips: usize,
    pub max_highlights: usize,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 10_000,
            truncate_overlong: true,
            hard_max_chars: 40_000,
            max_category_tips: 3,
            max_highlights: 8,
            scoring: ScoringConfig::default(),
        }
    }
}

/// The analysis engine. Stateless per call: each analysis is a pure function
/// of the input text and the immutable pattern store, so one analyzer can
/// serve arbitrarily many threads without locking.
pub struct ScamAnalyzer {
    store: Arc<PatternStore>,
    config: EngineConfig,
}

impl ScamAnalyzer {
    pub fn new(store: Arc<PatternStore>) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(store: Arc<PatternStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Analyze one message and assemble its risk profile.
    pub fn analyze(&self, text: &str) -> Result<RiskProfile> {
        let char_count = text.chars().count();
        let mut truncated = false;
        let mut text = text;

        if char_count > self.config.max_input_chars {
            if self.config.truncate_overlong {
                let end = text
                    .char_indices()
                    .nth(self.config.max_input_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                text = &text[..end];
                truncated = true;
            } else if char_count > self.config.hard_max_chars {
                return Err(EngineError::InputTooLarge {
                    actual: char_count,
                    limit: self.config.hard_max_chars,
                });
            }
        }

        if text.trim().is_empty() {
            return Ok(self.empty_profile(truncated));
        }

        let hits = extractor::extract(&self.store, text);
        let categories = aggregator::aggregate(&hits);
        let overall = self.config.scoring.overall(&categories);
        let tier = self.config.scoring.tier_for(overall);
        let reasons = explain::build_reasons(&categories);
        let advisories = advisory::select(tier, &categories, self.config.max_category_tips);
        let highlights = collect_highlights(&hits, self.config.max_highlights);
        let summary = summarize(&categories);

        tracing::info!(
            hits = hits.len(),
            score = overall,
            tier = %tier,
            "analysis complete"
        );

        Ok(assemble(
            overall,
            tier,
            categories,
            reasons,
            advisories,
            highlights,
            summary,
            truncated,
            self.store.version().to_string(),
        ))
    }

    fn empty_profile(&self, truncated: bool) -> RiskProfile {
        let categories = aggregator::aggregate(&[]);
        assemble(
            0.0,
            self.config.scoring.tier_for(0.0),
            categories,
            Vec::new(),
            vec![advisory::EMPTY_INPUT_ADVICE.to_string()],
            Vec::new(),
            "Not enough content to assess.".to_string(),
            truncated,
            self.store.version().to_string(),
        )
    }
}

/// Pure composition of the pipeline outputs into the final immutable
/// profile. Categories are ordered strongest first; nothing is recomputed.
#[allow(clippy::too_many_arguments)]
fn assemble(
    overall: f64,
    tier: crate::models::RiskTier,
    mut categories: Vec<CategoryScore>,
    reasons: Vec<String>,
    advisories: Vec<String>,
    highlights: Vec<String>,
    summary: String,
    truncated: bool,
    store_version: String,
) -> RiskProfile {
    categories.sort_by(|a, b| {
        b.subscore
            .partial_cmp(&a.subscore)
            .unwrap_or(Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });
    RiskProfile {
        overall,
        tier,
        categories,
        reasons,
        advisories,
        highlights,
        summary,
        truncated,
        store_version,
    }
}

/// Unique matched evidence tokens in order of appearance, capped.
fn collect_highlights(hits: &[Hit], cap: usize) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();
    for hit in hits {
        if highlights.len() == cap {
            break;
        }
        let evidence = hit.evidence.trim();
        if evidence.is_empty() {
            continue;
        }
        if highlights
            .iter()
            .any(|h| h.eq_ignore_ascii_case(evidence))
        {
            continue;
        }
        highlights.push(evidence.to_string());
    }
    highlights
}

/// One-sentence reading of the top two triggered tactics.
fn summarize(categories: &[CategoryScore]) -> String {
    let mut triggered: Vec<&CategoryScore> =
        categories.iter().filter(|c| c.subscore > 0.0).collect();
    triggered.sort_by(|a, b| {
        b.subscore
            .partial_cmp(&a.subscore)
            .unwrap_or(Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    if triggered.is_empty() {
        return "No strong scam patterns detected. Still verify the sender if you are unsure."
            .to_string();
    }

    let traits: Vec<&str> = triggered.iter().take(2).map(|c| c.category.gloss()).collect();
    format!(
        "This message shows signs of {}. Scammers use these tactics to reduce careful thinking and trigger quick actions.",
        traits.join(" and ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn analyzer() -> ScamAnalyzer {
        ScamAnalyzer::new(PatternStore::builtin())
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let profile = analyzer().analyze("").unwrap();
        assert_eq!(profile.overall, 0.0);
        assert_eq!(profile.tier, crate::models::RiskTier::Low);
        assert!(profile.reasons.is_empty());
        assert_eq!(profile.advisories.len(), 1);
    }

    #[test]
    fn test_whitespace_only_input_behaves_like_empty() {
        let profile = analyzer().analyze("  \n\t  ").unwrap();
        assert_eq!(profile.overall, 0.0);
        assert!(profile.reasons.is_empty());
    }

    #[test]
    fn test_truncation_is_recorded_and_respected() {
        let config = EngineConfig {
            max_input_chars: 50,
            ..EngineConfig::default()
        };
        let analyzer = ScamAnalyzer::with_config(PatternStore::builtin(), config);

        // The trigger phrase sits entirely beyond the cut-off.
        let text = format!("{} wire transfer", "hello ".repeat(20).trim_end());
        let profile = analyzer.analyze(&text).unwrap();
        assert!(profile.truncated);
        assert_eq!(
            profile.category(Category::PaymentTrap).unwrap().subscore,
            0.0
        );
    }

    #[test]
    fn test_overlong_input_rejected_when_truncation_disabled() {
        let config = EngineConfig {
            max_input_chars: 10,
            truncate_overlong: false,
            hard_max_chars: 20,
            ..EngineConfig::default()
        };
        let analyzer = ScamAnalyzer::with_config(PatternStore::builtin(), config);
        let result = analyzer.analyze(&"a".repeat(100));
        assert!(matches!(result, Err(EngineError::InputTooLarge { .. })));
    }

    #[test]
    fn test_categories_are_ordered_strongest_first() {
        let profile = analyzer()
            .analyze("URGENT: act now! Pay with a gift card immediately.")
            .unwrap();
        for pair in profile.categories.windows(2) {
            assert!(pair[0].subscore >= pair[1].subscore);
        }
    }

    #[test]
    fn test_highlights_are_unique_and_capped() {
        let profile = analyzer()
            .analyze("urgent urgent urgent URGENT prize prize bonus refund lottery bitcoin transfer payment police")
            .unwrap();
        assert!(profile.highlights.len() <= 8);
        for (i, a) in profile.highlights.iter().enumerate() {
            for b in &profile.highlights[i + 1..] {
                assert!(!a.eq_ignore_ascii_case(b), "duplicate highlight {a}");
            }
        }
    }

    #[test]
    fn test_summary_names_top_tactics() {
        let profile = analyzer()
            .analyze("URGENT: reply immediately, act now")
            .unwrap();
        assert!(profile.summary.contains("urgency"));
    }
}
