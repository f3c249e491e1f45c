pub mod rules;

pub use rules::{Matcher, MatcherDef, Organization, RuleDef, SignalRule, StoreDoc};

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::utils::{EngineError, Result};

const BUILTIN_RULES: &str = include_str!("default_rules.json");

static BUILTIN: Lazy<Arc<PatternStore>> = Lazy::new(|| {
    // The embedded document is validated by unit tests; a broken build of it
    // must fail at first use rather than serve a partial store.
    Arc::new(PatternStore::from_json(BUILTIN_RULES).expect("embedded default rule set is valid"))
});

/// Immutable collection of signal rules, loaded once and shared read-only
/// across all analyses. Replacing rules means building a whole new store.
pub struct PatternStore {
    version: String,
    rules: Vec<SignalRule>,
}

impl PatternStore {
    /// The rule set compiled into the crate.
    pub fn builtin() -> Arc<PatternStore> {
        Arc::clone(&BUILTIN)
    }

    /// Load and validate a store from a declarative JSON document.
    /// Any invalid rule is fatal; a partially loaded store is never returned.
    pub fn from_json(doc: &str) -> Result<Self> {
        let doc: StoreDoc = serde_json::from_str(doc)?;
        Self::from_doc(doc)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_doc(doc: StoreDoc) -> Result<Self> {
        if doc.version.trim().is_empty() {
            return Err(EngineError::PatternStore("store version is empty".into()));
        }
        if doc.rules.is_empty() {
            return Err(EngineError::PatternStore("store defines no rules".into()));
        }

        let mut seen = std::collections::HashSet::new();
        let mut rules = Vec::with_capacity(doc.rules.len());
        for def in doc.rules {
            if !seen.insert(def.id.clone()) {
                return Err(EngineError::PatternStore(format!(
                    "duplicate rule id '{}'",
                    def.id
                )));
            }
            rules.push(SignalRule::compile(def)?);
        }

        tracing::debug!(version = %doc.version, rules = rules.len(), "pattern store loaded");

        Ok(Self {
            version: doc.version,
            rules,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[SignalRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_builtin_store_loads() {
        let store = PatternStore::builtin();
        assert!(!store.rules().is_empty());
        assert!(!store.version().is_empty());
        // Every category has at least one rule in the default bank.
        for category in Category::ALL {
            assert!(
                store.rules().iter().any(|r| r.category == category),
                "no rules for {category}"
            );
        }
    }

    #[test]
    fn test_duplicate_rule_id_rejected() {
        let doc = r#"{
            "version": "t",
            "rules": [
                {"id": "a", "category": "Urgency", "weight": 0.5,
                 "matcher": {"kind": "keyword", "phrase": "urgent"},
                 "template": "x \"{evidence}\""},
                {"id": "a", "category": "Fear", "weight": 0.5,
                 "matcher": {"kind": "keyword", "phrase": "locked"},
                 "template": "y \"{evidence}\""}
            ]
        }"#;
        assert!(matches!(
            PatternStore::from_json(doc),
            Err(EngineError::PatternStore(_))
        ));
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        for weight in ["0.0", "1.5", "-0.2"] {
            let doc = format!(
                r#"{{"version": "t", "rules": [
                    {{"id": "a", "category": "Urgency", "weight": {weight},
                      "matcher": {{"kind": "keyword", "phrase": "urgent"}},
                      "template": "x \"{{evidence}}\""}}]}}"#
            );
            assert!(
                PatternStore::from_json(&doc).is_err(),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_regex_rejected() {
        let doc = r#"{
            "version": "t",
            "rules": [
                {"id": "a", "category": "Urgency", "weight": 0.5,
                 "matcher": {"kind": "regex", "pattern": "(unclosed"},
                 "template": "x \"{evidence}\""}
            ]
        }"#;
        assert!(matches!(
            PatternStore::from_json(doc),
            Err(EngineError::BadRuleRegex { .. })
        ));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let doc = r#"{
            "version": "t",
            "rules": [
                {"id": "a", "category": "Astrology", "weight": 0.5,
                 "matcher": {"kind": "keyword", "phrase": "urgent"},
                 "template": "x \"{evidence}\""}
            ]
        }"#;
        assert!(matches!(
            PatternStore::from_json(doc),
            Err(EngineError::JsonError(_))
        ));
    }

    #[test]
    fn test_empty_template_rejected() {
        let doc = r#"{
            "version": "t",
            "rules": [
                {"id": "a", "category": "Urgency", "weight": 0.5,
                 "matcher": {"kind": "keyword", "phrase": "urgent"},
                 "template": "  "}
            ]
        }"#;
        assert!(PatternStore::from_json(doc).is_err());
    }
}
