use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::utils::{EngineError, Result};

/// On-disk shape of a pattern store document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDoc {
    pub version: String,
    pub rules: Vec<RuleDef>,
}

/// One rule as declared in the store document, before compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub id: String,
    pub category: Category,
    /// Contribution per match, must lie in (0,1].
    pub weight: f64,
    pub matcher: MatcherDef,
    /// Explanation with an `{evidence}` placeholder for the matched span.
    pub template: String,
}

/// Declarative matcher kinds. Closed set: keyword phrases, raw regexes, and
/// the structural heuristics, all evaluated through one dispatch in the
/// extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatcherDef {
    /// Case-insensitive whole-phrase match.
    Keyword { phrase: String },
    /// Regular expression over the normalized text.
    Regex { pattern: String },
    /// Two patterns co-occurring within `window` bytes of each other.
    Proximity {
        first: String,
        second: String,
        window: usize,
    },
    /// A URL whose host matches none of the organizations the text claims.
    DomainMismatch { organizations: Vec<String> },
}

/// Compiled matcher, ready for repeated evaluation.
#[derive(Debug)]
pub enum Matcher {
    Pattern(Regex),
    Proximity {
        first: Regex,
        second: Regex,
        window: usize,
    },
    DomainMismatch {
        organizations: Vec<Organization>,
        url: Regex,
    },
}

/// An organization name the domain-mismatch heuristic can recognize, with
/// its mention pattern and the condensed token expected inside a legitimate
/// host name.
#[derive(Debug)]
pub struct Organization {
    pub name: String,
    pub token: String,
    pub mention: Regex,
}

/// An immutable, validated rule. Shared read-only across all analyses.
#[derive(Debug)]
pub struct SignalRule {
    pub id: String,
    pub category: Category,
    pub weight: f64,
    pub matcher: Matcher,
    pub template: String,
}

impl SignalRule {
    pub fn compile(def: RuleDef) -> Result<Self> {
        if def.id.trim().is_empty() {
            return Err(EngineError::PatternStore("rule with empty id".into()));
        }
        if !(def.weight > 0.0 && def.weight <= 1.0) {
            return Err(EngineError::PatternStore(format!(
                "rule '{}' weight {} outside (0,1]",
                def.id, def.weight
            )));
        }
        if def.template.trim().is_empty() {
            return Err(EngineError::PatternStore(format!(
                "rule '{}' has an empty explanation template",
                def.id
            )));
        }

        let matcher = match def.matcher {
            MatcherDef::Keyword { phrase } => {
                let phrase = phrase.trim();
                if phrase.is_empty() {
                    return Err(EngineError::PatternStore(format!(
                        "rule '{}' has an empty keyword phrase",
                        def.id
                    )));
                }
                let pattern = format!(r"\b{}\b", regex::escape(phrase));
                Matcher::Pattern(build_regex(&def.id, &pattern)?)
            }
            MatcherDef::Regex { pattern } => Matcher::Pattern(build_regex(&def.id, &pattern)?),
            MatcherDef::Proximity {
                first,
                second,
                window,
            } => {
                if window == 0 {
                    return Err(EngineError::PatternStore(format!(
                        "rule '{}' proximity window must be positive",
                        def.id
                    )));
                }
                Matcher::Proximity {
                    first: build_regex(&def.id, &first)?,
                    second: build_regex(&def.id, &second)?,
                    window,
                }
            }
            MatcherDef::DomainMismatch { organizations } => {
                if organizations.is_empty() {
                    return Err(EngineError::PatternStore(format!(
                        "rule '{}' lists no organizations",
                        def.id
                    )));
                }
                let mut compiled = Vec::with_capacity(organizations.len());
                for org in organizations {
                    let name = org.trim().to_lowercase();
                    if name.is_empty() {
                        return Err(EngineError::PatternStore(format!(
                            "rule '{}' lists an empty organization name",
                            def.id
                        )));
                    }
                    let mention =
                        build_regex(&def.id, &format!(r"\b{}\b", regex::escape(&name)))?;
                    compiled.push(Organization {
                        token: name.replace(' ', ""),
                        name,
                        mention,
                    });
                }
                Matcher::DomainMismatch {
                    organizations: compiled,
                    url: build_regex(&def.id, r"https?://[^\s<>\)]+")?,
                }
            }
        };

        Ok(Self {
            id: def.id,
            category: def.category,
            weight: def.weight,
            matcher,
            template: def.template,
        })
    }

    /// Render the explanation for one matched span.
    pub fn render(&self, evidence: &str) -> String {
        self.template.replace("{evidence}", evidence)
    }
}

fn build_regex(rule_id: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| EngineError::BadRuleRegex {
            rule: rule_id.to_string(),
            source: Box::new(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_rule(phrase: &str) -> SignalRule {
        SignalRule::compile(RuleDef {
            id: "t".into(),
            category: Category::Urgency,
            weight: 0.5,
            matcher: MatcherDef::Keyword {
                phrase: phrase.into(),
            },
            template: "saw \"{evidence}\"".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_keyword_compiles_to_word_bounded_pattern() {
        let rule = keyword_rule("free");
        let Matcher::Pattern(re) = &rule.matcher else {
            panic!("expected pattern matcher");
        };
        assert!(re.is_match("this is free stuff"));
        assert!(re.is_match("FREE money"));
        // No partial-word matches.
        assert!(!re.is_match("freedom"));
        assert!(!re.is_match("carefree"));
    }

    #[test]
    fn test_keyword_phrase_with_spaces() {
        let rule = keyword_rule("gift card");
        let Matcher::Pattern(re) = &rule.matcher else {
            panic!("expected pattern matcher");
        };
        assert!(re.is_match("pay with a gift card today"));
    }

    #[test]
    fn test_render_fills_evidence() {
        let rule = keyword_rule("urgent");
        assert_eq!(rule.render("URGENT"), "saw \"URGENT\"");
    }
}
