use serde::{Serialize, Serializer};

use super::{Category, Hit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn emoji(&self) -> &'static str {
        match self {
            RiskTier::Critical => "🔴",
            RiskTier::High => "🟠",
            RiskTier::Medium => "🟡",
            RiskTier::Low => "🟢",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A category paired with its saturated sub-score and contributing hits.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    #[serde(rename = "name")]
    pub category: Category,
    /// Sub-score in [0,1]; serialized on the 0-100 display scale.
    #[serde(rename = "subscore0to100", serialize_with = "as_percent")]
    pub subscore: f64,
    pub hits: Vec<Hit>,
}

impl CategoryScore {
    pub fn subscore_0to100(&self) -> f64 {
        self.subscore * 100.0
    }
}

/// The final artifact of one analysis run. Immutable after assembly,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    /// Overall risk in [0,1]; serialized on the 0-100 display scale.
    #[serde(rename = "overallScore", serialize_with = "as_percent")]
    pub overall: f64,
    pub tier: RiskTier,
    /// All categories, highest sub-score first.
    pub categories: Vec<CategoryScore>,
    /// Unique evidence-grounded reasons, strongest first.
    pub reasons: Vec<String>,
    pub advisories: Vec<String>,
    /// Unique matched evidence tokens in order of appearance.
    pub highlights: Vec<String>,
    /// One-sentence reading of the dominant tactics.
    pub summary: String,
    /// True when the input exceeded the configured maximum and only the
    /// leading portion was analyzed.
    pub truncated: bool,
    pub store_version: String,
}

impl RiskProfile {
    pub fn overall_0to100(&self) -> f64 {
        self.overall * 100.0
    }

    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == category)
    }
}

fn as_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value * 100.0)
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "                   SCAM DNA REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(
            f,
            "{} Risk: {:.0}/100 ({})",
            self.tier.emoji(),
            self.overall_0to100(),
            self.tier
        )?;
        if self.truncated {
            writeln!(f, "(input was truncated before analysis)")?;
        }
        writeln!(f)?;
        writeln!(f, "═══ DNA PROFILE ═══")?;
        for score in &self.categories {
            writeln!(
                f,
                "  {:<12} {:>3.0}/100  ({} signals)",
                score.category.name(),
                score.subscore_0to100(),
                score.hits.len()
            )?;
        }
        if !self.reasons.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ REASONS ═══")?;
            for reason in self.reasons.iter().take(10) {
                writeln!(f, "  • {}", reason)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "═══ WHAT TO DO ═══")?;
        for tip in &self.advisories {
            writeln!(f, "  • {}", tip)?;
        }
        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        Ok(())
    }
}
