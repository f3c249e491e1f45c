use crate::models::{CategoryScore, RiskTier};

/// Every tunable scoring constant in one place: the max/breadth blend and
/// the tier threshold table.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Share of the overall score carried by the single worst category.
    pub max_blend: f64,
    /// Share carried by the mean of the remaining categories.
    pub breadth_blend: f64,
    /// Scores below this are Low.
    pub low_ceiling: f64,
    /// Scores below this (and at least `low_ceiling`) are Medium.
    pub medium_ceiling: f64,
    /// Scores below this (and at least `medium_ceiling`) are High; the rest
    /// are Critical.
    pub high_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_blend: 0.6,
            breadth_blend: 0.4,
            low_ceiling: 0.25,
            medium_ceiling: 0.5,
            high_ceiling: 0.75,
        }
    }
}

impl ScoringConfig {
    /// Blend the worst category with the breadth of the rest: one glaring
    /// red flag dominates, while several weakly-triggered categories still
    /// compound suspicion.
    pub fn overall(&self, scores: &[CategoryScore]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        let max = scores.iter().map(|c| c.subscore).fold(0.0_f64, f64::max);
        let rest_mean = if scores.len() > 1 {
            let rest_sum = scores.iter().map(|c| c.subscore).sum::<f64>() - max;
            rest_sum / (scores.len() - 1) as f64
        } else {
            0.0
        };
        (max * self.max_blend + rest_mean * self.breadth_blend).clamp(0.0, 1.0)
    }

    pub fn tier_for(&self, overall: f64) -> RiskTier {
        if overall < self.low_ceiling {
            RiskTier::Low
        } else if overall < self.medium_ceiling {
            RiskTier::Medium
        } else if overall < self.high_ceiling {
            RiskTier::High
        } else {
            RiskTier::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn scores(subscores: &[f64]) -> Vec<CategoryScore> {
        subscores
            .iter()
            .zip(Category::ALL)
            .map(|(&subscore, category)| CategoryScore {
                category,
                subscore,
                hits: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_all_zero_scores_zero() {
        let cfg = ScoringConfig::default();
        let overall = cfg.overall(&scores(&[0.0; 6]));
        assert_eq!(overall, 0.0);
        assert_eq!(cfg.tier_for(overall), RiskTier::Low);
    }

    #[test]
    fn test_single_strong_category_dominates() {
        let cfg = ScoringConfig::default();
        let one_flag = cfg.overall(&scores(&[0.9, 0.0, 0.0, 0.0, 0.0, 0.0]));
        let spread = cfg.overall(&scores(&[0.15, 0.15, 0.15, 0.15, 0.15, 0.15]));
        assert!(one_flag > spread);
    }

    #[test]
    fn test_breadth_raises_the_score() {
        let cfg = ScoringConfig::default();
        let narrow = cfg.overall(&scores(&[0.6, 0.0, 0.0, 0.0, 0.0, 0.0]));
        let broad = cfg.overall(&scores(&[0.6, 0.5, 0.5, 0.5, 0.0, 0.0]));
        assert!(broad > narrow);
    }

    #[test]
    fn test_overall_stays_in_unit_interval() {
        let cfg = ScoringConfig::default();
        let overall = cfg.overall(&scores(&[1.0; 6]));
        assert!(overall <= 1.0);
        assert!(cfg.overall(&scores(&[0.0; 6])) >= 0.0);
    }

    #[test]
    fn test_tier_thresholds() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.tier_for(0.0), RiskTier::Low);
        assert_eq!(cfg.tier_for(0.249), RiskTier::Low);
        assert_eq!(cfg.tier_for(0.25), RiskTier::Medium);
        assert_eq!(cfg.tier_for(0.499), RiskTier::Medium);
        assert_eq!(cfg.tier_for(0.5), RiskTier::High);
        assert_eq!(cfg.tier_for(0.749), RiskTier::High);
        assert_eq!(cfg.tier_for(0.75), RiskTier::Critical);
        assert_eq!(cfg.tier_for(1.0), RiskTier::Critical);
    }
}
