use crate::models::{Category, CategoryScore, Hit};

/// Group hits by category and compute each saturated sub-score. Every
/// category is reported, hitless ones at zero, so the profile shape is
/// stable across inputs.
pub fn aggregate(hits: &[Hit]) -> Vec<CategoryScore> {
    Category::ALL
        .iter()
        .map(|&category| {
            let cat_hits: Vec<Hit> = hits
                .iter()
                .filter(|h| h.category == category)
                .cloned()
                .collect();
            let subscore = saturating_sum(cat_hits.iter().map(|h| h.weight));
            CategoryScore {
                category,
                subscore,
                hits: cat_hits,
            }
        })
        .collect()
}

/// Diminishing-returns fold: each weight contributes `w * (1 - current)`.
/// Equivalent to `1 - Π(1 - w_i)`, so the result does not depend on fold
/// order (up to float tolerance) and can never exceed 1.
pub fn saturating_sum(weights: impl Iterator<Item = f64>) -> f64 {
    weights
        .fold(0.0_f64, |acc, w| acc + w * (1.0 - acc))
        .clamp(0.0, 1.0)
}
