use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{CategoryScore, Hit};

/// Turn hits into unique human-readable reasons: strongest category first,
/// then heavier rules, then earlier matches. Two hits that render the same
/// string (the same rule matching twice) collapse into one entry.
pub fn build_reasons(scores: &[CategoryScore]) -> Vec<String> {
    let mut ordered: Vec<&CategoryScore> = scores.iter().filter(|c| !c.hits.is_empty()).collect();
    ordered.sort_by(|a, b| {
        b.subscore
            .partial_cmp(&a.subscore)
            .unwrap_or(Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    let mut seen = HashSet::new();
    let mut reasons = Vec::new();
    for score in ordered {
        let mut hits: Vec<&Hit> = score.hits.iter().collect();
        hits.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then(a.offset.cmp(&b.offset))
        });
        for hit in hits {
            let reason = format!("{}: {}", score.category.name(), hit.explanation);
            if seen.insert(reason.clone()) {
                reasons.push(reason);
            }
        }
    }
    reasons
}
