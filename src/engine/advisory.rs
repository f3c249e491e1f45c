use std::cmp::Ordering;

use crate::models::{Category, CategoryScore, RiskTier};

/// Advisory returned when the input is empty after normalization.
pub const EMPTY_INPUT_ADVICE: &str =
    "Paste more of the message text to get a meaningful assessment.";

/// Deterministic advice lookup: one base line per tier, then tips for the
/// triggered categories (strongest first, capped), with duplicates dropped.
pub fn select(
    tier: RiskTier,
    scores: &[CategoryScore],
    max_category_tips: usize,
) -> Vec<String> {
    let mut advisories = vec![base_advice(tier).to_string()];

    let mut active: Vec<&CategoryScore> = scores.iter().filter(|c| c.subscore > 0.0).collect();
    active.sort_by(|a, b| {
        b.subscore
            .partial_cmp(&a.subscore)
            .unwrap_or(Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    let mut added = 0;
    for score in active {
        if added == max_category_tips {
            break;
        }
        let tip = category_tip(score.category);
        if advisories.iter().any(|existing| existing == tip) {
            continue;
        }
        advisories.push(tip.to_string());
        added += 1;
    }

    advisories
}

fn base_advice(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => {
            "No strong scam indicators. If unsure, verify through an official contact method before acting."
        }
        RiskTier::Medium => {
            "Treat this message with caution and verify the sender through an official channel before responding."
        }
        RiskTier::High => {
            "Do not respond or click anything in this message until you have verified it through an official channel."
        }
        RiskTier::Critical => {
            "Stop. Do not reply, click, or pay. Contact the claimed organization yourself through its official app or website."
        }
    }
}

fn category_tip(category: Category) -> &'static str {
    match category {
        Category::TrustHijack => {
            "Avoid clicking links or QR codes from messages. Use official apps or type the website address yourself."
        }
        Category::PaymentTrap => {
            "Never transfer money or share an OTP, PIN, or card details from a message. Confirm via official bank channels."
        }
        // Urgency and fear are the same pressure play; one tip covers both.
        Category::Urgency | Category::Fear => {
            "Pause before acting. Urgent deadlines and threats are a common scam tactic."
        }
        Category::Authority => {
            "Verify the sender's identity. Real institutions will not pressure you via random SMS or chat."
        }
        Category::Reward => {
            "Be cautious of prizes or refunds you did not request. Check with the official service."
        }
    }
}
