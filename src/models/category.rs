use serde::{Deserialize, Serialize};

/// One manipulation-tactic dimension of the Scam DNA profile.
///
/// The set is closed: pattern store documents may only reference these
/// variants, and every analysis reports all of them (hitless ones at zero)
/// so the profile shape is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Urgency,
    Authority,
    PaymentTrap,
    Fear,
    Reward,
    TrustHijack,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Urgency,
        Category::Authority,
        Category::PaymentTrap,
        Category::Fear,
        Category::Reward,
        Category::TrustHijack,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Urgency => "Urgency",
            Category::Authority => "Authority",
            Category::PaymentTrap => "PaymentTrap",
            Category::Fear => "Fear",
            Category::Reward => "Reward",
            Category::TrustHijack => "TrustHijack",
        }
    }

    /// Short tactic description used in the one-line summary.
    pub fn gloss(&self) -> &'static str {
        match self {
            Category::Urgency => "urgency (forcing fast decisions)",
            Category::Authority => "authority impersonation (posing as a trusted institution)",
            Category::PaymentTrap => {
                "a payment trap (pushing you to pay or transfer outside normal flow)"
            }
            Category::Fear => "a fear tactic (threatening consequences)",
            Category::Reward => "reward bait (promising prizes or refunds)",
            Category::TrustHijack => {
                "trust hijacking (suspicious links or credential requests to move you off-platform)"
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
