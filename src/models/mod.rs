pub mod category;
pub mod hit;
pub mod profile;

pub use category::Category;
pub use hit::Hit;
pub use profile::{CategoryScore, RiskProfile, RiskTier};
