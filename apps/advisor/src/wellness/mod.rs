//! Mental-health screening, sleep scoring and AI-generated self-care lists.

pub mod insights;
pub mod screening;
pub mod sleep;

pub use insights::extract_points;
pub use screening::{score_screening, ScreeningKind, ScreeningResult, ScreeningRisk};
pub use sleep::SleepLog;
