//! Goal recommendations and feasibility analysis.
//!
//! These functions orchestrate the goal and profile entities into
//! human-readable advice. Suggestion lists keep their fixed evaluation order;
//! they are never re-sorted by priority.

pub mod adjustments;
pub mod feasibility;
pub mod savings;

use serde::{Deserialize, Serialize};

pub use adjustments::{suggest_goal_adjustments, GoalRecommendation};
pub use feasibility::{analyze_goal_feasibility, GoalFeasibility, RiskLevel};
pub use savings::{recommend_monthly_savings, SavingsRecommendation};

/// How urgently a recommendation should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}
