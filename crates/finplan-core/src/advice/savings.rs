use serde::Serialize;

use crate::advice::RecommendationPriority;
use crate::goal::{Goal, GoalType};
use crate::money::Money;
use crate::period::Period;
use crate::PlanResult;

/// A gap above this many yen pushes the recommendation to high priority.
const HIGH_PRIORITY_GAP_JPY: f64 = 50_000.0;

/// Achievability buckets, in yen of recommended monthly savings.
const EASY_THRESHOLD_JPY: f64 = 10_000.0;
const EFFORT_THRESHOLD_JPY: f64 = 50_000.0;
const PLANNING_THRESHOLD_JPY: f64 = 100_000.0;

/// A recommended monthly savings amount for one goal.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsRecommendation {
    pub recommended_amount: Money,
    pub current_gap: Money,
    pub priority: RecommendationPriority,
    pub rationale: String,
    pub achievability: String,
}

/// Recommend the monthly savings needed to reach a goal within the time
/// remaining.
///
/// An already-achieved goal gets a zero recommendation at low priority; an
/// expired deadline escalates the full remaining amount at high priority.
/// Otherwise the remaining amount is spread evenly over the remaining months
/// (no compounding of the contributions).
pub fn recommend_monthly_savings(
    goal: &Goal,
    _current_savings: Money,
    time_remaining: Period,
) -> PlanResult<SavingsRecommendation> {
    let remaining_amount = goal.remaining_amount()?;

    if remaining_amount.is_zero() || remaining_amount.is_negative() {
        let zero = Money::zero(goal.target_amount().currency());
        return Ok(SavingsRecommendation {
            recommended_amount: zero,
            current_gap: zero,
            priority: RecommendationPriority::Low,
            rationale: "The goal has already been achieved.".into(),
            achievability: "already achieved".into(),
        });
    }

    let remaining_months = time_remaining.to_months();
    if remaining_months <= 0 {
        return Ok(SavingsRecommendation {
            recommended_amount: remaining_amount,
            current_gap: remaining_amount,
            priority: RecommendationPriority::High,
            rationale: "The goal deadline has passed; immediate action is required.".into(),
            achievability: "deadline passed".into(),
        });
    }

    let recommended_amount = Money::new(
        remaining_amount.amount() / f64::from(remaining_months),
        goal.target_amount().currency(),
    )?;

    let current_gap = recommended_amount.subtract(goal.monthly_contribution())?;

    let priority = determine_savings_priority(goal, current_gap, remaining_months);
    let achievability = evaluate_achievability(recommended_amount);
    let rationale = format!(
        "To reach your {}, save {} per month over the remaining {} months.",
        goal.goal_type(),
        recommended_amount,
        remaining_months
    );

    Ok(SavingsRecommendation {
        recommended_amount,
        current_gap,
        priority,
        rationale,
        achievability,
    })
}

fn determine_savings_priority(
    goal: &Goal,
    current_gap: Money,
    remaining_months: i32,
) -> RecommendationPriority {
    // Emergency reserves come first
    if goal.goal_type() == GoalType::Emergency {
        return RecommendationPriority::High;
    }

    if remaining_months <= 6 {
        return RecommendationPriority::High;
    }

    if current_gap.is_positive() && current_gap.amount() > HIGH_PRIORITY_GAP_JPY {
        return RecommendationPriority::High;
    }

    if goal.goal_type() == GoalType::Retirement {
        return RecommendationPriority::Medium;
    }

    RecommendationPriority::Low
}

fn evaluate_achievability(recommended_amount: Money) -> String {
    let amount = recommended_amount.amount();

    let label = if amount <= EASY_THRESHOLD_JPY {
        "easily achievable"
    } else if amount <= EFFORT_THRESHOLD_JPY {
        "achievable with effort"
    } else if amount <= PLANNING_THRESHOLD_JPY {
        "requires planning"
    } else {
        "requires major lifestyle change"
    };

    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, Utc};

    fn goal(goal_type: GoalType, target: f64, contribution: f64, months_out: u32) -> Goal {
        let target_date = Utc::now()
            .date_naive()
            .checked_add_months(Months::new(months_out))
            .unwrap();

        Goal::new(
            goal_type,
            "goal",
            Money::jpy(target).unwrap(),
            target_date,
            Money::jpy(contribution).unwrap(),
        )
        .unwrap()
    }

    fn no_savings() -> Money {
        Money::jpy(0.0).unwrap()
    }

    #[test]
    fn test_achieved_goal_gets_zero_low_priority() {
        let mut g = goal(GoalType::Savings, 1_000_000.0, 10_000.0, 12);
        g.update_current_amount(Money::jpy(1_000_000.0).unwrap())
            .unwrap();

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(12).unwrap())
            .unwrap();

        assert!(rec.recommended_amount.is_zero());
        assert!(rec.current_gap.is_zero());
        assert_eq!(rec.priority, RecommendationPriority::Low);
        assert_eq!(rec.achievability, "already achieved");
    }

    #[test]
    fn test_expired_period_escalates_full_amount() {
        let g = goal(GoalType::Savings, 1_000_000.0, 10_000.0, 12);

        let rec =
            recommend_monthly_savings(&g, no_savings(), Period::new(0, 0).unwrap()).unwrap();

        assert_eq!(rec.recommended_amount.amount(), 1_000_000.0);
        assert_eq!(rec.priority, RecommendationPriority::High);
        assert_eq!(rec.achievability, "deadline passed");
    }

    #[test]
    fn test_even_spread_over_remaining_months() {
        let g = goal(GoalType::Savings, 1_200_000.0, 10_000.0, 24);

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(24).unwrap())
            .unwrap();

        // 1.2M over 24 months
        assert_eq!(rec.recommended_amount.amount(), 50_000.0);
        // Gap vs the 10k already being contributed
        assert_eq!(rec.current_gap.amount(), 40_000.0);
    }

    #[test]
    fn test_emergency_goal_is_high_priority() {
        let g = goal(GoalType::Emergency, 300_000.0, 10_000.0, 24);

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(24).unwrap())
            .unwrap();

        assert_eq!(rec.priority, RecommendationPriority::High);
    }

    #[test]
    fn test_short_runway_is_high_priority() {
        let g = goal(GoalType::Savings, 120_000.0, 10_000.0, 6);

        let rec =
            recommend_monthly_savings(&g, no_savings(), Period::from_months(6).unwrap()).unwrap();

        assert_eq!(rec.priority, RecommendationPriority::High);
    }

    #[test]
    fn test_large_gap_is_high_priority() {
        // 1.8M over 12 months needs 150k/month against a 10k contribution
        let g = goal(GoalType::Savings, 1_800_000.0, 10_000.0, 12);

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(12).unwrap())
            .unwrap();

        assert!(rec.current_gap.amount() > 50_000.0);
        assert_eq!(rec.priority, RecommendationPriority::High);
    }

    #[test]
    fn test_retirement_goal_is_medium_priority() {
        // Small gap, long runway: falls through to the retirement bucket
        let g = goal(GoalType::Retirement, 480_000.0, 20_000.0, 24);

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(24).unwrap())
            .unwrap();

        assert_eq!(rec.recommended_amount.amount(), 20_000.0);
        assert_eq!(rec.priority, RecommendationPriority::Medium);
    }

    #[test]
    fn test_modest_goal_is_low_priority() {
        let g = goal(GoalType::Savings, 240_000.0, 20_000.0, 24);

        let rec = recommend_monthly_savings(&g, no_savings(), Period::from_months(24).unwrap())
            .unwrap();

        assert_eq!(rec.priority, RecommendationPriority::Low);
    }

    #[test]
    fn test_achievability_buckets() {
        let cases = [
            (120_000.0, "easily achievable"),         // 5k/month over 24 months
            (960_000.0, "achievable with effort"),    // 40k/month
            (1_920_000.0, "requires planning"),       // 80k/month
            (4_800_000.0, "requires major lifestyle change"), // 200k/month
        ];

        for (target, expected) in cases {
            let g = goal(GoalType::Savings, target, 0.0, 24);
            let rec =
                recommend_monthly_savings(&g, no_savings(), Period::from_months(24).unwrap())
                    .unwrap();
            assert_eq!(rec.achievability, expected, "target {}", target);
        }
    }
}
