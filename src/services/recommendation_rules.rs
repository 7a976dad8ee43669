//! Ordered decision table mapping a fatigue score to a recommendation.
//!
//! Rules are evaluated top to bottom and the first match wins. Only the
//! score and the days since the last workout feed into the decision.

use crate::models::Recommendation;

/// One row of the recommendation table
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub name: &'static str,
    pub applies: fn(u8, i64) -> bool,
    pub recommendation: Recommendation,
    pub reason: &'static str,
}

pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        name: "high_fatigue",
        applies: |score, _| score >= 70,
        recommendation: Recommendation::Rest,
        reason: "High fatigue detected — deload recommended for recovery",
    },
    RecommendationRule {
        name: "moderate_fatigue",
        applies: |score, _| score >= 50,
        recommendation: Recommendation::Rest,
        reason: "Moderate fatigue — lighter session recommended",
    },
    RecommendationRule {
        name: "well_recovered",
        applies: |score, days_since| score <= 20 && days_since >= 3,
        recommendation: Recommendation::Intensity,
        reason: "Well recovered — push for progressive overload",
    },
    RecommendationRule {
        name: "fresh",
        applies: |score, _| score <= 30,
        recommendation: Recommendation::Intensity,
        reason: "Fresh and ready — increase volume or intensity",
    },
];

/// Applied when no rule in the table matches
pub static DEFAULT_RULE: RecommendationRule = RecommendationRule {
    name: "normal_training",
    applies: |_, _| true,
    recommendation: Recommendation::Volume,
    reason: "Normal training — maintain current volume",
};

/// Find the first rule matching the given score and recency
pub fn select_rule(fatigue_score: u8, days_since_last_workout: i64) -> &'static RecommendationRule {
    RECOMMENDATION_RULES
        .iter()
        .find(|rule| (rule.applies)(fatigue_score, days_since_last_workout))
        .unwrap_or(&DEFAULT_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RECOMMENDATION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["high_fatigue", "moderate_fatigue", "well_recovered", "fresh"]
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(select_rule(70, 0).name, "high_fatigue");
        assert_eq!(select_rule(69, 0).name, "moderate_fatigue");
        assert_eq!(select_rule(50, 10).name, "moderate_fatigue");
        assert_eq!(select_rule(49, 10).name, "normal_training");
        assert_eq!(select_rule(31, 2).name, "normal_training");
        assert_eq!(select_rule(30, 2).name, "fresh");
        assert_eq!(select_rule(20, 2).name, "fresh");
        assert_eq!(select_rule(20, 3).name, "well_recovered");
        assert_eq!(select_rule(0, 999).name, "well_recovered");
    }

    #[test]
    fn test_reasons() {
        assert_eq!(
            select_rule(75, 0).reason,
            "High fatigue detected — deload recommended for recovery"
        );
        assert_eq!(
            select_rule(0, 8).reason,
            "Well recovered — push for progressive overload"
        );
        assert_eq!(select_rule(40, 2).reason, "Normal training — maintain current volume");
    }

    proptest! {
        #[test]
        fn rest_iff_score_at_least_50(score in 0u8..=100, days in 0i64..1000) {
            let rule = select_rule(score, days);
            prop_assert_eq!(rule.recommendation == Recommendation::Rest, score >= 50);
        }

        #[test]
        fn intensity_implies_low_score(score in 0u8..=100, days in 0i64..1000) {
            let rule = select_rule(score, days);
            if rule.recommendation == Recommendation::Intensity {
                prop_assert!(score <= 30 || (score <= 20 && days >= 3));
            }
        }
    }
}
