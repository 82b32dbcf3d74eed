use super::catalog::{CONSERVATIVE_HYBRID_ID, Catalog, LARGE_CAP_ID, LIQUID_ID};
use super::confidence::confidence_score;
use super::rates::{RateProvider, effective_rate};
use super::tvm::{
    future_value_lumpsum, future_value_periodic, inflation_adjust, months_between,
    required_periodic_contribution,
};
use super::types::{
    Category, Goal, GoalStatus, HorizonGuidance, Insight, Recommendation, Scenario, ScenarioKind,
};

pub const SHORT_DURATION_WARNING: &str = "short duration, capital protection prioritized";
pub const NOT_ACHIEVABLE_WARNING: &str =
    "not achievable in any category; raise the monthly contribution or extend the target date";

const SHORT_HORIZON_MONTHS: u32 = 12;

const SCENARIO_CATEGORIES: [(ScenarioKind, &str); 3] = [
    (ScenarioKind::Conservative, LIQUID_ID),
    (ScenarioKind::Balanced, CONSERVATIVE_HYBRID_ID),
    (ScenarioKind::Aggressive, LARGE_CAP_ID),
];

#[derive(Debug, Clone, Copy)]
struct Horizon {
    months: u32,
    years: f64,
}

impl Horizon {
    fn of(goal: &Goal) -> Self {
        let months = months_between(goal.start_date, goal.target_date);
        Self {
            months,
            years: months as f64 / 12.0,
        }
    }
}

/// Selection runs in three stages: rank by confidence, fall back to the
/// smallest shortfall when nothing is achievable, then force the liquid
/// category for horizons under a year.
pub fn evaluate_goal(goal: &Goal, catalog: &Catalog, rates: &dyn RateProvider) -> Insight {
    let horizon = Horizon::of(goal);
    let target = inflation_adjust(
        goal.amount_needed_today,
        goal.inflation_rate_percent,
        horizon.years,
    );

    let evaluated: Vec<Recommendation> = catalog
        .categories()
        .iter()
        .map(|category| evaluate_category(goal, category, horizon, target, rates))
        .collect();

    let achievable = evaluated.iter().any(Recommendation::is_achievable);
    let status = if achievable {
        GoalStatus::Achievable
    } else {
        GoalStatus::NotAchievable
    };

    let ranked = rank_by_confidence(&evaluated);
    let mut warnings = Vec::new();
    let mut primary = select_primary(&ranked, &evaluated);
    if horizon.months < SHORT_HORIZON_MONTHS {
        if let Some(liquid) = evaluated.iter().find(|r| r.category_id == LIQUID_ID) {
            primary = Some(liquid.clone());
        }
        warnings.push(SHORT_DURATION_WARNING.to_string());
    }

    if !achievable {
        warnings.push(NOT_ACHIEVABLE_WARNING.to_string());
    }
    if let Some(rec) = primary.as_ref().filter(|r| !r.is_achievable()) {
        warnings.push(format!(
            "{} leaves a shortfall of {:.0}; an extra monthly contribution of {:.0} closes it",
            rec.category_name,
            rec.shortfall,
            rec.required_extra_contribution.ceil()
        ));
    }

    let alternatives = build_scenarios(&evaluated);
    let action_summary = action_summary(primary.as_ref());

    tracing::debug!(
        goal = %goal.id,
        months = horizon.months,
        inflation_adjusted_target = target,
        ?status,
        primary = ?primary.as_ref().map(|r| r.category_id),
        "evaluated goal"
    );

    Insight {
        goal_id: goal.id.clone(),
        months: horizon.months,
        years: horizon.years,
        inflation_adjusted_target: target,
        achievable,
        status,
        recommendations: ranked,
        primary,
        alternatives,
        guidance: horizon_guidance(horizon.years),
        action_summary,
        warnings,
    }
}

pub fn evaluate_goals(
    goals: &[Goal],
    catalog: &Catalog,
    rates: &dyn RateProvider,
) -> Vec<Insight> {
    goals
        .iter()
        .map(|goal| evaluate_goal(goal, catalog, rates))
        .collect()
}

fn evaluate_category(
    goal: &Goal,
    category: &Category,
    horizon: Horizon,
    target: f64,
    rates: &dyn RateProvider,
) -> Recommendation {
    let rate = effective_rate(category, rates);
    let projected = future_value_lumpsum(rate, horizon.years, goal.current_corpus)
        + future_value_periodic(
            rate,
            horizon.months,
            goal.monthly_contribution,
            goal.step_up_rate_percent,
        );
    let shortfall = target - projected;
    let gap_fraction = if target > 0.0 {
        (shortfall / target).max(0.0)
    } else {
        0.0
    };

    Recommendation {
        category_id: category.id,
        category_name: category.name,
        risk: category.risk,
        return_used: rate,
        projected_corpus: projected,
        shortfall,
        required_extra_contribution: required_periodic_contribution(
            shortfall.max(0.0),
            rate,
            horizon.months,
        ),
        confidence_score: confidence_score(horizon.years, category.risk, gap_fraction),
    }
}

fn rank_by_confidence(evaluated: &[Recommendation]) -> Vec<Recommendation> {
    let mut ranked = evaluated.to_vec();
    ranked.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));
    ranked
}

fn select_primary(
    ranked: &[Recommendation],
    evaluated: &[Recommendation],
) -> Option<Recommendation> {
    ranked
        .iter()
        .find(|r| r.is_achievable())
        .or_else(|| closest_to_target(evaluated))
        .cloned()
}

/// Smallest shortfall, ignoring confidence. The first in catalog order wins ties.
fn closest_to_target(evaluated: &[Recommendation]) -> Option<&Recommendation> {
    evaluated.iter().reduce(|best, candidate| {
        if candidate.shortfall < best.shortfall {
            candidate
        } else {
            best
        }
    })
}

fn build_scenarios(evaluated: &[Recommendation]) -> Vec<Scenario> {
    SCENARIO_CATEGORIES
        .iter()
        .filter_map(|&(kind, id)| {
            evaluated
                .iter()
                .find(|r| r.category_id == id)
                .map(|rec| Scenario {
                    kind,
                    recommendation: rec.clone(),
                })
        })
        .collect()
}

fn horizon_guidance(years: f64) -> HorizonGuidance {
    if years < 3.0 {
        HorizonGuidance {
            asset_class: "Debt / Liquid Funds",
            risk_profile: "Low",
            suggestion: "Time is too short for equity. Stick to safer debt instruments.",
        }
    } else if years < 5.0 {
        HorizonGuidance {
            asset_class: "Hybrid / Balanced Advantage",
            risk_profile: "Moderate",
            suggestion: "Market volatility can hurt short-term goals. Hybrid funds offer balance.",
        }
    } else if years < 8.0 {
        HorizonGuidance {
            asset_class: "Large Cap / Flexi Cap Equity",
            risk_profile: "High",
            suggestion: "Good horizon for equity. Stick to stable large and flexi cap funds.",
        }
    } else {
        HorizonGuidance {
            asset_class: "Mid / Small Cap Equity",
            risk_profile: "Very High",
            suggestion: "A long horizon rides out volatility. Mid and small caps maximise returns.",
        }
    }
}

fn action_summary(primary: Option<&Recommendation>) -> String {
    match primary {
        None => "No investment categories are configured.".to_string(),
        Some(rec) if rec.is_achievable() => {
            "Current investments should cover this goal.".to_string()
        }
        Some(rec) => format!(
            "Start an additional monthly contribution of {:.0} in {}.",
            rec.required_extra_contribution.ceil(),
            rec.category_name
        ),
    }
}
