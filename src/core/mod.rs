mod catalog;
mod confidence;
mod curve;
mod engine;
mod rates;
mod tvm;
mod types;

pub use catalog::{
    AGGRESSIVE_HYBRID_ID, CONSERVATIVE_HYBRID_ID, Catalog, FLEXI_CAP_ID, LARGE_CAP_ID, LIQUID_ID,
    SHORT_DEBT_ID,
};
pub use confidence::confidence_score;
pub use curve::build_growth_curve;
pub use engine::{NOT_ACHIEVABLE_WARNING, SHORT_DURATION_WARNING, evaluate_goal, evaluate_goals};
pub use rates::{
    MarketRates, NoMarketData, RateFeed, RateProvider, cagr_percent, collect_market_rates,
    effective_rate,
};
pub use tvm::{
    future_value_lumpsum, future_value_periodic, inflation_adjust, months_between,
    required_periodic_contribution,
};
pub use types::{
    Category, Goal, GoalStatus, GrowthPoint, HorizonGuidance, Insight, Recommendation, RiskLabel,
    Scenario, ScenarioKind,
};
