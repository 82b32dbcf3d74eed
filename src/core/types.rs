use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    Low,
    LowModerate,
    Moderate,
    ModerateHigh,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub amount_needed_today: f64,
    pub inflation_rate_percent: f64,
    pub current_corpus: f64,
    pub monthly_contribution: f64,
    #[serde(default)]
    pub step_up_rate_percent: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub risk: RiskLabel,
    pub min_return_percent: f64,
    pub max_return_percent: f64,
    pub sample_instruments: &'static [&'static str],
}

impl Category {
    pub fn midpoint_return(&self) -> f64 {
        (self.min_return_percent + self.max_return_percent) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category_id: &'static str,
    pub category_name: &'static str,
    pub risk: RiskLabel,
    pub return_used: f64,
    pub projected_corpus: f64,
    pub shortfall: f64,
    pub required_extra_contribution: f64,
    pub confidence_score: u8,
}

impl Recommendation {
    pub fn is_achievable(&self) -> bool {
        self.shortfall <= 0.0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Achievable,
    NotAchievable,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Conservative,
    Balanced,
    Aggressive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonGuidance {
    pub asset_class: &'static str,
    pub risk_profile: &'static str,
    pub suggestion: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub goal_id: String,
    pub months: u32,
    pub years: f64,
    pub inflation_adjusted_target: f64,
    pub achievable: bool,
    pub status: GoalStatus,
    pub recommendations: Vec<Recommendation>,
    pub primary: Option<Recommendation>,
    pub alternatives: Vec<Scenario>,
    pub guidance: HorizonGuidance,
    pub action_summary: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year_index: u32,
    pub month: u32,
    pub total_invested: f64,
    pub total_value: f64,
}
