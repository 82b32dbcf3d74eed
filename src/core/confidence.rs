use super::types::RiskLabel;

const SHORT_HORIZON_YEARS: f64 = 3.0;
const SHORT_HORIZON_PENALTY: f64 = 40.0;
const SUB_YEAR_HORIZON_YEARS: f64 = 1.0;
const SUB_YEAR_PENALTY: f64 = 50.0;
const MAX_GAP_PENALTY: f64 = 50.0;

pub fn confidence_score(years: f64, risk: RiskLabel, gap_fraction: f64) -> u8 {
    let mut score = 100.0;

    if years < SHORT_HORIZON_YEARS && matches!(risk, RiskLabel::High | RiskLabel::VeryHigh) {
        score -= SHORT_HORIZON_PENALTY;
    }
    if years < SUB_YEAR_HORIZON_YEARS && risk != RiskLabel::Low {
        score -= SUB_YEAR_PENALTY;
    }
    if gap_fraction > 0.0 {
        score -= (gap_fraction * 100.0).min(MAX_GAP_PENALTY);
    }

    score.clamp(0.0, 100.0).round() as u8
}
