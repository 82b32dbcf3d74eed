use chrono::{Datelike, NaiveDate};

const MONTHS_PER_YEAR: u32 = 12;

fn monthly_rate(rate_percent: f64) -> f64 {
    rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}

fn annuity_due_factor(r: f64, months: u32) -> f64 {
    ((1.0 + r).powi(months as i32) - 1.0) / r * (1.0 + r)
}

pub fn future_value_lumpsum(rate_percent: f64, years: f64, present_value: f64) -> f64 {
    present_value * (1.0 + rate_percent / 100.0).powf(years)
}

pub fn future_value_periodic(
    rate_percent: f64,
    months: u32,
    payment: f64,
    step_up_rate_percent: f64,
) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let r = monthly_rate(rate_percent);

    if step_up_rate_percent > 0.0 {
        let step = 1.0 + step_up_rate_percent / 100.0;
        let mut value = 0.0;
        let mut current = payment;
        for period in 1..=months {
            value += current;
            value *= 1.0 + r;
            if period % MONTHS_PER_YEAR == 0 {
                current *= step;
            }
        }
        return value;
    }

    if r == 0.0 {
        payment * months as f64
    } else {
        payment * annuity_due_factor(r, months)
    }
}

/// Flat monthly contribution that accumulates to `target_value`. Step-up is
/// not modelled here.
pub fn required_periodic_contribution(target_value: f64, rate_percent: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let r = monthly_rate(rate_percent);
    if r == 0.0 {
        target_value / months as f64
    } else {
        target_value / annuity_due_factor(r, months)
    }
}

pub fn inflation_adjust(nominal_amount: f64, inflation_rate_percent: f64, years: f64) -> f64 {
    future_value_lumpsum(inflation_rate_percent, years, nominal_amount)
}

/// Whole months between two dates from their year and month only. The day of
/// month is ignored and a target on or before the start yields 0.
pub fn months_between(start: NaiveDate, target: NaiveDate) -> u32 {
    let diff = (target.year() - start.year()) * 12 + target.month() as i32 - start.month() as i32;
    diff.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn lumpsum_with_zero_years_returns_present_value() {
        assert_eq!(future_value_lumpsum(12.0, 0.0, 5_000.0), 5_000.0);
    }

    #[test]
    fn lumpsum_compounds_annually() {
        assert_approx_tol(future_value_lumpsum(10.0, 2.0, 100.0), 121.0, 1e-9);
        assert_approx_tol(future_value_lumpsum(10.0, 0.5, 100.0), 100.0 * 1.1_f64.sqrt(), 1e-9);
    }

    #[test]
    fn periodic_uses_annuity_due_at_one_percent_monthly() {
        let fv = future_value_periodic(12.0, 120, 10_000.0, 0.0);
        let expected = 10_000.0 * ((1.01_f64.powi(120) - 1.0) / 0.01) * 1.01;
        assert_approx_tol(fv, expected, 1e-6);
        assert_approx_tol(fv, 2_323_390.9, 1.0);
    }

    #[test]
    fn periodic_with_zero_rate_is_simple_sum() {
        assert_eq!(future_value_periodic(0.0, 18, 250.0, 0.0), 4_500.0);
    }

    #[test]
    fn periodic_with_zero_months_is_zero() {
        assert_eq!(future_value_periodic(12.0, 0, 10_000.0, 0.0), 0.0);
        assert_eq!(future_value_periodic(12.0, 0, 10_000.0, 10.0), 0.0);
    }

    #[test]
    fn periodic_step_up_raises_payment_after_each_year() {
        // zero growth: 12 * 100 + 12 * 110 + 6 * 121
        let fv = future_value_periodic(0.0, 30, 100.0, 10.0);
        assert_approx_tol(fv, 1_200.0 + 1_320.0 + 726.0, 1e-9);
    }

    #[test]
    fn periodic_step_up_within_first_year_matches_flat_formula() {
        let flat = future_value_periodic(9.0, 12, 1_000.0, 0.0);
        let stepped = future_value_periodic(9.0, 12, 1_000.0, 15.0);
        assert_approx_tol(stepped, flat, 1e-6);
    }

    #[test]
    fn required_contribution_zero_months_is_zero() {
        assert_eq!(required_periodic_contribution(1_000_000.0, 12.0, 0), 0.0);
    }

    #[test]
    fn required_contribution_zero_rate_divides_evenly() {
        assert_eq!(required_periodic_contribution(1_200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn inflation_adjust_matches_ten_years_at_six_percent() {
        assert_approx_tol(inflation_adjust(1_000_000.0, 6.0, 10.0), 1_790_847.7, 0.1);
        assert_eq!(inflation_adjust(500.0, 0.0, 7.0), 500.0);
    }

    #[test]
    fn months_between_ignores_day_of_month() {
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(months_between(date(2024, 1, 1), date(2034, 1, 1)), 120);
        assert_eq!(months_between(date(2023, 11, 15), date(2024, 7, 2)), 8);
    }

    #[test]
    fn months_between_clamps_past_targets() {
        assert_eq!(months_between(date(2024, 5, 10), date(2024, 5, 10)), 0);
        assert_eq!(months_between(date(2024, 5, 10), date(2022, 1, 1)), 0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_lumpsum_monotonic_in_years(
            rate_bp in -3_000i32..3_000,
            years_x10 in 0u32..400,
            pv in 1u32..10_000_000
        ) {
            let rate = rate_bp as f64 / 100.0;
            let years = years_x10 as f64 / 10.0;
            let pv = pv as f64;
            let now = future_value_lumpsum(rate, years, pv);
            let later = future_value_lumpsum(rate, years + 1.0, pv);
            if rate > 0.0 {
                prop_assert!(later > now);
            } else if rate == 0.0 {
                prop_assert!(later == now);
            } else {
                prop_assert!(later < now);
            }
        }

        #[test]
        fn prop_required_contribution_round_trips(
            target in 1u32..50_000_000,
            rate_bp in 0i32..2_500,
            months in 1u32..480
        ) {
            let target = target as f64;
            let rate = rate_bp as f64 / 100.0;
            let payment = required_periodic_contribution(target, rate, months);
            let fv = future_value_periodic(rate, months, payment, 0.0);
            prop_assert!(((fv - target) / target).abs() <= 1e-6);
        }

        #[test]
        fn prop_months_between_zero_when_target_not_after_start(
            start_days in 0i64..40_000,
            back in 0i64..20_000
        ) {
            let epoch = NaiveDate::from_ymd_opt(1950, 1, 1).expect("valid date");
            let start = epoch + chrono::Duration::days(start_days);
            let target = start - chrono::Duration::days(back);
            prop_assert!(months_between(start, target) == 0);
        }
    }
}
