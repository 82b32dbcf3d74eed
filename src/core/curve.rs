use super::types::GrowthPoint;

/// Year-by-year invested-versus-value series. The starting corpus compounds
/// annually and contributions monthly, so the final value equals the
/// lumpsum plus periodic projections used for ranking.
pub fn build_growth_curve(
    rate_percent: f64,
    months: u32,
    initial_corpus: f64,
    monthly_payment: f64,
    step_up_rate_percent: f64,
) -> Vec<GrowthPoint> {
    let r = rate_percent / 100.0 / 12.0;
    let corpus_growth = (1.0 + rate_percent / 100.0).powf(1.0 / 12.0);
    let step = 1.0 + step_up_rate_percent.max(0.0) / 100.0;

    let mut points = Vec::with_capacity(months.div_ceil(12) as usize + 1);
    points.push(GrowthPoint {
        year_index: 0,
        month: 0,
        total_invested: initial_corpus,
        total_value: initial_corpus,
    });

    let mut invested = initial_corpus;
    let mut corpus_value = initial_corpus;
    let mut contribution_value = 0.0;
    let mut payment = monthly_payment;
    for month in 1..=months {
        invested += payment;
        corpus_value *= corpus_growth;
        contribution_value = (contribution_value + payment) * (1.0 + r);
        let value = corpus_value + contribution_value;
        if month % 12 == 0 {
            points.push(GrowthPoint {
                year_index: month / 12,
                month,
                total_invested: invested,
                total_value: value,
            });
            payment *= step;
        }
    }

    if months % 12 != 0 {
        points.push(GrowthPoint {
            year_index: months.div_ceil(12),
            month: months,
            total_invested: invested,
            total_value: corpus_value + contribution_value,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tvm::{future_value_lumpsum, future_value_periodic};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn zero_months_yields_only_initial_point() {
        let points = build_growth_curve(12.0, 0, 50_000.0, 1_000.0, 0.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total_value, 50_000.0);
        assert_eq!(points[0].total_invested, 50_000.0);
    }

    #[test]
    fn full_years_get_one_point_each() {
        let points = build_growth_curve(10.0, 36, 0.0, 500.0, 0.0);
        let years: Vec<u32> = points.iter().map(|p| p.year_index).collect();
        assert_eq!(years, vec![0, 1, 2, 3]);
        assert_eq!(points[3].month, 36);
        assert_approx_tol(points[3].total_invested, 18_000.0, 1e-9);
    }

    #[test]
    fn partial_year_gets_trailing_point() {
        let points = build_growth_curve(10.0, 30, 0.0, 500.0, 0.0);
        let last = points.last().expect("non-empty");
        assert_eq!(points.len(), 4);
        assert_eq!(last.year_index, 3);
        assert_eq!(last.month, 30);
        assert_approx_tol(last.total_invested, 15_000.0, 1e-9);
    }

    #[test]
    fn step_up_matches_invested_sequence() {
        let points = build_growth_curve(0.0, 30, 1_000.0, 100.0, 10.0);
        let last = points.last().expect("non-empty");
        assert_approx_tol(last.total_invested, 1_000.0 + 1_200.0 + 1_320.0 + 726.0, 1e-9);
        assert_approx_tol(last.total_value, last.total_invested, 1e-9);
    }

    #[test]
    fn contributions_agree_with_periodic_projection() {
        let points = build_growth_curve(12.0, 120, 0.0, 10_000.0, 0.0);
        let last = points.last().expect("non-empty");
        assert_approx_tol(last.total_value, future_value_periodic(12.0, 120, 10_000.0, 0.0), 1e-3);

        let stepped = build_growth_curve(9.0, 50, 0.0, 2_000.0, 8.0);
        let last = stepped.last().expect("non-empty");
        assert_approx_tol(last.total_value, future_value_periodic(9.0, 50, 2_000.0, 8.0), 1e-6);
    }

    #[test]
    fn corpus_compounds_annually() {
        let points = build_growth_curve(12.0, 24, 100_000.0, 0.0, 0.0);
        assert_approx_tol(points[1].total_value, 112_000.0, 1e-6);
        assert_approx_tol(points[2].total_value, 125_440.0, 1e-6);
    }

    #[test]
    fn final_value_matches_combined_projection() {
        for (rate, months, corpus, payment, step) in [
            (12.0, 24, 100_000.0, 0.0, 0.0),
            (11.5, 42, 250_000.0, 4_000.0, 5.0),
            (6.0, 7, 10_000.0, 1_500.0, 0.0),
        ] {
            let points = build_growth_curve(rate, months, corpus, payment, step);
            let last = points.last().expect("non-empty");
            let expected = future_value_lumpsum(rate, months as f64 / 12.0, corpus)
                + future_value_periodic(rate, months, payment, step);
            assert_approx_tol(last.total_value, expected, 1e-6 * expected);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_curve_is_deterministic_and_anchored(
            rate_bp in 0i32..2_000,
            months in 0u32..240,
            corpus in 0u32..1_000_000,
            payment in 0u32..50_000,
            step_bp in 0u32..2_000
        ) {
            let rate = rate_bp as f64 / 100.0;
            let step = step_bp as f64 / 100.0;
            let a = build_growth_curve(rate, months, corpus as f64, payment as f64, step);
            let b = build_growth_curve(rate, months, corpus as f64, payment as f64, step);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a[0].year_index, 0);
            prop_assert_eq!(a[0].total_value, corpus as f64);

            let mut expected_invested = corpus as f64;
            let mut p = payment as f64;
            for m in 1..=months {
                expected_invested += p;
                if m % 12 == 0 {
                    p *= 1.0 + step / 100.0;
                }
            }
            let last = a.last().expect("non-empty");
            prop_assert_eq!(last.total_invested, expected_invested);
            let slack = 1e-9 * last.total_invested.max(1.0);
            prop_assert!(last.total_value + slack >= last.total_invested);
        }
    }
}
