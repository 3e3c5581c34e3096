//! End-to-end behaviour of `YearColumnTransformer` across modes and batches.

use chrono::NaiveDate;
use dt_features::dataset::{TemporalColumn, TemporalFrame};
use dt_features::preprocessing::{
    EncodingMode, Fittable, PreprocessingError, Transformable, YearColumnTransformer,
    YearColumnTransformerParams, YearExtractorConfig, YearFeatures,
};
use ndarray::array;
use proptest::prelude::*;

fn frame_of_years(years: &[i32]) -> TemporalFrame {
    let dates = years
        .iter()
        .map(|&y| NaiveDate::from_ymd_opt(y, 7, 15).unwrap());
    TemporalFrame::from(TemporalColumn::from_dates("when", dates))
}

fn scenario_frame() -> TemporalFrame {
    let dates = [(1987, 5, 1), (1987, 5, 2), (1988, 5, 1), (1997, 5, 1)]
        .iter()
        .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
    TemporalFrame::from(TemporalColumn::from_dates("a", dates))
}

fn extractor(scale: bool, dummify: bool) -> YearColumnTransformer {
    YearColumnTransformer::new(YearExtractorConfig { scale, dummify }).unwrap()
}

#[test]
fn dummify_scenario_matches_expected_indicators() {
    let mut t = extractor(false, true);
    t.fit(&scenario_frame(), None).unwrap();

    let features = t.transform(&scenario_frame(), None, None).unwrap();
    let indicators = features.as_indicators().unwrap();

    assert_eq!(indicators.feature_names(), vec!["1987", "1988", "1997"]);
    assert_eq!(
        indicators.values(),
        array![[1u8, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]
    );
}

#[test]
fn scale_scenario_has_zero_mean_unit_std() {
    let mut t = extractor(true, false);
    t.fit(&scenario_frame(), None).unwrap();

    let features = t.transform(&scenario_frame(), None, None).unwrap();
    let scaled = features.as_scaled().unwrap();

    let std = 17.6875f64.sqrt();
    let expected = [1987.0, 1987.0, 1988.0, 1997.0].map(|y| (y - 1989.75) / std);
    for (got, want) in scaled.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
    }
}

#[test]
fn streaming_batches_build_dummify_domain() {
    let mut t = extractor(false, true);
    for batch in [&[2003, 2001][..], &[1999][..], &[2001, 2005][..]] {
        t.partial_fit(&frame_of_years(batch), None).unwrap();
    }

    let features = t
        .transform(&frame_of_years(&[2005, 1990]), None, None)
        .unwrap();
    let indicators = features.as_indicators().unwrap();
    assert_eq!(indicators.categories(), &[1999, 2001, 2003, 2005]);
    assert_eq!(indicators.values(), array![[0u8, 0, 0, 1], [0, 0, 0, 0]]);
}

#[test]
fn transform_rejects_multiple_columns() {
    let mut t = extractor(false, false);
    t.fit(&scenario_frame(), None).unwrap();

    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let wide = TemporalFrame::new(vec![
        TemporalColumn::from_dates("a", vec![date]),
        TemporalColumn::from_dates("b", vec![date]),
    ])
    .unwrap();

    assert!(matches!(
        t.transform(&wide, None, None),
        Err(PreprocessingError::InvalidShape { .. })
    ));
}

#[test]
fn scale_mode_target_is_carried_but_unused() {
    let target = array![0.0, 1.0, 0.0, 1.0];
    let mut with_target = extractor(true, false);
    with_target
        .fit(&scenario_frame(), Some(target.view()))
        .unwrap();
    let mut without = extractor(true, false);
    without.fit(&scenario_frame(), None).unwrap();

    assert_eq!(with_target.extract_params(), without.extract_params());
}

#[test]
fn params_snapshot_serializes_to_json() {
    let mut t = extractor(false, true);
    t.fit(&scenario_frame(), None).unwrap();

    let json = serde_json::to_value(t.extract_params()).unwrap();
    assert_eq!(json["config"]["dummify"], true);
    assert_eq!(json["seen_years"], serde_json::json!([1987, 1988, 1997]));
    assert_eq!(json["column_name"], "a");

    let params: YearColumnTransformerParams = serde_json::from_value(json).unwrap();
    let restored = YearColumnTransformer::from_params(params).unwrap();
    assert_eq!(restored.mode(), EncodingMode::Dummify);
    assert_eq!(
        restored.transform(&scenario_frame(), None, None).unwrap(),
        t.transform(&scenario_frame(), None, None).unwrap()
    );
}

fn years_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1900i32..2100, 1..40)
}

proptest! {
    #[test]
    fn raw_mode_returns_extracted_years(years in years_strategy()) {
        let mut t = extractor(false, false);
        t.fit(&frame_of_years(&years), None).unwrap();
        let out = t.transform(&frame_of_years(&years), None, None).unwrap();
        prop_assert_eq!(out.as_years().unwrap().to_vec(), years);
    }

    #[test]
    fn refit_is_idempotent(years in years_strategy(), earlier in years_strategy()) {
        for (scale, dummify) in [(true, false), (false, true), (false, false)] {
            let frame = frame_of_years(&years);

            let mut once = extractor(scale, dummify);
            once.fit(&frame, None).unwrap();

            let mut twice = extractor(scale, dummify);
            twice.partial_fit(&frame_of_years(&earlier), None).unwrap();
            twice.fit(&frame, None).unwrap();
            twice.fit(&frame, None).unwrap();

            prop_assert_eq!(
                once.transform(&frame, None, None).unwrap(),
                twice.transform(&frame, None, None).unwrap()
            );
        }
    }

    #[test]
    fn dummify_domain_is_sorted_union(a in years_strategy(), b in years_strategy()) {
        let mut t = extractor(false, true);
        t.partial_fit(&frame_of_years(&a), None).unwrap();
        t.partial_fit(&frame_of_years(&b), None).unwrap();

        let mut union: Vec<i32> = a.iter().chain(b.iter()).copied().collect();
        union.sort_unstable();
        union.dedup();

        let out = t.transform(&frame_of_years(&a), None, None).unwrap();
        prop_assert_eq!(out.as_indicators().unwrap().categories(), union.as_slice());

        t.fit(&frame_of_years(&b), None).unwrap();
        let mut only_b = b.clone();
        only_b.sort_unstable();
        only_b.dedup();
        prop_assert_eq!(t.seen_years().collect::<Vec<_>>(), only_b);
    }

    #[test]
    fn dummify_rows_mark_only_fitted_years(fitted in years_strategy(), probe in years_strategy()) {
        let mut t = extractor(false, true);
        t.fit(&frame_of_years(&fitted), None).unwrap();

        let out = t.transform(&frame_of_years(&probe), None, None).unwrap();
        let indicators = out.as_indicators().unwrap();
        prop_assert_eq!(indicators.n_rows(), probe.len());

        for (row, year) in indicators.values().rows().into_iter().zip(probe.iter()) {
            let total: u32 = row.iter().map(|&v| u32::from(v)).sum();
            prop_assert_eq!(total, u32::from(fitted.contains(year)));
        }
    }

    #[test]
    fn scale_mode_standardizes_fitted_batch(years in years_strategy()) {
        let distinct = {
            let mut d = years.clone();
            d.sort_unstable();
            d.dedup();
            d.len()
        };
        prop_assume!(distinct > 1);

        let mut t = extractor(true, false);
        t.fit(&frame_of_years(&years), None).unwrap();
        let out = t.transform(&frame_of_years(&years), None, None).unwrap();
        let scaled = out.as_scaled().unwrap();

        prop_assert!(scaled.mean().unwrap().abs() < 1e-6);
        prop_assert!((scaled.std(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scale_partial_fit_matches_fit(a in years_strategy(), b in years_strategy()) {
        let mut streamed = extractor(true, false);
        streamed.partial_fit(&frame_of_years(&a), None).unwrap();
        streamed.partial_fit(&frame_of_years(&b), None).unwrap();

        let all: Vec<i32> = a.iter().chain(b.iter()).copied().collect();
        let mut single = extractor(true, false);
        single.fit(&frame_of_years(&all), None).unwrap();

        let probe = frame_of_years(&all);
        let (s, o) = (
            streamed.transform(&probe, None, None).unwrap(),
            single.transform(&probe, None, None).unwrap(),
        );
        for (x, y) in s.as_scaled().unwrap().iter().zip(o.as_scaled().unwrap().iter()) {
            prop_assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn transform_before_fit_always_fails(years in years_strategy()) {
        for (scale, dummify) in [(true, false), (false, true), (false, false)] {
            let t = extractor(scale, dummify);
            let result = t.transform(&frame_of_years(&years), None, None);
            prop_assert!(matches!(result, Err(PreprocessingError::NotFitted(_))));
        }
    }
}

#[test]
fn conflicting_flags_never_construct() {
    let config = YearExtractorConfig::default().with_dummify(true);
    assert!(matches!(
        YearColumnTransformer::new(config),
        Err(PreprocessingError::Configuration(_))
    ));
    assert!(matches!(
        YearColumnTransformer::from_params(YearColumnTransformerParams {
            config,
            fitted: false,
            seen_years: Vec::new(),
            scaler: None,
            column_name: None,
        }),
        Err(PreprocessingError::Configuration(_))
    ));
}

#[test]
fn features_report_their_mode() {
    let mut t = extractor(false, false);
    let out = t.fit_transform(&scenario_frame(), None).unwrap();
    assert!(matches!(out, YearFeatures::Years(_)));
    assert_eq!(out.mode(), EncodingMode::Raw);
}
