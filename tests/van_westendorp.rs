use approx::assert_relative_eq;
use price_sense::analyzer::van_westendorp::{
    analyze_van_westendorp, analyze_van_westendorp_per_respondent, average, MatchingMode,
};
use price_sense::analyzer::{Analyzer, AnalyzerImpl, SurveyInput};
use price_sense::model::{PriceRange, RatedResponse, ResponseLabel};
use rstest::*;

use price_sense::model::ResponseLabel::*;

fn rated(label: ResponseLabel, price_index: usize) -> RatedResponse {
    RatedResponse { label, price_index }
}

#[fixture]
fn prices() -> Vec<f64> {
    vec![10.0, 20.0, 30.0]
}

#[rstest]
fn legacy_matches_every_price_point(prices: Vec<f64>) {
    let result = analyze_van_westendorp(&prices, &[TooExpensive, TooCheap]);

    assert_eq!(result.too_expensive.prices, vec![10.0, 20.0, 30.0]);
    assert_eq!(result.too_expensive.indices, vec![0, 1, 2]);
    assert_eq!(result.too_cheap.prices, vec![10.0, 20.0, 30.0]);
    assert!(result.just_right.is_empty());
    assert_eq!(result.optimal_range, PriceRange(20.0, 20.0));
}

#[rstest]
fn legacy_bucket_grows_with_price_list(prices: Vec<f64>) {
    let result = analyze_van_westendorp(&prices, &[JustRight, JustRight]);
    assert_eq!(result.just_right.len(), 2 * prices.len());
}

#[rstest]
#[case::legacy(MatchingMode::Legacy)]
#[case::per_respondent(MatchingMode::PerRespondent)]
fn only_just_right_gives_empty_range(prices: Vec<f64>, #[case] mode: MatchingMode) {
    let responses = vec![rated(JustRight, 0), rated(JustRight, 2)];
    let result = AnalyzerImpl::new(mode).van_westendorp(&prices, &responses);

    assert!(result.too_expensive.is_empty());
    assert!(result.too_cheap.is_empty());
    assert_eq!(result.optimal_range, PriceRange(0.0, 0.0));
    assert!(result.optimal_range.is_empty());
}

#[rstest]
#[case::legacy(MatchingMode::Legacy)]
#[case::per_respondent(MatchingMode::PerRespondent)]
fn empty_price_points_give_sentinel(#[case] mode: MatchingMode) {
    let responses = vec![rated(TooCheap, 0), rated(TooExpensive, 1)];
    let result = AnalyzerImpl::new(mode).van_westendorp(&[], &responses);

    assert_eq!(result.optimal_range, PriceRange(0.0, 0.0));
    assert!(result.too_expensive.is_empty());
    assert!(result.too_cheap.is_empty());
    assert!(result.just_right.is_empty());
}

#[rstest]
fn per_respondent_uses_rated_price(prices: Vec<f64>) {
    let responses = vec![
        rated(TooCheap, 0),
        rated(TooCheap, 1),
        rated(TooExpensive, 2),
        rated(JustRight, 1),
    ];
    let result = analyze_van_westendorp_per_respondent(&prices, &responses);

    assert_eq!(result.too_cheap.prices, vec![10.0, 20.0]);
    assert_eq!(result.too_expensive.indices, vec![2]);
    assert_eq!(result.just_right.prices, vec![20.0]);
    assert_relative_eq!(result.optimal_range.low(), 15.0);
    assert_relative_eq!(result.optimal_range.high(), 30.0);
}

#[rstest]
fn legacy_and_per_respondent_diverge(prices: Vec<f64>) {
    let responses = vec![rated(TooCheap, 0), rated(TooExpensive, 2)];

    let legacy = AnalyzerImpl::new(MatchingMode::Legacy).van_westendorp(&prices, &responses);
    let corrected = AnalyzerImpl::new(MatchingMode::PerRespondent).van_westendorp(&prices, &responses);

    assert_eq!(legacy.optimal_range, PriceRange(20.0, 20.0));
    assert_eq!(corrected.optimal_range, PriceRange(10.0, 30.0));
}

#[rstest]
fn range_is_not_ordered(prices: Vec<f64>) {
    let responses = vec![rated(TooCheap, 2), rated(TooExpensive, 0)];
    let result = analyze_van_westendorp_per_respondent(&prices, &responses);
    assert!(result.optimal_range.low() > result.optimal_range.high());
}

#[rstest]
fn out_of_range_index_is_skipped(prices: Vec<f64>) {
    let result = analyze_van_westendorp_per_respondent(&prices, &[rated(TooCheap, 3), rated(TooCheap, 1)]);
    assert_eq!(result.too_cheap.indices, vec![1]);
}

#[rstest]
fn four_point_labels_are_bucketed(prices: Vec<f64>) {
    let result = analyze_van_westendorp_per_respondent(&prices, &[rated(NotCheap, 1), rated(NotExpensive, 0)]);
    assert_eq!(result.bucket(NotCheap).prices, vec![20.0]);
    assert_eq!(result.bucket(NotExpensive).prices, vec![10.0]);
    assert_eq!(result.optimal_range, PriceRange(0.0, 0.0));
}

#[rstest]
fn counts_by_price_follow_positions(prices: Vec<f64>) {
    let responses = vec![rated(TooCheap, 0), rated(TooCheap, 0), rated(TooExpensive, 2)];
    let counts = analyze_van_westendorp_per_respondent(&prices, &responses).counts_by_price(&prices);

    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].too_cheap, 2);
    assert_eq!(counts[1].too_cheap, 0);
    assert_eq!(counts[2].too_expensive, 1);
}

#[rstest]
fn cumulative_curves_are_monotone() {
    let prices = vec![30.0, 10.0, 20.0];
    let responses = vec![
        rated(TooCheap, 1),
        rated(TooCheap, 2),
        rated(TooExpensive, 2),
        rated(TooExpensive, 0),
    ];
    let curves = analyze_van_westendorp_per_respondent(&prices, &responses).cumulative_curves(&prices);

    let axis: Vec<f64> = curves.iter().map(|c| c.price).collect();
    assert_eq!(axis, vec![10.0, 20.0, 30.0]);

    let cheap: Vec<f64> = curves.iter().map(|c| c.too_cheap).collect();
    let expensive: Vec<f64> = curves.iter().map(|c| c.too_expensive).collect();
    assert_eq!(cheap, vec![1.0, 0.5, 0.0]);
    assert_eq!(expensive, vec![0.0, 0.5, 1.0]);
    assert!(curves.iter().all(|c| c.not_cheap == 0.0 && c.not_expensive == 0.0));
}

#[rstest]
fn analysis_is_idempotent(prices: Vec<f64>) {
    let input = SurveyInput {
        price_points: prices,
        van_westendorp: vec![rated(TooCheap, 0), rated(JustRight, 1), rated(TooExpensive, 2)],
        gabor_granger: vec![0, 1, 1, 2],
    };
    for mode in [MatchingMode::Legacy, MatchingMode::PerRespondent] {
        let analyzer = AnalyzerImpl::new(mode);
        assert_eq!(analyzer.analyze(&input), analyzer.analyze(&input));
    }
}

#[test]
fn average_of_nothing_is_zero() {
    assert_eq!(average(&[]), 0.0);
    assert_relative_eq!(average(&[1.0, 2.0, 4.5]), 2.5);
}
