//! End-to-end scenarios for the sentiment system.

use approx::assert_relative_eq;
use it2fls::sentiment::{Label, SentimentFls};

#[test]
fn both_low_reads_neutral() {
    let mut fls = SentimentFls::new().unwrap();
    let score = fls.score(0.1, 0.1).unwrap();

    assert_eq!(fls.classify(score), Label::Neutral, "score was {score}");
}

#[test]
fn low_negativity_high_positivity_reads_negative() {
    // Per the rule table: (low negativity, high positivity) -> negative.
    let mut fls = SentimentFls::new().unwrap();
    let score = fls.score(0.1, 0.9).unwrap();

    assert_eq!(fls.classify(score), Label::Negative, "score was {score}");
}

#[test]
fn high_negativity_low_positivity_reads_positive() {
    let mut fls = SentimentFls::new().unwrap();
    let score = fls.score(0.9, 0.1).unwrap();

    assert_eq!(fls.classify(score), Label::Positive, "score was {score}");
}

#[test]
fn matching_intensities_read_neutral() {
    let mut fls = SentimentFls::new().unwrap();
    for v in [0.05, 0.5, 0.95] {
        let score = fls.score(v, v).unwrap();
        assert_eq!(fls.classify(score), Label::Neutral, "inputs {v}, score {score}");
    }
}

#[test]
fn shared_breakpoint_fires_both_adjacent_terms() {
    // 0.45 sits on the low/moderate overlap: the low term's down ramp and
    // the moderate term's core. No dead zone, no discontinuity.
    let fls = SentimentFls::new().unwrap();
    let [low, moderate, _high] = fls.negativity_terms();

    let low_iv = low.membership_interval(0.45);
    let moderate_iv = moderate.membership_interval(0.45);

    assert!(low_iv.upper > 0., "low term silent at the overlap");
    assert!(moderate_iv.upper > 0., "moderate term silent at the overlap");
}

#[test]
fn score_interval_is_ordered_and_in_domain() {
    let mut fls = SentimentFls::new().unwrap();

    for (neg, pos) in [(0.1, 0.1), (0.1, 0.9), (0.5, 0.2), (0.8, 0.45), (0.33, 0.66)] {
        let iv = fls.score_interval(neg, pos).unwrap();
        assert!(iv.lower <= iv.upper, "inverted interval for ({neg}, {pos})");
        assert!(iv.lower >= 0. && iv.upper <= 1., "out of domain for ({neg}, {pos})");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let mut fls = SentimentFls::new().unwrap();
    let first = fls.score(0.37, 0.62).unwrap();
    let second = fls.score(0.37, 0.62).unwrap();

    assert_eq!(first, second);
}

#[test]
fn discretization_sensitivity_is_small() {
    let mut fls = SentimentFls::new().unwrap();

    fls.set_discretization(50);
    let coarse = fls.score(0.3, 0.7).unwrap();
    fls.set_discretization(100);
    let fine = fls.score(0.3, 0.7).unwrap();

    assert!((coarse - fine).abs() < 0.02, "coarse {coarse} vs fine {fine}");
}

#[test]
fn out_of_range_inputs_are_clamped_not_fatal() {
    let mut fls = SentimentFls::new().unwrap();

    let clamped = fls.score(-0.5, 1.5).unwrap();
    let edge = fls.score(0., 1.).unwrap();
    assert_relative_eq!(clamped, edge);
}

#[test]
fn height_mode_agrees_on_the_clear_cases() {
    let mut fls = SentimentFls::new().unwrap();

    let score = fls.score_height(0.1, 0.9).unwrap();
    assert_eq!(fls.classify(score), Label::Negative, "score was {score}");

    let score = fls.score_height(0.9, 0.1).unwrap();
    assert_eq!(fls.classify(score), Label::Positive, "score was {score}");
}

#[test]
fn term_curves_sample_for_plotting() {
    let fls = SentimentFls::new().unwrap();
    let domain = fls.classification_domain();

    for mf in fls.classification_terms() {
        let curve = mf.sample(domain, 100);
        assert_eq!(curve.xs.len(), 100);
        for i in 0..curve.xs.len() {
            assert!(curve.lower[i] <= curve.upper[i]);
        }
    }
}
