//! Property tests over arbitrary slugs, example indices, and lengths.

use patsynth::prelude::*;
use patsynth::synth::{derive_seed, normalize_slug};
use proptest::prelude::*;

fn any_bias() -> impl Strategy<Value = Bias> {
    prop_oneof![Just(Bias::Bullish), Just(Bias::Neutral), Just(Bias::Bearish)]
}

/// Known family names mixed with free text
fn any_slug() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "doji",
            "hammer",
            "bullish-engulfing",
            "evening-star",
            "three-black-crows",
            "double-bottom",
            "head-and-shoulders",
            "bear-flag",
            "rounding-top",
            "falling-wedge",
        ])
        .prop_map(String::from),
        "[a-z_ -]{0,24}",
    ]
}

proptest! {
    #[test]
    fn prop_deterministic(slug in any_slug(), index in 0usize..50, len in 5usize..80, bias in any_bias()) {
        let engine = SynthesizerBuilder::new().build().unwrap();
        let request = PatternRequest::new(slug, bias, index).with_length(Length::new(len).unwrap());
        prop_assert_eq!(engine.synthesize(&request), engine.synthesize(&request));
    }

    #[test]
    fn prop_candle_invariants(slug in any_slug(), index in 0usize..50, len in 5usize..80, bias in any_bias()) {
        let engine = SynthesizerBuilder::new().build().unwrap();
        let request = PatternRequest::new(slug, bias, index).with_length(Length::new(len).unwrap());
        let series = engine.synthesize(&request);

        prop_assert_eq!(series.len(), len);
        for c in &series {
            prop_assert!(c.high >= c.open.max(c.close));
            prop_assert!(c.low <= c.open.min(c.close));
            prop_assert!(c.volume > 0);
            prop_assert!(c.open.is_finite() && c.close.is_finite());
        }
    }

    #[test]
    fn prop_seed_in_range(slug in ".{0,32}", index in 0usize..1_000_000) {
        prop_assert!(derive_seed(&slug, index) < 10_000);
    }

    #[test]
    fn prop_normalize_idempotent(slug in ".{0,32}") {
        let once = normalize_slug(&slug);
        prop_assert_eq!(normalize_slug(&once), once);
    }

    #[test]
    fn prop_plan_ignores_case(slug in any_slug()) {
        let engine = SynthesizerBuilder::new().build().unwrap();
        prop_assert_eq!(engine.plan(&slug.to_uppercase()), engine.plan(&slug));
    }
}
