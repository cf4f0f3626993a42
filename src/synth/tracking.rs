//! Target-tracking candle synthesis
//!
//! Folds over a trajectory, opening each candle at the previous close and
//! closing it near the next target. Strictly sequential: candle `i` depends
//! on the close of candle `i - 1`.

use rand::Rng;

use super::helpers::{candle_from_body, draw_volume, uniform};
use crate::{params::SynthParams, Series};

/// Convert a target-price trajectory into a series of the same length.
///
/// Index 0 is centered on the first target: a body of width
/// `first_spread` whose close sits half a spread past the target in the
/// direction of the next one, and a high/low of target +/- `first_spread`.
/// Every later candle opens at the previous
/// close, moves toward its target by `max(min_body, |delta| + noise)` and
/// grows independent shadows on each side.
pub fn synthesize_from_trajectory<R: Rng>(
    trajectory: &[f64],
    params: &SynthParams,
    rng: &mut R,
) -> Series {
    let Some((&first, rest)) = trajectory.split_first() else {
        return Vec::new();
    };

    // Body of width `first_spread` centered on the target, leaning toward
    // the next one; wicks reach `first_spread` on both sides of the target.
    let half = params.first_spread / 2.0;
    let rising = rest.first().is_some_and(|&next| next > first);
    let (open, close) = if rising {
        (first - half, first + half)
    } else {
        (first + half, first - half)
    };

    let mut series = Vec::with_capacity(trajectory.len());
    series.push(candle_from_body(open, close, half, half, draw_volume(rng, params)));

    let mut prev_close = close;
    for &target in rest {
        let delta = target - prev_close;
        let noise = uniform(rng, -params.body_noise, params.body_noise);
        let body = (delta.abs() + noise).max(params.min_body);

        let open = prev_close;
        let close = if delta > 0.0 { open + body } else { open - body };

        let upper = uniform(rng, 0.0, params.shadow_max);
        let lower = uniform(rng, 0.0, params.shadow_max);
        let volume = draw_volume(rng, params);

        series.push(candle_from_body(open, close, upper, lower, volume));
        prev_close = close;
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OHLCVExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn test_length_preserved() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let series = synthesize_from_trajectory(&ramp(30), &SynthParams::default(), &mut rng);
        assert_eq!(series.len(), 30);
        assert!(synthesize_from_trajectory(&[], &SynthParams::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_first_candle_centered() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let series = synthesize_from_trajectory(&ramp(5), &SynthParams::default(), &mut rng);
        let c = &series[0];
        assert_eq!(c.open, 99.75);
        assert_eq!(c.close, 100.25);
        assert!((c.body() - 0.5).abs() < 1e-12);
        assert!((c.high - 100.5).abs() < 1e-12);
        assert!((c.low - 99.5).abs() < 1e-12);
    }

    #[test]
    fn test_first_candle_leans_toward_next_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let falling: Vec<f64> = (0..5).map(|i| 100.0 - i as f64).collect();
        let c = synthesize_from_trajectory(&falling, &SynthParams::default(), &mut rng)[0];
        assert!(c.is_bearish());
        assert!(((c.open + c.close) / 2.0 - 100.0).abs() < 1e-12);

        let single = synthesize_from_trajectory(&[50.0], &SynthParams::default(), &mut rng);
        assert_eq!(single.len(), 1);
        assert!((single[0].body() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_candles_chain_and_track() {
        let params = SynthParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let targets = ramp(30);
        let series = synthesize_from_trajectory(&targets, &params, &mut rng);

        for i in 1..series.len() {
            assert_eq!(series[i].open, series[i - 1].close);
            // rising ramp: every delta is close to +1, so every candle is bullish
            assert!(series[i].is_bullish());
            assert!((series[i].close - targets[i]).abs() <= params.body_noise + 1e-9);
        }
    }

    #[test]
    fn test_flat_trajectory_uses_min_body() {
        let params = SynthParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let series = synthesize_from_trajectory(&[100.0; 10], &params, &mut rng);
        for c in &series[1..] {
            assert!(c.body() >= params.min_body - 1e-12);
        }
    }

    #[test]
    fn test_shadows_bounded() {
        let params = SynthParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let series = synthesize_from_trajectory(&ramp(50), &params, &mut rng);
        for c in &series[1..] {
            assert!(c.upper_shadow() >= 0.0 && c.upper_shadow() < params.shadow_max + 1e-9);
            assert!(c.lower_shadow() >= 0.0 && c.lower_shadow() < params.shadow_max + 1e-9);
            assert!(c.volume > 0);
        }
    }
}
