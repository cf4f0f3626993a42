//! Random-walk fallback series

use rand::Rng;
use rand_distr::StandardNormal;

use super::helpers::{candle_from_body, draw_volume, uniform};
use crate::{params::SynthParams, Bias, Series};

/// Per-step background drift for a bias.
///
/// The sign is inverted relative to the bias: a bullish pattern gets a
/// falling background so the injected tail reads as a reversal.
#[inline]
pub fn background_drift(bias: Bias, params: &SynthParams) -> f64 {
    match bias {
        Bias::Bullish => -params.drift,
        Bias::Bearish => params.drift,
        Bias::Neutral => 0.0,
    }
}

/// Generic drifting series used when no geometric shape matches.
///
/// Base prices are walked first (start price, then drift plus Gaussian
/// noise per step); candles are then laid symmetrically around each base.
pub fn generate_fallback<R: Rng>(
    length: usize,
    bias: Bias,
    params: &SynthParams,
    rng: &mut R,
) -> Series {
    if length == 0 {
        return Vec::new();
    }

    let drift = background_drift(bias, params);
    let sigma = params.walk_sigma;

    let mut bases = Vec::with_capacity(length);
    let mut price = params.start_price;
    bases.push(price);
    for _ in 1..length {
        let z: f64 = rng.sample(StandardNormal);
        price += drift + sigma * z;
        bases.push(price);
    }

    bases
        .into_iter()
        .map(|base| {
            let body = uniform(rng, params.walk_body_min, params.walk_body_max);
            let is_bull = rng.gen::<f64>() < params.bull_probability;
            let (open, close) = if is_bull {
                (base - body / 2.0, base + body / 2.0)
            } else {
                (base + body / 2.0, base - body / 2.0)
            };
            let upper = uniform(rng, params.walk_shadow_min, params.walk_shadow_max);
            let lower = uniform(rng, params.walk_shadow_min, params.walk_shadow_max);
            let volume = draw_volume(rng, params);
            candle_from_body(open, close, upper, lower, volume)
        })
        .collect()
}
