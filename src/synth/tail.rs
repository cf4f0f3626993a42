//! Recipe-driven tail replacement

use rand::Rng;

use super::helpers::{candle_from_body, draw_volume, uniform};
use super::recipes::{CandleSpec, ColorClass};
use crate::{params::SynthParams, Candle, Series};

/// Replace the trailing `recipe.len()` candles of `series` with candles
/// built from the recipe, chained from the close of the last kept candle.
///
/// The series length never changes. Callers keep `series.len() > recipe.len()`
/// (lengths are validated `>= 5`); for a shorter series only the trailing
/// recipe specs that fit are applied, anchored on the antepenultimate close.
pub fn apply_recipe<R: Rng>(
    mut series: Series,
    recipe: &[CandleSpec],
    params: &SynthParams,
    rng: &mut R,
) -> Series {
    let k = recipe.len().min(series.len());
    if k == 0 {
        return series;
    }
    let specs = &recipe[recipe.len() - k..];

    let keep = series.len() - k;
    let anchor = match keep.checked_sub(1) {
        Some(last_kept) => series[last_kept].close,
        None => series[series.len().saturating_sub(3)].close,
    };

    series.truncate(keep);
    let mut running_close = anchor;
    for spec in specs {
        let candle = build_candle(spec, running_close, params, rng);
        running_close = candle.close;
        series.push(candle);
    }

    series
}

fn build_candle<R: Rng>(
    spec: &CandleSpec,
    running_close: f64,
    params: &SynthParams,
    rng: &mut R,
) -> Candle {
    let open = running_close + spec.gap;
    let close = match spec.color {
        ColorClass::Bull => open + spec.body,
        ColorClass::Bear => open - spec.body,
        ColorClass::Doji => open,
    };

    let upper = spec.wick_upper + uniform(rng, 0.0, params.wick_noise_max);
    let lower = spec.wick_lower + uniform(rng, 0.0, params.wick_noise_max);
    let volume = draw_volume(rng, params);

    candle_from_body(open, close, upper, lower, volume)
}
