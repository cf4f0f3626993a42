//! Two-branch dispatch: geometric shape, or fallback walk plus recipe tail

use rand::Rng;

use super::{
    interpolate::interpolate,
    recipes::resolve_recipe,
    shapes::resolve_shape,
    tail::apply_recipe,
    tracking::synthesize_from_trajectory,
    walk::generate_fallback,
};
use crate::{params::SynthParams, Bias, Series, SynthesisPlan};

/// Which branch a slug takes. Pure keyword lookup, no randomness.
pub fn plan(slug: &str) -> SynthesisPlan {
    if let Some(shape) = resolve_shape(slug) {
        SynthesisPlan::Shape(shape.id)
    } else if let Some(recipe) = resolve_recipe(slug) {
        SynthesisPlan::Recipe(recipe.id)
    } else {
        SynthesisPlan::Fallback
    }
}

/// Synthesize a full series for `slug`.
///
/// A matching shape owns the entire series and the tail generator is left
/// untouched. Otherwise the fallback walk consumes `series_rng` and a
/// matching recipe rebuilds the tail from `tail_rng`.
pub fn dispatch<S: Rng, T: Rng>(
    slug: &str,
    bias: Bias,
    length: usize,
    params: &SynthParams,
    series_rng: &mut S,
    tail_rng: &mut T,
) -> Series {
    if let Some(entry) = resolve_shape(slug) {
        tracing::debug!(slug, shape = entry.id.as_str(), length, "geometric synthesis");
        let trajectory = interpolate(&entry.shape, length);
        return synthesize_from_trajectory(&trajectory, params, series_rng);
    }

    let series = generate_fallback(length, bias, params, series_rng);
    match resolve_recipe(slug) {
        Some(entry) => {
            tracing::debug!(slug, recipe = entry.id.as_str(), length, "fallback walk with recipe tail");
            apply_recipe(series, entry.specs, params, tail_rng)
        }
        None => {
            tracing::debug!(slug, length, "fallback walk");
            series
        }
    }
}
