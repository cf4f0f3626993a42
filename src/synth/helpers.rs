//! Shared helpers for the synthesis components
//!
//! Keyword matching for the ordered shape/recipe tables, slug normalization
//! and the bounded random draws every synthesizer uses.

use rand::Rng;

use crate::{params::SynthParams, Candle};

// ============================================================
// KEYWORD MATCHING
// ============================================================

/// Keyword predicate over a normalized slug.
///
/// Matches when every keyword in `all` is a substring of the slug and, if
/// `any` is non-empty, at least one keyword in `any` is too.
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    pub all: &'static [&'static str],
    pub any: &'static [&'static str],
}

impl Keywords {
    pub const fn all(all: &'static [&'static str]) -> Self {
        Self { all, any: &[] }
    }

    pub const fn any(any: &'static [&'static str]) -> Self {
        Self { all: &[], any }
    }

    pub const fn all_any(all: &'static [&'static str], any: &'static [&'static str]) -> Self {
        Self { all, any }
    }

    #[inline]
    pub fn matches(&self, slug: &str) -> bool {
        self.all.iter().all(|k| slug.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| slug.contains(k)))
    }
}

/// First entry whose keywords match wins.
pub fn first_match<'t, T>(table: &'t [(Keywords, T)], slug: &str) -> Option<&'t T> {
    let slug = normalize_slug(slug);
    table
        .iter()
        .find(|(keywords, _)| keywords.matches(&slug))
        .map(|(_, entry)| entry)
}

/// ASCII-lowercase the slug and turn `_` and spaces into `-`.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// ============================================================
// BOUNDED DRAWS
// ============================================================

/// Uniform draw in `[min, max)`; returns `min` for an empty interval.
#[inline]
pub fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Volume carries no price semantics, only a plausible magnitude.
#[inline]
pub fn draw_volume<R: Rng>(rng: &mut R, params: &SynthParams) -> u64 {
    (uniform(rng, params.volume_min, params.volume_max) as u64).max(1)
}

/// Candle with the given body and wick lengths below/above it.
#[inline]
pub fn candle_from_body(open: f64, close: f64, upper_wick: f64, lower_wick: f64, volume: u64) -> Candle {
    Candle {
        open,
        high: open.max(close) + upper_wick.max(0.0),
        low: open.min(close) - lower_wick.max(0.0),
        close,
        volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OHLCVExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_keywords_all() {
        let k = Keywords::all(&["engulfing", "bearish"]);
        assert!(k.matches("bearish-engulfing"));
        assert!(!k.matches("bullish-engulfing"));
    }

    #[test]
    fn test_keywords_any() {
        let k = Keywords::any(&["rounding-bottom", "saucer"]);
        assert!(k.matches("saucer"));
        assert!(k.matches("rounding-bottom"));
        assert!(!k.matches("rounding-top"));
    }

    #[test]
    fn test_first_match_order() {
        let table = [
            (Keywords::all(&["inverted-hammer"]), 1),
            (Keywords::all(&["hammer"]), 2),
        ];
        assert_eq!(first_match(&table, "inverted-hammer"), Some(&1));
        assert_eq!(first_match(&table, "hammer"), Some(&2));
        assert_eq!(first_match(&table, "doji"), None);
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug(" Bullish_Engulfing "), "bullish-engulfing");
        assert_eq!(normalize_slug("Head and Shoulders"), "head-and-shoulders");
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = uniform(&mut rng, 0.1, 1.5);
            assert!((0.1..1.5).contains(&v));
        }
        assert_eq!(uniform(&mut rng, 2.0, 2.0), 2.0);
    }

    #[test]
    fn test_draw_volume_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = SynthParams::default();
        for _ in 0..100 {
            let v = draw_volume(&mut rng, &params);
            assert!(v >= 1_000_000 && v < 5_000_000);
        }
    }

    #[test]
    fn test_candle_from_body() {
        let c = candle_from_body(100.0, 99.0, 0.5, 0.25, 10);
        assert_eq!(c.high, 100.5);
        assert_eq!(c.low, 98.75);
        assert!(c.is_bearish());
        assert!((c.upper_shadow() - 0.5).abs() < 1e-12);
    }
}
