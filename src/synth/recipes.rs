//! Short candle recipes for candlestick patterns
//!
//! A recipe is 1-3 relative candle specs chained from a running close. Each
//! one encodes the minimum geometry that makes its pattern recognizable:
//! an engulfing candle's body strictly contains the prior body, a hammer's
//! lower wick is several bodies long with no upper wick, a star gaps away
//! from the candle before it, and so on.
//!
//! Keyword order matters: `inverted-hammer` before `hammer`,
//! `dragonfly-doji` before `doji`, `harami-cross` before `harami`.

use serde::{Deserialize, Serialize};

use super::helpers::{first_match, Keywords};
use crate::FamilyId;

/// Whether a synthesized candle closes above, below, or at its open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorClass {
    #[default]
    Bull,
    Bear,
    Doji,
}

/// One relative candle of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSpec {
    /// Offset of this open from the running close
    pub gap: f64,
    /// Body length, ignored for doji
    pub body: f64,
    pub wick_upper: f64,
    pub wick_lower: f64,
    pub color: ColorClass,
}

impl Default for CandleSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CandleSpec {
    pub const DEFAULT: Self = Self {
        gap: 0.0,
        body: 1.0,
        wick_upper: 0.2,
        wick_lower: 0.2,
        color: ColorClass::Bull,
    };

    pub const fn bull(body: f64) -> Self {
        Self {
            body,
            color: ColorClass::Bull,
            ..Self::DEFAULT
        }
    }

    pub const fn bear(body: f64) -> Self {
        Self {
            body,
            color: ColorClass::Bear,
            ..Self::DEFAULT
        }
    }

    pub const fn doji() -> Self {
        Self {
            body: 0.0,
            color: ColorClass::Doji,
            ..Self::DEFAULT
        }
    }

    pub const fn gap(self, gap: f64) -> Self {
        Self { gap, ..self }
    }

    pub const fn wicks(self, wick_upper: f64, wick_lower: f64) -> Self {
        Self {
            wick_upper,
            wick_lower,
            ..self
        }
    }
}

/// Ordered trailing candle specs of a pattern
pub type Recipe = &'static [CandleSpec];

/// Named recipe resolved from a slug
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeEntry {
    pub id: FamilyId,
    pub specs: Recipe,
}

const fn recipe(id: &'static str, specs: Recipe) -> RecipeEntry {
    RecipeEntry {
        id: FamilyId(id),
        specs,
    }
}

const BEAR: &[&str] = &["bear"];
const DOWN: &[&str] = &["down"];
const TOP: &[&str] = &["top"];

static RECIPES: &[(Keywords, RecipeEntry)] = &[
    // Three-candle reversals
    (
        Keywords::all_any(&["abandoned-baby"], BEAR),
        recipe(
            "bearish-abandoned-baby",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::doji().gap(1.0),
                CandleSpec::bear(2.0).gap(-1.0),
            ],
        ),
    ),
    (
        Keywords::all(&["abandoned-baby"]),
        recipe(
            "bullish-abandoned-baby",
            &[
                CandleSpec::bear(2.0),
                CandleSpec::doji().gap(-1.0),
                CandleSpec::bull(2.0).gap(1.0),
            ],
        ),
    ),
    (
        Keywords::all(&["morning", "doji"]),
        recipe(
            "morning-doji-star",
            &[
                CandleSpec::bear(2.0),
                CandleSpec::doji().gap(-0.6),
                CandleSpec::bull(2.2).gap(0.6),
            ],
        ),
    ),
    (
        Keywords::all(&["evening", "doji"]),
        recipe(
            "evening-doji-star",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::doji().gap(0.6),
                CandleSpec::bear(2.2).gap(-0.6),
            ],
        ),
    ),
    (
        Keywords::all(&["morning", "star"]),
        recipe(
            "morning-star",
            &[
                CandleSpec::bear(2.0),
                CandleSpec::bull(0.3).gap(-0.6),
                CandleSpec::bull(2.2).gap(0.6),
            ],
        ),
    ),
    (
        Keywords::all(&["evening", "star"]),
        recipe(
            "evening-star",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::bear(0.3).gap(0.6),
                CandleSpec::bear(2.2).gap(-0.6),
            ],
        ),
    ),
    // Harami & inside/outside
    (
        Keywords::all_any(&["harami-cross"], BEAR),
        recipe(
            "bearish-harami-cross",
            &[CandleSpec::bull(2.0), CandleSpec::doji().gap(-1.0)],
        ),
    ),
    (
        Keywords::all(&["harami-cross"]),
        recipe(
            "bullish-harami-cross",
            &[CandleSpec::bear(2.0), CandleSpec::doji().gap(1.0)],
        ),
    ),
    (
        Keywords::all_any(&["three-inside"], DOWN),
        recipe(
            "three-inside-down",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::bear(0.8).gap(-0.5),
                CandleSpec::bear(1.5),
            ],
        ),
    ),
    (
        Keywords::all(&["three-inside"]),
        recipe(
            "three-inside-up",
            &[
                CandleSpec::bear(2.0),
                CandleSpec::bull(0.8).gap(0.5),
                CandleSpec::bull(1.5),
            ],
        ),
    ),
    (
        Keywords::all_any(&["three-outside"], DOWN),
        recipe(
            "three-outside-down",
            &[
                CandleSpec::bull(0.6),
                CandleSpec::bear(1.6).gap(0.3),
                CandleSpec::bear(1.0),
            ],
        ),
    ),
    (
        Keywords::all(&["three-outside"]),
        recipe(
            "three-outside-up",
            &[
                CandleSpec::bear(0.6),
                CandleSpec::bull(1.6).gap(-0.3),
                CandleSpec::bull(1.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["harami"], BEAR),
        recipe(
            "bearish-harami",
            &[CandleSpec::bull(2.0), CandleSpec::bear(0.8).gap(-0.5)],
        ),
    ),
    (
        Keywords::all(&["harami"]),
        recipe(
            "bullish-harami",
            &[CandleSpec::bear(2.0), CandleSpec::bull(0.8).gap(0.5)],
        ),
    ),
    // Engulfing
    (
        Keywords::all_any(&["engulfing"], BEAR),
        recipe(
            "bearish-engulfing",
            &[CandleSpec::bull(0.6), CandleSpec::bear(1.6).gap(0.3)],
        ),
    ),
    (
        Keywords::all(&["engulfing"]),
        recipe(
            "bullish-engulfing",
            &[CandleSpec::bear(0.6), CandleSpec::bull(1.6).gap(-0.3)],
        ),
    ),
    // Doji variants
    (
        Keywords::all(&["dragonfly"]),
        recipe("dragonfly-doji", &[CandleSpec::doji().wicks(0.0, 2.0)]),
    ),
    (
        Keywords::all(&["gravestone"]),
        recipe("gravestone-doji", &[CandleSpec::doji().wicks(2.0, 0.0)]),
    ),
    (
        Keywords::any(&["long-legged", "rickshaw"]),
        recipe("long-legged-doji", &[CandleSpec::doji().wicks(1.8, 1.8)]),
    ),
    // Hammer family
    (
        Keywords::all(&["inverted-hammer"]),
        recipe(
            "inverted-hammer",
            &[
                CandleSpec::bear(1.0),
                CandleSpec::bull(0.4).gap(-0.3).wicks(1.6, 0.0),
            ],
        ),
    ),
    (
        Keywords::all(&["hammer"]),
        recipe(
            "hammer",
            &[
                CandleSpec::bear(1.0),
                CandleSpec::bull(0.4).gap(-0.3).wicks(0.0, 1.6),
            ],
        ),
    ),
    (
        Keywords::all(&["shooting-star"]),
        recipe(
            "shooting-star",
            &[
                CandleSpec::bull(1.0),
                CandleSpec::bear(0.4).gap(0.3).wicks(1.8, 0.0),
            ],
        ),
    ),
    (
        Keywords::all(&["hanging-man"]),
        recipe(
            "hanging-man",
            &[
                CandleSpec::bull(1.0),
                CandleSpec::bear(0.4).gap(0.2).wicks(0.0, 1.6),
            ],
        ),
    ),
    // Soldiers & crows
    (
        Keywords::all(&["soldiers"]),
        recipe(
            "three-white-soldiers",
            &[
                CandleSpec::bull(1.5).wicks(0.1, 0.2),
                CandleSpec::bull(1.5).gap(-0.4).wicks(0.1, 0.2),
                CandleSpec::bull(1.5).gap(-0.4).wicks(0.1, 0.2),
            ],
        ),
    ),
    (
        Keywords::any(&["black-crows", "three-crows"]),
        recipe(
            "three-black-crows",
            &[
                CandleSpec::bear(1.5).wicks(0.2, 0.1),
                CandleSpec::bear(1.5).gap(0.4).wicks(0.2, 0.1),
                CandleSpec::bear(1.5).gap(0.4).wicks(0.2, 0.1),
            ],
        ),
    ),
    (
        Keywords::all(&["two-crows"]),
        recipe(
            "two-crows",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::bear(0.6).gap(0.8),
                CandleSpec::bear(1.8).gap(0.2),
            ],
        ),
    ),
    // Full-body candles
    (
        Keywords::all_any(&["marubozu"], BEAR),
        recipe("bearish-marubozu", &[CandleSpec::bear(2.5).wicks(0.0, 0.0)]),
    ),
    (
        Keywords::all(&["marubozu"]),
        recipe("bullish-marubozu", &[CandleSpec::bull(2.5).wicks(0.0, 0.0)]),
    ),
    (
        Keywords::all_any(&["kicking"], BEAR),
        recipe(
            "bearish-kicking",
            &[
                CandleSpec::bull(1.5).wicks(0.0, 0.0),
                CandleSpec::bear(1.5).gap(-2.0).wicks(0.0, 0.0),
            ],
        ),
    ),
    (
        Keywords::all(&["kicking"]),
        recipe(
            "bullish-kicking",
            &[
                CandleSpec::bear(1.5).wicks(0.0, 0.0),
                CandleSpec::bull(1.5).gap(2.0).wicks(0.0, 0.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["belt-hold"], BEAR),
        recipe(
            "bearish-belt-hold",
            &[CandleSpec::bear(2.0).gap(0.5).wicks(0.0, 0.3)],
        ),
    ),
    (
        Keywords::all(&["belt-hold"]),
        recipe(
            "bullish-belt-hold",
            &[CandleSpec::bull(2.0).gap(-0.5).wicks(0.3, 0.0)],
        ),
    ),
    // Two-candle lines
    (
        Keywords::all(&["piercing"]),
        recipe(
            "piercing-line",
            &[CandleSpec::bear(2.0), CandleSpec::bull(1.9).gap(-0.5)],
        ),
    ),
    (
        Keywords::all(&["dark-cloud"]),
        recipe(
            "dark-cloud-cover",
            &[CandleSpec::bull(2.0), CandleSpec::bear(1.9).gap(0.5)],
        ),
    ),
    (
        Keywords::all_any(&["tweezer"], TOP),
        recipe(
            "tweezer-tops",
            &[
                CandleSpec::bull(1.5).wicks(0.4, 0.2),
                CandleSpec::bear(1.2).wicks(0.4, 0.2),
            ],
        ),
    ),
    (
        Keywords::all(&["tweezer"]),
        recipe(
            "tweezer-bottoms",
            &[
                CandleSpec::bear(1.5).wicks(0.2, 0.4),
                CandleSpec::bull(1.2).wicks(0.2, 0.4),
            ],
        ),
    ),
    // Continuation
    (
        Keywords::all_any(&["three-methods"], &["falling"]),
        recipe(
            "falling-three-methods",
            &[
                CandleSpec::bear(2.0),
                CandleSpec::bull(0.6).gap(0.3),
                CandleSpec::bear(2.2).gap(-0.1),
            ],
        ),
    ),
    (
        Keywords::all(&["three-methods"]),
        recipe(
            "rising-three-methods",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::bear(0.6).gap(-0.3),
                CandleSpec::bull(2.2).gap(0.1),
            ],
        ),
    ),
    (
        Keywords::all(&["mat-hold"]),
        recipe(
            "mat-hold",
            &[
                CandleSpec::bull(2.0),
                CandleSpec::bear(0.4).gap(0.6),
                CandleSpec::bull(2.0).gap(0.2),
            ],
        ),
    ),
    (
        Keywords::all_any(&["tasuki"], DOWN),
        recipe(
            "downside-tasuki-gap",
            &[
                CandleSpec::bear(1.2),
                CandleSpec::bear(1.0).gap(-1.0),
                CandleSpec::bull(1.2).gap(0.3),
            ],
        ),
    ),
    (
        Keywords::all(&["tasuki"]),
        recipe(
            "upside-tasuki-gap",
            &[
                CandleSpec::bull(1.2),
                CandleSpec::bull(1.0).gap(1.0),
                CandleSpec::bear(1.2).gap(-0.3),
            ],
        ),
    ),
    (
        Keywords::all_any(&["separating"], BEAR),
        recipe(
            "bearish-separating-lines",
            &[CandleSpec::bull(1.2), CandleSpec::bear(1.4).gap(-1.2)],
        ),
    ),
    (
        Keywords::all(&["separating"]),
        recipe(
            "bullish-separating-lines",
            &[CandleSpec::bear(1.2), CandleSpec::bull(1.4).gap(1.2)],
        ),
    ),
    (
        Keywords::all(&["on-neck"]),
        recipe(
            "on-neck-line",
            &[CandleSpec::bear(1.6), CandleSpec::bull(0.6).gap(-0.8)],
        ),
    ),
    (
        Keywords::all(&["in-neck"]),
        recipe(
            "in-neck-line",
            &[CandleSpec::bear(1.6), CandleSpec::bull(0.7).gap(-0.6)],
        ),
    ),
    (
        Keywords::all(&["thrusting"]),
        recipe(
            "thrusting-pattern",
            &[CandleSpec::bear(1.6), CandleSpec::bull(1.2).gap(-0.6)],
        ),
    ),
    // Equal-level pairs
    (
        Keywords::all_any(&["counterattack"], BEAR),
        recipe(
            "bearish-counterattack",
            &[CandleSpec::bull(1.6), CandleSpec::bear(1.6).gap(1.6)],
        ),
    ),
    (
        Keywords::all(&["counterattack"]),
        recipe(
            "bullish-counterattack",
            &[CandleSpec::bear(1.6), CandleSpec::bull(1.6).gap(-1.6)],
        ),
    ),
    (
        Keywords::all(&["matching-low"]),
        recipe(
            "matching-low",
            &[CandleSpec::bear(1.4), CandleSpec::bear(0.8).gap(0.8)],
        ),
    ),
    (
        Keywords::all(&["homing-pigeon"]),
        recipe(
            "homing-pigeon",
            &[CandleSpec::bear(1.8), CandleSpec::bear(0.6).gap(1.4)],
        ),
    ),
    (
        Keywords::all(&["stick-sandwich"]),
        recipe(
            "stick-sandwich",
            &[
                CandleSpec::bear(1.2),
                CandleSpec::bull(1.0).gap(0.2),
                CandleSpec::bear(1.4).gap(0.2),
            ],
        ),
    ),
    // Exhaustion & rare reversals
    (
        Keywords::all(&["advance-block"]),
        recipe(
            "advance-block",
            &[
                CandleSpec::bull(1.6).wicks(0.2, 0.1),
                CandleSpec::bull(1.0).gap(-0.4).wicks(0.6, 0.1),
                CandleSpec::bull(0.5).gap(-0.2).wicks(1.0, 0.1),
            ],
        ),
    ),
    (
        Keywords::all(&["deliberation"]),
        recipe(
            "deliberation",
            &[
                CandleSpec::bull(1.6),
                CandleSpec::bull(1.4).gap(-0.3),
                CandleSpec::bull(0.3).gap(0.2).wicks(0.3, 0.1),
            ],
        ),
    ),
    (
        Keywords::all(&["ladder-bottom"]),
        recipe(
            "ladder-bottom",
            &[
                CandleSpec::bear(1.2),
                CandleSpec::bear(0.8).gap(-0.1).wicks(1.0, 0.2),
                CandleSpec::bull(1.8).gap(0.5),
            ],
        ),
    ),
    (
        Keywords::all(&["three-river"]),
        recipe(
            "unique-three-river",
            &[
                CandleSpec::bear(1.8),
                CandleSpec::bear(0.5).gap(0.2).wicks(0.1, 1.6),
                CandleSpec::bull(0.3).gap(-0.5),
            ],
        ),
    ),
    (
        Keywords::all(&["baby-swallow"]),
        recipe(
            "concealing-baby-swallow",
            &[
                CandleSpec::bear(1.4).wicks(0.0, 0.0),
                CandleSpec::bear(0.6).gap(-0.3).wicks(0.9, 0.0),
                CandleSpec::bear(2.2).gap(1.8).wicks(0.0, 0.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["tri-star"], BEAR),
        recipe(
            "bearish-tri-star",
            &[
                CandleSpec::doji().wicks(0.4, 0.4),
                CandleSpec::doji().gap(0.8).wicks(0.4, 0.4),
                CandleSpec::doji().gap(-0.8).wicks(0.4, 0.4),
            ],
        ),
    ),
    (
        Keywords::all(&["tri-star"]),
        recipe(
            "bullish-tri-star",
            &[
                CandleSpec::doji().wicks(0.4, 0.4),
                CandleSpec::doji().gap(-0.8).wicks(0.4, 0.4),
                CandleSpec::doji().gap(0.8).wicks(0.4, 0.4),
            ],
        ),
    ),
    // Indecision
    (
        Keywords::all(&["high-wave"]),
        recipe("high-wave", &[CandleSpec::bull(0.3).wicks(2.0, 2.0)]),
    ),
    (
        Keywords::all(&["spinning-top"]),
        recipe("spinning-top", &[CandleSpec::bull(0.3).wicks(1.0, 1.0)]),
    ),
    (
        Keywords::all(&["doji"]),
        recipe("doji", &[CandleSpec::doji().wicks(0.8, 0.8)]),
    ),
];

/// Resolve the tail recipe for a slug, or `None` when no candlestick
/// keyword matches.
pub fn resolve_recipe(slug: &str) -> Option<&'static RecipeEntry> {
    first_match(RECIPES, slug)
}

/// Every recipe in priority order.
pub fn recipe_entries() -> impl Iterator<Item = &'static RecipeEntry> {
    RECIPES.iter().map(|(_, entry)| entry)
}

/// Longest recipe in the table
pub fn max_recipe_len() -> usize {
    recipe_entries().map(|r| r.specs.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(slug: &str) -> Option<&'static str> {
        resolve_recipe(slug).map(|e| e.id.as_str())
    }

    #[test]
    fn test_spec_defaults() {
        let spec = CandleSpec::default();
        assert_eq!(spec.gap, 0.0);
        assert_eq!(spec.body, 1.0);
        assert_eq!(spec.wick_upper, 0.2);
        assert_eq!(spec.wick_lower, 0.2);
        assert_eq!(spec.color, ColorClass::Bull);
    }

    #[test]
    fn test_overlapping_keywords() {
        assert_eq!(id_of("inverted-hammer"), Some("inverted-hammer"));
        assert_eq!(id_of("hammer"), Some("hammer"));
        assert_eq!(id_of("dragonfly-doji"), Some("dragonfly-doji"));
        assert_eq!(id_of("gravestone-doji"), Some("gravestone-doji"));
        assert_eq!(id_of("doji"), Some("doji"));
        assert_eq!(id_of("bullish-harami-cross"), Some("bullish-harami-cross"));
        assert_eq!(id_of("bearish-harami"), Some("bearish-harami"));
        assert_eq!(id_of("morning-doji-star"), Some("morning-doji-star"));
        assert_eq!(id_of("morning-star"), Some("morning-star"));
        assert_eq!(id_of("bullish-abandoned-baby"), Some("bullish-abandoned-baby"));
        assert_eq!(id_of("upside-gap-two-crows"), Some("two-crows"));
    }

    #[test]
    fn test_bias_split() {
        assert_eq!(id_of("bullish-engulfing"), Some("bullish-engulfing"));
        assert_eq!(id_of("bearish-engulfing"), Some("bearish-engulfing"));
        assert_eq!(id_of("bullish-marubozu"), Some("bullish-marubozu"));
        assert_eq!(id_of("bearish-marubozu"), Some("bearish-marubozu"));
        assert_eq!(id_of("tweezer-tops"), Some("tweezer-tops"));
        assert_eq!(id_of("tweezer-bottoms"), Some("tweezer-bottoms"));
    }

    #[test]
    fn test_continuation_and_rare_families() {
        assert_eq!(id_of("rising-three-methods"), Some("rising-three-methods"));
        assert_eq!(id_of("falling-three-methods"), Some("falling-three-methods"));
        assert_eq!(id_of("bullish-mat-hold"), Some("mat-hold"));
        assert_eq!(id_of("upside-tasuki-gap"), Some("upside-tasuki-gap"));
        assert_eq!(id_of("downside-tasuki-gap"), Some("downside-tasuki-gap"));
        assert_eq!(id_of("on-neck-line"), Some("on-neck-line"));
        assert_eq!(id_of("in-neck-line"), Some("in-neck-line"));
        assert_eq!(id_of("thrusting-pattern"), Some("thrusting-pattern"));
        assert_eq!(id_of("bullish-counterattack"), Some("bullish-counterattack"));
        assert_eq!(id_of("bearish-counterattack"), Some("bearish-counterattack"));
        assert_eq!(id_of("bullish-separating-lines"), Some("bullish-separating-lines"));
        assert_eq!(id_of("bearish-separating-lines"), Some("bearish-separating-lines"));
        assert_eq!(id_of("homing-pigeon"), Some("homing-pigeon"));
        assert_eq!(id_of("matching-low"), Some("matching-low"));
        assert_eq!(id_of("stick-sandwich"), Some("stick-sandwich"));
        assert_eq!(id_of("advance-block"), Some("advance-block"));
        assert_eq!(id_of("deliberation"), Some("deliberation"));
        assert_eq!(id_of("ladder-bottom"), Some("ladder-bottom"));
        assert_eq!(id_of("unique-three-river"), Some("unique-three-river"));
        assert_eq!(id_of("concealing-baby-swallow"), Some("concealing-baby-swallow"));
        assert_eq!(id_of("bullish-tri-star"), Some("bullish-tri-star"));
        assert_eq!(id_of("bearish-tri-star"), Some("bearish-tri-star"));
    }

    #[test]
    fn test_unknown_slug() {
        assert!(resolve_recipe("bullish-island-reversal").is_none());
        assert!(resolve_recipe("").is_none());
    }

    #[test]
    fn test_recipes_are_short_and_valid() {
        for entry in recipe_entries() {
            assert!((1..=3).contains(&entry.specs.len()), "{}", entry.id.as_str());
            for spec in entry.specs {
                assert!(spec.body >= 0.0 && spec.wick_upper >= 0.0 && spec.wick_lower >= 0.0);
            }
        }
        assert_eq!(max_recipe_len(), 3);
    }
}
