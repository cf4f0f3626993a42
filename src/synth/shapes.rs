//! Whole-series geometric shapes
//!
//! Chart patterns (double tops, triangles, head-and-shoulders, flags,
//! wedges, diamonds, islands, harmonic counts, ...) are described as keyframe
//! tables or parametric curves that span the entire series. Keyframe
//! positions are authored on the default 30-candle axis `[0, 29]`.
//!
//! Lookup is keyword-based over the slug and evaluated top-to-bottom, so
//! more specific entries (`triple-bottom`, `inverse-head-and-shoulders`)
//! sit above the general ones they overlap with.

use super::helpers::{first_match, Keywords};
use crate::FamilyId;

/// Anchor of a keyframe shape: target price at a (fractional) position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub position: f64,
    pub price: f64,
}

const fn kf(position: f64, price: f64) -> Keyframe {
    Keyframe { position, price }
}

/// Which way a parabolic rounded shape opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curvature {
    /// `base + amplitude * t^2` (rounding bottom / saucer)
    Bottom,
    /// `base - amplitude * t^2` (rounding top)
    Top,
}

/// Geometric target-price definition of a whole series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// At least two keyframes in increasing position order.
    Keyframes(&'static [Keyframe]),
    /// Closed-form quadratic over `t` in `[-1, 1]`.
    Parabola {
        base: f64,
        amplitude: f64,
        curvature: Curvature,
    },
}

/// Named shape resolved from a slug
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEntry {
    pub id: FamilyId,
    pub shape: Shape,
}

const fn keyframes(id: &'static str, frames: &'static [Keyframe]) -> ShapeEntry {
    ShapeEntry {
        id: FamilyId(id),
        shape: Shape::Keyframes(frames),
    }
}

const fn parabola(id: &'static str, base: f64, amplitude: f64, curvature: Curvature) -> ShapeEntry {
    ShapeEntry {
        id: FamilyId(id),
        shape: Shape::Parabola {
            base,
            amplitude,
            curvature,
        },
    }
}

const INVERSE: &[&str] = &["inverse", "inverted"];

static SHAPES: &[(Keywords, ShapeEntry)] = &[
    // Tops & bottoms
    (
        Keywords::all(&["triple-bottom"]),
        keyframes(
            "triple-bottom",
            &[
                kf(0.0, 106.0),
                kf(4.0, 95.0),
                kf(9.0, 102.0),
                kf(14.0, 95.0),
                kf(19.0, 102.0),
                kf(24.0, 95.0),
                kf(29.0, 108.0),
            ],
        ),
    ),
    (
        Keywords::all(&["triple-top"]),
        keyframes(
            "triple-top",
            &[
                kf(0.0, 94.0),
                kf(4.0, 105.0),
                kf(9.0, 98.0),
                kf(14.0, 105.0),
                kf(19.0, 98.0),
                kf(24.0, 105.0),
                kf(29.0, 92.0),
            ],
        ),
    ),
    (
        Keywords::all(&["double-bottom"]),
        keyframes(
            "double-bottom",
            &[
                kf(0.0, 105.0),
                kf(6.0, 95.0),
                kf(12.0, 102.0),
                kf(18.0, 95.0),
                kf(24.0, 108.0),
                kf(29.0, 110.0),
            ],
        ),
    ),
    (
        Keywords::all(&["double-top"]),
        keyframes(
            "double-top",
            &[
                kf(0.0, 95.0),
                kf(6.0, 105.0),
                kf(12.0, 98.0),
                kf(18.0, 105.0),
                kf(24.0, 92.0),
                kf(29.0, 90.0),
            ],
        ),
    ),
    // Head and shoulders
    (
        Keywords::all_any(&["head-and-shoulders"], INVERSE),
        keyframes(
            "inverse-head-and-shoulders",
            &[
                kf(0.0, 105.0),
                kf(5.0, 97.0),
                kf(9.0, 101.0),
                kf(15.0, 92.0),
                kf(20.0, 101.0),
                kf(25.0, 97.0),
                kf(29.0, 107.0),
            ],
        ),
    ),
    (
        Keywords::all(&["head-and-shoulders"]),
        keyframes(
            "head-and-shoulders",
            &[
                kf(0.0, 95.0),
                kf(5.0, 103.0),
                kf(9.0, 99.0),
                kf(15.0, 108.0),
                kf(20.0, 99.0),
                kf(25.0, 103.0),
                kf(29.0, 93.0),
            ],
        ),
    ),
    // Cup and handle
    (
        Keywords::all_any(&["cup-and-handle"], INVERSE),
        keyframes(
            "inverted-cup-and-handle",
            &[
                kf(0.0, 92.0),
                kf(4.0, 99.0),
                kf(9.0, 104.0),
                kf(14.0, 105.0),
                kf(19.0, 99.0),
                kf(22.0, 92.0),
                kf(24.0, 95.0),
                kf(26.0, 96.0),
                kf(29.0, 88.0),
            ],
        ),
    ),
    (
        Keywords::any(&["cup-and-handle", "cup-with-handle"]),
        keyframes(
            "cup-and-handle",
            &[
                kf(0.0, 108.0),
                kf(4.0, 101.0),
                kf(9.0, 96.0),
                kf(14.0, 95.0),
                kf(19.0, 101.0),
                kf(22.0, 108.0),
                kf(24.0, 105.0),
                kf(26.0, 104.0),
                kf(29.0, 112.0),
            ],
        ),
    ),
    // Rounded shapes
    (
        Keywords::any(&["rounding-bottom", "rounded-bottom", "saucer"]),
        parabola("rounding-bottom", 95.0, 10.0, Curvature::Bottom),
    ),
    (
        Keywords::any(&["rounding-top", "rounded-top"]),
        parabola("rounding-top", 105.0, 10.0, Curvature::Top),
    ),
    // Triangles
    (
        Keywords::all(&["ascending-triangle"]),
        keyframes(
            "ascending-triangle",
            &[
                kf(0.0, 96.0),
                kf(4.0, 108.0),
                kf(8.0, 99.0),
                kf(12.0, 108.0),
                kf(16.0, 102.0),
                kf(20.0, 108.0),
                kf(24.0, 105.0),
                kf(26.0, 108.0),
                kf(29.0, 113.0),
            ],
        ),
    ),
    (
        Keywords::all(&["descending-triangle"]),
        keyframes(
            "descending-triangle",
            &[
                kf(0.0, 104.0),
                kf(4.0, 92.0),
                kf(8.0, 101.0),
                kf(12.0, 92.0),
                kf(16.0, 98.0),
                kf(20.0, 92.0),
                kf(24.0, 95.0),
                kf(26.0, 92.0),
                kf(29.0, 87.0),
            ],
        ),
    ),
    (
        Keywords::any(&["symmetrical-triangle", "symmetric-triangle"]),
        keyframes(
            "symmetrical-triangle",
            &[
                kf(0.0, 100.0),
                kf(4.0, 110.0),
                kf(8.0, 92.0),
                kf(12.0, 107.0),
                kf(16.0, 95.0),
                kf(20.0, 104.0),
                kf(24.0, 98.0),
                kf(26.0, 101.0),
                kf(29.0, 106.0),
            ],
        ),
    ),
    // Wedges
    (
        Keywords::all(&["rising-wedge"]),
        keyframes(
            "rising-wedge",
            &[
                kf(0.0, 92.0),
                kf(4.0, 100.0),
                kf(7.0, 96.0),
                kf(11.0, 103.0),
                kf(14.0, 100.0),
                kf(18.0, 105.0),
                kf(21.0, 103.0),
                kf(24.0, 106.0),
                kf(29.0, 96.0),
            ],
        ),
    ),
    (
        Keywords::all(&["falling-wedge"]),
        keyframes(
            "falling-wedge",
            &[
                kf(0.0, 108.0),
                kf(4.0, 100.0),
                kf(7.0, 104.0),
                kf(11.0, 97.0),
                kf(14.0, 100.0),
                kf(18.0, 95.0),
                kf(21.0, 97.0),
                kf(24.0, 94.0),
                kf(29.0, 104.0),
            ],
        ),
    ),
    // Flags & pennants
    (
        Keywords::all_any(&["flag"], &["bear"]),
        keyframes(
            "bear-flag",
            &[
                kf(0.0, 108.0),
                kf(8.0, 92.0),
                kf(11.0, 95.0),
                kf(14.0, 93.0),
                kf(17.0, 96.0),
                kf(20.0, 94.0),
                kf(23.0, 97.0),
                kf(29.0, 86.0),
            ],
        ),
    ),
    (
        Keywords::all(&["flag"]),
        keyframes(
            "bull-flag",
            &[
                kf(0.0, 92.0),
                kf(8.0, 108.0),
                kf(11.0, 105.0),
                kf(14.0, 107.0),
                kf(17.0, 104.0),
                kf(20.0, 106.0),
                kf(23.0, 103.0),
                kf(29.0, 114.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["pennant"], &["bear"]),
        keyframes(
            "bear-pennant",
            &[
                kf(0.0, 108.0),
                kf(8.0, 92.0),
                kf(11.0, 97.0),
                kf(14.0, 93.0),
                kf(17.0, 96.0),
                kf(20.0, 94.0),
                kf(23.0, 95.0),
                kf(29.0, 87.0),
            ],
        ),
    ),
    (
        Keywords::all(&["pennant"]),
        keyframes(
            "bull-pennant",
            &[
                kf(0.0, 92.0),
                kf(8.0, 108.0),
                kf(11.0, 103.0),
                kf(14.0, 107.0),
                kf(17.0, 104.0),
                kf(20.0, 106.0),
                kf(23.0, 105.0),
                kf(29.0, 113.0),
            ],
        ),
    ),
    // Channels, ranges, broadening
    (
        Keywords::any(&["channel-up", "ascending-channel"]),
        keyframes(
            "channel-up",
            &[
                kf(0.0, 95.0),
                kf(4.0, 100.0),
                kf(7.0, 98.0),
                kf(11.0, 103.0),
                kf(14.0, 101.0),
                kf(18.0, 106.0),
                kf(21.0, 104.0),
                kf(25.0, 109.0),
                kf(29.0, 108.0),
            ],
        ),
    ),
    (
        Keywords::any(&["channel-down", "descending-channel"]),
        keyframes(
            "channel-down",
            &[
                kf(0.0, 105.0),
                kf(4.0, 100.0),
                kf(7.0, 102.0),
                kf(11.0, 97.0),
                kf(14.0, 99.0),
                kf(18.0, 94.0),
                kf(21.0, 96.0),
                kf(25.0, 91.0),
                kf(29.0, 92.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["rectangle"], &["bear"]),
        keyframes(
            "bearish-rectangle",
            &[
                kf(0.0, 108.0),
                kf(5.0, 96.0),
                kf(9.0, 102.0),
                kf(13.0, 96.0),
                kf(17.0, 102.0),
                kf(21.0, 96.0),
                kf(25.0, 102.0),
                kf(29.0, 90.0),
            ],
        ),
    ),
    (
        Keywords::all(&["rectangle"]),
        keyframes(
            "bullish-rectangle",
            &[
                kf(0.0, 92.0),
                kf(5.0, 104.0),
                kf(9.0, 98.0),
                kf(13.0, 104.0),
                kf(17.0, 98.0),
                kf(21.0, 104.0),
                kf(25.0, 98.0),
                kf(29.0, 110.0),
            ],
        ),
    ),
    (
        Keywords::any(&["broadening", "megaphone"]),
        keyframes(
            "broadening-formation",
            &[
                kf(0.0, 100.0),
                kf(4.0, 103.0),
                kf(8.0, 97.0),
                kf(12.0, 106.0),
                kf(16.0, 94.0),
                kf(20.0, 109.0),
                kf(24.0, 91.0),
                kf(29.0, 104.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["diamond"], &["bottom"]),
        keyframes(
            "diamond-bottom",
            &[
                kf(0.0, 100.0),
                kf(4.0, 96.0),
                kf(7.0, 101.0),
                kf(11.0, 93.0),
                kf(15.0, 103.0),
                kf(19.0, 95.0),
                kf(22.0, 101.0),
                kf(25.0, 98.0),
                kf(29.0, 106.0),
            ],
        ),
    ),
    (
        Keywords::all(&["diamond"]),
        keyframes(
            "diamond-top",
            &[
                kf(0.0, 100.0),
                kf(4.0, 104.0),
                kf(7.0, 99.0),
                kf(11.0, 107.0),
                kf(15.0, 97.0),
                kf(19.0, 105.0),
                kf(22.0, 99.0),
                kf(25.0, 102.0),
                kf(29.0, 94.0),
            ],
        ),
    ),
    // Gapped and blow-off reversals
    (
        Keywords::all_any(&["island"], &["bear"]),
        keyframes(
            "bearish-island-reversal",
            &[
                kf(0.0, 92.0),
                kf(8.0, 99.0),
                kf(9.0, 103.0),
                kf(17.0, 104.0),
                kf(18.0, 100.0),
                kf(29.0, 94.0),
            ],
        ),
    ),
    (
        Keywords::all(&["island"]),
        keyframes(
            "bullish-island-reversal",
            &[
                kf(0.0, 108.0),
                kf(8.0, 101.0),
                kf(9.0, 97.0),
                kf(17.0, 96.0),
                kf(18.0, 100.0),
                kf(29.0, 106.0),
            ],
        ),
    ),
    (
        Keywords::all(&["bump-and-run"]),
        keyframes(
            "bump-and-run",
            &[
                kf(0.0, 100.0),
                kf(10.0, 104.0),
                kf(15.0, 112.0),
                kf(18.0, 106.0),
                kf(22.0, 103.0),
                kf(29.0, 96.0),
            ],
        ),
    ),
    // Harmonic and wave counts
    (
        Keywords::all_any(&["wolfe"], &["bear"]),
        keyframes(
            "bearish-wolfe-wave",
            &[
                kf(0.0, 92.0),
                kf(6.0, 100.0),
                kf(12.0, 96.0),
                kf(18.0, 103.0),
                kf(23.0, 99.0),
                kf(26.0, 105.0),
                kf(29.0, 97.0),
            ],
        ),
    ),
    (
        Keywords::all(&["wolfe"]),
        keyframes(
            "bullish-wolfe-wave",
            &[
                kf(0.0, 108.0),
                kf(6.0, 100.0),
                kf(12.0, 104.0),
                kf(18.0, 97.0),
                kf(23.0, 101.0),
                kf(26.0, 95.0),
                kf(29.0, 103.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["three-drives"], &["bear"]),
        keyframes(
            "bearish-three-drives",
            &[
                kf(0.0, 92.0),
                kf(5.0, 99.0),
                kf(9.0, 96.0),
                kf(15.0, 102.0),
                kf(19.0, 99.0),
                kf(25.0, 105.0),
                kf(29.0, 100.0),
            ],
        ),
    ),
    (
        Keywords::all(&["three-drives"]),
        keyframes(
            "bullish-three-drives",
            &[
                kf(0.0, 108.0),
                kf(5.0, 101.0),
                kf(9.0, 104.0),
                kf(15.0, 98.0),
                kf(19.0, 101.0),
                kf(25.0, 95.0),
                kf(29.0, 100.0),
            ],
        ),
    ),
    (
        Keywords::all_any(&["abcd"], &["bear"]),
        keyframes(
            "bearish-abcd",
            &[
                kf(0.0, 92.0),
                kf(9.0, 100.0),
                kf(15.0, 96.0),
                kf(25.0, 104.0),
                kf(29.0, 100.0),
            ],
        ),
    ),
    (
        Keywords::all(&["abcd"]),
        keyframes(
            "bullish-abcd",
            &[
                kf(0.0, 108.0),
                kf(9.0, 100.0),
                kf(15.0, 104.0),
                kf(25.0, 96.0),
                kf(29.0, 100.0),
            ],
        ),
    ),
    // Measured moves
    (
        Keywords::all_any(&["measured-move"], &["down"]),
        keyframes(
            "measured-move-down",
            &[
                kf(0.0, 110.0),
                kf(9.0, 98.0),
                kf(13.0, 102.0),
                kf(17.0, 100.0),
                kf(29.0, 88.0),
            ],
        ),
    ),
    (
        Keywords::all(&["measured-move"]),
        keyframes(
            "measured-move-up",
            &[
                kf(0.0, 90.0),
                kf(9.0, 102.0),
                kf(13.0, 98.0),
                kf(17.0, 100.0),
                kf(29.0, 112.0),
            ],
        ),
    ),
];

/// Resolve the whole-series shape for a slug, or `None` when no shape
/// keyword matches. Deterministic; draws no randomness.
pub fn resolve_shape(slug: &str) -> Option<&'static ShapeEntry> {
    first_match(SHAPES, slug)
}

/// Every shape in priority order.
pub fn shape_entries() -> impl Iterator<Item = &'static ShapeEntry> {
    SHAPES.iter().map(|(_, entry)| entry)
}
