//! Pattern-to-series synthesis components
//!
//! # Components
//!
//! - **seed**: reproducible per-example and per-artifact seeds
//! - **shapes**: whole-series keyframe tables and parabolic curves
//! - **interpolate**: keyframes to a dense target trajectory
//! - **tracking**: trajectory to candles that chase each target
//! - **recipes**: short candle recipes for candlestick patterns
//! - **tail**: recipe-driven replacement of the trailing candles
//! - **walk**: random-walk fallback series
//! - **dispatch**: shape path, or walk plus recipe path

pub mod helpers;

pub mod dispatch;
pub mod interpolate;
pub mod recipes;
pub mod seed;
pub mod shapes;
pub mod tail;
pub mod tracking;
pub mod walk;

// Re-export the component entry points for convenience
pub use dispatch::{dispatch, plan};
pub use helpers::{normalize_slug, Keywords};
pub use interpolate::{interpolate, Trajectory};
pub use recipes::{resolve_recipe, CandleSpec, ColorClass, Recipe, RecipeEntry};
pub use seed::{derive_seed, derive_tail_seed, series_rng, tail_rng};
pub use shapes::{resolve_shape, Curvature, Keyframe, Shape, ShapeEntry};
pub use tail::apply_recipe;
pub use tracking::synthesize_from_trajectory;
pub use walk::{background_drift, generate_fallback};
