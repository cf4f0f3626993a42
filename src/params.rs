//! Tunable synthesis parameters
//!
//! Every numeric constant the synthesizers draw from is a named parameter
//! with metadata, enabling:
//! - Sweeps over visual styles (grid generation)
//! - Parameter documentation
//! - Configuration from plain key/value maps
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use patsynth::params::SynthParams;
//!
//! let mut overrides = HashMap::new();
//! overrides.insert("shadow_max", 0.3);
//! let params = SynthParams::with_params(&overrides).unwrap();
//! assert_eq!(params.shadow_max, 0.3);
//! assert_eq!(params.start_price, 100.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, SynthError};

// ============================================================
// PARAMETER TYPES
// ============================================================

/// Type of parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
  /// Absolute price distance or level (finite, non-negative)
  Price,
  /// Probability in 0.0..=1.0
  Probability,
  /// Share volume (positive whole number)
  Volume,
}

/// Metadata for a single synthesis parameter
#[derive(Debug, Clone)]
pub struct ParamMeta {
  /// Parameter name (e.g., "body_noise")
  pub name: &'static str,
  pub param_type: ParamType,
  pub default: f64,
  /// Sweep range: (min, max, step)
  pub range: (f64, f64, f64),
  pub description: &'static str,
}

impl ParamMeta {
  pub const fn price(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Price, default, range, description }
  }

  pub const fn probability(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Probability, default, range, description }
  }

  pub const fn volume(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Volume, default, range, description }
  }

  /// Generate all values for a sweep
  pub fn generate_grid(&self) -> Vec<f64> {
    let (min, max, step) = self.range;
    let mut values = Vec::new();
    let mut i = 0u32;
    loop {
      let v = min + step * f64::from(i);
      if v > max + f64::EPSILON * max.abs().max(1.0) {
        break;
      }
      values.push(v);
      i += 1;
    }
    values
  }

  /// Validate a value for this parameter
  pub fn validate(&self, value: f64) -> Result<()> {
    if !value.is_finite() {
      return Err(SynthError::InvalidValue("parameter must be finite"));
    }
    let (min, max, _) = self.range;
    if value < min || value > max {
      return Err(SynthError::OutOfRange { field: self.name, value, min, max });
    }
    match self.param_type {
      ParamType::Price => Ok(()),
      ParamType::Probability => {
        if !(0.0..=1.0).contains(&value) {
          return Err(SynthError::OutOfRange { field: self.name, value, min: 0.0, max: 1.0 });
        }
        Ok(())
      },
      ParamType::Volume => {
        if value < 1.0 || value.fract() != 0.0 {
          return Err(SynthError::InvalidValue("volume must be a positive whole number"));
        }
        Ok(())
      },
    }
  }
}

// ============================================================
// SYNTH PARAMS
// ============================================================

/// Numeric knobs of the three candle synthesizers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
  /// Half-range of the flat first candle on the geometric path
  pub first_spread: f64,
  /// Body noise on the geometric path is drawn from `[-body_noise, body_noise)`
  pub body_noise: f64,
  pub min_body: f64,
  /// Geometric-path shadows are drawn from `[0, shadow_max)`
  pub shadow_max: f64,
  /// Recipe wicks grow by `[0, wick_noise_max)` on each side
  pub wick_noise_max: f64,
  pub volume_min: f64,
  pub volume_max: f64,
  /// First base of the fallback walk
  pub start_price: f64,
  /// Magnitude of the per-step fallback drift
  pub drift: f64,
  /// Standard deviation of the per-step Gaussian walk noise
  pub walk_sigma: f64,
  pub walk_body_min: f64,
  pub walk_body_max: f64,
  pub walk_shadow_min: f64,
  pub walk_shadow_max: f64,
  /// Chance a fallback candle is bullish
  pub bull_probability: f64,
}

impl Default for SynthParams {
  fn default() -> Self {
    Self {
      first_spread: 0.5,
      body_noise: 0.2,
      min_body: 0.1,
      shadow_max: 0.6,
      wick_noise_max: 0.1,
      volume_min: 1_000_000.0,
      volume_max: 5_000_000.0,
      start_price: 100.0,
      drift: 0.3,
      walk_sigma: 1.5,
      walk_body_min: 0.3,
      walk_body_max: 2.0,
      walk_shadow_min: 0.1,
      walk_shadow_max: 1.5,
      bull_probability: 0.55,
    }
  }
}

/// Generate by-name access for the listed `SynthParams` fields.
macro_rules! impl_param_access {
  ($($field:ident),* $(,)?) => {
    impl SynthParams {
      /// Current value of a parameter by name
      pub fn get(&self, name: &str) -> Option<f64> {
        match name {
          $(stringify!($field) => Some(self.$field),)*
          _ => None,
        }
      }

      fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        match name {
          $(stringify!($field) => Some(&mut self.$field),)*
          _ => None,
        }
      }
    }
  };
}

impl_param_access!(
  first_spread,
  body_noise,
  min_body,
  shadow_max,
  wick_noise_max,
  volume_min,
  volume_max,
  start_price,
  drift,
  walk_sigma,
  walk_body_min,
  walk_body_max,
  walk_shadow_min,
  walk_shadow_max,
  bull_probability,
);

static PARAM_META: &[ParamMeta] = &[
  ParamMeta::price("first_spread", 0.5, (0.0, 5.0, 0.25), "Half-range of the first geometric candle"),
  ParamMeta::price("body_noise", 0.2, (0.0, 2.0, 0.1), "Uniform noise added to geometric bodies"),
  ParamMeta::price("min_body", 0.1, (0.0, 2.0, 0.05), "Smallest geometric body"),
  ParamMeta::price("shadow_max", 0.6, (0.0, 5.0, 0.2), "Upper bound of geometric shadows"),
  ParamMeta::price("wick_noise_max", 0.1, (0.0, 1.0, 0.05), "Upper bound of recipe wick noise"),
  ParamMeta::volume("volume_min", 1e6, (1.0, 1e9, 1e6), "Lower bound of candle volume"),
  ParamMeta::volume("volume_max", 5e6, (1.0, 1e9, 1e6), "Upper bound of candle volume"),
  ParamMeta::price("start_price", 100.0, (1.0, 1e6, 50.0), "First base of the fallback walk"),
  ParamMeta::price("drift", 0.3, (0.0, 5.0, 0.1), "Per-step drift magnitude of the fallback walk"),
  ParamMeta::price("walk_sigma", 1.5, (0.0, 10.0, 0.5), "Gaussian step noise of the fallback walk"),
  ParamMeta::price("walk_body_min", 0.3, (0.0, 10.0, 0.1), "Lower bound of fallback bodies"),
  ParamMeta::price("walk_body_max", 2.0, (0.0, 10.0, 0.5), "Upper bound of fallback bodies"),
  ParamMeta::price("walk_shadow_min", 0.1, (0.0, 10.0, 0.1), "Lower bound of fallback shadows"),
  ParamMeta::price("walk_shadow_max", 1.5, (0.0, 10.0, 0.5), "Upper bound of fallback shadows"),
  ParamMeta::probability("bull_probability", 0.55, (0.0, 1.0, 0.05), "Chance a fallback candle is bullish"),
];

impl SynthParams {
  /// Metadata for every configurable parameter
  pub fn param_meta() -> &'static [ParamMeta] {
    PARAM_META
  }

  /// Build parameters from a key/value map; missing keys keep defaults.
  pub fn with_params(params: &HashMap<&str, f64>) -> Result<Self> {
    let mut out = Self::default();
    for (key, value) in params {
      out.set(key, *value)?;
    }
    out.validate()?;
    Ok(out)
  }

  /// Set one parameter by name, validating the value against its metadata.
  pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
    let meta = PARAM_META
      .iter()
      .find(|m| m.name == name)
      .ok_or_else(|| SynthError::InvalidConfig(format!("unknown parameter `{name}`")))?;
    meta.validate(value)?;
    if let Some(slot) = self.slot_mut(meta.name) {
      *slot = value;
    }
    Ok(())
  }

  /// Validate every value and the min/max pairs
  pub fn validate(&self) -> Result<()> {
    for meta in PARAM_META {
      if let Some(value) = self.get(meta.name) {
        meta.validate(value)?;
      }
    }
    let pairs = [
      ("volume", self.volume_min, self.volume_max),
      ("walk_body", self.walk_body_min, self.walk_body_max),
      ("walk_shadow", self.walk_shadow_min, self.walk_shadow_max),
    ];
    for (name, min, max) in pairs {
      if min > max {
        return Err(SynthError::InvalidConfig(format!("{name}_min ({min}) > {name}_max ({max})")));
      }
    }
    Ok(())
  }
}

// ============================================================
// TESTS
// ============================================================
