//! # patsynth - Pattern Synthesizer
//!
//! Deterministic, illustrative candlestick series for chart pattern catalogs.
//!
//! A pattern slug (e.g. `"bullish-engulfing"`, `"head-and-shoulders"`) and an
//! example index map to a reproducible OHLCV series whose shape visually
//! embodies the named pattern. Chart patterns are drawn by tracking a
//! whole-series geometric trajectory; candlestick patterns are injected as a
//! short tail recipe on top of a random walk. Unknown slugs fall back to the
//! plain walk.
//!
//! ## Quick Start
//!
//! ```rust
//! use patsynth::prelude::*;
//!
//! let engine = SynthesizerBuilder::new().build().unwrap();
//!
//! let request = PatternRequest::new("bullish-engulfing", Bias::Bullish, 0);
//! let series = engine.synthesize(&request);
//!
//! assert_eq!(series.len(), 30);
//! assert_eq!(series, engine.synthesize(&request)); // reproducible
//! assert!(series.iter().all(|c| c.validate().is_ok()));
//! ```

pub mod catalog;
pub mod params;
pub mod source;
pub mod synth;

pub mod prelude {
    pub use crate::{
        // Catalog
        catalog::{parse_catalog, synthesize_catalog, ChartJob, ExampleKey, PatternExample, PatternRecord},
        // Parameters
        params::{ParamMeta, ParamType, SynthParams},
        // Real data
        source::{fetch_or_synthesize, MarketDataSource, NoSource, SeriesOrigin, SourceError},
        // Parallel
        synthesize_parallel,
        // Types
        Bias,
        Candle,
        FamilyId,
        Length,
        // Core traits
        OHLCVExt,
        PatternRequest,
        // Errors
        Result,
        Series,
        SynthConfig,
        SynthError,
        SynthesisPlan,
        // Engine
        Synthesizer,
        SynthesizerBuilder,
        OHLCV,
    };
}

use params::SynthParams;

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors raised at the configuration and catalog edges.
///
/// Dispatch and synthesis never fail; an unmatched slug is a valid input
/// that resolves to the fallback walk.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Series too short: need {need} candles, got {got}")]
    SeriesTooShort { need: usize, got: usize },

    #[error("Series too long: at most {max} candles, got {got}")]
    SeriesTooLong { max: usize, got: usize },

    #[error("Invalid OHLCV at index {index}: {reason}")]
    InvalidOHLCV { index: usize, reason: &'static str },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Duplicate pattern slug: {0}")]
    DuplicateSlug(String),
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Smallest series that fits the longest tail recipe plus an anchor candle
pub const MIN_SERIES_LEN: usize = 5;
/// Candles per illustrative chart
pub const DEFAULT_SERIES_LEN: usize = 30;
/// Upper bound on a requested series length
pub const MAX_SERIES_LEN: usize = 100_000;

/// Series length (must be in [`MIN_SERIES_LEN`, `MAX_SERIES_LEN`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(usize);

impl Length {
    pub const DEFAULT: Self = Self(DEFAULT_SERIES_LEN);

    /// Create a new Length, validating MIN_SERIES_LEN <= value <= MAX_SERIES_LEN
    pub fn new(value: usize) -> Result<Self> {
        if value < MIN_SERIES_LEN {
            return Err(SynthError::SeriesTooShort {
                need: MIN_SERIES_LEN,
                got: value,
            });
        }
        if value > MAX_SERIES_LEN {
            return Err(SynthError::SeriesTooLong {
                max: MAX_SERIES_LEN,
                got: value,
            });
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl serde::Serialize for Length {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Length::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;
}

/// Extension trait with computed properties for OHLCV data
pub trait OHLCVExt: OHLCV {
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Body as ratio of range. Returns None if range ≈ 0
    #[inline]
    fn body_ratio(&self) -> Option<f64> {
        let range = self.range();
        (range > f64::EPSILON).then(|| self.body() / range)
    }

    /// Validate price consistency only: finite values, high and low
    /// bracketing the body. Volume is not checked.
    fn validate_prices(&self) -> Result<()> {
        let invalid = |reason| Err(SynthError::InvalidOHLCV { index: 0, reason });

        if [self.open(), self.high(), self.low(), self.close()]
            .iter()
            .any(|v| v.is_nan())
        {
            return invalid("NaN in OHLCV");
        }
        if [self.open(), self.high(), self.low(), self.close()]
            .iter()
            .any(|v| v.is_infinite())
        {
            return invalid("Infinite value in OHLCV");
        }
        if self.high() < self.open().max(self.close()) {
            return invalid("high below body");
        }
        if self.low() > self.open().min(self.close()) {
            return invalid("low above body");
        }
        Ok(())
    }

    /// Validate OHLCV data consistency, including a positive volume
    fn validate(&self) -> Result<()> {
        self.validate_prices()?;
        if self.volume() <= 0.0 {
            return Err(SynthError::InvalidOHLCV {
                index: 0,
                reason: "volume not positive",
            });
        }
        Ok(())
    }
}

impl<T: OHLCV> OHLCVExt for T {}

/// Validate every bar, reporting the first offending index
pub fn validate_series<T: OHLCV>(bars: &[T]) -> Result<()> {
    validate_each(bars, OHLCVExt::validate)
}

/// Price-only variant of [`validate_series`]. Market rows may carry zero
/// volume (halted sessions, some index feeds).
pub fn validate_price_series<T: OHLCV>(bars: &[T]) -> Result<()> {
    validate_each(bars, OHLCVExt::validate_prices)
}

fn validate_each<T: OHLCV>(bars: &[T], check: fn(&T) -> Result<()>) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        check(bar).map_err(|e| match e {
            SynthError::InvalidOHLCV { reason, .. } => SynthError::InvalidOHLCV { index: i, reason },
            other => other,
        })?;
    }
    Ok(())
}

// ============================================================
// CANDLES
// ============================================================

/// One synthesized time step
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl OHLCV for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume as f64
    }
}

/// Consecutive candles, index-addressed
pub type Series = Vec<Candle>;

// ============================================================
// PATTERN IDENTITY
// ============================================================

/// Directional classification of a pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Bias {
    Bullish,
    #[default]
    Neutral,
    Bearish,
}

impl Bias {
    pub fn as_str(self) -> &'static str {
        match self {
            Bias::Bullish => "Bullish",
            Bias::Neutral => "Neutral",
            Bias::Bearish => "Bearish",
        }
    }
}

/// Identifier of a shape or recipe family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FamilyId(pub &'static str);

impl FamilyId {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Branch the dispatcher takes for a slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisPlan {
    /// Whole-series geometric shape
    Shape(FamilyId),
    /// Random walk with a recipe-built tail
    Recipe(FamilyId),
    /// Plain random walk
    Fallback,
}

impl SynthesisPlan {
    pub fn family(&self) -> Option<FamilyId> {
        match *self {
            SynthesisPlan::Shape(id) | SynthesisPlan::Recipe(id) => Some(id),
            SynthesisPlan::Fallback => None,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, SynthesisPlan::Fallback)
    }
}

/// Input to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PatternRequest {
    pub slug: String,
    #[serde(default)]
    pub bias: Bias,
    #[serde(default)]
    pub example_index: usize,
    #[serde(default)]
    pub length: Length,
}

impl PatternRequest {
    pub fn new(slug: impl Into<String>, bias: Bias, example_index: usize) -> Self {
        Self {
            slug: slug.into(),
            bias,
            example_index,
            length: Length::DEFAULT,
        }
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    /// Tail-seed key used when no artifact key is supplied
    pub fn tail_key(&self) -> String {
        format!("{}#{}", self.slug, self.example_index)
    }
}

// ============================================================
// SYNTHESIZER
// ============================================================

/// Serializable engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Length used for catalog examples
    pub length: Length,
    pub params: SynthParams,
}

impl SynthConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SynthError::InvalidConfig(e.to_string()))?;
        config.params.validate()?;
        Ok(config)
    }
}

/// Pattern series synthesis engine.
///
/// Holds only read-only parameters, so one instance can serve any number of
/// threads; every series gets its own pair of generators.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    #[inline]
    pub fn params(&self) -> &SynthParams {
        &self.config.params
    }

    #[inline]
    pub fn length(&self) -> Length {
        self.config.length
    }

    #[inline]
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Request at this engine's configured length
    pub fn request(&self, slug: impl Into<String>, bias: Bias, example_index: usize) -> PatternRequest {
        PatternRequest::new(slug, bias, example_index).with_length(self.config.length)
    }

    /// Which branch `slug` takes
    #[inline]
    pub fn plan(&self, slug: &str) -> SynthesisPlan {
        synth::plan(slug)
    }

    /// Synthesize with the request's default tail key.
    pub fn synthesize(&self, request: &PatternRequest) -> Series {
        self.synthesize_keyed(request, &request.tail_key())
    }

    /// Synthesize with the tail generator seeded from `tail_key`.
    pub fn synthesize_keyed(&self, request: &PatternRequest, tail_key: &str) -> Series {
        let mut series_rng = synth::series_rng(&request.slug, request.example_index);
        let mut tail_rng = synth::tail_rng(tail_key);
        synth::dispatch(
            &request.slug,
            request.bias,
            request.length.get(),
            &self.config.params,
            &mut series_rng,
            &mut tail_rng,
        )
    }
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating Synthesizer instances
#[derive(Debug, Clone, Default)]
pub struct SynthesizerBuilder {
    length: Option<usize>,
    params: SynthParams,
    overrides: Vec<(String, f64)>,
}

impl SynthesizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a deserialized configuration
    pub fn from_config(config: SynthConfig) -> Self {
        Self {
            length: Some(config.length.get()),
            params: config.params,
            overrides: Vec::new(),
        }
    }

    /// Series length for catalog examples
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Replace all parameters
    pub fn params(mut self, params: SynthParams) -> Self {
        self.params = params;
        self
    }

    /// Override a single parameter by name (validated in `build`)
    pub fn param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.overrides.push((name.into(), value));
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<Synthesizer> {
        let length = match self.length {
            Some(n) => Length::new(n)?,
            None => Length::DEFAULT,
        };
        let mut params = self.params;
        for (name, value) in &self.overrides {
            params.set(name, *value)?;
        }
        params.validate()?;

        Ok(Synthesizer {
            config: SynthConfig { length, params },
        })
    }
}

// ============================================================
// PARALLEL SYNTHESIS
// ============================================================

use rayon::prelude::*;

/// Synthesize many requests in parallel; output order matches input order.
pub fn synthesize_parallel(engine: &Synthesizer, requests: &[PatternRequest]) -> Vec<Series> {
    requests
        .par_iter()
        .map(|request| engine.synthesize(request))
        .collect()
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validation() {
        assert!(Length::new(5).is_ok());
        assert!(Length::new(300).is_ok());
        assert!(matches!(
            Length::new(4),
            Err(SynthError::SeriesTooShort { need: 5, got: 4 })
        ));
        assert_eq!(Length::default().get(), 30);
        assert!(Length::new(MAX_SERIES_LEN).is_ok());
        assert!(matches!(
            Length::new(MAX_SERIES_LEN + 1),
            Err(SynthError::SeriesTooLong { .. })
        ));
    }

    #[test]
    fn test_length_serde() {
        let len: Length = serde_json::from_str("12").unwrap();
        assert_eq!(len.get(), 12);
        assert!(serde_json::from_str::<Length>("2").is_err());
    }

    #[test]
    fn test_ohlcv_ext() {
        let c = Candle::new(100.0, 110.0, 90.0, 105.0, 1000);
        assert_eq!(c.body(), 5.0);
        assert_eq!(c.range(), 20.0);
        assert_eq!(c.upper_shadow(), 5.0);
        assert_eq!(c.lower_shadow(), 10.0);
        assert!(c.is_bullish());
        assert!(!c.is_bearish());
        assert!((c.body_ratio().unwrap() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_candle_validation() {
        assert!(Candle::new(100.0, 101.0, 99.0, 100.5, 1).validate().is_ok());
        assert!(Candle::new(100.0, 100.2, 99.0, 100.5, 1).validate().is_err());
        assert!(Candle::new(100.0, 101.0, 100.1, 100.5, 1).validate().is_err());
        assert!(Candle::new(100.0, 101.0, 99.0, 100.5, 0).validate().is_err());
        assert!(Candle::new(f64::NAN, 101.0, 99.0, 100.5, 1).validate().is_err());
    }

    #[test]
    fn test_price_validation_ignores_volume() {
        let halted = Candle::new(100.0, 101.0, 99.0, 100.5, 0);
        assert!(halted.validate_prices().is_ok());
        assert!(halted.validate().is_err());
        assert!(Candle::new(100.0, 100.2, 99.0, 100.5, 0).validate_prices().is_err());

        let bars = vec![halted, Candle::new(100.0, 101.0, f64::INFINITY, 100.5, 0)];
        assert!(matches!(
            validate_price_series(&bars),
            Err(SynthError::InvalidOHLCV { index: 1, .. })
        ));
        assert!(validate_price_series(&bars[..1]).is_ok());
    }

    #[test]
    fn test_validate_series_reports_index() {
        let bars = vec![
            Candle::new(100.0, 101.0, 99.0, 100.5, 1),
            Candle::new(100.0, 101.0, 99.0, 100.5, 1),
            Candle::new(100.0, 99.0, 98.0, 100.5, 1),
        ];
        assert!(matches!(
            validate_series(&bars),
            Err(SynthError::InvalidOHLCV { index: 2, .. })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let engine = SynthesizerBuilder::new().build().unwrap();
        assert_eq!(engine.length().get(), DEFAULT_SERIES_LEN);
        assert_eq!(*engine.params(), SynthParams::default());
    }

    #[test]
    fn test_builder_rejects_short_length() {
        assert!(SynthesizerBuilder::new().length(3).build().is_err());
    }

    #[test]
    fn test_builder_param_override() {
        let engine = SynthesizerBuilder::new()
            .param("walk_sigma", 0.5)
            .build()
            .unwrap();
        assert_eq!(engine.params().walk_sigma, 0.5);

        assert!(SynthesizerBuilder::new()
            .param("bull_probability", 1.5)
            .build()
            .is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config = SynthConfig::from_json(r#"{"length": 40, "params": {"drift": 0.1}}"#).unwrap();
        assert_eq!(config.length.get(), 40);
        assert_eq!(config.params.drift, 0.1);

        let engine = SynthesizerBuilder::from_config(config).build().unwrap();
        assert_eq!(engine.length().get(), 40);

        assert!(SynthConfig::from_json(r#"{"length": 1}"#).is_err());
        assert!(SynthConfig::from_json(r#"{"length": 1000000000000000000}"#).is_err());
        assert!(SynthesizerBuilder::new().length(usize::MAX).build().is_err());
        assert!(SynthConfig::from_json(r#"{"params": {"walk_body_min": 5.0, "walk_body_max": 1.0}}"#).is_err());
    }

    #[test]
    fn test_request_tail_key() {
        let req = PatternRequest::new("hammer", Bias::Bullish, 2);
        assert_eq!(req.tail_key(), "hammer#2");
        assert_eq!(req.length, Length::DEFAULT);
    }

    #[test]
    fn test_synthesize_deterministic() {
        let engine = SynthesizerBuilder::new().build().unwrap();
        let req = engine.request("head-and-shoulders", Bias::Bearish, 1);
        assert_eq!(engine.synthesize(&req), engine.synthesize(&req));
    }

    #[test]
    fn test_examples_differ() {
        let engine = SynthesizerBuilder::new().build().unwrap();
        let a = engine.synthesize(&engine.request("doji", Bias::Neutral, 0));
        let b = engine.synthesize(&engine.request("doji", Bias::Neutral, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_plan() {
        let engine = SynthesizerBuilder::new().build().unwrap();
        assert_eq!(engine.plan("Double_Bottom"), SynthesisPlan::Shape(FamilyId("double-bottom")));
        assert_eq!(engine.plan("bullish-engulfing").family(), Some(FamilyId("bullish-engulfing")));
        assert!(engine.plan("mystery-formation").is_fallback());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let engine = SynthesizerBuilder::new().build().unwrap();
        let requests: Vec<PatternRequest> = ["hammer", "double-top", "rounding-bottom", "mystery"]
            .iter()
            .enumerate()
            .map(|(i, slug)| engine.request(*slug, Bias::Neutral, i))
            .collect();

        let parallel = synthesize_parallel(&engine, &requests);
        let sequential: Vec<Series> = requests.iter().map(|r| engine.synthesize(r)).collect();
        assert_eq!(parallel, sequential);
    }
}
