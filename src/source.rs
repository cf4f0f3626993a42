//! Optional real market data with synthetic fallback.
//!
//! A [`MarketDataSource`] is best effort. Any failure, an empty response, or
//! rows with inconsistent prices are logged and replaced by the
//! synthesized series for the same example. Callers never see a source
//! error.

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    catalog::{plan_catalog, ChartJob, ExampleKey, PatternRecord},
    validate_price_series, Candle, PatternRequest, Series, Synthesizer,
};

/// Failure of a market data provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Market data unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed for {ticker}: {reason}")]
    Request { ticker: String, reason: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Provider of historical daily candles
pub trait MarketDataSource: Sync {
    fn fetch(&self, ticker: &str, start: &str, end: &str) -> Result<Vec<Candle>, SourceError>;
}

/// Source that never has data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl MarketDataSource for NoSource {
    fn fetch(&self, _ticker: &str, _start: &str, _end: &str) -> Result<Vec<Candle>, SourceError> {
        Err(SourceError::Unavailable("no market data source configured".into()))
    }
}

/// Where a chart's candles came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesOrigin {
    Market,
    Synthetic,
}

/// Fetch real candles for `key`, or synthesize `request` when that fails.
///
/// Market rows are checked for price consistency only, zero volume is
/// accepted. They are truncated to the request length; a shorter market
/// response is kept as is.
pub fn fetch_or_synthesize<S: MarketDataSource + ?Sized>(
    source: &S,
    engine: &Synthesizer,
    request: &PatternRequest,
    key: &ExampleKey,
) -> (Series, SeriesOrigin) {
    match source.fetch(&key.ticker, &key.start, &key.end) {
        Ok(candles) if candles.is_empty() => {
            tracing::warn!(ticker = %key.ticker, slug = %key.slug, "market data empty, synthesizing");
        }
        Ok(mut candles) => match validate_price_series(&candles) {
            Ok(()) => {
                candles.truncate(request.length.get());
                return (candles, SeriesOrigin::Market);
            }
            Err(e) => {
                tracing::warn!(ticker = %key.ticker, slug = %key.slug, error = %e, "market data invalid, synthesizing");
            }
        },
        Err(e) => {
            tracing::warn!(ticker = %key.ticker, slug = %key.slug, error = %e, "market data fetch failed, synthesizing");
        }
    }

    (engine.synthesize_keyed(request, &key.path_key()), SeriesOrigin::Synthetic)
}

/// Catalog batch that tries `source` first for every example
pub fn synthesize_catalog_with_source<S: MarketDataSource + ?Sized>(
    engine: &Synthesizer,
    records: &[PatternRecord],
    source: &S,
) -> Vec<ChartJob> {
    let jobs: Vec<ChartJob> = plan_catalog(engine, records)
        .into_par_iter()
        .map(|chart| {
            let (series, origin) = fetch_or_synthesize(source, engine, &chart.request, &chart.key);
            ChartJob {
                key: chart.key,
                title: chart.title,
                series,
                origin,
            }
        })
        .collect();

    let market = jobs.iter().filter(|j| j.origin == SeriesOrigin::Market).count();
    tracing::info!(
        charts = jobs.len(),
        market,
        synthetic = jobs.len() - market,
        "catalog charts ready"
    );
    jobs
}
