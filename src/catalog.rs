//! Pattern catalog: records, example keys, and batch chart synthesis.
//!
//! The catalog is a JSON array of pattern records. Each record lists the
//! examples to illustrate; every example becomes one chart job whose series
//! is seeded from the pattern slug, the example's position, and the
//! example's path key.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{source::SeriesOrigin, Bias, PatternRequest, Result, Series, SynthError, Synthesizer};

// ============================================================
// RECORDS
// ============================================================

fn default_ticker() -> String {
    "SPY".to_string()
}

fn default_timeframe() -> String {
    "1D".to_string()
}

/// One illustrated example of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternExample {
    #[serde(default = "default_ticker")]
    pub ticker: String,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl Default for PatternExample {
    fn default() -> Self {
        Self {
            ticker: default_ticker(),
            timeframe: default_timeframe(),
            start: String::new(),
            end: String::new(),
        }
    }
}

/// A catalog entry. Fields the synthesizer does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub bias: Bias,
    #[serde(default)]
    pub examples: Vec<PatternExample>,
}

/// Parse a JSON catalog, rejecting empty and duplicate slugs
pub fn parse_catalog(json: &str) -> Result<Vec<PatternRecord>> {
    let records: Vec<PatternRecord> =
        serde_json::from_str(json).map_err(|e| SynthError::InvalidCatalog(e.to_string()))?;

    let mut seen = std::collections::HashSet::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if record.slug.trim().is_empty() {
            return Err(SynthError::InvalidCatalog(format!("record {i} has an empty slug")));
        }
        if !seen.insert(record.slug.as_str()) {
            return Err(SynthError::DuplicateSlug(record.slug.clone()));
        }
    }
    Ok(records)
}

// ============================================================
// EXAMPLE KEYS
// ============================================================

/// Identity of one chart artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExampleKey {
    pub slug: String,
    pub ticker: String,
    pub timeframe: String,
    pub start: String,
    pub end: String,
}

impl ExampleKey {
    pub fn new(slug: &str, example: &PatternExample) -> Self {
        Self {
            slug: slug.to_string(),
            ticker: example.ticker.clone(),
            timeframe: example.timeframe.clone(),
            start: example.start.clone(),
            end: example.end.clone(),
        }
    }

    /// `{ticker}_{timeframe}_{start}_{end}`
    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}_{}", self.ticker, self.timeframe, self.start, self.end)
    }

    /// `{slug}/{file_stem}`; seeds the tail generator
    pub fn path_key(&self) -> String {
        format!("{}/{}", self.slug, self.file_stem())
    }
}

/// Chart title shown above a rendered example
pub fn chart_title(name: &str, key: &ExampleKey) -> String {
    format!("{} - {} {}", name, key.ticker, key.timeframe)
}

// ============================================================
// JOBS
// ============================================================

/// A chart to synthesize, before any series exists
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChart {
    pub request: PatternRequest,
    pub key: ExampleKey,
    pub title: String,
}

/// A synthesized chart ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartJob {
    pub key: ExampleKey,
    pub title: String,
    pub series: Series,
    pub origin: SeriesOrigin,
}

/// Enumerate every example of every record, in catalog order
pub fn plan_catalog(engine: &Synthesizer, records: &[PatternRecord]) -> Vec<PlannedChart> {
    records
        .iter()
        .flat_map(|record| {
            record.examples.iter().enumerate().map(move |(index, example)| {
                let key = ExampleKey::new(&record.slug, example);
                PlannedChart {
                    request: engine.request(record.slug.as_str(), record.bias, index),
                    title: chart_title(&record.name, &key),
                    key,
                }
            })
        })
        .collect()
}

/// Synthesize every planned chart in parallel. Output keeps catalog order.
pub fn synthesize_catalog(engine: &Synthesizer, records: &[PatternRecord]) -> Vec<ChartJob> {
    let planned = plan_catalog(engine, records);
    let jobs: Vec<ChartJob> = planned
        .into_par_iter()
        .map(|chart| {
            let series = engine.synthesize_keyed(&chart.request, &chart.key.path_key());
            ChartJob {
                key: chart.key,
                title: chart.title,
                series,
                origin: SeriesOrigin::Synthetic,
            }
        })
        .collect();

    tracing::info!(
        patterns = records.len(),
        charts = jobs.len(),
        "synthesized catalog charts"
    );
    jobs
}
