use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::models::{Bucket, Dimension, Snapshot};

pub const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Whole minutes in `nanos`, rounded down. Sub-minute time is dropped.
pub fn ns_to_minutes(nanos: u64) -> u64 {
    nanos / NANOS_PER_MINUTE
}

/// Renders a calendar date as a chart label.
///
/// Locale handling is the caller's business; the core only needs a
/// deterministic `NaiveDate -> String`. Any closure of that shape works.
pub trait DateLabeler {
    fn label(&self, date: NaiveDate) -> String;
}

impl<F> DateLabeler for F
where
    F: Fn(NaiveDate) -> String,
{
    fn label(&self, date: NaiveDate) -> String {
        self(date)
    }
}

/// Abbreviated English month and unpadded day, e.g. `Sep 8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortMonthDay;

impl DateLabeler for ShortMonthDay {
    fn label(&self, date: NaiveDate) -> String {
        date.format("%b %-d").to_string()
    }
}

/// Parallel labels and minute values, in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total_minutes(&self) -> u64 {
        self.values.iter().sum()
    }
}

pub fn extract_series(buckets: &[Bucket]) -> Result<Series> {
    build_series(buckets, "buckets", |bucket| Ok(bucket.name.clone()))
}

/// Like [`extract_series`], with each ISO date key rendered by `labeler`.
pub fn extract_daily_series(buckets: &[Bucket], labeler: &dyn DateLabeler) -> Result<Series> {
    build_series(buckets, Dimension::Daily.as_str(), |bucket| {
        daily_label(&bucket.name, labeler)
    })
}

pub fn extract_dimension(
    snapshot: &Snapshot,
    dimension: Dimension,
    labeler: &dyn DateLabeler,
) -> Result<Series> {
    let buckets = snapshot.buckets(dimension);
    match dimension {
        Dimension::Daily => extract_daily_series(buckets, labeler),
        _ => build_series(buckets, dimension.as_str(), |bucket| Ok(bucket.name.clone())),
    }
}

fn build_series<F>(buckets: &[Bucket], collection: &'static str, mut label: F) -> Result<Series>
where
    F: FnMut(&Bucket) -> Result<String>,
{
    if buckets.is_empty() {
        return Err(StatsError::EmptyBucket { collection });
    }

    let mut series = Series {
        labels: Vec::with_capacity(buckets.len()),
        values: Vec::with_capacity(buckets.len()),
    };

    for bucket in buckets {
        series.labels.push(label(bucket)?);
        series.values.push(ns_to_minutes(bucket.duration));
    }

    Ok(series)
}

fn daily_label(key: &str, labeler: &dyn DateLabeler) -> Result<String> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|err| {
        StatsError::MalformedSnapshot(format!("daily bucket '{key}' is not a date: {err}"))
    })?;
    Ok(labeler.label(date))
}
