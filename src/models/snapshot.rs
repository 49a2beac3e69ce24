//! Pre-aggregated focus statistics as produced by the stats server.
//!
//! A snapshot is read once per display and never mutated. Durations are
//! nanoseconds throughout.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Month, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, StatsError};

/// One named accumulation of focus time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub duration: u64,
}

impl Bucket {
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Session counts and tracked time, used for both totals and per-day averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    pub completed: u64,
    pub abandoned: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub start_time: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub duration: u64,
}

/// The bucket collections a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Tags,
    Hourly,
    Weekday,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Tags,
        Dimension::Hourly,
        Dimension::Weekday,
        Dimension::Daily,
        Dimension::Weekly,
        Dimension::Monthly,
        Dimension::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Tags => "tags",
            Dimension::Hourly => "hourly",
            Dimension::Weekday => "weekday",
            Dimension::Daily => "daily",
            Dimension::Weekly => "weekly",
            Dimension::Monthly => "monthly",
            Dimension::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub totals: SessionTally,
    pub averages: SessionTally,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hourly: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub daily: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weekly: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub monthly: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub yearly: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weekday: Vec<Bucket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timeline: Vec<TimelineEntry>,
}

impl Snapshot {
    /// Parse and validate a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let mut seen = HashSet::new();
            for bucket in self.buckets(dimension) {
                if !seen.insert(bucket.name.as_str()) {
                    return Err(StatsError::MalformedSnapshot(format!(
                        "duplicate {} bucket '{}'",
                        dimension.as_str(),
                        bucket.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn buckets(&self, dimension: Dimension) -> &[Bucket] {
        match dimension {
            Dimension::Tags => &self.tags,
            Dimension::Hourly => &self.hourly,
            Dimension::Weekday => &self.weekday,
            Dimension::Daily => &self.daily,
            Dimension::Weekly => &self.weekly,
            Dimension::Monthly => &self.monthly,
            Dimension::Yearly => &self.yearly,
        }
    }

    /// Return a copy with every collection in display order.
    ///
    /// Tags go by descending duration (ties keep their input order); time
    /// buckets go chronologically: weekdays Sunday first, months by
    /// calendar, ISO weeks by natural order.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();

        out.tags.sort_by(|a, b| b.duration.cmp(&a.duration));
        out.hourly.sort_by(|a, b| a.name.cmp(&b.name));
        out.daily.sort_by(|a, b| a.name.cmp(&b.name));
        out.yearly.sort_by(|a, b| a.name.cmp(&b.name));
        out.weekly.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        out.monthly.sort_by_key(|b| month_rank(&b.name));
        out.weekday.sort_by_key(|b| weekday_rank(&b.name));

        out
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Unknown names sort after every known month.
fn month_rank(name: &str) -> u32 {
    if let Ok(number) = name.parse::<u32>() {
        return number;
    }
    name.parse::<Month>()
        .map(|month| month.number_from_month())
        .unwrap_or(u32::MAX)
}

fn weekday_rank(name: &str) -> u32 {
    name.parse::<Weekday>()
        .map(|day| day.num_days_from_sunday())
        .unwrap_or(u32::MAX)
}

/// Compare strings treating runs of ASCII digits as numbers, so
/// `2023-W9` sorts before `2023-W10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let lhs = take_digits(&mut left);
                let rhs = take_digits(&mut right);
                let lhs = lhs.trim_start_matches('0');
                let rhs = rhs.trim_start_matches('0');
                let ord = lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}
