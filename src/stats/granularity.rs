use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::models::Dimension;

const SECONDS_PER_DAY: i64 = 86_400;

/// Time resolution of the main chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Granularity::Daily => Dimension::Daily,
            Granularity::Weekly => Dimension::Weekly,
            Granularity::Monthly => Dimension::Monthly,
            Granularity::Yearly => Dimension::Yearly,
        }
    }
}

/// Upper bounds (inclusive, in whole days) for each granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GranularityThresholds {
    /// Spans up to this many days are charted per day
    pub daily_max_days: i64,
    /// Spans up to this many days are charted per ISO week
    pub weekly_max_days: i64,
    /// Spans up to this many days are charted per month; longer ones per year
    pub monthly_max_days: i64,
}

impl Default for GranularityThresholds {
    fn default() -> Self {
        Self {
            daily_max_days: 45,
            weekly_max_days: 90,
            monthly_max_days: 366,
        }
    }
}

impl GranularityThresholds {
    pub fn select(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Granularity> {
        let days = span_days(start, end)?;

        let granularity = if days <= self.daily_max_days {
            Granularity::Daily
        } else if days <= self.weekly_max_days {
            Granularity::Weekly
        } else if days <= self.monthly_max_days {
            Granularity::Monthly
        } else {
            Granularity::Yearly
        };

        Ok(granularity)
    }

    pub fn is_ordered(&self) -> bool {
        0 <= self.daily_max_days
            && self.daily_max_days < self.weekly_max_days
            && self.weekly_max_days < self.monthly_max_days
    }
}

/// Whole days elapsed between `start` and `end`, truncated.
pub fn span_days(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<i64> {
    if end < start {
        return Err(StatsError::invalid_range(
            start.to_rfc3339(),
            end.to_rfc3339(),
        ));
    }
    Ok((end - start).num_seconds() / SECONDS_PER_DAY)
}

/// Pick the main-chart granularity using the default thresholds.
pub fn select_granularity(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> Result<Granularity> {
    GranularityThresholds::default().select(start, end)
}
