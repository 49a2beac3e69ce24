const ENABLE_LOGS: bool = true;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Dimension, Snapshot};
use crate::stats::granularity::{Granularity, GranularityThresholds};
use crate::stats::series::{extract_dimension, DateLabeler, Series, ShortMonthDay};
use crate::stats::summary::{title_case, RoundingPolicy, Summary};
use crate::{log_debug, log_info};

/// Rendering hint for a chart; the renderer maps it to its own types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Area,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    #[serde(flatten)]
    pub series: Series,
}

/// Everything a renderer needs for one stats page.
///
/// A chart is `None` when its collection has no buckets; the renderer
/// should hide that panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartReport {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub granularity: Granularity,
    pub summary: Summary,
    pub main: Option<Chart>,
    pub weekday: Option<Chart>,
    pub hourly: Option<Chart>,
    pub tags: Option<Chart>,
}

pub struct ReportBuilder<'a> {
    thresholds: GranularityThresholds,
    rounding: RoundingPolicy,
    labeler: &'a dyn DateLabeler,
}

impl Default for ReportBuilder<'_> {
    fn default() -> Self {
        Self {
            thresholds: GranularityThresholds::default(),
            rounding: RoundingPolicy::default(),
            labeler: &ShortMonthDay,
        }
    }
}

impl<'a> ReportBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(mut self, thresholds: GranularityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn labeler(mut self, labeler: &'a dyn DateLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    pub fn build(&self, snapshot: &Snapshot) -> Result<ChartReport> {
        let granularity = self
            .thresholds
            .select(snapshot.start_time, snapshot.end_time)?;
        log_debug!(
            "Selected {} granularity for {} .. {}",
            granularity.as_str(),
            snapshot.start_time,
            snapshot.end_time
        );

        let main_title = format!("{} totals", title_case(granularity.as_str()));

        Ok(ChartReport {
            start_time: snapshot.start_time,
            end_time: snapshot.end_time,
            granularity,
            summary: Summary::from_snapshot(snapshot, self.rounding),
            main: self.chart(snapshot, granularity.dimension(), main_title, ChartKind::Bar)?,
            weekday: self.chart(
                snapshot,
                Dimension::Weekday,
                "Weekday totals".into(),
                ChartKind::Bar,
            )?,
            hourly: self.chart(
                snapshot,
                Dimension::Hourly,
                "Hourly totals".into(),
                ChartKind::Area,
            )?,
            tags: self.chart(snapshot, Dimension::Tags, "Tags".into(), ChartKind::Pie)?,
        })
    }

    fn chart(
        &self,
        snapshot: &Snapshot,
        dimension: Dimension,
        title: String,
        kind: ChartKind,
    ) -> Result<Option<Chart>> {
        match extract_dimension(snapshot, dimension, self.labeler) {
            Ok(series) => Ok(Some(Chart {
                title,
                kind,
                series,
            })),
            Err(err) if err.is_empty_bucket() => {
                log_info!("Hiding {} chart: {}", dimension.as_str(), err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
