use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::models::Snapshot;
use crate::stats::series::{ns_to_minutes, NANOS_PER_MINUTE};

/// How the headline total converts nanoseconds to minutes.
///
/// Per-bucket values always floor; `Floor` keeps the headline consistent
/// with the sum of the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    #[default]
    Floor,
    Ceil,
}

impl RoundingPolicy {
    pub fn to_minutes(self, nanos: u64) -> u64 {
        match self {
            RoundingPolicy::Floor => ns_to_minutes(nanos),
            RoundingPolicy::Ceil => nanos.div_ceil(NANOS_PER_MINUTE),
        }
    }
}

/// `"{h}h"`, or `"{h}h {m}m"` when there is a minutes remainder.
pub fn format_duration(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}m")
    }
}

pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTag {
    pub name: String,
    pub minutes: u64,
    pub formatted_duration: String,
}

/// The leading tag. Relies on `tags` being sorted by descending duration.
pub fn top_tag(snapshot: &Snapshot) -> Result<TopTag> {
    let first = snapshot.tags.first().ok_or(StatsError::EmptyBucket {
        collection: "tags",
    })?;
    let minutes = ns_to_minutes(first.duration);

    Ok(TopTag {
        name: first.name.clone(),
        minutes,
        formatted_duration: format_duration(minutes),
    })
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_minutes: u64,
    pub total_time: String,
    pub top_tag: Option<TopTag>,
    pub completed: u64,
    pub abandoned: u64,
    pub avg_time: String,
    pub avg_completed: u64,
    pub avg_abandoned: u64,
}

impl Summary {
    pub fn from_snapshot(snapshot: &Snapshot, rounding: RoundingPolicy) -> Self {
        let total_minutes = rounding.to_minutes(snapshot.totals.duration);

        Self {
            total_minutes,
            total_time: format_duration(total_minutes),
            top_tag: top_tag(snapshot).ok(),
            completed: snapshot.totals.completed,
            abandoned: snapshot.totals.abandoned,
            avg_time: format_duration(rounding.to_minutes(snapshot.averages.duration)),
            avg_completed: snapshot.averages.completed,
            avg_abandoned: snapshot.averages.abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, SessionTally};
    use chrono::DateTime;

    fn snapshot_with(tags: Vec<Bucket>, total_nanos: u64) -> Snapshot {
        Snapshot {
            start_time: DateTime::parse_from_rfc3339("2022-08-25T00:00:00+01:00").unwrap(),
            end_time: DateTime::parse_from_rfc3339("2023-09-08T23:59:59+02:00").unwrap(),
            totals: SessionTally {
                completed: 810,
                abandoned: 82,
                duration: total_nanos,
            },
            averages: SessionTally {
                completed: 2,
                abandoned: 0,
                duration: 6_540_000_000_000,
            },
            tags,
            hourly: Vec::new(),
            daily: Vec::new(),
            weekly: Vec::new(),
            monthly: Vec::new(),
            yearly: Vec::new(),
            weekday: Vec::new(),
            timeline: Vec::new(),
        }
    }

    #[test]
    fn format_duration_examples() {
        assert_eq!(format_duration(0), "0h");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(40_793), "679h 53m");
    }

    #[test]
    fn format_duration_is_monotonic() {
        let parse = |s: &str| -> u64 {
            let mut total = 0;
            for part in s.split(' ') {
                if let Some(h) = part.strip_suffix('h') {
                    total += h.parse::<u64>().unwrap() * 60;
                } else if let Some(m) = part.strip_suffix('m') {
                    total += m.parse::<u64>().unwrap();
                }
            }
            total
        };

        let mut previous = 0;
        for minutes in 0..500 {
            let current = parse(&format_duration(minutes));
            assert_eq!(current, minutes);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn title_case_examples() {
        assert_eq!(title_case("weekly"), "Weekly");
        assert_eq!(title_case("MONTHLY"), "Monthly");
        assert_eq!(title_case("last  7 DAYS"), "Last  7 Days");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn rounding_policies_differ_only_on_remainders() {
        let nanos = 2_447_581_122_309_040;
        assert_eq!(RoundingPolicy::Floor.to_minutes(nanos), 40_793);
        assert_eq!(RoundingPolicy::Ceil.to_minutes(nanos), 40_794);
        assert_eq!(RoundingPolicy::Ceil.to_minutes(2 * NANOS_PER_MINUTE), 2);
        assert_eq!(RoundingPolicy::Ceil.to_minutes(0), 0);
    }

    #[test]
    fn top_tag_uses_first_bucket() {
        let snapshot = snapshot_with(
            vec![
                Bucket::new("betterstack", 1_336_472_716_672_445),
                Bucket::new("uncategorized", 573_760_380_064_182),
            ],
            0,
        );

        let top = top_tag(&snapshot).unwrap();
        assert_eq!(top.name, "betterstack");
        assert_eq!(top.minutes, 22_274);
        assert_eq!(top.formatted_duration, "371h 14m");
    }

    #[test]
    fn top_tag_without_tags_is_empty_bucket() {
        let snapshot = snapshot_with(Vec::new(), 0);
        assert_eq!(
            top_tag(&snapshot),
            Err(StatsError::EmptyBucket { collection: "tags" })
        );
    }

    #[test]
    fn summary_uses_rounding_policy_for_totals() {
        let snapshot = snapshot_with(vec![Bucket::new("writing", 0)], 2_447_581_122_309_040);

        let floor = Summary::from_snapshot(&snapshot, RoundingPolicy::Floor);
        assert_eq!(floor.total_time, "679h 53m");
        assert_eq!(floor.completed, 810);
        assert_eq!(floor.abandoned, 82);
        assert_eq!(floor.avg_time, "1h 49m");
        assert_eq!(floor.top_tag.map(|t| t.formatted_duration).as_deref(), Some("0h"));

        let ceil = Summary::from_snapshot(&snapshot, RoundingPolicy::Ceil);
        assert_eq!(ceil.total_time, "679h 54m");
    }
}
