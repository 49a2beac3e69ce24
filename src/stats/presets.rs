//! Named calendar ranges offered by the date picker, and the range pair
//! handed back to navigation.
//!
//! Everything here is a pure function of the `today` passed in; the
//! caller owns the clock.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_LOOKBACK_DAYS: u64 = 6;

/// Inclusive pair of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(StatsError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Build a range from `start_time` / `end_time` query values.
    ///
    /// A missing or unparsable start falls back to six days before
    /// `today`; a missing or unparsable end falls back to `today`.
    pub fn from_query(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<Self> {
        let start = start
            .and_then(parse_query_date)
            .unwrap_or_else(|| days_before(today, DEFAULT_LOOKBACK_DAYS));
        let end = end.and_then(parse_query_date).unwrap_or(today);

        Self::new(start, end)
    }

    pub fn to_query(&self) -> String {
        format!(
            "start_time={}&end_time={}",
            self.start.format(QUERY_DATE_FORMAT),
            self.end.format(QUERY_DATE_FORMAT)
        )
    }

    /// Calendar days covered, counting both ends.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    Last30Days,
    Last90Days,
    Last180Days,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    Everything,
}

impl Preset {
    /// Picker order.
    pub const ALL: [Preset; 12] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last14Days,
        Preset::Last30Days,
        Preset::Last90Days,
        Preset::Last180Days,
        Preset::ThisMonth,
        Preset::LastMonth,
        Preset::ThisYear,
        Preset::LastYear,
        Preset::Everything,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::Last7Days => "Last 7 days",
            Preset::Last14Days => "Last 14 days",
            Preset::Last30Days => "Last 30 days",
            Preset::Last90Days => "Last 90 days",
            Preset::Last180Days => "Last 180 days",
            Preset::ThisMonth => "This month",
            Preset::LastMonth => "Last month",
            Preset::ThisYear => "This year",
            Preset::LastYear => "Last year",
            Preset::Everything => "Everything",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn range(&self, today: NaiveDate) -> DateRange {
        let (start, end) = match self {
            Preset::Today => (today, today),
            Preset::Yesterday => {
                let yesterday = days_before(today, 1);
                (yesterday, yesterday)
            }
            Preset::Last7Days => (days_before(today, 6), today),
            Preset::Last14Days => (days_before(today, 13), today),
            Preset::Last30Days => (days_before(today, 29), today),
            Preset::Last90Days => (days_before(today, 89), today),
            Preset::Last180Days => (days_before(today, 179), today),
            Preset::ThisMonth => (month_start(today), month_end(today)),
            Preset::LastMonth => {
                let end = month_start(today).pred_opt().unwrap_or(today);
                (month_start(end), end)
            }
            Preset::ThisYear => year_bounds(today.year(), today),
            Preset::LastYear => year_bounds(today.year() - 1, today),
            Preset::Everything => (everything_start().min(today), today),
        };

        DateRange { start, end }
    }
}

/// Every preset with its range, in picker order.
pub fn preset_ranges(today: NaiveDate) -> Vec<(Preset, DateRange)> {
    Preset::ALL
        .into_iter()
        .map(|preset| (preset, preset.range(today)))
        .collect()
}

/// Lower bound used by the `Everything` preset.
pub fn everything_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1971, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn parse_query_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), QUERY_DATE_FORMAT).ok()
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };

    next_month
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

fn year_bounds(year: i32, fallback: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(fallback);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(fallback);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range_of(today: NaiveDate, preset: Preset) -> (NaiveDate, NaiveDate) {
        let range = preset.range(today);
        (range.start(), range.end())
    }

    #[test]
    fn rolling_windows_end_today() {
        let today = date(2023, 9, 8);

        assert_eq!(range_of(today, Preset::Today), (today, today));
        assert_eq!(
            range_of(today, Preset::Yesterday),
            (date(2023, 9, 7), date(2023, 9, 7))
        );
        assert_eq!(range_of(today, Preset::Last7Days), (date(2023, 9, 2), today));
        assert_eq!(range_of(today, Preset::Last14Days), (date(2023, 8, 26), today));
        assert_eq!(range_of(today, Preset::Last30Days), (date(2023, 8, 10), today));
        assert_eq!(range_of(today, Preset::Last90Days), (date(2023, 6, 11), today));
        assert_eq!(range_of(today, Preset::Last180Days), (date(2023, 3, 13), today));
        assert_eq!(Preset::Last30Days.range(today).span_days(), 30);
    }

    #[test]
    fn calendar_presets_cover_whole_periods() {
        let today = date(2024, 3, 15);

        assert_eq!(
            range_of(today, Preset::ThisMonth),
            (date(2024, 3, 1), date(2024, 3, 31))
        );
        assert_eq!(
            range_of(today, Preset::LastMonth),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            range_of(today, Preset::ThisYear),
            (date(2024, 1, 1), date(2024, 12, 31))
        );
        assert_eq!(
            range_of(today, Preset::LastYear),
            (date(2023, 1, 1), date(2023, 12, 31))
        );
        assert_eq!(range_of(today, Preset::Everything), (date(1971, 1, 1), today));
    }

    #[test]
    fn last_month_wraps_the_year() {
        let today = date(2024, 1, 10);
        assert_eq!(
            range_of(today, Preset::LastMonth),
            (date(2023, 12, 1), date(2023, 12, 31))
        );
        assert_eq!(
            range_of(date(2023, 12, 5), Preset::ThisMonth),
            (date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn preset_ranges_keep_picker_order() {
        let ranges = preset_ranges(date(2023, 9, 8));
        let names: Vec<&str> = ranges.iter().map(|(preset, _)| preset.name()).collect();

        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "Today");
        assert_eq!(names[2], "Last 7 days");
        assert_eq!(names[11], "Everything");
        assert!(ranges.iter().all(|(_, range)| range.start() <= range.end()));
    }

    #[test]
    fn from_name_round_trips_display_names() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("last 7 DAYS"), Some(Preset::Last7Days));
        assert_eq!(Preset::from_name("Fortnight"), None);
    }

    #[test]
    fn query_string_uses_iso_dates() {
        let range = DateRange::new(date(2023, 8, 25), date(2023, 9, 8)).unwrap();
        assert_eq!(range.to_query(), "start_time=2023-08-25&end_time=2023-09-08");
    }

    #[test]
    fn from_query_applies_defaults() {
        let today = date(2023, 9, 8);

        let range = DateRange::from_query(None, None, today).unwrap();
        assert_eq!((range.start(), range.end()), (date(2023, 9, 2), today));

        let range = DateRange::from_query(Some("2023-01-01"), Some("bogus"), today).unwrap();
        assert_eq!((range.start(), range.end()), (date(2023, 1, 1), today));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let today = date(2023, 9, 8);

        assert!(matches!(
            DateRange::new(today, date(2023, 9, 7)),
            Err(StatsError::InvalidRange { .. })
        ));
        assert!(matches!(
            DateRange::from_query(Some("2023-10-01"), Some("2023-09-01"), today),
            Err(StatsError::InvalidRange { .. })
        ));
    }
}
