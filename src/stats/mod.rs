pub mod granularity;
pub mod presets;
pub mod report;
pub mod series;
pub mod summary;

pub use granularity::{select_granularity, span_days, Granularity, GranularityThresholds};
pub use presets::{preset_ranges, DateRange, Preset};
pub use report::{Chart, ChartKind, ChartReport, ReportBuilder};
pub use series::{
    extract_daily_series, extract_dimension, extract_series, ns_to_minutes, DateLabeler, Series,
    ShortMonthDay,
};
pub use summary::{format_duration, title_case, top_tag, RoundingPolicy, Summary, TopTag};
