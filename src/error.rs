use thiserror::Error;

/// Errors raised by the statistics core.
///
/// The core never swallows a fault: callers get one of these and decide
/// what the user sees. `EmptyBucket` is not fatal; it means "no data" and
/// the dependent chart should simply be hidden.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("no data in {collection}")]
    EmptyBucket { collection: &'static str },

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl StatsError {
    pub fn invalid_range(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn is_empty_bucket(&self) -> bool {
        matches!(self, Self::EmptyBucket { .. })
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSnapshot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
