pub mod snapshot;

pub use snapshot::{Bucket, Dimension, SessionTally, Snapshot, TimelineEntry};
