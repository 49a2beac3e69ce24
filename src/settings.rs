const ENABLE_LOGS: bool = true;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::log_warn;
use crate::stats::{GranularityThresholds, RoundingPolicy};

/// Tunables for report building, read from a JSON file.
///
/// ```json
/// { "thresholds": { "daily_max_days": 31 }, "rounding": "ceil" }
/// ```
/// Omitted keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub thresholds: GranularityThresholds,
    pub rounding: RoundingPolicy,
}

impl ReportSettings {
    /// Load settings from `path`. A missing file yields defaults; a file
    /// that is not valid JSON is ignored with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring unparsable settings in {}: {}",
                    path.display(),
                    err
                );
                Self::default()
            })
        } else {
            Self::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.thresholds.is_ordered() {
            bail!(
                "Invalid granularity thresholds: expected 0 <= daily ({}) < weekly ({}) < monthly ({})",
                self.thresholds.daily_max_days,
                self.thresholds.weekly_max_days,
                self.thresholds.monthly_max_days
            );
        }
        Ok(())
    }
}
