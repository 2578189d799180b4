//! Run configuration.

use crate::foundation::core::Year;
use crate::foundation::error::{AtlasError, AtlasResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Last year the oracle can be trusted to know about.
pub const KNOWLEDGE_CUTOFF_YEAR: i32 = 2020;

/// The options of one run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RunConfig {
    /// Full country name.
    pub country: String,
    /// First year queried.
    pub first_year: i32,
    /// Last year queried, inclusive; at most [`KNOWLEDGE_CUTOFF_YEAR`].
    pub last_year: i32,
    /// Marker area, in square pixels, of the largest value.
    pub max_marker_size: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            country: "Spain".to_string(),
            first_year: 2010,
            last_year: KNOWLEDGE_CUTOFF_YEAR,
            max_marker_size: 10_000,
        }
    }
}

impl RunConfig {
    /// Parse from a JSON reader; absent fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> AtlasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AtlasError::validation(format!("parse run config JSON: {e}")))
    }

    /// Parse from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AtlasError::validation(format!("open run config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the option ranges.
    pub fn validate(&self) -> AtlasResult<()> {
        if self.country.trim().is_empty() {
            return Err(AtlasError::validation("country must be non-empty"));
        }
        if self.first_year > self.last_year {
            return Err(AtlasError::validation(format!(
                "firstYear {} is after lastYear {}",
                self.first_year, self.last_year
            )));
        }
        if self.last_year > KNOWLEDGE_CUTOFF_YEAR {
            return Err(AtlasError::validation(format!(
                "lastYear {} is past the knowledge cutoff {KNOWLEDGE_CUTOFF_YEAR}",
                self.last_year
            )));
        }
        if self.max_marker_size == 0 {
            return Err(AtlasError::validation("maxMarkerSize must be positive"));
        }
        Ok(())
    }

    /// Years to query, ascending.
    pub fn years(&self) -> impl Iterator<Item = Year> {
        (self.first_year..=self.last_year).map(Year)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
