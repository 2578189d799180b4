//! Per-run output directory and the text backups written alongside the frames.
//!
//! Backups are written as soon as their data exists, so a run that aborts later still leaves its
//! bounding box and capital table behind for diagnosis.

use crate::dataset::aggregate::CountryDataset;
use crate::foundation::core::{BoundingBox, Year};
use crate::foundation::error::{AtlasError, AtlasResult};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Bounding box backup file name.
pub const BBOX_FILE: &str = "country_coordinates.txt";
/// Capital/metric table file name.
pub const DATASET_FILE: &str = "df_cities_coordinate.csv";
/// Global maximum backup file name.
pub const GLOBAL_MAX_FILE: &str = "max_GDP.txt";

/// A directory owned by exactly one run.
#[derive(Debug, Clone)]
pub struct RunDirectory {
    root: PathBuf,
}

impl RunDirectory {
    /// Create a new directory `{country}_{id}` under `parent`.
    ///
    /// The id is a random UUID and creation fails rather than reuse an existing directory.
    pub fn create_unique(parent: impl AsRef<Path>, country: &str) -> AtlasResult<Self> {
        let parent = parent.as_ref();
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output parent '{}'", parent.display()))?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let root = parent.join(format!("{}_{}", sanitize(country), &id[..8]));
        std::fs::create_dir(&root)
            .with_context(|| format!("create run directory '{}'", root.display()))?;
        tracing::info!(dir = %root.display(), "run directory created");
        Ok(Self { root })
    }

    /// Use an existing directory as-is.
    pub fn open(root: impl Into<PathBuf>) -> AtlasResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AtlasError::validation(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the final animation for `country`.
    pub fn animation_path(&self, country: &str) -> PathBuf {
        self.root.join(format!("animated_{}.gif", sanitize(country)))
    }

    /// Write the bounding box backup.
    pub fn write_bounding_box(&self, bbox: &BoundingBox) -> AtlasResult<PathBuf> {
        let text = format!(
            "min_longitude: {}\nmin_latitude: {}\nmax_longitude: {}\nmax_latitude: {}",
            bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat
        );
        self.write_text(BBOX_FILE, &text)
    }

    /// Write the global maximum backup.
    pub fn write_global_max(&self, global_max: Option<f64>) -> AtlasResult<PathBuf> {
        let value = global_max.map_or_else(|| "none".to_string(), |v| v.to_string());
        self.write_text(GLOBAL_MAX_FILE, &format!("max_GDP: {value}"))
    }

    /// Write the capital table with one `gdp_{year}` column per year in `years`.
    ///
    /// Missing `(state, year)` values are empty cells.
    pub fn write_dataset(&self, dataset: &CountryDataset, years: &[Year]) -> AtlasResult<PathBuf> {
        let path = self.root.join(DATASET_FILE);
        let mut w = csv::Writer::from_path(&path)
            .with_context(|| format!("open '{}'", path.display()))?;

        let mut header = vec![
            "state".to_string(),
            "capital".to_string(),
            "longitude".to_string(),
            "latitude".to_string(),
        ];
        header.extend(years.iter().map(|y| format!("gdp_{y}")));
        w.write_record(&header).context("write csv header")?;

        for row in dataset.rows() {
            let mut rec = vec![
                row.capital.state.clone(),
                row.capital.capital.clone(),
                row.capital.coordinate.lon.to_string(),
                row.capital.coordinate.lat.to_string(),
            ];
            rec.extend(
                years
                    .iter()
                    .map(|y| row.values.get(y).map(f64::to_string).unwrap_or_default()),
            );
            w.write_record(&rec)
                .with_context(|| format!("write csv row '{}'", row.capital.state))?;
        }
        w.flush()
            .with_context(|| format!("flush '{}'", path.display()))?;
        Ok(path)
    }

    fn write_text(&self, name: &str, text: &str) -> AtlasResult<PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, text).with_context(|| format!("write '{}'", path.display()))?;
        Ok(path)
    }
}

fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/artifacts.rs"]
mod tests;
