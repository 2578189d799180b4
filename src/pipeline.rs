//! Phase orchestration: acquire, aggregate, render, compose.
//!
//! Strictly sequential. Startup and render errors abort the run; per-year fetch failures only
//! drop their year.

use crate::acquire::bbox::resolve_bounding_box;
use crate::acquire::capitals::resolve_capitals;
use crate::acquire::metrics::{FetchFailure, YearFetch, fetch_year};
use crate::artifacts::RunDirectory;
use crate::compose::gif::{AnimationOpts, write_gif};
use crate::config::RunConfig;
use crate::dataset::aggregate::{AggregateSummary, CountryDataset, MetricAggregator};
use crate::foundation::core::{BoundingBox, Year};
use crate::foundation::error::{AtlasError, AtlasResult};
use crate::oracle::Oracle;
use crate::render::frame::{FrameRenderer, FrameRequest, FrameStyle};
use crate::render::sink::{DirectorySink, Frame, FrameSink};
use std::path::PathBuf;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Run directory holding every artifact.
    pub run_dir: PathBuf,
    /// Resolved map extent.
    pub bbox: BoundingBox,
    /// Number of regions in the capital registry.
    pub regions: usize,
    /// Years that produced data, ascending.
    pub years_with_data: Vec<Year>,
    /// Years that were dropped, with the reason.
    pub failed_years: Vec<(Year, FetchFailure)>,
    /// Denominator used for marker sizes.
    pub global_max: Option<f64>,
    /// Frame files, in animation order.
    pub frames: Vec<PathBuf>,
    /// The looping animation.
    pub animation: PathBuf,
}

/// Frame style for `config` (marker scale taken from the config).
pub fn frame_style(config: &RunConfig) -> FrameStyle {
    FrameStyle {
        max_marker_size: f64::from(config.max_marker_size),
        ..FrameStyle::default()
    }
}

/// Fetch every configured year in ascending order and merge the results.
///
/// Returns the aggregate and the dropped years.
pub fn aggregate_years(
    oracle: &dyn Oracle,
    config: &RunConfig,
    dataset: CountryDataset,
) -> AtlasResult<(AggregateSummary, Vec<(Year, FetchFailure)>)> {
    let mut agg = MetricAggregator::new(dataset);
    let mut failed = Vec::new();

    for year in config.years() {
        let fetch = fetch_year(oracle, &config.country, year);
        match agg.merge(&fetch)? {
            Some(outcome) => tracing::info!(
                year = year.0,
                joined = outcome.joined,
                dropped = outcome.dropped.len(),
                "year succeeded"
            ),
            None => tracing::info!(year = year.0, "year failed"),
        }
        if let YearFetch::Failed { failure, .. } = fetch {
            failed.push((year, failure));
        }
    }

    Ok((agg.finish(), failed))
}

/// Render one frame per year with data, in ascending year order.
///
/// The first render error aborts.
pub fn render_frames(
    renderer: &FrameRenderer,
    country: &str,
    bbox: BoundingBox,
    summary: &AggregateSummary,
    sink: &mut dyn FrameSink,
) -> AtlasResult<Vec<Frame>> {
    if summary.years_with_data.is_empty() {
        return Err(AtlasError::no_data("no year produced usable data"));
    }

    let mut frames = Vec::with_capacity(summary.years_with_data.len());
    for &year in &summary.years_with_data {
        let req = FrameRequest {
            country,
            dataset: &summary.dataset,
            year,
            global_max: summary.global_max,
            bbox,
        };
        frames.push(renderer.render_to(&req, &mut *sink)?);
    }
    Ok(frames)
}

/// Run every phase, persisting artifacts into `run_dir`.
#[tracing::instrument(skip_all, fields(country = %config.country))]
pub fn run(
    config: &RunConfig,
    oracle: &dyn Oracle,
    renderer: &FrameRenderer,
    run_dir: &RunDirectory,
) -> AtlasResult<RunReport> {
    config.validate()?;

    let bbox = resolve_bounding_box(oracle, &config.country)?;
    run_dir.write_bounding_box(&bbox)?;

    let capitals = resolve_capitals(oracle, &config.country)?;
    let regions = capitals.len();
    let dataset = CountryDataset::new(capitals);
    run_dir.write_dataset(&dataset, &[])?;

    let (summary, failed_years) = aggregate_years(oracle, config, dataset)?;
    run_dir.write_dataset(&summary.dataset, &summary.years_with_data)?;
    run_dir.write_global_max(summary.global_max)?;
    tracing::info!(
        years = summary.years_with_data.len(),
        failed = failed_years.len(),
        global_max = ?summary.global_max,
        "aggregation finished"
    );

    let mut sink = DirectorySink::new(run_dir.path());
    let frames = render_frames(renderer, &config.country, bbox, &summary, &mut sink)?;

    let animation = run_dir.animation_path(&config.country);
    write_gif(&frames, &animation, AnimationOpts::default())?;

    Ok(RunReport {
        run_dir: run_dir.path().to_path_buf(),
        bbox,
        regions,
        years_with_data: summary.years_with_data,
        failed_years,
        global_max: summary.global_max,
        frames: frames.into_iter().filter_map(|f| f.path).collect(),
        animation,
    })
}
