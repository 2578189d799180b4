//! gdp-atlas builds a multi-year GDP dataset for a country's regions from a natural-language
//! oracle and renders it as a looping animated map.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: bounding box and capital registry, once per run (fatal on malformed replies)
//! 2. **Aggregate**: one oracle query per year, ascending; a bad year is dropped, never retried
//! 3. **Render**: one frame per year with data, marker area proportional to GDP / global maximum
//! 4. **Compose**: frames in ascending year order into an infinitely looping GIF
//!
//! Oracle replies are untrusted free text. Every parser in [`acquire`] checks the reply's
//! shape, never its facts.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Oracle reply parsing for each query kind.
pub mod acquire;
pub mod artifacts;
pub mod compose;
pub mod config;
pub mod dataset;
pub mod oracle;
pub mod pipeline;
pub mod render;

pub use crate::foundation::core::{
    Affine, BBOX_MARGIN_DEG, BoundingBox, GeoPoint, Point, Rect, Year,
};
pub use crate::foundation::error::{AtlasError, AtlasResult};

pub use crate::acquire::bbox::{parse_bounding_box, resolve_bounding_box};
pub use crate::acquire::capitals::{CapitalRecord, parse_capitals, resolve_capitals};
pub use crate::acquire::metrics::{
    FetchFailure, MetricRecord, YearFetch, fetch_year, parse_year_reply,
};
pub use crate::artifacts::RunDirectory;
pub use crate::compose::gif::{AnimationOpts, compose_gif, write_gif};
pub use crate::config::{KNOWLEDGE_CUTOFF_YEAR, RunConfig};
pub use crate::dataset::aggregate::{
    AggregateSummary, CountryDataset, DatasetRow, MergeOutcome, MetricAggregator,
};
pub use crate::oracle::Oracle;
pub use crate::oracle::config::OracleConfig;
pub use crate::oracle::openai::OpenAiOracle;
pub use crate::oracle::scripted::ScriptedOracle;
pub use crate::pipeline::{RunReport, run};
pub use crate::render::basemap::Basemap;
pub use crate::render::frame::{FrameRenderer, FrameRequest, FrameStyle, Marker};
pub use crate::render::sink::{DirectorySink, Frame, FrameSink, InMemorySink};
