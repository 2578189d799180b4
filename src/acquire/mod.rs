//! Oracle response acquisition: query, then parse the free text into typed records.
//!
//! Startup queries ([`bbox`], [`capitals`]) fail hard with [`crate::AtlasError::Parse`]. The
//! per-year query ([`metrics`]) never fails past its own boundary.

/// CoordinateResolver: country bounding box.
pub mod bbox;
/// CapitalRegistry: regions, capitals and their coordinates.
pub mod capitals;
/// Line grammar shared by every oracle parser.
pub mod grammar;
/// YearlyMetricFetcher: one year of per-region GDP.
pub mod metrics;
