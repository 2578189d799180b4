//! Country dataset and the year-by-year merge (MetricAggregator).

/// Dataset joined from capitals and yearly fetches.
pub mod aggregate;
