/// Convenience result type used across gdp-atlas.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Top-level error taxonomy for a run.
///
/// Every variant here aborts the run. Per-year fetch problems are not errors at this level; they
/// are reported as [`crate::FetchFailure`] and drop exactly one year.
#[derive(thiserror::Error, Debug)]
pub enum AtlasError {
    /// Oracle text violated the grammar expected by a startup query.
    #[error("parse error: {0}")]
    Parse(String),

    /// The oracle could not be reached or returned an unusable reply.
    #[error("oracle error: {0}")]
    Oracle(String),

    /// A frame could not be drawn, rasterized or persisted.
    #[error("render error: {0}")]
    Render(String),

    /// No year produced usable data, so there is nothing to animate.
    #[error("no data: {0}")]
    NoData(String),

    /// Invalid configuration or caller-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AtlasError {
    /// Build a [`AtlasError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`AtlasError::Oracle`] value.
    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    /// Build a [`AtlasError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`AtlasError::NoData`] value.
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    /// Build a [`AtlasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
