use crate::foundation::core::Year;
use crate::foundation::error::{AtlasError, AtlasResult};
use anyhow::Context as _;
use image::RgbaImage;
use std::path::PathBuf;

/// One rendered year.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The year this frame shows.
    pub year: Year,
    /// Straight-alpha RGBA pixels.
    pub image: RgbaImage,
    /// Where the frame was persisted, if anywhere.
    pub path: Option<PathBuf>,
}

/// Deterministic file name of the frame for `year`.
pub fn frame_file_name(year: Year) -> String {
    format!("gdp_{year}.png")
}

/// Receives rendered frames and returns the handle used for composition.
pub trait FrameSink {
    /// Take ownership of one year's pixels.
    fn accept(&mut self, year: Year, image: RgbaImage) -> AtlasResult<Frame>;
}

/// Persists each frame as a PNG named by year inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Write frames into `dir`, which must exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FrameSink for DirectorySink {
    fn accept(&mut self, year: Year, image: RgbaImage) -> AtlasResult<Frame> {
        let path = self.dir.join(frame_file_name(year));
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write frame '{}'", path.display()))
            .map_err(|e| AtlasError::render(format!("{e:#}")))?;
        tracing::debug!(path = %path.display(), "frame written");
        Ok(Frame {
            year,
            image,
            path: Some(path),
        })
    }
}

/// Keeps frames in memory; for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    years: Vec<Year>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Years accepted so far, in order.
    pub fn years(&self) -> &[Year] {
        &self.years
    }
}

impl FrameSink for InMemorySink {
    fn accept(&mut self, year: Year, image: RgbaImage) -> AtlasResult<Frame> {
        self.years.push(year);
        Ok(Frame {
            year,
            image,
            path: None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
