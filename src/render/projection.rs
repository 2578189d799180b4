use crate::foundation::core::{Affine, BoundingBox, GeoPoint, Point, Rect};
use crate::foundation::error::{AtlasError, AtlasResult};

/// Equirectangular mapping of a bounding box onto a pixel rectangle.
///
/// The scale is uniform (one degree of longitude and latitude map to the same pixel length) and the
/// box is centered in the plot rectangle. Pixel `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    viewport: Rect,
    xform: Affine,
    px_per_deg: f64,
}

impl MapProjection {
    /// Fit `bbox` into `plot` (pixel space).
    pub fn fit(bbox: BoundingBox, plot: Rect) -> AtlasResult<Self> {
        if plot.width() <= 0.0 || plot.height() <= 0.0 {
            return Err(AtlasError::render("plot area must be non-empty"));
        }
        let px_per_deg = (plot.width() / bbox.width()).min(plot.height() / bbox.height());
        let center = bbox.to_rect().center();

        let xform = Affine::translate(plot.center().to_vec2())
            * Affine::scale_non_uniform(px_per_deg, -px_per_deg)
            * Affine::translate(-center.to_vec2());

        let viewport = Rect::from_center_size(
            plot.center(),
            (bbox.width() * px_per_deg, bbox.height() * px_per_deg),
        );

        Ok(Self {
            viewport,
            xform,
            px_per_deg,
        })
    }

    /// Pixel position of `p`.
    pub fn project(&self, p: GeoPoint) -> Point {
        self.xform * p.to_point()
    }

    /// Pixel rectangle covered by the bounding box (the clip region).
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Pixels per degree.
    pub fn px_per_deg(&self) -> f64 {
        self.px_per_deg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod tests;
