use crate::foundation::error::{AtlasError, AtlasResult};

pub use kurbo::{Affine, Point, Rect};

/// Safety margin, in degrees, added on every side of the oracle's raw bounding box.
pub const BBOX_MARGIN_DEG: f64 = 1.0;

/// Calendar year of a metric column.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Year(pub i32);

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Longitude, east positive.
    pub lon: f64,
    /// Latitude, north positive.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Return the point as a kurbo point with `x = lon`, `y = lat`.
    pub fn to_point(self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// Geographic rectangle used to clip and zoom every frame to the target country.
///
/// Invariant: `min_lon < max_lon` and `min_lat < max_lat`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Western edge.
    pub min_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a validated bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> AtlasResult<Self> {
        let all = [min_lon, min_lat, max_lon, max_lat];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(AtlasError::validation("bounding box must be finite"));
        }
        if min_lon >= max_lon || min_lat >= max_lat {
            return Err(AtlasError::validation(format!(
                "bounding box is empty or inverted: lon [{min_lon}, {max_lon}], lat [{min_lat}, {max_lat}]"
            )));
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Expand a raw `(min_lon, min_lat, max_lon, max_lat)` quadruple by [`BBOX_MARGIN_DEG`].
    pub fn with_margin(raw: [f64; 4]) -> AtlasResult<Self> {
        let [min_lon, min_lat, max_lon, max_lat] = raw;
        Self::new(
            min_lon - BBOX_MARGIN_DEG,
            min_lat - BBOX_MARGIN_DEG,
            max_lon + BBOX_MARGIN_DEG,
            max_lat + BBOX_MARGIN_DEG,
        )
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Return `true` when `p` lies inside the box (edges inclusive).
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&p.lon)
            && (self.min_lat..=self.max_lat).contains(&p.lat)
    }

    /// The box as a kurbo rectangle in lon/lat space.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
