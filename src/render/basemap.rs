use crate::foundation::core::{BoundingBox, GeoPoint};
use crate::foundation::error::{AtlasError, AtlasResult};
use anyhow::Context as _;
use std::path::Path;

/// Read-only boundary polylines of the world (or any region), in lon/lat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Basemap {
    lines: Vec<Vec<GeoPoint>>,
}

#[derive(Debug, serde::Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, serde::Deserialize)]
struct GeoJsonFeature {
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, serde::Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl Basemap {
    /// A basemap with no boundaries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from explicit polylines.
    pub fn from_lines(lines: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            lines: lines.into_iter().filter(|l| l.len() >= 2).collect(),
        }
    }

    /// Parse a GeoJSON `FeatureCollection`.
    ///
    /// Polygon rings and line strings become boundary polylines. Points and unknown geometry types
    /// are skipped.
    pub fn from_geojson_str(text: &str) -> AtlasResult<Self> {
        let fc: GeoJsonFeatureCollection = serde_json::from_str(text)
            .map_err(|e| AtlasError::validation(format!("parse basemap GeoJSON: {e}")))?;

        let mut lines = Vec::new();
        for geom in fc.features.into_iter().filter_map(|f| f.geometry) {
            let c = &geom.coordinates;
            match geom.ty.as_str() {
                "LineString" => lines.extend(line(c)),
                "MultiLineString" | "Polygon" => lines.extend(lines_of(c)),
                "MultiPolygon" => {
                    for poly in c.as_array().into_iter().flatten() {
                        lines.extend(lines_of(poly));
                    }
                }
                _ => {}
            }
        }
        Ok(Self::from_lines(lines))
    }

    /// Load a GeoJSON file.
    pub fn from_path(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read basemap '{}'", path.display()))?;
        let map = Self::from_geojson_str(&text)?;
        tracing::info!(lines = map.lines.len(), path = %path.display(), "basemap loaded");
        Ok(map)
    }

    /// All boundary polylines.
    pub fn lines(&self) -> &[Vec<GeoPoint>] {
        &self.lines
    }

    /// Polylines whose extent overlaps `bbox`; the rest cannot be visible.
    pub fn lines_touching<'a>(
        &'a self,
        bbox: &'a BoundingBox,
    ) -> impl Iterator<Item = &'a [GeoPoint]> + 'a {
        self.lines
            .iter()
            .filter(move |l| polyline_overlaps(l, bbox))
            .map(Vec::as_slice)
    }
}

fn polyline_overlaps(line: &[GeoPoint], bbox: &BoundingBox) -> bool {
    let (mut min_lon, mut min_lat) = (f64::INFINITY, f64::INFINITY);
    let (mut max_lon, mut max_lat) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in line {
        min_lon = min_lon.min(p.lon);
        min_lat = min_lat.min(p.lat);
        max_lon = max_lon.max(p.lon);
        max_lat = max_lat.max(p.lat);
    }
    min_lon <= bbox.max_lon
        && max_lon >= bbox.min_lon
        && min_lat <= bbox.max_lat
        && max_lat >= bbox.min_lat
}

fn lines_of(v: &serde_json::Value) -> Vec<Vec<GeoPoint>> {
    v.as_array()
        .into_iter()
        .flatten()
        .filter_map(line)
        .collect()
}

fn line(v: &serde_json::Value) -> Option<Vec<GeoPoint>> {
    let pts: Vec<GeoPoint> = v
        .as_array()?
        .iter()
        .filter_map(|pos| {
            let pos = pos.as_array()?;
            let lon = pos.first()?.as_f64()?;
            let lat = pos.get(1)?.as_f64()?;
            Some(GeoPoint::new(lon, lat))
        })
        .collect();
    (pts.len() >= 2).then_some(pts)
}

#[cfg(test)]
#[path = "../../tests/unit/render/basemap.rs"]
mod tests;
