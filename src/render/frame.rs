use crate::dataset::aggregate::CountryDataset;
use crate::foundation::core::{BoundingBox, GeoPoint, Point, Rect, Year};
use crate::foundation::error::{AtlasError, AtlasResult};
use crate::render::basemap::Basemap;
use crate::render::projection::MapProjection;
use crate::render::sink::{Frame, FrameSink};
use image::RgbaImage;
use std::sync::Arc;

/// Label offset east of the marker, in degrees of longitude.
pub const LABEL_OFFSET_DEG: f64 = 0.05;

/// Visual parameters of every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Marker area, in square pixels, of the region holding the global maximum.
    pub max_marker_size: f64,
    /// Space reserved around the map, in pixels (the title sits in the top margin).
    pub margin: f64,
    /// Page background.
    pub background: &'static str,
    /// Basemap stroke color.
    pub boundary_color: &'static str,
    /// Marker fill color.
    pub marker_color: &'static str,
    /// Label and title color.
    pub text_color: &'static str,
    /// Label font size in pixels.
    pub label_size: f64,
    /// Title font size in pixels.
    pub title_size: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            max_marker_size: 10_000.0,
            margin: 60.0,
            background: "#ffffff",
            boundary_color: "#1f77b4",
            marker_color: "#ff0000",
            text_color: "#000000",
            label_size: 12.0,
            title_size: 16.0,
        }
    }
}

/// A capital drawn on one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Capital name, used as label.
    pub label: String,
    /// Capital location.
    pub at: GeoPoint,
    /// GDP value for the frame's year.
    pub value: f64,
    /// Marker area in square pixels.
    pub size: f64,
}

impl Marker {
    /// Circle radius for the marker area.
    pub fn radius(&self) -> f64 {
        (self.size / std::f64::consts::PI).sqrt()
    }
}

/// Everything needed to draw one year.
#[derive(Clone, Copy, Debug)]
pub struct FrameRequest<'a> {
    /// Country name for the title.
    pub country: &'a str,
    /// Aggregated dataset.
    pub dataset: &'a CountryDataset,
    /// Year to draw; must be a year with data.
    pub year: Year,
    /// Global maximum over all years, denominator of marker sizes.
    pub global_max: Option<f64>,
    /// Map extent.
    pub bbox: BoundingBox,
}

/// Markers for `year`: one per capital that has a value, sized `max_marker_size * value / max`.
///
/// Capitals without a value for `year` are left out rather than drawn with size zero.
pub fn markers_for_year(
    dataset: &CountryDataset,
    year: Year,
    global_max: Option<f64>,
    max_marker_size: f64,
) -> Vec<Marker> {
    dataset
        .points_for_year(year)
        .into_iter()
        .map(|(cap, value)| Marker {
            label: cap.capital.clone(),
            at: cap.coordinate,
            value,
            size: match global_max {
                Some(max) if max > 0.0 => max_marker_size * value / max,
                _ => 0.0,
            },
        })
        .collect()
}

/// Frame title for `year`.
pub fn frame_title(country: &str, year: Year) -> String {
    format!("GDP for the year {year} of all states in {country}, represented by state capitals")
}

/// Draws frames. Holds only read-only inputs, so frames never share mutable state.
pub struct FrameRenderer {
    style: FrameStyle,
    basemap: Arc<Basemap>,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl FrameRenderer {
    /// Create a renderer using the system fonts.
    pub fn new(style: FrameStyle, basemap: Arc<Basemap>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "font database loaded");
        Self::with_fontdb(style, basemap, Arc::new(db))
    }

    /// Create a renderer with an explicit font database.
    pub fn with_fontdb(
        style: FrameStyle,
        basemap: Arc<Basemap>,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> Self {
        Self {
            style,
            basemap,
            fontdb,
        }
    }

    /// Frame style in use.
    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Projection used for `bbox` with this renderer's layout.
    pub fn projection(&self, bbox: BoundingBox) -> AtlasResult<MapProjection> {
        let m = self.style.margin;
        let w = f64::from(self.style.width);
        let h = f64::from(self.style.height);
        if w <= 2.0 * m || h <= 2.0 * m {
            return Err(AtlasError::render(format!(
                "canvas {w}x{h} too small for margin {m}"
            )));
        }
        MapProjection::fit(bbox, Rect::new(m, m, w - m, h - m))
    }

    /// Build the SVG document for one frame.
    pub fn scene_svg(&self, req: &FrameRequest<'_>) -> AtlasResult<String> {
        let style = &self.style;
        let proj = self.projection(req.bbox)?;
        let clip = proj.viewport();
        let mut markers =
            markers_for_year(req.dataset, req.year, req.global_max, style.max_marker_size);
        // Larger markers first so small ones stay visible on top.
        markers.sort_by(|a, b| b.size.total_cmp(&a.size));

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = style.width,
            h = style.height,
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            style.width, style.height, style.background
        ));
        svg.push_str(&format!(
            r#"<defs><clipPath id="plot"><rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}"/></clipPath></defs>"#,
            clip.x0,
            clip.y0,
            clip.width(),
            clip.height()
        ));
        svg.push_str(r#"<g clip-path="url(#plot)">"#);

        for line in self.basemap.lines_touching(&req.bbox) {
            let mut d = String::new();
            for (i, p) in line.iter().enumerate() {
                let Point { x, y } = proj.project(*p);
                d.push_str(&format!("{}{x:.2} {y:.2}", if i == 0 { "M" } else { " L" }));
            }
            svg.push_str(&format!(
                r#"<path d="{d}" fill="none" stroke="{}" stroke-width="1"/>"#,
                style.boundary_color
            ));
        }

        for m in markers.iter().filter(|m| m.size > 0.0) {
            let c = proj.project(m.at);
            svg.push_str(&format!(
                r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}"/>"#,
                c.x,
                c.y,
                m.radius(),
                style.marker_color
            ));
        }

        for m in &markers {
            let at = proj.project(GeoPoint::new(m.at.lon + LABEL_OFFSET_DEG, m.at.lat));
            svg.push_str(&format!(
                r#"<text x="{:.3}" y="{:.3}" font-family="sans-serif" font-size="{}" fill="{}" text-anchor="start" dominant-baseline="middle">{}</text>"#,
                at.x,
                at.y,
                style.label_size,
                style.text_color,
                xml_escape(&m.label)
            ));
        }
        svg.push_str("</g>");

        svg.push_str(&format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="none" stroke="{}" stroke-width="1"/>"#,
            clip.x0,
            clip.y0,
            clip.width(),
            clip.height(),
            style.text_color
        ));
        svg.push_str(&format!(
            r#"<text x="{:.3}" y="{:.3}" font-family="sans-serif" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
            f64::from(style.width) / 2.0,
            style.margin / 2.0,
            style.title_size,
            style.text_color,
            xml_escape(&frame_title(req.country, req.year))
        ));
        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Rasterize one frame into a new image.
    ///
    /// Every call parses a new scene tree and allocates a new pixmap.
    #[tracing::instrument(skip(self, req), fields(year = req.year.0))]
    pub fn render(&self, req: &FrameRequest<'_>) -> AtlasResult<RgbaImage> {
        let svg = self.scene_svg(req)?;
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| AtlasError::render(format!("build scene for {}: {e}", req.year)))?;

        let (w, h) = (self.style.width, self.style.height);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| AtlasError::render(format!("allocate {w}x{h} pixmap")))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(w, h, data)
            .ok_or_else(|| AtlasError::render("pixmap size does not match frame size"))
    }

    /// Render one frame and hand it to `sink`.
    pub fn render_to(
        &self,
        req: &FrameRequest<'_>,
        sink: &mut dyn FrameSink,
    ) -> AtlasResult<Frame> {
        let image = self.render(req)?;
        sink.accept(req.year, image)
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
