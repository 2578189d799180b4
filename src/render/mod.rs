//! Per-year frame rendering (FrameRenderer).
//!
//! Each frame is drawn from a freshly built SVG scene into a freshly allocated pixmap; nothing
//! mutable survives from one year to the next.

/// World boundary lines loaded from GeoJSON.
pub mod basemap;
/// Scene construction and rasterization.
pub mod frame;
/// Lon/lat to pixel mapping.
pub mod projection;
/// Frame outputs.
pub mod sink;
