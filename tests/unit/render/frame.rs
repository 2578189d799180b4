use super::*;
use crate::acquire::capitals::CapitalRecord;

fn cap(state: &str, capital: &str, lon: f64, lat: f64) -> CapitalRecord {
    CapitalRecord {
        state: state.to_string(),
        capital: capital.to_string(),
        coordinate: GeoPoint::new(lon, lat),
    }
}

fn dataset() -> CountryDataset {
    let ds = CountryDataset::new(vec![
        cap("A", "Ay", 0.0, 0.0),
        cap("B", "Bee", 1.0, 1.0),
        cap("C", "Sea & <Shore>", 3.2, 0.5),
    ]);
    let (ds, _) = ds.with_year(Year(2010), &[("B", 50.0)]);
    let (ds, _) = ds.with_year(Year(2011), &[("A", 50.0)]);
    let (ds, _) = ds.with_year(Year(2012), &[("C", 50.0)]);
    ds
}

fn renderer() -> FrameRenderer {
    let style = FrameStyle {
        width: 200,
        height: 200,
        margin: 20.0,
        max_marker_size: 2000.0,
        ..FrameStyle::default()
    };
    FrameRenderer::with_fontdb(
        style,
        Arc::new(Basemap::empty()),
        Arc::new(usvg::fontdb::Database::new()),
    )
}

fn bbox() -> BoundingBox {
    BoundingBox::new(-2.0, -2.0, 3.0, 3.0).unwrap()
}

fn request(ds: &CountryDataset, year: i32) -> FrameRequest<'_> {
    FrameRequest {
        country: "Testland",
        dataset: ds,
        year: Year(year),
        global_max: Some(50.0),
        bbox: bbox(),
    }
}

fn px(img: &RgbaImage, p: Point) -> [u8; 4] {
    img.get_pixel(p.x.round() as u32, p.y.round() as u32).0
}

const RED: [u8; 4] = [255, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn marker_size_is_proportional_to_global_max() {
    let ds = CountryDataset::new(vec![cap("A", "Ay", 0.0, 0.0), cap("B", "Bee", 1.0, 1.0)]);
    let (ds, _) = ds.with_year(Year(2010), &[("A", 100_000.0), ("B", 2_000_000.0)]);

    let markers = markers_for_year(&ds, Year(2010), Some(2_000_000.0), 10_000.0);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].size, 500.0);
    assert_eq!(markers[1].size, 10_000.0);
    assert_eq!(markers[1].size / markers[0].size, 20.0);
    assert!(markers[1].radius() > markers[0].radius());
}

#[test]
fn capitals_without_value_are_not_markers() {
    let ds = dataset();
    let markers = markers_for_year(&ds, Year(2010), Some(50.0), 100.0);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].label, "Bee");
    assert!(markers_for_year(&ds, Year(1999), Some(50.0), 100.0).is_empty());
}

#[test]
fn missing_or_zero_global_max_gives_zero_size() {
    let ds = dataset();
    assert_eq!(markers_for_year(&ds, Year(2010), None, 100.0)[0].size, 0.0);
    assert_eq!(markers_for_year(&ds, Year(2010), Some(0.0), 100.0)[0].size, 0.0);
}

#[test]
fn scene_has_title_marker_and_escaped_label() {
    let ds = dataset();
    let r = renderer();
    let svg = r.scene_svg(&request(&ds, 2012)).unwrap();
    assert!(svg.contains("GDP for the year 2012 of all states in Testland"));
    assert_eq!(svg.matches("<circle").count(), 1);
    assert!(svg.contains("Sea &amp; &lt;Shore&gt;"));
    assert!(svg.contains(r#"clip-path="url(#plot)""#));
}

#[test]
fn scene_includes_basemap_paths() {
    let map = Basemap::from_lines(vec![vec![GeoPoint::new(-1.0, -1.0), GeoPoint::new(2.0, 2.0)]]);
    let r = FrameRenderer::with_fontdb(
        renderer().style().clone(),
        Arc::new(map),
        Arc::new(usvg::fontdb::Database::new()),
    );
    let ds = dataset();
    let svg = r.scene_svg(&request(&ds, 2010)).unwrap();
    assert_eq!(svg.matches("<path").count(), 1);
}

#[test]
fn scene_is_a_complete_svg_document() {
    let map = Basemap::from_lines(vec![vec![
        GeoPoint::new(-1.0, -1.0),
        GeoPoint::new(0.5, 2.0),
        GeoPoint::new(2.0, -1.0),
    ]]);
    let r = FrameRenderer::with_fontdb(
        renderer().style().clone(),
        Arc::new(map),
        Arc::new(usvg::fontdb::Database::new()),
    );
    let ds = dataset();
    let svg = r.scene_svg(&request(&ds, 2010)).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches(" L").count(), 2);
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}

#[test]
fn render_draws_marker_at_capital() {
    let ds = dataset();
    let r = renderer();
    let img = r.render(&request(&ds, 2010)).unwrap();
    assert_eq!(img.dimensions(), (200, 200));

    let proj = r.projection(bbox()).unwrap();
    assert_eq!(px(&img, proj.project(GeoPoint::new(1.0, 1.0))), RED);
    assert_eq!(px(&img, proj.project(GeoPoint::new(0.0, 0.0))), WHITE);
}

#[test]
fn consecutive_frames_do_not_leak_markers() {
    let ds = dataset();
    let r = renderer();
    let proj = r.projection(bbox()).unwrap();
    let a = proj.project(GeoPoint::new(0.0, 0.0));
    let b = proj.project(GeoPoint::new(1.0, 1.0));

    let first = r.render(&request(&ds, 2010)).unwrap();
    let second = r.render(&request(&ds, 2011)).unwrap();
    assert_eq!(px(&first, b), RED);
    assert_eq!(px(&second, b), WHITE);
    assert_eq!(px(&second, a), RED);

    let again = r.render(&request(&ds, 2010)).unwrap();
    assert_eq!(first.as_raw(), again.as_raw());
}

#[test]
fn markers_are_clipped_to_bounding_box() {
    let ds = dataset();
    let r = renderer();
    let img = r.render(&request(&ds, 2012)).unwrap();
    let proj = r.projection(bbox()).unwrap();
    let c = proj.project(GeoPoint::new(3.2, 0.5));
    let edge = proj.viewport().x1;
    assert!(c.x > edge);

    assert_eq!(px(&img, Point::new(edge + 10.0, c.y)), WHITE);
    assert_eq!(px(&img, Point::new(edge - 5.0, c.y)), RED);
}

#[test]
fn render_to_hands_frame_to_sink() {
    let ds = dataset();
    let r = renderer();
    let mut sink = crate::render::sink::InMemorySink::new();
    let frame = r.render_to(&request(&ds, 2011), &mut sink).unwrap();
    assert_eq!(frame.year, Year(2011));
    assert_eq!(sink.years(), &[Year(2011)]);
}

#[test]
fn tiny_canvas_is_render_error() {
    let style = FrameStyle {
        width: 30,
        height: 30,
        margin: 20.0,
        ..FrameStyle::default()
    };
    let r = FrameRenderer::with_fontdb(
        style,
        Arc::new(Basemap::empty()),
        Arc::new(usvg::fontdb::Database::new()),
    );
    let ds = dataset();
    assert!(matches!(
        r.render(&request(&ds, 2010)),
        Err(AtlasError::Render(_))
    ));
}
