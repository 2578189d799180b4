use super::*;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn corners_map_to_viewport_corners() {
    let bbox = BoundingBox::new(-1.0, -1.0, 2.0, 2.0).unwrap();
    let proj = MapProjection::fit(bbox, Rect::new(0.0, 0.0, 300.0, 300.0)).unwrap();
    assert!(close(proj.project(GeoPoint::new(-1.0, 2.0)), Point::new(0.0, 0.0)));
    assert!(close(proj.project(GeoPoint::new(2.0, -1.0)), Point::new(300.0, 300.0)));
    assert_eq!(proj.px_per_deg(), 100.0);
}

#[test]
fn wide_box_is_letterboxed_vertically() {
    let bbox = BoundingBox::new(0.0, 0.0, 4.0, 1.0).unwrap();
    let proj = MapProjection::fit(bbox, Rect::new(0.0, 0.0, 400.0, 400.0)).unwrap();
    let vp = proj.viewport();
    assert!((vp.width() - 400.0).abs() < 1e-9);
    assert!((vp.height() - 100.0).abs() < 1e-9);
    assert!((vp.y0 - 150.0).abs() < 1e-9);
    assert!(close(proj.project(GeoPoint::new(2.0, 0.5)), Point::new(200.0, 200.0)));
}

#[test]
fn north_is_up() {
    let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
    let proj = MapProjection::fit(bbox, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(proj.project(GeoPoint::new(0.5, 0.9)).y < proj.project(GeoPoint::new(0.5, 0.1)).y);
}

#[test]
fn empty_plot_is_rejected() {
    let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
    assert!(MapProjection::fit(bbox, Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
}
