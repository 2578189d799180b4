use super::*;
use crate::acquire::capitals::CapitalRecord;
use crate::foundation::core::GeoPoint;

fn dataset() -> CountryDataset {
    let ds = CountryDataset::new(vec![
        CapitalRecord {
            state: "A".to_string(),
            capital: "Ay".to_string(),
            coordinate: GeoPoint::new(0.0, 0.0),
        },
        CapitalRecord {
            state: "B, North".to_string(),
            capital: "Bee".to_string(),
            coordinate: GeoPoint::new(1.5, -1.0),
        },
    ]);
    let (ds, _) = ds.with_year(Year(2010), &[("A", 100.0), ("B, North", 2000.5)]);
    let (ds, _) = ds.with_year(Year(2012), &[("A", 7.0)]);
    ds
}

#[test]
fn run_directories_are_unique() {
    let parent = tempfile::tempdir().unwrap();
    let a = RunDirectory::create_unique(parent.path(), "Costa Rica").unwrap();
    let b = RunDirectory::create_unique(parent.path(), "Costa Rica").unwrap();
    assert_ne!(a.path(), b.path());
    assert!(a.path().is_dir() && b.path().is_dir());
    let name = a.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Costa_Rica_"));
}

#[test]
fn open_requires_existing_directory() {
    let parent = tempfile::tempdir().unwrap();
    assert!(RunDirectory::open(parent.path()).is_ok());
    assert!(RunDirectory::open(parent.path().join("nope")).is_err());
}

#[test]
fn bounding_box_backup_lists_all_edges() {
    let parent = tempfile::tempdir().unwrap();
    let run = RunDirectory::open(parent.path()).unwrap();
    let bbox = BoundingBox::new(-2.0, -1.0, 3.0, 4.5).unwrap();
    let path = run.write_bounding_box(&bbox).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        text,
        "min_longitude: -2\nmin_latitude: -1\nmax_longitude: 3\nmax_latitude: 4.5"
    );
}

#[test]
fn global_max_backup() {
    let parent = tempfile::tempdir().unwrap();
    let run = RunDirectory::open(parent.path()).unwrap();
    let path = run.write_global_max(Some(2_000_000.0)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "max_GDP: 2000000");
    run.write_global_max(None).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "max_GDP: none");
}

#[test]
fn dataset_csv_has_sparse_year_columns() {
    let parent = tempfile::tempdir().unwrap();
    let run = RunDirectory::open(parent.path()).unwrap();
    let path = run
        .write_dataset(&dataset(), &[Year(2010), Year(2012)])
        .unwrap();

    let mut r = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = r.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["state", "capital", "longitude", "latitude", "gdp_2010", "gdp_2012"]
    );
    let rows: Vec<csv::StringRecord> = r.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][4], "100");
    assert_eq!(&rows[0][5], "7");
    assert_eq!(&rows[1][0], "B, North");
    assert_eq!(&rows[1][4], "2000.5");
    assert_eq!(&rows[1][5], "");
}

#[test]
fn capital_table_without_years() {
    let parent = tempfile::tempdir().unwrap();
    let run = RunDirectory::open(parent.path()).unwrap();
    let path = run.write_dataset(&dataset(), &[]).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("state,capital,longitude,latitude\n"));
}

#[test]
fn animation_path_is_named_by_country() {
    let run = RunDirectory::open(std::env::temp_dir()).unwrap();
    assert!(
        run.animation_path("Testland")
            .ends_with("animated_Testland.gif")
    );
}
