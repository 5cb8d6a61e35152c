//! Test helpers for CLI workspaces and canned routes.

use camino::{Utf8Path, Utf8PathBuf};
use fuelwise_core::{FuelStation, Route};
use geo::Coord;
use std::fs;
use tempfile::TempDir;

/// Latitude 400 geodesic miles north of 30N along the 100W meridian.
pub(super) const LAT_400_MILES: f64 = 35.8045;

/// Temporary directory with a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write file");
}

/// Write a SQLite catalog holding `stations`.
pub(super) fn write_catalog(path: &Utf8Path, stations: &[FuelStation]) {
    fuelwise_core::test_support::write_station_database(path.as_std_path(), stations)
        .expect("write catalog");
}

pub(super) fn on_meridian(lat: f64) -> Coord<f64> {
    Coord { x: -100.0, y: lat }
}

/// A 400 mile trip, within the default vehicle range.
pub(super) fn short_route() -> Route {
    let polyline = vec![on_meridian(30.0), on_meridian(32.0), on_meridian(35.8)];
    Route::new(polyline, 400.0, on_meridian(30.0), on_meridian(35.8)).expect("route")
}

/// A 600 mile trip north; fuel runs low about 393 miles in.
pub(super) fn long_route() -> Route {
    let polyline: Vec<_> = [
        30.0, 30.7, 31.4, 32.1, 32.8, 33.5, 34.2, 34.9, 35.5, 35.7, 36.5, 37.5, 38.7,
    ]
    .into_iter()
    .map(on_meridian)
    .collect();
    Route::new(polyline, 600.0, on_meridian(30.0), on_meridian(38.7)).expect("route")
}
