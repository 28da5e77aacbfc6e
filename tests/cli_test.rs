//! CLI-level tests driving the `tzfind` binary end to end against a
//! synthetic data directory.

mod common;

use assert_cmd::cargo;
use common::{write_data_dir, Boundary};
use predicates::prelude::*;
use tempfile::tempdir;

type StdResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn exact_lookup_prints_bare_zone_name() -> StdResult {
    let dir = tempdir()?;
    write_data_dir(dir.path(), &[Boundary { zone_name: "Test/Berlin", ring_degrees: (10.0, 50.0, 15.0, 55.0) }]);

    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("13.405")
        .arg("52.52")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Test/Berlin\n"));
    Ok(())
}

#[test]
fn verbose_lookup_includes_coordinates_and_result() -> StdResult {
    let dir = tempdir()?;
    write_data_dir(dir.path(), &[Boundary { zone_name: "Test/Berlin", ring_degrees: (10.0, 50.0, 15.0, 55.0) }]);

    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("-v")
        .arg("13.405")
        .arg("52.52")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test/Berlin"))
        .stdout(predicate::str::contains("52.520000"));
    Ok(())
}

#[test]
fn finder_light_function_id_resolves_the_same_zone() -> StdResult {
    let dir = tempdir()?;
    write_data_dir(dir.path(), &[Boundary { zone_name: "Test/Tokyo", ring_degrees: (138.0, 34.0, 141.0, 37.0) }]);

    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("-f")
        .arg("light.timezone_at")
        .arg("139.69")
        .arg("35.69")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Test/Tokyo\n"));
    Ok(())
}

#[test]
fn land_only_function_id_hides_an_ocean_zone() -> StdResult {
    let dir = tempdir()?;
    write_data_dir(dir.path(), &[Boundary { zone_name: "Etc/GMT+5", ring_degrees: (-70.0, -10.0, -65.0, -5.0) }]);

    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("-f")
        .arg("timezone_at_land")
        .arg("-67.5")
        .arg("-7.5")
        .assert()
        .success()
        .stdout("\n");
    Ok(())
}

#[test]
fn unknown_function_id_is_rejected_before_any_lookup() -> StdResult {
    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d")
        .arg("./does-not-matter")
        .arg("-f")
        .arg("bogus")
        .arg("0.0")
        .arg("0.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
    Ok(())
}

#[test]
fn missing_data_directory_is_an_error() -> StdResult {
    let dir = tempdir()?;
    let missing = dir.path().join("does-not-exist");

    let mut cmd = cargo::cargo_bin_cmd!("tzfind");
    cmd.arg("-d").arg(&missing).arg("13.405").arg("52.52").assert().failure();
    Ok(())
}
