use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn endat() -> Command {
    let mut cmd = Command::cargo_bin("endat").unwrap();
    // point the binary at an empty config dir so host files cannot leak in
    cmd.env("ENDAT_CONFIG_DIR", "/nonexistent-endat-config");
    cmd
}

#[test]
fn get_prints_the_literal_value() {
    endat()
        .args(["get", "geometry", "germany_polygon"])
        .assert()
        .success()
        .stdout(predicate::str::diff("germany_polygon.csv\n"));
}

#[test]
fn get_preserves_placeholders() {
    endat()
        .args(["get", "coastdat", "file_pattern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{year}"));
}

#[test]
fn get_missing_key_fails() {
    endat()
        .args(["get", "geometry", "no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_key"));
}

#[test]
fn get_unset_sentinel_fails() {
    endat()
        .args(["get", "root_paths", "local_root"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unset"));
}

#[test]
fn sections_lists_shipped_and_runtime_sections() {
    endat()
        .args(["sections"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("root_paths")
                .and(predicate::str::contains("opsd_url_2017"))
                .and(predicate::str::contains("postGIS"))
                .and(predicate::str::contains("paths_pattern")),
        );
}

#[test]
fn show_json_contains_urls() {
    endat()
        .args(["show", "--section", "opsd_url_latest", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "conventional_power_plants/latest/conventional_power_plants_DE.csv",
        ));
}

#[test]
fn show_unknown_section_fails() {
    endat()
        .args(["show", "--section", "no_such_section"])
        .assert()
        .failure();
}

#[test]
fn paths_table_lists_composed_paths() {
    endat()
        .args(["paths"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("coastdat")
                .and(predicate::str::contains("pattern"))
                .and(predicate::str::contains("{year}")),
        );
}

#[test]
fn check_passes_on_shipped_table() {
    endat()
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK."));
}

#[test]
fn check_reports_user_file_violations() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("broken.ini"),
        "[path_names]\nbad = local_root, {year}\n",
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("endat").unwrap();
    cmd.env("ENDAT_CONFIG_DIR", dir.path())
        .args(["check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("violation"));
}

#[test]
fn user_file_overrides_default() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("user.ini"),
        "[geometry]\ngermany_polygon = site_polygon.csv\n",
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("endat").unwrap();
    cmd.env("ENDAT_CONFIG_DIR", dir.path())
        .args(["get", "geometry", "germany_polygon"])
        .assert()
        .success()
        .stdout(predicate::str::diff("site_polygon.csv\n"));
}

#[test]
fn init_writes_template_once() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("endat.ini");
    endat()
        .args(["init", "--out", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let body = std::fs::read_to_string(&target).unwrap();
    assert!(body.contains("[root_paths]"));

    // refuses to clobber an existing file
    endat()
        .args(["init", "--out", target.to_str().unwrap()])
        .assert()
        .failure();
}
