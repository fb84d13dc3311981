use std::io::Write;
use std::path::PathBuf;

use endat_core::{template, Config, Document, PostgisConfig};

fn write_ini(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn user_files_layer_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_ini(
        dir.path(),
        "10_site.ini",
        "[root_paths]\nlocal_root = /srv/site\n[postGIS]\nhost = db.site.example\n",
    );
    let second = write_ini(
        dir.path(),
        "20_user.ini",
        "[postGIS]\nhost = db.user.example\n",
    );

    let cfg = Config::load_with_files(&[&first, &second]).unwrap();

    // later file wins per key
    let pg = PostgisConfig::from_config(&cfg).unwrap();
    assert_eq!(pg.host, "db.user.example");

    // the site root steers every composed path
    assert_eq!(
        cfg.path("entsoe").unwrap(),
        PathBuf::from("/srv/site/data/entsoe")
    );
    assert_eq!(
        cfg.path("inhabitants").unwrap(),
        PathBuf::from("/srv/site/data/inhabitants")
    );
}

#[test]
fn composed_table_roundtrips_through_the_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let site = write_ini(
        dir.path(),
        "site.ini",
        "[root_paths]\nlocal_root = /srv/site\npackage_data = /opt/endat/data\n",
    );

    let cfg = Config::load_with_files(&[&site]).unwrap();
    let reparsed = Document::parse(&cfg.to_ini_string()).unwrap();

    // round-trip covers the runtime [paths]/[paths_pattern] sections too
    assert_eq!(
        reparsed.get("paths", "coastdat"),
        Some("/srv/site/data/coastdat")
    );
    assert_eq!(
        reparsed.get("root_paths", "local_root"),
        Some("/srv/site")
    );
    let pattern = reparsed.get("paths_pattern", "coastdat").unwrap();
    assert!(pattern.contains("{year}"));
}

#[test]
fn templates_stay_verbatim_until_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let site = write_ini(
        dir.path(),
        "site.ini",
        "[root_paths]\nlocal_root = /srv/site\n",
    );
    let cfg = Config::load_with_files(&[&site]).unwrap();

    let pattern = cfg.pattern_path("coastdat").unwrap();
    assert_eq!(pattern, "/srv/site/data/feedin/coastdat/{year}/{type}");

    let resolved = template::render(&pattern, &[("year", "2014"), ("type", "wind")]).unwrap();
    assert_eq!(resolved, "/srv/site/data/feedin/coastdat/2014/wind");

    // the url template of the population geodata renders the same way
    let url = cfg.get("inhabitants", "url_geodata_ew").unwrap();
    let rendered = template::render(url, &[("year", "2015"), ("var1", "ebenen")]).unwrap();
    assert!(rendered.contains("vg250-ew_2015-12-31"));
    assert!(rendered.ends_with("shape.ebenen.zip"));
}

#[test]
fn weather_file_name_for_a_year() {
    let empty: &[&std::path::Path] = &[];
    let cfg = Config::load_with_files(empty).unwrap();
    let name = template::render(
        cfg.get("coastdat", "file_pattern").unwrap(),
        &[("year", "2013")],
    )
    .unwrap();
    assert_eq!(name, "coastDat2_de_2013.h5");
}
