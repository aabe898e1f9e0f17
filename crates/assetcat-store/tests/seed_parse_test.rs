// Integration tests for seed parsing and digests

use std::io::Write;
use std::path::PathBuf;

use assetcat_core::errors::ExErrorKind;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_parse_plant_seed() {
    // GIVEN the plant fixture
    let path = fixtures_dir().join("seed_plant.yaml");

    // WHEN we parse it
    let seed = assetcat_store::seed::parse_seed_file(&path).unwrap();

    // THEN every section is populated
    assert_eq!(seed.plants.len(), 1);
    assert_eq!(seed.plants[0].areas.len(), 2);
    assert_eq!(seed.devices[0].models.len(), 2);
    assert_eq!(seed.links.len(), 5);
    // 1 plant, 2 areas, 1 space, 1 coordinate, 2 assets, 1 device, 2 models, 6 flat
    assert_eq!(seed.node_count(), 16);
}

#[test]
fn test_unresolved_link_is_invalid_input() {
    let path = fixtures_dir().join("seed_bad_link.yaml");

    let err = assetcat_store::seed::parse_seed_file(&path).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("unknown asset"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = assetcat_store::seed::parse_seed_file(&dir.path().join("nope.yaml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_digest_matches_for_copied_file() {
    let original = fixtures_dir().join("seed_plant.yaml");
    let content = std::fs::read_to_string(&original).unwrap();

    let mut copy = tempfile::NamedTempFile::new().unwrap();
    copy.write_all(content.as_bytes()).unwrap();

    let a = assetcat_store::seed::parse_seed_file(&original).unwrap();
    let b = assetcat_store::seed::parse_seed_file(copy.path()).unwrap();

    assert_eq!(
        assetcat_store::seed::compute_seed_digest(&a).unwrap(),
        assetcat_store::seed::compute_seed_digest(&b).unwrap()
    );
}
