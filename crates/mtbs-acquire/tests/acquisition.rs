//! End-to-end acquisition tests: catalogue on disk, orchestrator, verifier.
//!
//! A stub fetcher stands in for the network so every tier of the policy can be
//! exercised offline.

use mtbs_acquire::{
    ensure_available, verify, AcquireError, Acquisition, Catalogue, Fetch, INPUTS_CATEGORY,
};
use std::cell::Cell;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const SHAPEFILE_PARTS: [&str; 4] = [
    "mtbs_perims_DD.shp",
    "mtbs_perims_DD.shx",
    "mtbs_perims_DD.dbf",
    "mtbs_perims_DD.prj",
];

// ============================================================================
// Test Helper Functions
// ============================================================================

fn mtbs_archive() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for name in SHAPEFILE_PARTS {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(name.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Fetcher that counts calls and writes a valid MTBS-shaped archive.
#[derive(Default)]
struct CountingFetcher {
    calls: Cell<usize>,
}

impl Fetch for CountingFetcher {
    fn fetch(&self, _url: &str, destination: &Path) -> mtbs_acquire::Result<u64> {
        self.calls.set(self.calls.get() + 1);
        let archive = mtbs_archive();
        fs::write(destination, &archive)?;
        Ok(archive.len() as u64)
    }
}

/// Fetcher that answers 200 with a body that is not a zip archive.
#[derive(Default)]
struct MaintenancePageFetcher {
    calls: Cell<usize>,
}

impl Fetch for MaintenancePageFetcher {
    fn fetch(&self, _url: &str, destination: &Path) -> mtbs_acquire::Result<u64> {
        self.calls.set(self.calls.get() + 1);
        let body = b"<html>maintenance</html>";
        fs::write(destination, body)?;
        Ok(body.len() as u64)
    }
}

/// Write a catalogue rooted in a temp dir and load it back.
fn catalogue(root: &Path, url: Option<&str>) -> Catalogue {
    let url_line = match url {
        Some(url) => format!("    url: {}\n", url),
        None => "    url: null\n".to_string(),
    };
    let yaml = format!(
        "inputs:\n  wildfires:\n{url_line}    zip_folder: {root}/data/inputs/mtbs_wildfires.zip\n    location: {root}/data/inputs\n    file_name: mtbs_perims_DD.shp\n",
        root = root.display(),
    );
    let path = root.join("data_catalogue.yml");
    fs::write(&path, yaml).unwrap();
    Catalogue::load(&path).expect("catalogue should parse")
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_preplaced_file_needs_no_network() {
    let root = TempDir::new().unwrap();
    let catalogue = catalogue(root.path(), Some("https://example.org/mtbs.zip"));
    let entry = catalogue.entry(INPUTS_CATEGORY, "wildfires").unwrap();

    fs::create_dir_all(&entry.location).unwrap();
    fs::write(entry.target_path(), b"shp").unwrap();

    let fetcher = CountingFetcher::default();
    let outcome = ensure_available("wildfires", entry, &fetcher).unwrap();

    assert_eq!(outcome, Acquisition::AlreadyPresent);
    assert_eq!(fetcher.calls.get(), 0);
    verify(&entry.location, &entry.file_name).unwrap();
}

#[test]
fn test_preplaced_archive_is_extracted() {
    let root = TempDir::new().unwrap();
    let catalogue = catalogue(root.path(), None);
    let entry = catalogue.entry(INPUTS_CATEGORY, "wildfires").unwrap();

    fs::create_dir_all(&entry.location).unwrap();
    fs::write(&entry.zip_folder, mtbs_archive()).unwrap();

    let fetcher = CountingFetcher::default();
    let outcome = ensure_available("wildfires", entry, &fetcher).unwrap();

    assert_eq!(outcome, Acquisition::Extracted { entries: 4 });
    assert_eq!(fetcher.calls.get(), 0);
    for part in SHAPEFILE_PARTS {
        assert!(entry.location.join(part).exists(), "{} not extracted", part);
    }
    verify(&entry.location, &entry.file_name).unwrap();
}

#[test]
fn test_url_is_fetched_then_extracted() {
    let root = TempDir::new().unwrap();
    let catalogue = catalogue(root.path(), Some("https://example.org/mtbs.zip"));
    let entry = catalogue.entry(INPUTS_CATEGORY, "wildfires").unwrap();

    let fetcher = CountingFetcher::default();
    let outcome = ensure_available("wildfires", entry, &fetcher).unwrap();

    assert!(matches!(outcome, Acquisition::Downloaded { entries: 4, .. }));
    assert_eq!(fetcher.calls.get(), 1);
    assert!(entry.zip_folder.exists());
    verify(&entry.location, &entry.file_name).unwrap();

    // Second run finds the file and does nothing.
    let again = ensure_available("wildfires", entry, &fetcher).unwrap();
    assert_eq!(again, Acquisition::AlreadyPresent);
    assert_eq!(fetcher.calls.get(), 1);
}

#[test]
fn test_no_source_is_configuration_error() {
    let root = TempDir::new().unwrap();
    let catalogue = catalogue(root.path(), None);
    let entry = catalogue.entry(INPUTS_CATEGORY, "wildfires").unwrap();

    let fetcher = CountingFetcher::default();
    let err = ensure_available("wildfires", entry, &fetcher).unwrap_err();

    assert!(matches!(err, AcquireError::NoAcquisitionPath { .. }));
    assert!(err.is_configuration());
    assert_eq!(fetcher.calls.get(), 0);
    assert!(!entry.location.exists(), "nothing should be written");

    let missing = verify(&entry.location, &entry.file_name).unwrap_err();
    assert!(matches!(missing, AcquireError::MissingInput(_)));
}

#[test]
fn test_corrupt_download_is_fetched_again() {
    let root = TempDir::new().unwrap();
    let catalogue = catalogue(root.path(), Some("https://example.org/mtbs.zip"));
    let entry = catalogue.entry(INPUTS_CATEGORY, "wildfires").unwrap();

    let fetcher = MaintenancePageFetcher::default();
    let err = ensure_available("wildfires", entry, &fetcher).unwrap_err();
    match &err {
        AcquireError::Acquisition { source, .. } => {
            assert!(matches!(**source, AcquireError::Extraction { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!entry.zip_folder.exists(), "corrupt archive left behind");

    // The next run downloads again instead of re-extracting the bad file.
    ensure_available("wildfires", entry, &fetcher).unwrap_err();
    assert_eq!(fetcher.calls.get(), 2);

    let good = CountingFetcher::default();
    let outcome = ensure_available("wildfires", entry, &good).unwrap();
    assert!(matches!(outcome, Acquisition::Downloaded { entries: 4, .. }));
    assert_eq!(good.calls.get(), 1);
}
