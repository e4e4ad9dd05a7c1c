extern crate minor_planet_painter as mpp;

use approx::assert_abs_diff_eq;
use flate2::write::GzEncoder;
use flate2::Compression;
use mpp::io::mpcorb::{load_mpcorb, parse_str, CatalogError};
use rstest::*;
use std::io::Write;

use crate::{sample_catalog_path, SAMPLE_EPOCH_JD};

#[allow(clippy::too_many_arguments)]
fn record(
    designation: &str,
    epoch: &str,
    ma: f64,
    aop: f64,
    raan: f64,
    inc: f64,
    ecc: f64,
    sma: f64,
) -> String {
    let n = 0.985_607_668_6 / sma.powf(1.5);
    format!(
        "{:<7} {:5.2} {:5.2} {:>5} {:9.5}  {:9.5}  {:9.5}  {:9.5}  {:9.7} {:11.8} {:11.7}  0 MPO000000",
        designation, 15.0, 0.15, epoch, ma, aop, raan, inc, ecc, n, sma
    )
}

#[fixture]
fn catalog() -> String {
    [
        "Header of the catalog".to_string(),
        "with several lines".to_string(),
        "-".repeat(160),
        record("a0001", "K2555", 10.0, 20.0, 30.0, 5.0, 0.1, 1.0),
        String::new(),
        record("a0002", "K141R", 90.0, 45.0, 120.0, 12.0, 0.15, 3.9),
        record("a0003", "J9611", 180.0, 0.0, 0.0, 1.0, 0.05, 45.0),
    ]
    .join("\n")
}

#[rstest]
fn parse_records_in_order(catalog: String) {
    let population = parse_str(&catalog, None).unwrap();
    assert_eq!(population.len(), 3);
    let designations: Vec<&str> = population.iter().map(|b| b.designation.as_str()).collect();
    assert_eq!(designations, vec!["a0001", "a0002", "a0003"]);

    let hilda = &population.as_slice()[1];
    assert_eq!(hilda.epoch, "K141R");
    assert!((hilda.ma_rad.to_degrees() - 90.0).abs() < 1e-9);
    assert!((hilda.aop_rad.to_degrees() - 45.0).abs() < 1e-9);
    assert!((hilda.raan_rad.to_degrees() - 120.0).abs() < 1e-9);
    assert!((hilda.inc_rad.to_degrees() - 12.0).abs() < 1e-9);
    assert_eq!(hilda.ecc, 0.15);
    assert_eq!(hilda.sma_au, 3.9);

    let epochs = population.decode_epochs().unwrap();
    assert_abs_diff_eq!(epochs[1].days(), 2_456_720.5, epsilon = 1e-6);
    assert_abs_diff_eq!(epochs[2].days(), 2_450_119.5, epsilon = 1e-6);
}

#[rstest]
#[case(Some(1), 1)]
#[case(Some(2), 2)]
#[case(Some(50), 3)]
#[case(None, 3)]
fn record_limit(catalog: String, #[case] limit: Option<usize>, #[case] expected: usize) {
    assert_eq!(parse_str(&catalog, limit).unwrap().len(), expected);
}

#[rstest]
fn malformed_records_are_located(catalog: String) {
    let truncated = format!("{catalog}\n{}", &record("a0004", "K2555", 1.0, 2.0, 3.0, 4.0, 0.1, 2.0)[..90]);
    assert_eq!(
        parse_str(&truncated, None),
        Err(CatalogError::ShortRecord { line: 8, len: 90 })
    );

    let bad_epoch_is_kept = format!("{catalog}\n{}", record("a0005", "K2!55", 1.0, 2.0, 3.0, 4.0, 0.1, 2.0));
    // Epochs are only decoded when propagating
    let population = parse_str(&bad_epoch_is_kept, None).unwrap();
    assert_eq!(population.len(), 4);
    assert!(population.decode_epochs().is_err());

    let headerless = record("a0001", "K2555", 10.0, 20.0, 30.0, 5.0, 0.1, 1.0);
    assert_eq!(parse_str(&headerless, None), Err(CatalogError::MissingHeader));
}

#[rstest]
#[case::not_a_number("nan")]
#[case::infinite("inf")]
fn non_finite_epoch_column(catalog: String, #[case] epoch: &str) {
    let text = format!("{catalog}\n{}", record("a0006", epoch, 1.0, 2.0, 3.0, 4.0, 0.1, 2.0));
    let population = parse_str(&text, None).unwrap();
    assert_eq!(population.len(), 4);
    assert!(population.epoch_span().is_err());
}

#[test]
fn sample_catalog() {
    let population = load_mpcorb(sample_catalog_path(), None).unwrap();
    assert_eq!(population.len(), 11);
    assert_eq!(population.as_slice()[0].designation, "00001");
    assert_eq!(population.as_slice()[10].designation, "D6199");
    let span = population.epoch_span().unwrap().unwrap();
    assert_abs_diff_eq!(span.earliest.days(), SAMPLE_EPOCH_JD, epsilon = 1e-6);
    assert_abs_diff_eq!(span.latest.days(), SAMPLE_EPOCH_JD, epsilon = 1e-6);

    assert_eq!(load_mpcorb(sample_catalog_path(), Some(4)).unwrap().len(), 4);
}

#[test]
fn gzipped_catalog() {
    let plain = std::fs::read(sample_catalog_path()).unwrap();
    let path = std::env::temp_dir().join(format!("MPCORB_sample_{}.DAT.gz", std::process::id()));
    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(&plain).unwrap();
    encoder.finish().unwrap();

    let unzipped = load_mpcorb(&path, None).unwrap();
    let reference = load_mpcorb(sample_catalog_path(), None).unwrap();
    assert_eq!(unzipped, reference);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_catalog() {
    assert!(matches!(
        load_mpcorb("does/not/exist/MPCORB.DAT", None),
        Err(CatalogError::OpenCatalog { .. })
    ));
}
