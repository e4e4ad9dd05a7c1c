extern crate minor_planet_painter as mpp;

use mpp::cosmic::DynamicalFamily;
use mpp::io::config::PainterConfig;
use mpp::io::ConfigRepr;
use mpp::JulianDate;
use std::path::PathBuf;

#[test]
fn full_configuration() {
    let yaml = r#"
catalog: data/MPCORB_sample.DAT
epoch: 2025-07-04T00:00:00
max_bodies: 5
range_au: 3.0
kepler:
  iterations: 12
  parallel: false
families:
  nea_max_perihelion_au: 1.3
  tno_min_sma_au: 35.0
output: snapshot.csv
export:
  families: [NEA, MBA]
  window_au: 3.0
"#;
    let cfg = PainterConfig::loads(yaml).unwrap();
    assert_eq!(cfg.catalog, Some(PathBuf::from("data/MPCORB_sample.DAT")));
    assert!((cfg.target_epoch().unwrap().days() - 2_460_860.5).abs() < 1e-6);
    assert_eq!(cfg.max_bodies, Some(5));
    assert_eq!(cfg.range_au, 3.0);
    assert_eq!(cfg.kepler.iterations, 12);
    assert!(!cfg.kepler.parallel);
    assert_eq!(cfg.families.tno_min_sma_au, 35.0);
    // Unspecified criteria keep their defaults
    assert_eq!(cfg.families.mba_sma_au.min, 1.8);
    assert_eq!(cfg.output, PathBuf::from("snapshot.csv"));
    assert_eq!(
        cfg.export.families,
        Some(vec![DynamicalFamily::NEA, DynamicalFamily::MBA])
    );
    assert_eq!(cfg.export.window_au, Some(3.0));
    assert!(!cfg.export.timestamp);
    assert!(cfg.validate().is_ok());
}

#[test]
fn configuration_round_trip() {
    let cfg = PainterConfig {
        epoch: Some(JulianDate(2_460_462.5)),
        ..Default::default()
    };
    let yaml = serde_yaml::to_string(&cfg).unwrap();
    let reloaded = PainterConfig::loads(&yaml).unwrap();
    assert!((reloaded.target_epoch().unwrap().days() - 2_460_462.5).abs() < 1e-6);
    assert_eq!(reloaded.kepler, cfg.kepler);
    assert_eq!(reloaded.families, cfg.families);
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("sssb_xy_{}.yaml", std::process::id()));
    std::fs::write(&path, "epoch: 2456720.5\nrange_au: 2.0\n").unwrap();
    let cfg = PainterConfig::load(&path).unwrap();
    assert_eq!(cfg.target_epoch().unwrap(), JulianDate(2_456_720.5));
    assert_eq!(cfg.range_au, 2.0);
    std::fs::remove_file(&path).unwrap();

    assert!(PainterConfig::load("does/not/exist.yaml").is_err());
}

#[test]
fn non_finite_epoch_is_rejected() {
    assert!(PainterConfig::loads("epoch: .nan\n").is_err());
    assert!(PainterConfig::loads("epoch: .inf\n").is_err());
    assert!(PainterConfig::loads("epoch: nan\n").is_err());
}
