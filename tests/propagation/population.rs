extern crate minor_planet_painter as mpp;

use approx::assert_abs_diff_eq;
use mpp::cosmic::{EpochSpan, OrbitalElements};
use mpp::io::mpcorb::load_mpcorb;
use mpp::linalg::Vector3;
use mpp::propagators::{KeplerOpts, KeplerPropagator, PropagationError};
use mpp::utils::orbital_plane_to_ecliptic;
use mpp::{JulianDate, Population};
use rstest::*;

use crate::sample_catalog_path;

#[fixture]
fn population() -> Population {
    load_mpcorb(sample_catalog_path(), None).unwrap()
}

#[fixture]
fn element_epoch(population: Population) -> JulianDate {
    population.as_slice()[0].decode_epoch().unwrap()
}

#[rstest]
#[case::parallel(KeplerOpts::default())]
#[case::sequential(KeplerOpts::sequential(10))]
fn no_elapsed_time_reproduces_the_elements(
    population: Population,
    element_epoch: JulianDate,
    #[case] opts: KeplerOpts,
) {
    let states = KeplerPropagator::new(opts)
        .propagate(population.as_slice(), element_epoch)
        .unwrap();
    assert_eq!(states.len(), population.len());

    for (body, state) in population.iter().zip(&states) {
        // Position from the perifocal frame, independently of the argument of latitude
        let ea = state.ea_rad;
        let perifocal = Vector3::new(
            body.sma_au * (ea.cos() - body.ecc),
            body.sma_au * (1.0 - body.ecc.powi(2)).sqrt() * ea.sin(),
            0.0,
        );
        let ecliptic = orbital_plane_to_ecliptic(body.raan_rad, body.inc_rad, body.aop_rad) * perifocal;
        assert_abs_diff_eq!(state.x_au(), ecliptic[0], epsilon = 1e-9);
        assert_abs_diff_eq!(state.y_au(), ecliptic[1], epsilon = 1e-9);
        assert_abs_diff_eq!(state.radius_au, ecliptic.norm(), epsilon = 1e-9);
        // And the eccentric anomaly is that of the catalog mean anomaly
        assert_abs_diff_eq!(
            ea - body.ecc * ea.sin(),
            body.ma_rad,
            epsilon = 1e-9
        );
    }

    // Ceres
    assert_abs_diff_eq!(states[0].x_au(), 2.771_131_732_271_319, epsilon = 1e-8);
    assert_abs_diff_eq!(states[0].y_au(), -0.964_072_773_816_200_9, epsilon = 1e-8);
    assert_abs_diff_eq!(states[0].radius_au, 2.983_507_323_256_034, epsilon = 1e-8);
}

#[rstest]
fn one_year_later(population: Population, element_epoch: JulianDate) {
    let states = KeplerPropagator::default()
        .propagate(population.as_slice(), element_epoch + 365.25)
        .unwrap();
    // Ceres
    assert_abs_diff_eq!(states[0].x_au(), 1.718_041_510_945_456, epsilon = 1e-8);
    assert_abs_diff_eq!(states[0].y_au(), 2.190_622_565_413_629, epsilon = 1e-8);
    // Eros
    assert_abs_diff_eq!(states[3].x_au(), 0.517_407_933_578_491_5, epsilon = 1e-8);
    assert_abs_diff_eq!(states[3].y_au(), -1.681_698_945_252_512_4, epsilon = 1e-8);
    assert_abs_diff_eq!(states[3].radius_au, 1.762_301_046_950_927_7, epsilon = 1e-8);
}

#[rstest]
#[case::past("1990-01-01T00:00:00")]
#[case::near("2025-10-01T00:00:00")]
#[case::future("2060-01-01T00:00:00")]
fn between_perihelion_and_aphelion(population: Population, #[case] when: &str) {
    let target = JulianDate::from_iso_utc(when).unwrap();
    let states = KeplerPropagator::default()
        .propagate(population.as_slice(), target)
        .unwrap();
    for (body, state) in population.iter().zip(&states) {
        assert!(state.radius_au >= body.perihelion_au() - 1e-9);
        assert!(state.radius_au <= body.aphelion_au() + 1e-9);
        assert!(state.position_au.norm() <= state.radius_au + 1e-9);
        assert!((0.0..std::f64::consts::TAU).contains(&state.aol_rad));
    }
}

fn with_bad_records(population: &Population) -> Vec<OrbitalElements> {
    let mut bodies = population.as_slice().to_vec();
    bodies[2].epoch = "Q99!!".to_string();
    bodies[6].ecc = 1.05;
    bodies
}

#[rstest]
fn batch_aborts_on_the_first_bad_record(population: Population, element_epoch: JulianDate) {
    let bodies = with_bad_records(&population);
    let err = KeplerPropagator::default()
        .propagate(&bodies, element_epoch)
        .unwrap_err();
    match err {
        PropagationError::EpochDecode {
            index, designation, ..
        } => {
            assert_eq!(index, 2);
            assert_eq!(designation, "00153");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[rstest]
#[case::parallel(KeplerOpts::default())]
#[case::sequential(KeplerOpts::sequential(10))]
fn bad_records_are_isolated(
    population: Population,
    element_epoch: JulianDate,
    #[case] opts: KeplerOpts,
) {
    let _ = pretty_env_logger::try_init();
    let bodies = with_bad_records(&population);
    let prop = KeplerPropagator::new(opts);
    let results = prop.propagate_each(&bodies, element_epoch);
    assert_eq!(results.len(), bodies.len());

    let reference = prop
        .propagate(population.as_slice(), element_epoch)
        .unwrap();
    for (idx, result) in results.iter().enumerate() {
        match idx {
            2 => assert!(matches!(
                result,
                Err(PropagationError::EpochDecode { index: 2, .. })
            )),
            6 => assert!(matches!(
                result,
                Err(PropagationError::UnboundOrbit { index: 6, .. })
            )),
            _ => assert_eq!(result.as_ref().unwrap(), &reference[idx]),
        }
    }
}

#[rstest]
fn empty_population() {
    let target = JulianDate(2_460_000.5);
    assert!(KeplerPropagator::default()
        .propagate(&[], target)
        .unwrap()
        .is_empty());
    assert!(KeplerPropagator::default()
        .propagate_each(&[], target)
        .is_empty());
}

#[rstest]
fn states_carry_their_element_epoch(population: Population) {
    let target = JulianDate(2_461_000.5);
    let states = KeplerPropagator::default()
        .propagate(population.as_slice(), target)
        .unwrap();
    let epochs = population.decode_epochs().unwrap();
    for (state, epoch) in states.iter().zip(&epochs) {
        assert_eq!(state.epoch, *epoch);
    }
    assert_eq!(
        EpochSpan::of(states.iter().map(|state| state.epoch)),
        population.epoch_span().unwrap()
    );
    let single = KeplerPropagator::default()
        .propagate_one(0, &population.as_slice()[0], target)
        .unwrap();
    assert_eq!(single.epoch, epochs[0]);
}
