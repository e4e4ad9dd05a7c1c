extern crate minor_planet_painter as mpp;

use approx::assert_abs_diff_eq;
use enum_iterator::all;
use mpp::cosmic::{Ephemeris, MeanElementsEphemeris, Planet};
use mpp::propagators::KeplerPropagator;
use mpp::JulianDate;
use rstest::*;

#[fixture]
fn ephem() -> MeanElementsEphemeris {
    MeanElementsEphemeris::default()
}

#[fixture]
fn epoch() -> JulianDate {
    JulianDate::from_iso_utc("2024-06-01T00:00:00").unwrap()
}

#[rstest]
#[case(Planet::Mercury, 0.30, 0.47)]
#[case(Planet::Venus, 0.71, 0.73)]
#[case(Planet::Earth, 0.983, 1.017)]
#[case(Planet::Mars, 1.38, 1.67)]
#[case(Planet::Jupiter, 4.95, 5.46)]
#[case(Planet::Saturn, 9.0, 10.1)]
#[case(Planet::Uranus, 18.2, 20.1)]
#[case(Planet::Neptune, 29.7, 30.4)]
#[case(Planet::Pluto, 29.6, 49.4)]
fn heliocentric_distances(
    ephem: MeanElementsEphemeris,
    epoch: JulianDate,
    #[case] planet: Planet,
    #[case] min_au: f64,
    #[case] max_au: f64,
) {
    let pos = ephem.position_au(planet, epoch).unwrap();
    let dist = pos.norm();
    assert!(
        (min_au..=max_au).contains(&dist),
        "{planet} at {dist} AU"
    );
}

#[rstest]
fn all_planets_in_order(ephem: MeanElementsEphemeris, epoch: JulianDate) {
    let positions = ephem.positions_au(epoch).unwrap();
    assert_eq!(positions.len(), 9);
    let planets: Vec<Planet> = positions.iter().map(|(planet, _)| *planet).collect();
    assert_eq!(planets, all::<Planet>().collect::<Vec<Planet>>());
}

#[rstest]
fn mercury_trace(ephem: MeanElementsEphemeris, epoch: JulianDate) {
    let trace = ephem.orbit_trace_au(Planet::Mercury, epoch).unwrap();
    assert_eq!(trace.len(), 121);
    for pos in &trace {
        assert!((0.30..=0.47).contains(&pos.norm()));
    }
    // The middle sample is the snapshot epoch itself
    let now = ephem.position_au(Planet::Mercury, epoch).unwrap();
    assert_abs_diff_eq!(trace[60], now, epsilon = 1e-9);
}

#[rstest]
fn consistent_with_the_minor_planet_propagator(
    ephem: MeanElementsEphemeris,
    epoch: JulianDate,
) {
    let prop = KeplerPropagator::default();
    for planet in all::<Planet>() {
        let elements = ephem.osculating_elements(planet, epoch);
        let state = prop.propagate_one(0, &elements, epoch).unwrap();
        let pos = ephem.position_au(planet, epoch).unwrap();
        assert_abs_diff_eq!(state.x_au(), pos[0], epsilon = 1e-9);
        assert_abs_diff_eq!(state.y_au(), pos[1], epsilon = 1e-9);
        assert_abs_diff_eq!(state.radius_au, pos.norm(), epsilon = 1e-9);
    }
}
