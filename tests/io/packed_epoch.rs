extern crate minor_planet_painter as mpp;

use approx::assert_abs_diff_eq;
use mpp::io::packed_epoch::{decode, EpochError, PackedEpoch};
use mpp::time::Epoch;
use mpp::JulianDate;
use rstest::*;

#[rstest]
#[case::spring_2014("K141R", 2_456_720.5)]
#[case::sample_catalog("K2555", 2_460_860.5)]
#[case::nineteenth_century("I9901", 2_414_655.5)]
#[case::twentieth_century("J9611", 2_450_119.5)]
#[case::lowercase_century("k141R", 2_456_720.5)]
#[case::fraction_of_day("K141R.5", 2_456_721.0)]
#[case::day_zero("K1400", 2_456_657.5)]
#[case::past_the_end_of_the_year("K14ZZ", 2_457_952.5)]
#[case::plain_julian_date("2451545.0", 2_451_545.0)]
#[case::padded_julian_date("  2460000.5 ", 2_460_000.5)]
fn decode_epochs(#[case] code: &str, #[case] expected: f64) {
    let jd = decode(code).unwrap();
    assert_abs_diff_eq!(jd.days(), expected, epsilon = 1e-6);
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[case::unknown_century("A141R")]
#[case::too_short("K141")]
#[case::too_long("K141RR")]
#[case::year_not_decimal("K1A1R")]
#[case::bad_base36("K14!R")]
#[case::bad_fraction("K141R.x")]
#[case::not_a_number("nan")]
#[case::infinite("inf")]
#[case::negative_infinite(" -inf ")]
fn reject_malformed(#[case] code: &str) {
    assert!(decode(code).is_err(), "{code} should not decode");
}

#[test]
fn errors_name_the_culprit() {
    assert_eq!(decode(""), Err(EpochError::Empty));
    assert_eq!(
        decode("A141R"),
        Err(EpochError::UnknownCentury {
            code: "A141R".to_string(),
            letter: 'A'
        })
    );
    assert_eq!(
        decode("K14!R"),
        Err(EpochError::InvalidBase36 {
            code: "K14!R".to_string(),
            character: '!'
        })
    );
    assert_eq!(
        decode(" inf "),
        Err(EpochError::NonFinite {
            code: "inf".to_string()
        })
    );
}

#[test]
fn pack_an_epoch() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2014, 3, 4);
    let packed = PackedEpoch::from_epoch(epoch).unwrap();
    assert_eq!(packed.year(), 2014);
    assert_abs_diff_eq!(packed.day_of_year(), 63.0, epsilon = 1e-9);
    assert_eq!(format!("{packed}"), "K141R");

    let noon = Epoch::from_gregorian_utc_hms(2025, 7, 4, 12, 0, 0);
    let packed = PackedEpoch::from_epoch(noon).unwrap();
    assert_eq!(format!("{packed}"), "K2555.5");
    assert_abs_diff_eq!(
        packed.to_julian_date().days(),
        JulianDate::from_epoch(noon).days(),
        epsilon = 1e-6
    );

    assert!(PackedEpoch::from_epoch(Epoch::from_gregorian_utc_at_midnight(1750, 1, 1)).is_err());
}

#[test]
fn iso_timestamps() {
    let jd = JulianDate::from_iso_utc("2024-06-01T00:00:00").unwrap();
    assert_abs_diff_eq!(jd.days(), 2_460_462.5, epsilon = 1e-9);
    let bare = JulianDate::from_iso_utc("2024-06-01").unwrap();
    assert_abs_diff_eq!(bare.days(), jd.days(), epsilon = 1e-9);
    let noon: JulianDate = "2024-06-01T12:00:00".parse().unwrap();
    assert_abs_diff_eq!(noon - jd, 0.5, epsilon = 1e-9);
    let days: JulianDate = "2460462.5".parse().unwrap();
    assert_eq!(days, JulianDate(2_460_462.5));
    assert!(JulianDate::from_iso_utc("first of June").is_err());
}
