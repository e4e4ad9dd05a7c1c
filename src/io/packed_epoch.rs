/*
    Minor Planet Painter, heliocentric snapshots of the minor planet population
    Copyright (C) 2024 Minor Planet Painter contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::JulianDate;
use crate::time::Epoch;
use snafu::prelude::*;
use std::fmt;
use std::str::FromStr;

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_MICRODAYS: u64 = 1_295_999_999;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EpochError {
    #[snafu(display("empty epoch code"))]
    Empty,
    #[snafu(display("packed epoch `{code}` is not of the form CYYDD[.fff]"))]
    Malformed { code: String },
    #[snafu(display("unknown century code `{letter}` in `{code}`, expected I through Z"))]
    UnknownCentury { code: String, letter: char },
    #[snafu(display("year of `{code}` is not two decimal digits"))]
    InvalidYear { code: String },
    #[snafu(display("invalid base-36 character `{character}` in `{code}`"))]
    InvalidBase36 { code: String, character: char },
    #[snafu(display("fraction of day in `{code}` is not a decimal fraction"))]
    InvalidFraction { code: String },
    #[snafu(display("year {year} cannot be packed, must be within 1800 and 3599"))]
    YearOutOfRange { year: i32 },
    #[snafu(display("day of year {day_of_year} cannot be packed, must be within 0 and 1296"))]
    DayOutOfRange { day_of_year: f64 },
    #[snafu(display("`{code}` is not a finite number of Julian days"))]
    NonFinite { code: String },
    #[snafu(display("could not parse timestamp `{input}`: {details}"))]
    InvalidTimestamp { input: String, details: String },
}

/// Decodes the epoch of an orbital element set into a Julian Date.
///
/// After trimming, a plain finite number is returned unchanged as a Julian Date. Anything else must
/// be a packed epoch code, refer to [PackedEpoch] for the layout.
pub fn decode(code: &str) -> Result<JulianDate, EpochError> {
    let code = code.trim();
    ensure!(!code.is_empty(), EmptySnafu);
    if let Ok(days) = code.parse::<f64>() {
        ensure!(days.is_finite(), NonFiniteSnafu { code });
        return Ok(JulianDate(days));
    }
    Ok(code.parse::<PackedEpoch>()?.to_julian_date())
}

/// Returns the value of the provided base-36 digits (`0-9` then `A-Z`, case insensitive), most significant first.
pub fn base36_to_int(digits: &str) -> Result<u32, EpochError> {
    base36_value(digits, digits)
}

fn base36_value(code: &str, digits: &str) -> Result<u32, EpochError> {
    digits.chars().try_fold(0_u32, |value, c| {
        let digit = c
            .to_digit(36)
            .filter(|_| c.is_ascii_alphanumeric())
            .context(InvalidBase36Snafu {
                code: code.to_string(),
                character: c,
            })?;
        Ok(value.saturating_mul(36).saturating_add(digit))
    })
}

/// A packed element epoch, `CYYDD[.fff]`.
///
/// + `C` is the century, `I` for the 1800s through `Z` for the 3500s;
/// + `YY` is the year within the century, two decimal digits;
/// + `DD` is the day of the year in base-36 (so 0 through 1295);
/// + the optional `.fff` is the decimal fraction of that day.
///
/// The packed instant is January 1st of the year at midnight UTC, plus the day of year minus one
/// calendar days. For example, `K141R` is day 63 of 2014, i.e. 2014-03-04T00:00:00 UTC.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PackedEpoch {
    year: i32,
    day_of_year: f64,
}

impl PackedEpoch {
    /// Builds a packed epoch from a year and a (possibly fractional) day of year.
    pub fn new(year: i32, day_of_year: f64) -> Result<Self, EpochError> {
        ensure!((1800..=3599).contains(&year), YearOutOfRangeSnafu { year });
        ensure!(
            (0.0..1296.0).contains(&day_of_year),
            DayOutOfRangeSnafu { day_of_year }
        );
        Ok(Self { year, day_of_year })
    }

    /// Packs the calendar instant of the provided epoch (in UTC).
    pub fn from_epoch(epoch: Epoch) -> Result<Self, EpochError> {
        let (year, _, _, _, _, _, _) = epoch.to_gregorian_utc();
        let jan_first = JulianDate::from_epoch(Epoch::from_gregorian_utc_at_midnight(year, 1, 1));
        Self::new(year, JulianDate::from_epoch(epoch) - jan_first + 1.0)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> f64 {
        self.day_of_year
    }

    /// Julian Date of this packed epoch, in UTC.
    pub fn to_julian_date(&self) -> JulianDate {
        JulianDate::from_epoch(Epoch::from_gregorian_utc_at_midnight(self.year, 1, 1))
            + (self.day_of_year - 1.0)
    }

    pub fn to_epoch(&self) -> Epoch {
        self.to_julian_date().to_epoch()
    }
}

impl FromStr for PackedEpoch {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        ensure!(!code.is_empty(), EmptySnafu);

        let (integer, fraction) = match code.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (code, None),
        };
        ensure!(
            integer.len() == 5 && integer.is_ascii(),
            MalformedSnafu { code }
        );

        let letter = integer.as_bytes()[0].to_ascii_uppercase() as char;
        ensure!(
            ('I'..='Z').contains(&letter),
            UnknownCenturySnafu { code, letter }
        );
        let century = 1800 + 100 * (letter as i32 - 'I' as i32);

        let yy = &integer.as_bytes()[1..3];
        ensure!(
            yy.iter().all(|b| b.is_ascii_digit()),
            InvalidYearSnafu { code }
        );
        let year = century + i32::from(yy[0] - b'0') * 10 + i32::from(yy[1] - b'0');

        let day = base36_value(code, &integer[3..5])?;

        let day_fraction = match fraction {
            None => 0.0,
            Some(digits) => {
                ensure!(
                    digits.bytes().all(|b| b.is_ascii_digit()),
                    InvalidFractionSnafu { code }
                );
                format!("0.{digits}")
                    .parse::<f64>()
                    .ok()
                    .context(InvalidFractionSnafu { code })?
            }
        };

        Ok(Self {
            year,
            day_of_year: f64::from(day) + day_fraction,
        })
    }
}

impl fmt::Display for PackedEpoch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = (b'I' + (self.year / 100 - 18) as u8) as char;
        // Rounded to the microday
        let microdays = ((self.day_of_year * 1e6).round() as u64).min(MAX_MICRODAYS);
        let day = (microdays / 1_000_000) as usize;
        let micro = microdays % 1_000_000;
        write!(
            f,
            "{letter}{:02}{}{}",
            self.year % 100,
            BASE36_DIGITS[day / 36] as char,
            BASE36_DIGITS[day % 36] as char
        )?;
        if micro > 0 {
            let digits = format!("{micro:06}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}
