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

use super::{JulianDate, OrbitalElements};
use crate::linalg::Vector3;
use crate::tools::kepler::KeplerSolver;
use crate::utils::{between_0_tau, orbital_plane_to_ecliptic};
use enum_iterator::{all, Sequence};
use serde_derive::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

/// Gaussian gravitational constant, in radians per day
pub const GAUSS_K: f64 = 0.017_202_098_95;

/// Julian Date of J2000, the reference epoch of the planetary mean elements
pub const J2000_JD: f64 = 2_451_545.0;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// The planets drawn for context around the minor planets (Pluto included).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Sequence)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// NAIF identifier of the barycenter of the planetary system
    pub fn naif_id(&self) -> i32 {
        match self {
            Self::Mercury => 1,
            Self::Venus => 2,
            Self::Earth => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
        }
    }

    /// Time span and sampling of the orbit trace of this planet, about one revolution.
    pub fn trace_span(&self) -> TraceSpan {
        let (days, step_days) = match self {
            Self::Mercury => (120.0, 1.0),
            Self::Venus => (250.0, 1.0),
            Self::Earth => (370.0, 1.0),
            Self::Mars => (750.0, 2.0),
            Self::Jupiter => (4400.0, 10.0),
            Self::Saturn => (11_000.0, 20.0),
            Self::Uranus => (31_000.0, 50.0),
            Self::Neptune => (60_000.0, 100.0),
            Self::Pluto => (90_000.0, 150.0),
        };
        TraceSpan { days, step_days }
    }

    // Keplerian elements and rates, J2000 ecliptic, valid 1800 AD - 2050 AD (Standish, JPL)
    fn mean_elements(&self) -> &'static MeanElements {
        match self {
            Self::Mercury => &MERCURY,
            Self::Venus => &VENUS,
            Self::Earth => &EARTH_MOON_BARYCENTER,
            Self::Mars => &MARS,
            Self::Jupiter => &JUPITER,
            Self::Saturn => &SATURN,
            Self::Uranus => &URANUS,
            Self::Neptune => &NEPTUNE,
            Self::Pluto => &PLUTO,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&format!("{self:?}"))
    }
}

/// Orbit trace sampling: `days` centered on the epoch of the snapshot, every `step_days`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceSpan {
    pub days: f64,
    pub step_days: f64,
}

impl TraceSpan {
    /// Number of samples, both ends included
    pub fn sample_count(&self) -> usize {
        (self.days / self.step_days).floor() as usize + 1
    }

    pub fn sample_dates(&self, center: JulianDate) -> Vec<JulianDate> {
        let start = center + (-self.days / 2.0);
        (0..self.sample_count())
            .map(|i| start + i as f64 * self.step_days)
            .collect()
    }
}

/// Heliocentric positions of the planets in the J2000 ecliptic frame, in AU.
pub trait Ephemeris {
    type Error: std::error::Error;

    fn position_au(&self, planet: Planet, epoch: JulianDate) -> Result<Vector3<f64>, Self::Error>;

    /// Positions of all the planets at the provided epoch
    fn positions_au(&self, epoch: JulianDate) -> Result<Vec<(Planet, Vector3<f64>)>, Self::Error> {
        all::<Planet>()
            .map(|planet| Ok((planet, self.position_au(planet, epoch)?)))
            .collect()
    }

    /// Positions of the planet over its [TraceSpan] centered on the provided epoch
    fn orbit_trace_au(
        &self,
        planet: Planet,
        center: JulianDate,
    ) -> Result<Vec<Vector3<f64>>, Self::Error> {
        planet
            .trace_span()
            .sample_dates(center)
            .into_iter()
            .map(|epoch| self.position_au(planet, epoch))
            .collect()
    }
}

/// Planetary positions from mean Keplerian elements with linear rates.
///
/// Accurate to a few thousandths of an AU for the inner planets within 1800-2050, which is plenty to
/// locate the planets on a map of the solar system. Epochs are used as given (UTC), the difference
/// with TDB is well below that accuracy.
#[derive(Copy, Clone, Debug, Default)]
pub struct MeanElementsEphemeris {
    pub solver: KeplerSolver,
}

impl MeanElementsEphemeris {
    /// Osculating elements of the planet at the provided epoch, with the mean anomaly in [0, 2π).
    pub fn osculating_elements(&self, planet: Planet, epoch: JulianDate) -> OrbitalElements {
        let t = (epoch.days() - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
        let me = planet.mean_elements();
        let sma_au = me.sma_au[0] + me.sma_au[1] * t;
        let lon_peri_deg = me.lon_peri_deg[0] + me.lon_peri_deg[1] * t;
        let lon_node_deg = me.lon_node_deg[0] + me.lon_node_deg[1] * t;
        let mean_lon_deg = me.mean_lon_deg[0] + me.mean_lon_deg[1] * t;
        OrbitalElements {
            designation: planet.to_string(),
            epoch: format!("{}", epoch.days()),
            ma_rad: between_0_tau((mean_lon_deg - lon_peri_deg).to_radians()),
            aop_rad: (lon_peri_deg - lon_node_deg).to_radians(),
            raan_rad: lon_node_deg.to_radians(),
            inc_rad: (me.inc_deg[0] + me.inc_deg[1] * t).to_radians(),
            ecc: me.ecc[0] + me.ecc[1] * t,
            sma_au,
            mean_motion_rad_d: GAUSS_K / sma_au.powf(1.5),
        }
    }
}

impl Ephemeris for MeanElementsEphemeris {
    type Error = Infallible;

    fn position_au(&self, planet: Planet, epoch: JulianDate) -> Result<Vector3<f64>, Infallible> {
        let el = self.osculating_elements(planet, epoch);
        let ea = self.solver.solve(el.ma_rad, el.ecc);
        let in_plane = Vector3::new(
            el.sma_au * (ea.cos() - el.ecc),
            el.sma_au * (1.0 - el.ecc.powi(2)).sqrt() * ea.sin(),
            0.0,
        );
        Ok(orbital_plane_to_ecliptic(el.raan_rad, el.inc_rad, el.aop_rad) * in_plane)
    }
}

/// Value at J2000 and rate per Julian century of each element, angles in degrees
struct MeanElements {
    sma_au: [f64; 2],
    ecc: [f64; 2],
    inc_deg: [f64; 2],
    mean_lon_deg: [f64; 2],
    lon_peri_deg: [f64; 2],
    lon_node_deg: [f64; 2],
}

static MERCURY: MeanElements = MeanElements {
    sma_au: [0.387_099_27, 0.000_000_37],
    ecc: [0.205_635_93, 0.000_019_06],
    inc_deg: [7.004_979_02, -0.005_947_49],
    mean_lon_deg: [252.250_323_50, 149_472.674_111_75],
    lon_peri_deg: [77.457_796_28, 0.160_476_89],
    lon_node_deg: [48.330_765_93, -0.125_340_81],
};

static VENUS: MeanElements = MeanElements {
    sma_au: [0.723_335_66, 0.000_003_90],
    ecc: [0.006_776_72, -0.000_041_07],
    inc_deg: [3.394_676_05, -0.000_788_90],
    mean_lon_deg: [181.979_099_50, 58_517.815_387_29],
    lon_peri_deg: [131.602_467_18, 0.002_683_29],
    lon_node_deg: [76.679_842_55, -0.277_694_18],
};

static EARTH_MOON_BARYCENTER: MeanElements = MeanElements {
    sma_au: [1.000_002_61, 0.000_005_62],
    ecc: [0.016_711_23, -0.000_043_92],
    inc_deg: [-0.000_015_31, -0.012_946_68],
    mean_lon_deg: [100.464_571_66, 35_999.372_449_81],
    lon_peri_deg: [102.937_681_93, 0.323_273_64],
    lon_node_deg: [0.0, 0.0],
};

static MARS: MeanElements = MeanElements {
    sma_au: [1.523_710_34, 0.000_018_47],
    ecc: [0.093_394_10, 0.000_078_82],
    inc_deg: [1.849_691_42, -0.008_131_31],
    mean_lon_deg: [-4.553_432_05, 19_140.302_684_99],
    lon_peri_deg: [-23.943_629_59, 0.444_410_88],
    lon_node_deg: [49.559_538_91, -0.292_573_43],
};

static JUPITER: MeanElements = MeanElements {
    sma_au: [5.202_887_00, -0.000_116_07],
    ecc: [0.048_386_24, -0.000_132_53],
    inc_deg: [1.304_396_95, -0.001_837_14],
    mean_lon_deg: [34.396_440_51, 3_034.746_127_75],
    lon_peri_deg: [14.728_479_83, 0.212_526_68],
    lon_node_deg: [100.473_909_09, 0.204_691_06],
};

static SATURN: MeanElements = MeanElements {
    sma_au: [9.536_675_94, -0.001_250_60],
    ecc: [0.053_861_79, -0.000_509_91],
    inc_deg: [2.485_991_87, 0.001_936_09],
    mean_lon_deg: [49.954_244_23, 1_222.493_622_01],
    lon_peri_deg: [92.598_878_31, -0.418_972_16],
    lon_node_deg: [113.662_424_48, -0.288_677_94],
};

static URANUS: MeanElements = MeanElements {
    sma_au: [19.189_164_64, -0.001_961_76],
    ecc: [0.047_257_44, -0.000_043_97],
    inc_deg: [0.772_637_83, -0.002_429_39],
    mean_lon_deg: [313.238_104_51, 428.482_027_85],
    lon_peri_deg: [170.954_276_30, 0.408_052_81],
    lon_node_deg: [74.016_925_03, 0.042_405_89],
};

static NEPTUNE: MeanElements = MeanElements {
    sma_au: [30.069_922_76, 0.000_262_91],
    ecc: [0.008_590_48, 0.000_051_05],
    inc_deg: [1.770_043_47, 0.000_353_72],
    mean_lon_deg: [-55.120_029_69, 218.459_453_25],
    lon_peri_deg: [44.964_762_27, -0.322_414_64],
    lon_node_deg: [131.784_225_74, -0.005_086_64],
};

static PLUTO: MeanElements = MeanElements {
    sma_au: [39.482_116_75, -0.000_315_96],
    ecc: [0.248_827_30, 0.000_051_70],
    inc_deg: [17.140_012_06, 0.000_048_18],
    mean_lon_deg: [238.929_038_33, 145.207_805_15],
    lon_peri_deg: [224.068_916_29, -0.040_629_42],
    lon_node_deg: [110.303_936_84, -0.011_834_82],
};
