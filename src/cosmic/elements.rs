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

use super::JulianDate;
use crate::io::packed_epoch::{decode, EpochError};
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use typed_builder::TypedBuilder;

/// Osculating heliocentric Keplerian elements of a minor planet, as published in the MPC orbit database.
///
/// Angles are stored in radians and the mean motion in radians per day. The element epoch is kept
/// in its catalog form and only decoded when the elements are propagated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct OrbitalElements {
    /// Packed designation, e.g. `00433` or `K14A00A`
    #[builder(default, setter(into))]
    pub designation: String,
    /// Element epoch, either a packed date (`K2555`) or a plain Julian Date
    #[builder(setter(into))]
    pub epoch: String,
    /// Mean anomaly at the element epoch (rad)
    pub ma_rad: f64,
    /// Argument of perihelion (rad)
    pub aop_rad: f64,
    /// Longitude of the ascending node (rad)
    pub raan_rad: f64,
    /// Inclination to the ecliptic (rad)
    pub inc_rad: f64,
    /// Eccentricity
    pub ecc: f64,
    /// Semi-major axis (AU)
    pub sma_au: f64,
    /// Mean daily motion (rad/day)
    pub mean_motion_rad_d: f64,
}

impl OrbitalElements {
    /// Builds the elements from angles in degrees and a mean motion in degrees per day, as found in MPCORB.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        designation: impl Into<String>,
        epoch: impl Into<String>,
        ma_deg: f64,
        aop_deg: f64,
        raan_deg: f64,
        inc_deg: f64,
        ecc: f64,
        mean_motion_deg_d: f64,
        sma_au: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            epoch: epoch.into(),
            ma_rad: ma_deg.to_radians(),
            aop_rad: aop_deg.to_radians(),
            raan_rad: raan_deg.to_radians(),
            inc_rad: inc_deg.to_radians(),
            ecc,
            sma_au,
            mean_motion_rad_d: mean_motion_deg_d.to_radians(),
        }
    }

    /// Decodes the element epoch
    pub fn decode_epoch(&self) -> Result<JulianDate, EpochError> {
        decode(&self.epoch)
    }

    /// Perihelion distance q = a (1 - e), in AU
    pub fn perihelion_au(&self) -> f64 {
        self.sma_au * (1.0 - self.ecc)
    }

    /// Aphelion distance Q = a (1 + e), in AU
    pub fn aphelion_au(&self) -> f64 {
        self.sma_au * (1.0 + self.ecc)
    }

    /// Orbital period from the mean motion, in days
    pub fn period_days(&self) -> f64 {
        TAU / self.mean_motion_rad_d
    }

    /// Returns whether these elements describe a bound elliptical orbit, i.e. 0 <= e < 1.
    pub fn is_elliptical(&self) -> bool {
        self.ecc.is_finite() && (0.0..1.0).contains(&self.ecc)
    }

    /// Mean anomaly `delta_days` after the element epoch, in radians and NOT wrapped to [0, 2π).
    pub fn mean_anomaly_after(&self, delta_days: f64) -> f64 {
        self.ma_rad + self.mean_motion_rad_d * delta_days
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{} @ {}] sma = {:.7} AU\tecc = {:.7}\tinc = {:.5} deg\traan = {:.5} deg\taop = {:.5} deg\tma = {:.5} deg",
            self.designation,
            self.epoch,
            self.sma_au,
            self.ecc,
            self.inc_rad.to_degrees(),
            self.raan_rad.to_degrees(),
            self.aop_rad.to_degrees(),
            self.ma_rad.to_degrees(),
        )
    }
}

/// Earliest and latest element epochs of a population.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpochSpan {
    pub earliest: JulianDate,
    pub latest: JulianDate,
}

impl EpochSpan {
    /// Span of the provided epochs, or None if there are none.
    pub fn of<I: IntoIterator<Item = JulianDate>>(epochs: I) -> Option<Self> {
        epochs.into_iter().fold(None, |span, epoch| match span {
            None => Some(Self {
                earliest: epoch,
                latest: epoch,
            }),
            Some(Self { earliest, latest }) => Some(Self {
                earliest: if epoch < earliest { epoch } else { earliest },
                latest: if epoch > latest { epoch } else { latest },
            }),
        })
    }
}

/// An ordered set of minor planets, in catalog order.
///
/// The order carries no meaning besides aligning the propagated states and the family labels,
/// which are always returned in the same order as the population.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    bodies: Vec<OrbitalElements>,
}

impl Population {
    pub fn new(bodies: Vec<OrbitalElements>) -> Self {
        Self { bodies }
    }

    /// Builds a population keeping at most `limit` bodies, if a limit is provided.
    pub fn with_limit(mut bodies: Vec<OrbitalElements>, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            bodies.truncate(limit);
        }
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn as_slice(&self) -> &[OrbitalElements] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrbitalElements> {
        self.bodies.iter()
    }

    /// Decodes the epoch of every body, failing on the first malformed epoch.
    pub fn decode_epochs(&self) -> Result<Vec<JulianDate>, EpochError> {
        self.bodies.iter().map(|body| body.decode_epoch()).collect()
    }

    /// Returns the earliest and latest element epochs, or None if the population is empty.
    pub fn epoch_span(&self) -> Result<Option<EpochSpan>, EpochError> {
        Ok(EpochSpan::of(self.decode_epochs()?))
    }
}

impl From<Vec<OrbitalElements>> for Population {
    fn from(bodies: Vec<OrbitalElements>) -> Self {
        Self::new(bodies)
    }
}

impl FromIterator<OrbitalElements> for Population {
    fn from_iter<I: IntoIterator<Item = OrbitalElements>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a OrbitalElements;
    type IntoIter = std::slice::Iter<'a, OrbitalElements>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
