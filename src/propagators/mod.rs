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

use snafu::prelude::*;
use std::fmt;

// Re-Export
mod propagator;
pub use propagator::*;
mod options;
pub use options::*;

use crate::cosmic::{JulianDate, OrbitalElements};
use crate::io::packed_epoch::EpochError;
use crate::linalg::Vector2;
use crate::tools::kepler::KeplerError;
use crate::utils::between_0_tau;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PropagationError {
    #[snafu(display("body #{index} ({designation}): could not decode its epoch: {source}"))]
    EpochDecode {
        index: usize,
        designation: String,
        source: EpochError,
    },
    #[snafu(display(
        "body #{index} ({designation}): eccentricity {ecc} is not that of an elliptical orbit"
    ))]
    UnboundOrbit {
        index: usize,
        designation: String,
        ecc: f64,
    },
    #[snafu(display("solving Kepler's equation failed: {source}"))]
    Solver { source: KeplerError },
}

/// Heliocentric ecliptic state of a minor planet at the target epoch of a propagation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PropagatedState {
    /// Eccentric anomaly (rad), as returned by the solver, not wrapped
    pub ea_rad: f64,
    /// True anomaly (rad), in (-π, π]
    pub ta_rad: f64,
    /// Heliocentric distance (AU)
    pub radius_au: f64,
    /// Argument of latitude, ω + ν, in [0, 2π) (rad)
    pub aol_rad: f64,
    /// Position projected onto the ecliptic plane (AU)
    pub position_au: Vector2<f64>,
    /// Decoded epoch of the elements this state was propagated from
    pub epoch: JulianDate,
}

impl PropagatedState {
    /// Builds the state of the provided elements, whose epoch decodes to `epoch`, at this
    /// eccentric anomaly.
    pub fn from_eccentric_anomaly(
        elements: &OrbitalElements,
        epoch: JulianDate,
        ea_rad: f64,
    ) -> Self {
        let ecc = elements.ecc;
        let half_ea = 0.5 * ea_rad;
        let ta_rad = 2.0
            * f64::atan2(
                (1.0 + ecc).sqrt() * half_ea.sin(),
                (1.0 - ecc).sqrt() * half_ea.cos(),
            );
        let radius_au = elements.sma_au * (1.0 - ecc * ea_rad.cos());
        let aol_rad = between_0_tau(elements.aop_rad + ta_rad);

        let (sin_raan, cos_raan) = elements.raan_rad.sin_cos();
        let (sin_aol, cos_aol) = aol_rad.sin_cos();
        let cos_inc = elements.inc_rad.cos();
        let position_au = Vector2::new(
            radius_au * (cos_raan * cos_aol - sin_raan * sin_aol * cos_inc),
            radius_au * (sin_raan * cos_aol + cos_raan * sin_aol * cos_inc),
        );

        Self {
            ea_rad,
            ta_rad,
            radius_au,
            aol_rad,
            position_au,
            epoch,
        }
    }

    pub fn x_au(&self) -> f64 {
        self.position_au[0]
    }

    pub fn y_au(&self) -> f64 {
        self.position_au[1]
    }

    /// Returns whether both |x| and |y| are within the provided half-width, in AU.
    pub fn is_within(&self, half_width_au: f64) -> bool {
        self.x_au().abs() <= half_width_au && self.y_au().abs() <= half_width_au
    }
}

impl fmt::Display for PropagatedState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x = {:.6} AU\ty = {:.6} AU\tr = {:.6} AU\tta = {:.3} deg",
            self.x_au(),
            self.y_au(),
            self.radius_au,
            self.ta_rad.to_degrees()
        )
    }
}
