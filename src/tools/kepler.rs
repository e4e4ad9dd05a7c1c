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

use rayon::prelude::*;
use snafu::prelude::*;

/// Number of Newton-Raphson iterations used unless otherwise configured.
///
/// Ten iterations converge for the eccentricities found from the main belt out to the Kuiper belt.
pub const DEFAULT_KEPLER_ITERATIONS: usize = 10;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum KeplerError {
    #[snafu(display(
        "{mean_anomalies} mean anomalies provided but {eccentricities} eccentricities"
    ))]
    LengthMismatch {
        mean_anomalies: usize,
        eccentricities: usize,
    },
}

/// Solves Kepler's equation `M = E - e sin(E)` for the eccentric anomaly `E`.
///
/// The solver always runs exactly `iterations` Newton-Raphson steps starting from `E = M`: there is
/// no convergence test, so every body costs the same and batches can be spread over threads without
/// any branching. The mean anomaly is not wrapped to [0, 2π) before solving.
///
/// Only defined for elliptical orbits, 0 <= e < 1. The output is meaningless for e >= 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeplerSolver {
    pub iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KEPLER_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    pub fn with_iterations(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Returns the eccentric anomaly in radians from the mean anomaly in radians and the eccentricity.
    pub fn solve(&self, mean_anomaly_rad: f64, ecc: f64) -> f64 {
        let mut ea = mean_anomaly_rad;
        for _ in 0..self.iterations {
            ea -= (ea - ecc * ea.sin() - mean_anomaly_rad) / (1.0 - ecc * ea.cos());
        }
        ea
    }

    /// Solves Kepler's equation elementwise, sequentially.
    pub fn solve_batch(&self, mean_anomalies: &[f64], eccs: &[f64]) -> Result<Vec<f64>, KeplerError> {
        ensure_same_length(mean_anomalies, eccs)?;
        Ok(mean_anomalies
            .iter()
            .zip(eccs)
            .map(|(&ma, &ecc)| self.solve(ma, ecc))
            .collect())
    }

    /// Solves Kepler's equation elementwise on rayon's thread pool. The output order matches the input.
    pub fn par_solve_batch(
        &self,
        mean_anomalies: &[f64],
        eccs: &[f64],
    ) -> Result<Vec<f64>, KeplerError> {
        ensure_same_length(mean_anomalies, eccs)?;
        Ok(mean_anomalies
            .par_iter()
            .zip(eccs.par_iter())
            .map(|(&ma, &ecc)| self.solve(ma, ecc))
            .collect())
    }

    /// Returns the residual of Kepler's equation, `E - e sin(E) - M`, for a candidate eccentric anomaly.
    pub fn residual(ea_rad: f64, mean_anomaly_rad: f64, ecc: f64) -> f64 {
        ea_rad - ecc * ea_rad.sin() - mean_anomaly_rad
    }
}

fn ensure_same_length(mean_anomalies: &[f64], eccs: &[f64]) -> Result<(), KeplerError> {
    ensure!(
        mean_anomalies.len() == eccs.len(),
        LengthMismatchSnafu {
            mean_anomalies: mean_anomalies.len(),
            eccentricities: eccs.len()
        }
    );
    Ok(())
}
