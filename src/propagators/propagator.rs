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

use super::{
    EpochDecodeSnafu, KeplerOpts, PropagatedState, PropagationError, SolverSnafu,
    UnboundOrbitSnafu,
};
use crate::cosmic::{JulianDate, OrbitalElements};
use rayon::prelude::*;
use snafu::prelude::*;
use std::time::Instant;

/// Beyond this many days between the element epoch and the target, two-body motion is a poor model
const LONG_PROPAGATION_DAYS: f64 = 36_525.0;

/// Propagates osculating elements to a target epoch assuming unperturbed two-body motion.
///
/// Every body is propagated from its own element epoch: the mean anomaly advances linearly with
/// the mean motion, and is mapped back to a position through Kepler's equation. Planetary
/// perturbations are ignored, so the accuracy degrades with the time span of the propagation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeplerPropagator {
    pub opts: KeplerOpts,
}

impl KeplerPropagator {
    pub fn new(opts: KeplerOpts) -> Self {
        Self { opts }
    }

    /// Propagates all of the bodies to the target epoch, returning the states in input order.
    ///
    /// The whole batch is rejected on the first body whose epoch cannot be decoded or whose orbit
    /// is not elliptical, refer to [Self::propagate_each] to propagate the valid bodies regardless.
    pub fn propagate(
        &self,
        bodies: &[OrbitalElements],
        target: JulianDate,
    ) -> Result<Vec<PropagatedState>, PropagationError> {
        let tick = Instant::now();
        let epochs = bodies
            .iter()
            .enumerate()
            .map(|(index, body)| element_epoch(index, body))
            .collect::<Result<Vec<JulianDate>, PropagationError>>()?;
        let elapsed_days: Vec<f64> = epochs.iter().map(|&epoch| target - epoch).collect();

        self.check_span(&elapsed_days);

        let mean_anomalies: Vec<f64> = bodies
            .iter()
            .zip(&elapsed_days)
            .map(|(body, &dt)| body.mean_anomaly_after(dt))
            .collect();
        let eccs: Vec<f64> = bodies.iter().map(|body| body.ecc).collect();

        let solver = self.opts.solver();
        let eccentric_anomalies = if self.opts.parallel {
            solver.par_solve_batch(&mean_anomalies, &eccs)
        } else {
            solver.solve_batch(&mean_anomalies, &eccs)
        }
        .context(SolverSnafu)?;

        let states: Vec<PropagatedState> = bodies
            .iter()
            .zip(epochs)
            .zip(eccentric_anomalies)
            .map(|((body, epoch), ea)| PropagatedState::from_eccentric_anomaly(body, epoch, ea))
            .collect();

        debug!(
            "Propagated {} bodies to {target} ({}) in {:?}",
            states.len(),
            self.opts,
            tick.elapsed()
        );
        Ok(states)
    }

    /// Propagates each body independently: a body that cannot be propagated yields an error in its
    /// slot without affecting the others.
    pub fn propagate_each(
        &self,
        bodies: &[OrbitalElements],
        target: JulianDate,
    ) -> Vec<Result<PropagatedState, PropagationError>> {
        let results: Vec<Result<PropagatedState, PropagationError>> = if self.opts.parallel {
            bodies
                .par_iter()
                .enumerate()
                .map(|(index, body)| self.propagate_one(index, body, target))
                .collect()
        } else {
            bodies
                .iter()
                .enumerate()
                .map(|(index, body)| self.propagate_one(index, body, target))
                .collect()
        };

        let failures = results.iter().filter(|r| r.is_err()).count();
        if failures > 0 {
            warn!(
                "{failures} of {} bodies could not be propagated to {target}",
                bodies.len()
            );
        }
        results
    }

    /// Propagates a single body, `index` only serves to identify the body in the error.
    pub fn propagate_one(
        &self,
        index: usize,
        body: &OrbitalElements,
        target: JulianDate,
    ) -> Result<PropagatedState, PropagationError> {
        let epoch = element_epoch(index, body)?;
        let ea = self
            .opts
            .solver()
            .solve(body.mean_anomaly_after(target - epoch), body.ecc);
        Ok(PropagatedState::from_eccentric_anomaly(body, epoch, ea))
    }

    fn check_span(&self, elapsed_days: &[f64]) {
        let longest = elapsed_days.iter().fold(0.0_f64, |acc, dt| acc.max(dt.abs()));
        if longest > LONG_PROPAGATION_DAYS {
            warn!(
                "propagating over {:.0} days ({:.1} years), two-body positions will be inaccurate",
                longest,
                longest / 365.25
            );
        } else {
            debug!("longest propagation span: {longest:.1} days");
        }
    }
}

/// Decoded element epoch of the body, after validating the orbit.
fn element_epoch(index: usize, body: &OrbitalElements) -> Result<JulianDate, PropagationError> {
    ensure!(
        body.is_elliptical(),
        UnboundOrbitSnafu {
            index,
            designation: &body.designation,
            ecc: body.ecc
        }
    );
    body.decode_epoch().context(EpochDecodeSnafu {
        index,
        designation: &body.designation,
    })
}
