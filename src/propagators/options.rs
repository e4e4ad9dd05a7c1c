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

use std::fmt;

use crate::tools::kepler::{KeplerSolver, DEFAULT_KEPLER_ITERATIONS};
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// KeplerOpts stores the options of the two-body propagation of a population.
///
/// The number of Newton-Raphson iterations is fixed, there is no convergence tolerance. Parallel
/// propagation spreads the bodies over rayon's thread pool and returns them in the same order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
#[serde(default)]
pub struct KeplerOpts {
    #[builder(default = DEFAULT_KEPLER_ITERATIONS)]
    pub iterations: usize,
    #[builder(default = true)]
    pub parallel: bool,
}

impl Default for KeplerOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl KeplerOpts {
    /// Sequential propagation with the provided number of iterations
    pub fn sequential(iterations: usize) -> Self {
        Self {
            iterations,
            parallel: false,
        }
    }

    pub fn solver(&self) -> KeplerSolver {
        KeplerSolver::with_iterations(self.iterations)
    }

    /// Returns a string with the information about these options
    pub fn info(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for KeplerOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Kepler iterations, {}",
            self.iterations,
            if self.parallel {
                "parallel"
            } else {
                "sequential"
            }
        )
    }
}
