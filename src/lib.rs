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

/*! # minor-planet-painter

Heliocentric snapshots of the minor planet population.

Reads osculating Keplerian elements in the MPCORB fixed-width format, propagates every body
from its own element epoch to a single target epoch assuming unperturbed two-body motion, and
sorts the population into dynamical families (near-Earth asteroids, main belt, Hildas, Jupiter
Trojans, trans-Neptunian objects and everything else).

```no_run
use minor_planet_painter::cosmic::FamilyClassifier;
use minor_planet_painter::io::mpcorb::load_mpcorb;
use minor_planet_painter::propagators::KeplerPropagator;
use minor_planet_painter::JulianDate;

let population = load_mpcorb("data/MPCORB.DAT", Some(10_000)).unwrap();
let target = JulianDate::from_iso_utc("2024-06-01T00:00:00").unwrap();
let states = KeplerPropagator::default()
    .propagate(population.as_slice(), target)
    .unwrap();
let classification = FamilyClassifier::default().classify(population.as_slice());
println!("{}", classification.census);
# let _ = states;
```
*/

/// Provides the minor planet orbital elements, the population container, the dynamical family
/// classifier and an offline ephemeris of the major planets.
pub mod cosmic;

/// Provides the linear mean anomaly propagator which places every body at a common epoch.
pub mod propagators;

/// Simple numerical tools (e.g. the Kepler equation solver)
pub mod tools;

/// Utility functions shared by different modules.
pub mod utils;

mod errors;
/// Functions which may fail return an error rather than panicking.
pub use self::errors::*;

/// All the input/output needs for this library: packed epochs, MPCORB catalogs, configuration and CSV export.
pub mod io;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{DynamicalFamily, JulianDate, OrbitalElements, Population};
pub use self::propagators::{KeplerPropagator, PropagatedState};
