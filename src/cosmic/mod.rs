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

/// Keplerian elements of a minor planet and ordered populations of them
mod elements;
/// Dynamical families and the criteria to sort minor planets into them
mod family;
mod julian;
/// Planetary positions for context
pub mod planets;

pub use self::elements::{EpochSpan, OrbitalElements, Population};
pub use self::family::{
    Bounds, Classification, DynamicalFamily, FamilyCensus, FamilyClassifier, FamilyCriteria,
    FamilyError,
};
pub use self::julian::JulianDate;
pub use self::planets::{Ephemeris, MeanElementsEphemeris, Planet, TraceSpan};
