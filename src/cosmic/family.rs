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

use super::OrbitalElements;
use enum_iterator::{all, Sequence};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Coarse dynamical families of the minor planets, in the order they are tested.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Sequence,
)]
pub enum DynamicalFamily {
    /// Near-Earth asteroids, perihelion below 1.3 AU
    NEA,
    /// Main belt asteroids
    MBA,
    /// Hildas, in the 3:2 resonance with Jupiter
    Hilda,
    /// Jupiter Trojans, around the L4 and L5 points of Jupiter
    Trojan,
    /// Trans-Neptunian objects
    TNO,
    /// Anything else, e.g. Mars crossers, Centaurs, Hungarias
    Other,
}

impl fmt::Display for DynamicalFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::NEA => "NEA",
            Self::MBA => "MBA",
            Self::Hilda => "Hilda",
            Self::Trojan => "Trojan",
            Self::TNO => "TNO",
            Self::Other => "Other",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, PartialEq, Snafu)]
pub enum FamilyError {
    #[snafu(display("unknown dynamical family `{name}`"))]
    UnknownFamily { name: String },
}

impl FromStr for DynamicalFamily {
    type Err = FamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<Self>()
            .find(|family| family.to_string().eq_ignore_ascii_case(s.trim()))
            .context(UnknownFamilySnafu { name: s })
    }
}

/// Inclusive bounds
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Thresholds of the family criteria, tested in order and first match wins.
///
/// 1. NEA if the perihelion distance q = a(1 - e) is strictly below `nea_max_perihelion_au`;
/// 2. MBA if a is within `mba_sma_au`;
/// 3. Hilda if a is within `hilda_sma_au` and e within `hilda_ecc`;
/// 4. Trojan if a is within `trojan_sma_au`;
/// 5. TNO if a is at least `tno_min_sma_au`;
/// 6. Other.
///
/// All range bounds are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyCriteria {
    pub nea_max_perihelion_au: f64,
    pub mba_sma_au: Bounds,
    pub hilda_sma_au: Bounds,
    pub hilda_ecc: Bounds,
    pub trojan_sma_au: Bounds,
    pub tno_min_sma_au: f64,
}

impl Default for FamilyCriteria {
    fn default() -> Self {
        Self {
            nea_max_perihelion_au: 1.3,
            mba_sma_au: Bounds::new(1.8, 3.3),
            hilda_sma_au: Bounds::new(3.7, 4.0),
            hilda_ecc: Bounds::new(0.07, 0.3),
            trojan_sma_au: Bounds::new(5.0, 5.4),
            tno_min_sma_au: 30.0,
        }
    }
}

impl FamilyCriteria {
    /// Returns the family of an orbit of this semi-major axis (AU) and eccentricity.
    pub fn family_of(&self, sma_au: f64, ecc: f64) -> DynamicalFamily {
        let perihelion_au = sma_au * (1.0 - ecc);
        if perihelion_au < self.nea_max_perihelion_au {
            DynamicalFamily::NEA
        } else if self.mba_sma_au.contains(sma_au) {
            DynamicalFamily::MBA
        } else if self.hilda_sma_au.contains(sma_au) && self.hilda_ecc.contains(ecc) {
            DynamicalFamily::Hilda
        } else if self.trojan_sma_au.contains(sma_au) {
            DynamicalFamily::Trojan
        } else if sma_au >= self.tno_min_sma_au {
            DynamicalFamily::TNO
        } else {
            DynamicalFamily::Other
        }
    }

    /// Legend entry of the provided family under these criteria, e.g. `MBA (q>=1.3, a=1.8-3.3)`.
    pub fn description(&self, family: DynamicalFamily) -> String {
        let q = self.nea_max_perihelion_au;
        match family {
            DynamicalFamily::NEA => format!("NEA (q<{q})"),
            DynamicalFamily::MBA => format!(
                "MBA (q>={q}, a={:.1}-{:.1})",
                self.mba_sma_au.min, self.mba_sma_au.max
            ),
            DynamicalFamily::Hilda => format!(
                "Hilda (q>={q}, a={:.1}-{:.1}, e={:.2}-{:.2})",
                self.hilda_sma_au.min, self.hilda_sma_au.max, self.hilda_ecc.min, self.hilda_ecc.max
            ),
            DynamicalFamily::Trojan => format!(
                "Trojan (q>={q}, a={:.1}-{:.1})",
                self.trojan_sma_au.min, self.trojan_sma_au.max
            ),
            DynamicalFamily::TNO => format!("TNO (q>={q}, a>={:.1})", self.tno_min_sma_au),
            DynamicalFamily::Other => "Others".to_string(),
        }
    }
}

/// Sorts minor planets into their [DynamicalFamily].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FamilyClassifier {
    pub criteria: FamilyCriteria,
}

impl FamilyClassifier {
    pub fn new(criteria: FamilyCriteria) -> Self {
        Self { criteria }
    }

    pub fn classify_one(&self, body: &OrbitalElements) -> DynamicalFamily {
        self.criteria.family_of(body.sma_au, body.ecc)
    }

    /// Labels every body, in input order, and counts the population of each family.
    pub fn classify(&self, bodies: &[OrbitalElements]) -> Classification {
        let labels: Vec<DynamicalFamily> =
            bodies.iter().map(|body| self.classify_one(body)).collect();
        let census = FamilyCensus::from_labels(&labels);
        debug!("{census}");
        Classification { labels, census }
    }
}

/// Family of each body, in input order, and the census of the families.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub labels: Vec<DynamicalFamily>,
    pub census: FamilyCensus,
}

impl Classification {
    /// Indexes of the bodies of the provided family
    pub fn members(&self, family: DynamicalFamily) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(move |(idx, label)| (*label == family).then_some(idx))
    }
}

/// Number of bodies per family.
///
/// Only the specific families are counted: the number of bodies in [DynamicalFamily::Other] is
/// always the total minus the specific counts, so the census adds up to the total by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyCensus {
    total: usize,
    specific: BTreeMap<DynamicalFamily, usize>,
}

impl FamilyCensus {
    pub fn from_labels(labels: &[DynamicalFamily]) -> Self {
        let mut specific = BTreeMap::new();
        for label in labels.iter().filter(|l| **l != DynamicalFamily::Other) {
            *specific.entry(*label).or_insert(0) += 1;
        }
        Self {
            total: labels.len(),
            specific,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, family: DynamicalFamily) -> usize {
        match family {
            DynamicalFamily::Other => self.total - self.specific.values().sum::<usize>(),
            _ => self.specific.get(&family).copied().unwrap_or(0),
        }
    }

    /// Returns whether each count matches the number of labels of that family.
    pub fn is_consistent_with(&self, labels: &[DynamicalFamily]) -> bool {
        self.total == labels.len()
            && all::<DynamicalFamily>()
                .all(|family| self.count(family) == labels.iter().filter(|l| **l == family).count())
    }

    /// Iterates over every family and its count, in classification order.
    pub fn iter(&self) -> impl Iterator<Item = (DynamicalFamily, usize)> + '_ {
        all::<DynamicalFamily>().map(move |family| (family, self.count(family)))
    }
}

impl fmt::Display for FamilyCensus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bodies:", self.total)?;
        for (family, count) in self.iter() {
            write!(f, " {family} = {count}")?;
        }
        Ok(())
    }
}
