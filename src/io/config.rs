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
    maybe_julian_date_from_str, maybe_julian_date_to_str, ConfigError, ConfigRepr, ExportCfg,
    InvalidConfigSnafu,
};
use crate::cosmic::{FamilyCriteria, JulianDate};
use crate::propagators::KeplerOpts;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::PathBuf;

/// Default half-width of the snapshot window, in AU, wide enough for Jupiter's orbit
pub const DEFAULT_RANGE_AU: f64 = 6.5;

fn default_range_au() -> f64 {
    DEFAULT_RANGE_AU
}

fn default_output() -> PathBuf {
    PathBuf::from("MPCORB.csv")
}

/// Configuration of a snapshot of the minor planet population, usually loaded from YAML.
///
/// ```yaml
/// catalog: data/MPCORB.DAT.gz
/// epoch: 2024-06-01T00:00:00
/// max_bodies: 50000
/// range_au: 6.5
/// kepler:
///   iterations: 10
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PainterConfig {
    /// Path to MPCORB.DAT, plain or gzipped
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Target epoch, a UTC timestamp or a Julian Date
    #[serde(
        default,
        serialize_with = "maybe_julian_date_to_str",
        deserialize_with = "maybe_julian_date_from_str"
    )]
    pub epoch: Option<JulianDate>,
    /// Only read this many bodies from the catalog
    #[serde(default)]
    pub max_bodies: Option<usize>,
    /// Half-width of the snapshot window (AU)
    #[serde(default = "default_range_au")]
    pub range_au: f64,
    #[serde(default)]
    pub kepler: KeplerOpts,
    #[serde(default)]
    pub families: FamilyCriteria,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub export: ExportCfg,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            epoch: None,
            max_bodies: None,
            range_au: DEFAULT_RANGE_AU,
            kepler: KeplerOpts::default(),
            families: FamilyCriteria::default(),
            output: default_output(),
            export: ExportCfg::default(),
        }
    }
}

impl ConfigRepr for PainterConfig {}

impl PainterConfig {
    /// Checks the values which deserialization alone cannot reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.range_au.is_finite() && self.range_au > 0.0,
            InvalidConfigSnafu {
                msg: format!("range_au must be positive, got {}", self.range_au)
            }
        );
        ensure!(
            self.kepler.iterations > 0,
            InvalidConfigSnafu {
                msg: "at least one Kepler iteration is needed"
            }
        );
        if let Some(epoch) = self.epoch {
            ensure!(
                epoch.days().is_finite(),
                InvalidConfigSnafu {
                    msg: format!("epoch {} is not a finite Julian Date", epoch.days())
                }
            );
        }
        Ok(())
    }

    /// Returns the target epoch, which must be set either in the file or on the command line.
    pub fn target_epoch(&self) -> Result<JulianDate, ConfigError> {
        self.epoch.context(InvalidConfigSnafu {
            msg: "no target epoch provided",
        })
    }
}
