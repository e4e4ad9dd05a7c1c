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

use crate::cosmic::{DynamicalFamily, JulianDate};
use crate::time::Epoch;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_derive::{Deserialize as DeserializeDerive, Serialize as SerializeDerive};
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Run configuration of the snapshot tool
pub mod config;
/// CSV export of propagated populations
pub mod export;
/// Reader of the MPC orbit database (MPCORB.DAT), plain or gzipped
pub mod mpcorb;
/// Packed element epochs
pub mod packed_epoch;

/// Configuration for exporting a propagated population to CSV.
#[derive(Clone, Debug, Default, PartialEq, SerializeDerive, DeserializeDerive, TypedBuilder)]
#[builder(doc)]
#[serde(default)]
pub struct ExportCfg {
    /// Families to export, if unset, every body is exported.
    #[builder(default, setter(strip_option))]
    pub families: Option<Vec<DynamicalFamily>>,
    /// Only export the bodies whose |x| and |y| are both within this half-width, in AU.
    #[builder(default, setter(strip_option))]
    pub window_au: Option<f64>,
    /// Set to true to append the timestamp to the filename
    #[builder(default)]
    pub timestamp: bool,
}

impl ExportCfg {
    /// Initialize a new default configuration but timestamp the filename.
    pub fn timestamped() -> Self {
        Self {
            timestamp: true,
            ..Default::default()
        }
    }

    pub fn append_family(&mut self, family: DynamicalFamily) {
        if let Some(families) = self.families.as_mut() {
            families.push(family);
        } else {
            self.families = Some(vec![family]);
        }
    }

    /// Returns whether a body of this family at these coordinates should be exported.
    pub fn includes(&self, family: DynamicalFamily, x_au: f64, y_au: f64) -> bool {
        let family_ok = self
            .families
            .as_ref()
            .map_or(true, |families| families.contains(&family));
        let window_ok = self
            .window_au
            .map_or(true, |half| x_au.abs() <= half && y_au.abs() <= half);
        family_ok && window_ok
    }

    /// Modifies the provided path to include the timestamp if required.
    pub(crate) fn actual_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let mut path_buf = path.as_ref().to_path_buf();
        if !self.timestamp {
            return path_buf;
        }
        let now = match Epoch::now() {
            Ok(now) => now,
            Err(e) => {
                warn!("could not read the system clock ({e}), not timestamping the export");
                return path_buf;
            }
        };
        let (y, mm, dd, hh, min, ss, _) = now.to_gregorian_utc();
        let stamp = format!("{y:04}-{mm:02}-{dd:02}T{hh:02}-{min:02}-{ss:02}");
        let stem = path_buf
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_file_name = match path_buf.extension() {
            Some(ext) => format!("{stem}-{stamp}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{stamp}"),
        };
        path_buf.set_file_name(new_file_name);
        path_buf
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"))]
    ReadConfig { source: std::io::Error },
    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseConfig { source: serde_yaml::Error },
    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

pub trait ConfigRepr: Debug + Sized + Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadConfigSnafu)?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).context(ParseConfigSnafu)
    }

    /// Builds the configuration representation from the provided string of a yaml
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseConfigSnafu)
    }
}

pub(crate) fn maybe_julian_date_to_str<S>(
    jd: &Option<JulianDate>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match jd {
        Some(jd) if jd.days().is_finite() => {
            serializer.serialize_str(&format!("{}", jd.to_epoch()))
        }
        Some(jd) => serializer.serialize_f64(jd.days()),
        None => serializer.serialize_none(),
    }
}

/// A deserializer of an optional Julian Date, given either in days or as a UTC timestamp
pub(crate) fn maybe_julian_date_from_str<'de, D>(
    deserializer: D,
) -> Result<Option<JulianDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(DeserializeDerive)]
    #[serde(untagged)]
    enum JulianDateRepr {
        Days(f64),
        Timestamp(String),
    }

    match Option::<JulianDateRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(JulianDateRepr::Days(days)) if days.is_finite() => Ok(Some(JulianDate(days))),
        Some(JulianDateRepr::Days(days)) => Err(serde::de::Error::custom(format!(
            "{days} is not a finite number of Julian days"
        ))),
        Some(JulianDateRepr::Timestamp(s)) => JulianDate::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
