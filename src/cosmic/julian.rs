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

use crate::io::packed_epoch::{EpochError, NonFiniteSnafu};
use crate::time::Epoch;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A Julian Date in the UTC time scale, in days.
///
/// Element epochs and the propagation target are both expressed as `JulianDate`s so that the
/// elapsed time between them is a plain difference of days, matching the calendar-day arithmetic
/// of the packed epoch format (no leap seconds are ever inserted between two Julian Dates).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDate(pub f64);

impl JulianDate {
    /// Julian Date of the given hifitime epoch, in UTC.
    pub fn from_epoch(epoch: Epoch) -> Self {
        Self(epoch.to_jde_utc_days())
    }

    /// Returns the hifitime epoch of this UTC Julian Date.
    pub fn to_epoch(self) -> Epoch {
        Epoch::from_jde_utc(self.0)
    }

    /// Parses an ISO-8601 timestamp without any time zone, e.g. `2024-06-01T12:00:00`, and
    /// interprets it as UTC. A bare date (`2024-06-01`) is midnight of that day.
    pub fn from_iso_utc(timestamp: &str) -> Result<Self, EpochError> {
        let trimmed = timestamp.trim();
        let full = if trimmed.len() == 10 && !trimmed.contains('T') {
            format!("{trimmed}T00:00:00")
        } else {
            trimmed.to_string()
        };
        let epoch = Epoch::from_str(&full).map_err(|e| EpochError::InvalidTimestamp {
            input: timestamp.to_string(),
            details: e.to_string(),
        })?;
        Ok(Self::from_epoch(epoch))
    }

    /// Number of days
    pub fn days(self) -> f64 {
        self.0
    }
}

impl Sub for JulianDate {
    type Output = f64;

    /// Elapsed time between two Julian Dates, in days.
    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

impl Add<f64> for JulianDate {
    type Output = JulianDate;

    fn add(self, days: f64) -> JulianDate {
        JulianDate(self.0 + days)
    }
}

impl From<Epoch> for JulianDate {
    fn from(epoch: Epoch) -> Self {
        Self::from_epoch(epoch)
    }
}

impl FromStr for JulianDate {
    type Err = EpochError;

    /// Parses either a plain finite number of Julian days or an ISO-8601 UTC timestamp.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(days) => {
                ensure!(days.is_finite(), NonFiniteSnafu { code: s.trim() });
                Ok(Self(days))
            }
            Err(_) => Self::from_iso_utc(s),
        }
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "JD {:.6} ({})", self.0, self.to_epoch())
        } else {
            write!(f, "JD {}", self.0)
        }
    }
}
