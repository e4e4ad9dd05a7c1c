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

use super::ExportCfg;
use crate::cosmic::{DynamicalFamily, OrbitalElements};
use crate::propagators::PropagatedState;
use serde_derive::Serialize;
use snafu::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExportError {
    #[snafu(display(
        "{bodies} bodies but {states} propagated states and {labels} family labels"
    ))]
    Misaligned {
        bodies: usize,
        states: usize,
        labels: usize,
    },
    #[snafu(display("could not create {}: {source}", path.display()))]
    CreateFile { path: PathBuf, source: csv::Error },
    #[snafu(display("could not write CSV row: {source}"))]
    WriteRow { source: csv::Error },
    #[snafu(display("could not flush the CSV output: {source}"))]
    Flush { source: std::io::Error },
}

/// One row of the CSV export
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodyRow<'a> {
    pub designation: &'a str,
    pub family: DynamicalFamily,
    pub epoch_jd: f64,
    pub sma_au: f64,
    pub ecc: f64,
    pub perihelion_au: f64,
    pub x_au: f64,
    pub y_au: f64,
    pub radius_au: f64,
    pub true_anomaly_deg: f64,
}

/// Zips the population with its propagated states and family labels, keeping the rows selected by
/// the export configuration. The element epochs are those decoded during the propagation.
pub fn rows<'a>(
    bodies: &'a [OrbitalElements],
    states: &[PropagatedState],
    labels: &[DynamicalFamily],
    cfg: &ExportCfg,
) -> Result<Vec<BodyRow<'a>>, ExportError> {
    ensure!(
        bodies.len() == states.len() && bodies.len() == labels.len(),
        MisalignedSnafu {
            bodies: bodies.len(),
            states: states.len(),
            labels: labels.len()
        }
    );

    Ok(bodies
        .iter()
        .zip(states)
        .zip(labels)
        .filter(|((_, state), family)| cfg.includes(**family, state.x_au(), state.y_au()))
        .map(|((body, state), family)| BodyRow {
            designation: &body.designation,
            family: *family,
            epoch_jd: state.epoch.days(),
            sma_au: body.sma_au,
            ecc: body.ecc,
            perihelion_au: body.perihelion_au(),
            x_au: state.x_au(),
            y_au: state.y_au(),
            radius_au: state.radius_au,
            true_anomaly_deg: state.ta_rad.to_degrees(),
        })
        .collect())
}

fn write_rows<W: Write>(mut wtr: csv::Writer<W>, rows: &[BodyRow]) -> Result<usize, ExportError> {
    for row in rows {
        wtr.serialize(row).context(WriteRowSnafu)?;
    }
    wtr.flush().context(FlushSnafu)?;
    Ok(rows.len())
}

/// Writes the selected rows as CSV, with a header, and returns the number of rows written.
pub fn to_writer<W: Write>(
    writer: W,
    bodies: &[OrbitalElements],
    states: &[PropagatedState],
    labels: &[DynamicalFamily],
    cfg: &ExportCfg,
) -> Result<usize, ExportError> {
    let rows = rows(bodies, states, labels, cfg)?;
    write_rows(csv::Writer::from_writer(writer), &rows)
}

/// Writes the selected rows to a CSV file, timestamping the file name if configured, and returns the
/// path of the file.
pub fn to_csv<P: AsRef<Path>>(
    path: P,
    bodies: &[OrbitalElements],
    states: &[PropagatedState],
    labels: &[DynamicalFamily],
    cfg: &ExportCfg,
) -> Result<PathBuf, ExportError> {
    let path = cfg.actual_path(path);
    let rows = rows(bodies, states, labels, cfg)?;
    let wtr = csv::Writer::from_path(&path).context(CreateFileSnafu { path: &path })?;
    let count = write_rows(wtr, &rows)?;
    info!("Saved {count} bodies to {}", path.display());
    Ok(path)
}
