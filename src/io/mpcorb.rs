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

use crate::cosmic::{OrbitalElements, Population};
use flate2::read::GzDecoder;
use snafu::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Range;
use std::path::{Path, PathBuf};

// Byte columns of the fixed-width MPCORB records
const DESIGNATION: Range<usize> = 0..7;
const EPOCH: Range<usize> = 20..25;
const MEAN_ANOMALY: Range<usize> = 26..35;
const ARG_PERIHELION: Range<usize> = 37..46;
const ASC_NODE: Range<usize> = 48..57;
const INCLINATION: Range<usize> = 59..68;
const ECCENTRICITY: Range<usize> = 70..79;
const MEAN_MOTION: Range<usize> = 80..91;
const SEMI_MAJOR_AXIS: Range<usize> = 92..103;

/// Minimum length of a record, up to the end of the semi-major axis
pub const MIN_RECORD_LEN: usize = SEMI_MAJOR_AXIS.end;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CatalogError {
    #[snafu(display("could not open catalog {}: {source}", path.display()))]
    OpenCatalog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("could not read line {line} of the catalog: {source}"))]
    ReadLine {
        line: usize,
        source: std::io::Error,
    },
    #[snafu(display("no line starting with `---` ends the catalog header"))]
    MissingHeader,
    #[snafu(display("line {line} is {len} bytes long but records span at least {MIN_RECORD_LEN} bytes"))]
    ShortRecord { line: usize, len: usize },
    #[snafu(display("line {line}: invalid {field} `{text}`"))]
    InvalidField {
        line: usize,
        field: &'static str,
        text: String,
    },
}

impl PartialEq for CatalogError {
    /// I/O errors never match
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingHeader, Self::MissingHeader) => true,
            (
                Self::ShortRecord { line, len },
                Self::ShortRecord {
                    line: other_line,
                    len: other_len,
                },
            ) => line == other_line && len == other_len,
            (
                Self::InvalidField { line, field, text },
                Self::InvalidField {
                    line: other_line,
                    field: other_field,
                    text: other_text,
                },
            ) => line == other_line && field == other_field && text == other_text,
            _ => false,
        }
    }
}

/// Loads at most `limit` minor planets from an MPCORB file, gzipped if its extension is `gz`.
pub fn load_mpcorb<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<Population, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).context(OpenCatalogSnafu { path })?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        debug!("decompressing {}", path.display());
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let population = parse_mpcorb(BufReader::new(reader), limit)?;
    info!(
        "Loaded {} minor planets from {}",
        population.len(),
        path.display()
    );
    Ok(population)
}

/// Parses an MPCORB stream: the header is skipped up to and including the first line starting
/// with `---`, then each non-blank line is a fixed-width record. Reading stops after `limit`
/// records, if provided.
pub fn parse_mpcorb<R: BufRead>(reader: R, limit: Option<usize>) -> Result<Population, CatalogError> {
    let mut lines = reader.lines().enumerate();

    let mut header_len = None;
    for (idx, line) in lines.by_ref() {
        let line = line.context(ReadLineSnafu { line: idx + 1 })?;
        if line.starts_with("---") {
            header_len = Some(idx + 1);
            break;
        }
    }
    let header_len = header_len.context(MissingHeaderSnafu)?;
    trace!("skipped {header_len} header lines");

    let mut bodies = Vec::new();
    for (idx, line) in lines {
        if limit.is_some_and(|limit| bodies.len() >= limit) {
            break;
        }
        let line = line.context(ReadLineSnafu { line: idx + 1 })?;
        if line.trim().is_empty() {
            continue;
        }
        bodies.push(parse_record(idx + 1, &line)?);
    }

    if bodies.is_empty() {
        warn!("no minor planet found after the catalog header");
    }
    Ok(Population::new(bodies))
}

/// Parses an MPCORB catalog held in memory.
pub fn parse_str(data: &str, limit: Option<usize>) -> Result<Population, CatalogError> {
    parse_mpcorb(data.as_bytes(), limit)
}

/// Parses one fixed-width record, `line` is only used in errors.
pub fn parse_record(line: usize, record: &str) -> Result<OrbitalElements, CatalogError> {
    ensure!(
        record.len() >= MIN_RECORD_LEN,
        ShortRecordSnafu {
            line,
            len: record.len()
        }
    );

    Ok(OrbitalElements::from_degrees(
        column(line, record, DESIGNATION, "designation")?,
        column(line, record, EPOCH, "epoch")?,
        number(line, record, MEAN_ANOMALY, "mean anomaly")?,
        number(line, record, ARG_PERIHELION, "argument of perihelion")?,
        number(line, record, ASC_NODE, "longitude of the ascending node")?,
        number(line, record, INCLINATION, "inclination")?,
        number(line, record, ECCENTRICITY, "eccentricity")?,
        number(line, record, MEAN_MOTION, "mean daily motion")?,
        number(line, record, SEMI_MAJOR_AXIS, "semi-major axis")?,
    ))
}

fn column<'a>(
    line: usize,
    record: &'a str,
    cols: Range<usize>,
    field: &'static str,
) -> Result<&'a str, CatalogError> {
    // Non-ASCII content would make the byte slicing fall within a character
    record
        .get(cols)
        .map(str::trim)
        .context(InvalidFieldSnafu {
            line,
            field,
            text: record,
        })
}

fn number(
    line: usize,
    record: &str,
    cols: Range<usize>,
    field: &'static str,
) -> Result<f64, CatalogError> {
    let text = column(line, record, cols, field)?;
    text.parse::<f64>()
        .ok()
        .context(InvalidFieldSnafu { line, field, text })
}
