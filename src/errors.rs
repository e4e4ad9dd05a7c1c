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

use crate::io::export::ExportError;
use crate::io::mpcorb::CatalogError;
use crate::io::packed_epoch::EpochError;
use crate::io::ConfigError;
use crate::propagators::PropagationError;
use crate::tools::kepler::KeplerError;
use snafu::prelude::*;

/// Top level error of the crate, wrapping the error of each stage of the pipeline.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PainterError {
    #[snafu(display("could not decode epoch: {source}"))]
    EpochDecoding { source: EpochError },
    #[snafu(display("Kepler solver failed: {source}"))]
    KeplerSolver { source: KeplerError },
    #[snafu(display("could not load catalog: {source}"))]
    CatalogLoading { source: CatalogError },
    #[snafu(display("propagation failed because {source}"))]
    Propagation { source: PropagationError },
    #[snafu(display("configuration error: {source}"))]
    Configuration { source: ConfigError },
    #[snafu(display("export failed: {source}"))]
    Exporting { source: ExportError },
}

impl From<EpochError> for PainterError {
    fn from(source: EpochError) -> Self {
        Self::EpochDecoding { source }
    }
}

impl From<KeplerError> for PainterError {
    fn from(source: KeplerError) -> Self {
        Self::KeplerSolver { source }
    }
}

impl From<CatalogError> for PainterError {
    fn from(source: CatalogError) -> Self {
        Self::CatalogLoading { source }
    }
}

impl From<PropagationError> for PainterError {
    fn from(source: PropagationError) -> Self {
        Self::Propagation { source }
    }
}

impl From<ConfigError> for PainterError {
    fn from(source: ConfigError) -> Self {
        Self::Configuration { source }
    }
}

impl From<ExportError> for PainterError {
    fn from(source: ExportError) -> Self {
        Self::Exporting { source }
    }
}
