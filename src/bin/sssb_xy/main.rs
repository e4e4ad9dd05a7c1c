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

extern crate clap;
extern crate dialoguer;
extern crate indicatif;
extern crate log;
extern crate minor_planet_painter as mpp;
extern crate pretty_env_logger;

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use mpp::cosmic::{Ephemeris, EpochSpan, FamilyClassifier, MeanElementsEphemeris};
use mpp::io::config::PainterConfig;
use mpp::io::mpcorb::load_mpcorb;
use mpp::io::{export, ConfigError, ConfigRepr};
use mpp::propagators::KeplerPropagator;
use mpp::{JulianDate, PainterError};
use std::env::{set_var, var};
use std::path::PathBuf;
use std::time::Duration;

const LOG_VAR: &str = "SSSB_LOG";

/// Heliocentric snapshot of the minor planets and their dynamical families at a given epoch.
#[derive(Parser, Debug)]
#[command(name = "sssb_xy", version, about)]
struct Cli {
    /// Target epoch, a UTC timestamp such as 2024-06-01T00:00:00, or a Julian Date
    epoch: Option<String>,
    /// Only read this many bodies from the catalog
    #[arg(long)]
    nobj: Option<usize>,
    /// Half-width of the snapshot window, in AU
    #[arg(long)]
    range: Option<f64>,
    /// Path to MPCORB.DAT (or MPCORB.DAT.gz)
    #[arg(long)]
    mpcorb: Option<PathBuf>,
    /// Path of the CSV export
    #[arg(long)]
    out: Option<PathBuf>,
    /// YAML configuration, overridden by the other arguments
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of Newton-Raphson iterations on Kepler's equation
    #[arg(long)]
    iterations: Option<usize>,
    /// Save the CSV export without asking
    #[arg(short, long)]
    yes: bool,
}

impl Cli {
    /// Builds the run configuration from the optional YAML file and the command line overrides.
    fn painter_config(&self) -> Result<PainterConfig, PainterError> {
        let mut cfg = match &self.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                PainterConfig::load(path)?
            }
            None => PainterConfig::default(),
        };
        if let Some(epoch) = &self.epoch {
            cfg.epoch = Some(epoch.parse::<JulianDate>()?);
        }
        if let Some(nobj) = self.nobj {
            cfg.max_bodies = Some(nobj);
        }
        if let Some(range) = self.range {
            cfg.range_au = range;
        }
        if let Some(mpcorb) = &self.mpcorb {
            cfg.catalog = Some(mpcorb.clone());
        }
        if let Some(out) = &self.out {
            cfg.output = out.clone();
        }
        if let Some(iterations) = self.iterations {
            cfg.kepler.iterations = iterations;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<(), PainterError> {
    let cli = Cli::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let cfg = cli.painter_config()?;
    let target = cfg.target_epoch()?;
    let catalog = cfg
        .catalog
        .clone()
        .unwrap_or_else(|| PathBuf::from("MPCORB.DAT"));

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Reading {}", catalog.display()));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let loaded = load_mpcorb(&catalog, cfg.max_bodies);
    spinner.finish_and_clear();
    let population = loaded?;

    info!("{} minor planets", population.len());
    if population.is_empty() {
        error!("no minor planet to propagate");
        return Err(ConfigError::InvalidConfig {
            msg: format!("{} holds no minor planet", catalog.display()),
        }
        .into());
    }

    info!("Propagating to {target} ({})", cfg.kepler);
    let states = KeplerPropagator::new(cfg.kepler).propagate(population.as_slice(), target)?;
    if let Some(span) = EpochSpan::of(states.iter().map(|state| state.epoch)) {
        info!("earliest element epoch: {}", span.earliest);
        info!("latest element epoch:   {}", span.latest);
    }

    let classifier = FamilyClassifier::new(cfg.families);
    let classification = classifier.classify(population.as_slice());
    for (family, count) in classification.census.iter() {
        info!("{:<40} {count}", classifier.criteria.description(family));
    }
    let in_window = states.iter().filter(|s| s.is_within(cfg.range_au)).count();
    info!(
        "{in_window} of {} bodies within +/- {} AU",
        population.len(),
        cfg.range_au
    );

    match MeanElementsEphemeris::default().positions_au(target) {
        Ok(positions) => {
            for (planet, pos) in positions {
                info!(
                    "{planet:<8} x = {:>9.4} AU  y = {:>9.4} AU",
                    pos[0], pos[1]
                );
            }
        }
        Err(e) => match e {},
    }

    let save = cli.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Save positions to {}?", cfg.output.display()))
            .default(true)
            .interact()
            .unwrap_or(false);

    if save {
        export::to_csv(
            &cfg.output,
            population.as_slice(),
            &states,
            &classification.labels,
            &cfg.export,
        )?;
    }

    Ok(())
}
