//-------------------------------------------------------------------//
//    eduPIC-CCP : 1d3v PIC/MCC benchmark driver for capacitively    //
//                 coupled radio-frequency helium discharges         //
//-------------------------------------------------------------------//
// Disclaimer: The eduPIC (educational Particle-in-Cell/Monte Carlo  //
// Collisions simulation code), Copyright (C) 2021                   //
// Zoltan Donko et al. is free software: you can redistribute it     //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use edupic_ccp::diagnostics::setup_events;
use edupic_ccp::{load_particle_data, RandomSource, RunConfig, Simulation};

/// Command-line arguments; values given here override the configuration file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run configuration file (.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Benchmark case (1-4)
    #[arg(long)]
    case: Option<u8>,

    /// Directory holding the cross section tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed of the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Number of time steps to run
    #[arg(long)]
    steps: Option<usize>,

    /// Number of trailing time steps to average
    #[arg(long)]
    avg_steps: Option<usize>,

    /// Continue from particle data saved by a previous run
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Save particle data at the end of the run
    #[arg(long)]
    checkpoint: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut RunConfig) {
        if let Some(case) = self.case { config.case = case; }
        if let Some(dir) = self.data_dir { config.data_dir = Some(dir); }
        if let Some(seed) = self.seed { config.seed = seed; }
        if let Some(steps) = self.steps { config.n_steps = Some(steps); }
        if let Some(avg_steps) = self.avg_steps { config.n_steps_avg = Some(avg_steps); }
        if let Some(checkpoint) = self.checkpoint { config.output.checkpoint = Some(checkpoint); }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!(">> eduPIC: starting...");

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let resume = args.resume.clone();
    args.apply(&mut config);
    config.validate()?;
    debug!("Run configuration: {:#?}", config);

    let parameters = config.parameters().context("invalid case parameters")?;
    let mut sim = Simulation::new(parameters, RandomSource::seeded(config.seed));
    if let Some(dir) = &config.data_dir {
        sim = sim.with_data_path(dir);
    }

    let mut steps_before = 0;
    if let Some(path) = &resume {
        let checkpoint = load_particle_data(path)
            .with_context(|| format!("cannot continue from '{}'", path.display()))?;
        steps_before = checkpoint.steps_done;
        sim = sim.resume_from(checkpoint);
    }

    let _average = setup_events(&mut sim, &config, steps_before);

    let start = Instant::now();
    sim.run()?;
    info!(
        ">> eduPIC: simulation of {} step(s) is completed lasting {:.3} sec.",
        sim.parameters().n_steps(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
