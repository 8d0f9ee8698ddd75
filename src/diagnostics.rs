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

//! Diagnostic actions attached to the simulation events.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::time::Instant;

use log::{debug, error, info};

use crate::checkpoint::save_particle_data;
use crate::config::RunConfig;
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::grid::AverageGrid;
use crate::simulation::{Simulation, State};

/// Logs the start of the run with a summary of the parameters.
pub struct StartBanner;

impl EventAction for StartBanner {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        let par = state.parameters;
        info!(">> eduPIC: **************************************************************************");
        info!(">> eduPIC: This program comes with ABSOLUTELY NO WARRANTY");
        info!(">> eduPIC: according to the GNU General Public License, https://www.gnu.org/licenses/");
        info!(">> eduPIC: **************************************************************************");
        info!(
            ">> eduPIC: nx = {}, dx = {:.4e} m, dt = {:.4e} s, ng = {:.3e} m^-3, V0 = {} V, f = {:.3e} Hz",
            par.nx(), par.dx(), par.dt(), par.ng(), par.volt(), par.f()
        );
        info!(
            ">> eduPIC: {} steps ({} averaged), weight = {:.4e}, #e = {}, #i = {}",
            par.n_steps(), par.n_steps_avg(), par.particle_weight(), state.electrons.len(), state.ions.len()
        );
        Ok(())
    }
}

/// Logs the progress of the run every `interval` steps.
pub struct ProgressReporter {
    interval: usize,
    baseline: Option<(Instant, usize)>,
}

impl ProgressReporter {
    pub fn new(interval: usize) -> Self {
        ProgressReporter { interval: interval.max(1), baseline: None }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        ProgressReporter::new(1000)
    }
}

// steps completed after the step with index `step`, and their share of the run [%]
fn progress(step: usize, n_steps: usize) -> (usize, f64) {
    let done = step + 1;
    (done, 100.0 * done as f64 / n_steps.max(1) as f64)
}

impl EventAction for ProgressReporter {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        let (since, base_step) = match self.baseline {
            Some(baseline) if state.step != 0 => baseline,
            _ => {
                self.baseline = Some((Instant::now(), state.step));
                return Ok(());
            }
        };
        let n_steps = state.parameters.n_steps();
        let (done, percent) = progress(state.step, n_steps);
        if done % self.interval != 0 {
            return Ok(());
        }

        let steps = (state.step - base_step).max(1) as f64;
        let elapsed = since.elapsed().as_secs_f64();
        let n_particles = (state.electrons.len() + state.ions.len()).max(1) as f64;
        info!(
            ">> eduPIC: step {} / {} ({:.1} %), {:.3} ms/step, {:.2} ns/particle, #e = {}, #i = {}",
            done,
            n_steps,
            percent,
            1.0e3 * elapsed / steps,
            1.0e9 * elapsed / (steps * n_particles),
            state.electrons.len(),
            state.ions.len()
        );
        self.baseline = Some((Instant::now(), state.step));
        Ok(())
    }
}

/// Running average of the electron and ion counts on the grid over the
/// last `n_steps_avg` steps of the run.
pub struct AverageFieldAction {
    electrons: AverageGrid,
    ions: AverageGrid,
}

impl AverageFieldAction {
    pub fn new(nx: usize) -> Self {
        AverageFieldAction { electrons: AverageGrid::new(nx), ions: AverageGrid::new(nx) }
    }

    pub fn electron_mean(&self) -> &[f64] { self.electrons.get() }
    pub fn ion_mean(&self) -> &[f64] { self.ions.get() }
    pub fn samples(&self) -> usize { self.electrons.samples() }
}

impl EventAction for AverageFieldAction {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        if state.parameters.in_averaging_window(state.step) {
            self.electrons.add(state.electron_density);
            self.ions.add(state.ion_density);
        }
        Ok(())
    }
}

/// Converts grid counts to a density [m^-3].
pub fn count_to_density(counts: &[f64], particle_weight: f64, dx: f64) -> Vec<f64> {
    let factor = particle_weight / dx;
    counts.iter().map(|c| c * factor).collect()
}

// one value per line
fn save_vec(path: &Path, values: &[f64]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for v in values {
        writeln!(file, "{:1.6e}", v)?;
    }
    file.flush()
}

/// Writes the averaged electron and ion densities at the end of the run.
///
/// Holds only a weak reference to the accumulator; if it has been dropped
/// nothing is written. Write failures are logged, not returned.
pub struct SaveDensityAction {
    average: Weak<RefCell<AverageFieldAction>>,
    electron_path: PathBuf,
    ion_path: PathBuf,
}

impl SaveDensityAction {
    pub fn new(
        average: Weak<RefCell<AverageFieldAction>>,
        electron_path: PathBuf,
        ion_path: PathBuf,
    ) -> Self {
        SaveDensityAction { average, electron_path, ion_path }
    }
}

impl EventAction for SaveDensityAction {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        let average = match self.average.upgrade() {
            Some(average) => average,
            None => {
                debug!(">> eduPIC: density accumulator is gone, nothing to save");
                return Ok(());
            }
        };
        let average = average.borrow();
        let w = state.parameters.particle_weight();
        let dx = state.parameters.dx();

        let outputs = [
            (&self.electron_path, average.electron_mean()),
            (&self.ion_path,      average.ion_mean()),
        ];
        for (path, mean) in outputs {
            info!(">> eduPIC: saving {}", path.display());
            save_vec(path, &count_to_density(mean, w, dx))
                .map_err(|err| error!(">> eduPIC: cannot write {}: {}", path.display(), err))
                .ok();
        }
        Ok(())
    }
}

/// Appends `step #e #i` to a log file every `interval` steps.
pub struct ConvergenceLogAction {
    path: PathBuf,
    interval: usize,
    file: Option<File>,
}

impl ConvergenceLogAction {
    pub fn new(path: PathBuf, interval: usize) -> Self {
        ConvergenceLogAction { path, interval: interval.max(1), file: None }
    }

    fn append(&mut self, step: usize, electrons: usize, ions: usize) -> std::io::Result<()> {
        if self.file.is_none() {
            self.file = Some(OpenOptions::new().append(true).create(true).open(&self.path)?);
        }
        match self.file.as_mut() {
            Some(file) => writeln!(file, "{:10}   {:10}   {:10}", step, electrons, ions),
            None => Ok(()),
        }
    }
}

impl EventAction for ConvergenceLogAction {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        if state.step % self.interval == 0 {
            self.append(state.step, state.electrons.len(), state.ions.len())
                .map_err(|err| error!(">> eduPIC: cannot write {}: {}", self.path.display(), err))
                .ok();
        }
        Ok(())
    }
}

/// Saves the particle data at the end of the run so it can be continued.
pub struct CheckpointAction {
    path: PathBuf,
    steps_before: usize,
}

impl CheckpointAction {
    /// `steps_before` is the number of steps done by the runs this one continues.
    pub fn new(path: PathBuf, steps_before: usize) -> Self {
        CheckpointAction { path, steps_before }
    }
}

impl EventAction for CheckpointAction {
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        let steps_done = self.steps_before + state.step;
        info!(">> eduPIC: saving particle data after {} steps to {}", steps_done, self.path.display());
        save_particle_data(&self.path, steps_done, state.electrons.particles(), state.ions.particles())
    }
}

/// Registers the standard diagnostics of a run and returns the density accumulator.
pub fn setup_events(
    sim: &mut Simulation,
    config: &RunConfig,
    steps_before: usize,
) -> Rc<RefCell<AverageFieldAction>> {
    let nx = sim.parameters().nx();
    let output = &config.output;
    let events = sim.events();

    events.add_action(Event::Start, StartBanner);
    events.add_action(Event::Step, ProgressReporter::new(output.report_interval));
    let average = events.add_action(Event::Step, AverageFieldAction::new(nx));
    if let Some(conv_file) = &output.conv_file {
        let conv_log = ConvergenceLogAction::new(output.path_of(conv_file), output.conv_interval);
        events.add_action(Event::Step, conv_log);
    }

    events.add_action(
        Event::End,
        SaveDensityAction::new(
            Rc::downgrade(&average),
            output.path_of(&output.density_e),
            output.path_of(&output.density_i),
        ),
    );
    if let Some(checkpoint) = &output.checkpoint {
        events.add_action(Event::End, CheckpointAction::new(output.path_of(checkpoint), steps_before));
    }
    average
}
