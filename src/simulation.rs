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

use log::{info, warn};

use crate::checkpoint::Checkpoint;
use crate::collisions::{load_electron_reactions, load_ion_reactions, ReactionSet};
use crate::constants::{E_CHARGE, TWO_PI};
use crate::error::{Result, SimError};
use crate::events::{Event, EventBus};
use crate::field::{charge_density, PoissonSolver};
use crate::grid::{field_at_particles, weight_to_grid};
use crate::parameters::Parameters;
use crate::particles::{apply_absorbing_boundary, move_particles, Absorbed, ChargedSpecies};
use crate::random::RandomSource;

/// Instantaneous voltage of the driven electrode at time step `step`.
#[inline]
pub fn drive_voltage(parameters: &Parameters, step: usize) -> f64 {
    parameters.volt() * (TWO_PI * parameters.f() * parameters.dt() * step as f64).sin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Running,
    Completed,
}

/// Running totals of particle losses and collision events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub electron_collisions: u64,
    pub ion_collisions: u64,
    pub electrons_absorbed: [u64; 2],   // [grounded (x = 0), powered (x = l)]
    pub ions_absorbed: [u64; 2],
}

impl Counters {
    fn absorb(total: &mut [u64; 2], absorbed: Absorbed) {
        total[0] += absorbed.lower as u64;
        total[1] += absorbed.upper as u64;
    }
}

/// Read-only view of the simulation handed to event actions.
pub struct State<'a> {
    pub step: usize,
    pub parameters: &'a Parameters,
    pub electrons: &'a ChargedSpecies,
    pub ions: &'a ChargedSpecies,
    pub electron_density: &'a [f64],
    pub ion_density: &'a [f64],
    pub rho: &'a [f64],
    pub phi: &'a [f64],
    pub efield: &'a [f64],
    pub counters: &'a Counters,
}

pub struct Simulation {
    parameters: Parameters,
    rng: RandomSource,
    data_path: Option<PathBuf>,
    resume: Option<Checkpoint>,
    events: EventBus,
    phase: Phase,
    step: usize,

    electrons: ChargedSpecies,
    ions: ChargedSpecies,

    electron_density: Vec<f64>,
    ion_density: Vec<f64>,
    rho: Vec<f64>,
    phi: Vec<f64>,
    efield: Vec<f64>,

    counters: Counters,
}

impl Simulation {
    pub fn new(parameters: Parameters, rng: RandomSource) -> Self {
        let electrons = ChargedSpecies::new(-E_CHARGE, parameters.m_e());
        let ions = ChargedSpecies::new(E_CHARGE, parameters.m_ion());
        Simulation {
            parameters,
            rng,
            data_path: None,
            resume: None,
            events: EventBus::new(),
            phase: Phase::Uninitialized,
            step: 0,
            electrons,
            ions,
            electron_density: Vec::new(),
            ion_density: Vec::new(),
            rho: Vec::new(),
            phi: Vec::new(),
            efield: Vec::new(),
            counters: Counters::default(),
        }
    }

    /// Directory of the cross section tables. Without it the run is collisionless.
    pub fn with_data_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Starts from the particles of a previous run instead of a fresh Maxwellian load.
    pub fn resume_from(mut self, checkpoint: Checkpoint) -> Self {
        self.resume = Some(checkpoint);
        self
    }

    pub fn parameters(&self) -> &Parameters { &self.parameters }
    pub fn events(&mut self) -> &mut EventBus { &mut self.events }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn step(&self) -> usize { self.step }
    pub fn counters(&self) -> &Counters { &self.counters }

    pub fn state(&self) -> State<'_> {
        State {
            step: self.step,
            parameters: &self.parameters,
            electrons: &self.electrons,
            ions: &self.ions,
            electron_density: &self.electron_density,
            ion_density: &self.ion_density,
            rho: &self.rho,
            phi: &self.phi,
            efield: &self.efield,
            counters: &self.counters,
        }
    }

    /// Runs all `n_steps` time steps. Can be called once.
    pub fn run(&mut self) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(SimError::AlreadyRun);
        }

        let (mut electron_collisions, mut ion_collisions) = self.load_collisions()?;
        self.set_initial_conditions();
        self.phase = Phase::Initialized;

        let mut poisson_solver = PoissonSolver::new(self.parameters.nx(), self.parameters.dx());

        self.events.publish(Event::Start, &self.state())?;

        info!(">> eduPIC: starting main loop, {} steps...", self.parameters.n_steps());
        self.phase = Phase::Running;
        for i in 0..self.parameters.n_steps() {
            self.step = i;
            self.advance(i, &mut poisson_solver, &mut electron_collisions, &mut ion_collisions);
            self.events.publish(Event::Step, &self.state())?;
        }
        self.step = self.parameters.n_steps();

        info!(
            ">> eduPIC: main loop completed, #e = {}, #i = {}, collisions e/i = {}/{}",
            self.electrons.len(),
            self.ions.len(),
            self.counters.electron_collisions,
            self.counters.ion_collisions
        );
        self.events.publish(Event::End, &self.state())?;
        self.phase = Phase::Completed;
        Ok(())
    }

    // one time step, the order of the sub-steps is fixed
    fn advance(
        &mut self,
        i: usize,
        poisson_solver: &mut PoissonSolver,
        electron_collisions: &mut ReactionSet,
        ion_collisions: &mut ReactionSet,
    ) {
        let par = &self.parameters;
        let dx = par.dx();

        weight_to_grid(&self.electrons, dx, &mut self.electron_density);
        weight_to_grid(&self.ions, dx, &mut self.ion_density);
        charge_density(par.particle_weight(), dx, &self.ion_density, &self.electron_density, &mut self.rho);

        let vc = drive_voltage(par, i);
        poisson_solver.solve(&self.rho, &mut self.phi, 0.0, vc);
        poisson_solver.efield(&self.phi, &self.rho, &mut self.efield);

        field_at_particles(&self.efield, dx, &mut self.electrons);
        field_at_particles(&self.efield, dx, &mut self.ions);

        move_particles(&mut self.electrons, par.dt());
        move_particles(&mut self.ions, par.dt());

        let absorbed = apply_absorbing_boundary(&mut self.electrons, 0.0, par.l());
        Counters::absorb(&mut self.counters.electrons_absorbed, absorbed);
        let absorbed = apply_absorbing_boundary(&mut self.ions, 0.0, par.l());
        Counters::absorb(&mut self.counters.ions_absorbed, absorbed);

        // ions created by ionization in this step do not collide until the next one
        let n_ions = self.ions.len();
        self.counters.electron_collisions +=
            electron_collisions.react_all(&mut self.electrons, Some(&mut self.ions), &mut self.rng);
        self.counters.ion_collisions +=
            ion_collisions.react_first(n_ions, &mut self.ions, None, &mut self.rng);
    }

    fn load_collisions(&self) -> Result<(ReactionSet, ReactionSet)> {
        match &self.data_path {
            Some(dir) => Ok((
                load_electron_reactions(dir, &self.parameters)?,
                load_ion_reactions(dir, &self.parameters)?,
            )),
            None => {
                warn!(">> eduPIC: no cross section directory given, running without collisions");
                let dt = self.parameters.dt();
                Ok((ReactionSet::empty(dt), ReactionSet::empty(dt)))
            }
        }
    }

    fn set_initial_conditions(&mut self) {
        let par = &self.parameters;
        let nx = par.nx();

        match self.resume.take() {
            Some(checkpoint) => {
                info!(
                    ">> eduPIC: continuing from {} steps, #e = {}, #i = {}",
                    checkpoint.steps_done,
                    checkpoint.electrons.len(),
                    checkpoint.ions.len()
                );
                self.electrons.replace(checkpoint.electrons);
                self.ions.replace(checkpoint.ions);
            }
            None => {
                self.electrons.add_maxwellian(par.n_initial(), par.te(), par.l(), &mut self.rng);
                self.ions.add_maxwellian(par.n_initial(), par.ti(), par.l(), &mut self.rng);
            }
        }

        self.electron_density = vec![0.0; nx];
        self.ion_density = vec![0.0; nx];
        self.rho = vec![0.0; nx];
        self.phi = vec![0.0; nx];
        self.efield = vec![0.0; nx];
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{BenchmarkCase, Inputs};
    use approx::assert_relative_eq;

    fn inputs(n_steps: usize) -> Inputs {
        let mut inputs = BenchmarkCase::One.inputs();
        inputs.nx = 5;
        inputs.n_steps = n_steps;
        inputs.n_steps_avg = n_steps;
        inputs
    }

    #[test]
    fn test_drive_voltage() {
        let p = BenchmarkCase::One.parameters().unwrap();
        assert_eq!(drive_voltage(&p, 0), 0.0);
        // 400 steps per period: quarter period is the maximum
        assert_relative_eq!(drive_voltage(&p, 100), 450.0, max_relative = 1e-12);
        for i in [1usize, 17, 250, 399, 12_345].iter() {
            let expected = 450.0 * (2.0 * std::f64::consts::PI * 13.56e6 * p.dt() * *i as f64).sin();
            assert_relative_eq!(drive_voltage(&p, *i), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_run_twice_rejected() {
        let mut inputs = inputs(2);
        inputs.n_initial = Some(0);
        let mut sim = Simulation::new(Parameters::new(inputs).unwrap(), RandomSource::seeded(1));
        assert_eq!(sim.phase(), Phase::Uninitialized);
        sim.run().unwrap();
        assert_eq!(sim.phase(), Phase::Completed);
        assert_eq!(sim.step(), 2);
        assert!(matches!(sim.run(), Err(SimError::AlreadyRun)));
    }

    #[test]
    fn test_missing_data_directory_fails_before_start() {
        let mut inputs = inputs(2);
        inputs.n_initial = Some(0);
        let mut sim = Simulation::new(Parameters::new(inputs).unwrap(), RandomSource::seeded(1))
            .with_data_path("/nonexistent/cross/sections");
        let started = std::rc::Rc::new(std::cell::Cell::new(false));
        let flag = started.clone();
        sim.events().add_action(
            Event::Start,
            crate::events::action(move |_| {
                flag.set(true);
                Ok(())
            }),
        );

        assert!(matches!(sim.run(), Err(SimError::CrossSectionRead { .. })));
        assert!(!started.get());
    }

    #[test]
    fn test_collisionless_run_loses_particles_only_at_walls() {
        let mut inputs = inputs(50);
        inputs.ppc = 100;
        let mut sim = Simulation::new(Parameters::new(inputs).unwrap(), RandomSource::seeded(9));
        sim.run().unwrap();

        let c = *sim.counters();
        let n_initial = 400u64;
        assert_eq!(c.electron_collisions, 0);
        assert_eq!(c.ion_collisions, 0);
        let state = sim.state();
        let electrons_lost = c.electrons_absorbed[0] + c.electrons_absorbed[1];
        let ions_lost = c.ions_absorbed[0] + c.ions_absorbed[1];
        assert_eq!(state.electrons.len() as u64 + electrons_lost, n_initial);
        assert_eq!(state.ions.len() as u64 + ions_lost, n_initial);
        assert!(state.electrons.particles().iter().all(|p| p.x >= 0.0 && p.x <= state.parameters.l()));
    }

    #[test]
    fn test_resume_uses_checkpoint_particles() {
        use crate::particles::Particle;
        let mut inputs = inputs(1);
        inputs.volt = 0.0;
        let p = Particle { x: 0.03, vx: 0.0, vy: 0.0, vz: 0.0 };
        let checkpoint = Checkpoint { steps_done: 10, electrons: vec![p, p], ions: vec![p, p] };
        let mut sim = Simulation::new(Parameters::new(inputs).unwrap(), RandomSource::seeded(1))
            .resume_from(checkpoint);
        sim.run().unwrap();

        assert_eq!(sim.state().electrons.len(), 2);
        assert_eq!(sim.state().ions.len(), 2);
    }
}
