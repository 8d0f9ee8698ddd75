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

use serde::{Deserialize, Serialize};

use crate::constants::K_BOLTZMANN;
use crate::random::RandomSource;

/// Coordinates of a macro-particle: one spatial, three velocity components.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl Particle {
    #[inline]
    pub fn v_sqr(&self) -> f64 {
        self.vx * self.vx + self.vy * self.vy + self.vz * self.vz
    }
}

/// Ensemble of macro-particles of one charged species.
///
/// `efield` holds the electric field interpolated to each particle and is
/// refreshed every step before the push.
#[derive(Debug, Clone)]
pub struct ChargedSpecies {
    charge: f64,
    mass: f64,
    particles: Vec<Particle>,
    efield: Vec<f64>,
}

/// Number of particles removed at each electrode by one boundary pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Absorbed {
    pub lower: usize,
    pub upper: usize,
}

impl ChargedSpecies {
    pub fn new(charge: f64, mass: f64) -> Self {
        ChargedSpecies { charge, mass, particles: Vec::new(), efield: Vec::new() }
    }

    pub fn charge(&self) -> f64 { self.charge }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn efield(&self) -> &[f64] { &self.efield }

    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> { &mut self.particles }

    pub(crate) fn split_for_interpolation(&mut self) -> (&[Particle], &mut Vec<f64>) {
        (&self.particles, &mut self.efield)
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn replace(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
        self.efield.clear();
    }

    /// Adds `np` particles placed uniformly on [0, length) with velocities
    /// drawn from a Maxwellian at `temperature`.
    pub fn add_maxwellian(&mut self, np: usize, temperature: f64, length: f64, rng: &mut RandomSource) {
        let vth = (K_BOLTZMANN * temperature / self.mass).sqrt();
        self.particles.reserve(np);
        for _ in 0..np {
            let x = length * rng.uniform();
            let p0 = Particle {
                x,
                vx: rng.normal(0.0, vth),
                vy: rng.normal(0.0, vth),
                vz: rng.normal(0.0, vth),
            };
            self.particles.push(p0);
        }
    }
}

//----------------------------------------------------------------------//
// move particles in E-field                                            //
//----------------------------------------------------------------------//

/// Leapfrog step: accelerates with the interpolated field, then drifts.
pub fn move_particles(species: &mut ChargedSpecies, dt: f64) {
    let factor = dt / species.mass * species.charge;
    debug_assert_eq!(species.efield.len(), species.particles.len());
    for (part, e_x) in species.particles.iter_mut().zip(species.efield.iter()) {
        part.vx += e_x * factor;
        part.x  += part.vx * dt;
    }
}

//----------------------------------------------------------------------
// manage surface processes (absorption)
//----------------------------------------------------------------------

/// Removes particles outside [lower, upper]. Order is not preserved.
pub fn apply_absorbing_boundary(species: &mut ChargedSpecies, lower: f64, upper: f64) -> Absorbed {
    let mut absorbed = Absorbed::default();
    let particles = &mut species.particles;
    let mut ind: usize = 0;
    while ind < particles.len() {
        let x = particles[ind].x;
        if x < lower {
            absorbed.lower += 1;
            particles.swap_remove(ind);
        } else if x > upper {
            absorbed.upper += 1;
            particles.swap_remove(ind);
        } else {
            ind += 1;
        }
    }
    species.efield.truncate(particles.len());
    absorbed
}
