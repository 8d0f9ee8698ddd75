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

use crate::collisions::cross_section::CrossSection;
use crate::constants::{EV_TO_J, K_BOLTZMANN, PI, TWO_PI};
use crate::particles::{ChargedSpecies, Particle};
use crate::random::RandomSource;

/// Collision channels with their scattering kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    ElectronElastic,        // isotropic elastic scattering
    ElectronExcitation,     // isotropic scattering with threshold energy loss
    ElectronIonization,     // creates an electron / ion pair
    IonIsotropic,           // isotropic elastic scattering in the center of mass frame
    IonBackscatter,         // charge exchange: backward scattering in the center of mass frame
}

#[derive(Debug, Clone)]
pub struct Reaction {
    pub kind: ReactionKind,
    pub cross_section: CrossSection,
}

impl Reaction {
    pub fn new(kind: ReactionKind, cross_section: CrossSection) -> Self {
        Reaction { kind, cross_section }
    }
}

/// How the target velocity enters the relative velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDynamics {
    FastProjectile,   // cold gas approximation, target at rest
    SlowProjectile,   // target velocity sampled from the gas Maxwellian
}

/// Spatially uniform, time independent background gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticUniformTarget {
    pub density: f64,       // [m^-3]
    pub temperature: f64,   // [K]
    pub mass: f64,          // [kg]
}

impl StaticUniformTarget {
    fn sample_velocity(&self, rng: &mut RandomSource) -> [f64; 3] {
        let vth = (K_BOLTZMANN * self.temperature / self.mass).sqrt();
        [rng.normal(0.0, vth), rng.normal(0.0, vth), rng.normal(0.0, vth)]
    }
}

/// Monte Carlo collision handler for one projectile species against the
/// background gas.
pub struct ReactionSet {
    reactions: Vec<Reaction>,
    target: StaticUniformTarget,
    dynamics: RelativeDynamics,
    dt: f64,
    sigma: Vec<f64>,
}

// rotates the relative velocity `g` to magnitude `g_new`, scattering angle `chi`
// and azimuth `eta` with respect to the original direction
fn scatter(g: [f64; 3], g_new: f64, chi: f64, eta: f64) -> [f64; 3] {
    let [gx, gy, gz] = g;

    // find Euler angles:
    let theta = if gx == 0.0 { 0.5 * PI } else { (gy * gy + gz * gz).sqrt().atan2(gx) };
    let phi = if gy == 0.0 {
        if gz > 0.0 { 0.5 * PI } else { -0.5 * PI }
    } else {
        gz.atan2(gy)
    };

    let (sc, cc) = chi.sin_cos();
    let (se, ce) = eta.sin_cos();
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();

    [
        g_new * (ct * cc - st * sc * ce),
        g_new * (st * cp * cc + ct * cp * sc * ce - sp * sc * se),
        g_new * (st * sp * cc + ct * sp * sc * ce + cp * sc * se),
    ]
}

#[inline]
fn isotropic_chi(rng: &mut RandomSource) -> f64 {
    (1.0 - 2.0 * rng.uniform()).acos()
}

impl ReactionSet {
    pub fn new(
        reactions: Vec<Reaction>,
        target: StaticUniformTarget,
        dynamics: RelativeDynamics,
        dt: f64,
    ) -> Self {
        let sigma = vec![0.0; reactions.len()];
        ReactionSet { reactions, target, dynamics, dt, sigma }
    }

    /// A set without reaction channels; `react_all` never collides.
    pub fn empty(dt: f64) -> Self {
        let target = StaticUniformTarget { density: 0.0, temperature: 0.0, mass: 1.0 };
        ReactionSet::new(Vec::new(), target, RelativeDynamics::FastProjectile, dt)
    }

    pub fn reactions(&self) -> &[Reaction] { &self.reactions }
    pub fn target(&self) -> &StaticUniformTarget { &self.target }

    /// Collision probability of a projectile of `mass` at relative speed `g`
    /// during one time step; fills the per-channel cross sections.
    fn collision_probability(&mut self, mass: f64, g: f64) -> (f64, f64) {
        let energy = 0.5 * mass * g * g / EV_TO_J;
        let mut total = 0.0;
        for (s, reaction) in self.sigma.iter_mut().zip(&self.reactions) {
            *s = reaction.cross_section.at(energy);
            total += *s;
        }
        let nu = self.target.density * total * g;
        (1.0 - (-nu * self.dt).exp(), total)
    }

    // index of the reaction channel selected proportionally to its cross section
    fn choose(&self, total: f64, rng: &mut RandomSource) -> usize {
        let r = rng.uniform() * total;
        let mut accu = 0.0;
        for (i, s) in self.sigma.iter().enumerate() {
            accu += s;
            if r < accu {
                return i;
            }
        }
        // r == total within rounding
        self.sigma.len() - 1
    }

    /// Samples collisions for every particle present at entry. Particles
    /// created by ionization are appended to `species` (electrons) and
    /// `secondary` (ions) and are not collided in this call.
    ///
    /// Returns the number of collision events.
    pub fn react_all(
        &mut self,
        species: &mut ChargedSpecies,
        secondary: Option<&mut ChargedSpecies>,
        rng: &mut RandomSource,
    ) -> u64 {
        let n = species.len();
        self.react_first(n, species, secondary, rng)
    }

    /// Like [`ReactionSet::react_all`], restricted to the first `n` particles
    /// of `species`.
    pub fn react_first(
        &mut self,
        n: usize,
        species: &mut ChargedSpecies,
        mut secondary: Option<&mut ChargedSpecies>,
        rng: &mut RandomSource,
    ) -> u64 {
        if self.reactions.is_empty() || self.target.density == 0.0 {
            return 0;
        }
        let m = species.mass();
        let big_m = self.target.mass;
        let f1 = m / (m + big_m);
        let f2 = big_m / (m + big_m);
        let mut n_coll: u64 = 0;

        let n = n.min(species.len());
        for k in 0..n {
            let part = species.particles()[k];
            let vt = match self.dynamics {
                RelativeDynamics::FastProjectile => [0.0; 3],
                RelativeDynamics::SlowProjectile => self.target.sample_velocity(rng),
            };
            let g = [part.vx - vt[0], part.vy - vt[1], part.vz - vt[2]];
            let g_mag = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();

            let (p_coll, total) = self.collision_probability(m, g_mag);
            if total <= 0.0 || rng.uniform() >= p_coll {
                continue;
            }
            let chosen = self.choose(total, rng);
            let kind = self.reactions[chosen].kind;
            let threshold = self.reactions[chosen].cross_section.threshold();
            n_coll += 1;

            // center of mass velocity
            let w = [
                f1 * part.vx + f2 * vt[0],
                f1 * part.vy + f2 * vt[1],
                f1 * part.vz + f2 * vt[2],
            ];

            let g_after = match kind {
                ReactionKind::ElectronElastic | ReactionKind::IonIsotropic => {
                    scatter(g, g_mag, isotropic_chi(rng), TWO_PI * rng.uniform())
                }
                ReactionKind::IonBackscatter => scatter(g, g_mag, PI, TWO_PI * rng.uniform()),
                ReactionKind::ElectronExcitation => {
                    let energy = (0.5 * m * g_mag * g_mag - threshold * EV_TO_J).max(0.0);
                    let g_new = (2.0 * energy / m).sqrt();
                    scatter(g, g_new, isotropic_chi(rng), TWO_PI * rng.uniform())
                }
                ReactionKind::ElectronIonization => {
                    // share the excess energy
                    // [Donko, Phys. Rev. E 57, 7126 (1998); Opal, J. Chem. Phys. 55, 4100 (1971)]
                    let energy = (0.5 * m * g_mag * g_mag - threshold * EV_TO_J).max(0.0);
                    let e_new = 10.0 * (rng.uniform() * (energy / EV_TO_J / 20.0).atan()).tan() * EV_TO_J;
                    let e_new = e_new.min(energy);
                    let e_orig = energy - e_new;
                    let (r_orig, r_new) =
                        if energy > 0.0 { (e_orig / energy, e_new / energy) } else { (0.0, 0.0) };
                    let chi = r_orig.sqrt().acos();
                    let chi_new = r_new.sqrt().acos();
                    let eta = TWO_PI * rng.uniform();

                    let g_emit = scatter(g, (2.0 * e_new / m).sqrt(), chi_new, eta + PI);
                    species.push(Particle {
                        x: part.x,
                        vx: w[0] + f2 * g_emit[0],
                        vy: w[1] + f2 * g_emit[1],
                        vz: w[2] + f2 * g_emit[2],
                    });
                    if let Some(ions) = secondary.as_deref_mut() {
                        let vi = self.target.sample_velocity(rng);
                        ions.push(Particle { x: part.x, vx: vi[0], vy: vi[1], vz: vi[2] });
                    }

                    scatter(g, (2.0 * e_orig / m).sqrt(), chi, eta)
                }
            };

            // post-collision velocity of the projectile
            let p = &mut species.particles_mut()[k];
            p.vx = w[0] + f2 * g_after[0];
            p.vy = w[1] + f2 * g_after[1];
            p.vz = w[2] + f2 * g_after[2];
        }
        n_coll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{E_CHARGE, E_MASS, HE_MASS};
    use approx::assert_relative_eq;

    fn flat(sigma: f64, threshold: f64) -> CrossSection {
        CrossSection::new(vec![0.0, 1.0e4], vec![sigma, sigma], threshold).unwrap()
    }

    fn gas() -> StaticUniformTarget {
        StaticUniformTarget { density: 1.0e22, temperature: 300.0, mass: HE_MASS }
    }

    fn electrons_with_energy(n: usize, energy_ev: f64) -> ChargedSpecies {
        let v = (2.0 * energy_ev * EV_TO_J / E_MASS).sqrt();
        let mut s = ChargedSpecies::new(-E_CHARGE, E_MASS);
        for i in 0..n {
            s.push(Particle { x: 1.0e-3 * i as f64, vx: v, vy: 0.0, vz: 0.0 });
        }
        s
    }

    fn energy_ev(p: &Particle, mass: f64) -> f64 {
        0.5 * mass * p.v_sqr() / EV_TO_J
    }

    #[test]
    fn test_scatter_preserves_magnitude() {
        let g = [1.0, -2.0, 0.5];
        let out = scatter(g, 3.0, 0.7, 1.3);
        let mag = (out[0] * out[0] + out[1] * out[1] + out[2] * out[2]).sqrt();
        assert_relative_eq!(mag, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scatter_zero_angle_keeps_direction() {
        let g = [3.0, 4.0, 0.0];
        let out = scatter(g, 5.0, 0.0, 2.0);
        assert_relative_eq!(out[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[1], 4.0, epsilon = 1e-12);
        assert_relative_eq!(out[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_set_never_collides() {
        let mut set = ReactionSet::empty(1.0e-9);
        let mut electrons = electrons_with_energy(10, 5.0);
        let before = electrons.clone();
        let mut rng = RandomSource::seeded(1);
        assert_eq!(set.react_all(&mut electrons, None, &mut rng), 0);
        assert_eq!(electrons.particles(), before.particles());
    }

    #[test]
    fn test_excitation_subtracts_threshold() {
        // huge cross section: every particle collides
        let reactions = vec![Reaction::new(ReactionKind::ElectronExcitation, flat(1.0e-10, 10.0))];
        let mut set = ReactionSet::new(reactions, gas(), RelativeDynamics::FastProjectile, 1.0e-9);
        let mut electrons = electrons_with_energy(100, 30.0);
        let mut rng = RandomSource::seeded(2);

        let n = set.react_all(&mut electrons, None, &mut rng);

        assert_eq!(n, 100);
        for p in electrons.particles() {
            // 20 eV relative energy left, electron keeps almost all of it
            assert_relative_eq!(energy_ev(p, E_MASS), 20.0, max_relative = 2e-3);
        }
    }

    #[test]
    fn test_below_threshold_no_collision() {
        let reactions = vec![Reaction::new(ReactionKind::ElectronExcitation, flat(1.0e-10, 19.82))];
        let mut set = ReactionSet::new(reactions, gas(), RelativeDynamics::FastProjectile, 1.0e-9);
        let mut electrons = electrons_with_energy(50, 5.0);
        let mut rng = RandomSource::seeded(3);
        assert_eq!(set.react_all(&mut electrons, None, &mut rng), 0);
    }

    #[test]
    fn test_ionization_creates_pairs_and_conserves_energy() {
        let reactions = vec![Reaction::new(ReactionKind::ElectronIonization, flat(1.0e-10, 24.59))];
        let mut set = ReactionSet::new(reactions, gas(), RelativeDynamics::FastProjectile, 1.0e-9);
        let mut electrons = electrons_with_energy(20, 60.0);
        let mut ions = ChargedSpecies::new(E_CHARGE, HE_MASS);
        let mut rng = RandomSource::seeded(4);

        let n = set.react_all(&mut electrons, Some(&mut ions), &mut rng);

        assert_eq!(n, 20);
        assert_eq!(electrons.len(), 40);
        assert_eq!(ions.len(), 20);
        for k in 0..20 {
            let e_total = energy_ev(&electrons.particles()[k], E_MASS)
                        + energy_ev(&electrons.particles()[20 + k], E_MASS);
            assert_relative_eq!(e_total, 60.0 - 24.59, max_relative = 2e-3);
            assert_eq!(ions.particles()[k].x, electrons.particles()[k].x);
        }
    }

    #[test]
    fn test_backscatter_swaps_with_target() {
        let cold = StaticUniformTarget { density: 1.0e22, temperature: 0.0, mass: HE_MASS };
        let reactions = vec![Reaction::new(ReactionKind::IonBackscatter, flat(1.0e-10, 0.0))];
        let mut set = ReactionSet::new(reactions, cold, RelativeDynamics::SlowProjectile, 1.0e-6);
        let mut ions = ChargedSpecies::new(E_CHARGE, HE_MASS);
        ions.push(Particle { x: 0.01, vx: 1.0e4, vy: 0.0, vz: 0.0 });
        let mut rng = RandomSource::seeded(5);

        assert_eq!(set.react_all(&mut ions, None, &mut rng), 1);
        let p = ions.particles()[0];
        assert!(p.v_sqr().sqrt() < 1.0e-6);
    }

    #[test]
    fn test_react_first_leaves_later_particles_alone() {
        let cold = StaticUniformTarget { density: 1.0e22, temperature: 0.0, mass: HE_MASS };
        let reactions = vec![Reaction::new(ReactionKind::IonBackscatter, flat(1.0e-10, 0.0))];
        let mut set = ReactionSet::new(reactions, cold, RelativeDynamics::SlowProjectile, 1.0e-6);
        let mut ions = ChargedSpecies::new(E_CHARGE, HE_MASS);
        for _ in 0..4 {
            ions.push(Particle { x: 0.01, vx: 1.0e4, vy: 0.0, vz: 0.0 });
        }
        let mut rng = RandomSource::seeded(7);

        assert_eq!(set.react_first(2, &mut ions, None, &mut rng), 2);
        assert!(ions.particles()[..2].iter().all(|p| p.v_sqr() < 1.0e-12));
        assert!(ions.particles()[2..].iter().all(|p| p.vx == 1.0e4));
    }

    #[test]
    fn test_isotropic_ion_scattering_conserves_energy_with_cold_gas() {
        let cold = StaticUniformTarget { density: 1.0e22, temperature: 0.0, mass: HE_MASS };
        let reactions = vec![Reaction::new(ReactionKind::IonIsotropic, flat(1.0e-10, 0.0))];
        let mut set = ReactionSet::new(reactions, cold, RelativeDynamics::SlowProjectile, 1.0e-6);
        let mut ions = ChargedSpecies::new(E_CHARGE, HE_MASS);
        for _ in 0..50 {
            ions.push(Particle { x: 0.01, vx: 1.0e4, vy: 0.0, vz: 0.0 });
        }
        let mut rng = RandomSource::seeded(6);

        set.react_all(&mut ions, None, &mut rng);

        // equal masses: the ion keeps cos^2(chi/2) of its energy
        for p in ions.particles() {
            assert!(p.v_sqr() <= 1.0e8 * (1.0 + 1e-9));
        }
    }
}
