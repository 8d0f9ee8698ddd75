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

use crate::constants::{E_CHARGE, EPSILON0};

/// Net charge density from the ion and electron particle counts.
pub fn charge_density(
    particle_weight: f64,
    dx: f64,
    ion_count: &[f64],
    electron_count: &[f64],
    rho: &mut [f64],
) {
    let c = E_CHARGE * particle_weight / dx;
    for ((r, ni), ne) in rho.iter_mut().zip(ion_count).zip(electron_count) {
        *r = c * (ni - ne);
    }
}

/// Dirichlet Poisson solver on a uniform 1D grid (Thomas algorithm).
///
/// Scratch arrays are allocated once at construction.
pub struct PoissonSolver {
    nx: usize,
    dx: f64,
    w: Vec<f64>,
    h: Vec<f64>,
    f: Vec<f64>,
}

impl PoissonSolver {
    pub fn new(nx: usize, dx: f64) -> Self {
        PoissonSolver { nx, dx, w: vec![0.0; nx], h: vec![0.0; nx], f: vec![0.0; nx] }
    }

    /// Solves d2(phi)/dx2 = -rho/eps0 with phi[0] = phi_low, phi[nx-1] = phi_high.
    pub fn solve(&mut self, rho: &[f64], pot: &mut [f64], phi_low: f64, phi_high: f64) {
        const A: f64 = 1.0;
        const B: f64 = -2.0;
        const C: f64 = 1.0;
        let n = self.nx;
        let alpha = -self.dx * self.dx / EPSILON0;

        pot[0]     = phi_low;
        pot[n - 1] = phi_high;
        if n < 3 {
            return;
        }

        let (w, h, f) = (&mut self.w, &mut self.h, &mut self.f);
        for i in 1..(n - 1) { f[i] = alpha * rho[i]; }
        f[1]     -= phi_low;
        f[n - 2] -= phi_high;
        w[1] = C / B;
        h[1] = f[1] / B;
        for i in 2..(n - 1) {
            w[i] = C / (B - A * w[i - 1]);
            h[i] = (f[i] - A * h[i - 1]) / (B - A * w[i - 1]);
        }
        pot[n - 2] = h[n - 2];
        for i in (1..(n - 2)).rev() {
            pot[i] = h[i] - w[i] * pot[i + 1];
        }
    }

    /// Electric field E = -d(phi)/dx; the end nodes include the half-cell
    /// surface charge correction.
    pub fn efield(&self, pot: &[f64], rho: &[f64], efield: &mut [f64]) {
        let n = self.nx;
        let dx = self.dx;
        let inv_dx = 1.0 / dx;
        for i in 1..(n - 1) { efield[i] = 0.5 * (pot[i - 1] - pot[i + 1]) * inv_dx; }
        efield[0]     = (pot[0] - pot[1]) * inv_dx - rho[0] * dx / (2.0 * EPSILON0);
        efield[n - 1] = (pot[n - 2] - pot[n - 1]) * inv_dx + rho[n - 1] * dx / (2.0 * EPSILON0);
    }
}
