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

use crate::particles::ChargedSpecies;

// cell index and fractional offset of position x, clamped so that p+1 is a valid node
#[inline]
fn cell_of(x: f64, inv_dx: f64, nx: usize) -> (usize, f64) {
    let s = x * inv_dx;
    let p = s.trunc() as usize;
    if p + 1 >= nx {
        (nx - 2, 1.0)
    } else {
        (p, s - p as f64)
    }
}

//----------------------------------------------------------------------
// compute particle counts from particle positions
//----------------------------------------------------------------------

/// Linear (cloud-in-cell) deposition of macro-particle counts onto the grid.
///
/// The boundary nodes only collect from half a cell and are doubled, so that
/// `count * particle_weight / dx` is a density at every node.
pub fn weight_to_grid(species: &ChargedSpecies, dx: f64, grid: &mut [f64]) {
    let nx = grid.len();
    let inv_dx = 1.0 / dx;
    grid.iter_mut().for_each(|g| *g = 0.0);

    for part in species.particles() {
        let (p, rem) = cell_of(part.x, inv_dx, nx);
        grid[p]     += 1.0 - rem;
        grid[p + 1] += rem;
    }

    grid[0]      *= 2.0;
    grid[nx - 1] *= 2.0;
}

/// Linear interpolation of a grid field to every particle of the species.
pub fn field_at_particles(field: &[f64], dx: f64, species: &mut ChargedSpecies) {
    let nx = field.len();
    let inv_dx = 1.0 / dx;
    let (particles, efield) = species.split_for_interpolation();
    efield.clear();
    efield.extend(particles.iter().map(|part| {
        let (p, c2) = cell_of(part.x, inv_dx, nx);
        (1.0 - c2) * field[p] + c2 * field[p + 1]
    }));
}

/// Running arithmetic mean of a grid quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageGrid {
    mean: Vec<f64>,
    samples: usize,
}

impl AverageGrid {
    pub fn new(nx: usize) -> Self {
        AverageGrid { mean: vec![0.0; nx], samples: 0 }
    }

    pub fn add(&mut self, grid: &[f64]) {
        debug_assert_eq!(grid.len(), self.mean.len());
        self.samples += 1;
        let inv_n = 1.0 / self.samples as f64;
        for (m, &v) in self.mean.iter_mut().zip(grid) {
            *m += (v - *m) * inv_n;
        }
    }

    pub fn get(&self) -> &[f64] { &self.mean }
    pub fn samples(&self) -> usize { self.samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use approx::assert_relative_eq;

    fn species_at(xs: &[f64]) -> ChargedSpecies {
        let mut s = ChargedSpecies::new(1.0, 1.0);
        for &x in xs {
            s.push(Particle { x, vx: 0.0, vy: 0.0, vz: 0.0 });
        }
        s
    }

    #[test]
    fn test_weight_to_grid_linear_split() {
        let species = species_at(&[0.25, 1.5, 3.0]);
        let mut grid = vec![7.0; 4];
        weight_to_grid(&species, 1.0, &mut grid);

        // node 0: 0.75 doubled, node 1: 0.25 + 0.5, node 2: 0.5, node 3: 1.0 doubled
        assert_relative_eq!(grid[0], 1.5);
        assert_relative_eq!(grid[1], 0.75);
        assert_relative_eq!(grid[2], 0.5);
        assert_relative_eq!(grid[3], 2.0);
    }

    #[test]
    fn test_interior_deposit_conserves_count() {
        let species = species_at(&[1.1, 1.9, 2.5, 2.2]);
        let mut grid = vec![0.0; 5];
        weight_to_grid(&species, 1.0, &mut grid);
        assert_relative_eq!(grid.iter().sum::<f64>(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_field_at_particles_interpolates() {
        let mut species = species_at(&[0.0, 0.5, 1.75, 2.0]);
        field_at_particles(&[0.0, 2.0, 4.0], 1.0, &mut species);
        assert_eq!(species.efield(), &[0.0, 1.0, 3.5, 4.0]);
    }

    #[test]
    fn test_average_grid_running_mean() {
        let mut avg = AverageGrid::new(2);
        avg.add(&[1.0, 10.0]);
        avg.add(&[2.0, 20.0]);
        avg.add(&[6.0, 0.0]);
        assert_eq!(avg.samples(), 3);
        assert_relative_eq!(avg.get()[0], 3.0);
        assert_relative_eq!(avg.get()[1], 10.0);
    }
}
