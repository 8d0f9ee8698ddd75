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

use crate::constants::{E_MASS, HE_MASS};
use crate::error::ConfigError;

// fixed parameters shared by all benchmark cases

const GAS_TEMPERATURE: f64      = 300.0;                  // background gas temperature [K]
const ELECTRON_TEMPERATURE: f64 = 30_000.0;               // initial electron temperature [K]
const ION_TEMPERATURE: f64      = 300.0;                  // initial ion temperature [K]
const GAP_LENGTH: f64           = 6.7e-2;                 // electrode gap [m]
const FREQUENCY: f64            = 13.56e6;                // driving frequency [Hz]

/// Case inputs from which a [`Parameters`] set is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub nx: usize,             // number of grid points
    pub f: f64,                // driving frequency [Hz]
    pub dt: f64,               // time step [s]
    pub l: f64,                // electrode gap [m]
    pub ng: f64,               // neutral gas density [m^-3]
    pub tg: f64,               // gas temperature [K]
    pub te: f64,               // initial electron temperature [K]
    pub ti: f64,               // initial ion temperature [K]
    pub n0: f64,               // initial plasma density [m^-3]
    pub m_ion: f64,            // ion mass [kg]
    pub m_e: f64,              // electron mass [kg]
    pub volt: f64,             // voltage amplitude [V]
    pub ppc: usize,            // macro-particles per cell
    pub n_steps: usize,        // total number of time steps
    pub n_steps_avg: usize,    // number of trailing steps averaged
    #[serde(default)]
    pub n_initial: Option<usize>, // initial macro-particles per species, ppc * (nx - 1) if unset
}

/// The four benchmark cases of the helium CCP discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkCase {
    One,
    Two,
    Three,
    Four,
}

impl BenchmarkCase {
    pub fn from_number(number: u8) -> Result<Self, ConfigError> {
        match number {
            1 => Ok(BenchmarkCase::One),
            2 => Ok(BenchmarkCase::Two),
            3 => Ok(BenchmarkCase::Three),
            4 => Ok(BenchmarkCase::Four),
            other => Err(ConfigError::UnknownCase(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            BenchmarkCase::One => 1,
            BenchmarkCase::Two => 2,
            BenchmarkCase::Three => 3,
            BenchmarkCase::Four => 4,
        }
    }

    pub fn inputs(self) -> Inputs {
        //                       nx   steps/period  ng        n0       volt   ppc  n_steps     n_steps_avg
        let (nx, n_t, ng, n0, volt, ppc, n_steps, n_steps_avg) = match self {
            BenchmarkCase::One   => (129,  400.0,  9.64e20, 2.56e14, 450.0, 512,   512_000,  12_800),
            BenchmarkCase::Two   => (257,  800.0,  32.1e20, 5.12e14, 200.0, 256, 4_096_000,  25_600),
            BenchmarkCase::Three => (513, 1600.0,  96.4e20, 5.12e14, 150.0, 128, 8_192_000,  51_200),
            BenchmarkCase::Four  => (513, 3200.0, 321.0e20, 3.84e14, 120.0,  64, 49_152_000, 102_400),
        };
        Inputs {
            nx,
            f: FREQUENCY,
            dt: 1.0 / (n_t * FREQUENCY),
            l: GAP_LENGTH,
            ng,
            tg: GAS_TEMPERATURE,
            te: ELECTRON_TEMPERATURE,
            ti: ION_TEMPERATURE,
            n0,
            m_ion: HE_MASS,
            m_e: E_MASS,
            volt,
            ppc,
            n_steps,
            n_steps_avg,
            n_initial: None,
        }
    }

    pub fn parameters(self) -> Result<Parameters, ConfigError> {
        Parameters::new(self.inputs())
    }
}

/// Immutable physical and numerical configuration of one run.
///
/// The derived quantities (`dx`, `particle_weight`, `n_initial`) are computed
/// once in [`Parameters::new`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    inputs: Inputs,
    dx: f64,
    particle_weight: f64,
    n_initial: usize,
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl Parameters {
    pub fn new(inputs: Inputs) -> Result<Self, ConfigError> {
        if inputs.nx < 2 {
            return Err(ConfigError::TooFewGridPoints(inputs.nx));
        }
        if inputs.ppc < 1 {
            return Err(ConfigError::NoParticlesPerCell(inputs.ppc));
        }
        positive("l", inputs.l)?;
        positive("dt", inputs.dt)?;
        positive("m_ion", inputs.m_ion)?;
        positive("m_e", inputs.m_e)?;
        non_negative("f", inputs.f)?;
        non_negative("ng", inputs.ng)?;
        non_negative("n0", inputs.n0)?;
        non_negative("tg", inputs.tg)?;
        non_negative("te", inputs.te)?;
        non_negative("ti", inputs.ti)?;
        if !inputs.volt.is_finite() {
            return Err(ConfigError::NotPositive { name: "volt", value: inputs.volt });
        }

        let cells = inputs.nx - 1;
        let dx = inputs.l / cells as f64;
        let particle_weight = inputs.n0 * inputs.l / (inputs.ppc * cells) as f64;
        let n_initial = inputs.n_initial.unwrap_or(inputs.ppc * cells);

        Ok(Parameters { inputs, dx, particle_weight, n_initial })
    }

    /// Copy of the inputs with the step counts replaced, re-derived.
    pub fn with_steps(&self, n_steps: usize, n_steps_avg: usize) -> Result<Self, ConfigError> {
        let mut inputs = self.inputs.clone();
        inputs.n_steps = n_steps;
        inputs.n_steps_avg = n_steps_avg;
        Parameters::new(inputs)
    }

    pub fn inputs(&self) -> &Inputs { &self.inputs }
    pub fn nx(&self) -> usize { self.inputs.nx }
    pub fn f(&self) -> f64 { self.inputs.f }
    pub fn dt(&self) -> f64 { self.inputs.dt }
    pub fn l(&self) -> f64 { self.inputs.l }
    pub fn ng(&self) -> f64 { self.inputs.ng }
    pub fn tg(&self) -> f64 { self.inputs.tg }
    pub fn te(&self) -> f64 { self.inputs.te }
    pub fn ti(&self) -> f64 { self.inputs.ti }
    pub fn n0(&self) -> f64 { self.inputs.n0 }
    pub fn m_ion(&self) -> f64 { self.inputs.m_ion }
    pub fn m_e(&self) -> f64 { self.inputs.m_e }
    pub fn volt(&self) -> f64 { self.inputs.volt }
    pub fn ppc(&self) -> usize { self.inputs.ppc }
    pub fn n_steps(&self) -> usize { self.inputs.n_steps }
    pub fn n_steps_avg(&self) -> usize { self.inputs.n_steps_avg }
    pub fn dx(&self) -> f64 { self.dx }
    pub fn particle_weight(&self) -> f64 { self.particle_weight }
    pub fn n_initial(&self) -> usize { self.n_initial }

    /// True for the steps of the trailing averaging window, i.e. the last
    /// `n_steps_avg` steps of the run.
    pub fn in_averaging_window(&self, step: usize) -> bool {
        step + 1 + self.inputs.n_steps_avg > self.inputs.n_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_inputs() -> Inputs {
        let mut inputs = BenchmarkCase::One.inputs();
        inputs.nx = 5;
        inputs.ppc = 4;
        inputs.n_steps = 3;
        inputs.n_steps_avg = 3;
        inputs
    }

    #[test]
    fn test_derived_quantities_for_all_cases() {
        for number in 1..=4 {
            let p = BenchmarkCase::from_number(number).unwrap().parameters().unwrap();
            assert_relative_eq!(p.dx() * (p.nx() - 1) as f64, p.l(), max_relative = 1e-12);
            assert!(p.particle_weight() > 0.0);
            assert_relative_eq!(
                p.particle_weight() * p.n_initial() as f64,
                p.n0() * p.l(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_case_one_values() {
        let p = BenchmarkCase::One.parameters().unwrap();
        assert_eq!(p.nx(), 129);
        assert_eq!(p.n_initial(), 512 * 128);
        assert_relative_eq!(p.dt(), 1.0 / (400.0 * 13.56e6));
        assert_relative_eq!(p.dx(), 6.7e-2 / 128.0);
        assert_relative_eq!(p.particle_weight(), 2.56e14 * 6.7e-2 / (512.0 * 128.0));
    }

    #[test]
    fn test_rejects_invalid_grid_and_particle_count() {
        let mut inputs = small_inputs();
        inputs.nx = 1;
        assert_eq!(Parameters::new(inputs), Err(ConfigError::TooFewGridPoints(1)));

        let mut inputs = small_inputs();
        inputs.ppc = 0;
        assert_eq!(Parameters::new(inputs), Err(ConfigError::NoParticlesPerCell(0)));

        let mut inputs = small_inputs();
        inputs.dt = 0.0;
        assert!(matches!(Parameters::new(inputs), Err(ConfigError::NotPositive { name: "dt", .. })));
    }

    #[test]
    fn test_unknown_case() {
        assert_eq!(BenchmarkCase::from_number(5), Err(ConfigError::UnknownCase(5)));
        assert_eq!(BenchmarkCase::from_number(3).unwrap().number(), 3);
    }

    #[test]
    fn test_initial_particle_override() {
        let mut inputs = small_inputs();
        inputs.n_initial = Some(0);
        let p = Parameters::new(inputs).unwrap();
        assert_eq!(p.n_initial(), 0);
        assert!(p.particle_weight() > 0.0);
    }

    #[test]
    fn test_averaging_window() {
        let p = Parameters::new(small_inputs()).unwrap().with_steps(10, 3).unwrap();
        let window: Vec<usize> = (0..10).filter(|&s| p.in_averaging_window(s)).collect();
        assert_eq!(window, vec![7, 8, 9]);

        let none = p.with_steps(10, 0).unwrap();
        assert!((0..10).all(|s| !none.in_averaging_window(s)));

        let all = p.with_steps(10, 25).unwrap();
        assert!((0..10).all(|s| all.in_averaging_window(s)));
    }
}
