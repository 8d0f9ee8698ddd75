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

//! 1d3v electrostatic Particle-in-Cell / Monte Carlo Collisions simulation of
//! capacitively coupled radio-frequency helium discharges.
//!
//! The [`Simulation`] runs a fixed-order time loop and publishes [`Event`]s to
//! which diagnostic actions (see [`diagnostics`]) are attached.

pub mod checkpoint;
pub mod collisions;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod field;
pub mod grid;
pub mod parameters;
pub mod particles;
pub mod random;
pub mod simulation;

pub use checkpoint::{load_particle_data, save_particle_data, Checkpoint};
pub use config::{OutputConfig, RunConfig};
pub use error::{ConfigError, Result, SimError, TableError};
pub use events::{action, Event, EventAction, EventBus};
pub use parameters::{BenchmarkCase, Inputs, Parameters};
pub use particles::{ChargedSpecies, Particle};
pub use random::RandomSource;
pub use simulation::{drive_voltage, Counters, Phase, Simulation, State};
