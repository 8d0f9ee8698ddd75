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
use thiserror::Error;

/// Invalid run or case parameters, detected before the first time step.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("number of grid points must be at least 2, got {0}")]
    TooFewGridPoints(usize),

    #[error("number of particles per cell must be at least 1, got {0}")]
    NoParticlesPerCell(usize),

    #[error("parameter '{name}' must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("parameter '{name}' must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("unknown benchmark case {0} (valid cases: 1, 2, 3, 4)")]
    UnknownCase(u8),
}

/// Inconsistent cross section table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("no data rows")]
    Empty,

    #[error("{energies} energies but {values} cross section values")]
    LengthMismatch { energies: usize, values: usize },

    #[error("energies are not strictly increasing")]
    NotIncreasing,

    #[error("negative or non-finite cross section value")]
    InvalidValue,
}

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cross section file '{path}' could not be read: {source}")]
    CrossSectionRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cross section file '{path}' is malformed: {reason}")]
    CrossSectionFormat { path: PathBuf, reason: String },

    #[error("cross section file '{path}' is inconsistent: {source}")]
    CrossSectionTable {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("checkpoint '{path}' could not be accessed: {source}")]
    CheckpointIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checkpoint '{path}' could not be encoded or decoded: {source}")]
    CheckpointCodec {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("simulation has already been run")]
    AlreadyRun,

    #[error("diagnostic '{action}' failed: {reason}")]
    Diagnostic { action: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SimError>;
