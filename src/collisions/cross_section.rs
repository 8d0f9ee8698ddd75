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

use std::path::Path;

use log::debug;

use crate::error::{Result, SimError, TableError};

/// Tabulated cross section of one reaction channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    energy: Vec<f64>,          // [eV], strictly increasing
    cross_section: Vec<f64>,   // [m^2]
    threshold: f64,            // [eV]
}

impl CrossSection {
    pub fn new(
        energy: Vec<f64>,
        cross_section: Vec<f64>,
        threshold: f64,
    ) -> std::result::Result<Self, TableError> {
        if energy.is_empty() {
            return Err(TableError::Empty);
        }
        if energy.len() != cross_section.len() {
            return Err(TableError::LengthMismatch { energies: energy.len(), values: cross_section.len() });
        }
        if energy.windows(2).any(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing);
        }
        if cross_section.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(TableError::InvalidValue);
        }
        Ok(CrossSection { energy, cross_section, threshold })
    }

    /// Loads a two-column `energy;cross_section` file without header.
    pub fn load<P: AsRef<Path>>(path: P, threshold: f64) -> Result<Self> {
        let path = path.as_ref();
        let read_error = |source| SimError::CrossSectionRead { path: path.to_path_buf(), source };
        let format_error =
            |reason: String| SimError::CrossSectionFormat { path: path.to_path_buf(), reason };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(read_error)?;

        let mut energy = Vec::new();
        let mut cross_section = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(read_error)?;
            if record.len() < 2 {
                let reason = format!("line {}: expected 2 columns, found {}", line + 1, record.len());
                return Err(format_error(reason));
            }
            let parse = |column: usize| {
                record[column].parse::<f64>().map_err(|e| {
                    let value = &record[column];
                    format_error(format!("line {}, column {}: '{}': {}", line + 1, column + 1, value, e))
                })
            };
            energy.push(parse(0)?);
            cross_section.push(parse(1)?);
        }

        let cs = CrossSection::new(energy, cross_section, threshold)
            .map_err(|source| SimError::CrossSectionTable { path: path.to_path_buf(), source })?;
        debug!(">> eduPIC: loaded {} cross section points from {}", cs.energy.len(), path.display());
        Ok(cs)
    }

    pub fn threshold(&self) -> f64 { self.threshold }

    /// Cross section at `energy` [eV]: zero below the threshold and the first
    /// tabulated point, constant beyond the last one, linear in between.
    pub fn at(&self, energy: f64) -> f64 {
        if energy < self.threshold || energy < self.energy[0] {
            return 0.0;
        }
        let last = self.energy.len() - 1;
        if energy >= self.energy[last] {
            return self.cross_section[last];
        }
        let i = self.energy.partition_point(|&e| e <= energy);
        let (e0, e1) = (self.energy[i - 1], self.energy[i]);
        let (s0, s1) = (self.cross_section[i - 1], self.cross_section[i]);
        s0 + (s1 - s0) * (energy - e0) / (e1 - e0)
    }
}
