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

use log::info;

use crate::collisions::cross_section::CrossSection;
use crate::collisions::mcc::{Reaction, ReactionKind, ReactionSet, RelativeDynamics, StaticUniformTarget};
use crate::error::Result;
use crate::parameters::Parameters;

// helium reaction channels: (file, threshold [eV], kind)

const ELECTRON_CHANNELS: [(&str, f64, ReactionKind); 4] = [
    ("Elastic_He.csv",        0.0,   ReactionKind::ElectronElastic),
    ("Excitation1_He.csv",    19.82, ReactionKind::ElectronExcitation),
    ("Excitation2_He.csv",    20.61, ReactionKind::ElectronExcitation),
    ("Ionization_He.csv",     24.59, ReactionKind::ElectronIonization),
];

const ION_CHANNELS: [(&str, f64, ReactionKind); 2] = [
    ("Isotropic_He.csv",      0.0,   ReactionKind::IonIsotropic),
    ("Backscattering_He.csv", 0.0,   ReactionKind::IonBackscatter),
];

fn load_channels(dir: &Path, channels: &[(&str, f64, ReactionKind)]) -> Result<Vec<Reaction>> {
    channels
        .iter()
        .map(|&(file, threshold, kind)| -> Result<Reaction> {
            Ok(Reaction::new(kind, CrossSection::load(dir.join(file), threshold)?))
        })
        .collect()
}

fn target(par: &Parameters) -> StaticUniformTarget {
    StaticUniformTarget { density: par.ng(), temperature: par.tg(), mass: par.m_ion() }
}

/// Electron / helium reactions: elastic, two excitations, ionization.
pub fn load_electron_reactions(dir: &Path, par: &Parameters) -> Result<ReactionSet> {
    let reactions = load_channels(dir, &ELECTRON_CHANNELS)?;
    info!(">> eduPIC: loaded {} electron reactions from {}", reactions.len(), dir.display());
    Ok(ReactionSet::new(reactions, target(par), RelativeDynamics::FastProjectile, par.dt()))
}

/// He+ / helium reactions: isotropic elastic and backscattering.
pub fn load_ion_reactions(dir: &Path, par: &Parameters) -> Result<ReactionSet> {
    let reactions = load_channels(dir, &ION_CHANNELS)?;
    info!(">> eduPIC: loaded {} ion reactions from {}", reactions.len(), dir.display());
    Ok(ReactionSet::new(reactions, target(par), RelativeDynamics::SlowProjectile, par.dt()))
}
