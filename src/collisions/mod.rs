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

//! Monte Carlo collisions of charged particles with the background gas.

pub mod cross_section;
pub mod mcc;
pub mod reactions;

pub use cross_section::CrossSection;
pub use mcc::{Reaction, ReactionKind, ReactionSet, RelativeDynamics, StaticUniformTarget};
pub use reactions::{load_electron_reactions, load_ion_reactions};
