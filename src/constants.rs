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

// physical constants

pub const PI: f64              = std::f64::consts::PI;  // mathematical constant Pi
pub const TWO_PI: f64          = 2.0 * PI;               // two times Pi
pub const E_CHARGE: f64        = 1.60217662e-19;         // electron charge [C]
pub const EV_TO_J: f64         = E_CHARGE;               // eV <-> Joule conversion factor
pub const E_MASS: f64          = 9.109e-31;              // mass of electron [kg]
pub const HE_MASS: f64         = 6.67e-27;               // mass of helium atom [kg]
pub const K_BOLTZMANN: f64     = 1.38064852e-23;         // Boltzmann's constant [J/K]
pub const EPSILON0: f64        = 8.85418781e-12;         // permittivity of free space [F/m]
