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

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SimError};
use crate::particles::Particle;

/// Particle state saved at the end of a run, used to continue a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub steps_done: usize,
    pub electrons: Vec<Particle>,
    pub ions: Vec<Particle>,
}

pub fn save_particle_data(
    path: &Path,
    steps_done: usize,
    electrons: &[Particle],
    ions: &[Particle],
) -> Result<()> {
    let io_error = |source| SimError::CheckpointIo { path: path.to_path_buf(), source };
    let codec_error = |source| SimError::CheckpointCodec { path: path.to_path_buf(), source };

    let mut file = BufWriter::new(File::create(path).map_err(io_error)?);
    bincode::serialize_into(&mut file, &steps_done).map_err(codec_error)?;
    bincode::serialize_into(&mut file, electrons).map_err(codec_error)?;
    bincode::serialize_into(&mut file, ions).map_err(codec_error)?;
    file.flush().map_err(io_error)?;
    Ok(())
}

pub fn load_particle_data(path: &Path) -> Result<Checkpoint> {
    let io_error = |source| SimError::CheckpointIo { path: path.to_path_buf(), source };
    let codec_error = |source| SimError::CheckpointCodec { path: path.to_path_buf(), source };

    let mut file = BufReader::new(File::open(path).map_err(io_error)?);
    let steps_done: usize = bincode::deserialize_from(&mut file).map_err(codec_error)?;
    let electrons: Vec<Particle> = bincode::deserialize_from(&mut file).map_err(codec_error)?;
    let ions: Vec<Particle> = bincode::deserialize_from(&mut file).map_err(codec_error)?;
    Ok(Checkpoint { steps_done, electrons, ions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picdata.bin");
        let electrons = vec![Particle { x: 0.01, vx: 1.0, vy: 2.0, vz: 3.0 }];
        let ions = vec![
            Particle { x: 0.02, vx: -1.0, vy: 0.0, vz: 0.5 },
            Particle { x: 0.03, vx: 4.0, vy: -2.0, vz: 0.0 },
        ];

        save_particle_data(&path, 1200, &electrons, &ions).unwrap();
        let cp = load_particle_data(&path).unwrap();

        assert_eq!(cp, Checkpoint { steps_done: 1200, electrons, ions });
    }

    #[test]
    fn test_missing_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_particle_data(&dir.path().join("none.bin")).unwrap_err();
        assert!(matches!(err, SimError::CheckpointIo { .. }));
    }

    #[test]
    fn test_truncated_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bin");
        std::fs::write(&path, [1u8, 0, 0]).unwrap();
        let err = load_particle_data(&path).unwrap_err();
        assert!(matches!(err, SimError::CheckpointCodec { .. }));
    }
}
