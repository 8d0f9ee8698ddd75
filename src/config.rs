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

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parameters::{BenchmarkCase, Parameters};

fn default_case() -> u8 { 1 }
fn default_seed() -> u64 { 42 }
fn default_directory() -> PathBuf { PathBuf::from(".") }
fn default_density_e() -> PathBuf { PathBuf::from("density_e.txt") }
fn default_density_i() -> PathBuf { PathBuf::from("density_i.txt") }
fn default_report_interval() -> usize { 1000 }
fn default_conv_interval() -> usize { 1000 }

/// Settings of one run, read from a TOML file and/or the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_case")]
    pub case: u8,
    /// Directory holding the helium cross section tables; no collisions when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub n_steps: Option<usize>,
    #[serde(default)]
    pub n_steps_avg: Option<usize>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_density_e")]
    pub density_e: PathBuf,
    #[serde(default = "default_density_i")]
    pub density_i: PathBuf,
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
    /// Particle-count log (`step #e #i`), disabled when unset.
    #[serde(default)]
    pub conv_file: Option<PathBuf>,
    #[serde(default = "default_conv_interval")]
    pub conv_interval: usize,
    /// Particle data written at the end of the run.
    #[serde(default)]
    pub checkpoint: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: default_directory(),
            density_e: default_density_e(),
            density_i: default_density_i(),
            report_interval: default_report_interval(),
            conv_file: None,
            conv_interval: default_conv_interval(),
            checkpoint: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            case: default_case(),
            data_dir: None,
            seed: default_seed(),
            n_steps: None,
            n_steps_avg: None,
            output: OutputConfig::default(),
        }
    }
}

impl OutputConfig {
    /// `file` relative to the output directory (absolute paths are kept).
    pub fn path_of(&self, file: &Path) -> PathBuf {
        self.directory.join(file)
    }
}

impl RunConfig {
    /// Loads the run configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config: RunConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        BenchmarkCase::from_number(self.case)?;
        if self.output.report_interval == 0 {
            bail!("report_interval must be greater than 0.");
        }
        if self.output.conv_interval == 0 {
            bail!("conv_interval must be greater than 0.");
        }
        Ok(())
    }

    /// Parameters of the selected case with the step count overrides applied.
    pub fn parameters(&self) -> std::result::Result<Parameters, ConfigError> {
        let base = BenchmarkCase::from_number(self.case)?.parameters()?;
        if self.n_steps.is_none() && self.n_steps_avg.is_none() {
            return Ok(base);
        }
        let n_steps = self.n_steps.unwrap_or_else(|| base.n_steps());
        let n_steps_avg = self.n_steps_avg.unwrap_or_else(|| base.n_steps_avg().min(n_steps));
        base.with_steps(n_steps, n_steps_avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_from_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "").unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.output.report_interval, 1000);
        assert_eq!(config.output.path_of(&config.output.density_e), PathBuf::from("./density_e.txt"));
    }

    #[test]
    fn test_load_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
case = 2
data_dir = "cross_sections"
seed = 7
n_steps = 2000

[output]
directory = "out"
conv_file = "conv.dat"
checkpoint = "picdata.bin"
"#,
        )
        .unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.case, 2);
        assert_eq!(config.seed, 7);
        assert_eq!(config.data_dir, Some(PathBuf::from("cross_sections")));
        assert_eq!(config.output.conv_file, Some(PathBuf::from("conv.dat")));
        assert_eq!(config.output.density_i, PathBuf::from("density_i.txt"));

        let par = config.parameters().unwrap();
        assert_eq!(par.nx(), 257);
        assert_eq!(par.n_steps(), 2000);
        // case 2 averages 25 600 steps, clamped to the shortened run
        assert_eq!(par.n_steps_avg(), 2000);
    }

    #[test]
    fn test_invalid_configs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");

        fs::write(&path, "case = 5\n").unwrap();
        assert!(RunConfig::load(&path).is_err());

        fs::write(&path, "[output]\nreport_interval = 0\n").unwrap();
        assert!(RunConfig::load(&path).is_err());

        fs::write(&path, "case = \"one\"\n").unwrap();
        assert!(RunConfig::load(&path).is_err());

        assert!(RunConfig::load(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_unknown_case_parameters() {
        let config = RunConfig { case: 9, ..RunConfig::default() };
        assert_eq!(config.parameters().unwrap_err(), ConfigError::UnknownCase(9));
    }
}
