use crate::domain::MieError;
use crate::numerics::CoefficientTolerance;
use crate::particle::{Instrument, Sphere};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One scattering problem as stored on disk.
///
/// ```json
/// {
///   "particle": { "aP": [0.4, 0.75], "nP": [1.5, 1.4] },
///   "instrument": { "nM": 1.339, "wavelength": 0.447 },
///   "tolerance": { "absTol": 1e-6 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatteringConfig {
    pub particle: Sphere,
    #[serde(default)]
    pub instrument: Instrument,
    #[serde(default)]
    pub tolerance: CoefficientTolerance,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scattering config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scattering config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<ConfigError> for MieError {
    fn from(error: ConfigError) -> Self {
        match &error {
            ConfigError::Read { .. } => MieError::io_system("IO.CONFIG_READ", error.to_string()),
            ConfigError::Parse { .. } => {
                MieError::input_validation("INPUT.CONFIG_PARSE", error.to_string())
            }
        }
    }
}

pub fn load_scattering_config(path: impl AsRef<Path>) -> Result<ScatteringConfig, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scattering_config(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_scattering_config(source: &str) -> Result<ScatteringConfig, serde_json::Error> {
    serde_json::from_str(source)
}
