//! Statutory configuration.
//!
//! The minimum-wage floors payroll validates against differ for
//! agricultural and non-agricultural work and change by jurisdiction, so
//! they load from a YAML file. Built-in defaults cover tests and local
//! runs.
//!
//! ```yaml
//! minimum_wages:
//!   agricultural: "7.25"
//!   non_agricultural: "10.00"
//! ```

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Minimum hourly wages by payroll bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WageFloors {
    /// Statutory floor for agricultural task codes.
    pub agricultural: Decimal,
    /// Statutory floor for non-agricultural task codes.
    pub non_agricultural: Decimal,
}

/// The statutory parameters the engine is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatutoryConfig {
    /// Minimum-wage floors by bucket.
    pub minimum_wages: WageFloors,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        StatutoryConfig {
            minimum_wages: WageFloors {
                agricultural: Decimal::new(725, 2),
                non_agricultural: Decimal::new(1000, 2),
            },
        }
    }
}

impl StatutoryConfig {
    /// Loads the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file cannot be
    /// read and [`EngineError::ConfigParseError`] when it is not valid
    /// YAML for this structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<StatutoryConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
