//! # Estimator Settings
//!
//! The explicit configuration bundle passed into every calculation: bead
//! sizes, travel speeds, operator factors, and the documented fallbacks used
//! when a process is missing from a table.
//!
//! Settings are plain data. Nothing in the engine reads global state, so two
//! estimates with different settings can run side by side.
//!
//! ## TOML Format
//!
//! Any field left out of a settings file takes its built-in default:
//!
//! ```toml
//! fallback_speed_mm_min = 150.0
//! default_process = "SMAW"
//!
//! [bead_sizes.SAW]
//! height_mm = 5.0
//! width_mm = 18.0
//! ```
//!
//! ## Example
//!
//! ```rust
//! use weld_core::settings::EstimatorSettings;
//!
//! let settings = EstimatorSettings::from_toml_str("fallback_speed_mm_min = 120.0").unwrap();
//! assert_eq!(settings.fallback_speed_mm_min, 120.0);
//! assert!(!settings.bead_sizes.is_empty());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;
use crate::processes::{BeadSize, WeldProcess};
use crate::tables::{OperatorFactorTable, TravelSpeedTable};

/// Travel speed used when a process has no entry in the speed table (mm/min)
pub const DEFAULT_FALLBACK_SPEED_MM_MIN: f64 = 150.0;

/// Density of carbon steel weld metal (kg/mm³)
pub const CARBON_STEEL_DENSITY_KG_MM3: f64 = 7.85e-6;

/// Configuration bundle for the estimator.
///
/// Scalar fields come before the tables so the struct serializes to valid TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Travel speed for processes missing from `travel_speeds` (mm/min)
    pub fallback_speed_mm_min: f64,

    /// Process that receives a zone's full volume when it has no layers
    pub default_process: WeldProcess,

    /// Weld metal density for deposited mass (kg/mm³)
    pub metal_density_kg_mm3: f64,

    /// Bead used for processes missing from `bead_sizes`
    pub fallback_bead: BeadSize,

    /// Bead cross-section per process
    pub bead_sizes: BTreeMap<WeldProcess, BeadSize>,

    /// Travel speed per thickness bracket and process
    pub travel_speeds: TravelSpeedTable,

    /// Operator factors per thickness bracket
    pub operator_factors: OperatorFactorTable,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        use WeldProcess::*;
        EstimatorSettings {
            fallback_speed_mm_min: DEFAULT_FALLBACK_SPEED_MM_MIN,
            default_process: Smaw,
            metal_density_kg_mm3: CARBON_STEEL_DENSITY_KG_MM3,
            fallback_bead: BeadSize::new(3.0, 10.0),
            bead_sizes: BTreeMap::from([
                (Gtaw, BeadSize::new(2.5, 6.0)),
                (Smaw, BeadSize::new(3.0, 10.0)),
                (Gmaw, BeadSize::new(3.0, 10.0)),
                (Fcaw, BeadSize::new(3.5, 12.0)),
                (Saw, BeadSize::new(4.5, 16.0)),
            ]),
            travel_speeds: TravelSpeedTable::default(),
            operator_factors: OperatorFactorTable::default(),
        }
    }
}

impl EstimatorSettings {
    /// Validate every table entry.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fallback_speed_mm_min.is_finite() && self.fallback_speed_mm_min > 0.0) {
            return Err(CalcError::invalid_input(
                "fallback_speed_mm_min",
                self.fallback_speed_mm_min.to_string(),
                "Fallback speed must be positive",
            ));
        }
        if !(self.metal_density_kg_mm3.is_finite() && self.metal_density_kg_mm3 >= 0.0) {
            return Err(CalcError::invalid_input(
                "metal_density_kg_mm3",
                self.metal_density_kg_mm3.to_string(),
                "Density cannot be negative",
            ));
        }
        if self.default_process.is_skip() {
            return Err(CalcError::invalid_input(
                "default_process",
                self.default_process.code(),
                "Default process must be a real welding process",
            ));
        }
        self.fallback_bead.validate("fallback_bead")?;
        for (process, bead) in &self.bead_sizes {
            bead.validate(&format!("bead_sizes.{}", process))?;
        }
        self.travel_speeds.validate()?;
        self.operator_factors.validate()?;
        Ok(())
    }

    /// Parse settings from TOML, filling missing fields with defaults.
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let settings: EstimatorSettings =
            toml::from_str(contents).map_err(|e| CalcError::serialization(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> CalcResult<EstimatorSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    EstimatorSettings::from_toml_str(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid TOML in {}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Write settings to a TOML file atomically.
pub fn save_settings(settings: &EstimatorSettings, path: &Path) -> CalcResult<()> {
    let toml = settings.to_toml_string()?;
    write_atomic(path, toml.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EstimatorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.fallback_speed_mm_min, 150.0);
        assert_eq!(settings.bead_sizes.len(), WeldProcess::ALL.len());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = EstimatorSettings::from_toml_str(
            r#"
            default_process = "GMAW"

            [bead_sizes.SAW]
            height_mm = 5.0
            width_mm = 18.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.default_process, WeldProcess::Gmaw);
        assert_eq!(settings.bead_sizes.len(), 1);
        assert_eq!(settings.bead_sizes[&WeldProcess::Saw], BeadSize::new(5.0, 18.0));
        assert_eq!(settings.travel_speeds, TravelSpeedTable::default());
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        assert!(EstimatorSettings::from_toml_str("fallback_speed_mm_min = 0.0").is_err());
        assert!(EstimatorSettings::from_toml_str("default_process = \"SKIP\"").is_err());
        let err = EstimatorSettings::from_toml_str("fallback_speed_mm_min = \"fast\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = EstimatorSettings::default();
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("fallback_speed_mm_min"));
        let parsed = EstimatorSettings::from_toml_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_dir().join(format!("weldtime_test_{}_settings.toml", std::process::id()));
        let mut settings = EstimatorSettings::default();
        settings.fallback_speed_mm_min = 175.0;
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.fallback_speed_mm_min, 175.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings(Path::new("/nonexistent/weldtime.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
