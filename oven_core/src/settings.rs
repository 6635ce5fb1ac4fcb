//! # Settings
//!
//! Configuration shared by the front ends. Settings are a JSON document;
//! every key is optional and unknown keys are rejected.
//!
//! ```json
//! {
//!   "stove": { "hasCookingPlate": true, "minAirIntakeHeightCm": 6.0 },
//!   "report": { "precision": 3 }
//! }
//! ```
//!
//! The stove options describe the build (cooking plate, water heat
//! exchanger, air intake height). Reports list them; no formula reads them.
//!
//! ## Example
//!
//! ```rust
//! use oven_core::settings::Settings;
//!
//! let settings = Settings::from_json(r#"{"report": {"precision": 3}}"#).unwrap();
//! assert_eq!(settings.report.precision, 3);
//! assert!(!settings.stove.has_cooking_plate);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub stove: StoveOptions,
    pub report: ReportSettings,
}

/// Build options of the stove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StoveOptions {
    pub has_cooking_plate: bool,
    pub has_water_exchange: bool,
    /// Air intake height above the chamber floor (cm)
    pub min_air_intake_height_cm: f64,
}

impl Default for StoveOptions {
    fn default() -> Self {
        StoveOptions {
            has_cooking_plate: false,
            has_water_exchange: false,
            min_air_intake_height_cm: 5.0,
        }
    }
}

/// Rendering options for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReportSettings {
    /// Decimal places for result values
    pub precision: usize,
    /// Append the list of equations used
    pub include_equations: bool,
    /// List design advisories after the results
    pub include_advisories: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            precision: 2,
            include_equations: true,
            include_advisories: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::serialization(format!("Invalid settings: {}", e)))
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.stove.has_cooking_plate);
        assert!(!settings.stove.has_water_exchange);
        assert_eq!(settings.stove.min_air_intake_height_cm, 5.0);
        assert_eq!(settings.report.precision, 2);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_section() {
        let settings = Settings::from_json(r#"{"stove": {"hasWaterExchange": true}}"#).unwrap();
        assert!(settings.stove.has_water_exchange);
        assert_eq!(settings.stove.min_air_intake_height_cm, 5.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::from_json(r#"{"stove": {"chimneyColor": "red"}}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_roundtrip() {
        let path = temp_dir().join(format!("oven_core_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.report.precision = 4;
        fs::write(&path, settings.to_json().unwrap()).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/oven/settings.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
