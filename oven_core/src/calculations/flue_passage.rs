//! # Flue Passage Check
//!
//! Checks a flue passage of given length behind the combustion chamber:
//! how much the flue gas cools along it, whether it reaches the minimal
//! length for the wall construction, and the draft a chimney of given
//! height produces with the gas leaving the passage.
//!
//! ## Example
//!
//! ```rust
//! use oven_core::calculations::flue_passage::{calculate_flue_passage, FluePassageInput};
//!
//! let input = FluePassageInput::new(25.0, 10.0).with_chimney_height(6.0);
//! let result = calculate_flue_passage(&input).unwrap();
//!
//! assert!((result.minimal_passage_length - 6.5).abs() < 1e-9);
//! assert!(result.meets_minimum_length);
//! assert!(result.draft_pressure > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::combustion_chamber::{default_altitude, default_single_wall, default_temperature};
use crate::calculations::{Advisory, AdvisoryCode};
use crate::constants::{PhysicalConstants, FLUE_EXIT_TEMPERATURE, MIN_EXHAUST_TEMPERATURE};
use crate::equations::{airflow, chamber};
use crate::errors::{require_finite, require_finite_output, require_positive, CalcError, CalcResult};

fn default_inlet_temperature() -> f64 {
    FLUE_EXIT_TEMPERATURE
}

/// Input parameters for a flue passage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "maxWood": 25.0,
///   "passageLength": 10.0,
///   "singleWall": false,
///   "inletTemperature": 550.0,
///   "chimneyHeight": 6.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluePassageInput {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// Maximum wood load per firing (kg), from the chamber calculation
    pub max_wood: f64,

    /// Actual passage length (cm)
    pub passage_length: f64,

    #[serde(default = "default_single_wall")]
    pub single_wall: bool,

    /// Flue temperature leaving the combustion chamber (°C)
    #[serde(default = "default_inlet_temperature")]
    pub inlet_temperature: f64,

    /// Effective chimney height (m); zero skips the draft
    #[serde(default)]
    pub chimney_height: f64,

    /// Altitude above sea level (m)
    #[serde(default = "default_altitude")]
    pub altitude: f64,

    /// Ambient temperature (°C)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl FluePassageInput {
    pub fn new(max_wood: f64, passage_length: f64) -> Self {
        FluePassageInput {
            label: String::new(),
            max_wood,
            passage_length,
            single_wall: default_single_wall(),
            inlet_temperature: default_inlet_temperature(),
            chimney_height: 0.0,
            altitude: default_altitude(),
            temperature: default_temperature(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_single_wall(mut self, single_wall: bool) -> Self {
        self.single_wall = single_wall;
        self
    }

    pub fn with_inlet_temperature(mut self, temperature_c: f64) -> Self {
        self.inlet_temperature = temperature_c;
        self
    }

    pub fn with_chimney_height(mut self, height_m: f64) -> Self {
        self.chimney_height = height_m;
        self
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude = altitude_m;
        self
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature = temperature_c;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("maxWood", self.max_wood, "Wood load must be positive")?;
        require_positive("passageLength", self.passage_length, "Passage length must be positive")?;
        require_finite("inletTemperature", self.inlet_temperature)?;
        require_finite("chimneyHeight", self.chimney_height)?;
        if self.chimney_height < 0.0 {
            return Err(CalcError::invalid_input(
                "chimneyHeight",
                self.chimney_height.to_string(),
                "Chimney height cannot be negative",
            ));
        }
        require_finite("altitude", self.altitude)?;
        require_finite("temperature", self.temperature)?;
        Ok(())
    }
}

/// Results from the flue passage check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluePassageResult {
    /// Minimal passage length for the wall construction (cm)
    pub minimal_passage_length: f64,
    /// Flue temperature at the end of the passage (°C)
    pub outlet_temperature: f64,
    /// Lowest acceptable exhaust temperature (°C)
    pub minimum_exhaust_temperature: f64,
    pub meets_minimum_length: bool,
    pub exhaust_too_cold: bool,
    /// Outside air density at the site (kg/m³)
    pub real_air_density: f64,
    /// Flue gas density at the outlet temperature (kg/m³)
    pub real_flue_density: f64,
    /// Chimney draft (Pa)
    pub draft_pressure: f64,
}

impl FluePassageResult {
    /// Both the length and the exhaust temperature are acceptable.
    pub fn passes(&self) -> bool {
        self.meets_minimum_length && !self.exhaust_too_cold
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();
        if !self.meets_minimum_length {
            out.push(Advisory::new(
                AdvisoryCode::PassageTooShort,
                format!(
                    "Passage is shorter than the minimal {:.1} cm",
                    self.minimal_passage_length
                ),
            ));
        }
        if self.exhaust_too_cold {
            out.push(Advisory::new(
                AdvisoryCode::ExhaustTooCold,
                format!(
                    "Exhaust leaves at {:.0} °C, below {:.0} °C; condensation risk",
                    self.outlet_temperature, self.minimum_exhaust_temperature
                ),
            ));
        }
        out
    }
}

/// Check a flue passage with the reference constants.
pub fn calculate_flue_passage(input: &FluePassageInput) -> CalcResult<FluePassageResult> {
    calculate_flue_passage_with(input, &PhysicalConstants::REFERENCE)
}

/// Check a flue passage with an explicit constant set.
pub fn calculate_flue_passage_with(
    input: &FluePassageInput,
    constants: &PhysicalConstants,
) -> CalcResult<FluePassageResult> {
    input.validate()?;

    let minimal_passage_length = chamber::minimal_passage_length(input.max_wood, input.single_wall);
    let outlet_temperature = airflow::flue_temperature_at(
        input.passage_length,
        minimal_passage_length,
        input.inlet_temperature,
    );

    let altitude_factor = airflow::altitude_correction_factor(input.altitude);
    let air_temp_factor = airflow::temp_correction_factor(input.temperature);
    let flue_temp_factor = airflow::temp_correction_factor(outlet_temperature);
    let real_air_density = airflow::real_density(constants.air_density, air_temp_factor, altitude_factor);
    let real_flue_density = airflow::real_density(constants.flue_gas_density, flue_temp_factor, altitude_factor);
    let draft_pressure = airflow::draft_pressure(input.chimney_height, real_air_density, real_flue_density);

    let temperature = ("temperature", input.temperature, air_temp_factor);
    let inlet = ("inletTemperature", input.inlet_temperature, flue_temp_factor);
    let altitude = ("altitude", input.altitude, altitude_factor);
    require_finite_output("altitudeCorrectionFactor", altitude_factor, &[altitude])?;
    require_finite_output(
        "minimalPassageLength",
        minimal_passage_length,
        &[("maxWood", input.max_wood, input.max_wood)],
    )?;
    require_finite_output("realAirDensity", real_air_density, &[temperature, altitude])?;
    require_finite_output("realFlueDensity", real_flue_density, &[inlet, altitude])?;
    require_finite_output(
        "draftPressure",
        draft_pressure,
        &[("chimneyHeight", input.chimney_height, input.chimney_height), temperature, altitude],
    )?;

    Ok(FluePassageResult {
        minimal_passage_length,
        outlet_temperature,
        minimum_exhaust_temperature: MIN_EXHAUST_TEMPERATURE,
        meets_minimum_length: input.passage_length >= minimal_passage_length,
        exhaust_too_cold: outlet_temperature < MIN_EXHAUST_TEMPERATURE,
        real_air_density,
        real_flue_density,
        draft_pressure,
    })
}
