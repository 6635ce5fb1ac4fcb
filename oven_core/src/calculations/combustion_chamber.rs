//! # Combustion Chamber Calculation
//!
//! Sizes the combustion chamber of a masonry wood-fired oven from its
//! nominal power, heating period and chamber circumference, and derives
//! the airflow and gas densities at the site.
//!
//! Every quantity is evaluated once, in dependency order, from the input
//! and the constant set. No state is kept between calls.
//!
//! ## Assumptions
//!
//! - Heating period in hours, power in kW
//! - Square chamber for the side length
//! - Altitude and temperature are not clamped; implausible values give
//!   implausible numbers
//! - A quantity that overflows to infinity (or NaN) fails the call with
//!   [`InvalidInput`](crate::errors::CalcError::InvalidInput) naming the input that drove it
//!
//! ## Example
//!
//! ```rust
//! use oven_core::calculations::combustion_chamber::{calculate, CombustionChamberInput};
//!
//! let input = CombustionChamberInput::new(8.0, 77.0, 200.0);
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.max_wood - 189.842).abs() < 0.001);
//! assert_eq!(result.min_wood, 0.5 * result.max_wood);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{Advisory, AdvisoryCode};
use crate::constants::{PhysicalConstants, DEFAULT_ALTITUDE, DEFAULT_TEMPERATURE, MIN_COMBUSTION_CHAMBER_SIDE};
use crate::equations::{airflow, chamber};
use crate::errors::{require_finite, require_finite_output, require_positive, CalcResult, Influence};

pub(crate) fn default_single_wall() -> bool {
    true
}

pub(crate) fn default_altitude() -> f64 {
    DEFAULT_ALTITUDE
}

pub(crate) fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// Input parameters for a combustion chamber.
///
/// ## JSON Example
///
/// Only the first three fields are required:
///
/// ```json
/// {
///   "label": "Kitchen oven",
///   "power": 8.0,
///   "heatingPeriod": 12.0,
///   "chamberCircumference": 200.0,
///   "singleWall": true,
///   "altitude": 100.0,
///   "temperature": 23.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombustionChamberInput {
    /// User label (e.g., "Living room stove")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// Nominal power (kW)
    pub power: f64,

    /// Heating period (h)
    pub heating_period: f64,

    /// Circumference of the chamber footprint (cm)
    pub chamber_circumference: f64,

    /// Single-wall construction (shorter minimal passage)
    #[serde(default = "default_single_wall")]
    pub single_wall: bool,

    /// Altitude above sea level (m)
    #[serde(default = "default_altitude")]
    pub altitude: f64,

    /// Ambient temperature (°C)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl CombustionChamberInput {
    /// Create an input with the default wall type, altitude and temperature.
    pub fn new(power: f64, heating_period: f64, chamber_circumference: f64) -> Self {
        CombustionChamberInput {
            label: String::new(),
            power,
            heating_period,
            chamber_circumference,
            single_wall: default_single_wall(),
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

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude = altitude_m;
        self
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature = temperature_c;
        self
    }

    /// Validate input parameters.
    ///
    /// Power, heating period and circumference must be positive. Altitude
    /// and temperature only have to be finite numbers.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("power", self.power, "Power must be positive")?;
        require_positive("heatingPeriod", self.heating_period, "Heating period must be positive")?;
        require_positive(
            "chamberCircumference",
            self.chamber_circumference,
            "Circumference must be positive (the optimal height divides by it)",
        )?;
        require_finite("altitude", self.altitude)?;
        require_finite("temperature", self.temperature)?;
        Ok(())
    }
}

/// Results from the combustion chamber calculation.
///
/// Field names serialize to the same camelCase keys as the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombustionChamberResult {
    /// Wood per firing at nominal power (kg)
    pub max_wood: f64,
    /// Minimum wood load (kg)
    pub min_wood: f64,
    /// Minimal storage mass (kg)
    pub minimal_oven_mass: f64,
    /// Required inner surface (cm²)
    pub combustion_chamber_surface_requirement: f64,
    /// Minimal floor area (cm²)
    pub minimal_combustion_chamber_area: f64,
    /// Minimal height (cm)
    pub combustion_chamber_minimal_height: f64,
    /// Optimal height for the given circumference (cm)
    pub combustion_chamber_optimal_height: f64,
    /// Maximal floor area for the given circumference (cm²)
    pub combustion_chamber_max_area: f64,
    /// Side of a square chamber (cm)
    pub combustion_chamber_side_length: f64,
    /// Minimal flue passage length (cm)
    pub minimal_passage_length: f64,
    /// Gas groove cross-section (cm²)
    pub pilot_burner_area: f64,
    pub temp_correction_factor: f64,
    pub altitude_correction_factor: f64,
    /// Combustion air demand (m³/s)
    pub air_intake_flow_rate: f64,
    /// Flue gas volume flow (m³/s)
    pub flue_gas_flow_rate: f64,
    /// Flue gas mass flow (kg/s)
    pub flue_gas_mass_flow_rate: f64,
    /// Air density at the site (kg/m³)
    pub real_air_density: f64,
    /// Flue gas density at the site (kg/m³)
    pub real_flue_density: f64,
}

impl CombustionChamberResult {
    /// All values keyed by their result name, in evaluation order.
    pub fn fields(&self) -> [(&'static str, f64); 18] {
        [
            ("maxWood", self.max_wood),
            ("minWood", self.min_wood),
            ("minimalOvenMass", self.minimal_oven_mass),
            ("combustionChamberSurfaceRequirement", self.combustion_chamber_surface_requirement),
            ("minimalCombustionChamberArea", self.minimal_combustion_chamber_area),
            ("combustionChamberMinimalHeight", self.combustion_chamber_minimal_height),
            ("combustionChamberOptimalHeight", self.combustion_chamber_optimal_height),
            ("combustionChamberMaxArea", self.combustion_chamber_max_area),
            ("combustionChamberSideLength", self.combustion_chamber_side_length),
            ("minimalPassageLength", self.minimal_passage_length),
            ("pilotBurnerArea", self.pilot_burner_area),
            ("tempCorrectionFactor", self.temp_correction_factor),
            ("altitudeCorrectionFactor", self.altitude_correction_factor),
            ("airIntakeFlowRate", self.air_intake_flow_rate),
            ("flueGasFlowRate", self.flue_gas_flow_rate),
            ("flueGasMassFlowRate", self.flue_gas_mass_flow_rate),
            ("realAirDensity", self.real_air_density),
            ("realFlueDensity", self.real_flue_density),
        ]
    }

    /// Non-fatal remarks on the geometry. They never change the values.
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();

        if self.combustion_chamber_side_length < MIN_COMBUSTION_CHAMBER_SIDE {
            out.push(Advisory::new(
                AdvisoryCode::SideBelowMinimum,
                format!(
                    "Chamber side {:.1} cm is below the {:.0} cm minimum",
                    self.combustion_chamber_side_length, MIN_COMBUSTION_CHAMBER_SIDE
                ),
            ));
        }
        if self.combustion_chamber_optimal_height < 0.0 {
            out.push(Advisory::new(
                AdvisoryCode::NegativeOptimalHeight,
                format!(
                    "Optimal height {:.1} cm is negative; the circumference is too large",
                    self.combustion_chamber_optimal_height
                ),
            ));
        } else if self.combustion_chamber_optimal_height < self.combustion_chamber_minimal_height {
            out.push(Advisory::new(
                AdvisoryCode::OptimalBelowMinimalHeight,
                format!(
                    "Optimal height {:.1} cm is below the minimal height {:.1} cm",
                    self.combustion_chamber_optimal_height, self.combustion_chamber_minimal_height
                ),
            ));
        }
        if self.combustion_chamber_max_area < 0.0 {
            out.push(Advisory::new(
                AdvisoryCode::NegativeMaxArea,
                format!(
                    "Maximal area {:.0} cm² is negative; the circumference is too large",
                    self.combustion_chamber_max_area
                ),
            ));
        }
        out
    }
}

/// Size the combustion chamber with the reference constants.
///
/// # Returns
///
/// * `Ok(CombustionChamberResult)` - All 18 quantities
/// * `Err(CalcError::InvalidInput)` - Power, heating period or circumference
///   not positive, or a non-finite value
pub fn calculate(input: &CombustionChamberInput) -> CalcResult<CombustionChamberResult> {
    calculate_with(input, &PhysicalConstants::REFERENCE)
}

/// Size the combustion chamber with an explicit constant set.
pub fn calculate_with(
    input: &CombustionChamberInput,
    constants: &PhysicalConstants,
) -> CalcResult<CombustionChamberResult> {
    input.validate()?;

    let max_wood = chamber::max_wood_load(
        input.power,
        input.heating_period,
        constants.min_efficiency,
        constants.wood_heating_value,
    );
    let circumference = input.chamber_circumference;

    let temp_factor = airflow::temp_correction_factor(input.temperature);
    let altitude_factor = airflow::altitude_correction_factor(input.altitude);

    let result = CombustionChamberResult {
        max_wood,
        min_wood: chamber::min_wood_load(max_wood),
        minimal_oven_mass: chamber::minimal_oven_mass(max_wood),
        combustion_chamber_surface_requirement: chamber::chamber_surface_requirement(max_wood),
        minimal_combustion_chamber_area: chamber::minimal_chamber_area(max_wood),
        combustion_chamber_minimal_height: chamber::chamber_minimal_height(max_wood),
        combustion_chamber_optimal_height: chamber::chamber_optimal_height(max_wood, circumference),
        combustion_chamber_max_area: chamber::chamber_max_area(max_wood, circumference),
        combustion_chamber_side_length: chamber::chamber_side_length(max_wood),
        minimal_passage_length: chamber::minimal_passage_length(max_wood, input.single_wall),
        pilot_burner_area: chamber::pilot_burner_area(max_wood),
        temp_correction_factor: temp_factor,
        altitude_correction_factor: altitude_factor,
        air_intake_flow_rate: airflow::air_intake_flow_rate(max_wood, temp_factor, altitude_factor),
        flue_gas_flow_rate: airflow::flue_gas_flow_rate(max_wood, temp_factor, altitude_factor),
        flue_gas_mass_flow_rate: airflow::flue_gas_mass_flow_rate(max_wood),
        real_air_density: airflow::real_density(constants.air_density, temp_factor, altitude_factor),
        real_flue_density: airflow::real_density(constants.flue_gas_density, temp_factor, altitude_factor),
    };

    for (quantity, value) in result.fields() {
        require_finite_output(quantity, value, &influences(input, quantity, temp_factor, altitude_factor))?;
    }
    Ok(result)
}

/// Inputs each result quantity depends on, with the factor they scale it by.
fn influences(
    input: &CombustionChamberInput,
    quantity: &str,
    temp_factor: f64,
    altitude_factor: f64,
) -> Vec<Influence> {
    let power = ("power", input.power, input.power);
    let period = ("heatingPeriod", input.heating_period, input.heating_period);
    let circumference = (
        "chamberCircumference",
        input.chamber_circumference,
        input.chamber_circumference,
    );
    let temperature = ("temperature", input.temperature, temp_factor);
    let altitude = ("altitude", input.altitude, altitude_factor);

    match quantity {
        "tempCorrectionFactor" => vec![temperature],
        "altitudeCorrectionFactor" => vec![altitude],
        "combustionChamberOptimalHeight" | "combustionChamberMaxArea" => vec![power, period, circumference],
        "airIntakeFlowRate" | "flueGasFlowRate" => vec![power, period, temperature, altitude],
        "realAirDensity" | "realFlueDensity" => vec![temperature, altitude],
        _ => vec![power, period],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> CombustionChamberInput {
        CombustionChamberInput::new(8.0, 77.0, 200.0)
    }

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_reference_scenario() {
        let r = calculate(&reference_input()).unwrap();

        // 616 / 3.2448
        assert!((r.max_wood - 189.8422).abs() < 1e-3);
        assert!((r.min_wood - 94.9211).abs() < 1e-3);
        assert!((r.minimal_oven_mass - 9492.11).abs() < 1e-2);
        assert!(rel_close(r.max_wood, 8.0 * 77.0 / (4.16 * 0.78)));
    }

    #[test]
    fn test_linear_relations() {
        let r = calculate(&reference_input()).unwrap();
        assert_eq!(r.min_wood, 0.5 * r.max_wood);
        assert_eq!(r.minimal_oven_mass, 50.0 * r.max_wood);
        assert_eq!(r.combustion_chamber_surface_requirement, 900.0 * r.max_wood);
        assert_eq!(r.minimal_combustion_chamber_area, 100.0 * r.max_wood);
        assert_eq!(r.combustion_chamber_minimal_height, r.max_wood + 25.0);
        assert_eq!(r.pilot_burner_area, r.max_wood);
        assert_eq!(r.flue_gas_mass_flow_rate, 0.0035 * r.max_wood);
    }

    #[test]
    fn test_geometry_formulas() {
        let r = calculate(&reference_input()).unwrap();
        let m = r.max_wood;
        let h = m + 25.0;

        assert!(rel_close(r.combustion_chamber_optimal_height, (900.0 * m - 200.0 * m) / 200.0));
        assert!(rel_close(r.combustion_chamber_max_area, 900.0 * m - h * 200.0 / 2.0));
        let s = r.combustion_chamber_side_length;
        assert!(s > 0.0);
        assert!(rel_close(s, (-2.0 * h + ((2.0 * h).powi(2) + 1800.0 * m).sqrt()) / 2.0));
        assert!(rel_close(r.minimal_passage_length, 1.3 * m.sqrt()));
    }

    #[test]
    fn test_double_wall_passage() {
        let single = calculate(&reference_input()).unwrap();
        let double = calculate(&reference_input().with_single_wall(false)).unwrap();
        assert!(rel_close(double.minimal_passage_length / single.minimal_passage_length, 1.5 / 1.3));
        assert_eq!(double.max_wood, single.max_wood);
    }

    #[test]
    fn test_airflow_and_density() {
        let r = calculate(&reference_input()).unwrap();
        let tcf = 296.0 / 273.0;
        let acf = 1.0 / (-9.81_f64 * 100.0 / 78624.0).exp();

        assert!(rel_close(r.temp_correction_factor, tcf));
        assert!(rel_close(r.altitude_correction_factor, acf));
        assert!(rel_close(r.air_intake_flow_rate, 0.00256 * r.max_wood * tcf * acf));
        assert!(rel_close(r.flue_gas_flow_rate, 0.00273 * r.max_wood * tcf * acf));
        assert!(rel_close(r.real_air_density, 1.293 / (tcf * acf)));
        assert!(rel_close(r.real_flue_density, 1.282 / (tcf * acf)));
    }

    #[test]
    fn test_sea_level_at_zero_celsius() {
        let input = reference_input().with_altitude(0.0).with_temperature(0.0);
        let r = calculate(&input).unwrap();
        assert_eq!(r.altitude_correction_factor, 1.0);
        assert_eq!(r.temp_correction_factor, 1.0);
        assert_eq!(r.real_air_density, 1.293);
        assert_eq!(r.real_flue_density, 1.282);
    }

    #[test]
    fn test_idempotent() {
        let input = reference_input();
        let a = calculate(&input).unwrap();
        let b = calculate(&input).unwrap();
        for ((_, x), (_, y)) in a.fields().iter().zip(b.fields().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_power_monotonicity() {
        let low = calculate(&CombustionChamberInput::new(4.0, 12.0, 200.0)).unwrap();
        let high = calculate(&CombustionChamberInput::new(6.0, 12.0, 200.0)).unwrap();
        assert!(high.max_wood > low.max_wood);
        assert!(high.minimal_oven_mass > low.minimal_oven_mass);
        assert!(high.combustion_chamber_surface_requirement > low.combustion_chamber_surface_requirement);
        assert!(high.minimal_combustion_chamber_area > low.minimal_combustion_chamber_area);
        assert!(high.combustion_chamber_minimal_height > low.combustion_chamber_minimal_height);
    }

    #[test]
    fn test_altitude_lowers_density() {
        let at_100 = calculate(&reference_input().with_altitude(100.0)).unwrap();
        let at_200 = calculate(&reference_input().with_altitude(200.0)).unwrap();
        assert!(at_200.altitude_correction_factor > at_100.altitude_correction_factor);
        assert!(at_200.real_air_density < at_100.real_air_density);
        assert!(at_200.real_flue_density < at_100.real_flue_density);
    }

    #[test]
    fn test_invalid_required_fields() {
        for (input, field) in [
            (CombustionChamberInput::new(0.0, 77.0, 200.0), "power"),
            (CombustionChamberInput::new(-1.0, 77.0, 200.0), "power"),
            (CombustionChamberInput::new(8.0, 0.0, 200.0), "heatingPeriod"),
            (CombustionChamberInput::new(8.0, -12.0, 200.0), "heatingPeriod"),
            (CombustionChamberInput::new(8.0, 77.0, 0.0), "chamberCircumference"),
            (CombustionChamberInput::new(8.0, 77.0, -200.0), "chamberCircumference"),
            (CombustionChamberInput::new(8.0, 77.0, f64::NAN), "chamberCircumference"),
        ] {
            let err = calculate(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_non_finite_altitude_rejected() {
        let input = reference_input().with_altitude(f64::INFINITY);
        assert_eq!(calculate(&input).unwrap_err().field(), Some("altitude"));
    }

    #[test]
    fn test_overflowing_quantities_rejected() {
        // exp(9.81e7 / 78624) overflows the altitude factor
        let err = calculate(&reference_input().with_altitude(1.0e7)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("altitude"));

        // (2h)^2 overflows in the side length
        let err = calculate(&CombustionChamberInput::new(1.0e160, 1.0, 200.0)).unwrap_err();
        assert_eq!(err.field(), Some("power"));
        assert!(err.to_string().contains("combustionChamberSideLength"));

        let err = calculate(&CombustionChamberInput::new(1.0, 1.0e160, 200.0)).unwrap_err();
        assert_eq!(err.field(), Some("heatingPeriod"));
    }

    #[test]
    fn test_absolute_zero_rejected() {
        // A zero temperature factor makes both densities infinite
        let err = calculate(&reference_input().with_temperature(-273.0)).unwrap_err();
        assert_eq!(err.field(), Some("temperature"));
        assert!(err.to_string().contains("realAirDensity"));
    }

    #[test]
    fn test_results_serialize_without_nulls() {
        for input in [
            reference_input().with_altitude(8000.0).with_temperature(-60.0),
            CombustionChamberInput::new(1.0e-3, 1.0e-3, 1.0e-3),
            CombustionChamberInput::new(1.0e6, 1.0e3, 1.0e5),
        ] {
            let r = calculate(&input).unwrap();
            assert!(r.fields().iter().all(|(_, v)| v.is_finite()));
            let json = serde_json::to_string(&r).unwrap();
            assert!(!json.contains("null"));
            assert!(serde_json::from_str::<CombustionChamberResult>(&json).is_ok());
        }
    }

    #[test]
    fn test_large_circumference_is_not_an_error() {
        let r = calculate(&CombustionChamberInput::new(1.0, 1.0, 1.0e6)).unwrap();
        assert!(r.combustion_chamber_max_area < 0.0);
        let codes: Vec<_> = r.advisories().iter().map(|a| a.code).collect();
        assert!(codes.contains(&AdvisoryCode::NegativeMaxArea));
    }

    #[test]
    fn test_small_chamber_advisory() {
        // 1 kW for 1 h gives ~0.31 kg of wood and a side of a few cm
        let r = calculate(&CombustionChamberInput::new(1.0, 1.0, 50.0)).unwrap();
        let codes: Vec<_> = r.advisories().iter().map(|a| a.code).collect();
        assert!(codes.contains(&AdvisoryCode::SideBelowMinimum));
    }

    #[test]
    fn test_custom_constants() {
        let mut constants = PhysicalConstants::REFERENCE;
        constants.min_efficiency = 0.5;
        let r = calculate_with(&reference_input(), &constants).unwrap();
        assert!(rel_close(r.max_wood, 616.0 / (4.16 * 0.5)));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"power": 8.0, "heatingPeriod": 77.0, "chamberCircumference": 200.0}"#;
        let input: CombustionChamberInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, reference_input());
    }

    #[test]
    fn test_result_serializes_all_fields() {
        let r = calculate(&reference_input()).unwrap();
        let value = serde_json::to_value(&r).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 18);
        for (name, v) in r.fields() {
            assert_eq!(obj[name].as_f64(), Some(v));
        }
    }
}
