//! # Physical Constants
//!
//! Fixed values from the heat-engineering reference tables used to size the
//! combustion chamber. Several of them (emission ceilings, glass ratio,
//! minimum chamber side, optimal firing period) are not consumed by any
//! formula and are kept for validation rules.

use serde::{Deserialize, Serialize};

/// Minimal oven efficiency [-].
pub const MIN_EFFICIENCY: f64 = 0.78;

/// Lower heating value of wood (Hu) [kWh/kg].
pub const WOOD_HEATING_VALUE: f64 = 4.16;

/// Theoretical air volume [Nm³/kg].
pub const THEORETICAL_AIR_VOLUME: f64 = 4.0;

/// Access (excess) air factor [-].
pub const ACCESS_AIR_FACTOR: f64 = 2.95;

/// Theoretical flue gas volume [Nm³/kg].
pub const THEORETICAL_FLUE_GAS_VOLUME: f64 = 4.8;

/// Air density at normal conditions [kg/Nm³].
pub const AIR_DENSITY: f64 = 1.293;

/// Flue gas density at normal conditions [kg/Nm³].
pub const FLUE_GAS_DENSITY: f64 = 1.282;

/// Optimal firing period [min].
pub const OPTIMAL_FIRING_PERIOD: f64 = 77.0;

/// Max CO emission [mg/Nm³].
pub const MAX_CO_EMISSION: f64 = 1500.0;

/// Max NOx emission [mg/Nm³].
pub const MAX_NOX_EMISSION: f64 = 225.0;

/// Max soot emission [mg/Nm³].
pub const MAX_SOOT_EMISSION: f64 = 120.0;

/// Max particulate emission [mg/Nm³].
pub const MAX_PARTICULATE_EMISSION: f64 = 90.0;

/// Allowed max area of glass relative to the chamber [-].
pub const MAX_GLASS_RATIO: f64 = 1.0 / 6.0;

/// Minimal side length of the combustion chamber [cm].
pub const MIN_COMBUSTION_CHAMBER_SIDE: f64 = 23.0;

/// Standard gravity [m/s²].
pub const GRAVITY: f64 = 9.81;

/// Flue temperature when leaving the combustion chamber [°C].
pub const FLUE_EXIT_TEMPERATURE: f64 = 550.0;

/// Minimum exhaust temperature for the 78 % efficiency floor [°C].
pub const MIN_EXHAUST_TEMPERATURE: f64 = 240.0;

/// Default ambient temperature when none is supplied [°C].
pub const DEFAULT_TEMPERATURE: f64 = 23.0;

/// Default altitude above sea level when none is supplied [m].
pub const DEFAULT_ALTITUDE: f64 = 100.0;

/// The complete constant set as one immutable value.
///
/// Calculations take the set by reference, so a result is always a pure
/// function of `(input, constants)`.
///
/// ```rust
/// use oven_core::constants::PhysicalConstants;
///
/// let c = PhysicalConstants::REFERENCE;
/// assert_eq!(c.wood_heating_value, 4.16);
/// assert_eq!(PhysicalConstants::default(), c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalConstants {
    pub min_efficiency: f64,
    pub wood_heating_value: f64,
    pub theoretical_air_volume: f64,
    pub access_air_factor: f64,
    pub theoretical_flue_gas_volume: f64,
    pub air_density: f64,
    pub flue_gas_density: f64,
    pub optimal_firing_period: f64,
    pub max_co_emission: f64,
    pub max_nox_emission: f64,
    pub max_soot_emission: f64,
    pub max_particulate_emission: f64,
    pub max_glass_ratio: f64,
    pub min_combustion_chamber_side: f64,
}

impl PhysicalConstants {
    /// Values from the reference tables.
    pub const REFERENCE: PhysicalConstants = PhysicalConstants {
        min_efficiency: MIN_EFFICIENCY,
        wood_heating_value: WOOD_HEATING_VALUE,
        theoretical_air_volume: THEORETICAL_AIR_VOLUME,
        access_air_factor: ACCESS_AIR_FACTOR,
        theoretical_flue_gas_volume: THEORETICAL_FLUE_GAS_VOLUME,
        air_density: AIR_DENSITY,
        flue_gas_density: FLUE_GAS_DENSITY,
        optimal_firing_period: OPTIMAL_FIRING_PERIOD,
        max_co_emission: MAX_CO_EMISSION,
        max_nox_emission: MAX_NOX_EMISSION,
        max_soot_emission: MAX_SOOT_EMISSION,
        max_particulate_emission: MAX_PARTICULATE_EMISSION,
        max_glass_ratio: MAX_GLASS_RATIO,
        min_combustion_chamber_side: MIN_COMBUSTION_CHAMBER_SIDE,
    };
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_matches_named_constants() {
        let c = PhysicalConstants::REFERENCE;
        assert_eq!(c.min_efficiency, MIN_EFFICIENCY);
        assert_eq!(c.air_density, AIR_DENSITY);
        assert_eq!(c.flue_gas_density, FLUE_GAS_DENSITY);
        assert!((c.max_glass_ratio - 0.1667).abs() < 1e-4);
    }

    #[test]
    fn test_constants_serialize_camel_case() {
        let json = serde_json::to_string(&PhysicalConstants::REFERENCE).unwrap();
        assert!(json.contains("\"woodHeatingValue\":4.16"));
        assert!(json.contains("\"minCombustionChamberSide\":23.0"));
    }
}
