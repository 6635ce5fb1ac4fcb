//! # Correction Factors, Airflow, Density and Draft
//!
//! Gas-side formulas. Normal-condition quantities (0 °C, sea level) are
//! scaled to the actual site with two dimensionless factors:
//!
//! - temperature: `f_t = (273 + t) / 273`
//! - altitude: `f_a = 1 / exp(−g·z / 78624)`
//!
//! Volumes grow with `f_t·f_a`, densities shrink by the same product.

use crate::constants::GRAVITY;
use crate::units::{Celsius, Kelvin};

/// Scale height term of the isothermal barometric formula used by the
/// altitude correction.
pub const BAROMETRIC_DIVISOR: f64 = 78624.0;

/// Air demand per kg of wood per second at normal conditions.
pub const AIR_INTAKE_COEFFICIENT: f64 = 0.00256;

/// Flue gas volume per kg of wood per second at normal conditions.
pub const FLUE_GAS_COEFFICIENT: f64 = 0.00273;

/// Flue gas mass per kg of wood per second.
pub const FLUE_GAS_MASS_COEFFICIENT: f64 = 0.0035;

/// Exponent coefficient of the passage temperature drop.
pub const TEMPERATURE_DROP_COEFFICIENT: f64 = 0.83;

// =============================================================================
// CORRECTION FACTORS
// =============================================================================

/// Temperature correction factor (-).
///
/// # Formula
/// f_t = (273 + t) / 273
///
/// # Example
/// ```rust
/// use oven_core::equations::airflow::temp_correction_factor;
///
/// assert_eq!(temp_correction_factor(0.0), 1.0);
/// ```
#[inline]
pub fn temp_correction_factor(temperature_c: f64) -> f64 {
    Kelvin::from(Celsius(temperature_c)).ratio_to_normal()
}

/// Altitude correction factor (-). Equal to 1 at sea level and growing
/// with altitude.
///
/// # Formula
/// f_a = 1 / exp(−9.81 × z / 78624)
///
/// # Example
/// ```rust
/// use oven_core::equations::airflow::altitude_correction_factor;
///
/// assert_eq!(altitude_correction_factor(0.0), 1.0);
/// assert!(altitude_correction_factor(200.0) > altitude_correction_factor(100.0));
/// ```
#[inline]
pub fn altitude_correction_factor(altitude_m: f64) -> f64 {
    1.0 / (-GRAVITY * altitude_m / BAROMETRIC_DIVISOR).exp()
}

// =============================================================================
// FLOW RATES
// =============================================================================

/// Combustion air intake flow rate (m³/s at site conditions).
///
/// # Formula
/// V_air = 0.00256 × M × f_t × f_a
#[inline]
pub fn air_intake_flow_rate(max_wood_kg: f64, temp_factor: f64, altitude_factor: f64) -> f64 {
    AIR_INTAKE_COEFFICIENT * max_wood_kg * temp_factor * altitude_factor
}

/// Flue gas volume flow rate (m³/s at site conditions).
///
/// # Formula
/// V_flue = 0.00273 × M × f_t × f_a
#[inline]
pub fn flue_gas_flow_rate(max_wood_kg: f64, temp_factor: f64, altitude_factor: f64) -> f64 {
    FLUE_GAS_COEFFICIENT * max_wood_kg * temp_factor * altitude_factor
}

/// Flue gas mass flow rate (kg/s). Independent of site conditions.
///
/// # Formula
/// m_flue = 0.0035 × M
#[inline]
pub fn flue_gas_mass_flow_rate(max_wood_kg: f64) -> f64 {
    FLUE_GAS_MASS_COEFFICIENT * max_wood_kg
}

// =============================================================================
// DENSITY
// =============================================================================

/// Gas density at site conditions (kg/m³) from its normal density.
///
/// # Formula
/// ρ = ρ_N / (f_t × f_a)
#[inline]
pub fn real_density(normal_density: f64, temp_factor: f64, altitude_factor: f64) -> f64 {
    normal_density / (temp_factor * altitude_factor)
}

// =============================================================================
// FLUE PASSAGE AND DRAFT
// =============================================================================

/// Flue gas temperature after `length_cm` of passage (°C).
///
/// Exponential decay relative to the minimal passage length. At exactly
/// the minimal length the gas keeps `exp(−0.83) ≈ 44 %` of its inlet
/// temperature.
///
/// # Formula
/// T(L) = T_in × exp(−0.83 × L / L_min)
///
/// # Example
/// ```rust
/// use oven_core::equations::airflow::flue_temperature_at;
///
/// let t = flue_temperature_at(0.0, 7.0, 550.0);
/// assert_eq!(t, 550.0);
/// ```
#[inline]
pub fn flue_temperature_at(length_cm: f64, minimal_length_cm: f64, inlet_temperature_c: f64) -> f64 {
    inlet_temperature_c * (-TEMPERATURE_DROP_COEFFICIENT * length_cm / minimal_length_cm).exp()
}

/// Chimney draft (Pa) from the density difference of outside air and flue
/// gas over the effective height.
///
/// # Formula
/// Δp = g × H × (ρ_air − ρ_flue)
#[inline]
pub fn draft_pressure(height_m: f64, air_density: f64, flue_density: f64) -> f64 {
    GRAVITY * height_m * (air_density - flue_density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_correction_factor() {
        assert_eq!(temp_correction_factor(0.0), 1.0);
        assert!((temp_correction_factor(23.0) - 296.0 / 273.0).abs() < 1e-15);
        assert!((temp_correction_factor(273.0) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_altitude_correction_factor() {
        assert_eq!(altitude_correction_factor(0.0), 1.0);
        let expected = (9.81_f64 * 100.0 / 78624.0).exp();
        assert!((altitude_correction_factor(100.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_flow_rates_scale_with_factors() {
        let base = air_intake_flow_rate(10.0, 1.0, 1.0);
        assert!((base - 0.0256).abs() < 1e-15);
        assert!((air_intake_flow_rate(10.0, 2.0, 1.5) - base * 3.0).abs() < 1e-12);
        assert!((flue_gas_flow_rate(10.0, 1.0, 1.0) - 0.0273).abs() < 1e-15);
        assert!((flue_gas_mass_flow_rate(10.0) - 0.035).abs() < 1e-15);
    }

    #[test]
    fn test_real_density() {
        assert_eq!(real_density(1.293, 1.0, 1.0), 1.293);
        assert!(real_density(1.293, 1.1, 1.0) < 1.293);
    }

    #[test]
    fn test_flue_temperature_drop() {
        let at_min = flue_temperature_at(10.0, 10.0, 550.0);
        assert!((at_min - 550.0 * (-0.83_f64).exp()).abs() < 1e-9);
        assert!(flue_temperature_at(20.0, 10.0, 550.0) < at_min);
    }

    #[test]
    fn test_draft_pressure() {
        assert!((draft_pressure(5.0, 1.2, 0.7) - 9.81 * 5.0 * 0.5).abs() < 1e-12);
        assert_eq!(draft_pressure(0.0, 1.2, 0.7), 0.0);
    }
}
