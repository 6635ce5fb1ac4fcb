//! # Fuel Load and Combustion Chamber Geometry
//!
//! Formulas deriving the wood load of one firing and the chamber
//! dimensions that follow from it. All of them are closed-form in the
//! maximum wood load `M` (kg).
//!
//! ## Notation
//!
//! - `P` = nominal power (kW)
//! - `t` = heating period (h)
//! - `M` = maximum wood load per firing (kg)
//! - `U` = combustion chamber circumference (cm)
//! - `h_min` = minimal chamber height (cm)
//!
//! Lengths are in cm and areas in cm², as in the reference tables.

// =============================================================================
// FUEL LOAD
// =============================================================================

/// Maximum wood load for one firing at nominal power.
///
/// # Formula
/// M = P × t / (Hu × η_min)
///
/// # Arguments
/// * `power_kw` - Nominal power (kW)
/// * `heating_period_h` - Heating period (h)
/// * `min_efficiency` - Efficiency floor η_min (-)
/// * `heating_value` - Lower heating value of wood Hu (kWh/kg)
///
/// # Example
/// ```rust
/// use oven_core::equations::chamber::max_wood_load;
///
/// let m = max_wood_load(8.0, 77.0, 0.78, 4.16);
/// assert!((m - 189.842).abs() < 0.01);
/// ```
#[inline]
pub fn max_wood_load(power_kw: f64, heating_period_h: f64, min_efficiency: f64, heating_value: f64) -> f64 {
    power_kw * heating_period_h / (heating_value * min_efficiency)
}

/// Minimum wood load, half of the maximum.
///
/// # Formula
/// M_min = 0.5 × M
#[inline]
pub fn min_wood_load(max_wood_kg: f64) -> f64 {
    max_wood_kg * 0.5
}

/// Minimal storage mass of the oven in contact with flames or flue (kg).
///
/// # Formula
/// m_oven = 50 × M
#[inline]
pub fn minimal_oven_mass(max_wood_kg: f64) -> f64 {
    max_wood_kg * 50.0
}

// =============================================================================
// CHAMBER SURFACES
// =============================================================================

/// Required inner surface of the combustion chamber (cm²).
///
/// # Formula
/// O = 900 × M
#[inline]
pub fn chamber_surface_requirement(max_wood_kg: f64) -> f64 {
    900.0 * max_wood_kg
}

/// Minimal floor area of the combustion chamber (cm²).
///
/// # Formula
/// A_min = 100 × M
#[inline]
pub fn minimal_chamber_area(max_wood_kg: f64) -> f64 {
    100.0 * max_wood_kg
}

/// Maximal floor area for a given circumference (cm²).
///
/// The wall surface `h_min × U / 2` is taken out of the surface
/// requirement. Large circumferences give a negative area; that is not
/// treated as an error.
///
/// # Formula
/// A_max = 900 × M − h_min × U / 2
#[inline]
pub fn chamber_max_area(max_wood_kg: f64, circumference_cm: f64) -> f64 {
    900.0 * max_wood_kg - chamber_minimal_height(max_wood_kg) * circumference_cm / 2.0
}

// =============================================================================
// CHAMBER HEIGHT AND SIDE
// =============================================================================

/// Minimal height of the combustion chamber (cm).
///
/// # Formula
/// h_min = M + 25
#[inline]
pub fn chamber_minimal_height(max_wood_kg: f64) -> f64 {
    max_wood_kg + 25.0
}

/// Optimal height of the combustion chamber (cm).
///
/// Surface requirement minus floor and ceiling, spread over the
/// circumference. The caller guarantees `circumference_cm > 0`.
///
/// # Formula
/// h_opt = (900 × M − 2 × A_min) / U
///
/// # Example
/// ```rust
/// use oven_core::equations::chamber::chamber_optimal_height;
///
/// // 10 kg load in a 200 cm circumference: (9000 - 2000) / 200
/// assert!((chamber_optimal_height(10.0, 200.0) - 35.0).abs() < 1e-12);
/// ```
#[inline]
pub fn chamber_optimal_height(max_wood_kg: f64, circumference_cm: f64) -> f64 {
    (900.0 * max_wood_kg - 2.0 * minimal_chamber_area(max_wood_kg)) / circumference_cm
}

/// Side length of a square chamber (cm).
///
/// Positive root of `s² + 2·h_min·s − 450·M = 0`, kept in the algebraic
/// form of the reference tables.
///
/// # Formula
/// s = (−2·h_min + √((2·h_min)² + 1800·M)) / 2
///
/// # Example
/// ```rust
/// use oven_core::equations::chamber::{chamber_minimal_height, chamber_side_length};
///
/// let m = 10.0;
/// let h = chamber_minimal_height(m);
/// let s = chamber_side_length(m);
/// // s satisfies the quadratic it is the root of
/// assert!((s * s + 2.0 * h * s - 450.0 * m).abs() < 1e-9);
/// ```
#[inline]
pub fn chamber_side_length(max_wood_kg: f64) -> f64 {
    let h = chamber_minimal_height(max_wood_kg);
    (-2.0 * h + ((2.0 * h).powi(2) + 1800.0 * max_wood_kg).sqrt()) / 2.0
}

// =============================================================================
// PASSAGES AND BURNER
// =============================================================================

/// Multiplier of the minimal passage length for the wall construction.
#[inline]
pub fn passage_wall_factor(single_wall: bool) -> f64 {
    if single_wall {
        1.3
    } else {
        1.5
    }
}

/// Minimal length of the flue passage (cm).
///
/// # Formula
/// L_min = k × √M, k = 1.3 (single wall) or 1.5 (double wall)
#[inline]
pub fn minimal_passage_length(max_wood_kg: f64, single_wall: bool) -> f64 {
    passage_wall_factor(single_wall) * max_wood_kg.sqrt()
}

/// Gas groove / safety pilot burner cross-section (cm²).
///
/// # Formula
/// A_gas = M
#[inline]
pub fn pilot_burner_area(max_wood_kg: f64) -> f64 {
    max_wood_kg
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_max_wood_load() {
        let m = max_wood_load(8.0, 77.0, 0.78, 4.16);
        assert!((m - 616.0 / 3.2448).abs() < EPS);
    }

    #[test]
    fn test_linear_multiples() {
        let m = 12.5;
        assert_eq!(min_wood_load(m), 6.25);
        assert_eq!(minimal_oven_mass(m), 625.0);
        assert_eq!(chamber_surface_requirement(m), 11250.0);
        assert_eq!(minimal_chamber_area(m), 1250.0);
        assert_eq!(chamber_minimal_height(m), 37.5);
        assert_eq!(pilot_burner_area(m), m);
    }

    #[test]
    fn test_max_area_can_go_negative() {
        // 900*10 - 35*1000/2 = 9000 - 17500
        assert!((chamber_max_area(10.0, 1000.0) + 8500.0).abs() < EPS);
    }

    #[test]
    fn test_side_length_positive_root() {
        for m in [0.01, 1.0, 25.0, 189.84] {
            let s = chamber_side_length(m);
            let h = chamber_minimal_height(m);
            assert!(s > 0.0);
            assert!((s * s + 2.0 * h * s - 450.0 * m).abs() < 1e-6 * (450.0 * m).max(1.0));
        }
    }

    #[test]
    fn test_passage_length_by_wall() {
        assert!((minimal_passage_length(25.0, true) - 6.5).abs() < EPS);
        assert!((minimal_passage_length(25.0, false) - 7.5).abs() < EPS);
    }
}
