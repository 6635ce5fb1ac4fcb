//! # Unit Types
//!
//! Newtype wrappers for temperatures. Everything else in the calculator is a
//! plain `f64` in the unit named by its field (kg, cm, cm², m, Nm³/s).
//!
//! The Kelvin offset is 273, not 273.15. The reference correction factor is
//! `(273 + t) / 273` and the conversion has to reproduce it exactly.
//!
//! ## Example
//!
//! ```rust
//! use oven_core::units::{Celsius, Kelvin};
//!
//! let ambient = Celsius(23.0);
//! let absolute: Kelvin = ambient.into();
//! assert_eq!(absolute.0, 296.0);
//! ```

use serde::{Deserialize, Serialize};

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

/// Normal temperature (0 °C) expressed in kelvin
pub const NORMAL_TEMPERATURE: Kelvin = Kelvin(273.0);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(NORMAL_TEMPERATURE.0 + c.0)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - NORMAL_TEMPERATURE.0)
    }
}

impl Kelvin {
    /// Ratio of this temperature to normal temperature.
    pub fn ratio_to_normal(self) -> f64 {
        self.0 / NORMAL_TEMPERATURE.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_kelvin() {
        let k: Kelvin = Celsius(0.0).into();
        assert_eq!(k, NORMAL_TEMPERATURE);
        assert_eq!(k.ratio_to_normal(), 1.0);
    }

    #[test]
    fn test_kelvin_back_to_celsius() {
        let c: Celsius = Kelvin(823.0).into();
        assert_eq!(c.0, 550.0);
    }

    #[test]
    fn test_transparent_serialization() {
        assert_eq!(serde_json::to_string(&Celsius(23.5)).unwrap(), "23.5");
    }
}
