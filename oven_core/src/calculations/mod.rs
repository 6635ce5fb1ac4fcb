//! # Oven Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, camelCase keys)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate*(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`combustion_chamber`] - Chamber sizing, airflow and gas densities
//! - [`flue_passage`] - Passage cooling and chimney draft

pub mod combustion_chamber;
pub mod flue_passage;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use combustion_chamber::{CombustionChamberInput, CombustionChamberResult};
pub use flue_passage::{FluePassageInput, FluePassageResult};

/// Stable identifier of a design remark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryCode {
    SideBelowMinimum,
    NegativeOptimalHeight,
    OptimalBelowMinimalHeight,
    NegativeMaxArea,
    PassageTooShort,
    ExhaustTooCold,
}

/// A non-fatal remark on a result. Results are returned regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub code: AdvisoryCode,
    pub message: String,
}

impl Advisory {
    pub fn new(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Advisory {
            code,
            message: message.into(),
        }
    }
}

/// A calculation request of any supported type.
///
/// ## JSON Example
///
/// ```rust
/// use oven_core::calculations::CalculationItem;
///
/// let json = r#"{"type": "CombustionChamber", "power": 8, "heatingPeriod": 12, "chamberCircumference": 200}"#;
/// let item: CalculationItem = serde_json::from_str(json).unwrap();
/// assert_eq!(item.calc_type(), "CombustionChamber");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    CombustionChamber(CombustionChamberInput),
    FluePassage(FluePassageInput),
}

/// Result of running a [`CalculationItem`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    CombustionChamber(CombustionChamberResult),
    FluePassage(FluePassageResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::CombustionChamber(c) => &c.label,
            CalculationItem::FluePassage(f) => &f.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::CombustionChamber(_) => "CombustionChamber",
            CalculationItem::FluePassage(_) => "FluePassage",
        }
    }

    /// Run the calculation with the reference constants.
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::CombustionChamber(input) => {
                combustion_chamber::calculate(input).map(CalculationOutput::CombustionChamber)
            }
            CalculationItem::FluePassage(input) => {
                flue_passage::calculate_flue_passage(input).map(CalculationOutput::FluePassage)
            }
        }
    }
}

impl CalculationOutput {
    pub fn advisories(&self) -> Vec<Advisory> {
        match self {
            CalculationOutput::CombustionChamber(r) => r.advisories(),
            CalculationOutput::FluePassage(r) => r.advisories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_roundtrip() {
        let item = CalculationItem::FluePassage(FluePassageInput::new(25.0, 6.5).with_label("P-1"));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"FluePassage\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
        assert_eq!(roundtrip.label(), "P-1");
    }

    #[test]
    fn test_run_dispatches() {
        let item = CalculationItem::CombustionChamber(CombustionChamberInput::new(8.0, 12.0, 200.0));
        match item.run().unwrap() {
            CalculationOutput::CombustionChamber(r) => assert!(r.max_wood > 0.0),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_run_propagates_invalid_input() {
        let item = CalculationItem::CombustionChamber(CombustionChamberInput::new(8.0, 12.0, 0.0));
        assert_eq!(item.run().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_advisory_code_serialization() {
        let json = serde_json::to_string(&AdvisoryCode::SideBelowMinimum).unwrap();
        assert_eq!(json, "\"SIDE_BELOW_MINIMUM\"");
    }
}
