//! # oven_core - Masonry Oven Combustion Chamber Calculator
//!
//! `oven_core` sizes the combustion chamber of a masonry wood-fired oven
//! from a handful of inputs (nominal power, heating period, chamber
//! circumference, wall type, altitude, temperature) using the closed-form
//! formulas of the heat-engineering reference tables.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every result is a pure function of the input and the
//!   constant set
//! - **JSON-First**: all inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: invalid input names the offending field
//! - **One formula, one function**: see [`equations`]
//!
//! ## Quick Start
//!
//! ```rust
//! use oven_core::{compute, CalculationInput};
//!
//! let input = CalculationInput::new(8.0, 12.0, 200.0).with_altitude(350.0);
//! let result = compute(&input).unwrap();
//!
//! println!("Wood per firing: {:.1} kg", result.max_wood);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"combustionChamberSideLength\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Combustion chamber sizing and flue passage check
//! - [`equations`] - The individual formulas and their registry
//! - [`constants`] - Physical constants from the reference tables
//! - [`settings`] - Stove options and report settings
//! - [`report`] - Text/Markdown rendering of results
//! - [`units`] - Temperature unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod equations;
pub mod errors;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    Advisory, AdvisoryCode, CalculationItem, CalculationOutput, CombustionChamberInput,
    CombustionChamberResult, FluePassageInput, FluePassageResult,
};
pub use constants::PhysicalConstants;
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;

/// Input of [`compute`].
pub type CalculationInput = CombustionChamberInput;

/// Output of [`compute`].
pub type CalculationResult = CombustionChamberResult;

/// Size a combustion chamber with the reference constants.
///
/// Fails with [`CalcError::InvalidInput`] when power, heating period or
/// chamber circumference is not positive.
pub fn compute(input: &CalculationInput) -> CalcResult<CalculationResult> {
    calculations::combustion_chamber::calculate(input)
}
