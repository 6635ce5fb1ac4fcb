//! # Oven Sizing Equations
//!
//! Every formula the calculator evaluates, one function per formula, so the
//! numbers can be checked against the reference tables one line at a time.
//!
//! ## Modules
//!
//! - [`chamber`] - Fuel load and combustion chamber geometry
//! - [`airflow`] - Correction factors, flow rates, densities, passage cooling, draft
//! - [`registry`] - Equation metadata for reports and `EQUATIONS.md`
//!
//! ## Units
//!
//! - Mass: kg
//! - Lengths in the chamber and passages: cm; areas: cm²
//! - Altitude and chimney height: m
//! - Temperature: °C
//! - Flow: m³/s (volume) and kg/s (mass)

pub mod airflow;
pub mod chamber;
pub mod registry;

pub use chamber::{
    chamber_max_area,
    chamber_minimal_height,
    chamber_optimal_height,
    chamber_side_length,
    chamber_surface_requirement,
    max_wood_load,
    min_wood_load,
    minimal_chamber_area,
    minimal_oven_mass,
    minimal_passage_length,
    pilot_burner_area,
};

pub use airflow::{
    air_intake_flow_rate,
    altitude_correction_factor,
    draft_pressure,
    flue_gas_flow_rate,
    flue_gas_mass_flow_rate,
    flue_temperature_at,
    real_density,
    temp_correction_factor,
};

pub use registry::{
    equation_markdown,
    generate_equations_markdown,
    Equation,
    EquationCategory,
    EquationMetadata,
    SourceReference,
    Variable,
};
