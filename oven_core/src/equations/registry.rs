//! # Equation Registry
//!
//! Metadata for every formula the calculator evaluates: plain-text formula,
//! variables with units, source reference, and the function implementing
//! it. Reports use it for their equation list and `gen-equations` renders
//! it to `EQUATIONS.md`.
//!
//! ## Usage
//!
//! ```rust
//! use oven_core::equations::registry::{Equation, EquationCategory};
//!
//! let meta = Equation::MaxWoodLoad.metadata();
//! assert_eq!(meta.result_field, Some("maxWood"));
//! assert_eq!(meta.category, EquationCategory::FuelLoad);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Source References
// ============================================================================

/// Where a formula comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceReference {
    /// Masonry heater sizing tables (fuel load, chamber, passages, flows)
    SizingTables { quantity: &'static str },
    /// Ideal gas law at constant pressure
    IdealGasLaw,
    /// Isothermal barometric formula
    BarometricFormula,
    /// Algebraic consequence of other formulas
    Derived,
    /// Hydrostatic pressure of a gas column
    Hydrostatics,
}

impl SourceReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            SourceReference::SizingTables { quantity } => {
                format!("Masonry heater sizing tables, {}", quantity)
            }
            SourceReference::IdealGasLaw => "Ideal gas law (isobaric)".to_string(),
            SourceReference::BarometricFormula => "Barometric formula (isothermal)".to_string(),
            SourceReference::Derived => "Derived from related formulas".to_string(),
            SourceReference::Hydrostatics => "Hydrostatic gas column".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Groups for the equation reference, in calculation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    FuelLoad,
    ChamberGeometry,
    FluePassage,
    CorrectionFactors,
    Airflow,
    GasDensity,
    Draft,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::FuelLoad => "Fuel Load",
            EquationCategory::ChamberGeometry => "Combustion Chamber Geometry",
            EquationCategory::FluePassage => "Flue Passage",
            EquationCategory::CorrectionFactors => "Correction Factors",
            EquationCategory::Airflow => "Airflow",
            EquationCategory::GasDensity => "Gas Density",
            EquationCategory::Draft => "Draft",
        }
    }

    /// Sort order in generated documents (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::FuelLoad => 1,
            EquationCategory::ChamberGeometry => 2,
            EquationCategory::FluePassage => 3,
            EquationCategory::CorrectionFactors => 4,
            EquationCategory::Airflow => 5,
            EquationCategory::GasDensity => 6,
            EquationCategory::Draft => 7,
        }
    }
}

// ============================================================================
// Variables and Metadata
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

const M: Variable = Variable::new("M", "Maximum wood load per firing", "kg");
const U: Variable = Variable::new("U", "Combustion chamber circumference", "cm");
const H_MIN: Variable = Variable::new("h_min", "Minimal chamber height", "cm");
const F_T: Variable = Variable::new("f_t", "Temperature correction factor", "-");
const F_A: Variable = Variable::new("f_a", "Altitude correction factor", "-");

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    pub reference: SourceReference,
    pub variables: Vec<Variable>,
    pub category: EquationCategory,
    /// Output unit of the formula
    pub units: &'static str,
    /// Result key the formula fills, if it is reported directly
    pub result_field: Option<&'static str>,
    /// Source module where the implementation lives
    pub source_module: &'static str,
    /// Function implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every formula evaluated by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    MaxWoodLoad,
    MinWoodLoad,
    MinimalOvenMass,
    ChamberSurfaceRequirement,
    MinimalChamberArea,
    ChamberMinimalHeight,
    ChamberOptimalHeight,
    ChamberMaxArea,
    ChamberSideLength,
    MinimalPassageLength,
    PilotBurnerArea,
    TemperatureCorrection,
    AltitudeCorrection,
    AirIntakeFlowRate,
    FlueGasFlowRate,
    FlueGasMassFlowRate,
    RealAirDensity,
    RealFlueDensity,
    FlueTemperatureDrop,
    DraftPressure,
}

const CHAMBER_MODULE: &str = "oven_core/src/equations/chamber.rs";
const AIRFLOW_MODULE: &str = "oven_core/src/equations/airflow.rs";

impl Equation {
    /// All equations in calculation order.
    pub const ALL: &'static [Equation] = &[
        Equation::MaxWoodLoad,
        Equation::MinWoodLoad,
        Equation::MinimalOvenMass,
        Equation::ChamberSurfaceRequirement,
        Equation::MinimalChamberArea,
        Equation::ChamberMinimalHeight,
        Equation::ChamberOptimalHeight,
        Equation::ChamberMaxArea,
        Equation::ChamberSideLength,
        Equation::MinimalPassageLength,
        Equation::PilotBurnerArea,
        Equation::TemperatureCorrection,
        Equation::AltitudeCorrection,
        Equation::AirIntakeFlowRate,
        Equation::FlueGasFlowRate,
        Equation::FlueGasMassFlowRate,
        Equation::RealAirDensity,
        Equation::RealFlueDensity,
        Equation::FlueTemperatureDrop,
        Equation::DraftPressure,
    ];

    /// Equations evaluated by the combustion chamber calculation.
    pub fn combustion_chamber() -> Vec<Equation> {
        Self::ALL
            .iter()
            .copied()
            .filter(|e| {
                e.metadata().result_field.is_some()
                    && !matches!(e, Equation::FlueTemperatureDrop | Equation::DraftPressure)
            })
            .collect()
    }

    /// Equations evaluated by the flue passage check.
    pub fn flue_passage() -> Vec<Equation> {
        vec![
            Equation::MinimalPassageLength,
            Equation::FlueTemperatureDrop,
            Equation::TemperatureCorrection,
            Equation::AltitudeCorrection,
            Equation::RealAirDensity,
            Equation::RealFlueDensity,
            Equation::DraftPressure,
        ]
    }

    /// Categories in sort order.
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories: Vec<EquationCategory> = Vec::new();
        for eq in Self::ALL {
            let cat = eq.metadata().category;
            if !categories.contains(&cat) {
                categories.push(cat);
            }
        }
        categories.sort_by_key(|c| c.sort_order());
        categories
    }

    /// Equations belonging to one category.
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        Self::ALL
            .iter()
            .copied()
            .filter(|e| e.metadata().category == category)
            .collect()
    }

    /// Look up the formula filling a result key.
    pub fn for_result_field(field: &str) -> Option<Equation> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.metadata().result_field == Some(field))
    }

    /// Get full metadata for this equation.
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::MaxWoodLoad => EquationMetadata {
                name: "Maximum Wood Load",
                description: "Wood burned in one firing at nominal power over the heating period.",
                formula_plain: "M = P * t / (Hu * eta_min)",
                reference: SourceReference::SizingTables { quantity: "fuel load" },
                variables: vec![
                    Variable::new("P", "Nominal power", "kW"),
                    Variable::new("t", "Heating period", "h"),
                    Variable::new("Hu", "Lower heating value of wood (4.16)", "kWh/kg"),
                    Variable::new("eta_min", "Minimal efficiency (0.78)", "-"),
                ],
                category: EquationCategory::FuelLoad,
                units: "kg",
                result_field: Some("maxWood"),
                source_module: CHAMBER_MODULE,
                source_function: "max_wood_load",
            },
            Equation::MinWoodLoad => EquationMetadata {
                name: "Minimum Wood Load",
                description: "Smallest load the chamber is designed to burn cleanly.",
                formula_plain: "M_min = 0.5 * M",
                reference: SourceReference::SizingTables { quantity: "fuel load" },
                variables: vec![M],
                category: EquationCategory::FuelLoad,
                units: "kg",
                result_field: Some("minWood"),
                source_module: CHAMBER_MODULE,
                source_function: "min_wood_load",
            },
            Equation::MinimalOvenMass => EquationMetadata {
                name: "Minimal Oven Mass",
                description: "Storage mass in contact with the flames or the flue.",
                formula_plain: "m_oven = 50 * M",
                reference: SourceReference::SizingTables { quantity: "storage mass" },
                variables: vec![M],
                category: EquationCategory::FuelLoad,
                units: "kg",
                result_field: Some("minimalOvenMass"),
                source_module: CHAMBER_MODULE,
                source_function: "minimal_oven_mass",
            },
            Equation::ChamberSurfaceRequirement => EquationMetadata {
                name: "Chamber Surface Requirement",
                description: "Inner surface of the combustion chamber.",
                formula_plain: "O = 900 * M",
                reference: SourceReference::SizingTables { quantity: "chamber surface" },
                variables: vec![M],
                category: EquationCategory::ChamberGeometry,
                units: "cm²",
                result_field: Some("combustionChamberSurfaceRequirement"),
                source_module: CHAMBER_MODULE,
                source_function: "chamber_surface_requirement",
            },
            Equation::MinimalChamberArea => EquationMetadata {
                name: "Minimal Chamber Area",
                description: "Minimal floor area of the combustion chamber.",
                formula_plain: "A_min = 100 * M",
                reference: SourceReference::SizingTables { quantity: "chamber floor" },
                variables: vec![M],
                category: EquationCategory::ChamberGeometry,
                units: "cm²",
                result_field: Some("minimalCombustionChamberArea"),
                source_module: CHAMBER_MODULE,
                source_function: "minimal_chamber_area",
            },
            Equation::ChamberMinimalHeight => EquationMetadata {
                name: "Chamber Minimal Height",
                description: "Lowest allowed height of the combustion chamber.",
                formula_plain: "h_min = M + 25",
                reference: SourceReference::SizingTables { quantity: "chamber height" },
                variables: vec![M],
                category: EquationCategory::ChamberGeometry,
                units: "cm",
                result_field: Some("combustionChamberMinimalHeight"),
                source_module: CHAMBER_MODULE,
                source_function: "chamber_minimal_height",
            },
            Equation::ChamberOptimalHeight => EquationMetadata {
                name: "Chamber Optimal Height",
                description: "Wall height that provides the surface requirement for the given circumference.",
                formula_plain: "h_opt = (900 * M - 2 * A_min) / U",
                reference: SourceReference::Derived,
                variables: vec![M, Variable::new("A_min", "Minimal chamber area", "cm²"), U],
                category: EquationCategory::ChamberGeometry,
                units: "cm",
                result_field: Some("combustionChamberOptimalHeight"),
                source_module: CHAMBER_MODULE,
                source_function: "chamber_optimal_height",
            },
            Equation::ChamberMaxArea => EquationMetadata {
                name: "Chamber Maximal Area",
                description: "Largest floor area left once the minimal-height walls are accounted for.",
                formula_plain: "A_max = 900 * M - h_min * U / 2",
                reference: SourceReference::Derived,
                variables: vec![M, H_MIN, U],
                category: EquationCategory::ChamberGeometry,
                units: "cm²",
                result_field: Some("combustionChamberMaxArea"),
                source_module: CHAMBER_MODULE,
                source_function: "chamber_max_area",
            },
            Equation::ChamberSideLength => EquationMetadata {
                name: "Chamber Side Length",
                description: "Side of a square chamber, positive root of s^2 + 2*h_min*s - 450*M = 0.",
                formula_plain: "s = (-2 * h_min + sqrt((2 * h_min)^2 + 1800 * M)) / 2",
                reference: SourceReference::SizingTables { quantity: "chamber side" },
                variables: vec![M, H_MIN],
                category: EquationCategory::ChamberGeometry,
                units: "cm",
                result_field: Some("combustionChamberSideLength"),
                source_module: CHAMBER_MODULE,
                source_function: "chamber_side_length",
            },
            Equation::MinimalPassageLength => EquationMetadata {
                name: "Minimal Passage Length",
                description: "Shortest flue passage for the wall construction.",
                formula_plain: "L_min = k * sqrt(M), k = 1.3 single wall / 1.5 double wall",
                reference: SourceReference::SizingTables { quantity: "flue passage" },
                variables: vec![M, Variable::new("k", "Wall construction factor", "-")],
                category: EquationCategory::FluePassage,
                units: "cm",
                result_field: Some("minimalPassageLength"),
                source_module: CHAMBER_MODULE,
                source_function: "minimal_passage_length",
            },
            Equation::PilotBurnerArea => EquationMetadata {
                name: "Pilot Burner Area",
                description: "Cross-section of the gas groove (safety burn-through).",
                formula_plain: "A_gas = M",
                reference: SourceReference::SizingTables { quantity: "gas groove" },
                variables: vec![M],
                category: EquationCategory::ChamberGeometry,
                units: "cm²",
                result_field: Some("pilotBurnerArea"),
                source_module: CHAMBER_MODULE,
                source_function: "pilot_burner_area",
            },
            Equation::TemperatureCorrection => EquationMetadata {
                name: "Temperature Correction Factor",
                description: "Volume scaling from 0 °C to the actual temperature.",
                formula_plain: "f_t = (273 + t) / 273",
                reference: SourceReference::IdealGasLaw,
                variables: vec![Variable::new("t", "Gas temperature", "°C")],
                category: EquationCategory::CorrectionFactors,
                units: "-",
                result_field: Some("tempCorrectionFactor"),
                source_module: AIRFLOW_MODULE,
                source_function: "temp_correction_factor",
            },
            Equation::AltitudeCorrection => EquationMetadata {
                name: "Altitude Correction Factor",
                description: "Volume scaling from sea level to the site altitude.",
                formula_plain: "f_a = 1 / exp(-9.81 * z / 78624)",
                reference: SourceReference::BarometricFormula,
                variables: vec![Variable::new("z", "Altitude above sea level", "m")],
                category: EquationCategory::CorrectionFactors,
                units: "-",
                result_field: Some("altitudeCorrectionFactor"),
                source_module: AIRFLOW_MODULE,
                source_function: "altitude_correction_factor",
            },
            Equation::AirIntakeFlowRate => EquationMetadata {
                name: "Air Intake Flow Rate",
                description: "Combustion air demand at site conditions.",
                formula_plain: "V_air = 0.00256 * M * f_t * f_a",
                reference: SourceReference::SizingTables { quantity: "combustion air" },
                variables: vec![M, F_T, F_A],
                category: EquationCategory::Airflow,
                units: "m³/s",
                result_field: Some("airIntakeFlowRate"),
                source_module: AIRFLOW_MODULE,
                source_function: "air_intake_flow_rate",
            },
            Equation::FlueGasFlowRate => EquationMetadata {
                name: "Flue Gas Flow Rate",
                description: "Flue gas volume flow at site conditions.",
                formula_plain: "V_flue = 0.00273 * M * f_t * f_a",
                reference: SourceReference::SizingTables { quantity: "flue gas" },
                variables: vec![M, F_T, F_A],
                category: EquationCategory::Airflow,
                units: "m³/s",
                result_field: Some("flueGasFlowRate"),
                source_module: AIRFLOW_MODULE,
                source_function: "flue_gas_flow_rate",
            },
            Equation::FlueGasMassFlowRate => EquationMetadata {
                name: "Flue Gas Mass Flow Rate",
                description: "Flue gas mass flow, independent of site conditions.",
                formula_plain: "m_flue = 0.0035 * M",
                reference: SourceReference::SizingTables { quantity: "flue gas" },
                variables: vec![M],
                category: EquationCategory::Airflow,
                units: "kg/s",
                result_field: Some("flueGasMassFlowRate"),
                source_module: AIRFLOW_MODULE,
                source_function: "flue_gas_mass_flow_rate",
            },
            Equation::RealAirDensity => EquationMetadata {
                name: "Real Air Density",
                description: "Air density at site temperature and altitude.",
                formula_plain: "rho_air = 1.293 / (f_t * f_a)",
                reference: SourceReference::IdealGasLaw,
                variables: vec![F_T, F_A],
                category: EquationCategory::GasDensity,
                units: "kg/m³",
                result_field: Some("realAirDensity"),
                source_module: AIRFLOW_MODULE,
                source_function: "real_density",
            },
            Equation::RealFlueDensity => EquationMetadata {
                name: "Real Flue Gas Density",
                description: "Flue gas density at site temperature and altitude.",
                formula_plain: "rho_flue = 1.282 / (f_t * f_a)",
                reference: SourceReference::IdealGasLaw,
                variables: vec![F_T, F_A],
                category: EquationCategory::GasDensity,
                units: "kg/m³",
                result_field: Some("realFlueDensity"),
                source_module: AIRFLOW_MODULE,
                source_function: "real_density",
            },
            Equation::FlueTemperatureDrop => EquationMetadata {
                name: "Flue Temperature Drop",
                description: "Flue gas temperature after a given passage length.",
                formula_plain: "T(L) = T_in * exp(-0.83 * L / L_min)",
                reference: SourceReference::SizingTables { quantity: "passage cooling" },
                variables: vec![
                    Variable::new("T_in", "Temperature leaving the chamber (550 default)", "°C"),
                    Variable::new("L", "Passage length", "cm"),
                    Variable::new("L_min", "Minimal passage length", "cm"),
                ],
                category: EquationCategory::FluePassage,
                units: "°C",
                result_field: Some("outletTemperature"),
                source_module: AIRFLOW_MODULE,
                source_function: "flue_temperature_at",
            },
            Equation::DraftPressure => EquationMetadata {
                name: "Draft Pressure",
                description: "Static draft of the chimney from the air/flue density difference.",
                formula_plain: "dp = 9.81 * H * (rho_air - rho_flue)",
                reference: SourceReference::Hydrostatics,
                variables: vec![
                    Variable::new("H", "Effective chimney height", "m"),
                    Variable::new("rho_air", "Outside air density", "kg/m³"),
                    Variable::new("rho_flue", "Flue gas density", "kg/m³"),
                ],
                category: EquationCategory::Draft,
                units: "Pa",
                result_field: Some("draftPressure"),
                source_module: AIRFLOW_MODULE,
                source_function: "draft_pressure",
            },
        }
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Render the whole registry as a Markdown reference document.
///
/// ```rust
/// use oven_core::equations::generate_equations_markdown;
///
/// let md = generate_equations_markdown();
/// assert!(md.contains("## Fuel Load"));
/// assert!(md.contains("M = P * t / (Hu * eta_min)"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Oven Calculator Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula used to size the combustion chamber and check the flue
passage. Quantities at normal conditions refer to 0 °C and sea level.

---

"#,
    );

    for category in Equation::all_categories() {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in Equation::in_category(category) {
            output.push_str(&equation_markdown(equation));
        }
    }

    output
}

/// Markdown section for a single equation.
pub fn equation_markdown(equation: Equation) -> String {
    let meta = equation.metadata();
    let mut out = String::new();

    out.push_str(&format!("### {}\n\n", meta.name));
    out.push_str(&format!("{}\n\n", meta.description));
    out.push_str(&format!("**Formula:** `{}` [{}]\n\n", meta.formula_plain, meta.units));

    if !meta.variables.is_empty() {
        out.push_str("| Symbol | Description | Units |\n");
        out.push_str("|--------|-------------|-------|\n");
        for var in &meta.variables {
            out.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
        }
        out.push('\n');
    }

    out.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
    out.push_str(&format!(
        "**Source:** [`{}`]({})\n\n",
        meta.source_function, meta.source_module
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_equation_has_metadata() {
        for eq in Equation::ALL {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty());
            assert!(!meta.formula_plain.is_empty());
            assert!(meta.source_module.starts_with("oven_core/src/equations/"));
        }
    }

    #[test]
    fn test_result_fields_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for eq in Equation::ALL {
            if let Some(field) = eq.metadata().result_field {
                assert!(seen.insert(field), "duplicate result field {}", field);
            }
        }
    }

    #[test]
    fn test_combustion_chamber_covers_all_result_fields() {
        assert_eq!(Equation::combustion_chamber().len(), 18);
        assert_eq!(
            Equation::for_result_field("combustionChamberSideLength"),
            Some(Equation::ChamberSideLength)
        );
        assert_eq!(Equation::for_result_field("nope"), None);
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        assert_eq!(cats.first(), Some(&EquationCategory::FuelLoad));
        assert_eq!(cats.last(), Some(&EquationCategory::Draft));
        assert_eq!(cats.len(), 7);
    }

    #[test]
    fn test_markdown_lists_every_equation() {
        let md = generate_equations_markdown();
        for eq in Equation::ALL {
            assert!(md.contains(eq.metadata().name));
        }
    }
}
