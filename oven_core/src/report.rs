//! # Report Generation
//!
//! Renders a calculation (input + result) as plain text or Markdown:
//! inputs, results with units, advisories, and the equations used. Layout
//! options come from [`ReportSettings`](crate::settings::ReportSettings).
//!
//! ## Example
//!
//! ```rust
//! use oven_core::calculations::CalculationItem;
//! use oven_core::calculations::combustion_chamber::CombustionChamberInput;
//! use oven_core::report::{render_report, ReportFormat};
//! use oven_core::settings::Settings;
//!
//! let item = CalculationItem::CombustionChamber(CombustionChamberInput::new(8.0, 12.0, 200.0));
//! let output = item.run().unwrap();
//! let text = render_report(&item, &output, &Settings::default(), ReportFormat::Markdown);
//! assert!(text.contains("| Maximum Wood Load |"));
//! ```

use std::fmt::Write;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calculations::{Advisory, CalculationItem, CalculationOutput};
use crate::calculations::{CombustionChamberInput, CombustionChamberResult, FluePassageInput, FluePassageResult};
use crate::equations::registry::Equation;
use crate::settings::{Settings, StoveOptions};

/// Output layout of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
}

/// One labelled line of a report table.
struct Row {
    name: String,
    value: String,
    units: String,
}

impl Row {
    fn new(name: impl Into<String>, value: impl Into<String>, units: impl Into<String>) -> Self {
        Row {
            name: name.into(),
            value: value.into(),
            units: units.into(),
        }
    }

    fn number(name: impl Into<String>, value: f64, units: impl Into<String>, precision: usize) -> Self {
        Row::new(name, format!("{:.*}", precision, value), units)
    }

    fn flag(name: impl Into<String>, value: bool) -> Self {
        Row::new(name, if value { "yes" } else { "no" }, "")
    }
}

/// Render any calculation item with its output.
///
/// A mismatched item/output pair renders the input only.
pub fn render_report(
    item: &CalculationItem,
    output: &CalculationOutput,
    settings: &Settings,
    format: ReportFormat,
) -> String {
    match (item, output) {
        (CalculationItem::CombustionChamber(input), CalculationOutput::CombustionChamber(result)) => {
            render_combustion_chamber(input, result, settings, format)
        }
        (CalculationItem::FluePassage(input), CalculationOutput::FluePassage(result)) => {
            render_flue_passage(input, result, settings, format)
        }
        _ => {
            let mut out = String::new();
            push_heading(&mut out, format, item.calc_type());
            out
        }
    }
}

/// Render a combustion chamber calculation.
pub fn render_combustion_chamber(
    input: &CombustionChamberInput,
    result: &CombustionChamberResult,
    settings: &Settings,
    format: ReportFormat,
) -> String {
    let precision = settings.report.precision;
    let mut out = String::new();

    push_heading(&mut out, format, &title("Combustion Chamber", &input.label));

    let mut inputs = vec![
        Row::number("Nominal power", input.power, "kW", precision),
        Row::number("Heating period", input.heating_period, "h", precision),
        Row::number("Chamber circumference", input.chamber_circumference, "cm", precision),
        Row::new("Wall construction", if input.single_wall { "single" } else { "double" }, ""),
        Row::number("Altitude", input.altitude, "m", precision),
        Row::number("Ambient temperature", input.temperature, "°C", precision),
    ];
    inputs.extend(stove_rows(&settings.stove, precision));
    push_table(&mut out, format, "Inputs", &inputs);

    let results: Vec<Row> = result
        .fields()
        .iter()
        .map(|(key, value)| match Equation::for_result_field(key) {
            Some(eq) => {
                let meta = eq.metadata();
                Row::number(meta.name, *value, meta.units, precision)
            }
            None => Row::number(*key, *value, "", precision),
        })
        .collect();
    push_table(&mut out, format, "Results", &results);

    if settings.report.include_advisories {
        push_advisories(&mut out, format, &result.advisories());
    }
    if settings.report.include_equations {
        push_equations(&mut out, format, &Equation::combustion_chamber());
    }
    push_footer(&mut out, format);
    out
}

/// Render a flue passage check.
pub fn render_flue_passage(
    input: &FluePassageInput,
    result: &FluePassageResult,
    settings: &Settings,
    format: ReportFormat,
) -> String {
    let precision = settings.report.precision;
    let mut out = String::new();

    push_heading(&mut out, format, &title("Flue Passage", &input.label));

    let inputs = vec![
        Row::number("Maximum wood load", input.max_wood, "kg", precision),
        Row::number("Passage length", input.passage_length, "cm", precision),
        Row::new("Wall construction", if input.single_wall { "single" } else { "double" }, ""),
        Row::number("Inlet temperature", input.inlet_temperature, "°C", precision),
        Row::number("Chimney height", input.chimney_height, "m", precision),
        Row::number("Altitude", input.altitude, "m", precision),
        Row::number("Ambient temperature", input.temperature, "°C", precision),
    ];
    push_table(&mut out, format, "Inputs", &inputs);

    let results = vec![
        Row::number("Minimal passage length", result.minimal_passage_length, "cm", precision),
        Row::number("Outlet temperature", result.outlet_temperature, "°C", precision),
        Row::number("Minimum exhaust temperature", result.minimum_exhaust_temperature, "°C", precision),
        Row::flag("Meets minimal length", result.meets_minimum_length),
        Row::flag("Exhaust too cold", result.exhaust_too_cold),
        Row::number("Real air density", result.real_air_density, "kg/m³", precision),
        Row::number("Real flue gas density", result.real_flue_density, "kg/m³", precision),
        Row::number("Draft pressure", result.draft_pressure, "Pa", precision),
    ];
    push_table(&mut out, format, "Results", &results);

    if settings.report.include_advisories {
        push_advisories(&mut out, format, &result.advisories());
    }
    if settings.report.include_equations {
        push_equations(&mut out, format, &Equation::flue_passage());
    }
    push_footer(&mut out, format);
    out
}

fn title(kind: &str, label: &str) -> String {
    if label.is_empty() {
        kind.to_string()
    } else {
        format!("{}: {}", kind, label)
    }
}

fn stove_rows(stove: &StoveOptions, precision: usize) -> Vec<Row> {
    vec![
        Row::flag("Cooking plate", stove.has_cooking_plate),
        Row::flag("Water heat exchanger", stove.has_water_exchange),
        Row::number("Min. air intake height", stove.min_air_intake_height_cm, "cm", precision),
    ]
}

fn push_heading(out: &mut String, format: ReportFormat, text: &str) {
    match format {
        ReportFormat::Text => {
            let rule = "═".repeat(text.chars().count().max(40));
            let _ = writeln!(out, "{}\n  {}\n{}\n", rule, text.to_uppercase(), rule);
        }
        ReportFormat::Markdown => {
            let _ = writeln!(out, "# {}\n", text);
        }
    }
}

fn push_table(out: &mut String, format: ReportFormat, caption: &str, rows: &[Row]) {
    match format {
        ReportFormat::Text => {
            let _ = writeln!(out, "{}:", caption);
            let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
            for row in rows {
                let pad = width - row.name.chars().count();
                let _ = writeln!(
                    out,
                    "  {}{}  {} {}",
                    row.name,
                    " ".repeat(pad),
                    row.value,
                    row.units
                );
            }
            out.push('\n');
        }
        ReportFormat::Markdown => {
            let _ = writeln!(out, "## {}\n", caption);
            out.push_str("| Quantity | Value | Units |\n");
            out.push_str("|----------|------:|-------|\n");
            for row in rows {
                let _ = writeln!(out, "| {} | {} | {} |", row.name, row.value, row.units);
            }
            out.push('\n');
        }
    }
}

fn push_advisories(out: &mut String, format: ReportFormat, advisories: &[Advisory]) {
    match format {
        ReportFormat::Text => {
            out.push_str("Advisories:\n");
            if advisories.is_empty() {
                out.push_str("  none\n");
            }
            for a in advisories {
                let _ = writeln!(out, "  [WARN] {}", a.message);
            }
            out.push('\n');
        }
        ReportFormat::Markdown => {
            out.push_str("## Advisories\n\n");
            if advisories.is_empty() {
                out.push_str("None.\n");
            }
            for a in advisories {
                let code = serde_json::to_value(a.code)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                let _ = writeln!(out, "- **{}**: {}", code, a.message);
            }
            out.push('\n');
        }
    }
}

fn push_equations(out: &mut String, format: ReportFormat, equations: &[Equation]) {
    match format {
        ReportFormat::Text => {
            out.push_str("Equations:\n");
            for eq in equations {
                let meta = eq.metadata();
                let _ = writeln!(out, "  {:<32} {}", meta.name, meta.formula_plain);
            }
            out.push('\n');
        }
        ReportFormat::Markdown => {
            out.push_str("## Equations\n\n");
            for eq in equations {
                let meta = eq.metadata();
                let _ = writeln!(
                    out,
                    "- **{}**: `{}` ({})",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation()
                );
            }
            out.push('\n');
        }
    }
}

fn push_footer(out: &mut String, format: ReportFormat) {
    let stamp = Utc::now().format("%Y-%m-%d %H:%M UTC");
    match format {
        ReportFormat::Text => {
            let _ = writeln!(out, "Generated {}", stamp);
        }
        ReportFormat::Markdown => {
            let _ = writeln!(out, "_Generated {}_", stamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::combustion_chamber::calculate;
    use crate::calculations::flue_passage::calculate_flue_passage;

    fn chamber() -> (CombustionChamberInput, CombustionChamberResult) {
        let input = CombustionChamberInput::new(8.0, 77.0, 200.0).with_label("K-1");
        let result = calculate(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_text_report_lists_results() {
        let (input, result) = chamber();
        let text = render_combustion_chamber(&input, &result, &Settings::default(), ReportFormat::Text);
        assert!(text.contains("COMBUSTION CHAMBER: K-1"));
        assert!(text.contains("Maximum Wood Load"));
        assert!(text.contains("189.84 kg"));
        assert!(text.contains("Real Flue Gas Density"));
        assert!(text.contains("Advisories:\n  none"));
    }

    #[test]
    fn test_precision_setting() {
        let (input, result) = chamber();
        let mut settings = Settings::default();
        settings.report.precision = 4;
        let text = render_combustion_chamber(&input, &result, &settings, ReportFormat::Text);
        assert!(text.contains("189.8422 kg"));
    }

    #[test]
    fn test_markdown_report_sections() {
        let (input, result) = chamber();
        let md = render_combustion_chamber(&input, &result, &Settings::default(), ReportFormat::Markdown);
        assert!(md.starts_with("# Combustion Chamber: K-1"));
        assert!(md.contains("## Inputs"));
        assert!(md.contains("| Cooking plate | no |  |"));
        assert!(md.contains("## Equations"));
        assert!(md.contains("f_a = 1 / exp(-9.81 * z / 78624)"));
    }

    #[test]
    fn test_equations_can_be_omitted() {
        let (input, result) = chamber();
        let mut settings = Settings::default();
        settings.report.include_equations = false;
        settings.report.include_advisories = false;
        let md = render_combustion_chamber(&input, &result, &settings, ReportFormat::Markdown);
        assert!(!md.contains("## Equations"));
        assert!(!md.contains("## Advisories"));
    }

    #[test]
    fn test_flue_report_shows_advisory_code() {
        let input = FluePassageInput::new(25.0, 3.0);
        let result = calculate_flue_passage(&input).unwrap();
        let md = render_flue_passage(&input, &result, &Settings::default(), ReportFormat::Markdown);
        assert!(md.contains("**PASSAGE_TOO_SHORT**"));
        assert!(md.contains("| Meets minimal length | no |  |"));
    }

    #[test]
    fn test_render_report_dispatch() {
        let item = CalculationItem::FluePassage(FluePassageInput::new(25.0, 6.5));
        let output = item.run().unwrap();
        let text = render_report(&item, &output, &Settings::default(), ReportFormat::Text);
        assert!(text.contains("FLUE PASSAGE"));
        assert!(text.contains("Draft pressure"));
    }
}
