//! # Oven CLI
//!
//! Terminal front end for the combustion chamber calculator. Collects the
//! inputs from flags, a JSON request file or interactive prompts, runs the
//! calculation in `oven_core` and prints the result as text, JSON or
//! Markdown.
//!
//! ```text
//! oven chamber --power 8 --heating-period 12 --circumference 200
//! oven flue --max-wood 30 --passage-length 8 --chimney-height 6 --format json
//! oven run request.json
//! oven equations > EQUATIONS.md
//! oven interactive
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` for more.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use oven_core::calculations::{CalculationItem, CalculationOutput, CombustionChamberInput, FluePassageInput};
use oven_core::constants::{DEFAULT_ALTITUDE, DEFAULT_TEMPERATURE, FLUE_EXIT_TEMPERATURE};
use oven_core::equations::generate_equations_markdown;
use oven_core::report::{render_report, ReportFormat};
use oven_core::units::NORMAL_TEMPERATURE;
use oven_core::{CalcError, Settings};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oven")]
#[command(about = "Masonry wood-fired oven combustion chamber calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Settings file (JSON)
    #[arg(short, long, global = true, env = "OVEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a combustion chamber
    Chamber(ChamberArgs),

    /// Check a flue passage and the chimney draft
    Flue(FlueArgs),

    /// Run a JSON calculation request ("-" reads stdin)
    Run {
        /// Request file with a tagged calculation item
        path: String,
    },

    /// Print the equation reference as Markdown
    Equations,

    /// Prompt for chamber inputs on the terminal
    Interactive,
}

#[derive(Args)]
struct ChamberArgs {
    /// Nominal power (kW)
    #[arg(long, allow_hyphen_values = true)]
    power: f64,

    /// Heating period (h)
    #[arg(long, allow_hyphen_values = true)]
    heating_period: f64,

    /// Chamber circumference (cm)
    #[arg(long, allow_hyphen_values = true)]
    circumference: f64,

    /// Double-wall construction (default: single wall)
    #[arg(long)]
    double_wall: bool,

    /// Altitude above sea level (m)
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_ALTITUDE)]
    altitude: f64,

    /// Ambient temperature (°C)
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Label shown in the report
    #[arg(long)]
    label: Option<String>,
}

impl From<ChamberArgs> for CombustionChamberInput {
    fn from(args: ChamberArgs) -> Self {
        CombustionChamberInput::new(args.power, args.heating_period, args.circumference)
            .with_label(args.label.unwrap_or_default())
            .with_single_wall(!args.double_wall)
            .with_altitude(args.altitude)
            .with_temperature(args.temperature)
    }
}

#[derive(Args)]
struct FlueArgs {
    /// Maximum wood load per firing (kg)
    #[arg(long, allow_hyphen_values = true)]
    max_wood: f64,

    /// Passage length (cm)
    #[arg(long, allow_hyphen_values = true)]
    passage_length: f64,

    /// Double-wall construction (default: single wall)
    #[arg(long)]
    double_wall: bool,

    /// Flue temperature leaving the chamber (°C)
    #[arg(long, allow_hyphen_values = true, default_value_t = FLUE_EXIT_TEMPERATURE)]
    inlet_temperature: f64,

    /// Effective chimney height (m)
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    chimney_height: f64,

    /// Altitude above sea level (m)
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_ALTITUDE)]
    altitude: f64,

    /// Ambient temperature (°C)
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Label shown in the report
    #[arg(long)]
    label: Option<String>,
}

impl From<FlueArgs> for FluePassageInput {
    fn from(args: FlueArgs) -> Self {
        FluePassageInput::new(args.max_wood, args.passage_length)
            .with_label(args.label.unwrap_or_default())
            .with_single_wall(!args.double_wall)
            .with_inlet_temperature(args.inlet_temperature)
            .with_chimney_height(args.chimney_height)
            .with_altitude(args.altitude)
            .with_temperature(args.temperature)
    }
}

/// Lowest ambient temperature the density formulas accept (°C).
const ABSOLUTE_ZERO: f64 = -NORMAL_TEMPERATURE.0;

/// Reject site conditions the calculator would turn into infinite or
/// negative densities. Non-finite values are left to `oven_core`.
fn check_site(item: &CalculationItem) -> Result<()> {
    let (altitude, temperature) = match item {
        CalculationItem::CombustionChamber(input) => (input.altitude, input.temperature),
        CalculationItem::FluePassage(input) => (input.altitude, input.temperature),
    };
    if altitude < 0.0 {
        bail!("Altitude must not be negative, got {} m", altitude);
    }
    if temperature <= ABSOLUTE_ZERO {
        bail!("Temperature must be above {} °C, got {} °C", ABSOLUTE_ZERO, temperature);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            Ok(Settings::load(path)?)
        }
        None => {
            debug!("No settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

fn read_request(path: &str) -> Result<CalculationItem> {
    let contents = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        info!("Reading request from {}", path);
        fs::read_to_string(path).map_err(|e| CalcError::file_error("read request", path, e.to_string()))?
    };
    let item: CalculationItem = serde_json::from_str(&contents).map_err(CalcError::from)?;
    Ok(item)
}

fn prompt_f64(input: &mut impl BufRead, out: &mut impl Write, prompt: &str, default: f64) -> f64 {
    if write!(out, "{} [{}]: ", prompt, default).and_then(|_| out.flush()).is_err() {
        return default;
    }

    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return default;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return default;
    }
    trimmed.parse().unwrap_or_else(|_| {
        warn!("Could not parse '{}', using {}", trimmed, default);
        default
    })
}

fn prompt_bool(input: &mut impl BufRead, out: &mut impl Write, prompt: &str, default: bool) -> bool {
    let hint = if default { "Y/n" } else { "y/N" };
    if write!(out, "{} [{}]: ", prompt, hint).and_then(|_| out.flush()).is_err() {
        return default;
    }

    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return default;
    }

    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

fn interactive_input(input: &mut impl BufRead, out: &mut impl Write) -> Result<CombustionChamberInput> {
    writeln!(out, "Oven Calculator - Combustion Chamber")?;
    writeln!(out, "====================================")?;
    writeln!(out)?;

    let power = prompt_f64(input, out, "Nominal power (kW)", 8.0);
    let heating_period = prompt_f64(input, out, "Heating period (h)", 12.0);
    let circumference = prompt_f64(input, out, "Chamber circumference (cm)", 200.0);
    let single_wall = prompt_bool(input, out, "Single-wall construction?", true);
    let altitude = prompt_f64(input, out, "Altitude (m)", DEFAULT_ALTITUDE);
    let temperature = prompt_f64(input, out, "Ambient temperature (°C)", DEFAULT_TEMPERATURE);
    writeln!(out)?;

    Ok(CombustionChamberInput::new(power, heating_period, circumference)
        .with_single_wall(single_wall)
        .with_altitude(altitude)
        .with_temperature(temperature))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::from)?;
    println!("{}", json);
    Ok(())
}

fn execute(item: CalculationItem, settings: &Settings, format: OutputFormat) -> Result<()> {
    info!(calc_type = item.calc_type(), label = item.label(), "Running calculation");
    debug!(?item, "Calculation input");
    check_site(&item)?;

    let output = item.run()?;
    for advisory in output.advisories() {
        warn!(code = ?advisory.code, "{}", advisory.message);
    }

    match format {
        OutputFormat::Json => match &output {
            CalculationOutput::CombustionChamber(result) => print_json(result)?,
            CalculationOutput::FluePassage(result) => print_json(result)?,
        },
        OutputFormat::Text => print!("{}", render_report(&item, &output, settings, ReportFormat::Text)),
        OutputFormat::Markdown => {
            print!("{}", render_report(&item, &output, settings, ReportFormat::Markdown))
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Chamber(args) => {
            let input = CombustionChamberInput::from(args);
            execute(CalculationItem::CombustionChamber(input), &settings, cli.format)
        }
        Commands::Flue(args) => {
            let input = FluePassageInput::from(args);
            execute(CalculationItem::FluePassage(input), &settings, cli.format)
        }
        Commands::Run { path } => {
            let item = read_request(&path)?;
            execute(item, &settings, cli.format)
        }
        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut stdin = stdin.lock();
            // JSON output owns stdout
            let input = if cli.format == OutputFormat::Json {
                interactive_input(&mut stdin, &mut io::stderr())?
            } else {
                interactive_input(&mut stdin, &mut io::stdout())?
            };
            execute(CalculationItem::CombustionChamber(input), &settings, cli.format)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Some(calc_err) = err.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chamber_args_defaults() {
        let cli = Cli::try_parse_from([
            "oven", "chamber", "--power", "8", "--heating-period", "77", "--circumference", "200",
        ])
        .unwrap();
        let Commands::Chamber(args) = cli.command else {
            panic!("expected chamber command");
        };
        let input = CombustionChamberInput::from(args);
        assert_eq!(input, CombustionChamberInput::new(8.0, 77.0, 200.0));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from([
            "oven", "chamber", "--power", "-2", "--heating-period", "12", "--circumference", "200",
            "--temperature", "-10",
        ])
        .unwrap();
        let Commands::Chamber(args) = cli.command else {
            panic!("expected chamber command");
        };
        let input = CombustionChamberInput::from(args);
        assert_eq!(input.temperature, -10.0);
        let err = oven_core::compute(&input).unwrap_err();
        assert_eq!(err.field(), Some("power"));
    }

    #[test]
    fn test_flue_args() {
        let cli = Cli::try_parse_from([
            "oven", "--format", "json", "flue", "--max-wood", "30", "--passage-length", "8",
            "--double-wall", "--chimney-height", "6",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Flue(args) = cli.command else {
            panic!("expected flue command");
        };
        let input = FluePassageInput::from(args);
        assert!(!input.single_wall);
        assert_eq!(input.chimney_height, 6.0);
        assert_eq!(input.inlet_temperature, 550.0);
    }

    fn parse_chamber(extra: &[&str]) -> Cli {
        let mut args = vec!["oven", "chamber", "--power", "8", "--heating-period", "77", "--circumference", "200"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_absolute_zero_rejected() {
        for temperature in ["-273", "-300"] {
            let err = run(parse_chamber(&["--temperature", temperature, "--format", "json"])).unwrap_err();
            assert!(err.to_string().contains("Temperature must be above -273"));
        }
    }

    #[test]
    fn test_negative_altitude_rejected() {
        let err = run(parse_chamber(&["--altitude", "-5"])).unwrap_err();
        assert!(err.to_string().contains("Altitude must not be negative"));
    }

    #[test]
    fn test_site_checks_cover_requests() {
        let item: CalculationItem = serde_json::from_str(
            r#"{"type": "FluePassage", "maxWood": 25.0, "passageLength": 6.5, "altitude": -1.0}"#,
        )
        .unwrap();
        assert!(check_site(&item).is_err());

        let item = CalculationItem::CombustionChamber(
            CombustionChamberInput::new(8.0, 12.0, 200.0).with_altitude(0.0).with_temperature(-272.5),
        );
        assert!(check_site(&item).is_ok());
    }

    #[test]
    fn test_interactive_prompts_go_to_writer() {
        let mut input = io::Cursor::new("6\n\n150\nn\n\n-5\n");
        let mut out = Vec::new();
        let chamber = interactive_input(&mut input, &mut out).unwrap();

        assert_eq!(
            chamber,
            CombustionChamberInput::new(6.0, 12.0, 150.0)
                .with_single_wall(false)
                .with_temperature(-5.0)
        );
        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.starts_with("Oven Calculator"));
        assert!(prompts.contains("Heating period (h) [12]: "));
    }

    #[test]
    fn test_prompt_falls_back_on_garbage() {
        let mut input = io::Cursor::new("lots\n");
        assert_eq!(prompt_f64(&mut input, &mut io::sink(), "Power", 8.0), 8.0);
    }

    #[test]
    fn test_read_request_missing_file() {
        let err = read_request("/nonexistent/oven/request.json").unwrap_err();
        let calc_err = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc_err.error_code(), "FILE_ERROR");
    }
}
