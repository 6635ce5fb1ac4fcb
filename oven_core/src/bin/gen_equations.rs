//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations [output-path]
//! ```
//!
//! Without an argument the file is written to `oven_core/EQUATIONS.md`
//! (relative to the workspace root).

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use oven_core::equations::{generate_equations_markdown, Equation};

const DEFAULT_OUTPUT: &str = "oven_core/EQUATIONS.md";

fn main() {
    let output_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let markdown = generate_equations_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                Equation::ALL.len(),
                markdown.len(),
                output_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            process::exit(1);
        }
    }
}
