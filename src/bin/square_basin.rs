//! Write the data files for the idealized square-basin storm-surge case.
//!
//! Usage: `square_basin [package]`, where `package` defaults to the one
//! supported engine. Files are written into the working directory.

use std::env;
use std::path::Path;
use std::process;

use surgerun::setup::{square_basin, SUPPORTED_PACKAGE};

/// Forcing lead-in before hour 0.
const RAMP_UP: f64 = 12.0 * 3600.0;

fn main() {
    let package = env::args()
        .nth(1)
        .unwrap_or_else(|| SUPPORTED_PACKAGE.to_string());

    let setup = match square_basin(&package, RAMP_UP) {
        Ok(setup) => setup,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = setup.write_all(Path::new(".")) {
        eprintln!("failed to write data files: {}", err);
        process::exit(1);
    }
}
