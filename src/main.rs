//! # exif-remover CLI
//!
//! Command-line interface for the EXIF remover.
//!
//! ## Usage
//! ```bash
//! exif-remover strip ~/Photos/trip -o ~/Exports/clean
//! exif-remover strip a.jpg b.png --rename --format json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
