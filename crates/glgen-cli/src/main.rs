//! glgen CLI
//!
//! Command-line front end for the registry resolution engine: parses the
//! request, reads the registry file, and drives the selected emitter.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Warnings (e.g. a requested extension the target API doesn't support)
    // are always reported; --verbose turns on engine debug output too.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(cli.verbose)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
    tracing::debug!("Verbose mode enabled");

    let request = cli.to_request()?;
    let mut emitter = glgen_emit::registry::create(&cli.generator).ok_or_else(|| {
        CliError::user(format!(
            "unknown generator \"{}\" (available: {})",
            cli.generator,
            glgen_emit::registry::NAMES.join(", ")
        ))
    })?;

    let output_name = cli.output_name(&request);
    let xml = std::fs::read_to_string(&cli.registry)?;
    glgen_registry::generate(&xml, &request, &output_name, emitter.as_mut())?;

    println!(
        "{} generated {output_name}.h and {output_name}.c",
        "glgen".green().bold()
    );
    Ok(())
}
